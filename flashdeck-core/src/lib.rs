pub mod errors;
pub mod models;
pub mod repo;
pub mod selector;

pub use errors::*;
pub use models::*;
pub use repo::*;
pub use selector::*;
