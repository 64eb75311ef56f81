use directories::ProjectDirs;
use std::path::PathBuf;

pub fn data_root() -> PathBuf {
    // org = "flashdeck", app = "FlashDeck"
    if let Some(pd) = ProjectDirs::from("com", "flashdeck", "FlashDeck") {
        pd.data_dir().to_path_buf()
    } else {
        // Fallback: current dir
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }
}

pub fn default_collections_dir() -> PathBuf {
    data_root().join("collections")
}

pub fn default_sqlite_file() -> PathBuf {
    data_root().join("flashdeck.sqlite3")
}
