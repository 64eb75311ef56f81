use clap::{Args, Parser, Subcommand, ValueEnum};
use flashdeck_core::DEFAULT_DATABASE;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const STORE_ENV: &str = "FLASHDECK_STORE";
pub const MONGO_URI_ENV: &str = "FLASHDECK_MONGO_URI";
pub const DATABASE_ENV: &str = "FLASHDECK_DATABASE";
pub const DB_PATH_ENV: &str = "FLASHDECK_DB_PATH";
pub const DATA_DIR_ENV: &str = "FLASHDECK_DATA_DIR";
pub const CONNECT_TIMEOUT_ENV: &str = "FLASHDECK_CONNECT_TIMEOUT_SECS";
pub const LISTEN_ADDR_ENV: &str = "FLASHDECK_LISTEN_ADDR";

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Mongo,
    Sqlite,
    Json,
}

impl Display for StoreKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Mongo => write!(f, "mongo"),
            StoreKind::Sqlite => write!(f, "sqlite"),
            StoreKind::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(name = "flashdeck", version, about = "Random and sequential flashcards over HTTP")]
pub struct Cli {
    /// Storage backend
    #[arg(long, value_enum, env = STORE_ENV, default_value_t = StoreKind::Mongo)]
    pub store: StoreKind,

    /// MongoDB connection string when --store mongo
    #[arg(long, env = MONGO_URI_ENV, default_value = DEFAULT_MONGO_URI)]
    pub mongo_uri: String,

    /// Database holding the deck collections when --store mongo
    #[arg(long, env = DATABASE_ENV, default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// SQLite DB path when --store sqlite (defaults to app data dir)
    #[arg(long, env = DB_PATH_ENV)]
    pub db_path: Option<PathBuf>,

    /// Directory of collection dumps when --store json (defaults to app data dir)
    #[arg(long, env = DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Upper bound on opening and pinging the store at startup
    #[arg(long, env = CONNECT_TIMEOUT_ENV, default_value_t = 10)]
    pub connect_timeout_secs: u64,

    /// Log filter directives
    #[arg(long = "log", env = "RUST_LOG", default_value = "info")]
    pub log: String,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Launch the HTTP API
    Serve(ServeCmd),
    /// Print the number of cards in each deck
    Stats,
}

#[derive(Debug, Args, Clone)]
pub struct ServeCmd {
    /// Bind address (host:port)
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub addr: SocketAddr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_deployment() {
        let cli = Cli::try_parse_from(["flashdeck", "serve"]).unwrap();
        assert_eq!(cli.store, StoreKind::Mongo);
        assert_eq!(cli.mongo_uri, DEFAULT_MONGO_URI);
        assert_eq!(cli.database, "Project_SHASN");
        assert_eq!(cli.connect_timeout_secs, 10);
        let Command::Serve(serve) = cli.cmd else {
            panic!("expected serve");
        };
        assert_eq!(serve.addr.port(), 8080);
    }

    #[test]
    fn backend_flags_parse() {
        let cli = Cli::try_parse_from([
            "flashdeck",
            "--store",
            "json",
            "--data-dir",
            "/tmp/decks",
            "stats",
        ])
        .unwrap();
        assert_eq!(cli.store, StoreKind::Json);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/decks")));
        assert!(matches!(cli.cmd, Command::Stats));
    }
}
