use crate::api::server as api_server;
use crate::cli::opts::*;

use anyhow::{anyhow, Context, Result};
use flashdeck_core::{Deck, DocumentStore};
use flashdeck_json::paths::{default_collections_dir, default_sqlite_file};
use flashdeck_json::JsonStore;
use flashdeck_mongo::MongoStore;
use flashdeck_sqlite::SqliteStore;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub async fn run_cli(args: Cli) -> Result<()> {
    let store = open_store(&args).await?;
    match args.cmd {
        Command::Serve(serve) => api_server::run(store, serve.addr).await,
        Command::Stats => stats_cmd(&*store).await,
    }
}

/// Opens the configured backend and pings it. Both steps share one deadline;
/// failing either is fatal for the process.
pub async fn open_store(args: &Cli) -> Result<Arc<dyn DocumentStore>> {
    let deadline = Duration::from_secs(args.connect_timeout_secs);
    info!(store = %args.store, "opening document store");

    let opened = tokio::time::timeout(deadline, async {
        let store: Arc<dyn DocumentStore> = match args.store {
            StoreKind::Mongo => {
                Arc::new(MongoStore::connect(&args.mongo_uri, &args.database).await?)
            }
            StoreKind::Sqlite => {
                let p = args.db_path.clone().unwrap_or_else(default_sqlite_file);
                if let Some(parent) = p.parent() {
                    std::fs::create_dir_all(parent).ok();
                }
                Arc::new(SqliteStore::open_file(&p).await?)
            }
            StoreKind::Json => {
                let dir = args.data_dir.clone().unwrap_or_else(default_collections_dir);
                Arc::new(JsonStore::open(dir).await?)
            }
        };
        store.ping().await?;
        Ok::<_, flashdeck_core::StoreError>(store)
    })
    .await
    .map_err(|_| anyhow!("timed out after {}s opening {} store", deadline.as_secs(), args.store))?
    .with_context(|| format!("could not connect to {} store", args.store))?;

    info!(store = %args.store, "document store ready");
    Ok(opened)
}

async fn stats_cmd(store: &dyn DocumentStore) -> Result<()> {
    for deck in Deck::ALL {
        let n = store
            .count(deck.collection())
            .await
            .with_context(|| format!("count {}", deck.collection()))?;
        println!("{}\t{}\t{}", deck, deck.collection(), n);
    }
    Ok(())
}
