//! CropKeeper command-line client

use std::sync::Arc;

use clap::Parser;
use cropkeeper_client::{
    directory, logging::init_logging, ClientConfig, FarmSelectionStore, FileKeyValueStore,
};

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    dotenvy::dotenv().ok();
    init_logging(cli.verbose);

    let config = ClientConfig::load()?;
    let directory = directory::from_config(&config.directory)?;
    let storage = Arc::new(FileKeyValueStore::new(&config.storage.path));
    tracing::debug!("Preferences stored at {}", storage.path().display());

    let store = FarmSelectionStore::new(directory, storage);
    cli::run(cli.command, &store, &mut std::io::stdout()).await
}
