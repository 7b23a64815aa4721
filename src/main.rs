//! Editweb main entry point

use anyhow::Context;
use clap::Parser;
use editweb_api::start_server;
use editweb_config::{Config, ConfigError};
use editweb_core::RecordStore;
use editweb_source::JsonFileSource;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::RwLock;

#[derive(Parser, Debug)]
#[command(name = "editweb")]
#[command(author = "Editweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight web view for browsing transaction edit records", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

/// Missing config file means defaults; anything else is fatal
fn load_config(path: &Path) -> anyhow::Result<(Config, Option<ConfigError>)> {
    match Config::load(path) {
        Ok(config) => Ok((config, None)),
        Err(e @ ConfigError::FileNotFound { .. }) => Ok((Config::default(), Some(e))),
        Err(e) => Err(anyhow::anyhow!("{}", e.to_details())).context("Failed to load configuration"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, warning) = load_config(&args.config)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str())).init();

    if let Some(warning) = warning {
        log::warn!("{}; using built-in defaults", warning);
    }

    let records_path = config.records_path();
    log::info!(
        "Config loaded: records={}, page_size={}",
        records_path.display(),
        config.pagination.page_size
    );

    let rt = Runtime::new()?;
    rt.block_on(async {
        let source = Arc::new(JsonFileSource::new(records_path));
        let mut store = RecordStore::new(&config, source);

        // A missing or broken record file still serves an empty table
        if let Err(e) = store.load().await {
            log::warn!("Starting with no records: {}", e.to_details());
        }

        start_server(config, Arc::new(RwLock::new(store)))
            .await
            .context("Server error")
    })
}
