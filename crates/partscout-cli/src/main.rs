//! Diagnostic CLI: run one adapter against one configured store and print
//! the offers as JSON. The orchestration of multiple stores per query
//! lives outside this workspace; this binary only drives a single adapter
//! for manual testing.

use clap::{Parser, Subcommand};

use partscout_browser::{BrowserStoreAdapter, SessionConfig};
use partscout_core::{AdapterKind, AppConfig, ExtractContext, SearchQuery, SourceAdapter, StoreConfig};
use partscout_meli::MeliAdapter;
use partscout_scraper::StaticStoreAdapter;

#[derive(Debug, Parser)]
#[command(name = "partscout")]
#[command(about = "PartScout extraction command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the configured stores.
    Stores,
    /// Show an adapter's configuration snapshot.
    Describe {
        /// Store name as configured in stores.yaml.
        store: String,
    },
    /// Run one extraction against a single store.
    Search {
        /// Store name as configured in stores.yaml.
        #[arg(long)]
        store: String,
        /// Search term (part name, OEM reference, ...).
        term: String,
        /// Optional category filter.
        #[arg(long)]
        category: Option<String>,
        /// Numeric store id stamped onto the offers.
        #[arg(long, default_value_t = 0)]
        store_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let app_config = partscout_core::config::load_app_config()?;
    let stores = partscout_core::load_stores(&app_config.stores_path)?;

    match cli.command {
        Commands::Stores => {
            for store in &stores.stores {
                let flag = if store.enabled { "" } else { " (disabled)" };
                println!("{} [{}]{flag}", store.name, store.kind);
            }
        }
        Commands::Describe { store } => {
            let adapter = adapter_for(&stores, &store, &app_config)?;
            for (key, value) in adapter.describe_config() {
                println!("{key}: {value}");
            }
        }
        Commands::Search {
            store,
            term,
            category,
            store_id,
        } => {
            let adapter = adapter_for(&stores, &store, &app_config)?;
            let query = match category {
                Some(category) => SearchQuery::with_category(term, category),
                None => SearchQuery::new(term),
            };
            let offers = adapter
                .extract(&query, store_id, &ExtractContext::unbounded())
                .await;
            println!("{}", serde_json::to_string_pretty(&offers)?);
        }
    }

    Ok(())
}

fn adapter_for(
    stores: &partscout_core::StoresFile,
    name: &str,
    app_config: &AppConfig,
) -> anyhow::Result<Box<dyn SourceAdapter>> {
    let store = stores
        .get(name)
        .ok_or_else(|| anyhow::anyhow!("unknown store: {name}"))?
        .clone();
    build_adapter(store, app_config)
}

fn build_adapter(
    store: StoreConfig,
    app_config: &AppConfig,
) -> anyhow::Result<Box<dyn SourceAdapter>> {
    match store.kind {
        AdapterKind::Static => Ok(Box::new(StaticStoreAdapter::new(
            store,
            &app_config.user_agent,
        )?)),
        AdapterKind::Api => Ok(Box::new(MeliAdapter::new(
            store,
            &app_config.meli_site_id,
            &app_config.user_agent,
        )?)),
        AdapterKind::Browser => {
            let session_config = SessionConfig {
                user_agent: app_config.user_agent.clone(),
                chromium_path: app_config.chromium_path.clone(),
                snapshot_dir: app_config.snapshot_dir.clone(),
                ..SessionConfig::default()
            };
            let name = store.name.clone();
            BrowserStoreAdapter::new(store, session_config)
                .map(|adapter| Box::new(adapter) as Box<dyn SourceAdapter>)
                .ok_or_else(|| anyhow::anyhow!("no selector profile for store: {name}"))
        }
    }
}
