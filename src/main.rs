use clap::Parser;
use miette::{IntoDiagnostic, Result};
use paperdesk::application::checkout::CheckoutEngine;
use paperdesk::config::Config;
use paperdesk::domain::ports::{NotificationDispatcherBox, OrderStoreBox, UserStoreBox};
use paperdesk::infrastructure::email::{HttpEmailDispatcher, LogOnlyDispatcher};
use paperdesk::infrastructure::in_memory::{InMemoryOrderStore, InMemoryUserStore};
use paperdesk::infrastructure::paypal::PayPalGateway;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Overrides the PORT environment variable.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();

    let mut config = Config::load().into_diagnostic()?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    let (orders, users): (OrderStoreBox, UserStoreBox) = match cli.db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(db_path) => {
            let store =
                paperdesk::infrastructure::rocksdb::RocksDbStore::open(db_path).into_diagnostic()?;
            (Box::new(store.clone()), Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            return Err(miette::miette!(
                "--db-path requires building with the storage-rocksdb feature"
            ));
        }
        None => (
            Box::new(InMemoryOrderStore::new()),
            Box::new(InMemoryUserStore::new()),
        ),
    };

    let gateway = PayPalGateway::new(config.paypal.clone()).into_diagnostic()?;

    let notifier: NotificationDispatcherBox = match &config.email {
        Some(email) => Box::new(HttpEmailDispatcher::new(email.clone()).into_diagnostic()?),
        None => Box::new(LogOnlyDispatcher),
    };

    let engine = CheckoutEngine::new(orders, users, Box::new(gateway), notifier);

    paperdesk::serve(config, engine).await.into_diagnostic()?;

    Ok(())
}
