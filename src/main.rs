//! BRILL Server
//!
//! Run with: cargo run --bin brill
//!
//! Serves the REST API (and, with `api.static_dir`, the built site).
//! Configuration is read from the first of
//! `~/.config/brill/config.toml`, `/etc/brill/config.toml`, `./config.toml`,
//! with `BRILL_*` environment overrides and `OPENAI_API_KEY` for the
//! assistant.
//!
//! `brill deposit <user_id> <amount>` credits an account directly in the
//! database, for operators funding test accounts.

use brill::api::{serve, AppState};
use brill::assistant::backend_from_config;
use brill::banking::parse_amount_text;
use brill::config::{expand_path, Config, LoggingConfig};
use brill::storage::{AccountStore, StorageConfig};
use clap::{Parser, Subcommand};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "brill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "BRILL bank API server")]
struct Args {
    #[command(subcommand)]
    command: Option<ServerCommand>,
}

#[derive(Subcommand)]
enum ServerCommand {
    /// Run the API server (default)
    Serve,

    /// Credit an account
    Deposit {
        /// Account id
        user_id: i64,
        /// Amount in rubles, e.g. 10000 or 99,50
        amount: String,
        /// Operation description
        #[arg(short, long, default_value = "Пополнение счёта")]
        description: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let loaded = Config::load_default();
    init_tracing(&loaded.config.logging)?;
    loaded.report();
    let config = loaded.config;

    let storage_config = StorageConfig::new(expand_path(&config.storage.database_path));
    tracing::info!("Database: {:?}", storage_config.database_path);
    let store = Arc::new(AccountStore::open(&storage_config)?);

    match args.command.unwrap_or(ServerCommand::Serve) {
        ServerCommand::Serve => run_server(config, store).await?,
        ServerCommand::Deposit {
            user_id,
            amount,
            description,
        } => {
            let amount = parse_amount_text(&amount)?;
            let receipt = store.deposit(user_id, amount, &description)?;
            tracing::info!(user_id, transaction_id = receipt.transaction_id, "Deposit recorded");
            println!("Зачислено {}₽, баланс {}₽", amount, receipt.new_balance);
        }
    }

    Ok(())
}

async fn run_server(config: Config, store: Arc<AccountStore>) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting BRILL server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Registered accounts: {}", store.user_count()?);

    let assistant = backend_from_config(config.assistant.client_config());
    match &assistant {
        Some(_) => tracing::info!("AI assistant enabled: {}", config.assistant.model),
        None => tracing::warn!("AI assistant disabled (set OPENAI_API_KEY to enable)"),
    }

    let mut api_config = config.api.clone();
    api_config.static_dir = api_config
        .static_dir
        .map(|dir| expand_path(&dir).to_string_lossy().to_string());

    let state = AppState::new(store, api_config.clone()).with_assistant(assistant);

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("BRILL server stopped");
    Ok(())
}

/// Install the global subscriber: `RUST_LOG` wins over the configured level,
/// `format = "json"` switches to structured output, `file` redirects it.
fn init_tracing(logging: &LoggingConfig) -> std::io::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("brill={},tower_http=debug", logging.level).into());

    let (writer, ansi) = match &logging.file {
        Some(path) => {
            let path = expand_path(path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), true),
    };

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_ansi(ansi).with_writer(writer))
            .init();
    }

    Ok(())
}
