//! Kennel server entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kennel_server::api::{create_router, AppState};
use kennel_server::config::Config;
use kennel_server::metrics;
use kennel_server::store::seed::seed_sample_data;
use kennel_server::store::Store;
use kennel_server::utils::shutdown_signal;

/// Kennel CRUD server.
#[derive(Parser, Debug)]
#[command(name = "kennel-server")]
#[command(about = "JSON CRUD API for animals, locations, customers and employees")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create the database tables.
    InitDb {
        /// Also load the sample kennel data into an empty database.
        #[arg(long)]
        seed: bool,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("kennel_server=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    metrics::init_metrics();

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port.or(args.port)).await,
        Some(Command::InitDb { seed }) => cmd_init_db(seed).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        None => cmd_serve(args.port).await,
    }
}

/// Load and validate configuration, applying a CLI port override.
fn load_config(port_override: Option<u16>) -> anyhow::Result<Config> {
    let mut config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    if let Some(port) = port_override {
        config.port = port;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
    }

    Ok(config)
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    let config = load_config(port_override)?;

    let store = Store::connect(&config).await?;
    if config.auto_init_schema {
        store.init_schema().await?;
    }

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);

    let router = create_router(AppState::new(store.clone()));

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    info!("Server stopped");
    Ok(())
}

/// Create tables and optionally load sample data.
async fn cmd_init_db(seed: bool) -> anyhow::Result<()> {
    let config = load_config(None)?;

    let store = Store::connect(&config).await?;
    store.init_schema().await?;
    println!("Schema ready at {}", config.database_url);

    if seed {
        if seed_sample_data(&store).await? {
            println!("Sample data loaded");
        } else {
            println!("Database not empty, sample data skipped");
        }
    }

    store.close().await;
    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("KENNEL SERVER - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    print!("Checking bind address... ");
    match config.bind_addr() {
        Ok(addr) => {
            println!("OK");
            println!("  Listening on: {}", addr);
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Bind address invalid"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Database: {}", config.database_url);
    println!("  Pool Size: {}", config.db_max_connections);
    println!("  Auto Init Schema: {}", config.auto_init_schema);
    println!("  Log Level: {}", config.rust_log);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
