use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quotaday::{api, config, logging, quote::QuoteBook, version};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "quotaday", about = "Start the Quotaday web server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    /// Port to listen on (overrides QUOTADAY_PORT).
    #[arg(short, long)]
    port: Option<u16>,
    /// Maximum number of stored quotations (overrides QUOTADAY_CAPACITY).
    #[arg(long)]
    capacity: Option<usize>,
    /// Start with an empty quote book instead of the built-in examples.
    #[arg(long)]
    no_examples: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version and exit.
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(Command::Version) = cli.command {
        println!("{}", version::version_string());
        return Ok(());
    }

    let overrides = config::Overrides {
        port: cli.port,
        capacity: cli.capacity,
        no_examples: cli.no_examples,
    };
    config::init_config(&overrides).context("failed to load configuration")?;
    let config = config::get_config();
    logging::init_tracing(config.log_file.as_deref());

    let book = Arc::new(QuoteBook::new(config.capacity));
    if config.seed_examples {
        book.seed_examples();
    }
    let app = api::create_router(book);

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.port))
        .await
        .with_context(|| format!("failed to bind port {}", config.port))?;
    tracing::info!(
        version = %version::version_string(),
        port = config.port,
        capacity = config.capacity,
        seeded = config.seed_examples,
        "Starting Quotaday"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("Received shutdown signal, stopping server...");
    })
    .await
    .context("server terminated unexpectedly")?;

    Ok(())
}
