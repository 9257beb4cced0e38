//! seedbed server binary.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use seedbed_server::{serve, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "seedbed",
    version,
    about = "Provision a three-table dataset in PostgreSQL and serve it back, sorted"
)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "127.0.0.1:3030")]
    bind: SocketAddr,

    /// Overall retrieval deadline in milliseconds
    #[arg(long, default_value_t = 2000)]
    timeout_ms: u64,

    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    serve(ServerConfig {
        bind_addr: cli.bind,
        retrieve_timeout: Duration::from_millis(cli.timeout_ms),
    })
    .await?;

    Ok(())
}

fn init_tracing(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
