use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hello_server::{Environment, ServerOpts, serve};

/// Hello World service for Nomad deployments.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to bind.
    /// Example: `0.0.0.0` or `127.0.0.1`
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// The port number on which the server will listen for incoming connections.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Deployment mode. Handler error details are only returned to clients
    /// in `development`.
    /// Example: `development`, `production`, `staging`
    #[arg(long, env = "APP_ENV", default_value = "development")]
    environment: Environment,

    /// Version string reported by `/`, `/health` and `/api/info`.
    #[arg(long, env = "APP_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    service_version: String,

    /// Hostname reported by `/`.
    #[arg(long, env = "HOSTNAME", default_value = "unknown")]
    hostname: String,
}

impl From<Args> for ServerOpts {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            environment: args.environment,
            version: args.service_version,
            hostname: args.hostname,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!("{:?}", args);

    serve(args.into()).await.context("server")
}
