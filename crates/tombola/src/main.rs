use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tombola::{DEFAULT_BIND, ServerConfig, TombolaServer};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve Tombola rooms over HTTP", long_about = None)]
struct Args {
    /// Address to listen on.
    #[arg(short, long, env = "TOMBOLA_BIND", default_value = DEFAULT_BIND)]
    bind: String,

    /// JSON file to persist rooms in. Rooms are kept in memory if unset.
    #[arg(short, long, env = "TOMBOLA_DATA")]
    data: Option<PathBuf>,

    /// Create the default room when an unknown room is read.
    #[arg(long, env = "TOMBOLA_MATERIALIZE_ON_READ")]
    materialize_on_read: bool,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let config = ServerConfig::default()
            .with_bind(self.bind)
            .with_materialize_on_read(self.materialize_on_read);
        match self.data {
            Some(path) => config.with_data_path(path),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = args.into_config();
    let bind = config.bind.clone();
    let server = TombolaServer::builder()
        .config(config)
        .build()
        .await
        .with_context(|| format!("failed to start server on {bind}"))?;

    server.run().await.context("server error")?;
    Ok(())
}
