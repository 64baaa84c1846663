use clap::Parser;
use tracing_subscriber::EnvFilter;

use mindbloom::cli::{Cli, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout is reserved for rendered output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mindbloom=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await
}
