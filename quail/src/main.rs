use anyhow::Result;
use clap::Parser;

use quail::{commands, logging, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let (log_path, _guard) = logging::init_logging(cli.verbose)?;
    tracing::debug!(log_path = %log_path.display(), "Logging initialized");

    if let Err(e) = commands::run(cli).await {
        tracing::error!(error = %e, "Command failed");
        return Err(e);
    }

    Ok(())
}
