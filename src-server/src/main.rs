use anyhow::{Context, Result};

use portal_server::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    rolling_logger::init_logger(&config.log_dir, "portal-server").context("Failed to initialize logging")?;

    portal_server::run(config).await
}
