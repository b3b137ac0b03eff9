use anyhow::Result;
use pathfinder::utils::logging;
use pathfinder::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: it decides the log level
    let config = Config::load()?;
    logging::init(config.verbose_logging);

    App::initialize(config).await?.run().await
}
