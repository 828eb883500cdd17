mod app;
mod browser;
mod core;
mod logger;
mod modules;
mod services;
mod utils;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use app::{AppConfig, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);

    let stats = services::run(config).await?;
    info!("共写入 {} 条记录", stats.saved);

    Ok(())
}
