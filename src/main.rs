use anyhow::Result;
use shortgate::{config, logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    let _log_guard = logging::init_logging(&config)?;

    config.print_summary();

    server::run(config).await
}
