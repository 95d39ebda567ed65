use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fub_grid::shutdown::trigger_on_ctrl_c;
use fub_grid::{GridNode, NodeConfig, ShutdownToken};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = NodeConfig::load().context("loading node configuration")?;
    let node = GridNode::new(config);
    let running = node
        .initialize()
        .context("initializing grid node")?;

    let shutdown = ShutdownToken::new();
    trigger_on_ctrl_c(shutdown.clone());

    let report = running.spin(&shutdown).await;
    info!(?report, "Exiting.");
    Ok(())
}
