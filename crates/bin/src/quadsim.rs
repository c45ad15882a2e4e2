//! Quadsim - proximity simulation backed by a quadtree index.

use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Quadsim v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = sim::Config::load()?;
    info!("Loaded configuration");
    info!("  World: {}x{}, {} actors", config.world.width, config.world.height, config.world.actors);
    info!("  Node capacity: {}, max depth: {}", config.tree.capacity, config.tree.max_depth);
    info!("  Ticks: {} every {}ms", config.sim.ticks, config.sim.tick_interval_ms);

    sim::run(config).await?;

    Ok(())
}
