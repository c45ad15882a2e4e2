//! Simulation configuration.

use crate::SimError;
use quadtree::Bounds;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "quadsim.toml";

/// Upper bound accepted for `tree.max_depth`.
///
/// Insert recursion is as deep as the tree, and halving an `f32` extent
/// collapses to zero long before this anyway.
pub const MAX_TREE_DEPTH: u32 = 64;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub sim: SimConfig,
}

impl Config {
    /// Load configuration from `quadsim.toml` or create it with defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load configuration from `path`, writing a default file if it is missing.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str(&contents)?
        } else {
            info!("No {} found, creating default config", path.display());
            let default_config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&default_config)?)?;
            default_config
        };
        config.validate()?;
        Ok(config)
    }

    /// World border, anchored at the origin.
    pub fn world_bounds(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.world.width, self.world.height)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.tree.capacity == 0 {
            return Err(SimError::InvalidConfig("tree.capacity must be at least 1".into()));
        }
        if !self.world_bounds().is_valid() || self.world.width == 0.0 || self.world.height == 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "world size must be positive, got {}x{}",
                self.world.width, self.world.height
            )));
        }
        if self.tree.max_depth > MAX_TREE_DEPTH {
            return Err(SimError::InvalidConfig(format!(
                "tree.max_depth must be at most {MAX_TREE_DEPTH}, got {}",
                self.tree.max_depth
            )));
        }
        // Speeds and radii beyond the world size overflow the random ranges
        // and query bounds.
        let extent = self.world.width.max(self.world.height).min(f32::MAX / 4.0);
        if !(0.0..=extent).contains(&self.world.max_speed) {
            return Err(SimError::InvalidConfig(format!(
                "world.max_speed must be between 0 and {extent}, got {}",
                self.world.max_speed
            )));
        }
        if !(0.0..=extent).contains(&self.sim.query_radius) {
            return Err(SimError::InvalidConfig(format!(
                "sim.query_radius must be between 0 and {extent}, got {}",
                self.sim.query_radius
            )));
        }
        if self.sim.tick_interval_ms == 0 {
            return Err(SimError::InvalidConfig("sim.tick_interval_ms must be at least 1".into()));
        }
        Ok(())
    }
}

/// Spatial index settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TreeConfig {
    /// Items a node holds before it subdivides.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Depth at which nodes stop subdividing.
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            max_depth: default_max_depth(),
        }
    }
}

fn default_capacity() -> usize {
    8
}
fn default_max_depth() -> u32 {
    quadtree::DEFAULT_MAX_DEPTH
}

/// World size and population.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorldConfig {
    #[serde(default = "default_world_size")]
    pub width: f32,
    #[serde(default = "default_world_size")]
    pub height: f32,
    /// Number of actors spawned at startup.
    #[serde(default = "default_actors")]
    pub actors: usize,
    /// Maximum actor speed in world units per tick.
    #[serde(default = "default_max_speed")]
    pub max_speed: f32,
    /// RNG seed, so runs are reproducible.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: default_world_size(),
            height: default_world_size(),
            actors: default_actors(),
            max_speed: default_max_speed(),
            seed: default_seed(),
        }
    }
}

fn default_world_size() -> f32 {
    1000.0
}
fn default_actors() -> usize {
    2000
}
fn default_max_speed() -> f32 {
    4.0
}
fn default_seed() -> u64 {
    0x5EED
}

/// Tick loop and query settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimConfig {
    /// Tick interval in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Ticks to run before exiting (0 = run until interrupted).
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Half extent of the square searched around each probing actor.
    #[serde(default = "default_query_radius")]
    pub query_radius: f32,
    /// Number of actors that probe their neighbourhood each tick.
    #[serde(default = "default_queries_per_tick")]
    pub queries_per_tick: usize,
    /// Cross-check every query against a brute-force scan.
    #[serde(default = "default_verify")]
    pub verify: bool,
    /// Log a summary every N ticks.
    #[serde(default = "default_log_every")]
    pub log_every: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval(),
            ticks: default_ticks(),
            query_radius: default_query_radius(),
            queries_per_tick: default_queries_per_tick(),
            verify: default_verify(),
            log_every: default_log_every(),
        }
    }
}

fn default_tick_interval() -> u64 {
    40
}
fn default_ticks() -> u64 {
    250
}
fn default_query_radius() -> f32 {
    50.0
}
fn default_queries_per_tick() -> usize {
    200
}
fn default_verify() -> bool {
    true
}
fn default_log_every() -> u64 {
    25
}
