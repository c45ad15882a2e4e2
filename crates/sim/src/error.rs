//! Simulation error types.

use thiserror::Error;

/// Errors that stop the simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Index(#[from] quadtree::QuadTreeError),

    #[error("Query around actor {actor} on tick {tick} found {tree} neighbours in the tree but {scan} by scanning")]
    QueryMismatch {
        tick: u64,
        actor: u32,
        tree: usize,
        scan: usize,
    },
}
