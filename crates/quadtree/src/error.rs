//! Quadtree error types.

use crate::Bounds;
use thiserror::Error;

/// Errors reported at the public API boundary of the quadtree.
///
/// Rejecting an item that lies outside the tree is not an error; `insert`
/// signals it through its return value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadTreeError {
    #[error("Node capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("Invalid boundary {0:?}: coordinates must be finite and extents non-negative")]
    InvalidBoundary(Bounds),

    #[error("Item position ({x}, {y}) is not finite")]
    NonFinitePosition { x: f32, y: f32 },
}
