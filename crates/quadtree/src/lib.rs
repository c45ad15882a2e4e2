//! Region quadtree for 2D point range queries.
//!
//! This crate contains:
//! - [`Bounds`], the axis-aligned rectangle used for node regions and queries
//! - [`Positioned`], the only thing the tree needs to know about an item
//! - [`QuadTree`], the container with clear/insert/query
//!
//! ```
//! use quadtree::{Bounds, QuadTree};
//!
//! let mut tree = QuadTree::new(Bounds::new(0.0, 0.0, 100.0, 100.0), 4).unwrap();
//! assert!(tree.insert((10.0f32, 10.0f32)));
//! assert!(!tree.insert((150.0f32, 150.0f32)));
//! assert_eq!(tree.query(&Bounds::new(0.0, 0.0, 25.0, 25.0)).len(), 1);
//! ```

mod bounds;
mod error;
mod node;
mod quadtree;

pub use bounds::{Bounds, Positioned};
pub use error::QuadTreeError;
pub use quadtree::{QuadTree, QuadTreeStats, DEFAULT_MAX_DEPTH};
