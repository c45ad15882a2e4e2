//! Headless actor simulation driving the quadtree index.
//!
//! Each tick moves every actor, rebuilds the index from scratch and runs
//! neighbourhood queries, optionally cross-checked against a brute-force scan.

pub mod config;
pub mod entity;
mod error;
pub mod scan;
pub mod simulation;
pub mod world;

// Re-export commonly used types
pub use config::Config;
pub use error::SimError;
pub use simulation::{run, Simulation, TickReport};
pub use world::World;
