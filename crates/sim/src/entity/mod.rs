//! Simulated entities.

mod actor;

pub use actor::{Actor, ActorRef};
