//! Moving actor and the lightweight handle stored in the index.

use glam::Vec2;
use quadtree::{Bounds, Positioned};

/// A point actor wandering around the world.
#[derive(Debug, Clone)]
pub struct Actor {
    /// Unique actor ID.
    pub id: u32,
    /// Position in world coordinates.
    pub position: Vec2,
    /// Displacement applied every tick.
    pub velocity: Vec2,
}

impl Actor {
    pub fn new(id: u32, position: Vec2, velocity: Vec2) -> Self {
        Self { id, position, velocity }
    }

    /// Advance one tick, bouncing off the edges of `border`.
    pub fn step(&mut self, border: &Bounds) {
        self.position += self.velocity;

        if self.position.x < border.x || self.position.x > border.right() {
            self.velocity.x = -self.velocity.x;
            self.position.x = self.position.x.clamp(border.x, border.right());
        }
        if self.position.y < border.y || self.position.y > border.bottom() {
            self.velocity.y = -self.velocity.y;
            self.position.y = self.position.y.clamp(border.y, border.bottom());
        }
    }

    /// Snapshot of this actor for the current tick's index.
    #[inline]
    pub fn handle(&self) -> ActorRef {
        ActorRef {
            id: self.id,
            position: self.position,
        }
    }
}

impl Positioned for Actor {
    #[inline]
    fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    fn y(&self) -> f32 {
        self.position.y
    }
}

/// Actor ID plus the position it had when the index was rebuilt.
///
/// The index is rebuilt from scratch every tick, so a stale position is never
/// observed by queries issued in the same tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorRef {
    pub id: u32,
    pub position: Vec2,
}

impl Positioned for ActorRef {
    #[inline]
    fn x(&self) -> f32 {
        self.position.x
    }

    #[inline]
    fn y(&self) -> f32 {
        self.position.y
    }
}
