//! World state management.
//!
//! Owns every actor and knows how to rebuild the spatial index from them.

use crate::config::WorldConfig;
use crate::entity::{Actor, ActorRef};
use glam::Vec2;
use quadtree::{Bounds, QuadTree};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The simulated world.
#[derive(Debug)]
pub struct World {
    /// Next actor ID to assign.
    next_actor_id: u32,
    /// All live actors.
    actors: Vec<Actor>,
    /// World border.
    border: Bounds,
    rng: StdRng,
}

/// Outcome of [`World::rebuild_index`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebuildCounts {
    pub inserted: usize,
    pub rejected: usize,
}

impl World {
    /// Create an empty world with the given border and RNG seed.
    pub fn new(border: Bounds, seed: u64) -> Self {
        Self {
            next_actor_id: 1,
            actors: Vec::new(),
            border,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a world and populate it from config.
    pub fn from_config(config: &WorldConfig) -> Self {
        let border = Bounds::new(0.0, 0.0, config.width, config.height);
        let mut world = Self::new(border, config.seed);
        world.spawn_actors(config.actors, config.max_speed);
        world
    }

    #[inline]
    pub fn border(&self) -> Bounds {
        self.border
    }

    #[inline]
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Get the next actor ID.
    fn next_id(&mut self) -> u32 {
        let id = self.next_actor_id;
        self.next_actor_id = self.next_actor_id.wrapping_add(1);
        if self.next_actor_id == 0 {
            self.next_actor_id = 1; // Skip 0
        }
        id
    }

    /// Add an actor at an explicit position.
    pub fn add_actor(&mut self, position: Vec2, velocity: Vec2) -> u32 {
        let id = self.next_id();
        self.actors.push(Actor::new(id, position, velocity));
        id
    }

    /// Spawn `amount` actors at random positions with random velocities.
    pub fn spawn_actors(&mut self, amount: usize, max_speed: f32) {
        self.actors.reserve(amount);
        for _ in 0..amount {
            let position = self.random_position();
            let velocity = self.random_velocity(max_speed);
            self.add_actor(position, velocity);
        }
    }

    /// Get a random position within the border.
    fn random_position(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random_range(self.border.x..=self.border.right()),
            self.rng.random_range(self.border.y..=self.border.bottom()),
        )
    }

    fn random_velocity(&mut self, max_speed: f32) -> Vec2 {
        if max_speed <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            self.rng.random_range(-max_speed..=max_speed),
            self.rng.random_range(-max_speed..=max_speed),
        )
    }

    /// Advance every actor by one tick.
    pub fn step(&mut self) {
        let border = self.border;
        for actor in &mut self.actors {
            actor.step(&border);
        }
    }

    /// Clear `tree` and insert a handle for every actor.
    pub fn rebuild_index(&self, tree: &mut QuadTree<ActorRef>) -> RebuildCounts {
        tree.clear();
        let mut counts = RebuildCounts::default();
        for actor in &self.actors {
            if tree.insert(actor.handle()) {
                counts.inserted += 1;
            } else {
                counts.rejected += 1;
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::from_config(&WorldConfig {
            width: 200.0,
            height: 100.0,
            actors: 300,
            max_speed: 5.0,
            seed: 7,
        })
    }

    #[test]
    fn test_spawn_inside_border() {
        let world = world();
        assert_eq!(world.actors().len(), 300);
        let border = world.border();
        assert!(world.actors().iter().all(|a| border.contains_point(a.position.x, a.position.y)));
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = world();
        let b = world();
        let pa: Vec<Vec2> = a.actors().iter().map(|a| a.position).collect();
        let pb: Vec<Vec2> = b.actors().iter().map(|a| a.position).collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_step_stays_inside_border() {
        let mut world = world();
        for _ in 0..100 {
            world.step();
        }
        let border = world.border();
        assert!(world.actors().iter().all(|a| border.contains_point(a.position.x, a.position.y)));
    }

    #[test]
    fn test_rebuild_index() {
        let mut world = World::new(Bounds::new(0.0, 0.0, 100.0, 100.0), 1);
        world.add_actor(Vec2::new(10.0, 10.0), Vec2::ZERO);
        world.add_actor(Vec2::new(90.0, 90.0), Vec2::ZERO);

        let mut tree = QuadTree::new(Bounds::new(0.0, 0.0, 50.0, 50.0), 4).unwrap();
        tree.insert(ActorRef { id: 99, position: Vec2::new(1.0, 1.0) });

        let counts = world.rebuild_index(&mut tree);
        assert_eq!(counts, RebuildCounts { inserted: 1, rejected: 1 });
        let ids: Vec<u32> = tree.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
