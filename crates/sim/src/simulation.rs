//! Tick loop.
//!
//! Every tick the world moves, the index is rebuilt from scratch, and a sample
//! of actors look up their neighbours. With `verify` enabled each lookup is
//! compared against a brute-force scan of all actors.

use crate::config::Config;
use crate::entity::ActorRef;
use crate::scan::brute_force_query;
use crate::world::World;
use crate::SimError;
use quadtree::{Bounds, QuadTree, QuadTreeStats};
use std::time::{Duration, Instant};
use tokio::time::{interval_at, MissedTickBehavior};
use tracing::{debug, info, warn};

/// What happened during one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickReport {
    pub tick: u64,
    pub inserted: usize,
    pub rejected: usize,
    pub queries: usize,
    /// Neighbours found across all queries (each actor counts itself).
    pub neighbours: usize,
    /// Nodes tested across all queries.
    pub nodes_visited: usize,
    pub tree: QuadTreeStats,
    pub query_time: Duration,
    /// Time spent on brute-force scans, zero when verification is off.
    pub scan_time: Duration,
    /// Whether queries were cross-checked against a brute-force scan.
    pub verified: bool,
}

/// World plus the index rebuilt from it every tick.
#[derive(Debug)]
pub struct Simulation {
    config: Config,
    world: World,
    index: QuadTree<ActorRef>,
    tick_count: u64,
}

impl Simulation {
    pub fn new(config: Config) -> Result<Self, SimError> {
        config.validate()?;
        let world = World::from_config(&config.world);
        let index = QuadTree::with_max_depth(
            world.border(),
            config.tree.capacity,
            config.tree.max_depth,
        )?;
        Ok(Self {
            config,
            world,
            index,
            tick_count: 0,
        })
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    pub fn index(&self) -> &QuadTree<ActorRef> {
        &self.index
    }

    #[inline]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Run one tick: move, rebuild the index, probe neighbourhoods.
    pub fn tick(&mut self) -> Result<TickReport, SimError> {
        self.tick_count += 1;
        self.world.step();

        let counts = self.world.rebuild_index(&mut self.index);
        if counts.rejected > 0 {
            warn!(
                "Tick {}: {} actors rejected by the index",
                self.tick_count, counts.rejected
            );
        }

        let mut report = TickReport {
            tick: self.tick_count,
            inserted: counts.inserted,
            rejected: counts.rejected,
            tree: self.index.stats(),
            ..Default::default()
        };

        // A scan would see actors the index rejected at its depth limit.
        report.verified = self.config.sim.verify && counts.rejected == 0;
        if self.config.sim.verify && !report.verified {
            debug!("Tick {}: skipping brute-force check", self.tick_count);
        }

        let actors = self.world.actors();
        let probes = self.config.sim.queries_per_tick.min(actors.len());
        if probes == 0 {
            return Ok(report);
        }
        let stride = actors.len() / probes;
        let radius = self.config.sim.query_radius;

        let mut found = Vec::new();
        for probe in actors.iter().step_by(stride).take(probes) {
            let range = Bounds::from_center(probe.position.x, probe.position.y, radius);

            found.clear();
            let started = Instant::now();
            report.nodes_visited += self.index.query_with(&range, |a| found.push(a.id));
            report.query_time += started.elapsed();
            report.queries += 1;
            report.neighbours += found.len();

            if report.verified {
                let started = Instant::now();
                let scanned = brute_force_query(actors, &range);
                report.scan_time += started.elapsed();

                let mut expected: Vec<u32> = scanned.iter().map(|a| a.id).collect();
                expected.sort_unstable();
                found.sort_unstable();
                if found != expected {
                    return Err(SimError::QueryMismatch {
                        tick: self.tick_count,
                        actor: probe.id,
                        tree: found.len(),
                        scan: expected.len(),
                    });
                }
            }
        }

        debug!(
            "Tick {}: {} queries, {} neighbours, {} nodes visited",
            report.tick, report.queries, report.neighbours, report.nodes_visited
        );
        Ok(report)
    }
}

/// Run the simulation on a fixed interval until the configured tick count is
/// reached or Ctrl-C is pressed.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let tick_interval_ms = config.sim.tick_interval_ms;
    let max_ticks = config.sim.ticks;
    let log_every = config.sim.log_every.max(1);

    let mut sim = Simulation::new(config)?;
    info!(
        "World initialized: {} actors in {:?}",
        sim.world().actors().len(),
        sim.world().border()
    );

    let start = tokio::time::Instant::now() + Duration::from_millis(tick_interval_ms);
    let mut ticker = interval_at(start, Duration::from_millis(tick_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut query_time = Duration::ZERO;
    let mut scan_time = Duration::ZERO;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping after {} ticks", sim.tick_count());
                break;
            }
        }

        let report = sim.tick()?;
        query_time += report.query_time;
        scan_time += report.scan_time;

        if report.tick % log_every == 0 {
            info!(
                "Tick {}: {} nodes ({} leaves, depth {}), {} queries, avg {:.1} neighbours",
                report.tick,
                report.tree.node_count,
                report.tree.leaf_count,
                report.tree.max_depth,
                report.queries,
                report.neighbours as f64 / report.queries.max(1) as f64,
            );
        }

        if max_ticks != 0 && sim.tick_count() >= max_ticks {
            break;
        }
    }

    info!(
        "Finished {} ticks: quadtree queries {:?}, brute-force scans {:?}",
        sim.tick_count(),
        query_time,
        scan_time
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.world.width = 400.0;
        config.world.height = 300.0;
        config.world.actors = 500;
        config.tree.capacity = 4;
        config.sim.queries_per_tick = 50;
        config.sim.query_radius = 30.0;
        config.sim.tick_interval_ms = 1;
        config.sim.ticks = 3;
        config
    }

    #[test]
    fn test_tick_matches_brute_force() {
        let mut sim = Simulation::new(small_config()).unwrap();
        for _ in 0..40 {
            let report = sim.tick().unwrap();
            assert_eq!(report.inserted, 500);
            assert_eq!(report.rejected, 0);
            assert_eq!(report.queries, 50);
            // Every probe finds at least itself.
            assert!(report.neighbours >= 50);
            assert_eq!(report.tree.item_count, 500);
        }
        assert_eq!(sim.tick_count(), 40);
        assert_eq!(sim.index().len(), 500);
    }

    #[test]
    fn test_depth_limit_rejections_skip_verification() {
        let mut config = small_config();
        config.tree.capacity = 1;
        config.tree.max_depth = 0;
        let mut sim = Simulation::new(config).unwrap();

        let report = sim.tick().unwrap();
        assert_eq!(report.inserted, 1);
        assert_eq!(report.rejected, 499);
        assert!(!report.verified);
        assert_eq!(report.queries, 50);
    }

    #[test]
    fn test_verified_when_all_inserted() {
        let mut sim = Simulation::new(small_config()).unwrap();
        assert!(sim.tick().unwrap().verified);
    }

    #[test]
    fn test_empty_world() {
        let mut config = small_config();
        config.world.actors = 0;
        let mut sim = Simulation::new(config).unwrap();
        let report = sim.tick().unwrap();
        assert_eq!(report.queries, 0);
        assert!(sim.index().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = small_config();
        config.tree.capacity = 0;
        assert!(matches!(Simulation::new(config), Err(SimError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_run_stops_after_ticks() {
        run(small_config()).await.unwrap();
    }
}
