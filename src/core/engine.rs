//! Frame-driven animation engine
//!
//! Owns a bounded pool of entities and a spawn clock. The host drives it:
//! call `tick` once per frame with a timestamp and the current surface size,
//! then paint whatever `for_each_entity` yields.
//!
//! Tick order: advance every entity, cull the ones that left the viewport
//! (or hold non-finite positions), spawn one entity if the interval elapsed,
//! evict oldest entities beyond `max_entities`.

use serde::Serialize;
use tracing::{debug, trace, warn};

use super::config::EngineConfig;
use super::entity::Entity;
use super::error::ConfigError;
use super::geometry::Viewport;
use super::pool::BoundedPool;
use super::spawn::{SpawnClock, Spawner};

/// Pool slot: entity plus the id it was assigned on insertion.
/// Ids increase monotonically and are never reused.
#[derive(Clone, Debug)]
pub struct Tracked<E> {
    pub id: u64,
    pub entity: E,
}

/// Lifetime counters since the last `start`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    pub spawned: u64,
    /// Removed for leaving the viewport or going non-finite
    pub culled: u64,
    /// Removed by the `max_entities` bound
    pub evicted: u64,
    /// Part of `culled`: removed for a NaN or infinite position
    pub non_finite: u64,
}

pub struct AnimationEngine<E, S> {
    spawner: S,
    pool: BoundedPool<Tracked<E>>,
    clock: SpawnClock,
    cull_margin: f32,
    viewport: Viewport,
    /// Ticks are ignored unless set; cleared by `stop`
    active: bool,
    degenerate: bool,
    saw_non_finite: bool,
    next_id: u64,
    stats: EngineStats,
}

impl<E: Entity, S: Spawner<E>> AnimationEngine<E, S> {
    /// Create an idle engine. Nothing happens until `start`.
    pub fn new(spawner: S) -> Self {
        let defaults = EngineConfig::default();
        Self {
            spawner,
            pool: BoundedPool::new(0),
            clock: SpawnClock::new(defaults.spawn_interval_ms),
            cull_margin: defaults.cull_margin,
            viewport: Viewport::default(),
            active: false,
            degenerate: false,
            saw_non_finite: false,
            next_id: 0,
            stats: EngineStats::default(),
        }
    }

    /// Validate `config`, discard any previous run and scatter
    /// `initial_count` entities over `viewport`.
    pub fn start(&mut self, config: &EngineConfig, viewport: Viewport) -> Result<(), ConfigError> {
        config.validate()?;

        self.pool.clear();
        self.pool.set_capacity(config.max_entities);
        self.clock = SpawnClock::new(config.spawn_interval_ms);
        self.cull_margin = config.cull_margin;
        self.viewport = viewport;
        self.degenerate = viewport.is_degenerate();
        self.saw_non_finite = false;
        self.stats = EngineStats::default();
        self.active = true;

        for _ in 0..config.initial_count {
            let entity = self.spawner.scatter(viewport);
            self.insert(entity);
        }

        debug!(
            max_entities = config.max_entities,
            spawn_interval_ms = config.spawn_interval_ms,
            initial = self.pool.len(),
            width = viewport.width,
            height = viewport.height,
            "Animation engine started"
        );
        Ok(())
    }

    /// Advance one frame. No-op while stopped.
    pub fn tick(&mut self, timestamp_ms: f64, width: f32, height: f32) {
        if !self.active {
            return;
        }

        let viewport = Viewport::new(width, height);
        self.viewport = viewport;
        let degenerate = viewport.is_degenerate();
        if degenerate && !self.degenerate {
            warn!(width, height, "Degenerate viewport, skipping bound checks");
        }
        self.degenerate = degenerate;

        for slot in self.pool.iter_mut() {
            slot.entity.advance();
        }

        let non_finite = self.pool.retain(|s| s.entity.position().is_finite());
        if non_finite > 0 && !self.saw_non_finite {
            warn!(count = non_finite, "Culled entities with non-finite positions");
        }
        self.saw_non_finite = non_finite > 0;

        let margin = self.cull_margin;
        let out_of_bounds = if degenerate {
            0
        } else {
            self.pool.retain(|s| !viewport.is_outside(s.entity.position(), margin))
        };
        let culled = non_finite + out_of_bounds;
        self.stats.culled += culled as u64;
        self.stats.non_finite += non_finite as u64;

        let mut evicted = 0;
        let spawned = self.clock.due(timestamp_ms);
        if spawned {
            let entity = self.spawner.spawn(viewport);
            evicted = self.insert(entity);
        }

        trace!(timestamp_ms, culled, spawned, evicted, live = self.pool.len(), "tick");
    }

    /// Record a new surface size. Entities are only bound-checked against it
    /// on the next `tick`.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Drop every entity and reset the spawn clock. Safe to call at any
    /// time, any number of times.
    pub fn stop(&mut self) {
        if self.active {
            debug!(live = self.pool.len(), spawned = self.stats.spawned, "Animation engine stopped");
        }
        self.active = false;
        self.pool.clear();
        self.clock.reset();
        self.stats = EngineStats::default();
    }

    fn insert(&mut self, entity: E) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.stats.spawned += 1;
        let evicted = self.pool.push(Tracked { id, entity });
        self.stats.evicted += evicted as u64;
        evicted
    }

    /// Live entities, oldest first. Each call starts a fresh traversal.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.pool.iter().map(|s| &s.entity)
    }

    /// Live entities with their ids, oldest first.
    pub fn iter_tracked(&self) -> impl Iterator<Item = (u64, &E)> + '_ {
        self.pool.iter().map(|s| (s.id, &s.entity))
    }

    /// Invoke `draw` once per live entity in insertion order.
    pub fn for_each_entity<F>(&self, mut draw: F)
    where
        F: FnMut(&E),
    {
        for slot in &self.pool {
            draw(&slot.entity);
        }
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.clock.last_spawn_ms()
    }
}
