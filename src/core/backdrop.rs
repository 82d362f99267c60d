//! Scene-cycling backdrop
//!
//! Owns one engine per scene. Only the active scene's engine runs; on a
//! switch the outgoing engine is stopped (its state discarded) and the
//! incoming one started fresh against the current viewport.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use super::chart::{ChartEngine, ChartStats};
use super::config::BackdropConfig;
use super::cycle::{BackdropCycle, SceneKind};
use super::engine::{AnimationEngine, EngineStats};
use super::entity::Particle;
use super::error::ConfigError;
use super::geometry::Viewport;
use super::matrix::MatrixRain;
use super::spawn::GlyphRain;

pub type RainEngine = AnimationEngine<Particle, GlyphRain<StdRng>>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BackdropStats {
    pub scene: SceneKind,
    /// Particles, chart vertices or matrix cells, depending on the scene
    pub entities: usize,
    pub rain: EngineStats,
    pub chart: ChartStats,
}

pub struct Backdrop {
    config: BackdropConfig,
    cycle: BackdropCycle,
    rain: RainEngine,
    chart: ChartEngine<StdRng>,
    matrix: MatrixRain<StdRng>,
    viewport: Viewport,
    /// A scene has been started since construction or the last `start`
    running: bool,
    /// Set by `stop`; ticks are ignored until `start`
    stopped: bool,
}

impl Backdrop {
    /// Build all engines. `seed` makes every random choice reproducible;
    /// `None` seeds from the OS.
    pub fn new(config: BackdropConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut master = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut child = || StdRng::seed_from_u64(master.gen());

        let rain = AnimationEngine::new(GlyphRain::new(config.rain_style.clone(), child()));
        let chart = ChartEngine::new(child());
        let matrix = MatrixRain::new(child());

        Ok(Self {
            cycle: BackdropCycle::new(&config.cycle)?,
            config,
            rain,
            chart,
            matrix,
            viewport: Viewport::default(),
            running: false,
            stopped: false,
        })
    }

    /// Advance the scene clock and the active engine by one frame.
    /// No-op after `stop`.
    pub fn tick(&mut self, timestamp_ms: f64, width: f32, height: f32) {
        if self.stopped {
            return;
        }

        let viewport = Viewport::new(width, height);
        self.viewport = viewport;

        if !self.running {
            self.cycle.tick(timestamp_ms);
            let scene = self.cycle.current();
            self.start_scene(scene, viewport);
            self.running = true;
        } else {
            let outgoing = self.cycle.current();
            if self.cycle.tick(timestamp_ms) {
                let incoming = self.cycle.current();
                self.stop_scene(outgoing);
                self.start_scene(incoming, viewport);
            }
        }

        match self.cycle.current() {
            SceneKind::GlyphRain => self.rain.tick(timestamp_ms, width, height),
            SceneKind::SalesChart => self.chart.tick(timestamp_ms, width, height),
            SceneKind::Matrix => self.matrix.tick(timestamp_ms, width, height),
        }
    }

    fn start_scene(&mut self, scene: SceneKind, viewport: Viewport) {
        let result = match scene {
            SceneKind::GlyphRain => self.rain.start(&self.config.rain, viewport),
            SceneKind::SalesChart => self.chart.start(&self.config.chart, viewport),
            SceneKind::Matrix => self.matrix.start(&self.config.matrix, viewport),
        };
        match result {
            Ok(()) => info!(scene = scene.label(), "Backdrop scene started"),
            // Config was validated in `new`
            Err(e) => warn!(scene = scene.label(), error = %e, "Failed to start backdrop scene"),
        }
    }

    fn stop_scene(&mut self, scene: SceneKind) {
        match scene {
            SceneKind::GlyphRain => self.rain.stop(),
            SceneKind::SalesChart => self.chart.stop(),
            SceneKind::Matrix => self.matrix.stop(),
        }
    }

    /// Forward a surface resize to the running engines.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.rain.resize(viewport);
        self.chart.resize(viewport);
        self.matrix.resize(viewport);
    }

    /// Stop every engine and rewind the cycle. Idempotent. Later ticks
    /// are ignored until `start`.
    pub fn stop(&mut self) {
        if !self.stopped {
            info!(scene = self.scene().label(), "Backdrop stopped");
        }
        self.rain.stop();
        self.chart.stop();
        self.matrix.stop();
        self.cycle.reset();
        self.running = false;
        self.stopped = true;
    }

    /// Re-arm a stopped backdrop. The next `tick` starts the first scene.
    pub fn start(&mut self) {
        self.stopped = false;
    }

    pub fn scene(&self) -> SceneKind {
        self.cycle.current()
    }

    /// Fade-in factor of the active scene
    pub fn opacity(&self, now_ms: f64) -> f32 {
        self.cycle.opacity(now_ms)
    }

    pub fn entity_count(&self) -> usize {
        match self.scene() {
            SceneKind::GlyphRain => self.rain.len(),
            SceneKind::SalesChart => self.chart.vertex_count(),
            SceneKind::Matrix => self.matrix.cell_count(),
        }
    }

    pub fn stats(&self) -> BackdropStats {
        BackdropStats {
            scene: self.scene(),
            entities: self.entity_count(),
            rain: self.rain.stats(),
            chart: self.chart.stats(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn rain(&self) -> &RainEngine {
        &self.rain
    }

    pub fn chart(&self) -> &ChartEngine<StdRng> {
        &self.chart
    }

    pub fn matrix(&self) -> &MatrixRain<StdRng> {
        &self.matrix
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{CycleConfig, SceneSpec};

    fn short_cycle() -> BackdropConfig {
        BackdropConfig {
            cycle: CycleConfig {
                scenes: SceneKind::ALL
                    .iter()
                    .map(|&kind| SceneSpec { kind, duration_ms: 1000.0 })
                    .collect(),
                crossfade_ms: 200.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_first_tick_starts_first_scene() {
        let mut backdrop = Backdrop::new(short_cycle(), Some(1)).unwrap();
        assert!(!backdrop.is_running());

        backdrop.tick(0.0, 800.0, 600.0);
        assert!(backdrop.is_running());
        assert_eq!(backdrop.scene(), SceneKind::GlyphRain);
        assert!(backdrop.rain().is_active());
        assert_eq!(backdrop.rain().len(), 50);
        assert!(!backdrop.chart().is_active());
        assert!(!backdrop.matrix().is_active());
    }

    #[test]
    fn test_switch_stops_outgoing_engine() {
        let mut backdrop = Backdrop::new(short_cycle(), Some(2)).unwrap();
        for frame in 0..=60 {
            backdrop.tick(frame as f64 * 16.0, 800.0, 600.0);
        }
        assert_eq!(backdrop.scene(), SceneKind::GlyphRain);

        backdrop.tick(1000.0, 800.0, 600.0);
        assert_eq!(backdrop.scene(), SceneKind::SalesChart);
        assert!(!backdrop.rain().is_active());
        assert!(backdrop.rain().is_empty());
        assert!(backdrop.chart().is_active());
        assert_eq!(backdrop.entity_count(), backdrop.chart().vertex_count());

        backdrop.tick(2000.0, 800.0, 600.0);
        assert_eq!(backdrop.scene(), SceneKind::Matrix);
        assert!(!backdrop.chart().is_active());
        assert_eq!(backdrop.matrix().column_count(), 66);
        assert!(backdrop.entity_count() > 0);

        backdrop.tick(3000.0, 800.0, 600.0);
        assert_eq!(backdrop.scene(), SceneKind::GlyphRain);
        assert!(backdrop.rain().is_active());
    }

    #[test]
    fn test_same_seed_same_frames() {
        let mut a = Backdrop::new(BackdropConfig::default(), Some(77)).unwrap();
        let mut b = Backdrop::new(BackdropConfig::default(), Some(77)).unwrap();
        for frame in 0..120 {
            a.tick(frame as f64 * 16.0, 640.0, 480.0);
            b.tick(frame as f64 * 16.0, 640.0, 480.0);
        }
        let pa: Vec<Particle> = a.rain().iter().cloned().collect();
        let pb: Vec<Particle> = b.rain().iter().cloned().collect();
        assert_eq!(pa, pb);
    }

    #[test]
    fn test_stop_rewinds() {
        let mut backdrop = Backdrop::new(short_cycle(), Some(3)).unwrap();
        backdrop.tick(0.0, 400.0, 300.0);
        backdrop.tick(1500.0, 400.0, 300.0);
        assert_eq!(backdrop.scene(), SceneKind::SalesChart);

        backdrop.stop();
        backdrop.stop();
        assert!(!backdrop.is_running());
        assert_eq!(backdrop.scene(), SceneKind::GlyphRain);
        assert_eq!(backdrop.entity_count(), 0);
        assert_eq!(backdrop.opacity(2000.0), 0.0);
    }

    #[test]
    fn test_tick_after_stop_is_noop() {
        let mut backdrop = Backdrop::new(short_cycle(), Some(5)).unwrap();
        backdrop.tick(0.0, 800.0, 600.0);
        backdrop.stop();

        for frame in 1..=120 {
            backdrop.tick(frame as f64 * 16.0, 800.0, 600.0);
        }
        assert!(!backdrop.is_running());
        assert!(!backdrop.rain().is_active());
        assert!(backdrop.rain().is_empty());
        assert!(!backdrop.chart().is_active());
        assert!(!backdrop.matrix().is_active());
        assert_eq!(backdrop.entity_count(), 0);

        backdrop.start();
        backdrop.tick(5000.0, 800.0, 600.0);
        assert!(backdrop.is_running());
        assert_eq!(backdrop.scene(), SceneKind::GlyphRain);
        assert!(backdrop.rain().is_active());
        // 50 scattered plus one spawn, since the clock restarted at 0
        assert_eq!(backdrop.rain().stats().spawned, 51);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = BackdropConfig::default();
        config.rain.spawn_interval_ms = -1.0;
        assert!(Backdrop::new(config, None).is_err());
    }

    #[test]
    fn test_stats_serialize() {
        let mut backdrop = Backdrop::new(BackdropConfig::default(), Some(4)).unwrap();
        backdrop.tick(0.0, 320.0, 240.0);
        backdrop.tick(600.0, 320.0, 240.0);

        let json = serde_json::to_value(backdrop.stats()).unwrap();
        assert_eq!(json["scene"], "glyph_rain");
        assert_eq!(json["rain"]["spawned"], 51);
        assert_eq!(json["entities"], backdrop.rain().len());
    }
}
