//! Rotating backdrop scenes
//!
//! Cycles through the configured scenes, each shown for its own duration,
//! with a fade-in after every switch.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::{CycleConfig, SceneSpec};
use super::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    /// Falling currency glyphs
    GlyphRain,
    /// Scrolling chart lines with price tags
    SalesChart,
    /// Terminal glyph columns
    Matrix,
}

impl SceneKind {
    pub const ALL: &'static [SceneKind] = &[SceneKind::GlyphRain, SceneKind::SalesChart, SceneKind::Matrix];

    pub fn label(self) -> &'static str {
        match self {
            SceneKind::GlyphRain => "Money rain",
            SceneKind::SalesChart => "Sales chart",
            SceneKind::Matrix => "Terminal",
        }
    }
}

#[derive(Clone, Debug)]
pub struct BackdropCycle {
    scenes: Vec<SceneSpec>,
    crossfade_ms: f64,
    current: usize,
    /// When the current scene became active; None until the first tick
    entered_at_ms: Option<f64>,
}

impl BackdropCycle {
    pub fn new(config: &CycleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scenes: config.scenes.clone(),
            crossfade_ms: config.crossfade_ms,
            current: 0,
            entered_at_ms: None,
        })
    }

    /// Advance the clock. Returns true when the scene switched.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let Some(entered) = self.entered_at_ms else {
            self.entered_at_ms = Some(now_ms);
            return false;
        };

        if now_ms - entered < self.scenes[self.current].duration_ms {
            return false;
        }

        let from = self.scenes[self.current].kind;
        self.current = (self.current + 1) % self.scenes.len();
        self.entered_at_ms = Some(now_ms);
        debug!(from = ?from, to = ?self.current(), now_ms, "Backdrop scene switched");
        true
    }

    pub fn current(&self) -> SceneKind {
        self.scenes[self.current].kind
    }

    pub fn index(&self) -> usize {
        self.current
    }

    /// Fade-in factor for the current scene in `[0, 1]`.
    pub fn opacity(&self, now_ms: f64) -> f32 {
        let Some(entered) = self.entered_at_ms else {
            return 0.0;
        };
        if self.crossfade_ms <= 0.0 {
            return 1.0;
        }
        let t = (now_ms - entered) / self.crossfade_ms;
        t.max(0.0).min(1.0) as f32
    }

    /// Back to the first scene, clock not yet started.
    pub fn reset(&mut self) {
        self.current = 0;
        self.entered_at_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(durations: &[f64]) -> BackdropCycle {
        let scenes = durations
            .iter()
            .zip(SceneKind::ALL.iter().cycle())
            .map(|(&duration_ms, &kind)| SceneSpec { kind, duration_ms })
            .collect();
        BackdropCycle::new(&CycleConfig { scenes, crossfade_ms: 100.0 }).unwrap()
    }

    #[test]
    fn test_switches_after_each_duration() {
        let mut c = cycle(&[1000.0, 500.0, 500.0]);
        assert!(!c.tick(0.0));
        assert!(!c.tick(999.0));
        assert_eq!(c.current(), SceneKind::GlyphRain);

        assert!(c.tick(1000.0));
        assert_eq!(c.current(), SceneKind::SalesChart);
        assert!(!c.tick(1400.0));
        assert!(c.tick(1500.0));
        assert_eq!(c.current(), SceneKind::Matrix);

        // Wraps around
        assert!(c.tick(2000.0));
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_opacity_ramps_after_switch() {
        let mut c = cycle(&[1000.0, 1000.0]);
        assert_eq!(c.opacity(0.0), 0.0);
        c.tick(0.0);
        assert_eq!(c.opacity(50.0), 0.5);
        assert_eq!(c.opacity(5000.0), 1.0);

        c.tick(1000.0);
        assert_eq!(c.opacity(1000.0), 0.0);
        assert_eq!(c.opacity(1025.0), 0.25);
    }

    #[test]
    fn test_reset() {
        let mut c = cycle(&[10.0, 10.0]);
        c.tick(0.0);
        c.tick(10.0);
        c.reset();
        assert_eq!(c.index(), 0);
        assert_eq!(c.opacity(100.0), 0.0);
    }

    #[test]
    fn test_scene_kind_serde() {
        let json = serde_json::to_string(&SceneKind::SalesChart).unwrap();
        assert_eq!(json, "\"sales_chart\"");
        assert_eq!(SceneKind::ALL.len(), 3);
        assert_eq!(SceneKind::Matrix.label(), "Terminal");
    }
}
