//! Backdrop configuration
//!
//! Every section deserializes with defaults, so a config file only needs
//! the fields it changes:
//!
//! ```json
//! { "rain": { "max_entities": 60 }, "cycle": { "crossfade_ms": 500 } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::cycle::SceneKind;
use super::error::ConfigError;
use super::palette::{self, Rgb};

/// Pool and spawn policy for an `AnimationEngine`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on live entities; oldest are evicted first
    pub max_entities: usize,
    /// Minimum time between spawns
    pub spawn_interval_ms: f64,
    /// Entities scattered across the viewport on start
    pub initial_count: usize,
    /// How far past an edge an entity may travel before it is culled
    pub cull_margin: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_entities: 100,
            spawn_interval_ms: 500.0,
            initial_count: 50,
            cull_margin: 50.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.spawn_interval_ms.is_finite() && self.spawn_interval_ms > 0.0) {
            return Err(ConfigError::InvalidSpawnInterval(self.spawn_interval_ms));
        }
        check_margin(self.cull_margin)
    }
}

/// Random ranges for glyph rain particles. `[lo, hi]` pairs are sampled
/// uniformly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainStyle {
    /// Spawn height; negative starts above the top edge
    pub spawn_y: f32,
    pub size: [f32; 2],
    /// Vertical speed per frame
    pub fall_speed: [f32; 2],
    /// Horizontal speed per frame
    pub drift_x: [f32; 2],
    /// Maximum absolute spin per frame (radians)
    pub max_spin: f32,
    pub opacity: [f32; 2],
    pub glyphs: Vec<char>,
    pub palette: Vec<Rgb>,
}

impl Default for RainStyle {
    fn default() -> Self {
        Self {
            spawn_y: -50.0,
            size: [15.0, 35.0],
            fall_speed: [1.0, 3.0],
            drift_x: [0.0, 0.0],
            max_spin: 0.05,
            opacity: [0.2, 0.5],
            glyphs: palette::MONEY_GLYPHS.to_vec(),
            palette: palette::MONEY_GREENS.to_vec(),
        }
    }
}

impl RainStyle {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Strictly positive so every particle eventually leaves the bottom edge
        check_range("fall_speed", self.fall_speed, f32::MIN_POSITIVE, f32::MAX)?;
        check_range("size", self.size, 0.0, f32::MAX)?;
        check_range("opacity", self.opacity, 0.0, 1.0)?;
        if self.glyphs.is_empty() {
            return Err(ConfigError::EmptyGlyphs("rain"));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette("rain"));
        }
        Ok(())
    }
}

/// Scrolling sales-chart lines
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub line_count: usize,
    /// Segments across one viewport width
    pub segments: usize,
    /// Leftward shift per frame
    pub scroll_speed: f32,
    /// Vertices further than this left of the edge are dropped
    pub drop_margin: f32,
    /// Per-line vertex bound
    pub max_vertices: usize,
    /// Vertical band as fractions of the height
    pub band_center: f32,
    pub band_spread: f32,
    /// Largest random-walk step as a fraction of the height
    pub walk_step: f32,
    /// Display-only vertical sway
    pub wobble_amplitude: f32,
    pub stroke_width: [f32; 2],
    pub palette: Vec<Rgb>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            line_count: 5,
            segments: 10,
            scroll_speed: 0.5,
            drop_margin: 100.0,
            max_vertices: 48,
            band_center: 0.5,
            band_spread: 0.3,
            walk_step: 0.08,
            wobble_amplitude: 20.0,
            stroke_width: [1.0, 3.0],
            palette: palette::CHART_COLORS.to_vec(),
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scroll_speed.is_finite() && self.scroll_speed > 0.0) {
            return Err(ConfigError::InvalidScrollSpeed(self.scroll_speed));
        }
        if self.segments == 0 {
            return Err(ConfigError::ZeroSegments);
        }
        // One full width plus the vertex about to scroll in
        let required = self.segments + 2;
        if self.max_vertices < required {
            return Err(ConfigError::VertexBudget {
                max: self.max_vertices,
                required,
            });
        }
        check_margin(self.drop_margin)?;
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette("chart"));
        }
        Ok(())
    }
}

/// Falling terminal-glyph columns
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatrixConfig {
    /// Column width and row height (the font size)
    pub column_width: f32,
    /// Chance per frame that a column past the bottom restarts at the top
    pub reset_chance: f32,
    /// Chance a column shows a whole (truncated) term instead of one char
    pub phrase_chance: f32,
    pub glow_chance: f32,
    pub phrase_len: usize,
    /// Glyphs kept per column, fading from oldest to newest
    pub trail_len: usize,
    pub terms: Vec<String>,
    pub palette: Vec<Rgb>,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            column_width: 12.0,
            reset_chance: 0.025,
            phrase_chance: 0.05,
            glow_chance: 0.2,
            phrase_len: 10,
            trail_len: 24,
            terms: palette::MATRIX_TERMS.iter().map(|s| s.to_string()).collect(),
            palette: palette::MATRIX_GREENS.to_vec(),
        }
    }
}

impl MatrixConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.column_width.is_finite() && self.column_width > 0.0) {
            return Err(ConfigError::InvalidColumnWidth(self.column_width));
        }
        check_chance("reset_chance", self.reset_chance)?;
        check_chance("phrase_chance", self.phrase_chance)?;
        check_chance("glow_chance", self.glow_chance)?;
        if self.terms.iter().all(|t| t.is_empty()) {
            return Err(ConfigError::EmptyGlyphs("matrix"));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette("matrix"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    pub kind: SceneKind,
    pub duration_ms: f64,
}

/// Order and timing of the rotating backdrops
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleConfig {
    pub scenes: Vec<SceneSpec>,
    /// Fade-in after each switch
    pub crossfade_ms: f64,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            scenes: vec![
                SceneSpec { kind: SceneKind::GlyphRain, duration_ms: 20_000.0 },
                SceneSpec { kind: SceneKind::SalesChart, duration_ms: 15_000.0 },
                SceneSpec { kind: SceneKind::Matrix, duration_ms: 15_000.0 },
            ],
            crossfade_ms: 2_000.0,
        }
    }
}

impl CycleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scenes.is_empty() {
            return Err(ConfigError::EmptyCycle);
        }
        for (index, scene) in self.scenes.iter().enumerate() {
            if !(scene.duration_ms.is_finite() && scene.duration_ms > 0.0) {
                return Err(ConfigError::InvalidSceneDuration {
                    index,
                    duration_ms: scene.duration_ms,
                });
            }
        }
        Ok(())
    }
}

/// Full backdrop configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    pub rain: EngineConfig,
    pub rain_style: RainStyle,
    pub chart: ChartConfig,
    pub matrix: MatrixConfig,
    pub cycle: CycleConfig,
}

impl BackdropConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = text.len(), "Loading backdrop config");
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rain.validate()?;
        self.rain_style.validate()?;
        self.chart.validate()?;
        self.matrix.validate()?;
        self.cycle.validate()
    }
}

fn check_margin(margin: f32) -> Result<(), ConfigError> {
    if margin.is_finite() && margin >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidMargin(margin))
    }
}

/// `[lo, hi]` must be ordered and lie within `[min, max]`.
fn check_range(name: &'static str, [lo, hi]: [f32; 2], min: f32, max: f32) -> Result<(), ConfigError> {
    if lo >= min && hi <= max && lo <= hi {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, lo, hi })
    }
}

fn check_chance(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidChance { name, value })
    }
}
