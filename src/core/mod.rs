//! Platform-agnostic core module - shared between the WASM host and the CLI

pub mod backdrop;
pub mod chart;
pub mod config;
pub mod cycle;
pub mod engine;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod matrix;
pub mod palette;
pub mod pool;
pub mod spawn;

pub use backdrop::{Backdrop, BackdropStats, RainEngine};
pub use chart::{ChartEngine, ChartLine, ChartStats, PriceTag, GRID_SPACING};
pub use config::{BackdropConfig, ChartConfig, CycleConfig, EngineConfig, MatrixConfig, RainStyle, SceneSpec};
pub use cycle::{BackdropCycle, SceneKind};
pub use engine::{AnimationEngine, EngineStats, Tracked};
pub use entity::{Entity, Particle};
pub use error::ConfigError;
pub use geometry::{Point, Viewport};
pub use matrix::{MatrixCell, MatrixRain};
pub use palette::Rgb;
pub use pool::BoundedPool;
pub use spawn::{spawn_fn, GlyphRain, SpawnClock, SpawnFn, Spawner};
