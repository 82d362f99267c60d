//! Spawn policy and entity creation
//!
//! - `SpawnClock`: decides when the next entity is due
//! - `Spawner`: creates entities (injectable, so tests can be deterministic)
//! - `GlyphRain`: randomized falling-glyph spawner

use rand::seq::SliceRandom;
use rand::Rng;
use std::f32::consts::TAU;

use super::config::RainStyle;
use super::entity::Particle;
use super::geometry::{Point, Viewport};

/// Creates entities for an `AnimationEngine`.
pub trait Spawner<E> {
    /// New entity entering at the spawn edge.
    fn spawn(&mut self, viewport: Viewport) -> E;

    /// Entity placed somewhere inside the viewport when the engine starts.
    fn scatter(&mut self, viewport: Viewport) -> E {
        self.spawn(viewport)
    }
}

/// Closure adapter: every entity, scattered or spawned, comes from `F`.
pub struct SpawnFn<F>(pub F);

impl<E, F> Spawner<E> for SpawnFn<F>
where
    F: FnMut(Viewport) -> E,
{
    fn spawn(&mut self, viewport: Viewport) -> E {
        (self.0)(viewport)
    }
}

/// Wrap a closure as a `Spawner`.
pub fn spawn_fn<E, F: FnMut(Viewport) -> E>(f: F) -> SpawnFn<F> {
    SpawnFn(f)
}

/// Interval-based spawn timing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnClock {
    last_spawn_ms: f64,
    interval_ms: f64,
}

impl SpawnClock {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            last_spawn_ms: 0.0,
            interval_ms,
        }
    }

    /// Fires when at least one interval has passed since the last spawn
    /// and records `now_ms` as the new reference point.
    #[inline]
    pub fn due(&mut self, now_ms: f64) -> bool {
        if now_ms - self.last_spawn_ms >= self.interval_ms {
            self.last_spawn_ms = now_ms;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.last_spawn_ms = 0.0;
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

/// Uniform sample in `[lo, hi)`; tolerates `lo == hi` and reversed bounds.
#[inline]
pub(crate) fn sample<R: Rng>(rng: &mut R, [lo, hi]: [f32; 2]) -> f32 {
    lo + rng.gen::<f32>() * (hi - lo)
}

/// Falling, spinning currency glyphs.
pub struct GlyphRain<R> {
    style: RainStyle,
    rng: R,
}

impl<R: Rng> GlyphRain<R> {
    pub fn new(style: RainStyle, rng: R) -> Self {
        Self { style, rng }
    }

    pub fn style(&self) -> &RainStyle {
        &self.style
    }

    fn make(&mut self, x: f32, y: f32) -> Particle {
        let style = &self.style;
        let rng = &mut self.rng;
        let spin = style.max_spin;
        Particle {
            position: Point::new(x, y),
            velocity: Point::new(sample(rng, style.drift_x), sample(rng, style.fall_speed)),
            rotation: rng.gen::<f32>() * TAU,
            rotation_speed: sample(rng, [-spin, spin]),
            opacity: sample(rng, style.opacity),
            size: sample(rng, style.size),
            color: style.palette.choose(rng).copied().unwrap_or_default(),
            glyph: style.glyphs.choose(rng).copied().unwrap_or('$'),
        }
    }
}

impl<R: Rng> Spawner<Particle> for GlyphRain<R> {
    fn spawn(&mut self, viewport: Viewport) -> Particle {
        let x = self.rng.gen::<f32>() * viewport.width.max(0.0);
        let y = self.style.spawn_y;
        self.make(x, y)
    }

    fn scatter(&mut self, viewport: Viewport) -> Particle {
        let x = self.rng.gen::<f32>() * viewport.width.max(0.0);
        let y = self.rng.gen::<f32>() * viewport.height.max(0.0);
        self.make(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_clock_fires_on_interval() {
        let mut clock = SpawnClock::new(500.0);
        assert_eq!(clock.interval_ms(), 500.0);
        let fired: Vec<bool> = [0.0, 400.0, 600.0, 1100.0, 1200.0]
            .iter()
            .map(|&t| clock.due(t))
            .collect();
        assert_eq!(fired, vec![false, false, true, true, false]);
        assert_eq!(clock.last_spawn_ms(), 1100.0);

        clock.reset();
        assert_eq!(clock.last_spawn_ms(), 0.0);
    }

    #[test]
    fn test_glyph_rain_ranges() {
        let style = RainStyle::default();
        let mut rain = GlyphRain::new(style.clone(), StdRng::seed_from_u64(7));
        let vp = Viewport::new(800.0, 600.0);

        for _ in 0..200 {
            let p = rain.spawn(vp);
            assert_eq!(p.position.y, -50.0);
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((15.0..35.0).contains(&p.size));
            assert!((1.0..3.0).contains(&p.velocity.y));
            assert_eq!(p.velocity.x, 0.0);
            assert!(p.rotation_speed.abs() <= 0.05);
            assert!((0.2..0.5).contains(&p.opacity));
            assert!(style.glyphs.contains(&p.glyph));
            assert!(style.palette.contains(&p.color));
        }
    }

    #[test]
    fn test_scatter_lands_inside_viewport() {
        let mut rain = GlyphRain::new(RainStyle::default(), StdRng::seed_from_u64(1));
        let vp = Viewport::new(320.0, 240.0);
        for _ in 0..100 {
            let p = rain.scatter(vp);
            assert!(!vp.is_outside(p.position, 0.0));
        }
    }

    #[test]
    fn test_zero_viewport_spawns_at_origin_column() {
        let mut rain = GlyphRain::new(RainStyle::default(), StdRng::seed_from_u64(3));
        let p = rain.spawn(Viewport::new(0.0, 0.0));
        assert_eq!(p.position.x, 0.0);
        assert!(p.position.is_finite());
    }

    #[test]
    fn test_spawn_fn_adapter() {
        let mut n = 0.0;
        let mut spawner = spawn_fn(|_vp: Viewport| {
            n += 1.0;
            Particle::falling(n, 0.0, 1.0)
        });
        let vp = Viewport::new(10.0, 10.0);
        assert_eq!(spawner.scatter(vp).position.x, 1.0);
        assert_eq!(spawner.spawn(vp).position.x, 2.0);
    }
}
