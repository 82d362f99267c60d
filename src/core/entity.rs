//! Animated entities
//!
//! - `Entity`: anything the engine can move one frame and bound-check
//! - `Particle`: a spinning glyph (currency symbols in the rain backdrop)

use serde::{Deserialize, Serialize};

use super::geometry::Point;
use super::palette::Rgb;

/// One animated element owned by an `AnimationEngine`.
pub trait Entity {
    /// Apply one frame of motion.
    fn advance(&mut self);

    /// Current position, used for the off-screen test.
    fn position(&self) -> Point;
}

/// Glyph particle. Rendering attributes are fixed at creation; only
/// `position` and `rotation` change per frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub position: Point,
    /// Per-frame delta applied to `position`
    pub velocity: Point,
    /// Radians
    pub rotation: f32,
    /// Radians per frame
    pub rotation_speed: f32,
    pub opacity: f32,
    /// Glyph size in surface units
    pub size: f32,
    pub color: Rgb,
    pub glyph: char,
}

impl Particle {
    /// Plain particle falling straight down, no spin.
    pub fn falling(x: f32, y: f32, speed: f32) -> Self {
        Self {
            position: Point::new(x, y),
            velocity: Point::new(0.0, speed),
            rotation: 0.0,
            rotation_speed: 0.0,
            opacity: 1.0,
            size: 16.0,
            color: Rgb::default(),
            glyph: '$',
        }
    }
}

impl Entity for Particle {
    #[inline]
    fn advance(&mut self) {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        self.rotation += self.rotation_speed;
    }

    #[inline]
    fn position(&self) -> Point {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_applies_velocity_and_spin() {
        let mut p = Particle::falling(10.0, 0.0, 2.0);
        p.velocity.x = -1.0;
        p.rotation_speed = 0.5;

        p.advance();
        p.advance();

        assert_eq!(p.position, Point::new(8.0, 4.0));
        assert!((p.rotation - 1.0).abs() < f32::EPSILON);
    }
}
