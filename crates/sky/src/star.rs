use foundation::math::Vec2;
use foundation::random::RandomSource;

use crate::color::Color;
use crate::config::{Span, StarConfig};
use crate::render::{DrawCommand, Paint};

/// A fixed background star whose opacity random-walks every frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f64,
    pub alpha: f64,
    /// Scale of the per-frame opacity perturbation.
    pub twinkle: f64,
}

impl Star {
    /// Places a star uniformly over a `width` x `height` area.
    pub fn random<R: RandomSource + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &StarConfig,
    ) -> Self {
        let x = rng.next_f64() * width;
        let y = rng.next_f64() * height;
        Self {
            pos: Vec2::new(x, y),
            radius: config.radius.sample(rng),
            alpha: config.opacity.sample(rng),
            twinkle: config.twinkle.sample(rng),
        }
    }

    pub fn twinkle<R: RandomSource + ?Sized>(&mut self, rng: &mut R, clamp: Span) {
        self.alpha += (rng.next_f64() - 0.5) * self.twinkle;
        self.alpha = clamp.clamp(self.alpha);
    }

    pub fn draw_command(&self) -> DrawCommand {
        DrawCommand::FillCircle {
            center: self.pos,
            radius: self.radius,
            paint: Paint::Solid(Color::rgba(255, 255, 255, self.alpha)),
        }
    }
}
