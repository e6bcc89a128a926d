use foundation::bounds::Rect;
use foundation::math::Vec2;
use foundation::random::RandomSource;

use crate::color::Color;
use crate::config::MeteorConfig;
use crate::render::{DrawCommand, GradientStop, Paint};

/// A shooting star: a moving head with a fading gradient trail.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Meteor {
    pub pos: Vec2,
    /// Pixels per second.
    pub vel: Vec2,
    /// Trail length in pixels.
    pub len: f64,
    /// Seconds lived so far.
    pub life: f64,
    pub ttl: f64,
    pub hue: f64,
}

impl Meteor {
    /// Draws position, angle, speed, length, ttl and hue, in that order.
    pub fn spawn<R: RandomSource + ?Sized>(
        rng: &mut R,
        viewport_width: f64,
        config: &MeteorConfig,
    ) -> Self {
        let x = rng.next_f64() * (viewport_width * config.x_fraction);
        let y = config.y.sample(rng);
        let angle = config.angle_base_rad + rng.next_f64() * config.angle_spread_rad;
        let speed = config.speed.sample(rng);
        let len = config.length.sample(rng);
        let ttl = config.ttl.sample(rng);
        let hue = config.hue.sample(rng);

        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::from_angle(angle) * speed,
            len,
            life: 0.0,
            ttl,
            hue,
        }
    }

    pub fn advance(&mut self, dt: f64) {
        self.pos += self.vel * dt;
        self.life += dt;
    }

    /// Remaining brightness in `[0, 1]`; reaches 0 once `life >= ttl`.
    pub fn fade(&self) -> f64 {
        if self.ttl <= 0.0 {
            return 0.0;
        }
        let f = 1.0 - self.life / self.ttl;
        if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) }
    }

    /// End of the trail, `len` pixels behind the head.
    pub fn tail(&self) -> Vec2 {
        self.pos - self.vel.normalize_or_self() * self.len
    }

    pub fn is_expired(&self) -> bool {
        self.life >= self.ttl
    }

    pub fn should_remove(&self, bounds: Rect, cull_margin: f64) -> bool {
        self.is_expired() || bounds.exceeds_trailing_edges(self.pos, cull_margin)
    }

    /// Trail stroke followed by the head glow.
    pub fn draw_commands(&self, config: &MeteorConfig) -> [DrawCommand; 2] {
        let fade = self.fade();
        let hue = self.hue;
        let tail = self.tail();

        let trail = DrawCommand::StrokeLine {
            from: self.pos,
            to: tail,
            width: config.line_width,
            paint: Paint::Linear {
                from: self.pos,
                to: tail,
                stops: vec![
                    GradientStop::new(0.0, Color::hsla(hue, 92.0, 70.0, 0.95 * fade)),
                    GradientStop::new(0.35, Color::hsla(hue, 95.0, 65.0, 0.35 * fade)),
                    GradientStop::new(1.0, Color::hsla(hue, 95.0, 60.0, 0.0)),
                ],
            },
        };
        let head = DrawCommand::FillCircle {
            center: self.pos,
            radius: config.head_radius,
            paint: Paint::Solid(Color::hsla(hue, 95.0, 78.0, 0.9 * fade)),
        };
        [trail, head]
    }
}

#[cfg(test)]
mod tests {
    use super::Meteor;
    use crate::config::MeteorConfig;
    use crate::render::{DrawCommand, Paint};
    use foundation::bounds::Rect;
    use foundation::math::Vec2;
    use foundation::random::{ScriptedRandom, SeededRandom};

    fn meteor(pos: Vec2, vel: Vec2, ttl: f64) -> Meteor {
        Meteor {
            pos,
            vel,
            len: 200.0,
            life: 0.0,
            ttl,
            hue: 240.0,
        }
    }

    #[test]
    fn spawn_uses_draws_in_order() {
        let cfg = MeteorConfig::default();
        let mut rng = ScriptedRandom::new(vec![0.5, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0]);
        let m = Meteor::spawn(&mut rng, 1000.0, &cfg);
        assert_eq!(m.pos, Vec2::new(400.0, -240.0));
        assert!((m.vel.length() - 1300.0).abs() < 1e-9);
        let angle = m.vel.y.atan2(m.vel.x).rem_euclid(std::f64::consts::TAU);
        assert!((angle - std::f64::consts::PI * 1.15).abs() < 1e-9);
        assert_eq!(m.len, 320.0);
        assert_eq!(m.ttl, 0.9);
        assert_eq!(m.hue, 220.0);
        assert_eq!(m.life, 0.0);
        assert_eq!(rng.draws(), 7);
    }

    #[test]
    fn spawned_meteors_respect_ranges() {
        let cfg = MeteorConfig::default();
        let mut rng = SeededRandom::new(11);
        for _ in 0..500 {
            let m = Meteor::spawn(&mut rng, 1280.0, &cfg);
            assert!(m.pos.x >= 0.0 && m.pos.x < 1024.0);
            assert!(cfg.y.contains(m.pos.y));
            assert!(cfg.length.contains(m.len));
            assert!(cfg.ttl.contains(m.ttl));
            assert!(cfg.hue.contains(m.hue));
            let speed = m.vel.length();
            assert!(speed >= 900.0 - 1e-9 && speed < 1700.0 + 1e-9);
        }
    }

    #[test]
    fn ttl_scenario_removes_on_second_half_second() {
        let bounds = Rect::from_size(800.0, 600.0);
        let mut m = meteor(Vec2::new(100.0, 100.0), Vec2::ZERO, 1.0);

        m.advance(0.5);
        assert_eq!(m.life, 0.5);
        assert!(!m.should_remove(bounds, 300.0));
        assert_eq!(m.fade(), 0.5);

        m.advance(0.5);
        assert_eq!(m.life, 1.0);
        assert!(m.should_remove(bounds, 300.0));
        assert_eq!(m.fade(), 0.0);
    }

    #[test]
    fn off_screen_cull_uses_margin_on_trailing_edges() {
        let bounds = Rect::from_size(800.0, 600.0);
        let at = |x, y| meteor(Vec2::new(x, y), Vec2::ZERO, 10.0);

        assert!(!at(1100.0, 0.0).should_remove(bounds, 300.0));
        assert!(at(1100.1, 0.0).should_remove(bounds, 300.0));
        assert!(!at(0.0, 900.0).should_remove(bounds, 300.0));
        assert!(at(0.0, 900.1).should_remove(bounds, 300.0));
        // Above or left of the viewport is not culled; only ttl ends those.
        assert!(!at(-2000.0, -2000.0).should_remove(bounds, 300.0));
    }

    #[test]
    fn fade_is_bounded() {
        let mut m = meteor(Vec2::ZERO, Vec2::new(1.0, 0.0), 0.3);
        assert_eq!(m.fade(), 1.0);
        for _ in 0..100 {
            m.advance(0.01);
            let f = m.fade();
            assert!((0.0..=1.0).contains(&f));
        }
        assert_eq!(m.fade(), 0.0);
        assert_eq!(meteor(Vec2::ZERO, Vec2::ZERO, 0.0).fade(), 0.0);
    }

    #[test]
    fn tail_trails_behind_velocity() {
        let m = meteor(Vec2::new(500.0, 500.0), Vec2::new(-300.0, -400.0), 1.0);
        let tail = m.tail();
        assert!((tail.x - 620.0).abs() < 1e-9);
        assert!((tail.y - 660.0).abs() < 1e-9);

        let still = meteor(Vec2::new(5.0, 5.0), Vec2::ZERO, 1.0);
        assert_eq!(still.tail(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn draw_commands_fade_with_life() {
        let cfg = MeteorConfig::default();
        let mut m = meteor(Vec2::new(10.0, 10.0), Vec2::new(0.0, 100.0), 1.0);
        m.life = 0.5;
        let [trail, head] = m.draw_commands(&cfg);

        let DrawCommand::StrokeLine { width, paint: Paint::Linear { stops, .. }, .. } = trail else {
            panic!("expected gradient stroke");
        };
        assert_eq!(width, 2.2);
        assert_eq!(stops.len(), 3);
        assert!((stops[0].color.alpha() - 0.475).abs() < 1e-12);
        assert_eq!(stops[2].color.alpha(), 0.0);

        let DrawCommand::FillCircle { radius, paint: Paint::Solid(color), .. } = head else {
            panic!("expected head glow");
        };
        assert_eq!(radius, 2.2);
        assert!((color.alpha() - 0.45).abs() < 1e-12);
    }
}
