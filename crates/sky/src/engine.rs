use foundation::math::Vec2;
use foundation::random::RandomSource;
use runtime::clamp_dt;

use crate::color::Color;
use crate::config::SkyConfig;
use crate::meteor::Meteor;
use crate::render::{DrawCommand, GradientStop, Paint, SkyFrame};
use crate::spawner::MeteorSpawner;
use crate::star::Star;
use crate::viewport::Viewport;

/// Running totals, mostly useful for debugging and tests.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SkyStats {
    pub frames: u64,
    pub spawned: u64,
    /// Removed because `life >= ttl`.
    pub expired: u64,
    /// Removed for leaving the viewport.
    pub culled: u64,
}

/// Owns the whole night-sky simulation: viewport, stars, live meteors and
/// the spawn countdown.
///
/// Each [`SkyEngine::step`] advances the simulation and returns the frame's
/// display list; the host replays it onto a 2D context.
#[derive(Debug)]
pub struct SkyEngine<R: RandomSource> {
    config: SkyConfig,
    viewport: Viewport,
    stars: Vec<Star>,
    meteors: Vec<Meteor>,
    spawner: MeteorSpawner,
    rng: R,
    stats: SkyStats,
}

impl<R: RandomSource> SkyEngine<R> {
    pub fn new(config: SkyConfig, viewport: Viewport, mut rng: R) -> Self {
        let stars = (0..config.stars.count)
            .map(|_| Star::random(&mut rng, viewport.width, viewport.height, &config.stars))
            .collect();

        Self {
            config,
            viewport,
            stars,
            meteors: Vec::new(),
            spawner: MeteorSpawner::new(),
            rng,
            stats: SkyStats::default(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replaces the viewport wholesale. Stars and meteors are untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    pub fn spawner(&self) -> &MeteorSpawner {
        &self.spawner
    }

    pub fn stats(&self) -> SkyStats {
        self.stats
    }

    /// Adds a meteor to the live set as if the spawner had produced it.
    pub fn push_meteor(&mut self, meteor: Meteor) {
        self.meteors.push(meteor);
        self.stats.spawned += 1;
    }

    /// Advances by `elapsed_s` (clamped to `frame.max_dt_s`) and returns the
    /// frame's display list.
    pub fn step(&mut self, elapsed_s: f64) -> SkyFrame {
        let dt = clamp_dt(elapsed_s, self.config.frame.max_dt_s);
        let bounds = self.viewport.bounds();
        let mut frame = SkyFrame::with_capacity(self.stars.len() + self.meteors.len() * 2 + 8);

        frame.push(DrawCommand::Clear(bounds));
        frame.push(DrawCommand::FillRect {
            rect: bounds,
            paint: Paint::Solid(Color::rgba(0, 0, 0, self.config.frame.overlay_alpha)),
        });

        let clamp = self.config.stars.opacity_clamp;
        for star in &mut self.stars {
            star.twinkle(&mut self.rng, clamp);
            frame.push(star.draw_command());
        }

        let spawned = self.spawner.tick(
            dt,
            &mut self.rng,
            self.viewport.width,
            &self.config.spawn,
            &self.config.meteors,
            &mut self.meteors,
        );
        self.stats.spawned += spawned as u64;

        let margin = self.config.meteors.cull_margin;
        for i in (0..self.meteors.len()).rev() {
            let m = &mut self.meteors[i];
            m.advance(dt);
            frame.commands.extend(m.draw_commands(&self.config.meteors));

            if m.is_expired() {
                self.meteors.remove(i);
                self.stats.expired += 1;
            } else if m.should_remove(bounds, margin) {
                self.meteors.remove(i);
                self.stats.culled += 1;
            }
        }

        frame.push(self.vignette());
        self.stats.frames += 1;
        frame
    }

    /// Radial darkening toward the edges, centered above the middle.
    pub fn vignette(&self) -> DrawCommand {
        let Viewport { width, height, .. } = self.viewport;
        DrawCommand::FillRect {
            rect: self.viewport.bounds(),
            paint: Paint::Radial {
                center: Vec2::new(width * 0.5, height * 0.35),
                inner_radius: 0.0,
                outer_radius: width.max(height) * 0.75,
                stops: vec![
                    GradientStop::new(0.0, Color::rgba(40, 60, 120, 0.10)),
                    GradientStop::new(0.55, Color::rgba(90, 40, 140, 0.07)),
                    GradientStop::new(1.0, Color::rgba(0, 0, 0, 0.28)),
                ],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{SkyEngine, SkyStats};
    use crate::config::SkyConfig;
    use crate::meteor::Meteor;
    use crate::render::{DrawCommand, Paint};
    use crate::viewport::Viewport;
    use foundation::bounds::Rect;
    use foundation::math::Vec2;
    use foundation::random::{ScriptedRandom, SeededRandom};
    use pretty_assertions::assert_eq;

    fn engine(seed: u64) -> SkyEngine<SeededRandom> {
        SkyEngine::new(
            SkyConfig::default(),
            Viewport::from_window(800.0, 600.0, Some(2.0)),
            SeededRandom::new(seed),
        )
    }

    fn probe(pos: Vec2, vel: Vec2, ttl: f64) -> Meteor {
        Meteor {
            pos,
            vel,
            len: 200.0,
            life: 0.0,
            ttl,
            hue: 250.0,
        }
    }

    #[test]
    fn creates_fixed_star_population() {
        let e = engine(1);
        assert_eq!(e.stars().len(), 190);
        assert!(e.meteors().is_empty());
        assert_eq!(e.spawner().timer(), 0.0);
    }

    #[test]
    fn first_frame_spawns_a_burst() {
        let mut e = engine(1);
        e.step(0.016);
        let n = e.meteors().len();
        assert!((1..=4).contains(&n));
        assert_eq!(e.stats().spawned, n as u64);
        assert!(e.spawner().timer() >= 0.55 && e.spawner().timer() < 2.95);
    }

    #[test]
    fn star_opacity_stays_clamped_over_many_frames() {
        let mut e = engine(9);
        for _ in 0..2_000 {
            e.step(0.016);
            for s in e.stars() {
                assert!((0.08..=0.85).contains(&s.alpha));
            }
        }
    }

    #[test]
    fn huge_elapsed_time_moves_one_clamped_step() {
        let mut e = engine(5);
        e.push_meteor(probe(Vec2::new(100.0, 100.0), Vec2::new(1000.0, 0.0), 10.0));

        e.step(1000.0);
        let m = e.meteors()[0];
        assert!((m.pos.x - 133.0).abs() < 1e-9, "x = {}", m.pos.x);
        assert!((m.life - 0.033).abs() < 1e-12);
    }

    #[test]
    fn ttl_removal_happens_on_the_exact_frame() {
        let mut config = SkyConfig::default();
        config.frame.max_dt_s = 0.5;
        config.stars.count = 0;
        let mut e = SkyEngine::new(
            config,
            Viewport::from_window(800.0, 600.0, Some(1.0)),
            ScriptedRandom::constant(0.5),
        );
        e.push_meteor(probe(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.0));

        e.step(0.5);
        assert!(e.meteors().contains(&Meteor {
            life: 0.5,
            ..probe(Vec2::new(10.0, 10.0), Vec2::ZERO, 1.0)
        }));
        e.step(0.5);
        assert!(e.meteors().iter().all(|m| m.pos != Vec2::new(10.0, 10.0)));
        assert_eq!(e.stats().expired, 1);
    }

    #[test]
    fn off_screen_meteors_are_culled() {
        let mut e = engine(3);
        e.push_meteor(probe(Vec2::new(1099.0, 10.0), Vec2::new(100.0, 0.0), 10.0));
        e.step(0.02);
        assert!(e.meteors().iter().all(|m| m.vel != Vec2::new(100.0, 0.0)));
        assert_eq!(e.stats().culled, 1);
    }

    #[test]
    fn live_set_stays_bounded() {
        let mut e = engine(77);
        let mut peak = 0;
        for _ in 0..20_000 {
            e.step(0.016);
            peak = peak.max(e.meteors().len());
            for m in e.meteors() {
                assert!(m.life < m.ttl);
                assert!(m.pos.x <= 800.0 + 300.0 && m.pos.y <= 600.0 + 300.0);
            }
        }
        // At most four bursts of four fit inside the longest ttl.
        assert!(peak > 0 && peak <= 16, "peak = {peak}");
        let SkyStats { spawned, expired, culled, frames } = e.stats();
        assert_eq!(frames, 20_000);
        assert_eq!(spawned, expired + culled + e.meteors().len() as u64);
    }

    #[test]
    fn display_list_order() {
        let mut config = SkyConfig::default();
        config.stars.count = 3;
        let mut e = SkyEngine::new(
            config,
            Viewport::from_window(800.0, 600.0, Some(1.0)),
            ScriptedRandom::constant(0.5),
        );
        let frame = e.step(0.016);
        let bounds = Rect::from_size(800.0, 600.0);

        assert_eq!(frame.commands[0], DrawCommand::Clear(bounds));
        assert!(matches!(
            &frame.commands[1],
            DrawCommand::FillRect { paint: Paint::Solid(c), .. } if c.to_css() == "rgba(0,0,0,0.25)"
        ));
        for cmd in &frame.commands[2..5] {
            assert!(matches!(cmd, DrawCommand::FillCircle { .. }));
        }
        // constant 0.5 never bursts: one meteor, stroke then head.
        assert!(matches!(frame.commands[5], DrawCommand::StrokeLine { .. }));
        assert!(matches!(frame.commands[6], DrawCommand::FillCircle { .. }));
        assert_eq!(frame.commands[7], e.vignette());
        assert_eq!(frame.len(), 8);
    }

    #[test]
    fn vignette_geometry_follows_viewport() {
        let e = engine(1);
        let DrawCommand::FillRect { rect, paint: Paint::Radial { center, inner_radius, outer_radius, stops } } =
            e.vignette()
        else {
            panic!("expected radial fill");
        };
        assert_eq!(rect, Rect::from_size(800.0, 600.0));
        assert_eq!(center.x, 400.0);
        assert!((center.y - 210.0).abs() < 1e-9);
        assert_eq!(inner_radius, 0.0);
        assert_eq!(outer_radius, 600.0);
        assert_eq!(
            stops.iter().map(|s| s.color.to_css()).collect::<Vec<_>>(),
            vec!["rgba(40,60,120,0.1)", "rgba(90,40,140,0.07)", "rgba(0,0,0,0.28)"]
        );
    }

    #[test]
    fn resize_only_touches_viewport() {
        let mut e = engine(4);
        e.step(0.016);
        let stars = e.stars().to_vec();
        let meteors = e.meteors().to_vec();

        let vp = Viewport::from_window(1920.0, 1080.0, Some(1.5));
        e.resize(vp);
        e.resize(vp);

        assert_eq!(e.viewport().backing_size(), (2880, 1620));
        assert_eq!(e.stars(), stars.as_slice());
        assert_eq!(e.meteors(), meteors.as_slice());
    }
}
