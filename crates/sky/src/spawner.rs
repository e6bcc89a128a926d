use foundation::random::RandomSource;

use crate::config::{MeteorConfig, SpawnConfig};
use crate::meteor::Meteor;

/// Countdown that releases meteor bursts in step with the frame loop.
///
/// The countdown is advanced by frame time only, so spawns can never
/// interleave with a frame.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct MeteorSpawner {
    timer: f64,
}

impl MeteorSpawner {
    /// Starts expired, so the first tick spawns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds until the next burst.
    pub fn timer(&self) -> f64 {
        self.timer
    }

    /// Number of meteors in one burst: 1, or `2..=1 + extra_burst_max` with
    /// probability `burst_chance`.
    pub fn burst_size<R: RandomSource + ?Sized>(rng: &mut R, config: &SpawnConfig) -> usize {
        if rng.chance(config.burst_chance) {
            let extra = (rng.next_f64() * f64::from(config.extra_burst_max)).floor() as usize;
            2 + extra
        } else {
            1
        }
    }

    /// Advances the countdown by `dt`, appending a burst to `out` when it
    /// expires. Returns how many meteors were spawned.
    pub fn tick<R: RandomSource + ?Sized>(
        &mut self,
        dt: f64,
        rng: &mut R,
        viewport_width: f64,
        spawn: &SpawnConfig,
        meteors: &MeteorConfig,
        out: &mut Vec<Meteor>,
    ) -> usize {
        self.timer -= dt;
        if self.timer > 0.0 {
            return 0;
        }

        let burst = Self::burst_size(rng, spawn);
        for _ in 0..burst {
            out.push(Meteor::spawn(&mut *rng, viewport_width, meteors));
        }
        self.timer = spawn.interval.sample(rng);
        burst
    }
}
