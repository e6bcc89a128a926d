/// Interval between volume updates while fading.
pub const FADE_TICK_MS: i32 = 16;

/// Linear volume ramp, stepped once per [`FADE_TICK_MS`].
///
/// Yields the volume to apply at each tick; every value is within `[0, 1]`
/// and the final one is exactly the (clamped) target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VolumeFade {
    start: f64,
    target: f64,
    steps: u32,
    step: u32,
}

impl VolumeFade {
    pub fn new(start: f64, target: f64, duration_ms: u32) -> Self {
        let steps = (duration_ms / FADE_TICK_MS as u32).max(10);
        Self {
            start: clamp_volume(start),
            target: clamp_volume(target),
            steps,
            step: 0,
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_done(&self) -> bool {
        self.step >= self.steps
    }
}

impl Iterator for VolumeFade {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.is_done() {
            return None;
        }
        self.step += 1;
        if self.step == self.steps {
            return Some(self.target);
        }
        let t = f64::from(self.step) / f64::from(self.steps);
        Some(clamp_volume(self.start + (self.target - self.start) * t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.steps - self.step) as usize;
        (left, Some(left))
    }
}

fn clamp_volume(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
