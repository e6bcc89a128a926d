use foundation::time::Time;

/// Largest step a single frame may advance the simulation by (seconds).
///
/// Roughly a 30fps floor: a backgrounded tab resuming after minutes still
/// only moves particles by one short step.
pub const DEFAULT_MAX_DT_S: f64 = 0.033;

/// Per-frame timing metadata handed to the simulation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Clamped delta time (seconds).
    pub dt_s: f64,
    /// Host timestamp the frame was produced for.
    pub time: Time,
}

impl Frame {
    pub fn new(index: u64, dt_s: f64, time: Time) -> Self {
        Self { index, dt_s, time }
    }
}

/// Clamp a raw elapsed duration into `[0, max_dt_s]`.
///
/// Non-finite input (a broken clock) collapses to zero.
pub fn clamp_dt(elapsed_s: f64, max_dt_s: f64) -> f64 {
    if !elapsed_s.is_finite() {
        return 0.0;
    }
    elapsed_s.clamp(0.0, max_dt_s)
}

/// Turns host timestamps (milliseconds, e.g. `performance.now()`) into frames.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameClock {
    last: Time,
    next_index: u64,
    max_dt_s: f64,
}

impl FrameClock {
    /// Starts the clock at `now_ms`; the first frame measures from here.
    pub fn start(now_ms: f64, max_dt_s: f64) -> Self {
        Self {
            last: Time::from_millis(now_ms),
            next_index: 0,
            max_dt_s,
        }
    }

    pub fn tick(&mut self, now_ms: f64) -> Frame {
        let now = Time::from_millis(now_ms);
        let dt_s = clamp_dt(now.seconds_since(self.last), self.max_dt_s);
        self.last = now;

        let frame = Frame::new(self.next_index, dt_s, now);
        self.next_index = self.next_index.wrapping_add(1);
        frame
    }
}
