/// Time primitives
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Default)]
pub struct Time(pub f64); // seconds

impl Time {
    pub fn from_millis(ms: f64) -> Self {
        Self(ms / 1000.0)
    }

    /// Seconds elapsed since `earlier`; negative if the clock went backwards.
    pub fn seconds_since(self, earlier: Time) -> f64 {
        self.0 - earlier.0
    }
}
