use foundation::random::RandomSource;
use serde::{Deserialize, Serialize};

use crate::error::SkyError;

/// Largest star population a config may ask for.
pub const MAX_STAR_COUNT: usize = 10_000;
/// Largest `spawn.extra_burst_max` a config may ask for.
pub const MAX_EXTRA_BURST: u32 = 16;

/// A numeric interval, serialized as `[lo, hi]`.
///
/// Sampling treats it as half-open `[lo, hi)`; clamping treats it as closed.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span(pub f64, pub f64);

impl Span {
    pub fn lo(&self) -> f64 {
        self.0
    }

    pub fn hi(&self) -> f64 {
        self.1
    }

    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.range(self.0, self.1)
    }

    pub fn clamp(&self, v: f64) -> f64 {
        v.max(self.0).min(self.1)
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.0 && v < self.1
    }

    fn check(&self, name: &str) -> Result<(), SkyError> {
        if !self.0.is_finite() || !self.1.is_finite() {
            return Err(SkyError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.0 > self.1 {
            return Err(SkyError::InvalidConfig(format!(
                "{name} is inverted: [{}, {}]",
                self.0, self.1
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub count: usize,
    pub radius: Span,
    /// Initial opacity.
    pub opacity: Span,
    pub twinkle: Span,
    /// Bounds the twinkle random walk is held within.
    pub opacity_clamp: Span,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            count: 190,
            radius: Span(0.2, 1.6),
            opacity: Span(0.15, 0.85),
            twinkle: Span(0.005, 0.02),
            opacity_clamp: Span(0.08, 0.85),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorConfig {
    /// Spawn x is drawn from `[0, x_fraction * width)`.
    pub x_fraction: f64,
    pub y: Span,
    pub angle_base_rad: f64,
    pub angle_spread_rad: f64,
    /// Pixels per second.
    pub speed: Span,
    pub length: Span,
    /// Seconds.
    pub ttl: Span,
    pub hue: Span,
    pub line_width: f64,
    pub head_radius: f64,
    /// How far past the right/bottom edge a meteor may travel before culling.
    pub cull_margin: f64,
}

impl Default for MeteorConfig {
    fn default() -> Self {
        Self {
            x_fraction: 0.8,
            y: Span(-240.0, -20.0),
            angle_base_rad: std::f64::consts::PI * 1.15,
            angle_spread_rad: 0.18,
            speed: Span(900.0, 1700.0),
            length: Span(180.0, 460.0),
            ttl: Span(0.9, 1.75),
            hue: Span(220.0, 285.0),
            line_width: 2.2,
            head_radius: 2.2,
            cull_margin: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Probability that a spawn produces a multi-meteor burst.
    pub burst_chance: f64,
    /// A burst adds `1 + floor(rand * extra_burst_max)` meteors to the first.
    pub extra_burst_max: u32,
    /// Seconds until the next spawn.
    pub interval: Span,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            burst_chance: 0.22,
            extra_burst_max: 3,
            interval: Span(0.55, 2.95),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub max_dt_s: f64,
    /// Alpha of the black wash painted under everything each frame.
    pub overlay_alpha: f64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_dt_s: runtime::DEFAULT_MAX_DT_S,
            overlay_alpha: 0.25,
        }
    }
}

/// Every tunable of the night-sky animation.
///
/// Fields missing from a JSON override keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub stars: StarConfig,
    pub meteors: MeteorConfig,
    pub spawn: SpawnConfig,
    pub frame: FrameConfig,
}

impl SkyConfig {
    pub fn from_json(raw: &str) -> Result<Self, SkyError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SkyConfig =
            serde_json::from_str(raw).map_err(|e| SkyError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SkyError> {
        let s = &self.stars;
        if s.count > MAX_STAR_COUNT {
            return Err(SkyError::InvalidConfig(format!(
                "stars.count must be at most {MAX_STAR_COUNT}"
            )));
        }
        s.radius.check("stars.radius")?;
        s.opacity.check("stars.opacity")?;
        s.twinkle.check("stars.twinkle")?;
        s.opacity_clamp.check("stars.opacity_clamp")?;
        if s.opacity_clamp.lo() < 0.0 || s.opacity_clamp.hi() > 1.0 {
            return Err(SkyError::InvalidConfig(
                "stars.opacity_clamp must lie within [0, 1]".to_string(),
            ));
        }

        let m = &self.meteors;
        m.y.check("meteors.y")?;
        m.speed.check("meteors.speed")?;
        m.length.check("meteors.length")?;
        m.ttl.check("meteors.ttl")?;
        m.hue.check("meteors.hue")?;
        for (name, v) in [
            ("meteors.x_fraction", m.x_fraction),
            ("meteors.angle_spread_rad", m.angle_spread_rad),
            ("meteors.line_width", m.line_width),
            ("meteors.head_radius", m.head_radius),
            ("meteors.cull_margin", m.cull_margin),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(SkyError::InvalidConfig(format!(
                    "{name} must be a non-negative number"
                )));
            }
        }
        if !m.angle_base_rad.is_finite() {
            return Err(SkyError::InvalidConfig(
                "meteors.angle_base_rad must be finite".to_string(),
            ));
        }
        if m.ttl.lo() <= 0.0 {
            return Err(SkyError::InvalidConfig(
                "meteors.ttl must be positive".to_string(),
            ));
        }

        let sp = &self.spawn;
        sp.interval.check("spawn.interval")?;
        if sp.interval.lo() < 0.0 {
            return Err(SkyError::InvalidConfig(
                "spawn.interval must not be negative".to_string(),
            ));
        }
        if sp.extra_burst_max > MAX_EXTRA_BURST {
            return Err(SkyError::InvalidConfig(format!(
                "spawn.extra_burst_max must be at most {MAX_EXTRA_BURST}"
            )));
        }
        if !(0.0..=1.0).contains(&sp.burst_chance) {
            return Err(SkyError::InvalidConfig(
                "spawn.burst_chance must lie within [0, 1]".to_string(),
            ));
        }

        let f = &self.frame;
        if !f.max_dt_s.is_finite() || f.max_dt_s <= 0.0 {
            return Err(SkyError::InvalidConfig(
                "frame.max_dt_s must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&f.overlay_alpha) {
            return Err(SkyError::InvalidConfig(
                "frame.overlay_alpha must lie within [0, 1]".to_string(),
            ));
        }
        Ok(())
    }
}
