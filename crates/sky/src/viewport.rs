use foundation::bounds::Rect;

/// Logical canvas size plus the device pixel ratio it is rendered at.
///
/// The canvas backing store is `logical * dpr` pixels while CSS keeps the
/// logical size, so drawing code works in logical pixels under a `dpr` scale.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub dpr: f64,
}

impl Viewport {
    /// Builds a viewport from `window.innerWidth/innerHeight` and
    /// `window.devicePixelRatio` (which may be absent). Sizes are floored to
    /// whole logical pixels; `dpr` is at least 1.
    pub fn from_window(inner_width: f64, inner_height: f64, device_pixel_ratio: Option<f64>) -> Self {
        Self {
            width: whole_pixels(inner_width),
            height: whole_pixels(inner_height),
            dpr: sanitize_dpr(device_pixel_ratio),
        }
    }

    /// Backing-store size in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).floor() as u32,
            (self.height * self.dpr).floor() as u32,
        )
    }

    /// CSS `width`/`height` values.
    pub fn css_size(&self) -> (String, String) {
        (format!("{}px", self.width), format!("{}px", self.height))
    }

    /// `setTransform(a, b, c, d, e, f)` arguments mapping logical to physical pixels.
    pub fn transform(&self) -> [f64; 6] {
        [self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0]
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

fn whole_pixels(v: f64) -> f64 {
    if v.is_finite() { v.floor().max(0.0) } else { 0.0 }
}

fn sanitize_dpr(dpr: Option<f64>) -> f64 {
    match dpr {
        Some(d) if d.is_finite() && d > 0.0 => d.max(1.0),
        _ => 1.0,
    }
}
