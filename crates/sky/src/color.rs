/// CSS colors as the 2D context consumes them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Color {
    Rgba { r: u8, g: u8, b: u8, a: f64 },
    /// Hue in degrees, saturation and lightness in percent.
    Hsla { h: f64, s: f64, l: f64, a: f64 },
}

impl Color {
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color::Rgba { r, g, b, a }
    }

    pub fn hsla(h: f64, s: f64, l: f64, a: f64) -> Self {
        Color::Hsla { h, s, l, a }
    }

    pub fn alpha(&self) -> f64 {
        match *self {
            Color::Rgba { a, .. } | Color::Hsla { a, .. } => clamp_alpha(a),
        }
    }

    pub fn to_css(&self) -> String {
        let a = self.alpha();
        match *self {
            Color::Rgba { r, g, b, .. } => format!("rgba({r},{g},{b},{a})"),
            Color::Hsla { h, s, l, .. } => format!("hsla({h}, {s}%, {l}%, {a})"),
        }
    }
}

fn clamp_alpha(a: f64) -> f64 {
    if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) }
}
