use foundation::bounds::Rect;
use foundation::math::Vec2;

use crate::color::Color;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f64,
    pub color: Color,
}

impl GradientStop {
    pub fn new(offset: f64, color: Color) -> Self {
        Self { offset, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<GradientStop>,
    },
    Radial {
        center: Vec2,
        inner_radius: f64,
        outer_radius: f64,
        stops: Vec<GradientStop>,
    },
}

/// One 2D-context drawing operation, in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rect),
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    FillCircle {
        center: Vec2,
        radius: f64,
        paint: Paint,
    },
    /// Stroked with round line caps.
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f64,
        paint: Paint,
    },
}

/// Ordered display list for a single frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SkyFrame {
    pub commands: Vec<DrawCommand>,
}

impl SkyFrame {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            commands: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
