use sky::{DrawCommand, GradientStop, Paint, SkyFrame, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasGradient, CanvasRenderingContext2d, Document, HtmlCanvasElement};

/// A canvas element plus its 2D context, replaying sky display lists.
#[derive(Debug, Clone)]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// `Ok(None)` when the element or a 2D context is missing.
    pub fn find(document: &Document, id: &str) -> Result<Option<Self>, JsValue> {
        let Some(element) = document.get_element_by_id(id) else {
            return Ok(None);
        };
        let canvas = element.dyn_into::<HtmlCanvasElement>()?;
        let Some(ctx) = canvas.get_context("2d")? else {
            return Ok(None);
        };
        let ctx = ctx.dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Some(Self { canvas, ctx }))
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.canvas.get_attribute(name)
    }

    /// Sizes the backing store and CSS box, then resets the dpr transform.
    pub fn apply_viewport(&self, viewport: &Viewport) -> Result<(), JsValue> {
        let (width_px, height_px) = viewport.backing_size();
        self.canvas.set_width(width_px);
        self.canvas.set_height(height_px);

        let (css_w, css_h) = viewport.css_size();
        let style = self.canvas.style();
        style.set_property("width", &css_w)?;
        style.set_property("height", &css_h)?;

        let [a, b, c, d, e, f] = viewport.transform();
        self.ctx.set_transform(a, b, c, d, e, f)
    }

    pub fn draw(&self, frame: &SkyFrame) -> Result<(), JsValue> {
        for command in &frame.commands {
            self.draw_command(command)?;
        }
        Ok(())
    }

    fn draw_command(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear(rect) => {
                ctx.clear_rect(rect.origin.x, rect.origin.y, rect.size.x, rect.size.y);
            }
            DrawCommand::FillRect { rect, paint } => {
                ctx_set_fill_style(ctx, &self.paint_value(paint)?);
                ctx.fill_rect(rect.origin.x, rect.origin.y, rect.size.x, rect.size.y);
            }
            DrawCommand::FillCircle {
                center,
                radius,
                paint,
            } => {
                ctx.begin_path();
                ctx_set_fill_style(ctx, &self.paint_value(paint)?);
                ctx.arc(center.x, center.y, *radius, 0.0, std::f64::consts::TAU)?;
                ctx.fill();
            }
            DrawCommand::StrokeLine {
                from,
                to,
                width,
                paint,
            } => {
                ctx_set_stroke_style(ctx, &self.paint_value(paint)?);
                ctx.set_line_width(*width);
                ctx.set_line_cap("round");
                ctx.begin_path();
                ctx.move_to(from.x, from.y);
                ctx.line_to(to.x, to.y);
                ctx.stroke();
            }
        }
        Ok(())
    }

    fn paint_value(&self, paint: &Paint) -> Result<JsValue, JsValue> {
        match paint {
            Paint::Solid(color) => Ok(JsValue::from_str(&color.to_css())),
            Paint::Linear { from, to, stops } => {
                let g = self.ctx.create_linear_gradient(from.x, from.y, to.x, to.y);
                add_stops(&g, stops)?;
                Ok(g.into())
            }
            Paint::Radial {
                center,
                inner_radius,
                outer_radius,
                stops,
            } => {
                let g = self.ctx.create_radial_gradient(
                    center.x,
                    center.y,
                    *inner_radius,
                    center.x,
                    center.y,
                    *outer_radius,
                )?;
                add_stops(&g, stops)?;
                Ok(g.into())
            }
        }
    }
}

fn add_stops(gradient: &CanvasGradient, stops: &[GradientStop]) -> Result<(), JsValue> {
    for stop in stops {
        gradient.add_color_stop(stop.offset.clamp(0.0, 1.0) as f32, &stop.color.to_css())?;
    }
    Ok(())
}

// The typed fillStyle/strokeStyle setters differ across web-sys releases;
// setting the property directly accepts both strings and gradients.
fn ctx_set_fill_style(ctx: &CanvasRenderingContext2d, value: &JsValue) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str("fillStyle"), value);
}

fn ctx_set_stroke_style(ctx: &CanvasRenderingContext2d, value: &JsValue) {
    let _ = js_sys::Reflect::set(ctx.as_ref(), &JsValue::from_str("strokeStyle"), value);
}
