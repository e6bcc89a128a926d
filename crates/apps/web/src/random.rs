use foundation::random::RandomSource;

/// `Math.random()`.
#[derive(Debug, Default, Copy, Clone)]
pub struct JsRandom;

impl RandomSource for JsRandom {
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }
}
