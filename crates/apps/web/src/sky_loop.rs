use std::cell::RefCell;
use std::rc::Rc;

use runtime::{FrameClock, LoopControl};
use sky::{SkyConfig, SkyEngine, Viewport};
use wasm_bindgen::prelude::*;
use web_sys::Window;

use crate::canvas::CanvasSurface;
use crate::log;
use crate::random::JsRandom;

pub const CANVAS_ID: &str = "starCanvas";
/// Optional JSON `SkyConfig` override on the canvas element.
pub const CONFIG_ATTRIBUTE: &str = "data-sky-config";

struct SkyLoop {
    engine: SkyEngine<JsRandom>,
    surface: CanvasSurface,
    clock: FrameClock,
    control: LoopControl,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Everything needed to restart or reconfigure a mounted sky.
struct SkyHandle {
    state: Rc<RefCell<SkyLoop>>,
    frame_cb: FrameCallback,
}

thread_local! {
    static SKY: RefCell<Option<SkyHandle>> = const { RefCell::new(None) };
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn now_ms(window: &Window) -> f64 {
    window.performance().map(|p| p.now()).unwrap_or(0.0)
}

fn window_viewport(window: &Window) -> Result<Viewport, JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::from_window(width, height, Some(window.device_pixel_ratio())))
}

fn request_frame(window: &Window, frame_cb: &FrameCallback) -> Result<(), JsValue> {
    let cb = frame_cb.borrow();
    let Some(cb) = cb.as_ref() else {
        return Ok(());
    };
    window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    Ok(())
}

/// Config from the canvas attribute, falling back to defaults on bad input.
fn attribute_config(surface: &CanvasSurface) -> SkyConfig {
    let Some(raw) = surface.attribute(CONFIG_ATTRIBUTE) else {
        return SkyConfig::default();
    };
    SkyConfig::from_json(&raw).unwrap_or_else(|err| {
        log::warn(&format!("sky: {err}; using defaults"));
        SkyConfig::default()
    })
}

/// Mounts the animation on `#starCanvas`.
///
/// Returns `Ok(false)` and schedules nothing when the canvas or its 2D
/// context is unavailable. Calling again with a mounted sky swaps in a fresh
/// engine built from `config` (or the canvas attribute when `None`) and
/// resumes a stopped loop.
pub fn mount(config: Option<SkyConfig>) -> Result<bool, JsValue> {
    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if SKY.with(|sky| sky.borrow().is_some()) {
        return remount(&window, config).map(|()| true);
    }

    let Some(surface) = CanvasSurface::find(&document, CANVAS_ID)? else {
        log::info("sky: no drawable canvas, animation disabled");
        return Ok(false);
    };

    let config = config.unwrap_or_else(|| attribute_config(&surface));
    let max_dt_s = config.frame.max_dt_s;
    let viewport = window_viewport(&window)?;
    surface.apply_viewport(&viewport)?;

    let mut control = LoopControl::new();
    let needs_request = control.start();
    let state = Rc::new(RefCell::new(SkyLoop {
        engine: SkyEngine::new(config, viewport, JsRandom),
        surface,
        clock: FrameClock::start(now_ms(&window), max_dt_s),
        control,
    }));

    install_resize_listener(&window, Rc::clone(&state))?;

    let frame_cb: FrameCallback = Rc::new(RefCell::new(None));
    let next_cb = Rc::clone(&frame_cb);
    let loop_state = Rc::clone(&state);
    *frame_cb.borrow_mut() = Some(Closure::new(move |now: f64| {
        let keep_going = {
            let mut s = loop_state.borrow_mut();
            s.control.begin_frame();
            let frame = s.clock.tick(now);
            let display_list = s.engine.step(frame.dt_s);
            if let Err(err) = s.surface.draw(&display_list) {
                log::error(&format!("sky: draw failed: {:?}", err));
            }
            s.control.should_continue()
        };
        if keep_going {
            if let Err(err) = window_and_request(&next_cb) {
                log::error(&format!("sky: requestAnimationFrame failed: {:?}", err));
            }
        }
    }));

    if needs_request {
        request_frame(&window, &frame_cb)?;
    }
    SKY.with(|sky| {
        *sky.borrow_mut() = Some(SkyHandle { state, frame_cb });
    });
    Ok(true)
}

fn window_and_request(frame_cb: &FrameCallback) -> Result<(), JsValue> {
    request_frame(&window()?, frame_cb)
}

fn remount(window: &Window, config: Option<SkyConfig>) -> Result<(), JsValue> {
    SKY.with(|sky| {
        let sky = sky.borrow();
        let Some(handle) = sky.as_ref() else {
            return Ok(());
        };

        let needs_request = {
            let mut s = handle.state.borrow_mut();
            let config = config.unwrap_or_else(|| attribute_config(&s.surface));
            let viewport = s.engine.viewport();
            s.clock = FrameClock::start(now_ms(window), config.frame.max_dt_s);
            s.engine = SkyEngine::new(config, viewport, JsRandom);
            s.control.start()
        };
        if needs_request {
            request_frame(window, &handle.frame_cb)?;
        }
        Ok(())
    })
}

fn install_resize_listener(win: &Window, state: Rc<RefCell<SkyLoop>>) -> Result<(), JsValue> {
    let on_resize = Closure::<dyn FnMut()>::new(move || {
        let result = window().and_then(|w| {
            let viewport = window_viewport(&w)?;
            let mut s = state.borrow_mut();
            s.surface.apply_viewport(&viewport)?;
            s.engine.resize(viewport);
            Ok(())
        });
        if let Err(err) = result {
            log::warn(&format!("sky: resize failed: {:?}", err));
        }
    });
    win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
    // Lives as long as the page.
    on_resize.forget();
    Ok(())
}

/// Stops scheduling frames; the last drawn frame stays on the canvas.
pub fn stop() {
    SKY.with(|sky| {
        if let Some(handle) = sky.borrow().as_ref() {
            handle.state.borrow_mut().control.stop();
        }
    });
}
