use std::sync::atomic::{AtomicBool, Ordering};

use sky::SkyConfig;
use wasm_bindgen::prelude::*;

mod canvas;
mod log;
mod music;
mod page;
mod random;
mod sky_loop;

// Guard against double-initialization during hot reload.
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Page entry point: wires the page behaviors and starts the sky.
///
/// Each part is mounted independently so a failure in one (say, a missing
/// audio element) never prevents the others.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if let Err(err) = page::mount(&document) {
        log::error(&format!("page: mount failed: {:?}", err));
    }
    if let Err(err) = music::mount(&document) {
        log::error(&format!("music: mount failed: {:?}", err));
    }
    if let Err(err) = sky_loop::mount(None) {
        log::error(&format!("sky: mount failed: {:?}", err));
    }
    Ok(())
}

/// Mounts (or remounts) the sky with an optional JSON config.
///
/// Returns `false` when the page has no usable canvas.
#[wasm_bindgen]
pub fn mount_sky(config_json: Option<String>) -> Result<bool, JsValue> {
    let config = config_json
        .map(|raw| SkyConfig::from_json(&raw))
        .transpose()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    sky_loop::mount(config)
}

#[wasm_bindgen]
pub fn stop_sky() {
    sky_loop::stop();
}

#[wasm_bindgen]
pub fn show_toast(message: &str) {
    page::show_toast(message);
}
