use std::cell::{Cell, RefCell};
use std::rc::Rc;

use site::{
    FADE_IN_MS, FADE_OUT_MS, FADE_TICK_MS, HINT_DELAY_MS, LocalStoragePreferenceStore,
    MUSIC_HINT_MESSAGE, MUSIC_VOLUME, MusicAction, MusicController, MusicEffects,
    MusicPreference, PAUSE_AFTER_MS, PlayOutcome, VolumeFade, load_music_preference,
    music_label, save_music_preference,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{AddEventListenerOptions, Document, Element, HtmlAudioElement, Window};

use crate::log;
use crate::page::show_toast;

const AUDIO_ID: &str = "bgm";
const BUTTON_ID: &str = "musicBtn";

struct ActiveFade {
    interval_id: i32,
    _tick: Closure<dyn FnMut()>,
}

struct MusicUi {
    audio: HtmlAudioElement,
    button: Option<Element>,
    controller: MusicController,
    store: Option<LocalStoragePreferenceStore>,
    fade: Option<ActiveFade>,
}

thread_local! {
    static MUSIC: RefCell<Option<MusicUi>> = const { RefCell::new(None) };
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Loads the stored preference, labels the button and wires the music
/// toggle. Without an `#bgm` element only the label is set.
pub fn mount(document: &Document) -> Result<(), JsValue> {
    let mut store = match LocalStoragePreferenceStore::new() {
        Ok(store) => Some(store),
        Err(err) => {
            log::warn(&format!("music: {err}; preference will not persist"));
            None
        }
    };
    let preference = match store.as_mut().map(load_music_preference) {
        Some(Ok(pref)) => pref,
        Some(Err(err)) => {
            log::warn(&format!("music: {err}"));
            MusicPreference::On
        }
        None => MusicPreference::On,
    };
    let controller = MusicController::new(preference);

    let button = document.get_element_by_id(BUTTON_ID);
    if let Some(button) = &button {
        button.set_text_content(Some(controller.initial_label()));
    }

    let Some(audio) = document.get_element_by_id(AUDIO_ID) else {
        return Ok(());
    };
    let audio = audio.dyn_into::<HtmlAudioElement>()?;

    if let Some(button) = &button {
        let on_click = Closure::<dyn FnMut()>::new(move || {
            let paused = with_audio(|a| a.paused()).unwrap_or(true);
            match with_controller(|c| c.click(paused)) {
                Some(MusicAction::Play) => spawn_local(play()),
                Some(MusicAction::Stop) => stop(),
                _ => {}
            }
        });
        button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        on_click.forget();
    }

    let on_first_pointer = Closure::<dyn FnMut()>::new(move || {
        let paused = with_audio(|a| a.paused()).unwrap_or(false);
        if with_controller(|c| c.first_pointer(paused)) == Some(MusicAction::Play) {
            spawn_local(play());
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    document.add_event_listener_with_callback_and_add_event_listener_options(
        "pointerdown",
        on_first_pointer.as_ref().unchecked_ref(),
        &options,
    )?;
    on_first_pointer.forget();

    let wants_hint = controller.wants_hint();
    MUSIC.with(|m| {
        *m.borrow_mut() = Some(MusicUi {
            audio,
            button,
            controller,
            store,
            fade: None,
        });
    });

    if wants_hint {
        let hint = Closure::once_into_js(move || {
            let paused = with_audio(|a| a.paused()).unwrap_or(false);
            if with_controller(|c| c.hint_due(paused)) == Some(true) {
                show_toast(MUSIC_HINT_MESSAGE);
            }
        });
        window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            hint.unchecked_ref(),
            HINT_DELAY_MS,
        )?;
    }
    Ok(())
}

fn with_audio<R>(f: impl FnOnce(&HtmlAudioElement) -> R) -> Option<R> {
    MUSIC.with(|m| m.borrow().as_ref().map(|ui| f(&ui.audio)))
}

fn with_controller<R>(f: impl FnOnce(&mut MusicController) -> R) -> Option<R> {
    MUSIC.with(|m| m.borrow_mut().as_mut().map(|ui| f(&mut ui.controller)))
}

async fn play() {
    let Some(audio) = with_audio(|a| a.clone()) else {
        return;
    };
    audio.set_volume(0.0);

    let outcome = match audio.play() {
        Ok(promise) => match JsFuture::from(promise).await {
            Ok(_) => PlayOutcome::Started,
            Err(err) => {
                log::info(&format!("music: playback blocked: {:?}", err));
                PlayOutcome::Blocked
            }
        },
        Err(err) => {
            log::warn(&format!("music: play() threw: {:?}", err));
            PlayOutcome::Blocked
        }
    };

    if outcome == PlayOutcome::Started {
        fade_to(MUSIC_VOLUME, FADE_IN_MS);
    }
    if let Some(effects) = with_controller(|c| c.played(outcome)) {
        apply(effects);
    }
}

fn stop() {
    fade_to(0.0, FADE_OUT_MS);

    let pause = Closure::once_into_js(move || {
        with_audio(|a| {
            let _ = a.pause();
        });
    });
    let scheduled = window().and_then(|w| {
        w.set_timeout_with_callback_and_timeout_and_arguments_0(
            pause.unchecked_ref(),
            PAUSE_AFTER_MS,
        )
    });
    if let Err(err) = scheduled {
        log::warn(&format!("music: could not schedule pause: {:?}", err));
    }

    if let Some(effects) = with_controller(|c| c.stopped()) {
        apply(effects);
    }
}

fn apply(effects: MusicEffects) {
    MUSIC.with(|m| {
        let mut m = m.borrow_mut();
        let Some(ui) = m.as_mut() else {
            return;
        };
        if let Some(button) = &ui.button {
            button.set_text_content(Some(music_label(effects.label_on)));
        }
        if let (Some(pref), Some(store)) = (effects.save, ui.store.as_mut()) {
            if let Err(err) = save_music_preference(store, pref) {
                log::warn(&format!("music: {err}"));
            }
        }
    });
}

/// Ramps the audio volume to `target`, replacing any fade in progress.
fn fade_to(target: f64, duration_ms: u32) {
    if let Err(err) = fade_to_inner(target, duration_ms) {
        log::warn(&format!("music: fade failed: {:?}", err));
    }
}

fn fade_to_inner(target: f64, duration_ms: u32) -> Result<(), JsValue> {
    let window = window()?;
    let Some(audio) = with_audio(|a| a.clone()) else {
        return Ok(());
    };
    cancel_fade(&window);

    let mut fade = VolumeFade::new(audio.volume(), target, duration_ms);
    let interval_id = Rc::new(Cell::new(None::<i32>));
    let own_id = Rc::clone(&interval_id);
    let tick = Closure::<dyn FnMut()>::new(move || match fade.next() {
        Some(volume) => audio.set_volume(volume),
        None => {
            if let (Some(id), Some(w)) = (own_id.get(), web_sys::window()) {
                w.clear_interval_with_handle(id);
            }
        }
    });
    let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
        tick.as_ref().unchecked_ref(),
        FADE_TICK_MS,
    )?;
    interval_id.set(Some(id));

    MUSIC.with(|m| {
        if let Some(ui) = m.borrow_mut().as_mut() {
            ui.fade = Some(ActiveFade {
                interval_id: id,
                _tick: tick,
            });
        }
    });
    Ok(())
}

fn cancel_fade(window: &Window) {
    let previous = MUSIC.with(|m| m.borrow_mut().as_mut().and_then(|ui| ui.fade.take()));
    if let Some(previous) = previous {
        window.clear_interval_with_handle(previous.interval_id);
    }
}
