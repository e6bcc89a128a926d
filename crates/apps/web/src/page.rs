use std::cell::RefCell;

use site::{CONTACT_RECEIVED_MESSAGE, NavMenu, TOAST_DURATION_MS, ToastState};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlFormElement};

use crate::log;

const YEAR_ID: &str = "year";
const NAV_TOGGLE_ID: &str = "navToggle";
const NAV_LINKS_ID: &str = "navLinks";
const TOAST_ID: &str = "toast";
const TOAST_SHOW_CLASS: &str = "show";
const CONTACT_FORM_ID: &str = "contactForm";

thread_local! {
    static TOAST: RefCell<ToastState> = RefCell::new(ToastState::new());
}

/// Wires the static page elements. Missing elements are skipped.
pub fn mount(document: &Document) -> Result<(), JsValue> {
    stamp_year(document);
    wire_nav(document)?;
    wire_contact_form(document)?;
    Ok(())
}

fn stamp_year(document: &Document) {
    if let Some(el) = document.get_element_by_id(YEAR_ID) {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}

fn wire_nav(document: &Document) -> Result<(), JsValue> {
    let (Some(toggle), Some(links)) = (
        document.get_element_by_id(NAV_TOGGLE_ID),
        document.get_element_by_id(NAV_LINKS_ID),
    ) else {
        return Ok(());
    };

    let button = toggle.clone();
    let on_click = Closure::<dyn FnMut()>::new(move || {
        let classes = links.class_list();
        let mut nav = NavMenu::from_dom(classes.contains(NavMenu::OPEN_CLASS));
        let open = nav.toggle();
        let result = classes
            .toggle_with_force(NavMenu::OPEN_CLASS, open)
            .and_then(|_| button.set_attribute("aria-expanded", nav.aria_expanded()));
        if let Err(err) = result {
            log::warn(&format!("page: nav toggle failed: {:?}", err));
        }
    });
    toggle.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

fn wire_contact_form(document: &Document) -> Result<(), JsValue> {
    let Some(form) = document.get_element_by_id(CONTACT_FORM_ID) else {
        return Ok(());
    };
    let form = form.dyn_into::<HtmlFormElement>()?;

    let target = form.clone();
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        show_toast(CONTACT_RECEIVED_MESSAGE);
        target.reset();
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

/// Shows `message` in `#toast`, hiding it after [`TOAST_DURATION_MS`].
///
/// A newer toast restarts the timer.
pub fn show_toast(message: &str) {
    if let Err(err) = show_toast_inner(message) {
        log::warn(&format!("page: toast failed: {:?}", err));
    }
}

fn show_toast_inner(message: &str) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let Some(toast) = document.get_element_by_id(TOAST_ID) else {
        return Ok(());
    };

    toast.set_text_content(Some(message));
    toast.class_list().add_1(TOAST_SHOW_CLASS)?;
    let ticket = TOAST.with(|t| t.borrow_mut().show(message));

    let hide = Closure::once_into_js(move || {
        if TOAST.with(|t| t.borrow_mut().hide(ticket)) {
            let _ = toast.class_list().remove_1(TOAST_SHOW_CLASS);
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        hide.unchecked_ref(),
        TOAST_DURATION_MS,
    )?;
    Ok(())
}
