//! Browser glue for the wasm build.
//!
//! Wires the DOM (file input, status span, gallery container) to the
//! target-independent core: the gallery store, the status state machine,
//! and the markup renderer. Uses web_sys to interact with browser APIs.

mod storage;
mod upload;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, HtmlInputElement};

use crate::constants::{
    FILE_INPUT_ELEMENT_ID, GALLERY_ELEMENT_ID, STATUS_ELEMENT_ID, STATUS_RESET_DELAY_MS,
};
use crate::gallery;
use crate::status::{StatusLine, UploadSlot, UploadStatus};
use crate::store::GalleryStore;
use self::storage::LocalStorageBackend;

/// Shared application state, one instance per page.
///
/// Everything lives on the single browser thread; `RefCell`/`Cell` are only
/// there to share state across the event closures.
pub(crate) struct App {
    pub(crate) store: RefCell<GalleryStore<LocalStorageBackend>>,
    pub(crate) status: RefCell<StatusLine>,
    /// Single-slot upload guard; see [`UploadSlot`]
    pub(crate) in_flight: UploadSlot,
    pub(crate) gallery: Element,
    pub(crate) status_span: HtmlElement,
    pub(crate) file_input: HtmlInputElement,
}

impl App {
    /// Rebuild the gallery container from the cached sequence (full
    /// replace, no diffing).
    pub(crate) fn render_gallery(&self) {
        let html = gallery::render(self.store.borrow().images());
        self.gallery.set_inner_html(&html);
    }

    pub(crate) fn render_status(&self) {
        self.status_span.set_inner_text(&self.status.borrow().label());
    }

    /// Transition the status line and repaint it.
    pub(crate) fn set_status(&self, status: UploadStatus) {
        self.status.borrow_mut().set(status);
        self.render_status();
    }

    /// Schedule the fall-back to the idle message. The timer captures the
    /// current epoch and does nothing if another transition fired first.
    pub(crate) fn schedule_status_reset(self: &Rc<Self>) {
        let epoch = self.status.borrow().epoch();
        let app = self.clone();
        let callback = Closure::once_into_js(move || {
            if app.status.borrow_mut().reset_if_current(epoch) {
                app.render_status();
            }
        });

        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            STATUS_RESET_DELAY_MS,
        ) {
            log::warn!("Failed to schedule status reset: {:?}", e);
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    if let Err(e) = run() {
        log::error!("Failed to initialise pixlift: {:?}", e);
    }
}

fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document: Document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let gallery = require_element(&document, GALLERY_ELEMENT_ID)?;
    let status_span: HtmlElement = require_element(&document, STATUS_ELEMENT_ID)?
        .dyn_into()
        .map_err(|_| JsValue::from_str("status element is not an HtmlElement"))?;
    let file_input: HtmlInputElement = require_element(&document, FILE_INPUT_ELEMENT_ID)?
        .dyn_into()
        .map_err(|_| JsValue::from_str("file input element is not an input"))?;

    let backend = LocalStorageBackend::new()
        .map_err(|e| JsValue::from_str(&format!("storage unavailable: {}", e)))?;
    let store = GalleryStore::load(backend);
    log::info!("Loaded {} cached image(s)", store.len());

    let app = Rc::new(App {
        store: RefCell::new(store),
        status: RefCell::new(StatusLine::new()),
        in_flight: UploadSlot::new(),
        gallery,
        status_span,
        file_input,
    });

    // Initial paint from whatever was previously persisted
    app.render_gallery();
    app.render_status();

    // Handle file selection
    let app_for_change = app.clone();
    let onchange = Closure::wrap(Box::new(move |_event: Event| {
        upload::begin_upload(&app_for_change);
    }) as Box<dyn FnMut(Event)>);

    app.file_input
        .set_onchange(Some(onchange.as_ref().unchecked_ref()));
    onchange.forget(); // Leak the closure to keep it alive

    Ok(())
}

fn require_element(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{}", id)))
}
