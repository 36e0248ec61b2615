use std::cell::RefCell;

use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{window, Document, Window};

mod config;
mod dom;
mod effects;

use config::SiteConfig;
use effects::Page;

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

fn start(window: Window, document: Document) {
    let config = SiteConfig::from_document(&document);
    let page = Page::mount(&window, &document, &config);
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
}

/// Detaches every page effect. For hosts that swap the page content without
/// a full reload; a normal page never needs it.
#[wasm_bindgen(js_name = teardownPageEffects)]
pub fn teardown_page_effects() {
    if let Some(page) = PAGE.with(|slot| slot.borrow_mut().take()) {
        page.teardown();
        info!("Page effects torn down");
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    info!("Starting page effects");
    if document.ready_state() != "loading" {
        start(window, document);
        return;
    }

    let doc = document.clone();
    let on_ready = Closure::once_into_js(move || start(window, doc));
    if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref()) {
        log::warn!("Could not wait for DOMContentLoaded: {:?}", e);
    }
}
