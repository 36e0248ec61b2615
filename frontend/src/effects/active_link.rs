use wasm_bindgen::JsValue;
use web_sys::{Document, Event, HtmlElement, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, Listener};

pub const SECTION_SELECTOR: &str = "section[id]";

pub fn link_selector(section_id: &str) -> String {
    format!(".nav-links a[href=\"#{}\"]", section_id)
}

/// Half-open range so two adjacent sections never both claim the position.
pub fn is_current(position: f64, top: f64, height: f64) -> bool {
    position >= top && position < top + height
}

fn highlight(link: &HtmlElement, current: bool) {
    if current {
        dom::set_style(link, "color", "var(--text)");
        dom::set_style(link, "--after-width", "100%");
    } else {
        dom::clear_style(link, "color");
        dom::clear_style(link, "--after-width");
    }
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    let mut pairs: Vec<(HtmlElement, HtmlElement)> = Vec::new();
    for section in dom::query_html(document, SECTION_SELECTOR)? {
        if let Some(link) = dom::first_html(document, &link_selector(&section.id()))? {
            pairs.push((section, link));
        }
    }
    if pairs.is_empty() {
        return Ok(None);
    }

    let lookahead = config.active_link_lookahead;
    let update = move |scroll_y: f64| {
        let position = scroll_y + lookahead;
        for (section, link) in &pairs {
            let top = section.offset_top() as f64;
            let height = section.offset_height() as f64;
            highlight(link, is_current(position, top, height));
        }
    };
    update(dom::scroll_y(window));

    let win = window.clone();
    let listener = Listener::passive(window, "scroll", move |_: Event| update(dom::scroll_y(&win)))?;

    Ok(Some(Effect::new("active_link").with_listener(listener)))
}
