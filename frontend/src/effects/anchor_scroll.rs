use wasm_bindgen::JsValue;
use web_sys::{Document, MouseEvent, ScrollBehavior, ScrollToOptions, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, Listener};
use crate::effects::navbar::NAVBAR_ID;

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Target id of an in-page link. A bare `#` has none.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset to scroll to so the target lands just below the fixed
/// navbar.
pub fn scroll_target(rect_top: f64, scroll_y: f64, navbar_height: f64, offset: f64) -> f64 {
    rect_top + scroll_y - navbar_height - offset
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    let anchors = dom::query_all(document, ANCHOR_SELECTOR)?;
    if anchors.is_empty() {
        return Ok(None);
    }

    let mut effect = Effect::new("anchor_scroll");
    for anchor in anchors {
        let win = window.clone();
        let doc = document.clone();
        let link = anchor.clone();
        let offset = config.anchor_offset;

        effect.listen(Listener::new(&anchor, "click", move |e: MouseEvent| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            let Some(target) = anchor_target_id(&href).and_then(|id| doc.get_element_by_id(id)) else {
                return;
            };
            e.prevent_default();

            let navbar_height = dom::html_by_id(&doc, NAVBAR_ID)
                .map(|nav| nav.offset_height() as f64)
                .unwrap_or(0.0);
            let top = scroll_target(
                target.get_bounding_client_rect().top(),
                dom::scroll_y(&win),
                navbar_height,
                offset,
            );

            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            win.scroll_to_with_scroll_to_options(&options);
        })?);
    }

    Ok(Some(effect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_has_no_target() {
        assert_eq!(anchor_target_id("#"), None);
        assert_eq!(anchor_target_id("#menu"), Some("menu"));
        assert_eq!(anchor_target_id("/about#team"), None);
    }

    #[test]
    fn target_clears_navbar_and_margin() {
        assert_eq!(scroll_target(300.0, 1200.0, 72.0, 20.0), 1408.0);
        assert_eq!(scroll_target(-400.0, 1200.0, 0.0, 20.0), 780.0);
    }
}
