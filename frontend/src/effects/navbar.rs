use wasm_bindgen::JsValue;
use web_sys::{Document, Event, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, Listener};

pub const NAVBAR_ID: &str = "navbar";
pub const SCROLLED_CLASS: &str = "scrolled";

#[derive(Debug, Clone, PartialEq)]
pub struct NavbarState {
    threshold: f64,
    scrolled: Option<bool>,
}

impl NavbarState {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            scrolled: None,
        }
    }

    pub fn is_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }

    /// Class state to apply, or `None` when it matches what is already on the
    /// element.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<bool> {
        let scrolled = self.is_scrolled(scroll_y);
        if self.scrolled == Some(scrolled) {
            return None;
        }
        self.scrolled = Some(scrolled);
        Some(scrolled)
    }
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    let Some(navbar) = document.get_element_by_id(NAVBAR_ID) else {
        return Ok(None);
    };

    let mut state = NavbarState::new(config.navbar_scrolled_after);
    if let Some(scrolled) = state.on_scroll(dom::scroll_y(window)) {
        dom::set_class(&navbar, SCROLLED_CLASS, scrolled);
    }

    let win = window.clone();
    let listener = Listener::passive(window, "scroll", move |_: Event| {
        if let Some(scrolled) = state.on_scroll(dom::scroll_y(&win)) {
            dom::set_class(&navbar, SCROLLED_CLASS, scrolled);
        }
    })?;

    Ok(Some(Effect::new("navbar").with_listener(listener)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_only_past_threshold() {
        let state = NavbarState::new(50.0);
        for y in [0.0, 10.0, 49.9, 50.0] {
            assert!(!state.is_scrolled(y), "scrolled at {y}");
        }
        for y in [50.1, 51.0, 400.0, 10_000.0] {
            assert!(state.is_scrolled(y), "not scrolled at {y}");
        }
    }

    #[test]
    fn writes_only_on_change() {
        let mut state = NavbarState::new(50.0);
        assert_eq!(state.on_scroll(0.0), Some(false));
        assert_eq!(state.on_scroll(20.0), None);
        assert_eq!(state.on_scroll(60.0), Some(true));
        assert_eq!(state.on_scroll(900.0), None);
        assert_eq!(state.on_scroll(50.0), Some(false));
    }
}
