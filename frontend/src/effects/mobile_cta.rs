use wasm_bindgen::JsValue;
use web_sys::{Document, Event, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, Listener};

pub const CTA_ID: &str = "mobileCta";
pub const VISIBLE_CLASS: &str = "visible";

/// Edge-triggered visibility of the sticky call-to-action bar.
#[derive(Debug, Clone, PartialEq)]
pub struct StickyCta {
    ratio: f64,
    visible: bool,
}

impl StickyCta {
    pub fn new(ratio: f64) -> Self {
        Self {
            ratio,
            visible: false,
        }
    }

    /// Returns the new visibility only when it changed.
    pub fn update(&mut self, scroll_y: f64, viewport_height: f64) -> Option<bool> {
        let should_show = scroll_y > viewport_height * self.ratio;
        if should_show == self.visible {
            return None;
        }
        self.visible = should_show;
        Some(should_show)
    }
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    let Some(cta) = document.get_element_by_id(CTA_ID) else {
        return Ok(None);
    };

    let mut state = StickyCta::new(config.mobile_cta_ratio);
    let win = window.clone();
    let listener = Listener::passive(window, "scroll", move |_: Event| {
        if let Some(visible) = state.update(dom::scroll_y(&win), dom::inner_height(&win)) {
            dom::set_class(&cta, VISIBLE_CLASS, visible);
        }
    })?;

    Ok(Some(Effect::new("mobile_cta").with_listener(listener)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flips_only_past_sixty_percent() {
        let mut cta = StickyCta::new(0.6);
        assert_eq!(cta.update(0.0, 1000.0), None);
        assert_eq!(cta.update(600.0, 1000.0), None);
        assert_eq!(cta.update(600.5, 1000.0), Some(true));
        assert_eq!(cta.update(601.0, 1000.0), None);
    }

    #[test]
    fn edge_triggered_both_ways() {
        let mut cta = StickyCta::new(0.6);
        let changes: Vec<_> = [100.0, 700.0, 800.0, 900.0, 500.0, 400.0, 650.0]
            .into_iter()
            .filter_map(|y| cta.update(y, 1000.0))
            .collect();
        assert_eq!(changes, vec![true, false, true]);
    }
}
