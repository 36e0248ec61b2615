use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, OneShotObserver};

pub const REVEAL_SELECTOR: &str = ".reveal, .reveal-left, .reveal-right, .reveal-up";
pub const VISIBLE_CLASS: &str = "visible";

/// Shrinks the observed viewport from the bottom so elements reveal a little
/// after they first peek in.
pub fn root_margin(bottom_margin: f64) -> String {
    format!("0px 0px -{}px 0px", bottom_margin)
}

pub fn mount(_window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    let targets = dom::query_all(document, REVEAL_SELECTOR)?;
    if targets.is_empty() {
        return Ok(None);
    }

    let observer = OneShotObserver::new(
        config.reveal_threshold,
        &root_margin(config.reveal_bottom_margin),
        |el| dom::set_class(&el, VISIBLE_CLASS, true),
    )?;
    for el in &targets {
        observer.observe(el);
    }
    log::debug!("Observing {} reveal elements", targets.len());

    let mut effect = Effect::new("reveal");
    effect.observe(observer);
    Ok(Some(effect))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margin_deflates_bottom_only() {
        assert_eq!(root_margin(60.0), "0px 0px -60px 0px");
        assert_eq!(root_margin(12.5), "0px 0px -12.5px 0px");
    }
}
