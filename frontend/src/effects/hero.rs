use wasm_bindgen::JsValue;
use web_sys::{Document, Event, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, Listener};

pub const HERO_ID: &str = "hero";
pub const INDICATOR_SELECTOR: &str = ".scroll-indicator";

/// Scroll indicator fades out linearly over the first `distance` pixels.
pub fn indicator_opacity(scroll_y: f64, distance: f64) -> f64 {
    (1.0 - scroll_y / distance).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeroFade {
    /// Fraction of the hero height where fading begins.
    pub start: f64,
    /// Fraction of the hero height where the floor is reached.
    pub end: f64,
    pub min_opacity: f64,
}

impl HeroFade {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            start: config.hero_fade_start,
            end: config.hero_fade_end,
            min_opacity: config.hero_min_opacity,
        }
    }

    pub fn opacity(&self, scroll_y: f64, hero_height: f64) -> f64 {
        let fade_start = hero_height * self.start;
        let fade_end = hero_height * self.end;
        if scroll_y <= fade_start {
            return 1.0;
        }
        let progress = ((scroll_y - fade_start) / (fade_end - fade_start)).min(1.0);
        1.0 - progress * (1.0 - self.min_opacity)
    }
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    let hero = dom::html_by_id(document, HERO_ID);
    let indicator = dom::first_html(document, INDICATOR_SELECTOR)?;
    if hero.is_none() && indicator.is_none() {
        return Ok(None);
    }

    let fade = HeroFade::from_config(config);
    let fade_distance = config.indicator_fade_distance;

    let update = move |scroll_y: f64| {
        if let Some(indicator) = &indicator {
            let opacity = indicator_opacity(scroll_y, fade_distance);
            dom::set_style(indicator, "opacity", &opacity.to_string());
        }
        if let Some(hero) = &hero {
            let height = hero.offset_height() as f64;
            dom::set_style(hero, "opacity", &fade.opacity(scroll_y, height).to_string());
        }
    };
    update(dom::scroll_y(window));

    let win = window.clone();
    let listener = Listener::passive(window, "scroll", move |_: Event| update(dom::scroll_y(&win)))?;

    Ok(Some(Effect::new("hero").with_listener(listener)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE: HeroFade = HeroFade {
        start: 0.3,
        end: 0.7,
        min_opacity: 0.6,
    };

    #[test]
    fn indicator_fades_over_300px() {
        assert_eq!(indicator_opacity(0.0, 300.0), 1.0);
        assert_eq!(indicator_opacity(150.0, 300.0), 0.5);
        assert_eq!(indicator_opacity(300.0, 300.0), 0.0);
        assert_eq!(indicator_opacity(1200.0, 300.0), 0.0);
    }

    #[test]
    fn hero_fully_opaque_until_fade_start() {
        let h = 1000.0;
        for y in [0.0, 100.0, 299.0, h * 0.3] {
            assert_eq!(FADE.opacity(y, h), 1.0, "at {y}");
        }
    }

    #[test]
    fn hero_floors_at_fade_end() {
        let h = 1000.0;
        for y in [h * 0.7, 800.0, 5000.0] {
            assert_eq!(FADE.opacity(y, h), 0.6, "at {y}");
        }
    }

    #[test]
    fn zero_height_hero_floors_once_scrolled() {
        assert_eq!(FADE.opacity(0.0, 0.0), 1.0);
        assert_eq!(FADE.opacity(1.0, 0.0), 0.6);
        assert_eq!(FADE.opacity(400.0, 0.0), 0.6);
    }

    #[test]
    fn hero_is_linear_between() {
        let h = 1000.0;
        let mid = FADE.opacity(500.0, h);
        assert!((mid - 0.8).abs() < 1e-9);
        let a = FADE.opacity(400.0, h);
        let b = FADE.opacity(600.0, h);
        assert!(((a + b) / 2.0 - mid).abs() < 1e-9);
        assert!(a > mid && mid > b);
    }
}
