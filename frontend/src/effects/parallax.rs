use wasm_bindgen::JsValue;
use web_sys::{Document, Event, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, Listener};

pub const SHAPE_SELECTOR: &str = ".hero-shape";
pub const FLOATING_SELECTOR: &str = ".floating-samosa";

pub fn shape_offset(index: usize, scroll_y: f64) -> f64 {
    scroll_y * (0.03 + index as f64 * 0.015)
}

/// Vertical offset and rotation in degrees. Even items turn clockwise, odd
/// items counter-clockwise.
pub fn floating_offset(index: usize, scroll_y: f64) -> (f64, f64) {
    let speed = 0.02 + index as f64 * 0.01;
    let direction = if index % 2 == 0 { 1.0 } else { -1.0 };
    (scroll_y * speed, scroll_y * 0.02 * direction)
}

pub fn is_active(scroll_y: f64, viewport_height: f64) -> bool {
    scroll_y <= viewport_height
}

pub fn shape_transform(offset: f64) -> String {
    format!("translateY({}px)", offset)
}

pub fn floating_transform((offset, rotate): (f64, f64)) -> String {
    format!("translateY({}px) rotate({}deg)", offset, rotate)
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    if dom::inner_width(window) <= config.parallax_min_width {
        log::debug!("Narrow viewport, parallax disabled");
        return Ok(None);
    }

    let shapes = dom::query_html(document, SHAPE_SELECTOR)?;
    let floating = dom::query_html(document, FLOATING_SELECTOR)?;
    if shapes.is_empty() && floating.is_empty() {
        return Ok(None);
    }

    let win = window.clone();
    let listener = Listener::passive(window, "scroll", move |_: Event| {
        let scroll_y = dom::scroll_y(&win);
        if !is_active(scroll_y, dom::inner_height(&win)) {
            return;
        }
        for (i, shape) in shapes.iter().enumerate() {
            dom::set_style(shape, "transform", &shape_transform(shape_offset(i, scroll_y)));
        }
        for (i, item) in floating.iter().enumerate() {
            dom::set_style(item, "transform", &floating_transform(floating_offset(i, scroll_y)));
        }
    })?;

    Ok(Some(Effect::new("parallax").with_listener(listener)))
}
