use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, MouseEvent, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, Listener};

pub const HOST_SELECTOR: &str = ".hero-bg-shapes";
pub const GLOW_CLASS: &str = "cursor-glow";

/// Inline style for a glow `2 * radius` across, so `glow_origin` centers it.
pub fn glow_style(radius: f64) -> String {
    let size = radius * 2.0;
    format!(
        "position: fixed; width: {size}px; height: {size}px; border-radius: 50%; \
         background: radial-gradient(circle, rgba(34, 197, 94, 0.04) 0%, transparent 70%); \
         pointer-events: none; z-index: 0; transition: transform 0.15s ease-out;"
    )
}

/// Top-left corner that centers a glow of `radius` on the pointer.
pub fn glow_origin(client_x: f64, client_y: f64, radius: f64) -> (f64, f64) {
    (client_x - radius, client_y - radius)
}

struct CursorGlow {
    document: Document,
    host: Element,
    radius: f64,
    glow: Option<HtmlElement>,
}

impl CursorGlow {
    /// The single glow element, adopted from the markup or created on first use.
    fn get_or_create(&mut self) -> Result<&HtmlElement, JsValue> {
        let glow = match self.glow.take() {
            Some(glow) => glow,
            None => self.adopt_or_create()?,
        };
        Ok(&*self.glow.insert(glow))
    }

    fn adopt_or_create(&self) -> Result<HtmlElement, JsValue> {
        let selector = format!(".{}", GLOW_CLASS);
        if let Some(existing) = self.host.query_selector(&selector)? {
            return existing.dyn_into::<HtmlElement>().map_err(JsValue::from);
        }

        let div = self.document.create_element("div")?;
        div.set_class_name(GLOW_CLASS);
        div.set_attribute("style", &glow_style(self.radius))?;
        self.host.append_child(&div)?;
        log::debug!("Created cursor glow");
        div.dyn_into::<HtmlElement>().map_err(JsValue::from)
    }
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    let Some(host) = document.query_selector(HOST_SELECTOR)? else {
        return Ok(None);
    };
    if !dom::has_fine_pointer(window) {
        return Ok(None);
    }

    let radius = config.cursor_glow_radius;
    let mut glow = CursorGlow {
        document: document.clone(),
        host,
        radius,
        glow: None,
    };

    let listener = Listener::passive(document, "mousemove", move |e: MouseEvent| {
        let Ok(el) = glow.get_or_create() else {
            return;
        };
        let (left, top) = glow_origin(e.client_x() as f64, e.client_y() as f64, radius);
        dom::set_style(el, "left", &format!("{}px", left));
        dom::set_style(el, "top", &format!("{}px", top));
    })?;

    Ok(Some(Effect::new("cursor_glow").with_listener(listener)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_is_centered_on_pointer() {
        assert_eq!(glow_origin(640.0, 360.0, 200.0), (440.0, 160.0));
        assert_eq!(glow_origin(50.0, 20.0, 200.0), (-150.0, -180.0));
    }

    #[test]
    fn default_radius_gives_400px_glow() {
        let style = glow_style(200.0);
        assert!(style.contains("width: 400px; height: 400px;"));
        assert!(style.contains("pointer-events: none"));
    }

    #[test]
    fn size_follows_radius_so_glow_stays_centered() {
        let radius = 120.0;
        let style = glow_style(radius);
        assert!(style.contains("width: 240px; height: 240px;"));
        // Top-left corner sits one radius up and left of the pointer: half the size.
        assert_eq!(glow_origin(500.0, 300.0, radius), (380.0, 180.0));
    }
}
