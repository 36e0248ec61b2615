use wasm_bindgen::JsValue;
use web_sys::{Document, DomRect, HtmlElement, MouseEvent, Window};

use crate::config::SiteConfig;
use crate::dom::{self, Effect, Listener};

pub const TILT_SELECTOR: &str = ".menu-card:not(.menu-card-cta)";
pub const MAGNETIC_SELECTOR: &str = ".btn-primary, .btn-outline";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl From<DomRect> for Bounds {
    fn from(rect: DomRect) -> Self {
        Self {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        }
    }
}

impl Bounds {
    /// Pointer offset from the center of the box.
    pub fn offset_from_center(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (
            client_x - self.left - self.width / 2.0,
            client_y - self.top - self.height / 2.0,
        )
    }
}

/// `(rotateX, rotateY)` in degrees, reaching `±max_deg` at the card edges.
pub fn tilt_angles(bounds: &Bounds, client_x: f64, client_y: f64, max_deg: f64) -> (f64, f64) {
    let (dx, dy) = bounds.offset_from_center(client_x, client_y);
    let half_w = bounds.width / 2.0;
    let half_h = bounds.height / 2.0;
    let rotate_x = if half_h > 0.0 { (dy / half_h) * -max_deg } else { 0.0 };
    let rotate_y = if half_w > 0.0 { (dx / half_w) * max_deg } else { 0.0 };
    (rotate_x, rotate_y)
}

pub fn tilt_transform((rotate_x, rotate_y): (f64, f64), lift: f64) -> String {
    format!(
        "translateY(-{}px) perspective(800px) rotateX({}deg) rotateY({}deg)",
        lift, rotate_x, rotate_y
    )
}

pub fn magnetic_offset(bounds: &Bounds, client_x: f64, client_y: f64, strength: f64) -> (f64, f64) {
    let (dx, dy) = bounds.offset_from_center(client_x, client_y);
    (dx * strength, dy * strength)
}

pub fn magnetic_transform((x, y): (f64, f64)) -> String {
    format!("translate({}px, {}px)", x, y)
}

fn bind<F>(effect: &mut Effect, element: HtmlElement, transform: F) -> Result<(), JsValue>
where
    F: Fn(Bounds, f64, f64) -> String + 'static,
{
    let target = element.clone();
    effect.listen(Listener::passive(&element, "mousemove", move |e: MouseEvent| {
        let bounds = Bounds::from(target.get_bounding_client_rect());
        let value = transform(bounds, e.client_x() as f64, e.client_y() as f64);
        dom::set_style(&target, "transform", &value);
    })?);

    let target = element.clone();
    effect.listen(Listener::new(&element, "mouseleave", move |_: MouseEvent| {
        dom::clear_style(&target, "transform");
    })?);
    Ok(())
}

pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Result<Option<Effect>, JsValue> {
    if !dom::has_fine_pointer(window) {
        log::debug!("Coarse pointer, tilt and magnetic effects disabled");
        return Ok(None);
    }

    let cards = dom::query_html(document, TILT_SELECTOR)?;
    let buttons = dom::query_html(document, MAGNETIC_SELECTOR)?;
    if cards.is_empty() && buttons.is_empty() {
        return Ok(None);
    }

    let mut effect = Effect::new("hover");
    let (max_deg, lift) = (config.tilt_max_deg, config.tilt_lift);
    for card in cards {
        bind(&mut effect, card, move |bounds, x, y| {
            tilt_transform(tilt_angles(&bounds, x, y, max_deg), lift)
        })?;
    }

    let strength = config.magnetic_strength;
    for button in buttons {
        bind(&mut effect, button, move |bounds, x, y| {
            magnetic_transform(magnetic_offset(&bounds, x, y, strength))
        })?;
    }

    Ok(Some(effect))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Bounds = Bounds {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 100.0,
    };

    #[test]
    fn center_is_neutral() {
        assert_eq!(tilt_angles(&CARD, 200.0, 100.0, 4.0), (0.0, 0.0));
        assert_eq!(magnetic_offset(&CARD, 200.0, 100.0, 0.15), (0.0, 0.0));
    }

    #[test]
    fn edges_reach_max_tilt() {
        // Bottom-right corner tips the card away on X and toward on Y.
        assert_eq!(tilt_angles(&CARD, 300.0, 150.0, 4.0), (-4.0, 4.0));
        assert_eq!(tilt_angles(&CARD, 100.0, 50.0, 4.0), (4.0, -4.0));
    }

    #[test]
    fn degenerate_box_does_not_divide_by_zero() {
        let empty = Bounds { left: 0.0, top: 0.0, width: 0.0, height: 0.0 };
        assert_eq!(tilt_angles(&empty, 10.0, 10.0, 4.0), (0.0, 0.0));
    }

    #[test]
    fn magnetic_pulls_fifteen_percent() {
        let (x, y) = magnetic_offset(&CARD, 300.0, 50.0, 0.15);
        assert!((x - 15.0).abs() < 1e-9);
        assert!((y + 7.5).abs() < 1e-9);
    }

    #[test]
    fn transforms_render_css() {
        assert_eq!(
            tilt_transform((-2.0, 4.0), 6.0),
            "translateY(-6px) perspective(800px) rotateX(-2deg) rotateY(4deg)"
        );
        assert_eq!(magnetic_transform((15.0, -7.5)), "translate(15px, -7.5px)");
    }
}
