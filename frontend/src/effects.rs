use log::{debug, info, warn};
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::config::SiteConfig;
use crate::dom::Effect;

pub mod active_link;
pub mod anchor_scroll;
pub mod counter;
pub mod cursor_glow;
pub mod hero;
pub mod hover;
pub mod mobile_cta;
pub mod mobile_menu;
pub mod navbar;
pub mod newsletter;
pub mod parallax;
pub mod reveal;

type Mount = fn(&Window, &Document, &SiteConfig) -> Result<Option<Effect>, JsValue>;

/// Mount order follows the page from top to bottom. Components do not depend
/// on each other.
const MOUNTS: [(&str, Mount); 12] = [
    ("navbar", navbar::mount),
    ("mobile_menu", mobile_menu::mount),
    ("reveal", reveal::mount),
    ("counter", counter::mount),
    ("parallax", parallax::mount),
    ("anchor_scroll", anchor_scroll::mount),
    ("active_link", active_link::mount),
    ("hover", hover::mount),
    ("newsletter", newsletter::mount),
    ("hero", hero::mount),
    ("cursor_glow", cursor_glow::mount),
    ("mobile_cta", mobile_cta::mount),
];

/// All effects attached to the current page.
pub struct Page {
    effects: Vec<Effect>,
}

impl Page {
    /// Mounts every component. A component whose markup is missing is skipped;
    /// one that fails to attach is logged and skipped without affecting the rest.
    pub fn mount(window: &Window, document: &Document, config: &SiteConfig) -> Self {
        let mut effects = Vec::with_capacity(MOUNTS.len());
        for (name, mount) in MOUNTS {
            match mount(window, document, config) {
                Ok(Some(effect)) => {
                    debug!("Mounted {}", effect.name());
                    effects.push(effect);
                }
                Ok(None) => debug!("Skipped {}: nothing to attach to", name),
                Err(e) => warn!("Failed to mount {}: {:?}", name, e),
            }
        }
        info!("Mounted {} of {} page effects", effects.len(), MOUNTS.len());
        Self { effects }
    }

    pub fn teardown(self) {
        for effect in self.effects {
            effect.teardown();
        }
    }
}
