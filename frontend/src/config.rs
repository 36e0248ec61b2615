use log::Level;
use serde::Deserialize;
use web_sys::Document;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose mount logs when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Id of the optional `<script type="application/json">` block that can
/// override any of the values below.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

/// Thresholds and constants for every page effect. Missing keys in the page
/// override fall back to these defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub navbar_scrolled_after: f64,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin: f64,
    pub counter_threshold: f64,
    pub counter_duration_ms: f64,
    pub parallax_min_width: f64,
    pub anchor_offset: f64,
    pub active_link_lookahead: f64,
    pub tilt_max_deg: f64,
    pub tilt_lift: f64,
    pub magnetic_strength: f64,
    pub newsletter_revert_ms: u32,
    pub indicator_fade_distance: f64,
    pub hero_fade_start: f64,
    pub hero_fade_end: f64,
    pub hero_min_opacity: f64,
    pub cursor_glow_radius: f64,
    pub mobile_cta_ratio: f64,
    /// BCP 47 tag for counter digit grouping. Falls back to the browser's
    /// language when unset.
    pub number_locale: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            navbar_scrolled_after: 50.0,
            reveal_threshold: 0.15,
            reveal_bottom_margin: 60.0,
            counter_threshold: 0.5,
            counter_duration_ms: 2000.0,
            parallax_min_width: 768.0,
            anchor_offset: 20.0,
            active_link_lookahead: 200.0,
            tilt_max_deg: 4.0,
            tilt_lift: 6.0,
            magnetic_strength: 0.15,
            newsletter_revert_ms: 3000,
            indicator_fade_distance: 300.0,
            hero_fade_start: 0.3,
            hero_fade_end: 0.7,
            hero_min_opacity: 0.6,
            cursor_glow_radius: 200.0,
            mobile_cta_ratio: 0.6,
            number_locale: None,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the override block from the page, if any. Bad JSON is logged and
    /// the defaults are used instead.
    pub fn from_document(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => {
                log::debug!("Loaded site config override");
                config
            }
            Err(e) => {
                log::warn!("Ignoring invalid #{} block: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = SiteConfig::from_json(r#"{"navbar_scrolled_after": 80, "number_locale": "fi-FI"}"#)
            .unwrap();
        assert_eq!(config.navbar_scrolled_after, 80.0);
        assert_eq!(config.number_locale.as_deref(), Some("fi-FI"));
        assert_eq!(config.counter_duration_ms, 2000.0);
        assert_eq!(config.newsletter_revert_ms, 3000);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = SiteConfig::from_json(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SiteConfig::from_json("{navbar").is_err());
    }
}
