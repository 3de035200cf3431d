use log::{debug, warn};
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` block a page can use
/// to override any of the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> log::Level {
    log::Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> log::Level {
    log::Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Address the contact form's mailto link is addressed to.
    pub recipient: String,
    /// Name used in the greeting line of the generated email body.
    pub recipient_name: String,
    pub organization: String,
    /// Height of the fixed header, subtracted from anchor scroll targets.
    pub header_offset_px: f64,
    /// How far above a section's top it already counts as current.
    pub section_lead_px: f64,
    /// Scroll offset past which the navbar switches to its shaded look.
    pub scrolled_threshold_px: f64,
    pub scroll_throttle_ms: u32,
    pub reset_delay_ms: u32,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: u32,
    pub reveal_selectors: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            recipient: "tonygardiner82@gmail.com".to_string(),
            recipient_name: "Tony".to_string(),
            organization: "Intuitive Movement".to_string(),
            header_offset_px: 80.0,
            section_lead_px: 100.0,
            scrolled_threshold_px: 50.0,
            scroll_throttle_ms: 16,
            reset_delay_ms: 3000,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50,
            reveal_selectors: [
                ".audience-card",
                ".point",
                ".benefit-item",
                ".contact-item",
                ".about-text",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl SiteConfig {
    /// Parses an override block. Keys that are absent keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the override block from the page if there is one, falling back
    /// to the defaults when it is missing or malformed.
    pub fn from_document(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => {
                debug!("Loaded site config overrides from #{}", CONFIG_ELEMENT_ID);
                config
            }
            Err(e) => {
                warn!("Ignoring malformed #{} block: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }

    pub fn reveal_selector(&self) -> String {
        self.reveal_selectors.join(", ")
    }
}
