//! Site behavior configuration.
//!
//! Handles loading, validating, and merging `vitrine.toml`. Stock defaults are
//! the values the live site ships with; a user file overrides only the keys it
//! names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [carousel]
//! total_slides = 4
//! auto_advance_ms = 5000      # Interval between automatic slide changes
//! resume_delay_ms = 10000     # Pause after a manual interaction
//! swipe_threshold_px = 50.0   # Horizontal travel needed to count as a swipe
//! resume_policy = "supersede" # or "stack"
//!
//! [carousel.anchors]
//! track = "services-track"
//! prev = "services-prev"
//! next = "services-next"
//! indicators = "services-indicators"
//! container = "services-carousel"
//!
//! [navbar]
//! reveal_margin_px = 100.0
//!
//! [scroll]
//! scroll_up_threshold_px = 300.0
//! scroll_hint_fraction = 0.3
//! parallax_factor = 0.5
//! anchor_offset_px = 20.0
//! reveal_threshold = 0.1
//! reveal_bottom_margin_px = 50.0
//! reveal_offset_px = 30.0
//!
//! [contact]
//! name = "Extintores Villarrica"
//! phones = ["+56991864681", "+56993811272"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "vitrine.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level configuration loaded from `vitrine.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Services carousel timing, swipe and markup anchors.
    pub carousel: CarouselConfig,
    /// Header hide/show behavior.
    pub navbar: NavbarConfig,
    /// Scroll hint, parallax, scroll-up button and anchor links.
    pub scroll: ScrollConfig,
    /// Business contact data.
    pub contact: ContactConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.carousel;
        if c.total_slides == 0 {
            return Err(ConfigError::Validation(
                "carousel.total_slides must be at least 1".into(),
            ));
        }
        if c.auto_advance_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.auto_advance_ms must be non-zero".into(),
            ));
        }
        if c.swipe_threshold_px.is_nan() || c.swipe_threshold_px < 0.0 {
            return Err(ConfigError::Validation(
                "carousel.swipe_threshold_px must be >= 0".into(),
            ));
        }
        for (key, value) in c.anchors.entries() {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "carousel.anchors.{key} must not be empty"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.scroll.scroll_hint_fraction) {
            return Err(ConfigError::Validation(
                "scroll.scroll_hint_fraction must be within 0-1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.scroll.reveal_threshold) {
            return Err(ConfigError::Validation(
                "scroll.reveal_threshold must be within 0-1".into(),
            ));
        }
        if c.total_slides != self.contact.services.len() {
            return Err(ConfigError::Validation(format!(
                "carousel.total_slides is {} but contact.services lists {} services",
                c.total_slides,
                self.contact.services.len()
            )));
        }
        if self.contact.phones.is_empty() {
            return Err(ConfigError::Validation(
                "contact.phones must list at least one number".into(),
            ));
        }
        Ok(())
    }
}

/// What happens to an already pending resume when another manual interaction
/// arrives inside the resume window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumePolicy {
    /// Cancel the pending resume and arm a fresh one.
    #[default]
    Supersede,
    /// Leave earlier resumes armed; the first to fire restarts auto-advance.
    Stack,
}

/// Services carousel settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub total_slides: usize,
    pub auto_advance_ms: u64,
    pub resume_delay_ms: u64,
    /// Swipes must travel strictly more than this.
    pub swipe_threshold_px: f64,
    pub resume_policy: ResumePolicy,
    pub anchors: AnchorIds,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            total_slides: 4,
            auto_advance_ms: 5000,
            resume_delay_ms: 10000,
            swipe_threshold_px: 50.0,
            resume_policy: ResumePolicy::Supersede,
            anchors: AnchorIds::default(),
        }
    }
}

/// Element ids the carousel binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnchorIds {
    pub track: String,
    pub prev: String,
    pub next: String,
    /// Parent of the `.indicator` elements.
    pub indicators: String,
    /// Hover and touch target.
    pub container: String,
}

impl AnchorIds {
    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("track", &self.track),
            ("prev", &self.prev),
            ("next", &self.next),
            ("indicators", &self.indicators),
            ("container", &self.container),
        ]
    }
}

impl Default for AnchorIds {
    fn default() -> Self {
        Self {
            track: "services-track".to_string(),
            prev: "services-prev".to_string(),
            next: "services-next".to_string(),
            indicators: "services-indicators".to_string(),
            container: "services-carousel".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavbarConfig {
    /// Distance past the hero before scrolling down hides the header.
    pub reveal_margin_px: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            reveal_margin_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Scroll offset above which the scroll-up button is shown.
    pub scroll_up_threshold_px: f64,
    /// Fraction of the hero height after which the scroll-down hint fades.
    pub scroll_hint_fraction: f64,
    /// Hero translation per pixel scrolled.
    pub parallax_factor: f64,
    /// Extra gap left above a section when following an in-page link.
    pub anchor_offset_px: f64,
    /// Visible fraction of a card needed before it fades in.
    pub reveal_threshold: f64,
    /// Strip at the bottom of the window that does not count as visible.
    pub reveal_bottom_margin_px: f64,
    /// How far below its resting place a hidden card sits.
    pub reveal_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            scroll_up_threshold_px: 300.0,
            scroll_hint_fraction: 0.3,
            parallax_factor: 0.5,
            anchor_offset_px: 20.0,
            reveal_threshold: 0.1,
            reveal_bottom_margin_px: 50.0,
            reveal_offset_px: 30.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    pub name: String,
    pub address: String,
    /// First entry is the WhatsApp number.
    pub phones: Vec<String>,
    pub schedule: Schedule,
    pub services: Vec<String>,
    /// Prefilled WhatsApp message.
    pub whatsapp_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Schedule {
    pub morning: String,
    pub afternoon: String,
    pub days: String,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            morning: "9:30 - 14:00 hrs".to_string(),
            afternoon: "16:30 - 19:00 hrs".to_string(),
            days: "Lunes a Viernes".to_string(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            name: "Extintores Villarrica".to_string(),
            address: "Colo Colo 1410, Villarrica".to_string(),
            phones: vec!["+56991864681".to_string(), "+56993811272".to_string()],
            schedule: Schedule::default(),
            services: vec![
                "Venta de extintores".to_string(),
                "Mantención de equipos".to_string(),
                "Recarga de extintores".to_string(),
                "Asesoría en seguridad".to_string(),
            ],
            whatsapp_message: "¡Hola! Me interesa conocer más sobre sus servicios de extintores. \
                               ¿Podrían brindarme información?"
                .to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `vitrine.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no config file.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `vitrine.toml` in the given directory.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(load_raw_config(dir)?)
}

/// Returns a fully-commented stock `vitrine.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Vitrine Configuration
# =====================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Services carousel
# ---------------------------------------------------------------------------
[carousel]
# Number of slides laid out side by side in the track. Must equal the
# number of entries in contact.services, one slide per service.
total_slides = 4

# Milliseconds between automatic advances.
auto_advance_ms = 5000

# Milliseconds auto-advance stays paused after a click, key press or swipe.
resume_delay_ms = 10000

# A touch must travel strictly more than this many pixels to count as a swipe.
swipe_threshold_px = 50.0

# "supersede": every manual interaction restarts the pause window.
# "stack": earlier pending resumes still fire on their own schedule.
resume_policy = "supersede"

# Element ids the carousel binds to. track, prev and next are required
# in the page; indicators and container are optional.
[carousel.anchors]
track = "services-track"
prev = "services-prev"
next = "services-next"
indicators = "services-indicators"
container = "services-carousel"

# ---------------------------------------------------------------------------
# Navbar
# ---------------------------------------------------------------------------
[navbar]
# How far past the hero the page must scroll down before the header hides.
reveal_margin_px = 100.0

# ---------------------------------------------------------------------------
# Scroll effects
# ---------------------------------------------------------------------------
[scroll]
# Show the floating scroll-up button past this offset.
scroll_up_threshold_px = 300.0

# Hide the scroll-down hint once this fraction of the hero has scrolled by.
scroll_hint_fraction = 0.3

# Hero translation per pixel scrolled.
parallax_factor = 0.5

# Gap kept above a section when following an in-page link.
anchor_offset_px = 20.0

# Cards (.feature, .service-card, .product-card, .contact-item) start hidden
# and fade in once this fraction of them is on screen.
reveal_threshold = 0.1

# The bottom strip of the window that does not count as on screen.
reveal_bottom_margin_px = 50.0

# Hidden cards sit this many pixels below their resting place.
reveal_offset_px = 30.0

# ---------------------------------------------------------------------------
# Contact
# ---------------------------------------------------------------------------
[contact]
name = "Extintores Villarrica"
address = "Colo Colo 1410, Villarrica"
# The first number is used for the WhatsApp button.
phones = ["+56991864681", "+56993811272"]
services = [
    "Venta de extintores",
    "Mantención de equipos",
    "Recarga de extintores",
    "Asesoría en seguridad",
]
whatsapp_message = "¡Hola! Me interesa conocer más sobre sus servicios de extintores. ¿Podrían brindarme información?"

[contact.schedule]
morning = "9:30 - 14:00 hrs"
afternoon = "16:30 - 19:00 hrs"
days = "Lunes a Viernes"
"##
}
