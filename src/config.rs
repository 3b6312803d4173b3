//! Card configuration: element ids, asset URLs and pool sizes.
//!
//! `CardConfig::default()` reproduces the stock card. With the `serde_json`
//! feature a JSON object can override any subset of fields.

#[cfg(feature = "serde")]
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CardConfig {
    // --- DOM ids ---
    pub background_canvas_id: String,
    pub cake_canvas_id: String,
    pub dancer_canvas_id: String,
    pub initial_panel_id: String,
    pub wish_panel_id: String,
    // --- Assets ---
    pub open_eyes_url: String,
    pub blink_url: String,
    pub paw_url: String,
    pub dancer_url: String,
    pub sound_urls: Vec<String>,
    // --- Tuning ---
    pub sprite_count: usize,
    pub confetti_count: usize,
    pub sound_volume: f64,
    /// Re-arm delay after each sound is `min + [0, spread)` ms.
    pub sound_delay_min_ms: f64,
    pub sound_delay_spread_ms: f64,
    /// Fixed seed for reproducible runs; `None` seeds from the platform.
    pub seed: Option<u64>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            background_canvas_id: "kittyCanvas".into(),
            cake_canvas_id: "cake-canvas".into(),
            dancer_canvas_id: "dancing-kitty".into(),
            initial_panel_id: "card".into(),
            wish_panel_id: "wish-place".into(),
            open_eyes_url: "https://i.imgur.com/OvMZBs9.png".into(),
            blink_url: "https://i.imgur.com/0x9Rdx0.png".into(),
            paw_url: "https://i.imgur.com/73Fv0bN.png".into(),
            dancer_url: "https://i.imgur.com/OvMZBs9.png".into(),
            sound_urls: vec![
                "https://actions.google.com/sounds/v1/animals/cat_purr_close.ogg".into(),
                "https://actions.google.com/sounds/v1/animals/cat_meow.ogg".into(),
                "https://actions.google.com/sounds/v1/animals/cat_purring.ogg".into(),
            ],
            sprite_count: 30,
            confetti_count: 100,
            sound_volume: 0.15,
            sound_delay_min_ms: 3000.0,
            sound_delay_spread_ms: 4000.0,
            seed: None,
        }
    }
}

#[cfg(feature = "serde_json")]
impl CardConfig {
    /// Parse a (possibly partial) JSON override.
    pub fn from_json(json: &str) -> Result<Self, crate::CardError> {
        Ok(serde_json::from_str(json)?)
    }
}
