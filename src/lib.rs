//! Kitty Card core crate.
//!
//! An animated greeting card rendered on canvases: kitties float up the
//! page background, clicking the cake reveals a wish panel with confetti and a
//! dancing kitty, and ambient meows play at random intervals. Each piece is a
//! self-contained component driven by its own frame or timer chain;
//! `start_card()` wires them to the page.

use wasm_bindgen::prelude::*;

pub mod assets;
pub mod config;
pub mod error;
pub mod reveal;
pub mod rng;
pub mod scene;
pub mod scheduler;
pub mod sound;
pub mod surface;
pub mod web;

pub use config::CardConfig;
pub use error::CardError;

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

// -----------------------------------------------------------------------------
// Entrypoints
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_card() -> Result<(), JsValue> {
    web::start(CardConfig::default()).map_err(Into::into)
}

/// Start with a JSON override of [`CardConfig`]; absent fields keep their
/// defaults.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_card_with_config(json: &str) -> Result<(), JsValue> {
    let config = CardConfig::from_json(json)?;
    web::start(config).map_err(Into::into)
}

pub(crate) fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
