//! Image loading gated on completion.
//!
//! A set of images is handed to its consumer only after every one of them has
//! fired `load`. A failed image never fires, so its consumer never starts.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

use crate::error::CardResult;

/// Counts outstanding loads and fires its callback once, when the last one
/// completes.
pub struct LoadGate {
    remaining: usize,
    on_ready: Option<Box<dyn FnOnce()>>,
}

impl LoadGate {
    pub fn new(count: usize, on_ready: impl FnOnce() + 'static) -> Self {
        Self {
            remaining: count,
            on_ready: Some(Box::new(on_ready)),
        }
    }

    /// Record one completed load. Returns `true` if this call fired the
    /// callback.
    pub fn mark_loaded(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            if let Some(f) = self.on_ready.take() {
                f();
                return true;
            }
        }
        false
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

/// Start loading `urls`; `on_ready` receives the images in the same order
/// once all of them have loaded.
pub fn load_images<F>(urls: &[&str], on_ready: F) -> CardResult<()>
where
    F: FnOnce(Vec<HtmlImageElement>) + 'static,
{
    let mut images = Vec::with_capacity(urls.len());
    for _ in urls {
        images.push(HtmlImageElement::new()?);
    }
    let handed = images.clone();
    let gate = Rc::new(RefCell::new(LoadGate::new(urls.len(), move || on_ready(handed))));

    for (img, url) in images.iter().zip(urls) {
        let gate = gate.clone();
        let onload = Closure::once_into_js(move || {
            gate.borrow_mut().mark_loaded();
        });
        img.set_onload(Some(onload.unchecked_ref()));
        img.set_src(url);
    }
    Ok(())
}
