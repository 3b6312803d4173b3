//! Frame and timer scheduling on top of `requestAnimationFrame` / `setTimeout`.
//!
//! Every recurring chain carries a [`CancelToken`]; a cancelled chain does not
//! request another frame (or re-arm its timer) and simply stops.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::error::{CardError, CardResult};

#[derive(Clone, Debug, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Handle to a running frame loop.
#[derive(Clone, Debug)]
pub struct LoopHandle {
    token: CancelToken,
}

impl LoopHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Call `tick(timestamp_ms)` on every animation frame until cancelled.
pub fn start_frame_loop<F>(mut tick: F) -> CardResult<LoopHandle>
where
    F: FnMut(f64) + 'static,
{
    let token = CancelToken::new();
    let loop_token = token.clone();
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if loop_token.is_cancelled() {
            return;
        }
        tick(ts);
        if let Some(cb) = f.borrow().as_ref() {
            request_frame(cb);
        }
    }) as Box<dyn FnMut(f64)>));

    match g.borrow().as_ref() {
        Some(cb) => request_frame(cb),
        None => return Err(CardError::Js("frame callback missing".into())),
    }
    Ok(LoopHandle { token })
}

fn request_frame(cb: &Closure<dyn FnMut(f64)>) {
    if let Some(w) = window() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Run `f` once after `delay_ms`.
pub fn after<F>(delay_ms: f64, f: F) -> CardResult<()>
where
    F: FnOnce() + 'static,
{
    let win = window().ok_or(CardError::NoWindow)?;
    let cb = Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.unchecked_ref(),
        delay_ms.round() as i32,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let handle = LoopHandle { token: token.clone() };
        assert!(handle.is_running());
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(!handle.is_running());
    }
}
