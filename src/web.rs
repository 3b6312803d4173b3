//! Browser wiring: finds the card's elements, builds each component on its
//! own surface and hooks the components to frames, timers and DOM events.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, Window, window};

use crate::assets::load_images;
use crate::config::CardConfig;
use crate::error::{CardError, CardResult};
use crate::reveal::{Panels, RevealController};
use crate::rng::Rng;
use crate::scene::{ConfettiBurst, DancingSprite, SpriteField, SpriteImages, draw_cake};
use crate::scheduler::start_frame_loop;
use crate::sound::{SoundCycler, load_clips};
use crate::surface::{CanvasSurface, Surface};

const CONFETTI_STYLE: &str =
    "position:absolute; top:0; left:0; width:100%; height:100%; pointer-events:none; z-index:25;";

/// Panels backed by live DOM elements.
pub struct DomPanels {
    initial: HtmlElement,
    wish: HtmlElement,
}

impl Panels for DomPanels {
    fn hide_initial(&self) {
        self.initial.style().set_property("display", "none").ok();
    }
    fn show_wish(&self) {
        self.wish.style().set_property("display", "block").ok();
    }
    fn wish_size(&self) -> (u32, u32) {
        container_size(&self.wish)
    }
}

/// Match the full-window surface to the viewport and the confetti surface to
/// its container. Component state is not touched.
pub fn fit_surfaces<A: Surface, B: Surface>(
    background: &A,
    confetti: &B,
    viewport: (u32, u32),
    container: (u32, u32),
) {
    background.set_size(viewport.0, viewport.1);
    confetti.set_size(container.0, container.1);
}

pub fn start(config: CardConfig) -> CardResult<()> {
    let win = window().ok_or(CardError::NoWindow)?;
    let doc = win.document().ok_or(CardError::NoDocument)?;

    let mut root_rng = match config.seed {
        Some(seed) => Rng::new(seed),
        None => Rng::from_entropy(),
    };

    // Background canvas, sized to the viewport
    let background = CanvasSurface::new(element::<HtmlCanvasElement>(
        &doc,
        &config.background_canvas_id,
        "canvas",
    )?)?;
    let (vw, vh) = viewport_size(&win);
    background.set_size(vw, vh);

    // Cake, drawn once
    let cake_canvas: HtmlCanvasElement = element(&doc, &config.cake_canvas_id, "canvas")?;
    draw_cake(&CanvasSurface::new(cake_canvas.clone())?);

    // Confetti canvas lives inside the wish panel
    let wish: HtmlElement = element(&doc, &config.wish_panel_id, "element")?;
    let confetti_canvas: HtmlCanvasElement = doc
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| CardError::WrongElement("confetti".into(), "canvas"))?;
    confetti_canvas.set_attribute("style", CONFETTI_STYLE)?;
    wish.append_child(&confetti_canvas)?;
    let confetti_surface = CanvasSurface::new(confetti_canvas)?;
    let (cw, ch) = container_size(&wish);
    confetti_surface.set_size(cw, ch);

    let panels = DomPanels {
        initial: element(&doc, &config.initial_panel_id, "element")?,
        wish: wish.clone(),
    };

    // Resize keeps both surfaces matched to their containers
    {
        let background = background.clone();
        let confetti = confetti_surface.clone();
        let wish = wish.clone();
        listen(&win, "resize", move |_| {
            if let Some(w) = window() {
                fit_surfaces(&background, &confetti, viewport_size(&w), container_size(&wish));
            }
        })?;
    }

    let confetti = Rc::new(RefCell::new(ConfettiBurst::new(
        confetti_surface,
        config.confetti_count,
        root_rng.fork(),
    )));

    // Cake click reveals the wish
    {
        let mut reveal = RevealController::new();
        listen(&cake_canvas, "click", move |_| {
            let start_loop = reveal.trigger(&panels, &mut *confetti.borrow_mut());
            if start_loop {
                let confetti = confetti.clone();
                if let Err(e) = start_frame_loop(move |_| confetti.borrow_mut().tick()) {
                    log::warn!("confetti loop not started: {e}");
                }
            }
        })?;
    }

    // Floating kitties + meows once the three sprite images are in
    {
        let clips = load_clips(&config.sound_urls, config.sound_volume);
        let field_rng = root_rng.fork();
        let sound_rng = root_rng.fork();
        let count = config.sprite_count;
        let (delay_min, delay_spread) = (config.sound_delay_min_ms, config.sound_delay_spread_ms);
        let urls = [
            config.open_eyes_url.as_str(),
            config.blink_url.as_str(),
            config.paw_url.as_str(),
        ];
        load_images(&urls, move |mut imgs| {
            let (Some(paw), Some(blink), Some(open_eyes)) = (imgs.pop(), imgs.pop(), imgs.pop()) else {
                return;
            };
            log::info!("sprite images loaded; releasing {count} kitties");
            let images = SpriteImages { open_eyes, blink, paw };
            let mut field = SpriteField::new(background, images, count, field_rng);
            if let Err(e) = start_frame_loop(move |ts| field.tick(ts)) {
                log::warn!("sprite field loop not started: {e}");
            }
            SoundCycler::new(clips, sound_rng, delay_min, delay_spread).start();
        })?;
    }

    // Dancing kitty starts on its own image
    {
        let dancer_surface = CanvasSurface::new(element(&doc, &config.dancer_canvas_id, "canvas")?)?;
        load_images(&[config.dancer_url.as_str()], move |mut imgs| {
            let Some(img) = imgs.pop() else { return };
            let mut dancer = DancingSprite::new(dancer_surface, img);
            if let Err(e) = start_frame_loop(move |_| dancer.tick()) {
                log::warn!("dancer loop not started: {e}");
            }
        })?;
    }

    log::info!("kitty card started ({vw}x{vh})");
    Ok(())
}

fn element<T: JsCast>(doc: &Document, id: &str, kind: &'static str) -> CardResult<T> {
    doc.get_element_by_id(id)
        .ok_or_else(|| CardError::MissingElement(id.to_owned()))?
        .dyn_into::<T>()
        .map_err(|_| CardError::WrongElement(id.to_owned(), kind))
}

fn viewport_size(win: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
    (dim(win.inner_width()), dim(win.inner_height()))
}

fn container_size(el: &HtmlElement) -> (u32, u32) {
    (el.client_width().max(0) as u32, el.client_height().max(0) as u32)
}

fn listen<T, F>(target: &T, event: &str, handler: F) -> CardResult<()>
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target
        .as_ref()
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
