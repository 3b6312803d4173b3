//! Ambient meows: play a random clip, wait a random while, repeat.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{HtmlAudioElement, HtmlMediaElement};

use crate::error::CardResult;
use crate::rng::Rng;
use crate::scheduler;

/// Something that can be started playing without waiting for it.
pub trait Clip {
    fn play(&self) -> CardResult<()>;
}

impl Clip for HtmlAudioElement {
    fn play(&self) -> CardResult<()> {
        // The returned promise may reject (autoplay policy); nobody listens.
        HtmlMediaElement::play(self)?;
        Ok(())
    }
}

pub struct SoundCycler<C: Clip> {
    clips: Vec<C>,
    rng: Rng,
    delay_min_ms: f64,
    delay_spread_ms: f64,
}

impl<C: Clip> SoundCycler<C> {
    pub fn new(clips: Vec<C>, rng: Rng, delay_min_ms: f64, delay_spread_ms: f64) -> Self {
        Self {
            clips,
            rng,
            delay_min_ms,
            delay_spread_ms,
        }
    }

    /// Play one clip chosen uniformly at random and return how long to wait
    /// before the next cycle. A playback error does not stop the cycle.
    pub fn cycle(&mut self) -> f64 {
        if !self.clips.is_empty() {
            let idx = self.rng.index(self.clips.len());
            log::debug!("meow: clip {idx}");
            if let Err(e) = self.clips[idx].play() {
                log::debug!("meow: clip {idx} failed to play: {e}");
            }
        }
        self.delay_min_ms + self.rng.next_f64() * self.delay_spread_ms
    }
}

impl<C: Clip + 'static> SoundCycler<C> {
    /// Run `cycle` now and re-arm a one-shot timer after each play.
    pub fn start(self) -> scheduler::CancelToken {
        let token = scheduler::CancelToken::new();
        run(Rc::new(RefCell::new(self)), token.clone());
        token
    }
}

fn run<C: Clip + 'static>(cycler: Rc<RefCell<SoundCycler<C>>>, token: scheduler::CancelToken) {
    if token.is_cancelled() {
        return;
    }
    let delay = cycler.borrow_mut().cycle();
    let next = cycler.clone();
    let next_token = token.clone();
    if let Err(e) = scheduler::after(delay, move || run(next, next_token)) {
        log::warn!("meow: could not re-arm timer: {e}");
    }
}

/// Preload the clips at the given volume.
pub fn load_clips(urls: &[String], volume: f64) -> Vec<HtmlAudioElement> {
    urls.iter()
        .filter_map(|url| match HtmlAudioElement::new_with_src(url) {
            Ok(audio) => {
                audio.set_volume(volume);
                Some(audio)
            }
            Err(e) => {
                log::warn!("meow: cannot create audio for {url}: {e:?}");
                None
            }
        })
        .collect()
}
