//! Cake click → wish panel.

use crate::scene::ConfettiBurst;
use crate::surface::Surface;

/// The two panels the reveal toggles, plus the wish panel's size for the
/// confetti canvas.
pub trait Panels {
    fn hide_initial(&self);
    fn show_wish(&self);
    fn wish_size(&self) -> (u32, u32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Initial,
    Revealed,
}

#[derive(Debug, Default)]
pub struct RevealController {
    state: RevealState,
}

impl RevealController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Handle a click on the cake. The first click hides the card, shows
    /// the wish panel and starts the confetti; later clicks do nothing.
    /// Returns `true` when the burst's tick loop should be started.
    pub fn trigger<P: Panels, S: Surface>(&mut self, panels: &P, confetti: &mut ConfettiBurst<S>) -> bool {
        if self.state == RevealState::Revealed {
            return false;
        }
        self.state = RevealState::Revealed;
        panels.hide_initial();
        panels.show_wish();
        let (w, h) = panels.wish_size();
        log::info!("wish revealed ({w}x{h})");
        confetti.start(w, h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Rng;
    use crate::surface::RecordingSurface;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakePanels {
        initial_hidden: Cell<u32>,
        wish_shown: Cell<u32>,
    }

    impl Panels for FakePanels {
        fn hide_initial(&self) {
            self.initial_hidden.set(self.initial_hidden.get() + 1);
        }
        fn show_wish(&self) {
            self.wish_shown.set(self.wish_shown.get() + 1);
        }
        fn wish_size(&self) -> (u32, u32) {
            (320, 240)
        }
    }

    #[test]
    fn first_click_reveals_and_starts_burst() {
        let panels = FakePanels::default();
        let mut burst = ConfettiBurst::new(RecordingSurface::new(0, 0), 100, Rng::new(1));
        let mut ctl = RevealController::new();
        assert_eq!(ctl.state(), RevealState::Initial);
        assert!(ctl.trigger(&panels, &mut burst));
        assert_eq!(ctl.state(), RevealState::Revealed);
        assert_eq!(panels.initial_hidden.get(), 1);
        assert_eq!(panels.wish_shown.get(), 1);
        assert_eq!(burst.particles().len(), 100);
        assert_eq!(burst.surface().width(), 320.0);
    }

    #[test]
    fn repeat_clicks_are_noops() {
        let panels = FakePanels::default();
        let mut burst = ConfettiBurst::new(RecordingSurface::new(0, 0), 100, Rng::new(1));
        let mut ctl = RevealController::new();
        ctl.trigger(&panels, &mut burst);
        let xs: Vec<f64> = burst.particles().iter().map(|p| p.x).collect();
        assert!(!ctl.trigger(&panels, &mut burst));
        assert!(!ctl.trigger(&panels, &mut burst));
        assert_eq!(panels.initial_hidden.get(), 1);
        assert_eq!(panels.wish_shown.get(), 1);
        let after: Vec<f64> = burst.particles().iter().map(|p| p.x).collect();
        assert_eq!(xs, after);
    }
}
