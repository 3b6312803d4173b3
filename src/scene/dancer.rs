//! Dancing kitty inside the wish panel: one image swaying back and forth.

use std::f64::consts::FRAC_PI_4;

use crate::surface::Surface;

pub const DANCE_STEP: f64 = 0.05;
pub const DANCE_BOUND: f64 = FRAC_PI_4;
const SWAY: f64 = 0.4;
const IMAGE_SIZE: f64 = 120.0;

pub struct DancingSprite<S: Surface> {
    surface: S,
    image: S::Image,
    angle: f64,
    direction: f64,
}

impl<S: Surface> DancingSprite<S> {
    pub fn new(surface: S, image: S::Image) -> Self {
        Self {
            surface,
            image,
            angle: 0.0,
            direction: 1.0,
        }
    }

    /// Redraw at the current angle, then step the sway. The angle is clamped
    /// to `[-DANCE_BOUND, DANCE_BOUND]` and the direction flips once it
    /// reaches either end.
    pub fn tick(&mut self) {
        let s = &self.surface;
        s.clear();
        s.save();
        s.translate(s.width() / 2.0, s.height() / 2.0);
        s.rotate(self.angle.sin() * SWAY);
        let half = IMAGE_SIZE / 2.0;
        s.draw_image(&self.image, -half, -half, IMAGE_SIZE, IMAGE_SIZE);
        s.restore();

        self.angle = (self.angle + DANCE_STEP * self.direction).clamp(-DANCE_BOUND, DANCE_BOUND);
        if self.angle >= DANCE_BOUND || self.angle <= -DANCE_BOUND {
            self.direction = -self.direction;
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
