//! Confetti burst over the wish panel.
//!
//! `start` rebuilds the whole pool; `tick` moves every piece down and recycles
//! pieces that fall past the bottom edge back above the top.

use crate::rng::Rng;
use crate::surface::Surface;

#[derive(Clone, Debug)]
pub struct ConfettiParticle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
    pub hue: f64,
    pub tilt: f64,
    pub tilt_speed: f64,
}

impl ConfettiParticle {
    fn new(rng: &mut Rng, width: f64, height: f64) -> Self {
        Self {
            x: rng.next_f64() * width,
            y: rng.next_f64() * height - height,
            size: rng.next_f64() * 8.0 + 4.0,
            speed: rng.next_f64() * 3.0 + 2.0,
            hue: rng.next_f64() * 360.0,
            tilt: rng.next_f64() * 10.0 - 10.0,
            tilt_speed: rng.next_f64() * 0.1 + 0.05,
        }
    }

    pub fn color(&self) -> String {
        format!("hsl({}, 70%, 60%)", self.hue)
    }

    fn update(&mut self, rng: &mut Rng, width: f64, height: f64) {
        self.y += self.speed;
        self.tilt += self.tilt_speed;
        if self.y > height {
            self.y = -self.size;
            self.x = rng.next_f64() * width;
        }
    }

    fn draw<S: Surface>(&self, surface: &S) {
        surface.begin_path();
        surface.set_line_width(self.size / 2.0);
        surface.set_stroke_style(&self.color());
        surface.move_to(self.x + self.tilt, self.y);
        surface.line_to(self.x, self.y + self.tilt + self.size / 2.0);
        surface.stroke();
    }
}

pub struct ConfettiBurst<S: Surface> {
    surface: S,
    particles: Vec<ConfettiParticle>,
    count: usize,
    rng: Rng,
    started: bool,
}

impl<S: Surface> ConfettiBurst<S> {
    pub fn new(surface: S, count: usize, rng: Rng) -> Self {
        Self {
            surface,
            particles: Vec::new(),
            count,
            rng,
            started: false,
        }
    }

    /// Resize to the container and replace the pool with `count` fresh
    /// pieces. Returns `true` the first time, when the caller should begin
    /// driving `tick`.
    pub fn start(&mut self, width: u32, height: u32) -> bool {
        self.surface.set_size(width, height);
        let (w, h) = (self.surface.width(), self.surface.height());
        self.particles.clear();
        for _ in 0..self.count {
            self.particles.push(ConfettiParticle::new(&mut self.rng, w, h));
        }
        log::debug!("confetti burst: {} pieces over {}x{}", self.count, width, height);
        !std::mem::replace(&mut self.started, true)
    }

    pub fn tick(&mut self) {
        let (w, h) = (self.surface.width(), self.surface.height());
        self.surface.clear();
        for p in self.particles.iter_mut() {
            p.update(&mut self.rng, w, h);
            p.draw(&self.surface);
        }
    }

    pub fn particles(&self) -> &[ConfettiParticle] {
        &self.particles
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Op, RecordingSurface};

    fn burst() -> ConfettiBurst<RecordingSurface> {
        ConfettiBurst::new(RecordingSurface::new(0, 0), 100, Rng::new(77))
    }

    #[test]
    fn start_sizes_surface_and_seeds_above_top() {
        let mut b = burst();
        assert!(b.start(400, 300));
        assert_eq!(b.surface().width(), 400.0);
        assert_eq!(b.surface().height(), 300.0);
        assert_eq!(b.particles().len(), 100);
        for p in b.particles() {
            assert!((0.0..400.0).contains(&p.x));
            assert!((-300.0..0.0).contains(&p.y));
            assert!((4.0..12.0).contains(&p.size));
            assert!((2.0..5.0).contains(&p.speed));
            assert!((-10.0..0.0).contains(&p.tilt));
            assert!((0.05..0.15).contains(&p.tilt_speed));
        }
    }

    #[test]
    fn restart_replaces_pool() {
        let mut b = burst();
        assert!(b.start(400, 300));
        let first_x: Vec<f64> = b.particles().iter().map(|p| p.x).collect();
        assert!(!b.start(400, 300));
        assert_eq!(b.particles().len(), 100);
        let second_x: Vec<f64> = b.particles().iter().map(|p| p.x).collect();
        assert_ne!(first_x, second_x);
    }

    #[test]
    fn particle_past_bottom_recycles_above_top() {
        let mut b = burst();
        b.start(400, 300);
        b.particles[0].y = 299.0;
        b.particles[0].speed = 2.0;
        b.tick();
        let p = &b.particles()[0];
        assert_eq!(p.y, -p.size);
        assert!((0.0..400.0).contains(&p.x));
    }

    #[test]
    fn tick_strokes_one_segment_per_piece() {
        let mut b = burst();
        b.start(400, 300);
        b.surface().take_ops();
        b.tick();
        let s = b.surface();
        assert_eq!(s.count(|op| *op == Op::Clear), 1);
        assert_eq!(s.count(|op| *op == Op::Stroke), 100);
        assert!(s.ops().iter().any(|op| matches!(op, Op::StrokeStyle(c) if c.starts_with("hsl("))));
    }

    #[test]
    fn color_is_hsl() {
        let p = ConfettiParticle {
            x: 0.0,
            y: 0.0,
            size: 4.0,
            speed: 2.0,
            hue: 120.0,
            tilt: 0.0,
            tilt_speed: 0.1,
        };
        assert_eq!(p.color(), "hsl(120, 70%, 60%)");
    }
}
