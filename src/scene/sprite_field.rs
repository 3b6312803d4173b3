//! Background field of floating kitties.
//!
//! Sprites drift upward with a small sinusoidal sway, bob in size, blink on a
//! randomized timer and occasionally wave a paw. A sprite that leaves the top
//! of the surface is recycled in place below the bottom edge; the pool never
//! grows or shrinks.

use std::f64::consts::TAU;

use crate::rng::Rng;
use crate::surface::Surface;

/// Closed-eyes frame stays up this long (ms of accumulated delta).
pub const BLINK_DURATION_MS: f64 = 200.0;
/// Size oscillates by this fraction of the base size.
pub const JUMP_AMPLITUDE: f64 = 0.15;
const PAW_WAVE_STEP: f64 = 0.05;
const PAW_WAVE_THRESHOLD: f64 = 0.7;

/// Images shared by every sprite in the field.
pub struct SpriteImages<I> {
    pub open_eyes: I,
    pub blink: I,
    pub paw: I,
}

/// One floating kitty.
#[derive(Clone, Debug)]
pub struct FloatingSprite {
    pub x: f64,
    pub y: f64,
    pub base_size: f64,
    pub size: f64,
    pub speed: f64,
    pub angle: f64,
    pub angular_speed: f64,
    pub offset_x: f64,
    // Blink timer
    pub blink_time: f64,
    pub blink_interval: f64,
    pub is_blinking: bool,
    // Size bob
    pub jump_progress: f64,
    pub jump_speed: f64,
    pub paw_wave_cycle: f64,
}

impl FloatingSprite {
    pub fn spawn(rng: &mut Rng, width: f64, height: f64) -> Self {
        let base_size = rng.range(30.0, 60.0);
        Self {
            x: rng.range(0.0, width),
            y: height + rng.range(20.0, 100.0),
            base_size,
            size: base_size,
            speed: rng.range(0.5, 2.0),
            angle: rng.range(0.0, TAU),
            angular_speed: rng.range(0.01, 0.03),
            offset_x: 0.0,
            blink_time: 0.0,
            blink_interval: rng.range(3000.0, 7000.0),
            is_blinking: false,
            jump_progress: 0.0,
            jump_speed: rng.range(0.02, 0.04),
            paw_wave_cycle: rng.range(0.0, TAU),
        }
    }

    /// Advance one frame. `delta_ms` drives only the blink timer; motion is
    /// per-frame.
    pub fn update(&mut self, rng: &mut Rng, delta_ms: f64, width: f64, height: f64) {
        self.y -= self.speed;
        self.angle += self.angular_speed;
        self.offset_x = self.angle.sin() * 10.0;
        self.x += self.offset_x * 0.05;

        if self.y + self.size < 0.0 {
            self.respawn(rng, width, height);
        }

        self.blink_time += delta_ms;
        if !self.is_blinking && self.blink_time > self.blink_interval {
            self.is_blinking = true;
            self.blink_time = 0.0;
        }
        if self.is_blinking && self.blink_time > BLINK_DURATION_MS {
            self.is_blinking = false;
            self.blink_time = 0.0;
            self.blink_interval = rng.range(3000.0, 7000.0);
        }

        self.jump_progress += self.jump_speed;
        if self.jump_progress > TAU {
            self.jump_progress -= TAU;
        }
        self.size = self.base_size + self.jump_progress.sin() * (self.base_size * JUMP_AMPLITUDE);

        self.paw_wave_cycle += PAW_WAVE_STEP;
        if self.paw_wave_cycle > TAU {
            self.paw_wave_cycle -= TAU;
        }
    }

    fn respawn(&mut self, rng: &mut Rng, width: f64, height: f64) {
        self.y = height + rng.range(20.0, 100.0);
        self.x = rng.range(0.0, width);
        self.base_size = rng.range(30.0, 60.0);
        self.size = self.base_size;
        self.speed = rng.range(0.5, 2.0);
    }

    pub fn paw_visible(&self) -> bool {
        self.paw_wave_cycle.sin() > PAW_WAVE_THRESHOLD
    }

    pub fn draw<S: Surface>(&self, surface: &S, images: &SpriteImages<S::Image>) {
        surface.save();
        surface.translate(self.x, self.y);
        surface.rotate(self.angle.sin() * 0.1);

        let half = self.size / 2.0;
        let body = if self.is_blinking { &images.blink } else { &images.open_eyes };
        surface.draw_image(body, -half, -half, self.size, self.size);

        if self.paw_visible() {
            let paw = self.size * 0.3;
            surface.draw_image(&images.paw, self.size * 0.1, -paw / 2.0, paw, paw);
        }
        surface.restore();
    }
}

/// Fixed pool of floating sprites bound to a surface.
pub struct SpriteField<S: Surface> {
    surface: S,
    images: SpriteImages<S::Image>,
    sprites: Vec<FloatingSprite>,
    rng: Rng,
    last_time: Option<f64>,
}

impl<S: Surface> SpriteField<S> {
    pub fn new(surface: S, images: SpriteImages<S::Image>, count: usize, mut rng: Rng) -> Self {
        let (w, h) = (surface.width(), surface.height());
        let sprites = (0..count).map(|_| FloatingSprite::spawn(&mut rng, w, h)).collect();
        Self {
            surface,
            images,
            sprites,
            rng,
            last_time: None,
        }
    }

    /// Advance and redraw every sprite. `now_ms` is the frame timestamp; the
    /// first tick after construction counts as zero elapsed time.
    pub fn tick(&mut self, now_ms: f64) {
        let delta = self.last_time.map_or(0.0, |t| (now_ms - t).max(0.0));
        self.last_time = Some(now_ms);

        let (w, h) = (self.surface.width(), self.surface.height());
        self.surface.clear();
        for sprite in self.sprites.iter_mut() {
            sprite.update(&mut self.rng, delta, w, h);
            sprite.draw(&self.surface, &self.images);
        }
    }

    pub fn sprites(&self) -> &[FloatingSprite] {
        &self.sprites
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Op, RecordingSurface};

    fn images() -> SpriteImages<&'static str> {
        SpriteImages {
            open_eyes: "open",
            blink: "blink",
            paw: "paw",
        }
    }

    fn field(seed: u64) -> SpriteField<RecordingSurface> {
        SpriteField::new(RecordingSurface::new(800, 600), images(), 30, Rng::new(seed))
    }

    #[test]
    fn spawn_starts_below_viewport() {
        let mut rng = Rng::new(3);
        for _ in 0..200 {
            let s = FloatingSprite::spawn(&mut rng, 800.0, 600.0);
            assert!((620.0..700.0).contains(&s.y));
            assert!((0.0..800.0).contains(&s.x));
            assert!((30.0..60.0).contains(&s.base_size));
            assert!((0.5..2.0).contains(&s.speed));
            assert_eq!(s.size, s.base_size);
        }
    }

    #[test]
    fn size_stays_within_jump_band() {
        let mut f = field(11);
        for frame in 0..2_000 {
            f.tick(frame as f64 * 16.0);
            for s in f.sprites() {
                let lo = s.base_size * (1.0 - JUMP_AMPLITUDE) - 1e-9;
                let hi = s.base_size * (1.0 + JUMP_AMPLITUDE) + 1e-9;
                assert!(s.size >= lo && s.size <= hi, "size {} base {}", s.size, s.base_size);
            }
        }
    }

    #[test]
    fn sprite_leaving_top_respawns_at_bottom() {
        let mut rng = Rng::new(5);
        let mut s = FloatingSprite::spawn(&mut rng, 800.0, 600.0);
        s.y = -s.size - 1.0 + s.speed; // will be fully above the top after moving
        s.update(&mut rng, 16.0, 800.0, 600.0);
        assert!((620.0..700.0).contains(&s.y), "y = {}", s.y);
        assert!((0.0..800.0).contains(&s.x));
        assert!((30.0..60.0).contains(&s.base_size));
        assert!((0.5..2.0).contains(&s.speed));
    }

    #[test]
    fn sprite_touching_top_is_not_recycled() {
        let mut rng = Rng::new(5);
        let mut s = FloatingSprite::spawn(&mut rng, 800.0, 600.0);
        s.y = 10.0;
        s.update(&mut rng, 16.0, 800.0, 600.0);
        assert!(s.y < 10.0);
    }

    #[test]
    fn blink_lasts_at_most_blink_duration() {
        let mut rng = Rng::new(8);
        let mut s = FloatingSprite::spawn(&mut rng, 800.0, 600.0);
        s.blink_interval = 100.0;
        let mut blinking_for = 0.0;
        let mut saw_blink = false;
        for _ in 0..2_000 {
            s.update(&mut rng, 16.0, 800.0, 600.0);
            if s.is_blinking {
                saw_blink = true;
                blinking_for += 16.0;
                assert!(blinking_for <= BLINK_DURATION_MS + 16.0);
                assert!(s.blink_time <= BLINK_DURATION_MS);
            } else {
                blinking_for = 0.0;
            }
        }
        assert!(saw_blink);
    }

    #[test]
    fn blink_reschedules_interval_in_range() {
        let mut rng = Rng::new(21);
        let mut s = FloatingSprite::spawn(&mut rng, 800.0, 600.0);
        s.is_blinking = true;
        s.blink_time = BLINK_DURATION_MS;
        s.update(&mut rng, 1.0, 800.0, 600.0);
        assert!(!s.is_blinking);
        assert_eq!(s.blink_time, 0.0);
        assert!((3000.0..7000.0).contains(&s.blink_interval));
    }

    #[test]
    fn phases_wrap_at_full_cycle() {
        let mut rng = Rng::new(2);
        let mut s = FloatingSprite::spawn(&mut rng, 800.0, 600.0);
        for _ in 0..10_000 {
            s.update(&mut rng, 0.0, 800.0, 600.0);
            assert!(s.jump_progress <= TAU);
            assert!(s.paw_wave_cycle <= TAU);
        }
    }

    #[test]
    fn draw_uses_blink_frame_and_paw_overlay() {
        let surface = RecordingSurface::new(100, 100);
        let mut rng = Rng::new(1);
        let mut s = FloatingSprite::spawn(&mut rng, 100.0, 100.0);
        s.is_blinking = true;
        s.paw_wave_cycle = std::f64::consts::FRAC_PI_2;
        s.size = 40.0;
        s.draw(&surface, &images());
        let ops = surface.ops();
        assert!(ops.contains(&Op::DrawImage("blink", -20.0, -20.0, 40.0, 40.0)));
        let paw = ops
            .iter()
            .find_map(|op| match op {
                Op::DrawImage("paw", x, y, w, h) => Some((*x, *y, *w, *h)),
                _ => None,
            })
            .expect("paw overlay drawn");
        assert!((paw.0 - 4.0).abs() < 1e-9 && (paw.1 + 6.0).abs() < 1e-9);
        assert!((paw.2 - 12.0).abs() < 1e-9 && (paw.3 - 12.0).abs() < 1e-9);
        assert_eq!(ops.first(), Some(&Op::Save));
        assert_eq!(ops.last(), Some(&Op::Restore));
    }

    #[test]
    fn tick_clears_once_and_draws_every_sprite() {
        let mut f = field(4);
        f.tick(0.0);
        let s = f.surface();
        assert_eq!(s.count(|op| *op == Op::Clear), 1);
        let bodies = s.count(|op| matches!(op, Op::DrawImage("open" | "blink", ..)));
        assert_eq!(bodies, 30);
    }

    #[test]
    fn pool_size_is_constant() {
        let mut f = field(9);
        for frame in 0..5_000 {
            f.tick(frame as f64 * 16.0);
        }
        assert_eq!(f.sprites().len(), 30);
    }
}
