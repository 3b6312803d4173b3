//! Per-frame scene components. Each owns its surface and entity pool and
//! shares nothing with the others.

pub mod cake;
pub mod confetti;
pub mod dancer;
pub mod sprite_field;

pub use cake::draw_cake;
pub use confetti::{ConfettiBurst, ConfettiParticle};
pub use dancer::DancingSprite;
pub use sprite_field::{FloatingSprite, SpriteField, SpriteImages};
