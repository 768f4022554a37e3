//! Random rectangle geometry and per-rectangle colors.
//!
//! All randomness comes from an injected `rand::Rng`, so a seeded generator
//! reproduces a batch exactly. Rectangle values are drawn before colors.

mod batch;
mod colors;
mod rectangles;

pub use batch::RectangleBatch;
pub use colors::{flatten_colors, generate_colors, random_rgb};
pub use rectangles::{flatten_rectangles, generate_rectangles, random_int, random_rect};

/// `f32` components per vertex position.
pub const POSITION_COMPONENTS: usize = 2;

/// `f32` components per vertex color.
pub const COLOR_COMPONENTS: usize = crate::paint::Rgb::COMPONENTS;
