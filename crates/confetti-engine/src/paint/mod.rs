//! Color types.
//!
//! Scope:
//! - `Rgb`: per-rectangle fill, alpha fixed at 1 by the shader
//! - `Color`: RGBA used for clearing render targets
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::{Color, Rgb};
