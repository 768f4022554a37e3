//! Confetti engine crate.
//!
//! Draws a batch of randomly placed, randomly colored rectangles with wgpu:
//! shader compile/link, geometry generation, upload, one draw call.

pub mod coords;
pub mod device;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
