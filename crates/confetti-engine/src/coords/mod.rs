//! Coordinate and geometry types shared by the generators and the renderer.
//!
//! Canonical CPU space:
//! - Pixels of the target canvas
//! - Origin top-left
//! - +X right, +Y down
//!
//! The vertex shader converts to clip space using a resolution uniform;
//! `Viewport::pixel_to_clip` mirrors that conversion on the CPU.

mod rect;
mod viewport;

pub use rect::{Rect, VERTICES_PER_RECT};
pub use viewport::Viewport;
