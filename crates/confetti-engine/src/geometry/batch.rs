use rand::Rng;

use crate::coords::{Rect, VERTICES_PER_RECT, Viewport};
use crate::paint::Rgb;

use super::{
    COLOR_COMPONENTS, POSITION_COMPONENTS, flatten_colors, flatten_rectangles, generate_colors,
    generate_rectangles,
};

/// CPU-side vertex data for a set of solid rectangles.
///
/// Two flat, non-interleaved streams:
/// - `positions`: 2 floats per vertex, pixel space
/// - `colors`: 3 floats per vertex
///
/// Invariant: both streams describe the same number of vertices, 6 per rectangle.
/// A batch is built in one pass and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RectangleBatch {
    positions: Vec<f32>,
    colors: Vec<f32>,
}

impl RectangleBatch {
    /// Generates `count` random rectangles inside `canvas` and one random color each.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, count: usize, canvas: Viewport) -> Self {
        let rects = generate_rectangles(rng, count, canvas);
        let colors = generate_colors(rng, count);
        Self::from_parts(&rects, &colors)
    }

    /// Builds a batch from explicit rectangles and colors.
    ///
    /// Pairs are taken in order; surplus entries on either side are ignored.
    pub fn from_parts(rects: &[Rect], colors: &[Rgb]) -> Self {
        let n = rects.len().min(colors.len());
        if rects.len() != colors.len() {
            log::debug!(
                "rectangle batch: {} rects / {} colors; using the first {n}",
                rects.len(),
                colors.len()
            );
        }

        Self {
            positions: flatten_rectangles(&rects[..n]),
            colors: flatten_colors(&colors[..n]),
        }
    }

    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / POSITION_COMPONENTS
    }

    #[inline]
    pub fn rect_count(&self) -> usize {
        self.vertex_count() / VERTICES_PER_RECT
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Checks the stream-length invariant.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.positions.len() % (POSITION_COMPONENTS * VERTICES_PER_RECT) == 0
            && self.colors.len() % COLOR_COMPONENTS == 0
            && self.positions.len() / POSITION_COMPONENTS == self.colors.len() / COLOR_COMPONENTS
    }
}
