use rand::Rng;

use crate::coords::VERTICES_PER_RECT;
use crate::coords::{Rect, Viewport};

use super::POSITION_COMPONENTS;

/// Returns a uniformly random integer in `[0, range)`.
///
/// A zero range yields 0 instead of panicking.
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, range: u32) -> u32 {
    if range == 0 {
        0
    } else {
        rng.gen_range(0..range)
    }
}

/// Draws one rectangle that lies fully within `canvas`.
///
/// The origin is uniform in `[0, W) x [0, H)`; width and height are uniform in
/// `[0, W - x)` and `[0, H - y)`. Canvas dimensions are truncated to whole pixels.
pub fn random_rect<R: Rng + ?Sized>(rng: &mut R, canvas: Viewport) -> Rect {
    let max_w = canvas.width.max(0.0) as u32;
    let max_h = canvas.height.max(0.0) as u32;

    let x = random_int(rng, max_w);
    let y = random_int(rng, max_h);
    let width = random_int(rng, max_w.saturating_sub(x));
    let height = random_int(rng, max_h.saturating_sub(y));

    Rect::new(x as f32, y as f32, width as f32, height as f32)
}

/// Draws `count` independent rectangles inside `canvas`, in order.
pub fn generate_rectangles<R: Rng + ?Sized>(rng: &mut R, count: usize, canvas: Viewport) -> Vec<Rect> {
    (0..count).map(|_| random_rect(rng, canvas)).collect()
}

/// Expands rectangles into a flat position buffer.
///
/// Rectangle `i` occupies vertices `[6i, 6i + 6)`, i.e. floats `[12i, 12i + 12)`.
pub fn flatten_rectangles(rects: &[Rect]) -> Vec<f32> {
    let mut positions = Vec::with_capacity(rects.len() * VERTICES_PER_RECT * POSITION_COMPONENTS);
    for rect in rects {
        for vertex in rect.triangle_vertices() {
            positions.extend_from_slice(&vertex);
        }
    }
    positions
}
