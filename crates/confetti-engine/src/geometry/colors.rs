use rand::Rng;

use crate::coords::VERTICES_PER_RECT;
use crate::paint::Rgb;

use super::COLOR_COMPONENTS;

/// Draws one color with each channel uniform in `[0, 1)`.
#[inline]
pub fn random_rgb<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    let r = rng.r#gen::<f32>();
    let g = rng.r#gen::<f32>();
    let b = rng.r#gen::<f32>();
    Rgb::new(r, g, b)
}

/// Draws one color per rectangle, in order.
pub fn generate_colors<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Rgb> {
    (0..count).map(|_| random_rgb(rng)).collect()
}

/// Expands per-rectangle colors into a flat per-vertex color buffer.
///
/// Each color is repeated for the 6 vertices of its rectangle: 18 floats per entry.
pub fn flatten_colors(colors: &[Rgb]) -> Vec<f32> {
    let mut out = Vec::with_capacity(colors.len() * VERTICES_PER_RECT * COLOR_COMPONENTS);
    for color in colors {
        let rgb = color.to_array();
        for _ in 0..VERTICES_PER_RECT {
            out.extend_from_slice(&rgb);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn color_buffer_has_eighteen_floats_per_rectangle() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in [0usize, 1, 50] {
            assert_eq!(flatten_colors(&generate_colors(&mut rng, n)).len(), 18 * n);
        }
    }

    #[test]
    fn all_six_vertices_share_the_rectangle_color() {
        let mut rng = StdRng::seed_from_u64(9);
        let buffer = flatten_colors(&generate_colors(&mut rng, 40));
        for block in buffer.chunks_exact(18) {
            let first = &block[0..3];
            assert!(block.chunks_exact(3).all(|rgb| rgb == first));
        }
    }

    #[test]
    fn channels_are_in_unit_half_open_range() {
        let mut rng = StdRng::seed_from_u64(1234);
        for c in generate_colors(&mut rng, 1000) {
            for ch in c.to_array() {
                assert!((0.0..1.0).contains(&ch), "channel {ch} outside [0, 1)");
            }
        }
    }
}
