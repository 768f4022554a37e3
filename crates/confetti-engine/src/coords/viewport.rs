/// Canvas size in pixels.
///
/// This is the resolution uploaded to the vertex shader and the basis for
/// converting pixel positions to clip space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Builds a viewport from a physical surface size.
    #[inline]
    pub fn from_physical(width: u32, height: u32) -> Self {
        Self::new(width as f32, height as f32)
    }

    /// CPU mirror of the vertex-stage transform.
    ///
    /// `[0, W] x [0, H]` (top-left origin, +Y down) maps to `[-1, 1] x [1, -1]`.
    #[inline]
    pub fn pixel_to_clip(self, x: f32, y: f32) -> [f32; 2] {
        let clip_x = (x / self.width) * 2.0 - 1.0;
        let clip_y = (y / self.height) * 2.0 - 1.0;
        [clip_x, -clip_y]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_maps_to_top_left_of_clip_space() {
        let vp = Viewport::new(640.0, 480.0);
        assert_eq!(vp.pixel_to_clip(0.0, 0.0), [-1.0, 1.0]);
    }

    #[test]
    fn far_corner_maps_to_bottom_right_of_clip_space() {
        let vp = Viewport::new(640.0, 480.0);
        assert_eq!(vp.pixel_to_clip(640.0, 480.0), [1.0, -1.0]);
    }

    #[test]
    fn center_maps_to_clip_origin() {
        let vp = Viewport::new(200.0, 100.0);
        assert_eq!(vp.pixel_to_clip(100.0, 50.0), [0.0, 0.0]);
    }
}
