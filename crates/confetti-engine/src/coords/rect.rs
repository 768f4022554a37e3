use super::Viewport;

/// Number of vertices a rectangle expands to (two triangles, no index buffer).
pub const VERTICES_PER_RECT: usize = 6;

/// Axis-aligned rectangle in pixels: `(x, y)` is the top-left corner, +Y down.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Corner span `(x1, y1, x2, y2)` with `x1 <= x2` and `y1 <= y2`.
    ///
    /// Negative extents are folded back so the origin moves instead.
    #[inline]
    pub fn span(self) -> (f32, f32, f32, f32) {
        let (x1, x2) = if self.width < 0.0 {
            (self.x + self.width, self.x)
        } else {
            (self.x, self.x + self.width)
        };
        let (y1, y2) = if self.height < 0.0 {
            (self.y + self.height, self.y)
        } else {
            (self.y, self.y + self.height)
        };
        (x1, y1, x2, y2)
    }

    /// Closed containment: the rectangle may touch the viewport edges.
    #[inline]
    pub fn lies_within(self, viewport: Viewport) -> bool {
        let (x1, y1, x2, y2) = self.span();
        x1 >= 0.0 && y1 >= 0.0 && x2 <= viewport.width && y2 <= viewport.height
    }

    /// Expands the rectangle into two triangles.
    ///
    /// Corner order is fixed: `(x1,y1) (x2,y1) (x1,y2)` then `(x2,y1) (x2,y2) (x1,y2)`.
    #[inline]
    pub fn triangle_vertices(self) -> [[f32; 2]; VERTICES_PER_RECT] {
        let (x1, y1, x2, y2) = self.span();
        [
            [x1, y1],
            [x2, y1],
            [x1, y2],
            [x2, y1],
            [x2, y2],
            [x1, y2],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── span ──────────────────────────────────────────────────────────────

    #[test]
    fn span_of_positive_rect_adds_extents() {
        assert_eq!(r(1.0, 2.0, 10.0, 20.0).span(), (1.0, 2.0, 11.0, 22.0));
    }

    #[test]
    fn span_folds_negative_extents() {
        assert_eq!(r(10.0, 10.0, -4.0, -3.0).span(), (6.0, 7.0, 10.0, 10.0));
    }

    // ── triangle_vertices ─────────────────────────────────────────────────

    #[test]
    fn triangle_vertices_follow_fixed_corner_order() {
        let v = r(10.0, 20.0, 30.0, 40.0).triangle_vertices();
        assert_eq!(
            v,
            [
                [10.0, 20.0],
                [40.0, 20.0],
                [10.0, 60.0],
                [40.0, 20.0],
                [40.0, 60.0],
                [10.0, 60.0],
            ]
        );
    }

    #[test]
    fn triangle_vertices_of_zero_size_rect_collapse_to_origin() {
        let v = r(7.0, 9.0, 0.0, 0.0).triangle_vertices();
        assert!(v.iter().all(|p| *p == [7.0, 9.0]));
    }

    #[test]
    fn triangle_vertices_keep_min_before_max_for_flipped_rect() {
        let v = r(40.0, 60.0, -30.0, -40.0).triangle_vertices();
        assert_eq!(v[0], [10.0, 20.0]);
        assert_eq!(v[4], [40.0, 60.0]);
    }

    // ── lies_within ───────────────────────────────────────────────────────

    #[test]
    fn lies_within_accepts_rect_touching_edges() {
        let vp = Viewport::new(100.0, 50.0);
        assert!(r(0.0, 0.0, 100.0, 50.0).lies_within(vp));
    }

    #[test]
    fn lies_within_rejects_overflow() {
        let vp = Viewport::new(100.0, 50.0);
        assert!(!r(90.0, 0.0, 11.0, 10.0).lies_within(vp));
        assert!(!r(0.0, 45.0, 10.0, 6.0).lies_within(vp));
        assert!(!r(-1.0, 0.0, 5.0, 5.0).lies_within(vp));
    }
}
