//! Axis-aligned rectangles in screen space (y grows downward)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test. Shared edges and zero-size axes never overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        overlaps(self, other)
    }

    /// Inclusive point test, used for button hit-testing
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.right()
            && point.y >= self.pos.y
            && point.y <= self.bottom()
    }
}

/// Half-open interval intersection on both axes.
///
/// A rectangle with a zero extent on either axis overlaps nothing.
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    if a.size.x <= 0.0 || a.size.y <= 0.0 || b.size.x <= 0.0 || b.size.y <= 0.0 {
        return false;
    }
    a.pos.x < b.right() && a.right() > b.pos.x && a.pos.y < b.bottom() && a.bottom() > b.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
        assert!(overlaps(&a, &b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_shared_edge_does_not_overlap() {
        let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let right = Rect::from_xywh(10.0, 0.0, 10.0, 10.0);
        let below = Rect::from_xywh(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::from_xywh(40.0, 40.0, 8.0, 8.0);
        assert!(outer.overlaps(&inner));
    }

    #[test]
    fn test_zero_size_never_overlaps() {
        let block = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let line = Rect::from_xywh(5.0, 0.0, 0.0, 10.0);
        assert!(!line.overlaps(&block));
        assert!(!block.overlaps(&line));
        let flat = Rect::from_xywh(0.0, 5.0, 10.0, 0.0);
        assert!(!flat.overlaps(&block));
        let point = Rect::from_xywh(3.0, 3.0, 0.0, 0.0);
        assert!(!point.overlaps(&point));
    }

    #[test]
    fn test_contains_point_is_inclusive() {
        let button = Rect::from_xywh(300.0, 275.0, 200.0, 50.0);
        assert!(button.contains_point(Vec2::new(300.0, 275.0)));
        assert!(button.contains_point(Vec2::new(500.0, 325.0)));
        assert!(!button.contains_point(Vec2::new(500.1, 300.0)));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::from_xywh(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_touching_edges_never_overlap(a in rect_strategy(), w in 0.0f32..200.0, h in 0.0f32..200.0) {
            let beside = Rect::new(Vec2::new(a.right(), a.pos.y), Vec2::new(w, h));
            let beneath = Rect::new(Vec2::new(a.pos.x, a.bottom()), Vec2::new(w, h));
            prop_assert!(!overlaps(&a, &beside));
            prop_assert!(!overlaps(&a, &beneath));
        }
    }
}
