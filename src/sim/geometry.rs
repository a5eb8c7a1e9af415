//! Circle and rectangle primitives used for collision and culling
//!
//! All positions are in world units; y grows downward like screen space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half.x, center.y - half.y, size.x, size.y)
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        !(self.x + self.width <= other.x
            || other.x + other.width <= self.x
            || self.y + self.height <= other.y
            || other.y + other.height <= self.y)
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x > self.x
            && point.x < self.x + self.width
            && point.y > self.y
            && point.y < self.y + self.height
    }
}

/// A circle used for every collision query in the game
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionCircle {
    pub position: Vec2,
    pub radius: f32,
}

impl CollisionCircle {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Plain overlap: touching circles and fully contained circles both hit
    #[inline]
    pub fn hits(&self, other: &CollisionCircle) -> bool {
        self.position.distance(other.position) <= self.radius + other.radius
    }

    #[inline]
    pub fn hits_point(&self, point: Vec2) -> bool {
        self.position.distance(point) <= self.radius
    }

    pub fn bounding_box(&self) -> Rect {
        Rect::centered(self.position, Vec2::splat(self.radius * 2.0))
    }
}

/// Vector version of [`crate::move_toward`]: moves along the straight line
/// to `target` by at most `max_delta`
#[inline]
pub fn move_toward_vec(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let diff = target - current;
    let dist = diff.length();
    if dist <= max_delta || dist == 0.0 {
        target
    } else {
        current + diff / dist * max_delta
    }
}

/// Distance from `point` to the segment `a`-`b`
pub fn distance_to_segment(point: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < 1e-8 {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_touching_circles_hit() {
        let a = CollisionCircle::new(Vec2::ZERO, 1.0);
        let b = CollisionCircle::new(Vec2::new(3.0, 0.0), 2.0);
        assert!(a.hits(&b));
        let c = CollisionCircle::new(Vec2::new(3.1, 0.0), 2.0);
        assert!(!a.hits(&c));
    }

    #[test]
    fn test_contained_circle_hits() {
        let big = CollisionCircle::new(Vec2::ZERO, 10.0);
        let small = CollisionCircle::new(Vec2::new(1.0, 1.0), 0.5);
        assert!(big.hits(&small));
        assert!(small.hits(&big));
    }

    #[test]
    fn test_bounding_box() {
        let c = CollisionCircle::new(Vec2::new(5.0, -2.0), 1.5);
        assert_eq!(c.bounding_box(), Rect::new(3.5, -3.5, 3.0, 3.0));
        assert!(c.hits_point(Vec2::new(6.0, -2.0)));
        assert!(!c.hits_point(Vec2::new(7.0, -2.0)));
    }

    #[test]
    fn test_rect_edge_contact_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 1.0, 1.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(0.5, 0.5, 1.0, 1.0);
        assert!(a.intersects(&c));
        assert!(c.intersects(&a));
    }

    #[test]
    fn test_move_toward_vec() {
        let v = move_toward_vec(Vec2::new(10.0, 0.0), Vec2::ZERO, 4.0);
        assert!((v - Vec2::new(6.0, 0.0)).length() < 1e-5);
        assert_eq!(move_toward_vec(Vec2::new(1.0, 1.0), Vec2::ZERO, 5.0), Vec2::ZERO);
    }

    #[test]
    fn test_distance_to_segment() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        assert!((distance_to_segment(Vec2::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-5);
        assert!((distance_to_segment(Vec2::new(-4.0, 0.0), a, b) - 4.0).abs() < 1e-5);
        assert!((distance_to_segment(Vec2::new(1.0, 1.0), a, a) - 2f32.sqrt()).abs() < 1e-5);
    }

    proptest! {
        #[test]
        fn hits_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0, ar in 0.0f32..20.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0, br in 0.0f32..20.0,
        ) {
            let a = CollisionCircle::new(Vec2::new(ax, ay), ar);
            let b = CollisionCircle::new(Vec2::new(bx, by), br);
            prop_assert_eq!(a.hits(&b), b.hits(&a));
        }
    }
}
