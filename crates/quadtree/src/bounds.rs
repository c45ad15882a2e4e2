//! Axis-aligned bounds and the point abstraction stored in the tree.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::sync::Arc;

/// Axis-aligned rectangle anchored at its top-left corner.
///
/// `y` grows downward, so the "north" half of a rectangle is the half with the
/// smaller `y`. All containment tests are inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create the square bounds centred on a point with the given half extent.
    #[inline]
    pub fn from_center(cx: f32, cy: f32, half_extent: f32) -> Self {
        Self {
            x: cx - half_extent,
            y: cy - half_extent,
            width: half_extent * 2.0,
            height: half_extent * 2.0,
        }
    }

    /// Right edge X.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge Y.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point lies inside the bounds, edges included.
    #[inline]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Check if two bounds overlap. Touching edges count as overlapping.
    #[inline]
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(other.x > self.right()
            || other.right() < self.x
            || other.y > self.bottom()
            || other.bottom() < self.y)
    }

    /// Split into four equal quadrants, ordered NE, NW, SE, SW.
    pub fn quadrants(&self) -> [Bounds; 4] {
        let w = self.width / 2.0;
        let h = self.height / 2.0;
        [
            Bounds::new(self.x + w, self.y, w, h),
            Bounds::new(self.x, self.y, w, h),
            Bounds::new(self.x + w, self.y + h, w, h),
            Bounds::new(self.x, self.y + h, w, h),
        ]
    }

    /// All coordinates finite and both extents non-negative.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Anything with a 2D position can be stored in a [`QuadTree`](crate::QuadTree).
///
/// The tree only reads the position; whatever else the type carries is opaque
/// to it. Smart pointers and references forward to the pointee, so callers can
/// index handles instead of moving their entities into the tree.
pub trait Positioned {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
}

impl Positioned for Vec2 {
    #[inline]
    fn x(&self) -> f32 {
        self.x
    }

    #[inline]
    fn y(&self) -> f32 {
        self.y
    }
}

impl Positioned for (f32, f32) {
    #[inline]
    fn x(&self) -> f32 {
        self.0
    }

    #[inline]
    fn y(&self) -> f32 {
        self.1
    }
}

macro_rules! forward_positioned {
    ($($ptr:ty),*) => {
        $(
            impl<P: Positioned + ?Sized> Positioned for $ptr {
                #[inline]
                fn x(&self) -> f32 {
                    (**self).x()
                }

                #[inline]
                fn y(&self) -> f32 {
                    (**self).y()
                }
            }
        )*
    };
}

forward_positioned!(&P, Box<P>, Rc<P>, Arc<P>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_inclusive_edges() {
        let b = Bounds::new(0.0, 0.0, 25.0, 25.0);
        assert!(b.contains_point(0.0, 0.0));
        assert!(b.contains_point(25.0, 25.0));
        assert!(b.contains_point(20.0, 20.0));
        assert!(!b.contains_point(30.0, 30.0));
        assert!(!b.contains_point(-0.1, 10.0));
    }

    #[test]
    fn test_bounds_intersects() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(5.0, 5.0, 10.0, 10.0);
        let c = Bounds::new(20.0, 20.0, 10.0, 10.0);
        let touching = Bounds::new(10.0, 0.0, 5.0, 5.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
    }

    #[test]
    fn test_quadrants_tile_parent() {
        let [ne, nw, se, sw] = Bounds::new(0.0, 0.0, 100.0, 100.0).quadrants();
        assert_eq!(ne, Bounds::new(50.0, 0.0, 50.0, 50.0));
        assert_eq!(nw, Bounds::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(se, Bounds::new(50.0, 50.0, 50.0, 50.0));
        assert_eq!(sw, Bounds::new(0.0, 50.0, 50.0, 50.0));
    }

    #[test]
    fn test_from_center() {
        let b = Bounds::from_center(10.0, 20.0, 5.0);
        assert_eq!(b, Bounds::new(5.0, 15.0, 10.0, 10.0));
        assert_eq!(b.center(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_is_valid() {
        assert!(Bounds::new(0.0, 0.0, 0.0, 0.0).is_valid());
        assert!(!Bounds::new(0.0, 0.0, -1.0, 10.0).is_valid());
        assert!(!Bounds::new(f32::NAN, 0.0, 1.0, 1.0).is_valid());
        assert!(!Bounds::new(0.0, 0.0, f32::INFINITY, 1.0).is_valid());
    }

    #[test]
    fn test_positioned_forwarding() {
        let p = Vec2::new(3.0, 4.0);
        let r = &p;
        let a = Arc::new(p);
        assert_eq!((r.x(), r.y()), (3.0, 4.0));
        assert_eq!((a.x(), a.y()), (3.0, 4.0));
        assert_eq!(Positioned::x(&(1.0f32, 2.0f32)), 1.0);
    }
}
