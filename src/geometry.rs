//! Core geometry types: Point, Rect.
//!
//! Client-space coordinates as the host reports them (pixels or cells, the
//! controllers don't care), used to place and size press ripples.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A 2D position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle: top-left corner plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// Whether `p` lies inside the rectangle (right/bottom edges exclusive).
    #[inline]
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// Distance from `p` to the farthest corner.
    ///
    /// A circle of this radius centred on `p` covers the whole rectangle.
    pub fn farthest_corner_distance(self, p: Point) -> f64 {
        let local = p - self.origin();
        let dx = local.x.max(self.width - local.x);
        let dy = local.y.max(self.height - local.y);
        dx.hypot(dy)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
