// point.rs
//
// Copyright (c) 2025  Douglas Lau
//
use std::fmt;

/// Pixel coordinate
///
/// Coordinates are signed so that neighbors of edge pixels can be
/// represented; those are rejected when removed from a frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Column (left is 0)
    pub x: i32,
    /// Row (top is 0)
    pub y: i32,
}

impl fmt::Display for Point {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from(xy: (i32, i32)) -> Self {
        Point::new(xy.0, xy.1)
    }
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    /// Get the point to the right
    pub fn right(self) -> Self {
        Point::new(self.x + 1, self.y)
    }

    /// Get the point to the left
    pub fn left(self) -> Self {
        Point::new(self.x - 1, self.y)
    }

    /// Get the point below
    pub fn down(self) -> Self {
        Point::new(self.x, self.y + 1)
    }

    /// Get the point above
    pub fn up(self) -> Self {
        Point::new(self.x, self.y - 1)
    }

    /// Check if the point is within `[0, width) × [0, height)`
    pub fn within(self, width: u32, height: u32) -> bool {
        self.x >= 0
            && self.y >= 0
            && (self.x as u32) < width
            && (self.y as u32) < height
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn neighbors() {
        let p = Point::new(4, 7);
        assert_eq!(p.right(), Point::new(5, 7));
        assert_eq!(p.left(), Point::new(3, 7));
        assert_eq!(p.down(), Point::new(4, 8));
        assert_eq!(p.up(), Point::new(4, 6));
    }

    #[test]
    fn within() {
        assert!(Point::new(0, 0).within(1, 1));
        assert!(Point::new(9, 4).within(10, 5));
        assert!(!Point::new(10, 4).within(10, 5));
        assert!(!Point::new(9, 5).within(10, 5));
        assert!(!Point::new(-1, 0).within(10, 5));
        assert!(!Point::new(0, -1).within(10, 5));
        assert!(!Point::new(0, 0).within(0, 0));
    }
}
