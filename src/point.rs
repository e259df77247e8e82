//! 2D points.

use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::number::{format_number, precision};
use crate::transform::Transform;

/// A point (or offset) in user space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Map this point through `t` in place.
    pub fn transform(&mut self, t: &Transform) {
        *self = t.apply(*self);
    }

    /// The image of this point under `t`.
    pub fn transformed(&self, t: &Transform) -> Point {
        t.apply(*self)
    }

    /// Whether both coordinates are within `tolerance` of `other`'s.
    pub fn approx_eq(&self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    /// `x,y` with at most `precision` fractional digits.
    pub fn render(&self, precision: u8) -> String {
        format!(
            "{},{}",
            format_number(self.x, precision),
            format_number(self.y, precision)
        )
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Point) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, other: Point) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(precision()))
    }
}
