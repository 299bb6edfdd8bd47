use serde::{Deserialize, Serialize};

/// A 2D point in image coordinates (pixels, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Angle at the joint `b` between rays `b->a` and `b->c`, in degrees.
///
/// Uses the four-quadrant arctangent of each ray and folds the absolute
/// difference into [0, 180]. Coincident points yield NaN, which the caller
/// must treat as a measurement failure rather than a valid angle.
pub fn joint_angle(a: Point, b: Point, c: Point) -> f64 {
    let raw = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let mut degrees = raw.to_degrees().abs();
    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }
    // atan2 is total, but zero-length rays still produce a meaningless 0;
    // flag exact coincidence as undefined geometry.
    if (a.x == b.x && a.y == b.y) || (c.x == b.x && c.y == b.y) {
        return f64::NAN;
    }
    degrees
}

/// Midpoint of two points, e.g. shoulder or hip center.
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Deviation of the segment `top -> bottom` from vertical, in degrees.
///
/// Direction-agnostic: 0 means perfectly upright, 90 means horizontal.
/// Used for the back-straightness check.
pub fn angle_from_vertical(top: Point, bottom: Point) -> f64 {
    let dx = (top.x - bottom.x).abs();
    let dy = (top.y - bottom.y).abs();
    dx.atan2(dy).to_degrees()
}
