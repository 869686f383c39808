//! Planar distance and north-referenced bearings.
//!
//! Bearings follow the surveying convention: 0° points along +y, angles grow
//! clockwise towards +x. That is `atan2(dx, dy)`, not the math-library `atan2(dy, dx)`.

use crate::Coord;

const FULL_TURN: f64 = 360.0;
const HALF_TURN: f64 = 180.0;

#[inline]
pub fn distance(a: Coord, b: Coord) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Direction from `a` to `b` in degrees, normalized into (-180, 180].
/// The bearing from a point to itself is 0.
pub fn bearing(a: Coord, b: Coord) -> f64 {
    normalize_bearing((b.x - a.x).atan2(b.y - a.y).to_degrees())
}

/// Direction from `a` to `b` in degrees within [0, 360).
pub fn azimuth(a: Coord, b: Coord) -> f64 {
    let deg = bearing(a, b);
    if deg < 0.0 { deg + FULL_TURN } else { deg }
}

/// Folds any angle in (-540, 540) into (-180, 180].
pub fn normalize_bearing(deg: f64) -> f64 {
    if deg > HALF_TURN {
        deg - FULL_TURN
    } else if deg <= -HALF_TURN {
        deg + FULL_TURN
    } else {
        deg
    }
}
