//! Angle normalisation and relative position helpers.

use shepherding_data::Vec2;
use std::f64::consts::{PI, TAU};

/// Distances below this are treated as coincident.
pub const EPSILON: f64 = 1e-9;

/// Tolerance added to the collection threshold before switching modes.
pub const ANGLE_MARGIN: f64 = 0.001;

/// Maps an angle into `[0, 2π)`.
#[must_use]
pub fn reflect_angle(angle: f64) -> f64 {
    let r = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Maps an angle into `(-π, π]`.
#[must_use]
pub fn transform_angle(angle: f64) -> f64 {
    let r = (angle + PI).rem_euclid(TAU) - PI;
    if r <= -PI {
        PI
    } else if r > PI {
        r - TAU
    } else {
        r
    }
}

/// Distance and bearing from `from` to `target`.
#[must_use]
pub fn relative_distance_angle(target: Vec2, from: Vec2) -> (f64, f64) {
    let delta = target - from;
    (delta.length(), delta.angle())
}

/// Smallest absolute angle between a heading and a bearing.
#[must_use]
pub fn angular_distance(bearing: f64, orientation: f64) -> f64 {
    let diff = reflect_angle(bearing - orientation);
    diff.min(TAU - diff)
}

/// Replaces a near-zero speed by `±EPSILON`, keeping its sign (positive for zero).
#[must_use]
pub fn guard_speed(v: f64) -> f64 {
    if v.abs() >= EPSILON {
        v
    } else if v < 0.0 {
        -EPSILON
    } else {
        EPSILON
    }
}
