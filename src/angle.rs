// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Degree-based angle helpers.
//!
//! Every series in this crate is expressed in degrees, so the trigonometric
//! wrappers here accept and return degrees. Inverse functions clamp their
//! argument to `[-1, 1]` so that rounding noise at the poles or at the horizon
//! never turns into `NaN`.

/// Degrees → radians.
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Radians → degrees.
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Wraps an angle into `[0, 360)`.
///
/// `rem_euclid` can return exactly `360.0` for tiny negative inputs
/// (e.g. `-1e-15`), which is folded back to `0.0`.
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Wraps an angle into `[-180, 180)`.
#[inline]
pub fn normalize_signed_degrees(deg: f64) -> f64 {
    normalize_degrees(deg + 180.0) - 180.0
}

#[inline]
pub fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

#[inline]
pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

#[inline]
pub fn tan_deg(deg: f64) -> f64 {
    deg.to_radians().tan()
}

/// `asin` in degrees with the argument clamped to `[-1, 1]`.
#[inline]
pub fn asin_deg(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin().to_degrees()
}

/// `acos` in degrees with the argument clamped to `[-1, 1]`.
#[inline]
pub fn acos_deg(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos().to_degrees()
}

/// `atan2` in degrees, result in `(-180, 180]`.
#[inline]
pub fn atan2_deg(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}
