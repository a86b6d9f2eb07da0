//! Degree-based helpers for longitudes and latitudes.
//!
//! | Function | Input | Output Range |
//! |----------|-------|--------------|
//! | [`normalize_longitude`] | degrees | (-180°, 180°] |
//! | [`wrap_longitude_360`] | degrees | [0°, 360°) |
//!
//! [`angular_difference`] computes the shortest signed difference between two
//! longitudes, handling the wraparound at ±180°. The scale estimator uses it to
//! finite-difference across RA = 0.

/// Normalizes longitude to the range (-180°, 180°].
#[inline]
pub fn normalize_longitude(lon: f64) -> f64 {
    let mut normalized = lon % 360.0;
    if normalized > 180.0 {
        normalized -= 360.0;
    } else if normalized <= -180.0 {
        normalized += 360.0;
    }
    normalized
}

/// Wraps longitude to [0°, 360°), the usual range for right ascension.
#[inline]
pub fn wrap_longitude_360(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Computes the shortest signed angular difference `a - b` in degrees.
///
/// The result is in the range (-180°, 180°].
///
/// ```
/// use celestial_core::utils::angular_difference;
///
/// assert_eq!(angular_difference(90.0, 45.0), 45.0);
/// assert!((angular_difference(10.0, 350.0) - 20.0).abs() < 1e-12);
/// ```
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    normalize_longitude(a - b)
}
