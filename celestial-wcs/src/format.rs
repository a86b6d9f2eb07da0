//! Text forms of celestial coordinates.

use celestial_core::angle::{DmsFmt, HmsFmt};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::coordinate::CelestialCoord;

static FREE_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d+\.?\d*)\s*,\s*\+?(-?\d+\.?\d*)").expect("static regex is valid")
});

/// `H:MM:SS.sss ±DD:MM:SS.ss`.
///
/// ```
/// use celestial_wcs::{format::to_sexagesimal, CelestialCoord};
///
/// let s = to_sexagesimal(CelestialCoord::from_degrees(0.0, 0.0));
/// assert_eq!(s, "0:00:00.000 +00:00:00.00");
/// ```
pub fn to_sexagesimal(coord: CelestialCoord) -> String {
    format!(
        "{} {}",
        HmsFmt { frac_digits: 3 }.fmt(coord.lng()),
        DmsFmt { frac_digits: 2 }.fmt(coord.lat())
    )
}

/// The two leading comma-separated numbers of `text`, e.g. `"512 , 300.5"`.
pub fn parse_pair(text: &str) -> Option<(f64, f64)> {
    let caps = FREE_TEXT.captures(text.trim())?;
    let a: f64 = caps.get(1)?.as_str().parse().ok()?;
    let b: f64 = caps.get(2)?.as_str().parse().ok()?;
    Some((a, b))
}

/// Parses a decimal-degree pair such as `"10.5, -45.2"`.
///
/// Anything that does not start with two comma-separated numbers, or whose
/// latitude is outside [-90, 90], returns `None`; the caller then treats the
/// text as an object name to resolve.
pub fn parse_free_text(text: &str) -> Option<CelestialCoord> {
    let (lng, lat) = parse_pair(text)?;
    if !lng.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return None;
    }
    Some(CelestialCoord::from_degrees(lng, lat))
}
