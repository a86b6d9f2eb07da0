//! Sexagesimal formatting for celestial coordinates.
//!
//! Both formatters use colon notation: `H:MM:SS.sss` for right ascension and
//! `±DD:MM:SS.ss` for declination. The value is first rounded to an integer
//! number of "ticks" (one tick is `10^-frac_digits` of a second) and then split,
//! so rounding `59.9996` seconds carries into the minutes column instead of
//! printing `60.000`.
//!
//! ```
//! use celestial_core::Angle;
//! use celestial_core::angle::{DmsFmt, HmsFmt};
//!
//! let ra = Angle::from_degrees(359.999999);
//! assert_eq!(HmsFmt { frac_digits: 3 }.fmt(ra), "0:00:00.000");
//!
//! let dec = Angle::from_degrees(-45.5);
//! assert_eq!(DmsFmt { frac_digits: 2 }.fmt(dec), "-45:30:00.00");
//! ```
//!
//! `Display` for [`Angle`] prints decimal degrees with 6 decimals:
//!
//! ```
//! use celestial_core::Angle;
//!
//! let a = Angle::from_degrees(45.123456789);
//! assert_eq!(format!("{}", a), "45.123457°");
//! ```
use super::Angle;
use crate::constants::HOURS_PER_DAY;
use core::fmt;

/// A value split into whole units, minutes and seconds after rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub whole: u64,
    pub minutes: u64,
    /// Seconds expressed in ticks of `10^-frac_digits`.
    pub second_ticks: u64,
    pub frac_digits: u8,
}

impl Sexagesimal {
    fn write_seconds(&self, f: &mut impl fmt::Write) -> fmt::Result {
        let unit = 10u64.pow(self.frac_digits as u32);
        let int = self.second_ticks / unit;
        if self.frac_digits == 0 {
            return write!(f, "{:02}", int);
        }
        let frac = self.second_ticks % unit;
        write!(
            f,
            "{:02}.{:0width$}",
            int,
            frac,
            width = self.frac_digits as usize
        )
    }
}

/// Splits a value (hours or degrees) into whole/minutes/seconds, rounding the
/// seconds to `frac_digits` decimals with carry.
pub fn split_sexagesimal(value: f64, frac_digits: u8) -> Sexagesimal {
    let unit = 10u64.pow(frac_digits as u32);
    let ticks = (value.abs() * 3600.0 * unit as f64).round() as u64;

    let per_minute = 60 * unit;
    let per_whole = 60 * per_minute;

    Sexagesimal {
        negative: value.is_sign_negative() && ticks != 0,
        whole: ticks / per_whole,
        minutes: (ticks % per_whole) / per_minute,
        second_ticks: ticks % per_minute,
        frac_digits,
    }
}

/// Declination/latitude formatter, `±DD:MM:SS.ss`.
pub struct DmsFmt {
    pub frac_digits: u8,
}

/// Right ascension formatter, `H:MM:SS.sss`. Output is wrapped into [0, 24h).
pub struct HmsFmt {
    pub frac_digits: u8,
}

impl DmsFmt {
    pub fn fmt(&self, a: Angle) -> String {
        let parts = split_sexagesimal(a.degrees(), self.frac_digits);
        let sign = if parts.negative { '-' } else { '+' };

        let mut out = format!("{}{:02}:{:02}:", sign, parts.whole, parts.minutes);
        // Writing into a String cannot fail.
        let _ = parts.write_seconds(&mut out);
        out
    }
}

impl HmsFmt {
    pub fn fmt(&self, a: Angle) -> String {
        let mut parts = split_sexagesimal(a.normalized().hours(), self.frac_digits);
        parts.whole %= HOURS_PER_DAY as u64;

        let mut out = format!("{}:{:02}:", parts.whole, parts.minutes);
        let _ = parts.write_seconds(&mut out);
        out
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}°", self.degrees())
    }
}
