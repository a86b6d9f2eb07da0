//! Core angle type.
//!
//! [`Angle`] stores radians and converts to degrees or hours on demand. The WCS
//! crates keep celestial coordinates as pairs of `Angle`s so that the trigonometry
//! in the projection code never has to convert units by hand.
//!
//! ```
//! use celestial_core::Angle;
//!
//! let from_deg = Angle::from_degrees(45.0);
//! let from_hrs = Angle::from_hours(3.0);  // 3h = 45 degrees
//!
//! assert!((from_deg.radians() - from_hrs.radians()).abs() < 1e-15);
//! assert!((from_deg.hours() - 3.0).abs() < 1e-12);
//! ```

use crate::constants::{DEGREES_PER_HOUR, HALF_PI, PI};

/// An angular measurement stored as radians.
///
/// `PartialEq`/`PartialOrd` compare the radian values; `Eq` is not implemented
/// because the value can be NaN.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Angle {
    rad: f64,
}

impl Angle {
    pub const ZERO: Self = Self { rad: 0.0 };

    pub const PI: Self = Self { rad: PI };

    pub const HALF_PI: Self = Self { rad: HALF_PI };

    #[inline]
    pub const fn from_radians(rad: f64) -> Self {
        Self { rad }
    }

    #[inline]
    pub fn from_degrees(deg: f64) -> Self {
        Self {
            rad: deg.to_radians(),
        }
    }

    /// Creates an angle from hours of right ascension (1h = 15°).
    #[inline]
    pub fn from_hours(h: f64) -> Self {
        Self {
            rad: (h * DEGREES_PER_HOUR).to_radians(),
        }
    }

    #[inline]
    pub fn radians(self) -> f64 {
        self.rad
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.rad.to_degrees()
    }

    #[inline]
    pub fn hours(self) -> f64 {
        self.degrees() / DEGREES_PER_HOUR
    }

    #[inline]
    pub fn arcseconds(self) -> f64 {
        self.degrees() * 3600.0
    }

    #[inline]
    pub fn sin(self) -> f64 {
        self.rad.sin()
    }

    #[inline]
    pub fn cos(self) -> f64 {
        self.rad.cos()
    }

    #[inline]
    pub fn sin_cos(self) -> (f64, f64) {
        self.rad.sin_cos()
    }

    #[inline]
    pub fn abs(self) -> Self {
        Self {
            rad: self.rad.abs(),
        }
    }

    /// Wraps into [0, 2π).
    #[inline]
    pub fn normalized(self) -> Self {
        Self {
            rad: super::normalize::wrap_0_2pi(self.rad),
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.rad.is_finite()
    }

    #[inline]
    pub fn validate_longitude(self) -> Result<Self, crate::AstroError> {
        super::validate::validate_longitude(self)
    }

    #[inline]
    pub fn validate_latitude(self) -> Result<Self, crate::AstroError> {
        super::validate::validate_latitude(self)
    }
}

#[inline]
pub fn rad(v: f64) -> Angle {
    Angle::from_radians(v)
}

#[inline]
pub fn deg(v: f64) -> Angle {
    Angle::from_degrees(v)
}

#[inline]
pub fn hours(v: f64) -> Angle {
    Angle::from_hours(v)
}
