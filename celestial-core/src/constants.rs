#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const PI: f64 = 3.141592653589793238462643;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const HALF_PI: f64 = 1.5707963267948966192313216;

#[allow(clippy::excessive_precision)]
#[allow(clippy::approx_constant)]
pub const TWOPI: f64 = 6.283185307179586476925287;

#[allow(clippy::excessive_precision)]
pub const DEG_TO_RAD: f64 = 1.745329251994329576923691e-2;

#[allow(clippy::excessive_precision)]
pub const RAD_TO_DEG: f64 = 57.29577951308232087679815;

pub const ARCSEC_PER_DEGREE: f64 = 3600.0;

pub const ARCMIN_PER_DEGREE: f64 = 60.0;

/// Degrees of longitude per hour of right ascension.
pub const DEGREES_PER_HOUR: f64 = 15.0;

pub const HOURS_PER_DAY: f64 = 24.0;

/// Mean obliquity of the ecliptic at J2000.0 (IAU 2006), in radians.
#[allow(clippy::excessive_precision)]
pub const J2000_OBLIQUITY_RAD: f64 = (23.0 + 26.0 / 60.0 + 21.406 / 3600.0) * PI / 180.0;
