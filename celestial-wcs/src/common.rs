use celestial_core::constants::RAD_TO_DEG;
use celestial_core::utils::normalize_longitude;
use celestial_core::Angle;

use crate::coordinate::{IntermediateCoord, NativeCoord};

#[inline]
pub fn asin_safe(sin_value: f64) -> f64 {
    sin_value.clamp(-1.0, 1.0).asin()
}

#[inline]
pub fn pole_native_coord() -> NativeCoord {
    NativeCoord::new(Angle::from_degrees(0.0), Angle::from_degrees(90.0))
}

/// Polar (R, phi) in radians to planar (x, y) in degrees, zenithal convention.
#[inline]
pub fn radial_to_intermediate(r_theta: f64, phi_rad: f64) -> IntermediateCoord {
    let (ps, pc) = phi_rad.sin_cos();
    let x = r_theta * ps * RAD_TO_DEG;
    let y = -r_theta * pc * RAD_TO_DEG;
    IntermediateCoord::new(x, y)
}

#[inline]
pub fn native_coord_from_radians(phi_rad: f64, theta_rad: f64) -> NativeCoord {
    let phi_deg = normalize_longitude(phi_rad * RAD_TO_DEG);
    NativeCoord::new(
        Angle::from_degrees(phi_deg),
        Angle::from_degrees(theta_rad * RAD_TO_DEG),
    )
}

/// Returns `(phi, R, is_pole)` for a planar point given in radians.
#[inline]
pub fn intermediate_to_polar(x_rad: f64, y_rad: f64) -> (f64, f64, bool) {
    let r_theta = libm::hypot(x_rad, y_rad);
    let is_pole = r_theta == 0.0;
    let phi_rad = if is_pole { 0.0 } else { x_rad.atan2(-y_rad) };
    (phi_rad, r_theta, is_pole)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asin_safe_clamps() {
        assert_eq!(asin_safe(1.0 + 1e-12), asin_safe(1.0));
        assert_eq!(asin_safe(-2.0), asin_safe(-1.0));
    }

    #[test]
    fn test_polar_roundtrip() {
        let inter = radial_to_intermediate(0.25, 1.0);
        let (phi, r, is_pole) = intermediate_to_polar(inter.x_rad(), inter.y_rad());
        assert!(!is_pole);
        assert!((phi - 1.0).abs() < 1e-14);
        assert!((r - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_polar_origin_is_pole() {
        let (phi, r, is_pole) = intermediate_to_polar(0.0, 0.0);
        assert!(is_pole);
        assert_eq!(phi, 0.0);
        assert_eq!(r, 0.0);
    }
}
