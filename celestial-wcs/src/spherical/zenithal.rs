//! Zenithal projections: TAN (gnomonic) and ZEA (zenithal equal-area).
//!
//! Both work in the native frame with the fiducial point at the native pole
//! (phi_0, theta_0) = (0, 90). Planar coordinates are degrees.

use celestial_core::constants::{DEG_TO_RAD, HALF_PI};

use crate::common::{
    intermediate_to_polar, native_coord_from_radians, pole_native_coord, radial_to_intermediate,
};
use crate::coordinate::{IntermediateCoord, NativeCoord};
use crate::error::{WcsError, WcsResult};
use crate::params::ProjectionParameters;

/// Slack for the degree/radian round trip at the ZEA rim.
const ZEA_BOUNDARY_TOL: f64 = 1e-12;

pub(crate) fn project_tan(native: NativeCoord) -> WcsResult<IntermediateCoord> {
    let phi = native.phi().radians();
    let theta = native.theta().radians();

    if theta == HALF_PI {
        return Ok(IntermediateCoord::new(0.0, 0.0));
    }
    // The tangent plane only sees the hemisphere in front of it.
    if theta <= 0.0 || !theta.is_finite() {
        return Err(WcsError::out_of_domain("TAN", "native latitude <= 0"));
    }
    let (sin_theta, cos_theta) = theta.sin_cos();
    Ok(radial_to_intermediate(cos_theta / sin_theta, phi))
}

pub(crate) fn deproject_tan(inter: IntermediateCoord) -> WcsResult<NativeCoord> {
    let (phi, r_theta, is_pole) = intermediate_to_polar(inter.x_rad(), inter.y_rad());

    if is_pole {
        return Ok(pole_native_coord());
    }
    if !r_theta.is_finite() {
        return Err(WcsError::out_of_domain("TAN", "planar radius not finite"));
    }

    let theta = 1.0_f64.atan2(r_theta);
    Ok(native_coord_from_radians(phi, theta))
}

pub(crate) fn project_zea(native: NativeCoord) -> WcsResult<IntermediateCoord> {
    let phi = native.phi().radians();
    let theta = native.theta().radians();

    if !theta.is_finite() {
        return Err(WcsError::out_of_domain("ZEA", "native latitude not finite"));
    }
    let r_theta = (2.0 * (1.0 - theta.sin())).max(0.0).sqrt();
    Ok(radial_to_intermediate(r_theta, phi))
}

pub(crate) fn deproject_zea(inter: IntermediateCoord) -> WcsResult<NativeCoord> {
    let (phi, r_theta, is_pole) = intermediate_to_polar(inter.x_rad(), inter.y_rad());

    if is_pole {
        return Ok(pole_native_coord());
    }

    // rho == 1 is the antipode and still maps to theta = -90.
    let rho = r_theta / 2.0;
    if rho > 1.0 + ZEA_BOUNDARY_TOL || rho.is_nan() {
        return Err(WcsError::out_of_domain(
            "ZEA",
            format!("planar radius {:.6} deg beyond the 2 rad boundary", r_theta / DEG_TO_RAD),
        ));
    }

    let theta = HALF_PI - 2.0 * rho.min(1.0).asin();
    Ok(native_coord_from_radians(phi, theta))
}

/// Zenithal families share the fiducial point at the native pole.
pub(crate) fn paraminit_zenithal(params: &mut ProjectionParameters) {
    if params.natfid.is_none() {
        params.natfid = Some(pole_native_coord());
    }
}
