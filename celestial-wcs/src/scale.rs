//! Local angular scale of the pixel-to-sky mapping.
//!
//! The projection is non-linear, so the number of degrees covered by one map
//! pixel depends on where you look. The estimate here finite-differences the
//! full transform over a fixed step and is meant for sizing a scale bar, not
//! for astrometry: errors of a few percent from the step size are expected.

use celestial_core::utils::angular_difference;

use crate::coordinate::CelestialCoord;
use crate::engine::Wcs;
use crate::error::WcsResult;

/// Finite-difference step, in map pixels.
pub const JACOBIAN_STEP: f64 = 10.0;

/// Area scale at `coord`, in square degrees per square map pixel at `zoom`.
///
/// The determinant of the (lng, lat) Jacobian is weighted by `cos(lat)` so that
/// the result is a true solid-angle ratio.
pub fn local_jacobian(wcs: &Wcs, coord: CelestialCoord, zoom: f64) -> WcsResult<f64> {
    let p0 = wcs.coordinate_to_point(coord, zoom)?;
    let dx = wcs.point_to_coordinate(p0.offset(JACOBIAN_STEP, 0.0), zoom)?;
    let dy = wcs.point_to_coordinate(p0.offset(0.0, JACOBIAN_STEP), zoom)?;

    let dlng_x = angular_difference(dx.lng_deg(), coord.lng_deg());
    let dlat_x = dx.lat_deg() - coord.lat_deg();
    let dlng_y = angular_difference(dy.lng_deg(), coord.lng_deg());
    let dlat_y = dy.lat_deg() - coord.lat_deg();

    let det = (dlng_x * dlat_y - dlng_y * dlat_x).abs() / (JACOBIAN_STEP * JACOBIAN_STEP);
    Ok(det * coord.lat().cos())
}

/// Linear scale at `coord`, in degrees per map pixel at `zoom`.
pub fn degrees_per_pixel(wcs: &Wcs, coord: CelestialCoord, zoom: f64) -> WcsResult<f64> {
    Ok(local_jacobian(wcs, coord, zoom)?.sqrt())
}
