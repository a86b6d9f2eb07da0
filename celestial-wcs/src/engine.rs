//! The finalized WCS transform.
//!
//! A [`Wcs`] chains four steps, each invertible:
//!
//! ```text
//! map point --(zoom scale, y flip)--> FITS pixel --(CD)--> plane
//!           --(projection)--> native sphere --(pole rotation)--> celestial
//! ```
//!
//! It is immutable once built and can be shared across threads behind an
//! `Arc`. The only way to obtain one is [`WcsLayer::finalize`](crate::WcsLayer::finalize).

use celestial_core::utils::wrap_longitude_360;
use celestial_core::Angle;
use tracing::debug;

use crate::common::pole_native_coord;
use crate::coordinate::{CelestialCoord, IntermediateCoord, MapPoint, NativeCoord, PixelCoord};
use crate::error::WcsResult;
use crate::frames::CelestialFrame;
use crate::linear::LinearTransform;
use crate::params::ProjectionParameters;
use crate::spherical::{ProjectionFamily, SphericalRotation};

#[derive(Debug, Clone)]
pub struct Wcs {
    params: ProjectionParameters,
    family: ProjectionFamily,
    linear: LinearTransform,
    rotation: SphericalRotation,
    frame: CelestialFrame,
}

impl Wcs {
    /// Resolves the projection family, runs its `paraminit`, and derives the
    /// celestial pole. An unknown projection code falls back to TAN.
    pub(crate) fn build(mut params: ProjectionParameters) -> WcsResult<Self> {
        params.validate()?;

        let family = ProjectionFamily::from_ctype(&params.ctype.x).unwrap_or_else(|err| {
            debug!(ctype = %params.ctype.x, %err, "falling back to TAN");
            ProjectionFamily::Tan
        });
        family.paraminit(&mut params);

        let crval = params.crval;
        let natfid = *params.natfid.get_or_insert_with(pole_native_coord);
        // Fixed (180, 90) default, also at CRVAL2 = 90.
        let natpole = *params
            .natpole
            .get_or_insert_with(|| NativeCoord::from_degrees(180.0, 90.0));

        let rotation = SphericalRotation::from_crval(
            crval.lng(),
            crval.lat(),
            natfid.theta(),
            Some(natpole.phi()),
            Some(natpole.theta()),
        )?;
        params.celpole = Some(rotation.celestial_pole());

        let linear = LinearTransform::from_cd(params.crpix, params.cd)?;
        let frame = CelestialFrame::from_ctype(&params.ctype.x);

        Ok(Self {
            params,
            family,
            linear,
            rotation,
            frame,
        })
    }

    #[inline]
    pub fn params(&self) -> &ProjectionParameters {
        &self.params
    }

    #[inline]
    pub fn family(&self) -> ProjectionFamily {
        self.family
    }

    /// Coordinate reference system code, e.g. `WCS:ZEA`.
    pub fn code(&self) -> String {
        format!("WCS:{}", self.family.code())
    }

    #[inline]
    pub fn frame(&self) -> CelestialFrame {
        self.frame
    }

    /// True when the image axes are not celestial and coordinates should be
    /// shown as plain pixel values.
    #[inline]
    pub fn is_pixel(&self) -> bool {
        !self.frame.is_celestial()
    }

    #[inline]
    pub fn linear(&self) -> &LinearTransform {
        &self.linear
    }

    #[inline]
    pub fn rotation(&self) -> &SphericalRotation {
        &self.rotation
    }

    /// Map pixels per image pixel at `zoom`: `2^(zoom - nzoom + 1)`.
    #[inline]
    pub fn scale_factor(&self, zoom: f64) -> f64 {
        libm::exp2(zoom - f64::from(self.params.nzoom) + 1.0)
    }

    pub fn map_to_pixel(&self, point: MapPoint, zoom: f64) -> PixelCoord {
        let s = self.scale_factor(zoom);
        PixelCoord::new(
            point.x / s + 0.5,
            f64::from(self.params.naxis[1]) + 0.5 - point.y / s,
        )
    }

    pub fn pixel_to_map(&self, pixel: PixelCoord, zoom: f64) -> MapPoint {
        let s = self.scale_factor(zoom);
        MapPoint::new(
            s * (pixel.x() - 0.5),
            s * (f64::from(self.params.naxis[1]) + 0.5 - pixel.y()),
        )
    }

    /// Celestial coordinates of a FITS pixel; longitude in [0, 360).
    pub fn pixel_to_celestial(&self, pixel: PixelCoord) -> WcsResult<CelestialCoord> {
        let inter = self.linear.pixel_to_intermediate(pixel);
        let native = self.family.unproject(inter)?;
        let celestial = self.rotation.native_to_celestial(native);
        Ok(CelestialCoord::new(
            Angle::from_degrees(wrap_longitude_360(celestial.lng_deg())),
            celestial.lat(),
        ))
    }

    pub fn celestial_to_pixel(&self, coord: CelestialCoord) -> WcsResult<PixelCoord> {
        let inter = self.project(coord)?;
        Ok(self.linear.intermediate_to_pixel(inter))
    }

    /// Celestial coordinate to projection-plane coordinates (degrees).
    pub fn project(&self, coord: CelestialCoord) -> WcsResult<IntermediateCoord> {
        let native = self.rotation.celestial_to_native(coord);
        self.family.project(native)
    }

    pub fn point_to_coordinate(&self, point: MapPoint, zoom: f64) -> WcsResult<CelestialCoord> {
        self.pixel_to_celestial(self.map_to_pixel(point, zoom))
    }

    pub fn coordinate_to_point(&self, coord: CelestialCoord, zoom: f64) -> WcsResult<MapPoint> {
        let pixel = self.celestial_to_pixel(coord)?;
        Ok(self.pixel_to_map(pixel, zoom))
    }

    /// Equatorial coordinates into the image's own celestial frame.
    pub fn to_celestial_system(&self, coord: CelestialCoord) -> CelestialCoord {
        self.frame.from_equatorial(coord)
    }

    /// Image-frame coordinates back to equatorial.
    pub fn from_celestial_system(&self, coord: CelestialCoord) -> CelestialCoord {
        self.frame.to_equatorial(coord)
    }
}

/// Base zoom level at which an image of `image_size` fits the tile grid.
///
/// ```
/// use celestial_wcs::zoom1;
///
/// assert_eq!(zoom1([4096, 2048], [256, 256]), 4);
/// assert_eq!(zoom1([256, 100], [256, 256]), 0);
/// ```
pub fn zoom1(image_size: [u32; 2], tile_size: [u32; 2]) -> i32 {
    let rx = f64::from(image_size[0]) / f64::from(tile_size[0].max(1));
    let ry = f64::from(image_size[1]) / f64::from(tile_size[1].max(1));
    libm::log2(rx.max(ry)).ceil() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use celestial_core::assert_abs_lt;

    fn wcs_with(ctype: &str, cd: f64) -> Wcs {
        let mut params = ProjectionParameters {
            naxis: [2048, 1024],
            crpix: [1024.5, 512.5],
            crval: CelestialCoord::from_degrees(150.0, 2.2),
            cd: [[-cd, 0.0], [0.0, cd]],
            nzoom: 4,
            ..Default::default()
        };
        params.ctype.x = ctype.to_string();
        Wcs::build(params).unwrap()
    }

    #[test]
    fn test_scale_factor() {
        let wcs = wcs_with("RA---TAN", 1e-3);
        assert_eq!(wcs.scale_factor(3.0), 1.0);
        assert_eq!(wcs.scale_factor(4.0), 2.0);
        assert_eq!(wcs.scale_factor(0.0), 0.125);
    }

    #[test]
    fn test_map_pixel_transform() {
        let wcs = wcs_with("RA---TAN", 1e-3);
        // Top-left corner of the map is the top-left edge of the image.
        let p = wcs.map_to_pixel(MapPoint::new(0.0, 0.0), 3.0);
        assert_eq!(p.x(), 0.5);
        assert_eq!(p.y(), 1024.5);

        let m = wcs.pixel_to_map(PixelCoord::new(100.0, 200.0), 2.0);
        let back = wcs.map_to_pixel(m, 2.0);
        assert_abs_lt!(back.x(), 100.0, 1e-12);
        assert_abs_lt!(back.y(), 200.0, 1e-12);
    }

    #[test]
    fn test_reference_pixel_maps_to_crval() {
        for ctype in ["RA---TAN", "RA---ZEA"] {
            let wcs = wcs_with(ctype, 1e-3);
            let c = wcs.pixel_to_celestial(PixelCoord::new(1024.5, 512.5)).unwrap();
            assert_abs_lt!(c.lng_deg(), 150.0, 1e-10);
            assert_abs_lt!(c.lat_deg(), 2.2, 1e-10);
        }
    }

    #[test]
    fn test_family_and_code() {
        assert_eq!(wcs_with("RA---ZEA", 1e-3).code(), "WCS:ZEA");
        assert_eq!(wcs_with("RA---TAN", 1e-3).family(), ProjectionFamily::Tan);
        // Unsupported codes fall back to TAN.
        assert_eq!(wcs_with("RA---SIN", 1e-3).family(), ProjectionFamily::Tan);
    }

    #[test]
    fn test_finalized_params_are_complete() {
        let wcs = wcs_with("RA---TAN", 1e-3);
        let p = wcs.params();
        assert_eq!(p.natfid, Some(pole_native_coord()));
        let natpole = p.natpole.unwrap();
        assert_abs_lt!(natpole.phi().degrees(), 180.0, 1e-12);
        let celpole = p.celpole.unwrap();
        assert_abs_lt!(celpole.lat_deg(), 2.2, 1e-10);
    }

    #[test]
    fn test_pole_reference_keeps_orientation() {
        let at = |lat: f64| {
            let mut params = ProjectionParameters {
                crval: CelestialCoord::from_degrees(0.0, lat),
                cd: [[-1e-3, 0.0], [0.0, 1e-3]],
                ..Default::default()
            };
            params.ctype.x = "RA---TAN".to_string();
            Wcs::build(params)
                .unwrap()
                .pixel_to_celestial(PixelCoord::new(129.0, 139.0))
                .unwrap()
        };

        let near = at(89.9999);
        let exact = at(90.0);
        assert_abs_lt!(near.lng_deg(), 180.0, 1e-6);
        assert_abs_lt!(exact.lng_deg(), 180.0, 1e-6);
        assert_abs_lt!(exact.lat_deg(), 89.99, 1e-6);
        assert_abs_lt!(near.lat_deg(), exact.lat_deg() + 1e-4, 1e-6);
    }

    #[test]
    fn test_longitude_wrapped_across_zero() {
        let mut params = ProjectionParameters {
            crval: CelestialCoord::from_degrees(0.0, 0.0),
            cd: [[-0.01, 0.0], [0.0, 0.01]],
            ..Default::default()
        };
        params.ctype.x = "RA---TAN".to_string();
        let wcs = Wcs::build(params).unwrap();

        // Increasing x with negative CD1_1 goes to smaller RA, i.e. just below 360.
        let c = wcs.pixel_to_celestial(PixelCoord::new(139.0, 129.0)).unwrap();
        assert!(c.lng_deg() > 359.0 && c.lng_deg() < 360.0, "{}", c.lng_deg());
    }

    #[test]
    fn test_tan_far_side_is_domain_error() {
        let wcs = wcs_with("RA---TAN", 1e-3);
        let antipode = CelestialCoord::from_degrees(330.0, -2.2);
        let err = wcs.coordinate_to_point(antipode, 3.0).unwrap_err();
        assert!(err.is_out_of_domain());
    }

    #[test]
    fn test_nan_point_is_error_not_panic() {
        let wcs = wcs_with("RA---ZEA", 1e-3);
        assert!(wcs
            .point_to_coordinate(MapPoint::new(f64::NAN, 0.0), 3.0)
            .is_err());
    }

    #[test]
    fn test_equatorial_image_has_identity_celsys() {
        let wcs = wcs_with("RA---TAN", 1e-3);
        let c = CelestialCoord::from_degrees(12.0, -5.0);
        assert_eq!(wcs.to_celestial_system(c), c);
        assert_eq!(wcs.from_celestial_system(c), c);
    }

    #[test]
    fn test_galactic_image_celsys_roundtrip() {
        let wcs = wcs_with("GLON-TAN", 1e-3);
        assert_eq!(wcs.frame(), CelestialFrame::Galactic);
        let eq = CelestialCoord::from_degrees(83.8221, -5.3911);
        let back = wcs.from_celestial_system(wcs.to_celestial_system(eq));
        assert_abs_lt!(back.lng_deg(), eq.lng_deg(), 1e-9);
        assert_abs_lt!(back.lat_deg(), eq.lat_deg(), 1e-9);
    }

    #[test]
    fn test_singular_cd_rejected() {
        let params = ProjectionParameters {
            cd: [[0.0, 0.0], [0.0, 0.0]],
            ..Default::default()
        };
        assert!(Wcs::build(params).is_err());
    }

    #[test]
    fn test_zoom1() {
        assert_eq!(zoom1([1000, 1000], [256, 256]), 2);
        assert_eq!(zoom1([257, 10], [256, 256]), 1);
    }

    #[test]
    fn test_wcs_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Wcs>();
    }
}
