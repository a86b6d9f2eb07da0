use celestial_core::constants::{HALF_PI, RAD_TO_DEG};
use celestial_core::utils::normalize_longitude;
use celestial_core::Angle;

use crate::common::{asin_safe, native_coord_from_radians};
use crate::coordinate::{CelestialCoord, NativeCoord};
use crate::error::{WcsError, WcsResult};

/// Rotation between native spherical coordinates (phi, theta) and celestial
/// (lng, lat), fixed by the celestial pole (alpha_p, delta_p) and the native
/// longitude of that pole phi_p.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalRotation {
    alpha_p: f64,
    delta_p: f64,
    phi_p: f64,
    sin_delta_p: f64,
    cos_delta_p: f64,
}

impl SphericalRotation {
    pub fn new(alpha_p: Angle, delta_p: Angle, phi_p: Angle) -> Self {
        let delta_p_rad = delta_p.radians();
        let (sin_delta_p, cos_delta_p) = delta_p_rad.sin_cos();
        Self {
            alpha_p: alpha_p.radians(),
            delta_p: delta_p_rad,
            phi_p: phi_p.radians(),
            sin_delta_p,
            cos_delta_p,
        }
    }

    /// Derives the celestial pole from the reference point `(alpha_0, delta_0)`
    /// sitting at native latitude `theta_0`. `lonpole` defaults to 180 degrees
    /// and `latpole` to +90.
    pub fn from_crval(
        alpha_0: Angle,
        delta_0: Angle,
        theta_0: Angle,
        lonpole: Option<Angle>,
        latpole: Option<Angle>,
    ) -> WcsResult<Self> {
        let phi_p = lonpole.unwrap_or(Angle::from_degrees(180.0));
        let latpole_rad = latpole.map(|a| a.radians()).unwrap_or(HALF_PI);

        let (sin_delta_0, cos_delta_0) = delta_0.sin_cos();
        let (sin_theta_0, cos_theta_0) = theta_0.sin_cos();
        let (sin_phi_p, cos_phi_p) = phi_p.sin_cos();

        let delta_p = Self::compute_delta_p(
            sin_delta_0,
            sin_theta_0,
            cos_theta_0,
            sin_phi_p,
            cos_phi_p,
            latpole_rad,
        )?;

        let x = -cos_theta_0 * sin_phi_p;
        let y = sin_theta_0 * cos_delta_0 - cos_theta_0 * sin_delta_0 * cos_phi_p;
        let alpha_p = alpha_0.radians() + x.atan2(y);

        Ok(Self::new(
            Angle::from_degrees(normalize_longitude(alpha_p * RAD_TO_DEG)),
            Angle::from_radians(delta_p),
            phi_p,
        ))
    }

    fn compute_delta_p(
        sin_delta_0: f64,
        sin_theta_0: f64,
        cos_theta_0: f64,
        sin_phi_p: f64,
        cos_phi_p: f64,
        latpole_rad: f64,
    ) -> WcsResult<f64> {
        let cos_theta_0_sin_phi_p = cos_theta_0 * sin_phi_p;
        let denom_sq = 1.0 - cos_theta_0_sin_phi_p * cos_theta_0_sin_phi_p;

        if denom_sq.abs() < 1e-15 {
            if sin_delta_0.abs() < 1e-15 {
                return Ok(latpole_rad);
            }
            return Err(WcsError::invalid_parameter(
                "no celestial pole solution for this CRVAL and LONPOLE",
            ));
        }

        let arg = sin_delta_0 / denom_sq.sqrt();
        if arg.abs() > 1.0 + 1e-15 {
            return Err(WcsError::invalid_parameter(
                "celestial pole acos argument out of range",
            ));
        }

        let acos_term = arg.clamp(-1.0, 1.0).acos();
        let base = sin_theta_0.atan2(cos_theta_0 * cos_phi_p);

        let delta_p_1 = base + acos_term;
        let delta_p_2 = base - acos_term;

        const BOUNDARY_TOL: f64 = 1e-14;
        let in_range = |v: f64| (-HALF_PI - BOUNDARY_TOL..=HALF_PI + BOUNDARY_TOL).contains(&v);
        let clamp = |v: f64| v.clamp(-HALF_PI, HALF_PI);

        match (in_range(delta_p_1), in_range(delta_p_2)) {
            (true, false) => Ok(clamp(delta_p_1)),
            (false, true) => Ok(clamp(delta_p_2)),
            (true, true) => {
                // LATPOLE picks between the two poles
                if (delta_p_1 - latpole_rad).abs() <= (delta_p_2 - latpole_rad).abs() {
                    Ok(clamp(delta_p_1))
                } else {
                    Ok(clamp(delta_p_2))
                }
            }
            (false, false) => Err(WcsError::invalid_parameter(
                "no celestial pole latitude in [-90, 90]",
            )),
        }
    }

    /// Native to celestial. The returned longitude lies in (-180, 180].
    pub fn native_to_celestial(&self, native: NativeCoord) -> CelestialCoord {
        let (sin_theta, cos_theta) = native.theta().sin_cos();
        let d_phi = native.phi().radians() - self.phi_p;
        let (sin_d_phi, cos_d_phi) = d_phi.sin_cos();

        let sin_delta = sin_theta * self.sin_delta_p + cos_theta * self.cos_delta_p * cos_d_phi;
        let delta = asin_safe(sin_delta);

        let x = -cos_theta * sin_d_phi;
        let y = sin_theta * self.cos_delta_p - cos_theta * self.sin_delta_p * cos_d_phi;
        let alpha = self.alpha_p + x.atan2(y);

        CelestialCoord::new(
            Angle::from_degrees(normalize_longitude(alpha * RAD_TO_DEG)),
            Angle::from_radians(delta),
        )
    }

    pub fn celestial_to_native(&self, celestial: CelestialCoord) -> NativeCoord {
        let (sin_delta, cos_delta) = celestial.lat().sin_cos();
        let d_alpha = celestial.lng().radians() - self.alpha_p;
        let (sin_d_alpha, cos_d_alpha) = d_alpha.sin_cos();

        let sin_theta = sin_delta * self.sin_delta_p + cos_delta * self.cos_delta_p * cos_d_alpha;
        let theta = asin_safe(sin_theta);

        let x = -cos_delta * sin_d_alpha;
        let y = sin_delta * self.cos_delta_p - cos_delta * self.sin_delta_p * cos_d_alpha;
        let phi = self.phi_p + x.atan2(y);

        native_coord_from_radians(phi, theta)
    }

    /// Celestial coordinates of the native pole, (alpha_p, delta_p).
    pub fn celestial_pole(&self) -> CelestialCoord {
        CelestialCoord::new(
            Angle::from_radians(self.alpha_p),
            Angle::from_radians(self.delta_p),
        )
    }

    #[inline]
    pub fn phi_p_degrees(&self) -> f64 {
        self.phi_p * RAD_TO_DEG
    }

    #[inline]
    pub fn delta_p_degrees(&self) -> f64 {
        self.delta_p * RAD_TO_DEG
    }
}
