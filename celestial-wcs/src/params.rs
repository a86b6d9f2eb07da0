use tracing::debug;

use crate::coordinate::{CelestialCoord, NativeCoord};
use crate::error::{WcsError, WcsResult};
use crate::header::HeaderOverrides;

/// FITS axis type codes, e.g. `RA---TAN` / `DEC--TAN`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CType {
    pub x: String,
    pub y: String,
}

impl Default for CType {
    fn default() -> Self {
        Self {
            x: "RA---TAN".to_string(),
            y: "DEC--TAN".to_string(),
        }
    }
}

/// Everything needed to build a [`Wcs`](crate::Wcs).
///
/// Filled from defaults, then optionally from an image header, then completed
/// by the projection family's `paraminit` during finalize. `natpole`,
/// `celpole` and `natfid` are `None` until something sets them.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionParameters {
    pub ctype: CType,
    pub naxis: [u32; 2],
    pub crpix: [f64; 2],
    pub crval: CelestialCoord,
    pub cd: [[f64; 2]; 2],
    /// Native coordinates of the celestial pole (phi_p = LONPOLE, theta_p = LATPOLE).
    pub natpole: Option<NativeCoord>,
    /// Celestial coordinates of the native pole (alpha_p, delta_p). Derived.
    pub celpole: Option<CelestialCoord>,
    /// Native coordinates of the fiducial point (phi_0, theta_0).
    pub natfid: Option<NativeCoord>,
    pub tile_size: [u32; 2],
    /// Number of zoom levels of the tiled image.
    pub nzoom: i32,
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self {
            ctype: CType::default(),
            naxis: [256, 256],
            crpix: [129.0, 129.0],
            crval: CelestialCoord::from_degrees(0.0, 0.0),
            cd: [[1.0, 0.0], [0.0, 1.0]],
            natpole: None,
            celpole: None,
            natfid: None,
            tile_size: [256, 256],
            nzoom: 9,
        }
    }
}

impl ProjectionParameters {
    /// Copies every value present in `overrides`. Returns how many were applied.
    pub fn apply_overrides(&mut self, overrides: &HeaderOverrides) -> usize {
        let mut applied = 0;

        if let Some(x) = &overrides.ctype[0] {
            self.ctype.x = x.clone();
            applied += 1;
        }
        if let Some(y) = &overrides.ctype[1] {
            self.ctype.y = y.clone();
            applied += 1;
        }

        for (axis, value) in overrides.naxis.iter().enumerate() {
            if let Some(v) = *value {
                match u32::try_from(v) {
                    Ok(n) => {
                        self.naxis[axis] = n;
                        applied += 1;
                    }
                    Err(_) => debug!(axis = axis + 1, value = v, "ignoring negative NAXIS"),
                }
            }
        }

        for (axis, value) in overrides.crpix.iter().enumerate() {
            if let Some(v) = *value {
                self.crpix[axis] = v;
                applied += 1;
            }
        }

        if let Some(lng) = overrides.crval[0] {
            self.crval = CelestialCoord::from_degrees(lng, self.crval.lat_deg());
            applied += 1;
        }
        if let Some(lat) = overrides.crval[1] {
            self.crval = CelestialCoord::from_degrees(self.crval.lng_deg(), lat);
            applied += 1;
        }

        for (i, row) in overrides.cd.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                if let Some(v) = *value {
                    self.cd[i][j] = v;
                    applied += 1;
                }
            }
        }

        applied
    }

    /// Checks the values finalize cannot repair.
    pub fn validate(&self) -> WcsResult<()> {
        if self.naxis[0] == 0 || self.naxis[1] == 0 {
            return Err(WcsError::invalid_parameter(format!(
                "NAXIS must be positive, got {}x{}",
                self.naxis[0], self.naxis[1]
            )));
        }
        if self.tile_size[0] == 0 || self.tile_size[1] == 0 {
            return Err(WcsError::invalid_parameter("tile size must be positive"));
        }
        if !self.crpix.iter().all(|v| v.is_finite()) {
            return Err(WcsError::invalid_keyword("CRPIX", "not finite"));
        }
        self.crval
            .lng()
            .validate_longitude()
            .map_err(|e| WcsError::invalid_keyword("CRVAL1", e.to_string()))?;
        self.crval
            .lat()
            .validate_latitude()
            .map_err(|e| WcsError::invalid_keyword("CRVAL2", e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::parse_header;

    #[test]
    fn test_defaults() {
        let p = ProjectionParameters::default();
        assert_eq!(p.ctype.x, "RA---TAN");
        assert_eq!(p.naxis, [256, 256]);
        assert_eq!(p.crpix, [129.0, 129.0]);
        assert_eq!(p.nzoom, 9);
        assert!(p.natfid.is_none());
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_apply_partial_header_keeps_defaults() {
        let mut p = ProjectionParameters::default();
        let applied = p.apply_overrides(&parse_header(
            "CRVAL1  =     10.684708\nCTYPE2  = 'DEC--TAN'\n",
        ));

        assert_eq!(applied, 2);
        assert_eq!(p.ctype.x, "RA---TAN");
        assert!((p.crval.lng_deg() - 10.684708).abs() < 1e-12);
        assert_eq!(p.crval.lat_deg(), 0.0);
    }

    #[test]
    fn test_negative_naxis_ignored() {
        let mut p = ProjectionParameters::default();
        let applied = p.apply_overrides(&parse_header("NAXIS1  = -5\nNAXIS2  = 1000"));
        assert_eq!(applied, 1);
        assert_eq!(p.naxis, [256, 1000]);
    }

    #[test]
    fn test_cd_elements_applied_individually() {
        let mut p = ProjectionParameters::default();
        p.apply_overrides(&parse_header("CD1_2   = 0.25\nCD2_2   = -2.0"));
        assert_eq!(p.cd, [[1.0, 0.25], [0.0, -2.0]]);
    }

    #[test]
    fn test_validate_rejects_zero_naxis() {
        let p = ProjectionParameters {
            naxis: [0, 100],
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(WcsError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_bad_crval() {
        let p = ProjectionParameters {
            crval: CelestialCoord::from_degrees(10.0, 95.0),
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(WcsError::InvalidKeyword { ref keyword, .. }) if keyword == "CRVAL2"
        ));

        let pole = ProjectionParameters {
            crval: CelestialCoord::from_degrees(0.0, 90.0),
            ..Default::default()
        };
        assert!(pole.validate().is_ok());

        let nan = ProjectionParameters {
            crval: CelestialCoord::from_degrees(f64::NAN, 0.0),
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }
}
