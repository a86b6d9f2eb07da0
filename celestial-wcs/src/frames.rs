//! Celestial frames an image can be calibrated in.
//!
//! The WCS engine returns coordinates in the image's own frame (whatever
//! `CTYPE1` says). Display code that wants equatorial coordinates, or the
//! reverse, goes through [`CelestialFrame::to_equatorial`] and
//! [`CelestialFrame::from_equatorial`].

use celestial_core::constants::J2000_OBLIQUITY_RAD;
use celestial_core::utils::wrap_longitude_360;
use celestial_core::{Angle, RotationMatrix3};
use once_cell::sync::Lazy;

use crate::coordinate::CelestialCoord;

/// ICRS to galactic rotation (rows), Hipparcos definition.
/// Reference: A&A 526, A16 (2011); ERFA `eraIcrs2g`.
#[allow(clippy::excessive_precision)]
const ICRS_TO_GALACTIC: [[f64; 3]; 3] = [
    [
        -0.054875560416215368492398900454,
        -0.873437090234885048760383168409,
        -0.483835015548713226831774175116,
    ],
    [
        0.494109427875583673525222371358,
        -0.444829629960011178146614061616,
        0.746982244497218890527388004556,
    ],
    [
        -0.867666149019004701181616534570,
        -0.198076373431201528180486091412,
        0.455983776175066922272100478348,
    ],
];

static EQUATORIAL_TO_GALACTIC: Lazy<RotationMatrix3> =
    Lazy::new(|| RotationMatrix3::from_array(ICRS_TO_GALACTIC));

static EQUATORIAL_TO_ECLIPTIC: Lazy<RotationMatrix3> = Lazy::new(|| {
    let mut m = RotationMatrix3::identity();
    m.rotate_x(J2000_OBLIQUITY_RAD);
    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CelestialFrame {
    /// ICRS / J2000 right ascension and declination.
    #[default]
    Equatorial,
    Galactic,
    /// J2000 mean ecliptic.
    Ecliptic,
    /// Not a celestial axis (e.g. `PIXEL`, `LINEAR`): coordinates are shown raw.
    Pixel,
}

impl CelestialFrame {
    /// Resolves the frame from the part of `CTYPE1` before the first dash.
    pub fn from_ctype(ctype: &str) -> Self {
        let prefix = ctype.split('-').next().unwrap_or("").trim();
        match prefix {
            "RA" | "DEC" => Self::Equatorial,
            "GLON" | "GLAT" => Self::Galactic,
            "ELON" | "ELAT" => Self::Ecliptic,
            _ => Self::Pixel,
        }
    }

    pub fn is_celestial(self) -> bool {
        self != Self::Pixel
    }

    fn rotation_from_equatorial(self) -> Option<&'static RotationMatrix3> {
        match self {
            Self::Galactic => Some(&EQUATORIAL_TO_GALACTIC),
            Self::Ecliptic => Some(&EQUATORIAL_TO_ECLIPTIC),
            Self::Equatorial | Self::Pixel => None,
        }
    }

    /// Equatorial to this frame. Identity for equatorial and pixel frames.
    pub fn from_equatorial(self, coord: CelestialCoord) -> CelestialCoord {
        match self.rotation_from_equatorial() {
            Some(m) => rotate(m, coord),
            None => coord,
        }
    }

    /// This frame to equatorial.
    pub fn to_equatorial(self, coord: CelestialCoord) -> CelestialCoord {
        match self.rotation_from_equatorial() {
            Some(m) => rotate(&m.transpose(), coord),
            None => coord,
        }
    }
}

fn rotate(m: &RotationMatrix3, coord: CelestialCoord) -> CelestialCoord {
    let (lng, lat) = m.transform_spherical(coord.lng().radians(), coord.lat().radians());
    CelestialCoord::new(
        Angle::from_degrees(wrap_longitude_360(lng.to_degrees())),
        Angle::from_radians(lat),
    )
}
