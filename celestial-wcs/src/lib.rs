//! FITS World Coordinate System engine for tiled astronomical images.
//!
//! The usual flow is: start a [`WcsLayer`] with default parameters, apply the
//! image's FITS header text, [`finalize`](WcsLayer::finalize) it, and use the
//! resulting [`Wcs`] to convert between map pixels at a zoom level and
//! celestial coordinates.
//!
//! ```
//! use celestial_wcs::{CelestialCoord, WcsLayer};
//!
//! let mut layer = WcsLayer::default();
//! layer.apply_header(
//!     "CTYPE1  = 'RA---ZEA'  CTYPE2  = 'DEC--ZEA'  \
//!      CRVAL1  = 10.684708   CRVAL2  = 41.26875    \
//!      CD1_1   = -2.0E-4     CD2_2   = 2.0E-4",
//! );
//! let wcs = layer.finalize().unwrap();
//!
//! let p = wcs.coordinate_to_point(CelestialCoord::from_degrees(10.7, 41.3), 8.0).unwrap();
//! let c = wcs.point_to_coordinate(p, 8.0).unwrap();
//! assert!((c.lng_deg() - 10.7).abs() < 1e-9);
//! ```
//!
//! Only the TAN and ZEA projections are implemented. Points a projection cannot
//! represent come back as [`WcsError::OutOfDomain`] rather than as NaN.

mod common;
pub mod coordinate;
pub mod engine;
pub mod error;
pub mod format;
pub mod frames;
pub mod header;
pub mod layer;
pub mod linear;
pub mod params;
pub mod scale;
pub mod spherical;

pub use coordinate::{CelestialCoord, IntermediateCoord, MapPoint, NativeCoord, PixelCoord};
pub use engine::{zoom1, Wcs};
pub use error::{WcsError, WcsResult};
pub use format::{parse_free_text, parse_pair, to_sexagesimal};
pub use frames::CelestialFrame;
pub use header::{parse_header, FitsHeader, HeaderOverrides, KeywordProvider};
pub use layer::{ReadyListener, WcsLayer};
pub use linear::{CdMatrix, LinearTransform};
pub use params::{CType, ProjectionParameters};
pub use scale::{degrees_per_pixel, local_jacobian};
pub use spherical::{ProjectionFamily, ProjectionOps, SphericalRotation};
