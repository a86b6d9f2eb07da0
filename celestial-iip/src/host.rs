//! The map widget the controls talk to.
//!
//! The viewer itself (tile rendering, input events) lives outside this crate.
//! Controls only need to ask it where the view is and to move it, which is
//! what [`MapHost`] captures. Coordinates crossing this boundary are in the
//! image's own celestial frame; map points are in map pixels at the host's
//! current zoom.

use std::sync::Arc;

use celestial_wcs::{CelestialCoord, MapPoint, Wcs, WcsResult};

pub trait MapHost {
    /// Map point of `coord` at `zoom`.
    fn project(&self, coord: CelestialCoord, zoom: f64) -> WcsResult<MapPoint>;

    /// Coordinate under map point `point` at `zoom`.
    fn unproject(&self, point: MapPoint, zoom: f64) -> WcsResult<CelestialCoord>;

    fn center(&self) -> CelestialCoord;

    fn zoom(&self) -> f64;

    fn pan_to(&mut self, coord: CelestialCoord);
}

/// A headless host that keeps a view center and zoom over a finalized [`Wcs`].
///
/// Used by the command-line tool and in tests in place of a real map widget.
#[derive(Debug, Clone)]
pub struct StaticView {
    wcs: Arc<Wcs>,
    center: CelestialCoord,
    zoom: f64,
}

impl StaticView {
    /// Starts centered on the reference point at the given zoom.
    pub fn new(wcs: Arc<Wcs>, zoom: f64) -> Self {
        let center = wcs.params().crval;
        Self { wcs, center, zoom }
    }

    pub fn wcs(&self) -> &Arc<Wcs> {
        &self.wcs
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom;
    }
}

impl MapHost for StaticView {
    fn project(&self, coord: CelestialCoord, zoom: f64) -> WcsResult<MapPoint> {
        self.wcs.coordinate_to_point(coord, zoom)
    }

    fn unproject(&self, point: MapPoint, zoom: f64) -> WcsResult<CelestialCoord> {
        self.wcs.point_to_coordinate(point, zoom)
    }

    fn center(&self) -> CelestialCoord {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn pan_to(&mut self, coord: CelestialCoord) {
        self.center = coord;
    }
}
