use celestial_core::Angle;

/// FITS pixel position, 1-indexed with the centre of the first pixel at (1, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelCoord {
    x: f64,
    y: f64,
}

impl PixelCoord {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Position in the map host's pixel space at a given zoom level.
///
/// Origin at the top-left of the full image, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntermediateCoord {
    x: f64,
    y: f64,
}

impl IntermediateCoord {
    #[inline]
    pub fn new(x_deg: f64, y_deg: f64) -> Self {
        Self { x: x_deg, y: y_deg }
    }

    #[inline]
    pub fn x_deg(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y_deg(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn x_rad(&self) -> f64 {
        self.x.to_radians()
    }

    #[inline]
    pub fn y_rad(&self) -> f64 {
        self.y.to_radians()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeCoord {
    phi: Angle,
    theta: Angle,
}

impl NativeCoord {
    #[inline]
    pub fn new(phi: Angle, theta: Angle) -> Self {
        Self { phi, theta }
    }

    #[inline]
    pub fn from_degrees(phi: f64, theta: f64) -> Self {
        Self::new(Angle::from_degrees(phi), Angle::from_degrees(theta))
    }

    #[inline]
    pub fn phi(&self) -> Angle {
        self.phi
    }

    #[inline]
    pub fn theta(&self) -> Angle {
        self.theta
    }
}

/// Longitude/latitude on the sky in whatever celestial frame the caller is
/// working in (equatorial RA/Dec, galactic l/b, ecliptic).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialCoord {
    lng: Angle,
    lat: Angle,
}

impl CelestialCoord {
    #[inline]
    pub fn new(lng: Angle, lat: Angle) -> Self {
        Self { lng, lat }
    }

    #[inline]
    pub fn from_degrees(lng: f64, lat: f64) -> Self {
        Self::new(Angle::from_degrees(lng), Angle::from_degrees(lat))
    }

    #[inline]
    pub fn lng(&self) -> Angle {
        self.lng
    }

    #[inline]
    pub fn lat(&self) -> Angle {
        self.lat
    }

    #[inline]
    pub fn lng_deg(&self) -> f64 {
        self.lng.degrees()
    }

    #[inline]
    pub fn lat_deg(&self) -> f64 {
        self.lat.degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_coord_new_and_accessors() {
        let p = PixelCoord::new(100.5, 200.5);
        assert_eq!(p.x(), 100.5);
        assert_eq!(p.y(), 200.5);
    }

    #[test]
    fn test_map_point_offset() {
        let p = MapPoint::new(10.0, 20.0).offset(10.0, 0.0);
        assert_eq!(p, MapPoint::new(20.0, 20.0));
    }

    #[test]
    fn test_intermediate_radians() {
        let i = IntermediateCoord::new(180.0, -90.0);
        assert!((i.x_rad() - celestial_core::constants::PI).abs() < 1e-15);
        assert!((i.y_rad() + celestial_core::constants::HALF_PI).abs() < 1e-15);
    }

    #[test]
    fn test_celestial_degrees() {
        let c = CelestialCoord::from_degrees(10.684708, 41.26875);
        assert!((c.lng_deg() - 10.684708).abs() < 1e-12);
        assert!((c.lat_deg() - 41.26875).abs() < 1e-12);
    }
}
