use crate::coordinate::{IntermediateCoord, PixelCoord};
use crate::error::{WcsError, WcsResult};

const DETERMINANT_THRESHOLD: f64 = 1e-15;

/// The FITS `CD` matrix together with its inverse.
///
/// The inverse is computed whenever the matrix is built, so the pair can never
/// drift apart. Singular matrices are rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdMatrix {
    cd: [[f64; 2]; 2],
    cdinv: [[f64; 2]; 2],
    determinant: f64,
}

impl CdMatrix {
    pub fn new(cd: [[f64; 2]; 2]) -> WcsResult<Self> {
        let determinant = cd[0][0] * cd[1][1] - cd[0][1] * cd[1][0];
        if !determinant.is_finite() || determinant.abs() < DETERMINANT_THRESHOLD {
            return Err(WcsError::non_invertible_matrix(determinant));
        }
        Ok(Self {
            cd,
            cdinv: compute_inverse(cd, determinant),
            determinant,
        })
    }

    pub fn identity() -> Self {
        Self {
            cd: [[1.0, 0.0], [0.0, 1.0]],
            cdinv: [[1.0, 0.0], [0.0, 1.0]],
            determinant: 1.0,
        }
    }

    #[inline]
    pub fn cd(&self) -> [[f64; 2]; 2] {
        self.cd
    }

    #[inline]
    pub fn cdinv(&self) -> [[f64; 2]; 2] {
        self.cdinv
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.determinant
    }

    /// Geometric mean pixel scale in degrees.
    #[inline]
    pub fn pixel_scale(&self) -> f64 {
        libm::sqrt(self.determinant.abs())
    }
}

impl Default for CdMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

/// Pixel offset from `CRPIX` mapped through `CD` onto the intermediate plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearTransform {
    crpix: [f64; 2],
    cd: CdMatrix,
}

impl LinearTransform {
    pub fn new(crpix: [f64; 2], cd: CdMatrix) -> Self {
        Self { crpix, cd }
    }

    pub fn from_cd(crpix: [f64; 2], cd: [[f64; 2]; 2]) -> WcsResult<Self> {
        Ok(Self::new(crpix, CdMatrix::new(cd)?))
    }

    pub fn pixel_to_intermediate(&self, pixel: PixelCoord) -> IntermediateCoord {
        let m = self.cd.cd;
        let d0 = pixel.x() - self.crpix[0];
        let d1 = pixel.y() - self.crpix[1];
        let x = m[0][0] * d0 + m[0][1] * d1;
        let y = m[1][0] * d0 + m[1][1] * d1;
        IntermediateCoord::new(x, y)
    }

    pub fn intermediate_to_pixel(&self, inter: IntermediateCoord) -> PixelCoord {
        let m = self.cd.cdinv;
        let x = inter.x_deg();
        let y = inter.y_deg();
        let px = m[0][0] * x + m[0][1] * y + self.crpix[0];
        let py = m[1][0] * x + m[1][1] * y + self.crpix[1];
        PixelCoord::new(px, py)
    }

    #[inline]
    pub fn crpix(&self) -> [f64; 2] {
        self.crpix
    }

    #[inline]
    pub fn cd(&self) -> &CdMatrix {
        &self.cd
    }
}

fn compute_inverse(m: [[f64; 2]; 2], det: f64) -> [[f64; 2]; 2] {
    let inv_det = 1.0 / det;
    [
        [m[1][1] * inv_det, -m[0][1] * inv_det],
        [-m[1][0] * inv_det, m[0][0] * inv_det],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cdinv_is_inverse() {
        let cd = CdMatrix::new([[-2.7e-4, 1.1e-5], [1.3e-5, 2.7e-4]]).unwrap();
        let a = cd.cd();
        let b = cd.cdinv();
        for i in 0..2 {
            for j in 0..2 {
                let v = a[i][0] * b[0][j] + a[i][1] * b[1][j];
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((v - expected).abs() < 1e-12, "({i},{j}) = {v}");
            }
        }
    }

    #[test]
    fn test_identity_default() {
        let cd = CdMatrix::default();
        assert_eq!(cd.cd(), cd.cdinv());
        assert_eq!(cd.pixel_scale(), 1.0);
    }

    #[test]
    fn test_roundtrip_pixel_intermediate_pixel() {
        let transform = LinearTransform::from_cd([512.0, 512.0], [[0.001, 0.0], [0.0, 0.001]])
            .unwrap();

        let original = PixelCoord::new(256.0, 768.0);
        let intermediate = transform.pixel_to_intermediate(original);
        let recovered = transform.intermediate_to_pixel(intermediate);

        assert_eq!(original.x(), recovered.x());
        assert_eq!(original.y(), recovered.y());
    }

    #[test]
    fn test_known_values() {
        let transform = LinearTransform::from_cd([512.0, 512.0], [[0.001, 0.0], [0.0, 0.001]])
            .unwrap();

        let inter = transform.pixel_to_intermediate(PixelCoord::new(256.0, 256.0));

        assert_eq!(inter.x_deg(), -0.256);
        assert_eq!(inter.y_deg(), -0.256);
    }

    #[test]
    fn test_non_invertible_matrix() {
        let result = CdMatrix::new([[1.0, 2.0], [2.0, 4.0]]);
        match result {
            Err(WcsError::NonInvertibleMatrix { determinant }) => {
                assert_eq!(determinant, 0.0);
            }
            other => panic!("Expected NonInvertibleMatrix error, got {other:?}"),
        }
    }

    #[test]
    fn test_nan_matrix_rejected() {
        assert!(CdMatrix::new([[f64::NAN, 0.0], [0.0, 1.0]]).is_err());
    }

    #[test]
    fn test_rotated_matrix_roundtrip() {
        let angle = celestial_core::constants::PI / 6.0;
        let scale = 0.0005;
        let (s, c) = angle.sin_cos();
        let transform =
            LinearTransform::from_cd([256.0, 256.0], [[scale * c, -scale * s], [scale * s, scale * c]])
                .unwrap();

        let original = PixelCoord::new(100.0, 400.0);
        let recovered = transform.intermediate_to_pixel(transform.pixel_to_intermediate(original));

        assert!((original.x() - recovered.x()).abs() < 1e-9);
        assert!((original.y() - recovered.y()).abs() < 1e-9);
    }
}
