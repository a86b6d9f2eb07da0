//! 3x3 rotation matrices for celestial frame changes.
//!
//! The viewer only needs fixed rotations between the equatorial, galactic and
//! ecliptic frames, so this type stays small: build it from a literal
//! array or from an X-axis rotation, then apply it to unit vectors or directly to
//! a spherical (longitude, latitude) pair.
//!
//! ```
//! use celestial_core::RotationMatrix3;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let mut m = RotationMatrix3::identity();
//! m.rotate_x(FRAC_PI_2);
//!
//! // The +Y axis lands on -Z.
//! let v = m.apply_to_vector([0.0, 1.0, 0.0]);
//! assert!((v[2] + 1.0).abs() < 1e-15);
//! ```

use std::fmt;

/// Row-major 3x3 rotation matrix. Angles are radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix3 {
    elements: [[f64; 3]; 3],
}

impl RotationMatrix3 {
    pub fn identity() -> Self {
        Self {
            elements: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// `elements[i][j]` is row `i`, column `j`. No orthogonality check is made.
    pub fn from_array(elements: [[f64; 3]; 3]) -> Self {
        Self { elements }
    }

    pub fn elements(&self) -> &[[f64; 3]; 3] {
        &self.elements
    }

    /// Replaces `self` with `Rx(phi) * self`.
    ///
    /// ```text
    /// Rx(phi) = | 1    0         0       |
    ///           | 0    cos(phi)  sin(phi)|
    ///           | 0   -sin(phi)  cos(phi)|
    /// ```
    pub fn rotate_x(&mut self, phi: f64) {
        let (s, c) = phi.sin_cos();
        let e = &mut self.elements;

        for col in 0..3 {
            let r1 = e[1][col];
            let r2 = e[2][col];
            e[1][col] = c * r1 + s * r2;
            e[2][col] = -s * r1 + c * r2;
        }
    }

    pub fn multiply(&self, other: &Self) -> Self {
        let mut result = [[0.0; 3]; 3];

        for (i, row) in result.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                for k in 0..3 {
                    *cell += self.elements[i][k] * other.elements[k][j];
                }
            }
        }

        Self::from_array(result)
    }

    pub fn apply_to_vector(&self, v: [f64; 3]) -> [f64; 3] {
        let m = &self.elements;
        [
            m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
            m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
            m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
        ]
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.elements;

        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse of a proper rotation.
    pub fn transpose(&self) -> Self {
        let m = &self.elements;
        Self::from_array([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Rotates a spherical direction. Input and output are (longitude, latitude)
    /// in radians; the returned longitude is in (-pi, pi].
    pub fn transform_spherical(&self, lng: f64, lat: f64) -> (f64, f64) {
        let (sin_lng, cos_lng) = lng.sin_cos();
        let (sin_lat, cos_lat) = lat.sin_cos();
        let t = self.apply_to_vector([cos_lat * cos_lng, cos_lat * sin_lng, sin_lat]);

        let new_lng = t[1].atan2(t[0]);
        let norm = (t[0] * t[0] + t[1] * t[1] + t[2] * t[2]).sqrt();
        let z = if norm == 0.0 {
            0.0
        } else {
            (t[2] / norm).clamp(-1.0, 1.0)
        };

        (new_lng, z.asin())
    }
}

impl std::ops::Mul for RotationMatrix3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl fmt::Display for RotationMatrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.elements {
            writeln!(f, "[{:>12.9} {:>12.9} {:>12.9}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_leaves_vector() {
        let v = [0.3, -0.4, 0.5];
        assert_eq!(RotationMatrix3::identity().apply_to_vector(v), v);
    }

    #[test]
    fn test_rotate_x_determinant_is_one() {
        let mut m = RotationMatrix3::identity();
        m.rotate_x(0.409);
        assert!((m.determinant() - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_transpose_inverts() {
        let mut m = RotationMatrix3::identity();
        m.rotate_x(0.7);
        let p = m * m.transpose();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((p.elements()[i][j] - expected).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_transform_spherical_pole() {
        let mut m = RotationMatrix3::identity();
        m.rotate_x(FRAC_PI_2);
        // +Z pole lands on +Y, i.e. lng 90 deg on the equator
        let (lng, lat) = m.transform_spherical(0.0, FRAC_PI_2);
        assert!((lng - FRAC_PI_2).abs() < 1e-12);
        assert!(lat.abs() < 1e-12);
    }
}
