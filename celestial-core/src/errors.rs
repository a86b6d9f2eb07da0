//! Error types for angle handling.
//!
//! [`AstroError`] reports a value outside its valid domain: a latitude above
//! 90° or a non-finite input.
//!
//! ```
//! use celestial_core::{AstroError, errors::MathErrorKind};
//!
//! fn checked_latitude(lat: f64) -> Result<f64, AstroError> {
//!     if !(-90.0..=90.0).contains(&lat) {
//!         return Err(AstroError::math_error(
//!             "checked_latitude",
//!             MathErrorKind::OutOfRange,
//!             "latitude beyond the pole",
//!         ));
//!     }
//!     Ok(lat)
//! }
//! # assert!(checked_latitude(91.0).is_err());
//! ```

use thiserror::Error;

/// Classification of mathematical errors.
#[derive(Debug, Clone, PartialEq)]
pub enum MathErrorKind {
    /// Input value is invalid for the operation.
    InvalidInput,
    /// Result is NaN or infinity.
    NotFinite,
    /// Value outside valid domain (e.g., latitude > 90°).
    OutOfRange,
}

#[derive(Error, Debug)]
pub enum AstroError {
    /// Numerical domain failure.
    #[error("Math error in {operation} ({kind:?}): {message}")]
    MathError {
        operation: String,
        kind: MathErrorKind,
        message: String,
    },
}

impl AstroError {
    /// Creates a [`MathError`](Self::MathError) with the given kind.
    pub fn math_error(operation: &str, kind: MathErrorKind, reason: &str) -> Self {
        Self::MathError {
            operation: operation.to_string(),
            kind,
            message: reason.to_string(),
        }
    }
}
