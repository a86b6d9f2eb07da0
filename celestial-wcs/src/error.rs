use thiserror::Error;

pub type WcsResult<T> = Result<T, WcsError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WcsError {
    #[error("Invalid WCS keyword '{keyword}': {message}")]
    InvalidKeyword { keyword: String, message: String },

    #[error("Unsupported projection: {code}")]
    UnsupportedProjection { code: String },

    /// The point has no image under the active projection.
    #[error("{projection} projection undefined here: {message}")]
    OutOfDomain {
        projection: &'static str,
        message: String,
    },

    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Non-invertible matrix (determinant = {determinant})")]
    NonInvertibleMatrix { determinant: f64 },
}

impl WcsError {
    pub fn invalid_keyword(keyword: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKeyword {
            keyword: keyword.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_projection(code: impl Into<String>) -> Self {
        Self::UnsupportedProjection { code: code.into() }
    }

    pub fn out_of_domain(projection: &'static str, message: impl Into<String>) -> Self {
        Self::OutOfDomain {
            projection,
            message: message.into(),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    pub fn non_invertible_matrix(determinant: f64) -> Self {
        Self::NonInvertibleMatrix { determinant }
    }

    /// Domain failures are expected while sweeping a viewport; callers usually
    /// skip the point rather than report it.
    pub fn is_out_of_domain(&self) -> bool {
        matches!(self, Self::OutOfDomain { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_keyword() {
        let err = WcsError::invalid_keyword("NAXIS1", "must be positive");
        assert!(err.to_string().contains("NAXIS1"));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_unsupported_projection() {
        let err = WcsError::unsupported_projection("XYZ");
        assert!(err.to_string().contains("XYZ"));
    }

    #[test]
    fn test_out_of_domain() {
        let err = WcsError::out_of_domain("TAN", "theta <= 0");
        assert!(err.is_out_of_domain());
        assert_eq!(err.to_string(), "TAN projection undefined here: theta <= 0");
    }

    #[test]
    fn test_non_invertible_matrix() {
        let err = WcsError::non_invertible_matrix(0.0);
        assert!(!err.is_out_of_domain());
        assert!(err.to_string().contains("0"));
    }
}
