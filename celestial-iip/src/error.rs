use celestial_wcs::WcsError;
use thiserror::Error;

pub type IipResult<T> = Result<T, IipError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IipError {
    /// The name resolver answered but did not know the object.
    #[error("{query}: Unknown location")]
    UnresolvedName { query: String },

    #[error("There was a problem with the request to the {service} (HTTP status {status})")]
    Transport { service: String, status: u16 },

    #[error("Unexpected response from {source_name}: {message}")]
    UnexpectedResponse {
        source_name: String,
        message: String,
    },

    #[error("Invalid viewer configuration: {message}")]
    Config { message: String },

    #[error(transparent)]
    Wcs(#[from] WcsError),
}

impl IipError {
    pub fn unresolved_name(query: impl Into<String>) -> Self {
        Self::UnresolvedName {
            query: query.into(),
        }
    }

    pub fn transport(service: impl Into<String>, status: u16) -> Self {
        Self::Transport {
            service: service.into(),
            status,
        }
    }

    pub fn unexpected_response(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_name_message() {
        let err = IipError::unresolved_name("NGC 99999");
        assert_eq!(err.to_string(), "NGC 99999: Unknown location");
    }

    #[test]
    fn test_transport_message() {
        let err = IipError::transport("Sesame service at CDS", 503);
        let msg = err.to_string();
        assert!(msg.starts_with("There was a problem with the request to the Sesame service at CDS"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_wcs_error_converts() {
        let err: IipError = WcsError::out_of_domain("TAN", "theta <= 0").into();
        assert!(matches!(err, IipError::Wcs(ref e) if e.is_out_of_domain()));
    }
}
