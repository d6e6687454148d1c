use std::io::Error as IoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Truncated stream: {0}")]
    TruncatedStream(String),

    #[error("Framing integrity error: previous tag size {actual} does not match expected {expected}")]
    FramingIntegrity { expected: u32, actual: u32 },

    #[error("Unsupported tag type: {0}")]
    UnsupportedTagType(u8),

    #[error("AMF decode error: {0}")]
    AmfDecode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Create a format error
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }

    /// Create a truncated stream error
    pub fn truncated(msg: impl Into<String>) -> Self {
        Error::TruncatedStream(msg.into())
    }

    /// Create a framing integrity error
    pub fn framing(expected: u32, actual: u32) -> Self {
        Error::FramingIntegrity { expected, actual }
    }

    /// Create an AMF decode error
    pub fn amf_decode(msg: impl Into<String>) -> Self {
        Error::AmfDecode(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// True for errors that mean the stream ended early rather than being malformed
    pub fn is_truncation(&self) -> bool {
        matches!(self, Error::TruncatedStream(_))
    }
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::format("signature GLV is not FLV");
        assert_eq!(format!("{}", err), "Format error: signature GLV is not FLV");

        let err = Error::framing(20, 19);
        assert_eq!(
            format!("{}", err),
            "Framing integrity error: previous tag size 19 does not match expected 20"
        );

        let err = Error::UnsupportedTagType(7);
        assert_eq!(format!("{}", err), "Unsupported tag type: 7");
    }

    #[test]
    fn test_error_conversion() {
        use std::io::{Error as IoError, ErrorKind};

        let io_err = IoError::new(ErrorKind::PermissionDenied, "denied");
        let err: Error = io_err.into();

        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_truncation());
        assert!(Error::truncated("tag body").is_truncation());
    }
}
