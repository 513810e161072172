//! # Field Error Types
//!
//! Errors raised on the host side of a masked field.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Field Error Categories                             │
//! │                                                                         │
//! │  ┌──────────────────────────┐      ┌──────────────────────────────┐    │
//! │  │        HostError         │      │         FieldError           │    │
//! │  │                          │      │                              │    │
//! │  │  CaretOutOfRange         │      │  InvalidConfig               │    │
//! │  │  Unavailable             │      │  ConfigLoadFailed            │    │
//! │  │                          │      │  ConfigSaveFailed            │    │
//! │  │  swallowed + logged      │      │  returned from MaskConfig    │    │
//! │  └──────────────────────────┘      └──────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Host errors never reach the user: a caret the widget refuses is logged
//! and typing continues.

use thiserror::Error;

/// Result type alias for widget calls.
pub type HostResult<T> = Result<T, HostError>;

/// Result type alias for config operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// A text widget refused an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// Caret offset lies past the end of the widget's text.
    #[error("Caret offset {offset} is out of range for text of length {len}")]
    CaretOutOfRange { offset: usize, len: usize },

    /// The widget is gone or not accepting changes.
    #[error("Text host unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum FieldError {
    /// A config value is out of range.
    #[error("Invalid mask configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for FieldError {
    fn from(err: std::io::Error) -> Self {
        FieldError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for FieldError {
    fn from(err: toml::de::Error) -> Self {
        FieldError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for FieldError {
    fn from(err: toml::ser::Error) -> Self {
        FieldError::ConfigSaveFailed(err.to_string())
    }
}

impl FieldError {
    /// Returns true if the config file itself was unreadable.
    pub fn is_load_error(&self) -> bool {
        matches!(self, FieldError::ConfigLoadFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_messages() {
        let err = HostError::CaretOutOfRange { offset: 9, len: 5 };
        assert_eq!(
            err.to_string(),
            "Caret offset 9 is out of range for text of length 5"
        );
    }

    #[test]
    fn test_toml_errors_convert() {
        let err: FieldError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(err.is_load_error());
        assert!(err.to_string().starts_with("Failed to load config"));
    }
}
