//! Error types for the hexwheel library

use thiserror::Error;

/// Result type alias for hexwheel operations
pub type Result<T> = std::result::Result<T, PickerError>;

/// Error types for color parsing, persistence, and remote lookup
#[derive(Error, Debug)]
pub enum PickerError {
    /// Input is not a complete six-digit hex color
    #[error("invalid hex color {input:?}: {reason}")]
    InvalidHex { input: String, reason: String },

    /// Favorites database operation failed
    #[error("favorites storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<sqlx::Error>,
    },

    /// Preference file could not be read or written
    #[error("preference file error: {message}")]
    PreferenceIo {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Preference file contents could not be encoded or decoded
    #[error("preference encoding error: {message}")]
    PreferenceEncoding {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Remote lookup transport or decoding failure
    #[error("color lookup failed: {message}")]
    Lookup {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },
}

impl PickerError {
    /// Create an invalid-hex error for a rejected input string
    pub fn invalid_hex(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHex {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a storage error with a database source
    pub fn storage(message: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a storage error for corrupt or unexpected stored data
    pub fn storage_data(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
            source: None,
        }
    }

    /// Create a preference I/O error with context
    pub fn preference_io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::PreferenceIo {
            message: message.into(),
            source,
        }
    }

    /// Create a preference encoding error with context
    pub fn preference_encoding(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::PreferenceEncoding {
            message: message.into(),
            source,
        }
    }

    /// Create a lookup error with a transport source
    pub fn lookup(message: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Lookup {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Check if this error leaves the session in a usable state
    ///
    /// Lookup and preference failures degrade a single feature; storage
    /// failures mean favorites are unavailable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PickerError::Lookup { .. }
                | PickerError::PreferenceIo { .. }
                | PickerError::PreferenceEncoding { .. }
                | PickerError::InvalidHex { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hex_display() {
        let err = PickerError::invalid_hex("FF00", "expected 6 digits, got 4");
        let text = err.to_string();
        assert!(text.contains("FF00"));
        assert!(text.contains("expected 6 digits"));
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(PickerError::invalid_hex("zz", "not hex").is_recoverable());
        assert!(!PickerError::storage_data("missing column").is_recoverable());
    }
}
