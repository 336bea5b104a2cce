//! Error types for ieum-core.

use thiserror::Error;

/// Main error type for prediction operations.
///
/// Every variant degrades to "no suggestion shown"; none of them may
/// interrupt typing or surface a blocking UI state.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the host environment (log files and the like).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Context extraction failed (editor not ready, offsets out of range).
    #[error("extraction error: {message}")]
    Extraction { message: String },

    /// Glyph measurement failed (probe missing, zero-width result).
    #[error("measurement error: {message}")]
    Measurement { message: String },

    /// Remote prediction call failed or returned an error response.
    #[error("remote prediction error: {message}")]
    Remote { message: String },

    /// A prediction result arrived after its context was superseded.
    #[error("prediction result is stale")]
    Stale,

    /// Event or update channel closed while the controller was running.
    #[error("channel closed")]
    ChannelClosed,
}

impl Error {
    /// Returns true if a later trigger may succeed where this one failed.
    ///
    /// Remote and channel failures are transient; the next debounced
    /// keystroke simply tries again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Remote { .. } | Error::Stale | Error::ChannelClosed
        )
    }

    /// Returns true if the failure originated inside the subsystem
    /// rather than at the remote boundary.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Extraction { .. } | Error::Measurement { .. })
    }

    /// Shorthand for a remote error with the given message.
    pub fn remote(message: impl Into<String>) -> Self {
        Error::Remote {
            message: message.into(),
        }
    }
}

/// Convenience result type for prediction operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_remote() {
        let err = Error::remote("model unavailable");
        assert_eq!(err.to_string(), "remote prediction error: model unavailable");
    }

    #[test]
    fn error_display_extraction() {
        let err = Error::Extraction {
            message: "cursor offset out of range".into(),
        };
        assert_eq!(
            err.to_string(),
            "extraction error: cursor offset out of range"
        );
    }

    #[test]
    fn transient_errors() {
        assert!(Error::remote("timeout").is_transient());
        assert!(Error::Stale.is_transient());
        assert!(Error::ChannelClosed.is_transient());

        assert!(!Error::Extraction { message: "x".into() }.is_transient());
        assert!(!Error::Measurement { message: "x".into() }.is_transient());
    }

    #[test]
    fn internal_errors() {
        assert!(Error::Extraction { message: "x".into() }.is_internal());
        assert!(Error::Measurement { message: "x".into() }.is_internal());
        assert!(!Error::remote("x").is_internal());
    }
}
