//! Error handling for the covid-tracker application
//!
//! This module defines the fetch error taxonomy, the crate-wide error type
//! and a Result alias for use throughout the application.

use thiserror::Error;

/// Failure of a single API fetch
///
/// A fetch error is terminal for that fetch: the widgets that depend on
/// it never populate for the rest of the session.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The body was null, empty, or not an array of usable records
    #[error("Empty or unparseable response body")]
    EmptyResponse,

    /// Connectivity, timeout or non-success HTTP status
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl FetchError {
    /// Whether the failure happened below the JSON layer
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }
}

/// Result type alias for a single fetch
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Main error type for covid-tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    /// A fetch against the API failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// A selection arrived before the data it depends on
    #[error("Not ready: {0}")]
    NotReady(String),

    /// A state code that the per-state index does not contain
    #[error("Unknown state: {0}")]
    UnknownState(String),

    /// A scrub position outside the visible points
    #[error("Index {index} is outside the {len} visible points")]
    OutOfRange { index: usize, len: usize },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<TrackerError>,
    },
}

impl TrackerError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        TrackerError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization(err.to_string())
    }
}

/// Result type alias for covid-tracker operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<TrackerError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::UnknownState("ZZ".to_string());
        assert_eq!(err.to_string(), "Unknown state: ZZ");
    }

    #[test]
    fn test_fetch_error_display() {
        let err: TrackerError = FetchError::EmptyResponse.into();
        assert_eq!(
            err.to_string(),
            "Fetch error: Empty or unparseable response body"
        );
        assert!(!FetchError::EmptyResponse.is_transport());
    }

    #[test]
    fn test_error_with_context() {
        let err = TrackerError::NotReady("chart".to_string());
        let with_ctx = err.with_context("Failed to select metric");
        assert!(with_ctx.to_string().contains("Failed to select metric"));
        assert!(with_ctx.to_string().contains("chart"));
    }

    #[test]
    fn test_result_ext_converts_io_errors() {
        let res: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = res.context("Reading config").unwrap_err();
        assert!(err.to_string().starts_with("Reading config"));
    }
}
