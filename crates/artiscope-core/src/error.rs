//! Error types for artifact inspection.
//!
//! Most public operations never return these errors: they are the internal
//! currency between helpers and collaborators, and are converted into
//! default or stub records at the operation boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `InspectError`.
pub type Result<T> = std::result::Result<T, InspectError>;

/// Errors that can occur while inspecting an artifact.
#[derive(Error, Debug)]
pub enum InspectError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input path is missing, unreadable, or permission-denied.
    #[error("cannot read {path}: {source}")]
    Unreadable {
        /// The path that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Content is too short or structurally unrecognized.
    #[error("undecodable content: {0}")]
    Undecodable(String),

    /// An external collaborator does not exist on this platform.
    #[error("capability unavailable: {tool}")]
    CapabilityUnavailable {
        /// Name of the missing tool or capability.
        tool: String,
    },

    /// Archive extraction failed or the expected layout is absent.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Property-list manifest could not be parsed.
    #[error("invalid property list: {0}")]
    PropertyList(String),
}

impl InspectError {
    /// Creates an `Unreadable` error for `path`.
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    /// Creates a `CapabilityUnavailable` error for `tool`.
    pub fn unavailable(tool: impl Into<String>) -> Self {
        Self::CapabilityUnavailable { tool: tool.into() }
    }

    /// Returns `true` if this error means a collaborator is missing rather
    /// than the input being bad.
    ///
    /// # Examples
    ///
    /// ```
    /// use artiscope_core::InspectError;
    ///
    /// assert!(InspectError::unavailable("otool").is_capability_gap());
    /// assert!(!InspectError::Extraction("no Payload".into()).is_capability_gap());
    /// ```
    #[must_use]
    pub const fn is_capability_gap(&self) -> bool {
        matches!(self, Self::CapabilityUnavailable { .. })
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use artiscope_core::InspectError;
    ///
    /// let err = InspectError::Undecodable("short header".to_string());
    /// assert_eq!(err.context(), Some("short header"));
    ///
    /// let err = InspectError::unavailable("codesign");
    /// assert_eq!(err.context(), Some("codesign"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::Undecodable(msg) | Self::Extraction(msg) | Self::PropertyList(msg) => Some(msg),
            Self::CapabilityUnavailable { tool } => Some(tool),
            Self::Io(_) | Self::Unreadable { .. } => None,
        }
    }
}
