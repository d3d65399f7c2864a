//! # Acquisition Error Types
//!
//! Error taxonomy for the capture pipeline. Every error here is local to a
//! single acquisition session: the caller can always close the session and
//! start over from a clean state, so nothing in this module is fatal to the
//! host application.
//!
//! The variants map directly onto the recovery paths the product defines:
//!
//! - `Permission`: camera capability refused; recovery is a user-initiated
//!   settings deep link, never an automatic re-prompt.
//! - `Acquisition`: the stream could not be opened (hardware busy/absent);
//!   surfaced as a visible failure, no automatic retry.
//! - `NotReady`: a capture raced the first frame; the UI is expected to keep
//!   the shutter disabled until the feed is ready, this guard is defensive.
//! - `Unsupported`: an optional hardware capability (torch) is missing;
//!   logged by the caller and otherwise ignored.
//! - `Upload`: the submission backend failed; form state and captured
//!   images are preserved so the user can retry manually.

use std::{error::Error as StdError, fmt};

/// Base error type for the acquisition pipeline.
#[derive(Debug)]
pub enum CaptureError {
    /// Camera permission was denied by the platform or the user.
    Permission { reason: String },
    /// A live stream could not be opened.
    Acquisition { reason: String },
    /// Capture was attempted before the feed produced a first frame.
    NotReady,
    /// The active stream does not support an optional capability.
    Unsupported { capability: String },
    /// Cropping or JPEG encoding failed.
    Encode { reason: String },
    /// An operation was attempted in a state that does not permit it.
    State {
        current_state: String,
        attempted_operation: String,
    },
    /// The submission backend request failed or returned non-success.
    Upload {
        reason: String,
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
    /// Configuration validation failed.
    Config { field: String, reason: String },
}

impl CaptureError {
    /// Create a permission-denied error.
    pub fn permission(reason: impl Into<String>) -> Self {
        Self::Permission {
            reason: reason.into(),
        }
    }

    /// Create a stream acquisition error.
    pub fn acquisition(reason: impl Into<String>) -> Self {
        Self::Acquisition {
            reason: reason.into(),
        }
    }

    /// Create an unsupported-capability error.
    pub fn unsupported(capability: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: capability.into(),
        }
    }

    /// Create an encoding error.
    pub fn encode(reason: impl Into<String>) -> Self {
        Self::Encode {
            reason: reason.into(),
        }
    }

    /// Create an invalid-state error.
    pub fn state(
        current_state: impl Into<String>,
        attempted_operation: impl Into<String>,
    ) -> Self {
        Self::State {
            current_state: current_state.into(),
            attempted_operation: attempted_operation.into(),
        }
    }

    /// Create an upload error without an underlying source.
    pub fn upload(reason: impl Into<String>) -> Self {
        Self::Upload {
            reason: reason.into(),
            source: None,
        }
    }

    /// Create a configuration error.
    pub fn config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Config {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get the error category as a string, for logging and assertions.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Permission { .. } => "permission",
            Self::Acquisition { .. } => "acquisition",
            Self::NotReady => "not_ready",
            Self::Unsupported { .. } => "unsupported",
            Self::Encode { .. } => "encode",
            Self::State { .. } => "state",
            Self::Upload { .. } => "upload",
            Self::Config { .. } => "config",
        }
    }

    /// Whether the recovery path goes through an explicit user action
    /// (settings deep link, manual retry) rather than through code.
    pub fn needs_user_action(&self) -> bool {
        matches!(self, Self::Permission { .. } | Self::Upload { .. })
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::Permission { reason } => {
                write!(f, "Camera permission denied: {}", reason)
            }
            CaptureError::Acquisition { reason } => {
                write!(f, "Failed to open camera stream: {}", reason)
            }
            CaptureError::NotReady => {
                write!(f, "Capture attempted before the feed was ready")
            }
            CaptureError::Unsupported { capability } => {
                write!(
                    f,
                    "Capability '{}' not supported by the active stream",
                    capability
                )
            }
            CaptureError::Encode { reason } => {
                write!(f, "Image encoding failed: {}", reason)
            }
            CaptureError::State {
                current_state,
                attempted_operation,
            } => {
                write!(
                    f,
                    "Invalid operation '{}' in state '{}'",
                    attempted_operation, current_state
                )
            }
            CaptureError::Upload { reason, .. } => {
                write!(f, "Upload failed: {}", reason)
            }
            CaptureError::Config { field, reason } => {
                write!(f, "Configuration error in '{}': {}", field, reason)
            }
        }
    }
}

impl StdError for CaptureError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Upload {
                source: Some(source),
                ..
            } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<image::ImageError> for CaptureError {
    fn from(error: image::ImageError) -> Self {
        Self::encode(error.to_string())
    }
}

impl From<reqwest::Error> for CaptureError {
    fn from(error: reqwest::Error) -> Self {
        Self::Upload {
            reason: error.to_string(),
            source: Some(Box::new(error)),
        }
    }
}

/// Result type alias using the pipeline error type.
pub type CaptureResult<T> = Result<T, CaptureError>;
