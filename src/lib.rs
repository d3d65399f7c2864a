//! # Campus Lost & Found Capture Pipeline
//!
//! Camera capture and aspect-ratio-constrained image acquisition for a
//! campus Lost & Found client: acquire a live video feed, run a bounded
//! shutter-and-retake workflow, deterministically crop each captured frame
//! to a canonical aspect ratio, encode it as JPEG, and hand the result to
//! the submission backend.
//!
//! ## Architecture
//!
//! - `permission`: camera capability gate (check/request, settings link)
//! - `capture`: frame source backends and the live feed lifecycle
//! - `processing`: centered crop planning and JPEG encoding
//! - `sequencer`: the bounded 0..N slot state machine
//! - `session`: orchestration of the two acquisition workflows
//! - `net`: HTTP client for the submission backend
//! - `config`: explicit per-session configuration and presets
//!
//! ## Example
//!
//! ```rust,no_run
//! use campus_capture::capture::synthetic::SyntheticSource;
//! use campus_capture::config::SessionConfig;
//! use campus_capture::permission::HostPermissions;
//! use campus_capture::session::AcquisitionSession;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = AcquisitionSession::builder()
//!     .with_config(SessionConfig::found_report())
//!     .with_permissions(HostPermissions)
//!     .with_source(SyntheticSource::new(1920, 1080))
//!     .build()?;
//!
//! session.open().await?;
//! while session.state() != campus_capture::SequencerState::Complete {
//!     session.capture_next().await?;
//! }
//! let photos = session.finish().await?;
//! assert_eq!(photos.len(), 6);
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod config;
pub mod error;
pub mod net;
pub mod permission;
pub mod processing;
pub mod sequencer;
pub mod session;

/// Re-export the error types for convenience.
pub use error::{CaptureError, CaptureResult};

pub use config::{FacingMode, SessionConfig};
pub use processing::encode::EncodedImage;
pub use sequencer::SequencerState;
pub use session::{AcquisitionSession, FoundReport};

use capture::source::FrameSource;
use permission::PermissionGate;

/// Run one full non-interactive acquisition: open the session, capture
/// until the configured bound is reached, and return the encoded images.
///
/// Interactive flows (retake, confirm/decline, torch) go through
/// [`AcquisitionSession`] directly; this entry point covers the common
/// capture-everything path the CLI and tests use.
pub async fn acquire(
    config: SessionConfig,
    gate: impl PermissionGate + 'static,
    source: impl FrameSource + 'static,
) -> CaptureResult<Vec<EncodedImage>> {
    let mut session = AcquisitionSession::builder()
        .with_config(config)
        .with_permissions(gate)
        .with_source(source)
        .build()?;

    session.open().await?;
    let outcome = async {
        while session.state() != SequencerState::Complete {
            session.capture_next().await?;
        }
        session.finish().await
    }
    .await;

    // The stream is an exclusive resource: release it on the error path
    // too. The original failure is what the caller acts on; a secondary
    // failure during release is only logged.
    if outcome.is_err() {
        if let Err(close_error) = session.close().await {
            log::warn!("failed to release the feed after a capture error: {}", close_error);
        }
    }
    outcome
}
