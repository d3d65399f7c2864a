//! # Acquisition Session
//!
//! Composes the permission gate, live feed, cropper/encoder and sequencer
//! into one user-facing acquisition workflow. The session owns the stream
//! lifetime through explicit `open`/`close` entry points: the UI calls
//! them, but nothing here is defined in terms of a rendering lifecycle.
//!
//! Two configurations of the same component cover both product flows:
//!
//! - `SessionConfig::found_report()`: six shots, no per-shot confirmation,
//!   hand-off together with the report form at submission time.
//! - `SessionConfig::lost_query()`: one shot, then an immediate
//!   confirm-or-retake step (`finish` vs `decline_last`).
//!
//! Cancellation at any point goes through `close`, which stops the feed
//! (idempotently) and discards partially filled slots; nothing persists
//! across a close.

use log::debug;

use crate::capture::feed::LiveFeed;
use crate::capture::source::FrameSource;
use crate::config::SessionConfig;
use crate::error::{CaptureError, CaptureResult};
use crate::permission::{ensure_camera_access, PermissionGate};
use crate::processing::encode::{capture_jpeg, EncodedImage};
use crate::sequencer::{CaptureSequencer, SequencerState};

/// One complete user interaction from opening the camera to handing off
/// captured images.
pub struct AcquisitionSession {
    config: SessionConfig,
    gate: Box<dyn PermissionGate>,
    feed: LiveFeed,
    sequencer: CaptureSequencer,
}

impl AcquisitionSession {
    /// Create a new session using the builder pattern.
    pub fn builder() -> AcquisitionSessionBuilder {
        AcquisitionSessionBuilder::new()
    }

    /// Open the session: run the permission gate, then start the live
    /// feed and wait for its first frame. On denial the feed is never
    /// started; the caller's recovery path is [`Self::open_system_settings`].
    pub async fn open(&mut self) -> CaptureResult<()> {
        ensure_camera_access(self.gate.as_mut()).await?;
        self.feed.start(self.config.facing).await
    }

    /// Close the session from any state: release the stream and discard
    /// partially filled slots. Safe to call on every exit path.
    pub async fn close(&mut self) -> CaptureResult<()> {
        self.feed.stop().await?;
        self.sequencer.reset();
        Ok(())
    }

    /// Capture the next shot: pull the current frame, crop it to the
    /// configured ratio, encode, and store it in the next slot. When the
    /// bound is reached the feed is released after the configured linger
    /// so the final shot is acknowledged before the view changes.
    pub async fn capture_next(&mut self) -> CaptureResult<SequencerState> {
        if self.sequencer.is_complete() {
            return Err(CaptureError::state(
                self.sequencer.state().as_str(),
                "capture",
            ));
        }

        let frame = self.feed.current_frame().await?;
        let image = capture_jpeg(
            &frame,
            self.config.target_ratio,
            self.config.jpeg_quality,
            self.sequencer.filled(),
        )?;
        let state = self.sequencer.store(image)?;

        if state == SequencerState::Complete {
            debug!(
                "acquisition complete ({} shots), releasing feed",
                self.sequencer.capacity()
            );
            if !self.config.completion_linger.is_zero() {
                tokio::time::sleep(self.config.completion_linger).await;
            }
            self.feed.stop().await?;
        }

        Ok(state)
    }

    /// Import an existing JPEG into the next slot without touching the
    /// feed (gallery pick). Follows the same bound and completion rules as
    /// a live capture.
    pub async fn import_jpeg(&mut self, bytes: Vec<u8>) -> CaptureResult<SequencerState> {
        if self.sequencer.is_complete() {
            return Err(CaptureError::state(
                self.sequencer.state().as_str(),
                "import",
            ));
        }

        let image = EncodedImage::from_jpeg_bytes(bytes, self.sequencer.filled())?;
        let state = self.sequencer.store(image)?;
        if state == SequencerState::Complete {
            self.feed.stop().await?;
        }
        Ok(state)
    }

    /// Clear the most recent shot so its slot can be refilled. No-op when
    /// nothing has been captured.
    pub fn retake_last(&mut self) -> bool {
        self.sequencer.retake_last()
    }

    /// Decline the confirmation step of the single-shot flow: discard all
    /// captured slots and restart the live feed for another attempt.
    pub async fn decline_last(&mut self) -> CaptureResult<()> {
        self.sequencer.reset();
        self.feed.start(self.config.facing).await
    }

    /// Toggle the torch on the active stream; returns the new state.
    /// Unsupported hardware leaves the state unchanged.
    pub async fn toggle_torch(&mut self) -> bool {
        self.feed.toggle_torch().await
    }

    /// Hand off the completed image set and close the session. Valid only
    /// once the sequencer reached `Complete`.
    pub async fn finish(&mut self) -> CaptureResult<Vec<EncodedImage>> {
        let images = self.sequencer.take_images()?;
        // Completion already released the feed; this keeps the contract
        // airtight if finish is reached another way.
        self.feed.stop().await?;
        Ok(images)
    }

    /// Deep-link to the OS permission screen. Fire-and-forget.
    pub fn open_system_settings(&self) {
        self.gate.open_system_settings();
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    pub fn shots_taken(&self) -> usize {
        self.sequencer.filled()
    }

    pub fn shots_remaining(&self) -> usize {
        self.sequencer.remaining()
    }

    pub fn feed_ready(&self) -> bool {
        self.feed.is_ready()
    }

    pub fn torch_on(&self) -> bool {
        self.feed.torch_on()
    }
}

/// Builder for acquisition sessions.
pub struct AcquisitionSessionBuilder {
    config: Option<SessionConfig>,
    gate: Option<Box<dyn PermissionGate>>,
    source: Option<Box<dyn FrameSource>>,
}

impl AcquisitionSessionBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            gate: None,
            source: None,
        }
    }

    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_permissions<G: PermissionGate + 'static>(mut self, gate: G) -> Self {
        self.gate = Some(Box::new(gate));
        self
    }

    pub fn with_source<S: FrameSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn build(self) -> CaptureResult<AcquisitionSession> {
        let config = self
            .config
            .ok_or_else(|| CaptureError::config("config", "no session configuration set"))?;
        config.validate()?;

        let gate = self
            .gate
            .ok_or_else(|| CaptureError::config("permissions", "no permission gate set"))?;
        let source = self
            .source
            .ok_or_else(|| CaptureError::config("source", "no frame source set"))?;

        let sequencer = CaptureSequencer::new(config.shot_count)?;
        Ok(AcquisitionSession {
            config,
            gate,
            feed: LiveFeed::new(source),
            sequencer,
        })
    }
}

impl Default for AcquisitionSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Found-item report form: the text metadata that accompanies the six
/// photos. Submission is gated on every field being filled in, not just on
/// the photos.
#[derive(Debug, Clone, Default)]
pub struct FoundReport {
    pub item_name: String,
    pub description: String,
    pub found_location: String,
    pub drop_location: String,
    pub images: Vec<EncodedImage>,
}

impl FoundReport {
    /// Whether the submit action should be enabled for this form under the
    /// given session configuration.
    pub fn ready_to_submit(&self, config: &SessionConfig) -> bool {
        self.validate(config).is_ok()
    }

    /// Check the submission requirements: all photo slots filled, every
    /// text field non-empty, and the drop-off choice one of the configured
    /// locations.
    pub fn validate(&self, config: &SessionConfig) -> CaptureResult<()> {
        if self.images.len() != config.shot_count {
            return Err(CaptureError::config(
                "images",
                format!(
                    "{} of {} photos added",
                    self.images.len(),
                    config.shot_count
                ),
            ));
        }
        for (field, value) in [
            ("item_name", &self.item_name),
            ("description", &self.description),
            ("found_location", &self.found_location),
            ("drop_location", &self.drop_location),
        ] {
            if value.trim().is_empty() {
                return Err(CaptureError::config(field, "must not be empty"));
            }
        }
        if !config
            .drop_locations
            .iter()
            .any(|loc| loc == &self.drop_location)
        {
            return Err(CaptureError::config(
                "drop_location",
                "not one of the offered drop-off locations",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::synthetic::SyntheticSource;
    use crate::permission::scripted::ScriptedGate;
    use crate::permission::PermissionStatus;
    use crate::processing::crop::AspectRatio;

    fn granted_gate() -> ScriptedGate {
        ScriptedGate::new(PermissionStatus::Granted, PermissionStatus::Granted)
    }

    fn quick_config(shots: usize) -> SessionConfig {
        let mut config = SessionConfig::found_report();
        config.shot_count = shots;
        config.completion_linger = std::time::Duration::ZERO;
        config
    }

    #[tokio::test]
    async fn test_builder_requires_all_parts() {
        let error = match AcquisitionSession::builder()
            .with_config(quick_config(6))
            .build()
        {
            Ok(_) => panic!("builder accepted a session without gate and source"),
            Err(error) => error,
        };
        assert_eq!(error.category(), "config");
    }

    #[tokio::test]
    async fn test_denied_permission_never_starts_feed() {
        let mut session = AcquisitionSession::builder()
            .with_config(quick_config(6))
            .with_permissions(ScriptedGate::new(
                PermissionStatus::Denied,
                PermissionStatus::Denied,
            ))
            .with_source(SyntheticSource::new(640, 480))
            .build()
            .unwrap();

        let error = session.open().await.unwrap_err();
        assert_eq!(error.category(), "permission");
        assert!(!session.feed_ready());
    }

    #[tokio::test]
    async fn test_capture_before_open_is_not_ready() {
        let mut session = AcquisitionSession::builder()
            .with_config(quick_config(6))
            .with_permissions(granted_gate())
            .with_source(SyntheticSource::new(640, 480))
            .build()
            .unwrap();

        let error = session.capture_next().await.unwrap_err();
        assert_eq!(error.category(), "not_ready");
    }

    #[tokio::test]
    async fn test_multi_shot_runs_to_completion_and_releases_feed() {
        let mut session = AcquisitionSession::builder()
            .with_config(quick_config(6))
            .with_permissions(granted_gate())
            .with_source(SyntheticSource::new(1920, 1080))
            .build()
            .unwrap();

        session.open().await.unwrap();
        for _ in 0..5 {
            assert_eq!(
                session.capture_next().await.unwrap(),
                crate::sequencer::SequencerState::Capturing
            );
        }
        assert_eq!(
            session.capture_next().await.unwrap(),
            crate::sequencer::SequencerState::Complete
        );
        assert!(!session.feed_ready());

        let images = session.finish().await.unwrap();
        assert_eq!(images.len(), 6);
        for image in &images {
            // 1920x1080 cropped to 3:4 pins the 1080 height.
            assert_eq!(image.height(), 1080);
            assert_eq!(image.width(), 810);
        }
    }

    #[tokio::test]
    async fn test_single_shot_decline_restarts_feed() {
        let mut session = AcquisitionSession::builder()
            .with_config(SessionConfig::lost_query())
            .with_permissions(granted_gate())
            .with_source(SyntheticSource::new(1280, 720))
            .build()
            .unwrap();

        session.open().await.unwrap();
        assert_eq!(
            session.capture_next().await.unwrap(),
            crate::sequencer::SequencerState::Complete
        );
        assert!(!session.feed_ready());

        session.decline_last().await.unwrap();
        assert_eq!(session.state(), crate::sequencer::SequencerState::Idle);
        assert!(session.feed_ready());
    }

    #[tokio::test]
    async fn test_close_discards_partial_slots() {
        let mut session = AcquisitionSession::builder()
            .with_config(quick_config(6))
            .with_permissions(granted_gate())
            .with_source(SyntheticSource::new(640, 480))
            .build()
            .unwrap();

        session.open().await.unwrap();
        session.capture_next().await.unwrap();
        session.capture_next().await.unwrap();
        assert_eq!(session.shots_taken(), 2);
        assert_eq!(session.shots_remaining(), 4);

        session.close().await.unwrap();
        assert_eq!(session.shots_taken(), 0);
        assert!(!session.feed_ready());
        // Closing again stays a no-op.
        session.close().await.unwrap();
    }

    #[test]
    fn test_report_gating() {
        let config = quick_config(1);
        let mut session_images = Vec::new();
        let frame = crate::capture::source::RgbFrame {
            data: std::sync::Arc::new(vec![10u8; 48 * 64 * 3]),
            width: 48,
            height: 64,
        };
        session_images.push(capture_jpeg(&frame, AspectRatio::PORTRAIT_3_4, 90, 0).unwrap());

        let mut report = FoundReport {
            item_name: "Black wallet".into(),
            description: "Leather, worn corners".into(),
            found_location: "Library 2nd floor".into(),
            drop_location: "Library Front Desk".into(),
            images: session_images,
        };
        assert!(report.ready_to_submit(&config));

        report.description = "   ".into();
        assert!(!report.ready_to_submit(&config));

        report.description = "Leather".into();
        report.drop_location = "Somewhere else".into();
        assert!(!report.ready_to_submit(&config));

        report.drop_location = "Library Front Desk".into();
        report.images.clear();
        assert!(!report.ready_to_submit(&config));
    }
}
