//! # Live Feed Acquirer
//!
//! Owns the stream lifecycle contract around a [`FrameSource`]: acquire on
//! `start`, release on `stop`, with `stop` guaranteed to be idempotent so
//! every exit path can call it unconditionally. The feed is `ready` only
//! once a first real frame has been pulled from the backend — obtaining the
//! stream handle is not enough, initialization latency stays hidden behind
//! a not-ready state until actual frames arrive.
//!
//! Torch state lives here because it is per-stream: a new `start` always
//! resets it to off, and an unsupported track downgrades the toggle to a
//! logged no-op rather than an error.

use log::{debug, warn};

use crate::capture::source::{FrameSource, RgbFrame};
use crate::config::FacingMode;
use crate::error::{CaptureError, CaptureResult};

/// Live video feed with an explicit acquire/release lifecycle.
pub struct LiveFeed {
    source: Box<dyn FrameSource>,
    ready: bool,
    torch_on: bool,
}

impl LiveFeed {
    pub fn new(source: Box<dyn FrameSource>) -> Self {
        Self {
            source,
            ready: false,
            torch_on: false,
        }
    }

    /// Open a fresh stream and wait for the first frame. A feed that was
    /// already running is released first; handles are never reused.
    pub async fn start(&mut self, facing: FacingMode) -> CaptureResult<()> {
        if self.ready {
            self.stop().await?;
        }

        self.torch_on = false;
        self.source.open(facing).await?;

        // The stream handle alone does not make the feed ready; pull one
        // frame so the caller's loading state ends when rendering can.
        match self.source.frame().await {
            Ok(_) => {
                self.ready = true;
                debug!("live feed ready ({} facing)", facing.as_str());
                Ok(())
            }
            Err(error) => {
                self.source.close().await?;
                Err(CaptureError::acquisition(format!(
                    "stream opened but produced no frame: {}",
                    error
                )))
            }
        }
    }

    /// Release all underlying tracks. Calling this when nothing is running
    /// is a no-op, not an error.
    pub async fn stop(&mut self) -> CaptureResult<()> {
        self.source.close().await?;
        self.ready = false;
        self.torch_on = false;
        Ok(())
    }

    /// Whether the feed has produced its first frame.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Current torch state.
    pub fn torch_on(&self) -> bool {
        self.torch_on
    }

    /// Pull the current frame. Guarded: a feed that is not ready yields
    /// `NotReady` instead of a malformed or zero-size frame.
    pub async fn current_frame(&mut self) -> CaptureResult<RgbFrame> {
        if !self.ready {
            return Err(CaptureError::NotReady);
        }
        self.source.frame().await
    }

    /// Toggle the torch on the active stream and return the new state.
    ///
    /// Unsupported hardware is expected on a meaningful fraction of
    /// devices: the toggle logs and leaves the state unchanged instead of
    /// failing the capture flow. A feed that is not running is left as-is.
    pub async fn toggle_torch(&mut self) -> bool {
        if !self.ready {
            return self.torch_on;
        }

        let next = !self.torch_on;
        match self.source.set_torch(next).await {
            Ok(()) => {
                self.torch_on = next;
            }
            Err(CaptureError::Unsupported { capability }) => {
                warn!("{} not supported on this stream; leaving state unchanged", capability);
            }
            Err(error) => {
                warn!("torch toggle failed: {}", error);
            }
        }
        self.torch_on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::synthetic::SyntheticSource;

    #[tokio::test]
    async fn test_start_reaches_ready() {
        let mut feed = LiveFeed::new(Box::new(SyntheticSource::new(640, 480)));
        assert!(!feed.is_ready());
        feed.start(FacingMode::Rear).await.unwrap();
        assert!(feed.is_ready());
    }

    #[tokio::test]
    async fn test_stop_is_idempotent() {
        let mut feed = LiveFeed::new(Box::new(SyntheticSource::new(640, 480)));
        feed.start(FacingMode::Rear).await.unwrap();
        feed.stop().await.unwrap();
        feed.stop().await.unwrap();
        assert!(!feed.is_ready());
    }

    #[tokio::test]
    async fn test_frame_before_ready_is_guarded() {
        let mut feed = LiveFeed::new(Box::new(SyntheticSource::new(640, 480)));
        let error = feed.current_frame().await.unwrap_err();
        assert_eq!(error.category(), "not_ready");
    }

    #[tokio::test]
    async fn test_torch_unsupported_leaves_state() {
        let mut feed = LiveFeed::new(Box::new(SyntheticSource::new(640, 480)));
        feed.start(FacingMode::Rear).await.unwrap();
        // SyntheticSource has no torch; the toggle must not error and must
        // not report the torch as on.
        assert!(!feed.toggle_torch().await);
        assert!(!feed.torch_on());
    }

    #[tokio::test]
    async fn test_torch_supported_toggles_and_resets() {
        let mut feed =
            LiveFeed::new(Box::new(SyntheticSource::new(640, 480).with_torch_support()));
        feed.start(FacingMode::Rear).await.unwrap();
        assert!(feed.toggle_torch().await);
        assert!(!feed.toggle_torch().await);
        assert!(feed.toggle_torch().await);

        // A fresh start resets torch to off.
        feed.start(FacingMode::Rear).await.unwrap();
        assert!(!feed.torch_on());
    }
}
