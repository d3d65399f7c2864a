//! Frame source trait and the raw frame type that flows out of it.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::FacingMode;
use crate::error::{CaptureError, CaptureResult};

/// One momentary video frame: tightly packed RGB8 rows.
///
/// The buffer is reference-counted so a frame can be handed to the encoder
/// without copying the pixel data.
#[derive(Debug, Clone)]
pub struct RgbFrame {
    pub data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
}

impl RgbFrame {
    /// Build a frame from a packed RGB8 buffer, rejecting size mismatches.
    pub fn from_rgb8(data: Vec<u8>, width: u32, height: u32) -> CaptureResult<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(CaptureError::encode(format!(
                "frame buffer is {} bytes, expected {} for {}x{} RGB8",
                data.len(),
                expected,
                width,
                height
            )));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }
}

/// Abstract interface for live camera backends.
///
/// Implementations own the exclusive hardware handle between `open` and
/// `close`. `close` must be safe to call when nothing is open.
#[async_trait]
pub trait FrameSource: Send {
    /// Open a fresh stream at the given facing preference. Fails with an
    /// acquisition error if no device is available, access is denied at
    /// the hardware level, or the device is held by another process.
    async fn open(&mut self, facing: FacingMode) -> CaptureResult<()>;

    /// Release the underlying hardware tracks. Idempotent.
    async fn close(&mut self) -> CaptureResult<()>;

    /// Pull the current frame from the open stream.
    async fn frame(&mut self) -> CaptureResult<RgbFrame>;

    /// Native stream dimensions, once known.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Whether the active stream's track can sustain illumination.
    fn supports_torch(&self) -> bool {
        false
    }

    /// Apply an illumination constraint to the active track. Backends that
    /// lack the capability keep the default, which reports it as such; the
    /// feed layer decides how loudly that failure surfaces.
    async fn set_torch(&mut self, _on: bool) -> CaptureResult<()> {
        Err(CaptureError::unsupported("torch"))
    }
}
