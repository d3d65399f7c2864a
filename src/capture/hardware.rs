//! Hardware frame source backed by `nokhwa` (feature `hardware`).
//!
//! Desktop webcams do not report a facing mode, so the facing preference
//! maps to a device index chosen at construction. Torch is reported as
//! unsupported: `nokhwa` exposes no illumination control, which exercises
//! the same silent-fallback path real devices without a torch do.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use nokhwa::{
    pixel_format::RgbFormat,
    utils::{CameraIndex, RequestedFormat, RequestedFormatType},
    Camera,
};

use crate::capture::source::{FrameSource, RgbFrame};
use crate::config::FacingMode;
use crate::error::{CaptureError, CaptureResult};

pub struct NokhwaSource {
    index: u32,
    camera: Option<Camera>,
}

impl NokhwaSource {
    /// Source for the device at the given index (0 is the default webcam).
    pub fn new(index: u32) -> Self {
        Self {
            index,
            camera: None,
        }
    }
}

#[async_trait]
impl FrameSource for NokhwaSource {
    async fn open(&mut self, facing: FacingMode) -> CaptureResult<()> {
        debug!(
            "opening camera index {} (facing preference: {})",
            self.index,
            facing.as_str()
        );

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = Camera::new(CameraIndex::Index(self.index), requested)
            .map_err(|e| CaptureError::acquisition(e.to_string()))?;
        camera
            .open_stream()
            .map_err(|e| CaptureError::acquisition(e.to_string()))?;

        self.camera = Some(camera);
        Ok(())
    }

    async fn close(&mut self) -> CaptureResult<()> {
        if let Some(mut camera) = self.camera.take() {
            // Releasing the handle frees the device either way; a failed
            // stop_stream must not keep the exclusive resource alive.
            let _ = camera.stop_stream();
        }
        Ok(())
    }

    async fn frame(&mut self) -> CaptureResult<RgbFrame> {
        let camera = self.camera.as_mut().ok_or(CaptureError::NotReady)?;

        let buffer = camera
            .frame()
            .map_err(|e| CaptureError::acquisition(e.to_string()))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::encode(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        Ok(RgbFrame {
            data: Arc::new(decoded.into_raw()),
            width,
            height,
        })
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.camera.as_ref().map(|camera| {
            let resolution = camera.resolution();
            (resolution.width(), resolution.height())
        })
    }
}
