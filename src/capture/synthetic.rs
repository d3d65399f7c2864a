//! Synthetic frame source.
//!
//! Generates deterministic gradient frames so the pipeline can run without
//! camera hardware: the CLI demo, CI, and the session tests all use it.
//! Frames vary per pull so captured slots are distinguishable.

use std::sync::Arc;

use async_trait::async_trait;

use crate::capture::source::{FrameSource, RgbFrame};
use crate::config::FacingMode;
use crate::error::{CaptureError, CaptureResult};

pub struct SyntheticSource {
    width: u32,
    height: u32,
    open: bool,
    frames_served: u64,
    torch_supported: bool,
    torch_on: bool,
}

impl SyntheticSource {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            open: false,
            frames_served: 0,
            torch_supported: false,
            torch_on: false,
        }
    }

    /// Pretend the track can sustain illumination, for exercising the
    /// supported branch of the torch controller.
    pub fn with_torch_support(mut self) -> Self {
        self.torch_supported = true;
        self
    }

    /// Total frames pulled over the source's lifetime.
    pub fn frames_served(&self) -> u64 {
        self.frames_served
    }

    fn render(&self) -> Vec<u8> {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut data = vec![0u8; w * h * 3];
        let tick = (self.frames_served % 256) as u8;
        for y in 0..h {
            for x in 0..w {
                let i = (y * w + x) * 3;
                data[i] = (x * 255 / w.max(1)) as u8;
                data[i + 1] = (y * 255 / h.max(1)) as u8;
                data[i + 2] = tick;
            }
        }
        data
    }
}

#[async_trait]
impl FrameSource for SyntheticSource {
    async fn open(&mut self, _facing: FacingMode) -> CaptureResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaptureError::acquisition("synthetic source has zero size"));
        }
        self.open = true;
        self.torch_on = false;
        Ok(())
    }

    async fn close(&mut self) -> CaptureResult<()> {
        self.open = false;
        self.torch_on = false;
        Ok(())
    }

    async fn frame(&mut self) -> CaptureResult<RgbFrame> {
        if !self.open {
            return Err(CaptureError::NotReady);
        }
        let data = self.render();
        self.frames_served += 1;
        Ok(RgbFrame {
            data: Arc::new(data),
            width: self.width,
            height: self.height,
        })
    }

    fn dimensions(&self) -> Option<(u32, u32)> {
        self.open.then_some((self.width, self.height))
    }

    fn supports_torch(&self) -> bool {
        self.torch_supported
    }

    async fn set_torch(&mut self, on: bool) -> CaptureResult<()> {
        if !self.torch_supported {
            return Err(CaptureError::unsupported("torch"));
        }
        self.torch_on = on;
        Ok(())
    }
}
