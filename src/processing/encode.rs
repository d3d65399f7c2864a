//! # Frame Cropper/Encoder
//!
//! Takes a momentary video frame, rasterizes the centered crop at the
//! target aspect ratio, and encodes it as a JPEG still. Encoding is
//! synchronous from the caller's perspective: the bytes are ready when the
//! function returns.

use std::io::Cursor;

use base64::Engine;
use image::{codecs::jpeg::JpegEncoder, ExtendedColorType, ImageEncoder};

use crate::capture::source::RgbFrame;
use crate::error::{CaptureError, CaptureResult};
use crate::processing::crop::{centered_crop, AspectRatio};

/// One captured photo: an immutable JPEG buffer tagged with the slot it
/// fills. A retake replaces the whole value; nothing mutates it in place.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    slot: usize,
}

impl EncodedImage {
    pub const MIME: &'static str = "image/jpeg";

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Render as a `data:image/jpeg;base64,` URL, the representation the
    /// mobile shell binds into its photo grid.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            Self::MIME,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Import an existing JPEG (gallery pick) into a slot, bypassing the
    /// live feed. The file is decoded once to validate it and learn its
    /// dimensions; the original bytes are kept untouched.
    pub fn from_jpeg_bytes(bytes: Vec<u8>, slot: usize) -> CaptureResult<Self> {
        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Jpeg)?;
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            bytes,
            slot,
        })
    }
}

/// Crop `frame` to `ratio` and encode the result as a JPEG at `quality`,
/// tagged for `slot`.
///
/// Fails with `NotReady` when the frame has no usable dimensions yet — the
/// UI keeps the shutter disabled until the feed is ready, this guards the
/// race anyway.
pub fn capture_jpeg(
    frame: &RgbFrame,
    ratio: AspectRatio,
    quality: u8,
    slot: usize,
) -> CaptureResult<EncodedImage> {
    let rect =
        centered_crop(frame.width, frame.height, ratio).ok_or(CaptureError::NotReady)?;

    // The frame fields are public; re-check the buffer against the claimed
    // dimensions so a malformed frame cannot push the row slicing below out
    // of bounds.
    let expected = frame.width as usize * frame.height as usize * 3;
    if frame.data.len() != expected {
        return Err(CaptureError::encode(format!(
            "frame buffer is {} bytes, expected {} for {}x{} RGB8",
            frame.data.len(),
            expected,
            frame.width,
            frame.height
        )));
    }

    // Compact the crop region into tightly packed rows for the encoder.
    let src_row_bytes = frame.width as usize * 3;
    let crop_row_bytes = rect.width as usize * 3;
    let mut cropped = vec![0u8; crop_row_bytes * rect.height as usize];
    for row in 0..rect.height as usize {
        let src_start = (rect.y as usize + row) * src_row_bytes + rect.x as usize * 3;
        let dst_start = row * crop_row_bytes;
        cropped[dst_start..dst_start + crop_row_bytes]
            .copy_from_slice(&frame.data[src_start..src_start + crop_row_bytes]);
    }

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality);
    encoder.write_image(&cropped, rect.width, rect.height, ExtendedColorType::Rgb8)?;

    Ok(EncodedImage {
        bytes,
        width: rect.width,
        height: rect.height,
        slot,
    })
}
