// Centered crop planning: fit the largest region of the source that has
// the target aspect ratio. Never upsamples; output is bounded by source.

/// Target aspect ratio as an exact width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectRatio {
    pub width: u32,
    pub height: u32,
}

impl AspectRatio {
    /// Portrait 3:4, the canonical photo ratio for item reports.
    pub const PORTRAIT_3_4: AspectRatio = AspectRatio {
        width: 3,
        height: 4,
    };

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Crop region in source pixel coordinates. Ephemeral: computed per
/// capture, consumed by the encoder, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Compute the centered crop of a `src_w` x `src_h` frame at ratio `r`.
///
/// Wider-than-target sources keep full height and trim the sides; equal or
/// taller sources keep full width and trim top and bottom. Offsets center
/// the region. Returns `None` for degenerate inputs (zero dimension or
/// ratio), which callers surface as a not-ready feed.
pub fn centered_crop(src_w: u32, src_h: u32, r: AspectRatio) -> Option<CropRect> {
    if src_w == 0 || src_h == 0 || !r.is_valid() {
        return None;
    }

    let source_ratio = f64::from(src_w) / f64::from(src_h);
    let target = r.as_f64();

    let (crop_w, crop_h) = if source_ratio > target {
        let h = src_h;
        let w = (f64::from(h) * target).round() as u32;
        (w.min(src_w), h)
    } else {
        let w = src_w;
        let h = (f64::from(w) / target).round() as u32;
        (w, h.min(src_h))
    };

    if crop_w == 0 || crop_h == 0 {
        return None;
    }

    Some(CropRect {
        x: (src_w - crop_w) / 2,
        y: (src_h - crop_h) / 2,
        width: crop_w,
        height: crop_h,
    })
}
