//! # Session Configuration
//!
//! Explicit configuration for an acquisition session. Everything that the
//! product treats as a constant (shot count, target aspect ratio, JPEG
//! quality, drop-off locations) is carried here as a value passed into the
//! session at construction, never as process-wide state.
//!
//! Two presets cover the two product workflows:
//!
//! - [`SessionConfig::found_report`]: six photos, review deferred to the
//!   report form.
//! - [`SessionConfig::lost_query`]: a single photo with an immediate
//!   confirm-or-retake step.

use std::time::Duration;

use crate::error::{CaptureError, CaptureResult};
use crate::processing::crop::AspectRatio;

/// Which physical camera a stream should prefer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacingMode {
    Front,
    Rear,
}

impl FacingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::Front => "front",
            FacingMode::Rear => "rear",
        }
    }
}

/// Drop-off locations offered on the found-item report form.
pub const DEFAULT_DROP_LOCATIONS: [&str; 4] = [
    "College Security Office",
    "Library Front Desk",
    "Main Administration Block",
    "Hostel Warden Office",
];

/// Configuration for one acquisition session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Number of photo slots (N). Must be at least 1.
    pub shot_count: usize,

    /// Target aspect ratio every capture is cropped to.
    pub target_ratio: AspectRatio,

    /// JPEG quality, 1-100. The product captures at 90.
    pub jpeg_quality: u8,

    /// Preferred camera facing for the live feed.
    pub facing: FacingMode,

    /// How long the final shot stays acknowledged on screen before the
    /// feed is stopped. The original flow uses 300 ms.
    pub completion_linger: Duration,

    /// Drop-off locations a found-item report may choose from.
    pub drop_locations: Vec<String>,
}

impl SessionConfig {
    /// Preset for the multi-shot found-item report: N=6, no per-shot
    /// confirmation, drop-off choice required at submission.
    pub fn found_report() -> Self {
        Self {
            shot_count: 6,
            target_ratio: AspectRatio::PORTRAIT_3_4,
            jpeg_quality: 90,
            facing: FacingMode::Rear,
            completion_linger: Duration::from_millis(300),
            drop_locations: DEFAULT_DROP_LOCATIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Preset for the single-shot lost-item query: N=1 with an immediate
    /// confirm-then-submit step.
    pub fn lost_query() -> Self {
        Self {
            shot_count: 1,
            target_ratio: AspectRatio::PORTRAIT_3_4,
            jpeg_quality: 90,
            facing: FacingMode::Rear,
            completion_linger: Duration::ZERO,
            drop_locations: Vec::new(),
        }
    }

    /// Validate the configuration before a session is built from it.
    pub fn validate(&self) -> CaptureResult<()> {
        if self.shot_count == 0 {
            return Err(CaptureError::config("shot_count", "must be at least 1"));
        }
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(CaptureError::config(
                "jpeg_quality",
                "must be between 1 and 100",
            ));
        }
        if !self.target_ratio.is_valid() {
            return Err(CaptureError::config(
                "target_ratio",
                "numerator and denominator must be non-zero",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(SessionConfig::found_report().validate().is_ok());
        assert!(SessionConfig::lost_query().validate().is_ok());
    }

    #[test]
    fn test_found_preset_shape() {
        let config = SessionConfig::found_report();
        assert_eq!(config.shot_count, 6);
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.facing, FacingMode::Rear);
        assert_eq!(config.drop_locations.len(), 4);
    }

    #[test]
    fn test_rejects_zero_shots() {
        let mut config = SessionConfig::lost_query();
        config.shot_count = 0;
        let error = config.validate().unwrap_err();
        assert_eq!(error.category(), "config");
    }

    #[test]
    fn test_rejects_bad_quality() {
        let mut config = SessionConfig::lost_query();
        config.jpeg_quality = 101;
        assert!(config.validate().is_err());
    }
}
