// # Processing Module
//
// Deterministic per-capture image work: centered crop planning and JPEG
// encoding of the cropped region.

pub mod crop;
pub mod encode;

pub use crop::{centered_crop, AspectRatio, CropRect};
pub use encode::{capture_jpeg, EncodedImage};
