// # Capture Module
//
// Live feed acquisition: the frame source trait, its backends, and the
// stream lifecycle wrapper that owns the acquire/release contract.

pub mod feed;
#[cfg(feature = "hardware")]
pub mod hardware;
pub mod source;
pub mod synthetic;

pub use feed::LiveFeed;
pub use source::{FrameSource, RgbFrame};
