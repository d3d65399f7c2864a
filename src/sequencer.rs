//! # Capture Sequencer
//!
//! Fixed-capacity slot state machine for one acquisition:
//! `Idle(0 filled)` -> `Capturing(1..N-1 filled)` -> `Complete(N filled)`.
//!
//! Slots are always filled contiguously from index 0. The transition
//! functions enforce that invariant themselves rather than trusting
//! callers: `store` appends at the fill point, `retake_last` clears only
//! the most recent slot, and there is no way to address a slot directly.
//! `Complete` is not a dead end — `reset` returns to `Idle` for a fresh
//! acquisition.

use crate::error::{CaptureError, CaptureResult};
use crate::processing::encode::EncodedImage;

/// Named state of the sequencer, derived from the fill count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Capturing,
    Complete,
}

impl SequencerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SequencerState::Idle => "Idle",
            SequencerState::Capturing => "Capturing",
            SequencerState::Complete => "Complete",
        }
    }
}

/// Bounded sequence of capture slots, owned exclusively by one session.
#[derive(Debug)]
pub struct CaptureSequencer {
    slots: Vec<Option<EncodedImage>>,
    filled: usize,
}

impl CaptureSequencer {
    /// Create a sequencer with `capacity` empty slots. Capacity is the
    /// workflow's N and must be at least 1.
    pub fn new(capacity: usize) -> CaptureResult<Self> {
        if capacity == 0 {
            return Err(CaptureError::config("shot_count", "must be at least 1"));
        }
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Ok(Self { slots, filled: 0 })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Count of filled slots; equals the index of the slot being filled
    /// next while capturing.
    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.filled
    }

    pub fn state(&self) -> SequencerState {
        if self.filled == 0 {
            SequencerState::Idle
        } else if self.filled < self.capacity() {
            SequencerState::Capturing
        } else {
            SequencerState::Complete
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == SequencerState::Complete
    }

    /// Store a captured image in the next slot. Valid only while the bound
    /// has not been reached; returns the state after the transition.
    pub fn store(&mut self, image: EncodedImage) -> CaptureResult<SequencerState> {
        if self.filled >= self.capacity() {
            return Err(CaptureError::state(self.state().as_str(), "capture"));
        }
        self.slots[self.filled] = Some(image);
        self.filled += 1;
        self.assert_contiguous();
        Ok(self.state())
    }

    /// Clear the most recently filled slot. Returns whether anything was
    /// cleared; at zero filled this is a no-op, not an error.
    pub fn retake_last(&mut self) -> bool {
        if self.filled == 0 {
            return false;
        }
        self.filled -= 1;
        self.slots[self.filled] = None;
        self.assert_contiguous();
        true
    }

    /// Discard all slots and return to `Idle`.
    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.filled = 0;
    }

    /// Read-only view of the filled prefix, in capture order.
    pub fn images(&self) -> impl Iterator<Item = &EncodedImage> {
        self.slots[..self.filled].iter().flatten()
    }

    /// Take ownership of the full image set. Valid only in `Complete`; the
    /// sequencer returns to `Idle`.
    pub fn take_images(&mut self) -> CaptureResult<Vec<EncodedImage>> {
        if !self.is_complete() {
            return Err(CaptureError::state(self.state().as_str(), "finish"));
        }
        self.filled = 0;
        Ok(self.slots.iter_mut().filter_map(Option::take).collect())
    }

    /// Whether the slot at `index` currently holds an image.
    pub fn slot_filled(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Option::is_some)
    }

    fn assert_contiguous(&self) {
        debug_assert!(
            self.slots[..self.filled].iter().all(Option::is_some)
                && self.slots[self.filled..].iter().all(Option::is_none),
            "slots must be a contiguous prefix of {} filled",
            self.filled
        );
    }
}
