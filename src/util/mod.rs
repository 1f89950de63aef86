//! Shared utilities.

/// Frame clock with delta clamping and smoothed FPS.
pub mod frame_timing;

pub use frame_timing::FrameClock;
