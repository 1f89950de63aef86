//! Core trait for per-group motion models.

use crate::scene::{InstanceBuffer, TreeMode};

/// Inputs shared by every motion model for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Mode snapshot taken once at the start of the frame.
    pub mode: TreeMode,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Seconds since the scene started.
    pub elapsed: f32,
}

impl FrameContext {
    /// Context for one frame.
    #[must_use]
    pub fn new(mode: TreeMode, delta: f32, elapsed: f32) -> Self {
        Self {
            mode,
            delta,
            elapsed,
        }
    }
}

/// Drives the transforms of one instance group.
///
/// Implementations own only their per-instance state. The scene hands them
/// the group's buffer for the duration of a single call; they must not keep
/// it. See [`TargetedMotion`](super::TargetedMotion),
/// [`RibbonMotion`](super::RibbonMotion), [`AmbientMotion`](super::AmbientMotion)
/// and [`TopperMotion`](super::TopperMotion).
pub trait InstanceMotion: Send {
    /// Number of instances this model drives. The buffer is allocated with
    /// exactly this length.
    fn instance_count(&self) -> usize;

    /// Write initial transforms and colors.
    fn seed(&mut self, buffer: &mut InstanceBuffer);

    /// Advance one frame, writing changed instances into `buffer`.
    fn advance(&mut self, frame: &FrameContext, buffer: &mut InstanceBuffer);

    /// Extra rotation about the vertical axis applied to the whole group
    /// by the render surface.
    fn group_yaw(&self) -> f32 {
        0.0
    }

    /// Name for logging.
    fn name(&self) -> &'static str {
        "unnamed"
    }
}
