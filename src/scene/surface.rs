//! Boundary between the scene and whatever draws it.

use glam::Mat4;

use super::{GeometryHandle, GroupId, InstanceKind, MaterialHandle};
use crate::gpu::InstanceRaw;

/// One group as handed to a [`RenderSurface`] after the update pass.
#[derive(Debug, Clone, Copy)]
pub struct GroupSubmission<'a> {
    /// Arena slot of the group.
    pub id: GroupId,
    /// Visual kind.
    pub kind: InstanceKind,
    /// Shared mesh.
    pub geometry: GeometryHandle,
    /// Shared material.
    pub material: MaterialHandle,
    /// Transform applied to every instance of the group (scene offset,
    /// tree spin, group spin).
    pub root: Mat4,
    /// Current instance data.
    pub instances: &'a [InstanceRaw],
    /// Whether `instances` changed since the previous submission.
    pub dirty: bool,
}

impl GroupSubmission<'_> {
    /// Number of instances to draw.
    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

/// Receives every seeded group once per frame.
///
/// Implementations upload or record the data; they must not assume a
/// group is dirty just because it was submitted.
pub trait RenderSurface {
    /// Accept one group.
    fn submit(&mut self, group: &GroupSubmission<'_>);
}

/// Surface that only counts what it receives. Handy for headless runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadTally {
    /// Groups submitted.
    pub groups: usize,
    /// Groups submitted with the dirty flag set.
    pub dirty_groups: usize,
    /// Instances in dirty groups, i.e. what a GPU surface would upload.
    pub uploaded_instances: usize,
}

impl UploadTally {
    /// Reset the counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl RenderSurface for UploadTally {
    fn submit(&mut self, group: &GroupSubmission<'_>) {
        self.groups += 1;
        if group.dirty {
            self.dirty_groups += 1;
            self.uploaded_instances += group.instance_count();
        }
    }
}
