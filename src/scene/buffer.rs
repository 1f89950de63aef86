//! Instance groups and their in-place transform buffers.

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::gpu::InstanceRaw;

/// Visual kind of an instance group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceKind {
    /// Spherical bauble.
    Ornament,
    /// Small cube.
    GiftBox,
    /// Octahedral sparkle.
    Star,
    /// Hooked tube.
    CandyCane,
    /// Bulb on the ribbon path.
    RibbonLight,
    /// Floating ambient sparkle.
    Particle,
    /// Single extruded star on top of the tree.
    Topper,
}

impl InstanceKind {
    /// Short label for logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ornament => "ornaments",
            Self::GiftBox => "gifts",
            Self::Star => "stars",
            Self::CandyCane => "candy canes",
            Self::RibbonLight => "ribbon",
            Self::Particle => "particles",
            Self::Topper => "topper",
        }
    }
}

/// Opaque geometry handle issued by the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeometryHandle(pub u32);

/// Opaque material handle issued by the render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialHandle(pub u32);

/// Static description of a group: what it looks like, not where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupDescriptor {
    /// Visual kind.
    pub kind: InstanceKind,
    /// Shared, read-only mesh.
    pub geometry: GeometryHandle,
    /// Shared, read-only material.
    pub material: MaterialHandle,
}

/// Decomposed transform of one instance.
///
/// Rotation is stored as XYZ Euler angles so tumbling can accumulate on
/// individual axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstancePose {
    /// World-space position (relative to the group root).
    pub position: Vec3,
    /// Euler angles (pitch, yaw, roll) in radians.
    pub rotation: Vec3,
    /// Uniform scale.
    pub scale: f32,
}

impl InstancePose {
    /// Pose at `position` with no rotation.
    #[must_use]
    pub fn at(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale,
        }
    }

    /// Model matrix (scale, then XYZ rotation, then translation).
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            rotation,
            self.position,
        )
    }
}

/// Dense, fixed-length instance buffer for one group.
///
/// Allocated once and rewritten in place. The dirty flag tells the render
/// surface whether anything changed since the last submission.
#[derive(Debug, Clone)]
pub struct InstanceBuffer {
    instances: Vec<InstanceRaw>,
    dirty: bool,
    seeded: bool,
}

impl InstanceBuffer {
    /// Zeroed buffer of `len` instances (zero scale, so nothing is drawn
    /// until seeded).
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            instances: vec![<InstanceRaw as bytemuck::Zeroable>::zeroed(); len],
            dirty: false,
            seeded: false,
        }
    }

    /// Number of instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the buffer holds no instances.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Whether initial transforms have been written.
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    pub(crate) fn mark_seeded(&mut self) {
        self.seeded = true;
        self.dirty = true;
    }

    /// Whether any instance changed since the last [`clear_dirty`](Self::clear_dirty).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Acknowledge that the current contents were uploaded.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Read-only view for upload.
    #[must_use]
    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    /// Instance at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&InstanceRaw> {
        self.instances.get(index)
    }

    /// Overwrite the model matrix of one instance. Out-of-range indices are
    /// ignored.
    pub fn write_pose(&mut self, index: usize, pose: &InstancePose) {
        if let Some(slot) = self.instances.get_mut(index) {
            slot.model = pose.to_matrix().to_cols_array_2d();
            self.dirty = true;
        }
    }

    /// Overwrite the color of one instance. Out-of-range indices are
    /// ignored.
    pub fn write_color(&mut self, index: usize, color: [f32; 4]) {
        if let Some(slot) = self.instances.get_mut(index) {
            slot.color = color;
            self.dirty = true;
        }
    }
}

/// A group as the render surface sees it: descriptor plus buffer.
#[derive(Debug, Clone)]
pub struct InstanceGroup {
    /// Mesh, material and kind.
    pub descriptor: GroupDescriptor,
    /// Transform buffer, never resized.
    pub buffer: InstanceBuffer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_clean_and_unseeded() {
        let buffer = InstanceBuffer::new(3);
        assert_eq!(buffer.len(), 3);
        assert!(!buffer.is_dirty());
        assert!(!buffer.is_seeded());
        assert_eq!(buffer.get(0).map(InstanceRaw::uniform_scale), Some(0.0));
    }

    #[test]
    fn write_pose_sets_dirty() {
        let mut buffer = InstanceBuffer::new(2);
        let pose = InstancePose::at(Vec3::new(1.0, 2.0, 3.0), 0.5);
        buffer.write_pose(1, &pose);
        assert!(buffer.is_dirty());
        let raw = buffer.get(1).unwrap();
        assert!((raw.translation() - pose.position).length() < 1e-6);

        buffer.clear_dirty();
        assert!(!buffer.is_dirty());
    }

    #[test]
    fn out_of_range_writes_are_ignored() {
        let mut buffer = InstanceBuffer::new(1);
        buffer.write_pose(5, &InstancePose::at(Vec3::ONE, 1.0));
        buffer.write_color(5, [1.0; 4]);
        assert!(!buffer.is_dirty());
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn pose_matrix_round_trip() {
        let pose = InstancePose {
            position: Vec3::new(-2.0, 0.5, 4.0),
            rotation: Vec3::new(0.3, 1.2, 0.0),
            scale: 0.75,
        };
        let (scale, rotation, translation) =
            pose.to_matrix().to_scale_rotation_translation();
        assert!((scale - Vec3::splat(0.75)).length() < 1e-5);
        assert!((translation - pose.position).length() < 1e-5);
        let (x, y, _) = rotation.to_euler(EulerRot::XYZ);
        assert!((x - 0.3).abs() < 1e-4);
        assert!((y - 1.2).abs() < 1e-4);
    }
}
