//! Per-instance vertex record shared by every group.

use glam::{Mat4, Vec3};

/// Per-instance data for instanced mesh drawing.
/// Must match the WGSL `InstanceInput` struct layout exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Linear RGB tint (rgb), alpha (a).
    pub color: [f32; 4],
}

impl InstanceRaw {
    /// Vertex attribute layout, locations 5..=9 (after the mesh attributes).
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
        9 => Float32x4
    ];

    /// Instance from a model matrix and color.
    #[must_use]
    pub fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color,
        }
    }

    /// Per-instance vertex buffer layout.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// The model matrix.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }

    /// Translation column of the model matrix.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        let [x, y, z, _] = self.model[3];
        Vec3::new(x, y, z)
    }

    /// Uniform scale encoded in the model matrix (length of the X basis).
    #[must_use]
    pub fn uniform_scale(&self) -> f32 {
        let [x, y, z, _] = self.model[0];
        Vec3::new(x, y, z).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_stride_matches_struct() {
        assert_eq!(size_of::<InstanceRaw>(), 80);
        assert_eq!(InstanceRaw::layout().array_stride, 80);
    }

    #[test]
    fn translation_and_scale_readback() {
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(0.5),
            glam::Quat::from_rotation_y(1.0),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let raw = InstanceRaw::new(model, [1.0; 4]);
        assert!((raw.translation() - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        assert!((raw.uniform_scale() - 0.5).abs() < 1e-6);
    }
}
