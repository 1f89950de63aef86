//! wgpu render surface: keeps one instance buffer and one root uniform per
//! group and re-uploads only what changed.

use glam::Mat4;

use super::{dynamic_buffer::TypedBuffer, instance::InstanceRaw};
use crate::scene::{
    GeometryHandle, GroupId, GroupSubmission, MaterialHandle, RenderSurface,
};

/// GPU-side state of one group.
#[derive(Debug)]
pub struct GroupBuffers {
    instances: TypedBuffer<InstanceRaw>,
    root: wgpu::Buffer,
    last_root: Option<Mat4>,
    geometry: GeometryHandle,
    material: MaterialHandle,
}

impl GroupBuffers {
    /// Per-instance vertex buffer (bind with [`InstanceRaw::layout`]).
    #[must_use]
    pub fn instance_buffer(&self) -> &wgpu::Buffer {
        self.instances.buffer()
    }

    /// Uniform buffer holding the group's column-major root matrix.
    #[must_use]
    pub fn root_buffer(&self) -> &wgpu::Buffer {
        &self.root
    }

    /// Instances to draw.
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.instances.count() as u32
    }

    /// Mesh to draw.
    #[must_use]
    pub fn geometry(&self) -> GeometryHandle {
        self.geometry
    }

    /// Material to draw with.
    #[must_use]
    pub fn material(&self) -> MaterialHandle {
        self.material
    }
}

/// Upload counters since creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadStats {
    /// Instance bytes written.
    pub instance_bytes: usize,
    /// Root matrices written.
    pub root_writes: usize,
    /// Instance buffers replaced by larger ones.
    pub reallocations: usize,
}

/// [`RenderSurface`] that mirrors every submitted group into wgpu buffers.
///
/// Clean groups cost nothing beyond a root-matrix comparison.
#[derive(Debug)]
pub struct GpuInstanceUploader {
    device: wgpu::Device,
    queue: wgpu::Queue,
    groups: Vec<Option<GroupBuffers>>,
    stats: UploadStats,
}

impl GpuInstanceUploader {
    /// Uploader writing through `device` and `queue`.
    #[must_use]
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            groups: Vec::new(),
            stats: UploadStats::default(),
        }
    }

    /// GPU buffers of a group, once it has been submitted.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&GroupBuffers> {
        self.groups.get(id.index()).and_then(Option::as_ref)
    }

    /// All uploaded groups in arena order.
    pub fn groups(&self) -> impl Iterator<Item = &GroupBuffers> {
        self.groups.iter().flatten()
    }

    /// Upload counters.
    #[must_use]
    pub fn stats(&self) -> UploadStats {
        self.stats
    }

    fn create_group(&self, group: &GroupSubmission<'_>) -> GroupBuffers {
        let label = group.kind.label();
        let instances = TypedBuffer::with_capacity(
            &self.device,
            &format!("{label} instances"),
            group.instance_count(),
            wgpu::BufferUsages::VERTEX,
        );
        let root = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} root")),
            size: size_of::<[[f32; 4]; 4]>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        log::debug!(
            "gpu: created buffers for group {} ({label}, {} instances)",
            group.id.index(),
            group.instance_count()
        );
        GroupBuffers {
            instances,
            root,
            last_root: None,
            geometry: group.geometry,
            material: group.material,
        }
    }
}

impl RenderSurface for GpuInstanceUploader {
    fn submit(&mut self, group: &GroupSubmission<'_>) {
        let index = group.id.index();
        if self.groups.len() <= index {
            self.groups.resize_with(index + 1, || None);
        }
        let fresh = self.groups[index].is_none();
        if fresh {
            self.groups[index] = Some(self.create_group(group));
        }
        let Some(buffers) = self.groups[index].as_mut() else {
            return;
        };

        if group.dirty || fresh {
            if buffers.instances.write(&self.device, &self.queue, group.instances) {
                self.stats.reallocations += 1;
            }
            self.stats.instance_bytes += size_of_val(group.instances);
        }

        if buffers.last_root != Some(group.root) {
            let cols = group.root.to_cols_array_2d();
            self.queue
                .write_buffer(&buffers.root, 0, bytemuck::bytes_of(&cols));
            buffers.last_root = Some(group.root);
            self.stats.root_writes += 1;
        }
    }
}
