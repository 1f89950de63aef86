//! GPU-facing types: the instance record layout, growable buffers and the
//! wgpu render surface.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Per-instance vertex record.
pub mod instance;
/// wgpu implementation of the scene's render surface.
pub mod uploader;

pub use instance::InstanceRaw;
pub use uploader::{GpuInstanceUploader, GroupBuffers, UploadStats};
