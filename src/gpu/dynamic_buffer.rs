//! Growable GPU buffers for instance data.
//!
//! GPU buffers cannot be resized in place, so a write that exceeds the
//! current capacity replaces the buffer with a larger one (2x growth).
//! Buffers never shrink.

use std::marker::PhantomData;

/// Smallest buffer ever allocated, in bytes.
const MIN_CAPACITY: usize = 64;
/// Smallest growth step, in bytes.
const MIN_GROWTH: usize = 1024;

/// Byte capacity after growing `capacity` to hold `needed` bytes.
#[must_use]
pub fn grown_capacity(needed: usize, capacity: usize) -> usize {
    if needed <= capacity {
        capacity
    } else {
        (needed * 2).max(capacity + MIN_GROWTH)
    }
}

/// A GPU buffer that grows on demand.
#[derive(Debug)]
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer with the given initial byte capacity.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        initial_capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        let capacity = initial_capacity.max(MIN_CAPACITY);
        Self {
            buffer: allocate(device, label, capacity, usage),
            capacity,
            len: 0,
            usage,
            label: label.to_owned(),
        }
    }

    /// Write `bytes` at offset 0, reallocating first if they do not fit.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups and
    /// vertex buffer bindings referencing the old buffer are stale).
    pub fn write_bytes(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
    ) -> bool {
        let needed = bytes.len();
        let reallocated = needed > self.capacity;
        if reallocated {
            self.capacity = grown_capacity(needed, self.capacity);
            self.buffer =
                allocate(device, &self.label, self.capacity, self.usage);
            log::debug!(
                "{}: grew to {} bytes for {needed} bytes of data",
                self.label,
                self.capacity
            );
        }
        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, bytes);
        }
        self.len = needed;
        reallocated
    }

    /// Underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Bytes written by the last write.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn allocate(
    device: &wgpu::Device,
    label: &str,
    capacity: usize,
    usage: wgpu::BufferUsages,
) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: capacity as u64,
        usage: usage | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// [`DynamicBuffer`] holding a slice of `T`, counted in items.
#[derive(Debug)]
pub struct TypedBuffer<T> {
    inner: DynamicBuffer,
    count: usize,
    _marker: PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Buffer with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(
        device: &wgpu::Device,
        label: &str,
        capacity: usize,
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self {
            inner: DynamicBuffer::new(
                device,
                label,
                size_of::<T>() * capacity,
                usage,
            ),
            count: 0,
            _marker: PhantomData,
        }
    }

    /// Replace the contents with `data`, growing if necessary. Returns
    /// `true` if the buffer was reallocated.
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.count = data.len();
        self.inner.write_bytes(device, queue, bytemuck::cast_slice(data))
    }

    /// Underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &wgpu::Buffer {
        self.inner.buffer()
    }

    /// Items written by the last write.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the last write was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Allocated capacity in items.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.capacity() / size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_doubles_with_a_floor() {
        assert_eq!(grown_capacity(100, 200), 200);
        assert_eq!(grown_capacity(200, 200), 200);
        assert_eq!(grown_capacity(4000, 1000), 8000);
        // Small overflows still grow by at least a kilobyte.
        assert_eq!(grown_capacity(100, 64), 1088);
    }
}
