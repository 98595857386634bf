//! Dynamic GPU buffer management with automatic resizing.
//!
//! Instance-data producers re-upload per-boid state as the flock grows or
//! shrinks; these buffers grow with a 2x strategy to minimize reallocations.

use wgpu::util::DeviceExt;

/// Smallest allocation handed out, in bytes. Empty input data still gets a
/// buffer of this size so the result is always bindable.
const MIN_ALLOCATION: usize = 64;

/// Next capacity when `needed` bytes no longer fit `current`: 2x the need,
/// growing by at least 1KB.
fn grow_capacity(current: usize, needed: usize) -> usize {
    (needed * 2).max(current + 1024)
}

/// A GPU buffer that can grow dynamically.
///
/// Uses a 2x growth strategy when capacity is exceeded.
/// Never shrinks (GPU buffers cannot be resized in place).
pub struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: usize, // Capacity in bytes, always the allocated buffer size
    len: usize,      // Current data length in bytes
    usage: wgpu::BufferUsages,
    label: String,
}

impl DynamicBuffer {
    /// Buffer initialized from existing data.
    ///
    /// Empty data allocates a zeroed [`MIN_ALLOCATION`]-byte buffer rather
    /// than a zero-size one, which would be rejected at bind time.
    pub fn new_with_data<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);

        if data_bytes.is_empty() {
            let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: MIN_ALLOCATION as u64,
                usage: usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });
            return Self {
                buffer,
                capacity: MIN_ALLOCATION,
                len: 0,
                usage,
                label: label.to_owned(),
            };
        }

        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data_bytes,
                usage: usage | wgpu::BufferUsages::COPY_DST,
            });

        Self {
            buffer,
            capacity: data_bytes.len(),
            len: data_bytes.len(),
            usage,
            label: label.to_owned(),
        }
    }

    /// Write data to the buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups referencing
    /// it need recreation).
    pub fn write<T: bytemuck::Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        let data_bytes: &[u8] = bytemuck::cast_slice(data);
        let needed = data_bytes.len();

        let reallocated = if needed > self.capacity {
            let new_capacity = grow_capacity(self.capacity, needed);
            log::trace!(
                "{}: growing {} -> {new_capacity} bytes",
                self.label,
                self.capacity
            );

            self.buffer = device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(&self.label),
                size: new_capacity as u64,
                usage: self.usage | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            });

            self.capacity = new_capacity;
            true
        } else {
            false
        };

        if needed > 0 {
            queue.write_buffer(&self.buffer, 0, data_bytes);
        }
        self.len = needed;

        reallocated
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Current data length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no data has been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Typed wrapper for [`DynamicBuffer`] that tracks item count rather than
/// byte length.
pub struct TypedBuffer<T> {
    inner: DynamicBuffer,
    count: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T: bytemuck::Pod> TypedBuffer<T> {
    /// Typed buffer initialized from existing data.
    pub fn new_with_data(
        device: &wgpu::Device,
        label: &str,
        data: &[T],
        usage: wgpu::BufferUsages,
    ) -> Self {
        Self {
            inner: DynamicBuffer::new_with_data(device, label, data, usage),
            count: data.len(),
            _marker: std::marker::PhantomData,
        }
    }

    /// Write data to the buffer, growing if necessary.
    ///
    /// Returns `true` if the buffer was reallocated (bind groups referencing
    /// it need recreation).
    pub fn write(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> bool {
        self.count = data.len();
        self.inner.write(device, queue, data)
    }

    /// The underlying wgpu buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        self.inner.buffer()
    }

    /// Number of items currently stored.
    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::render_context::RenderContext;

    fn headless_context() -> Option<RenderContext> {
        pollster::block_on(RenderContext::headless(4, 4)).ok()
    }

    #[test]
    fn test_grow_capacity_covers_the_need() {
        assert!(grow_capacity(64, 100) >= 100);
        assert_eq!(grow_capacity(64, 1000), 2000);
        // Small buffers still grow by at least 1KB
        assert_eq!(grow_capacity(8, 16), 8 + 1024);
    }

    #[test]
    fn test_initial_capacity_matches_allocation() {
        let Some(context) = headless_context() else {
            return;
        };
        let data = [1_u32, 2, 3];
        let buf = DynamicBuffer::new_with_data(
            &context.device,
            "test buffer",
            &data,
            wgpu::BufferUsages::STORAGE,
        );
        assert_eq!(buf.capacity(), 12);
        assert_eq!(buf.capacity() as u64, buf.buffer().size());
        assert_eq!(buf.len(), 12);
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_write_past_small_allocation_reallocates() {
        let Some(context) = headless_context() else {
            return;
        };
        let mut buf = DynamicBuffer::new_with_data(
            &context.device,
            "test buffer",
            &[1_u32, 2],
            wgpu::BufferUsages::STORAGE,
        );
        // 16 bytes does not fit the 8-byte allocation
        let reallocated =
            buf.write(&context.device, &context.queue, &[1_u32, 2, 3, 4]);
        assert!(reallocated);
        assert_eq!(buf.len(), 16);
        assert!(buf.buffer().size() >= 16);
    }

    #[test]
    fn test_typed_write_grows_then_reuses_allocation() {
        let Some(context) = headless_context() else {
            return;
        };
        let mut buf = TypedBuffer::new_with_data(
            &context.device,
            "test buffer",
            &[0_u32; 4],
            wgpu::BufferUsages::VERTEX,
        );
        assert_eq!(buf.count(), 4);

        let grown: Vec<u32> = (0..512).collect();
        assert!(buf.write(&context.device, &context.queue, &grown));
        assert_eq!(buf.count(), 512);

        // A same-size rewrite fits the grown allocation
        assert!(!buf.write(&context.device, &context.queue, &grown));
    }

    #[test]
    fn test_empty_init_still_allocates_bindable_buffer() {
        let Some(context) = headless_context() else {
            return;
        };
        let buf = DynamicBuffer::new_with_data::<u32>(
            &context.device,
            "test buffer",
            &[],
            wgpu::BufferUsages::STORAGE,
        );
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert!(buf.buffer().size() > 0);
    }
}
