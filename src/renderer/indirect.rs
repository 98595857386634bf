//! Indexed indirect draw arguments.

/// Arguments for one `draw_indexed_indirect` call.
///
/// Field order and size (five `u32`s, 20 bytes) match the indexed indirect
/// command layout wgpu reads from the buffer. Only `index_count` and
/// `instance_count` are ever rewritten after creation; the remaining three
/// stay zero because submesh 0 starts at the beginning of the index buffer.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct IndirectDrawArgs {
    /// Indices drawn per instance.
    pub index_count: u32,
    /// Number of instances.
    pub instance_count: u32,
    /// First index within the index buffer.
    pub first_index: u32,
    /// Value added to each index before vertex lookup.
    pub base_vertex: u32,
    /// First instance to draw.
    pub first_instance: u32,
}

impl IndirectDrawArgs {
    /// Size of the record on the device, in bytes.
    pub const SIZE: u64 = size_of::<Self>() as u64;

    /// Arguments for this frame: the active mesh's submesh-0 index count and
    /// the simulation's current instance count. Everything else stays zero.
    pub fn for_frame(index_count: u32, instance_count: u32) -> Self {
        Self {
            index_count,
            instance_count,
            ..Self::default()
        }
    }

    /// The record as the five raw `u32` words uploaded to the device.
    pub fn to_array(self) -> [u32; 5] {
        [
            self.index_count,
            self.instance_count,
            self.first_index,
            self.base_vertex,
            self.first_instance,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_five_words() {
        assert_eq!(IndirectDrawArgs::SIZE, 20);
    }

    #[test]
    fn test_for_frame_writes_only_first_two_words() {
        let args = IndirectDrawArgs::for_frame(900, 5000);
        assert_eq!(args.to_array(), [900, 5000, 0, 0, 0]);
    }

    #[test]
    fn test_no_mesh_means_zero_index_count() {
        let args = IndirectDrawArgs::for_frame(0, 128);
        assert_eq!(args.to_array(), [0, 128, 0, 0, 0]);
    }
}
