//! Per-buffer map state machine with deferred write-back.
//!
//! A map record exists exactly while the buffer is mapped (or a map request
//! is in flight). Mapped ranges are staged in guest memory; flushing staging
//! bytes into the real mapped range is deferred to unmap time via write-back
//! closures run in registration order.

use strato_webgpu_abi::{BufferMapState, BufferUsage, MapMode, WHOLE_SIZE};

use crate::memory::{must, GuestHeap, GuestMemoryExt};

/// Deferred action flushing one staged range at unmap time.
pub(crate) type Writeback = Box<dyn FnOnce(&dyn GuestHeap, &wgpu::Buffer)>;

struct MapRecord {
    mode: MapMode,
    /// True between `map_async` and its settlement.
    pending: bool,
    writebacks: Vec<Writeback>,
}

pub struct BufferRecord {
    pub(crate) buffer: wgpu::Buffer,
    size: u64,
    usage: BufferUsage,
    map: Option<MapRecord>,
}

impl BufferRecord {
    pub(crate) fn new(
        buffer: wgpu::Buffer,
        size: u64,
        usage: BufferUsage,
        mapped_at_creation: bool,
    ) -> Self {
        let map = mapped_at_creation.then(|| MapRecord {
            mode: MapMode::WRITE,
            pending: false,
            writebacks: Vec::new(),
        });
        Self {
            buffer,
            size,
            usage,
            map,
        }
    }

    pub(crate) fn size(&self) -> u64 {
        self.size
    }

    pub(crate) fn usage(&self) -> BufferUsage {
        self.usage
    }

    pub(crate) fn map_state(&self) -> BufferMapState {
        match &self.map {
            None => BufferMapState::Unmapped,
            Some(record) if record.pending => BufferMapState::Pending,
            Some(_) => BufferMapState::Mapped,
        }
    }

    /// Starts a map request. Requesting a map while a record exists (pending
    /// or mapped) is a contract violation.
    pub(crate) fn begin_map(&mut self, mode: MapMode) {
        assert!(
            self.map.is_none(),
            "map_async on a buffer that is already {}",
            match self.map_state() {
                BufferMapState::Pending => "being mapped",
                _ => "mapped",
            }
        );
        self.map = Some(MapRecord {
            mode,
            pending: true,
            writebacks: Vec::new(),
        });
    }

    /// Applies the settlement of an in-flight map request. A record that was
    /// discarded in the meantime (unmap before settlement) is left alone.
    pub(crate) fn resolve_map(&mut self, success: bool) {
        let pending = matches!(&self.map, Some(record) if record.pending);
        if !pending {
            return;
        }
        if success {
            if let Some(record) = self.map.as_mut() {
                record.pending = false;
            }
        } else {
            self.map = None;
        }
    }

    /// Stages a mapped range in guest memory and registers its write-back.
    /// Returns the guest address of the staging region, or 0 when staging
    /// could not be allocated.
    pub(crate) fn stage_mapped_range(
        &mut self,
        mem: &dyn GuestHeap,
        offset: u64,
        size: u64,
        writable: bool,
    ) -> u64 {
        let len = if size == WHOLE_SIZE {
            self.size.checked_sub(offset).unwrap_or_else(|| {
                panic!("mapped range offset {offset} exceeds buffer size {}", self.size)
            })
        } else {
            size
        };
        let end = offset.checked_add(len);
        assert!(
            end.is_some_and(|end| end <= self.size),
            "mapped range {offset}+{len} exceeds buffer size {}",
            self.size
        );

        let record = match self.map.as_mut() {
            Some(record) if !record.pending => record,
            Some(_) => panic!("mapped range requested while the map is still pending"),
            None => panic!("mapped range requested on an unmapped buffer"),
        };
        if writable {
            assert!(
                record.mode.contains(MapMode::WRITE),
                "writable range requested on a buffer mapped for reading"
            );
        }

        let staging = match mem.alloc(len, 16) {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(%err, "mapped-range staging allocation failed");
                return 0;
            }
        };

        if writable {
            must(mem.write(staging, &vec![0u8; len as usize]));
            record.writebacks.push(Box::new(move |mem, buffer| {
                let bytes = must(mem.read_bytes(staging, len as usize));
                buffer
                    .slice(offset..offset + len)
                    .get_mapped_range_mut()
                    .copy_from_slice(&bytes);
                mem.free(staging);
            }));
        } else {
            let mapped = self.buffer.slice(offset..offset + len).get_mapped_range();
            must(mem.write(staging, &mapped));
            drop(mapped);
            record.writebacks.push(Box::new(move |mem, _buffer| {
                mem.free(staging);
            }));
        }

        staging
    }

    /// Runs pending write-backs in registration order and unmaps. A no-op on
    /// an unmapped buffer.
    pub(crate) fn unmap(&mut self, mem: &dyn GuestHeap) {
        let Some(record) = self.map.take() else {
            return;
        };
        for writeback in record.writebacks {
            writeback(mem, &self.buffer);
        }
        self.buffer.unmap();
    }

    /// Host destroy. Flushes the unmap path first so staged write-backs run
    /// exactly once and staging memory is released.
    pub(crate) fn destroy(&mut self, mem: &dyn GuestHeap) {
        self.unmap(mem);
        self.buffer.destroy();
    }
}
