//! Buffer mapping state machine: staged ranges, deferred write-back, unmap
//! idempotence, destroy-implies-unmap.

mod common;

use common::{boot, write_buffer_descriptor, DEVICE, QUEUE};

use strato_webgpu::abi::{
    BufferMapState, BufferUsage, FutureId, MapAsyncStatus, MapMode, WHOLE_SIZE,
};
use strato_webgpu::{GuestMemory, GuestMemoryExt};

const BUF: u32 = 10;

#[test]
fn write_back_round_trips_through_map_read() {
    let Some(mut h) = boot("write_back_round_trips_through_map_read") else {
        return;
    };

    let desc = 0x100u64;
    write_buffer_descriptor(
        &h.mem,
        desc,
        256,
        BufferUsage::MAP_READ | BufferUsage::COPY_DST,
        true,
    );
    h.bridge.device_create_buffer(&h.mem, DEVICE, BUF, desc);
    assert_eq!(h.bridge.buffer_get_map_state(BUF), BufferMapState::Mapped);

    // Write a pattern through the staged creation mapping.
    let staging = h.bridge.buffer_get_mapped_range(&h.mem, BUF, 0, 256);
    assert_ne!(staging, 0);
    let pattern: Vec<u8> = (0..256).map(|i| (i * 7 % 251) as u8).collect();
    h.mem.write(staging, &pattern).unwrap();
    h.bridge.buffer_unmap(&h.mem, BUF);
    assert_eq!(h.bridge.buffer_get_map_state(BUF), BufferMapState::Unmapped);
    assert_eq!(h.mem.outstanding_allocations(), 0);

    // Map for read and compare.
    let map_future = FutureId(200);
    h.bridge
        .buffer_map_async(BUF, map_future, MapMode::READ.bits(), 0, WHOLE_SIZE);
    assert_eq!(h.bridge.buffer_get_map_state(BUF), BufferMapState::Pending);
    h.bridge.device_poll(DEVICE, true);
    let settled = pollster::block_on(h.bridge.wait_any(&[map_future], None));
    assert_eq!(settled, map_future);
    assert!(h.take_events().iter().any(|e| matches!(
        e,
        common::SinkEvent::MapDone {
            status: MapAsyncStatus::Success,
            ..
        }
    )));
    assert_eq!(h.bridge.buffer_get_map_state(BUF), BufferMapState::Mapped);

    let read_staging = h.bridge.buffer_get_const_mapped_range(&h.mem, BUF, 0, WHOLE_SIZE);
    assert_ne!(read_staging, 0);
    let bytes = h.mem.read_bytes(read_staging, 256).unwrap();
    assert_eq!(bytes, pattern);

    h.bridge.buffer_unmap(&h.mem, BUF);
    assert_eq!(h.mem.outstanding_allocations(), 0);
    // Only the device-lost future stays registered.
    assert_eq!(h.bridge.outstanding_operations(), 1);
}

#[test]
fn unmap_is_idempotent() {
    let Some(mut h) = boot("unmap_is_idempotent") else {
        return;
    };

    let desc = 0x100u64;
    write_buffer_descriptor(&h.mem, desc, 64, BufferUsage::COPY_SRC, true);
    h.bridge.device_create_buffer(&h.mem, DEVICE, BUF, desc);

    let staging = h.bridge.buffer_get_mapped_range(&h.mem, BUF, 0, 64);
    assert_ne!(staging, 0);

    h.bridge.buffer_unmap(&h.mem, BUF);
    // Second unmap is a no-op; the write-back already ran and freed staging.
    h.bridge.buffer_unmap(&h.mem, BUF);
    assert_eq!(h.bridge.buffer_get_map_state(BUF), BufferMapState::Unmapped);
    assert_eq!(h.mem.outstanding_allocations(), 0);
}

#[test]
fn destroy_without_unmap_flushes_write_backs_once() {
    let Some(mut h) = boot("destroy_without_unmap_flushes_write_backs_once") else {
        return;
    };

    let desc = 0x100u64;
    write_buffer_descriptor(&h.mem, desc, 1024, BufferUsage::COPY_SRC, true);
    h.bridge.device_create_buffer(&h.mem, DEVICE, BUF, desc);

    let staging = h.bridge.buffer_get_mapped_range(&h.mem, BUF, 0, 1024);
    assert_ne!(staging, 0);
    h.mem.write(staging, &[0xA5u8; 1024]).unwrap();

    // No explicit unmap: destroy must run the write-back exactly once (a
    // second run would double-free the staging allocation).
    h.bridge.buffer_destroy(&h.mem, BUF);
    assert_eq!(h.bridge.buffer_get_map_state(BUF), BufferMapState::Unmapped);
    assert_eq!(h.mem.outstanding_allocations(), 0);

    h.bridge.drop_buffer(&h.mem, BUF);
}

#[test]
fn queue_write_round_trips_through_read_map() {
    let Some(mut h) = boot("queue_write_round_trips_through_read_map") else {
        return;
    };

    let desc = 0x100u64;
    write_buffer_descriptor(
        &h.mem,
        desc,
        128,
        BufferUsage::MAP_READ | BufferUsage::COPY_DST,
        false,
    );
    h.bridge.device_create_buffer(&h.mem, DEVICE, BUF, desc);
    assert_eq!(h.bridge.buffer_get_size(BUF), 128);

    let payload = 0x400u64;
    let pattern: Vec<u8> = (0..128).map(|i| (255 - i) as u8).collect();
    h.mem.write(payload, &pattern).unwrap();
    h.bridge
        .queue_write_buffer(&h.mem, QUEUE, BUF, 0, payload, 128);
    h.bridge.queue_submit(QUEUE);

    let map_future = FutureId(201);
    h.bridge
        .buffer_map_async(BUF, map_future, MapMode::READ.bits(), 0, 128);
    h.bridge.device_poll(DEVICE, true);
    pollster::block_on(h.bridge.wait_any(&[map_future], None));

    let staging = h.bridge.buffer_get_const_mapped_range(&h.mem, BUF, 0, 128);
    assert_ne!(staging, 0);
    assert_eq!(h.mem.read_bytes(staging, 128).unwrap(), pattern);
    h.bridge.buffer_unmap(&h.mem, BUF);
    assert_eq!(h.mem.outstanding_allocations(), 0);
}
