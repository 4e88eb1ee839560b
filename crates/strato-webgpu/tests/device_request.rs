//! Adapter/device request lifecycle and the one-shot device-lost future.

mod common;

use std::time::Duration;

use common::{
    boot, write_device_descriptor, write_undefined_limits, SinkEvent, ADAPTER, DEVICE,
    DEVICE_LOST_FUTURE,
};

use strato_webgpu::abi::{
    DeviceLostReason, FutureId, RequestDeviceStatus, LAYOUTS,
};
use strato_webgpu::GuestMemoryExt;

#[test]
fn adapter_and_device_requests_bind_their_reserved_handles() {
    let Some(h) = boot("adapter_and_device_requests_bind_their_reserved_handles") else {
        return;
    };
    // boot() already asserted both completions; the bound handles must be
    // usable immediately.
    h.bridge.adapter_limits(&h.mem, ADAPTER, 0x800);
    h.bridge.device_poll(DEVICE, false);
    assert!(!h.bridge.adapter_has_feature(ADAPTER, 0));
    assert_eq!(h.bridge.outstanding_operations(), 1, "device-lost stays pending");
}

#[test]
fn limits_write_back_uses_the_wire_layout() {
    let Some(h) = boot("limits_write_back_uses_the_wire_layout") else {
        return;
    };

    let out = 0x800u64;
    h.bridge.device_limits(&h.mem, DEVICE, out);
    let l = &LAYOUTS.limits;
    let max_2d = h
        .mem
        .read_u32(out + u64::from(l.max_texture_dimension_2d))
        .unwrap();
    let max_buffer = h.mem.read_u64(out + u64::from(l.max_buffer_size)).unwrap();
    assert!(max_2d >= 2048);
    assert!(max_buffer > 0);
    assert_ne!(max_buffer, strato_webgpu::abi::LIMIT_U64_UNDEFINED);
}

#[test]
fn failed_device_request_resolves_lost_future_with_failed_creation() {
    let Some(mut h) = boot("failed_device_request_resolves_lost_future_with_failed_creation")
    else {
        return;
    };

    // Unsatisfiable required limits guarantee a rejection.
    let desc = 0x100u64;
    let limits = 0x200u64;
    write_undefined_limits(&h.mem, limits);
    h.mem
        .write_u32(
            limits + u64::from(LAYOUTS.limits.max_bind_groups),
            1 << 30,
        )
        .unwrap();
    h.mem
        .write_u32(
            limits + u64::from(LAYOUTS.limits.max_texture_dimension_2d),
            1 << 30,
        )
        .unwrap();
    write_device_descriptor(&h.mem, desc, limits);

    let device_future = FutureId(500);
    let lost_future = FutureId(501);
    h.bridge
        .adapter_request_device(&h.mem, ADAPTER, device_future, lost_future, 20, 21, desc);
    let winner = pollster::block_on(h.bridge.wait_any(&[device_future], None));
    assert_eq!(winner, device_future);

    let events = h.take_events();
    let ready: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, SinkEvent::DeviceReady { .. }))
        .collect();
    assert_eq!(ready.len(), 1);
    let SinkEvent::DeviceReady {
        status, device, message, ..
    } = ready[0]
    else {
        unreachable!();
    };
    assert_eq!(*status, RequestDeviceStatus::Error);
    assert_eq!(*device, 0);
    assert!(!message.is_empty());

    let lost: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, SinkEvent::DeviceLost { .. }))
        .collect();
    assert_eq!(lost.len(), 1, "device-lost fires exactly once");
    let SinkEvent::DeviceLost { future, reason, .. } = lost[0] else {
        unreachable!();
    };
    assert_eq!(*future, lost_future);
    assert_eq!(*reason, DeviceLostReason::FailedCreation);

    // The lost future was never registered, so waiting on it is a no-op
    // completion, and no stray settlements remain.
    let winner = pollster::block_on(h.bridge.wait_any(&[lost_future], None));
    assert_eq!(winner, lost_future);
    assert!(h.take_events().is_empty());
}

#[test]
fn device_destroy_resolves_the_lost_future_once() {
    let Some(mut h) = boot("device_destroy_resolves_the_lost_future_once") else {
        return;
    };

    h.bridge.device_destroy(DEVICE);

    // The lost callback fires during device maintenance; give it a few polls.
    let mut winner = FutureId::NULL;
    for _ in 0..100 {
        h.bridge.device_poll(DEVICE, false);
        winner = pollster::block_on(
            h.bridge
                .wait_any(&[DEVICE_LOST_FUTURE], Some(Duration::from_millis(1))),
        );
        if winner != FutureId::NULL {
            break;
        }
    }
    assert_eq!(winner, DEVICE_LOST_FUTURE);

    let events = h.take_events();
    let lost: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, SinkEvent::DeviceLost { .. }))
        .collect();
    assert_eq!(lost.len(), 1);
    let SinkEvent::DeviceLost { reason, .. } = lost[0] else {
        unreachable!();
    };
    assert_eq!(*reason, DeviceLostReason::Destroyed);
    assert_eq!(h.bridge.outstanding_operations(), 0);
}
