//! Shared helpers for `strato-webgpu` integration tests.
//!
//! Tests that need a live `wgpu` adapter skip themselves when none is
//! available; set `STRATO_REQUIRE_WEBGPU=1` to turn those skips into failures.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, LocalBoxFuture};
use futures::FutureExt;

use strato_webgpu::abi::{
    self, CompilationMessageKind, CreatePipelineStatus, DeviceLostReason, ErrorType, FutureId,
    MapAsyncStatus, QueueWorkDoneStatus, RawHandle, RequestAdapterStatus, RequestDeviceStatus,
    LAYOUTS,
};
use strato_webgpu::{
    CompilationMessage, CompletionSink, GuestMemory, GuestMemoryExt, TimerSource, VecGuestMemory,
    WebGpuBridge,
};

pub fn require_webgpu() -> bool {
    let Ok(raw) = std::env::var("STRATO_REQUIRE_WEBGPU") else {
        return false;
    };
    let v = raw.trim();
    v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes")
}

pub fn skip_or_panic(test_name: &str, reason: &str) {
    if require_webgpu() {
        panic!("STRATO_REQUIRE_WEBGPU is set but {test_name} cannot run: {reason}");
    }
    eprintln!("skipping {test_name}: {reason}");
}

#[derive(Clone, Debug, PartialEq)]
pub enum SinkEvent {
    AdapterReady {
        future: FutureId,
        status: RequestAdapterStatus,
        adapter: RawHandle,
    },
    DeviceReady {
        future: FutureId,
        status: RequestDeviceStatus,
        device: RawHandle,
        message: String,
    },
    MapDone {
        future: FutureId,
        status: MapAsyncStatus,
    },
    WorkDone {
        future: FutureId,
        status: QueueWorkDoneStatus,
    },
    ComputePipeline {
        future: FutureId,
        status: CreatePipelineStatus,
        pipeline: RawHandle,
        message: String,
    },
    RenderPipeline {
        future: FutureId,
        status: CreatePipelineStatus,
        pipeline: RawHandle,
        message: String,
    },
    CompilationInfo {
        future: FutureId,
        kinds: Vec<CompilationMessageKind>,
    },
    ErrorScope {
        future: FutureId,
        ty: ErrorType,
        message: String,
    },
    DeviceLost {
        future: FutureId,
        reason: DeviceLostReason,
        message: String,
    },
    Uncaptured {
        device: RawHandle,
        ty: ErrorType,
        message: String,
    },
}

pub struct RecordingSink {
    events: Rc<RefCell<Vec<SinkEvent>>>,
}

impl RecordingSink {
    pub fn new() -> (Self, Rc<RefCell<Vec<SinkEvent>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                events: Rc::clone(&events),
            },
            events,
        )
    }

    fn push(&self, event: SinkEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl CompletionSink for RecordingSink {
    fn request_adapter_completed(
        &mut self,
        future: FutureId,
        status: RequestAdapterStatus,
        adapter: RawHandle,
        _message: &str,
    ) {
        self.push(SinkEvent::AdapterReady {
            future,
            status,
            adapter,
        });
    }

    fn request_device_completed(
        &mut self,
        future: FutureId,
        status: RequestDeviceStatus,
        device: RawHandle,
        message: &str,
    ) {
        self.push(SinkEvent::DeviceReady {
            future,
            status,
            device,
            message: message.to_string(),
        });
    }

    fn buffer_map_completed(&mut self, future: FutureId, status: MapAsyncStatus, _message: &str) {
        self.push(SinkEvent::MapDone { future, status });
    }

    fn queue_work_done_completed(&mut self, future: FutureId, status: QueueWorkDoneStatus) {
        self.push(SinkEvent::WorkDone { future, status });
    }

    fn create_compute_pipeline_completed(
        &mut self,
        future: FutureId,
        status: CreatePipelineStatus,
        pipeline: RawHandle,
        message: &str,
    ) {
        self.push(SinkEvent::ComputePipeline {
            future,
            status,
            pipeline,
            message: message.to_string(),
        });
    }

    fn create_render_pipeline_completed(
        &mut self,
        future: FutureId,
        status: CreatePipelineStatus,
        pipeline: RawHandle,
        message: &str,
    ) {
        self.push(SinkEvent::RenderPipeline {
            future,
            status,
            pipeline,
            message: message.to_string(),
        });
    }

    fn compilation_info_completed(&mut self, future: FutureId, messages: &[CompilationMessage]) {
        self.push(SinkEvent::CompilationInfo {
            future,
            kinds: messages.iter().map(|m| m.kind).collect(),
        });
    }

    fn pop_error_scope_completed(&mut self, future: FutureId, ty: ErrorType, message: &str) {
        self.push(SinkEvent::ErrorScope {
            future,
            ty,
            message: message.to_string(),
        });
    }

    fn device_lost(&mut self, future: FutureId, reason: DeviceLostReason, message: &str) {
        self.push(SinkEvent::DeviceLost {
            future,
            reason,
            message: message.to_string(),
        });
    }

    fn uncaptured_error(&mut self, device: RawHandle, ty: ErrorType, message: &str) {
        self.push(SinkEvent::Uncaptured {
            device,
            ty,
            message: message.to_string(),
        });
    }
}

/// Timer whose delay elapses immediately; `wait_any` with any timeout takes
/// the timeout branch unless a settlement is already buffered.
pub struct FiredTimer;

impl TimerSource for FiredTimer {
    fn delay(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        future::ready(()).boxed_local()
    }
}

pub const ADAPTER: RawHandle = 1;
pub const DEVICE: RawHandle = 2;
pub const QUEUE: RawHandle = 3;
pub const DEVICE_LOST_FUTURE: FutureId = FutureId(90);

pub struct Harness {
    pub bridge: WebGpuBridge,
    pub events: Rc<RefCell<Vec<SinkEvent>>>,
    pub mem: VecGuestMemory,
}

impl Harness {
    pub fn take_events(&self) -> Vec<SinkEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

/// Brings up a bridge with a bound adapter/device/queue, or skips the test.
pub fn boot(test_name: &str) -> Option<Harness> {
    let (sink, events) = RecordingSink::new();
    let mut bridge = WebGpuBridge::with_timer(Box::new(sink), Box::new(FiredTimer));
    let mem = VecGuestMemory::new(1 << 20);

    let adapter_future = FutureId(91);
    pollster::block_on(async {
        bridge.instance_request_adapter(&mem, adapter_future, ADAPTER, 0);
        bridge.wait_any(&[adapter_future], None).await
    });
    let adapter_ok = events.borrow().iter().any(|e| {
        matches!(
            e,
            SinkEvent::AdapterReady {
                status: RequestAdapterStatus::Success,
                ..
            }
        )
    });
    if !adapter_ok {
        skip_or_panic(test_name, "no wgpu adapter available");
        return None;
    }

    let device_future = FutureId(92);
    pollster::block_on(async {
        bridge.adapter_request_device(
            &mem,
            ADAPTER,
            device_future,
            DEVICE_LOST_FUTURE,
            DEVICE,
            QUEUE,
            0,
        );
        bridge.wait_any(&[device_future], None).await
    });
    let device_ok = events.borrow().iter().any(|e| {
        matches!(
            e,
            SinkEvent::DeviceReady {
                status: RequestDeviceStatus::Success,
                ..
            }
        )
    });
    assert!(device_ok, "request_device failed on an available adapter");

    events.borrow_mut().clear();
    Some(Harness {
        bridge,
        events,
        mem,
    })
}

// ----------------------------------------------------------------------
// Guest descriptor encoders (mirror the generated layout tables)
// ----------------------------------------------------------------------

pub fn write_buffer_descriptor(
    mem: &VecGuestMemory,
    addr: u64,
    size: u64,
    usage: abi::BufferUsage,
    mapped_at_creation: bool,
) {
    let l = &LAYOUTS.buffer_descriptor;
    mem.write_u32(addr, 0).unwrap();
    mem.write_u32(addr + u64::from(l.label.ptr), 0).unwrap();
    mem.write_u32(addr + u64::from(l.label.len), 0).unwrap();
    mem.write_u32(addr + u64::from(l.usage), usage.bits()).unwrap();
    mem.write_u32(
        addr + u64::from(l.mapped_at_creation),
        mapped_at_creation as u32,
    )
    .unwrap();
    mem.write_u64(addr + u64::from(l.size), size).unwrap();
}

/// Writes a shader module descriptor at `desc` with a WGSL source extension
/// at `ext` and the code bytes at `code`.
pub fn write_shader_module_wgsl(
    mem: &VecGuestMemory,
    desc: u64,
    ext: u64,
    code: u64,
    wgsl: &str,
) {
    mem.write(code, wgsl.as_bytes()).unwrap();
    mem.write_u32(desc + u64::from(LAYOUTS.chain.next), ext as u32).unwrap();
    mem.write_u32(desc + u64::from(LAYOUTS.shader_module_descriptor.label.ptr), 0)
        .unwrap();
    mem.write_u32(desc + u64::from(LAYOUTS.shader_module_descriptor.label.len), 0)
        .unwrap();
    mem.write_u32(ext + u64::from(LAYOUTS.chain.next), 0).unwrap();
    mem.write_u32(
        ext + u64::from(LAYOUTS.chain.stype),
        abi::SType::ShaderSourceWgsl as u32,
    )
    .unwrap();
    mem.write_u32(
        ext + u64::from(LAYOUTS.shader_source_wgsl.code.ptr),
        code as u32,
    )
    .unwrap();
    mem.write_u32(
        ext + u64::from(LAYOUTS.shader_source_wgsl.code.len),
        wgsl.len() as u32,
    )
    .unwrap();
}

/// Compute pipeline descriptor with auto layout and no constants.
pub fn write_compute_pipeline_descriptor(
    mem: &VecGuestMemory,
    desc: u64,
    module: RawHandle,
    entry_addr: u64,
    entry_point: &str,
) {
    let l = &LAYOUTS.compute_pipeline_descriptor;
    mem.write(entry_addr, entry_point.as_bytes()).unwrap();
    mem.write_u32(desc, 0).unwrap();
    mem.write_u32(desc + u64::from(l.label.ptr), 0).unwrap();
    mem.write_u32(desc + u64::from(l.label.len), 0).unwrap();
    mem.write_u32(desc + u64::from(l.layout), 0).unwrap();
    mem.write_u32(desc + u64::from(l.module), module).unwrap();
    mem.write_u32(desc + u64::from(l.entry_point.ptr), entry_addr as u32)
        .unwrap();
    mem.write_u32(desc + u64::from(l.entry_point.len), entry_point.len() as u32)
        .unwrap();
    mem.write_u32(desc + u64::from(l.constant_count), 0).unwrap();
    mem.write_u32(desc + u64::from(l.constants), 0).unwrap();
}

/// Limits struct with every field undefined.
pub fn write_undefined_limits(mem: &VecGuestMemory, addr: u64) {
    let l = &LAYOUTS.limits;
    for offset in (0..100u64).step_by(4) {
        mem.write_u32(addr + offset, abi::LIMIT_U32_UNDEFINED).unwrap();
    }
    mem.write_u64(
        addr + u64::from(l.max_uniform_buffer_binding_size),
        abi::LIMIT_U64_UNDEFINED,
    )
    .unwrap();
    mem.write_u64(
        addr + u64::from(l.max_storage_buffer_binding_size),
        abi::LIMIT_U64_UNDEFINED,
    )
    .unwrap();
    mem.write_u64(addr + u64::from(l.max_buffer_size), abi::LIMIT_U64_UNDEFINED)
        .unwrap();
}

/// Device descriptor pointing at `limits_addr` (0 for host defaults).
pub fn write_device_descriptor(mem: &VecGuestMemory, desc: u64, limits_addr: u64) {
    let l = &LAYOUTS.device_descriptor;
    mem.write_u32(desc, 0).unwrap();
    mem.write_u32(desc + u64::from(l.label.ptr), 0).unwrap();
    mem.write_u32(desc + u64::from(l.label.len), 0).unwrap();
    mem.write_u32(desc + u64::from(l.required_feature_count), 0).unwrap();
    mem.write_u32(desc + u64::from(l.required_features), 0).unwrap();
    mem.write_u32(desc + u64::from(l.required_limits), limits_addr as u32)
        .unwrap();
}
