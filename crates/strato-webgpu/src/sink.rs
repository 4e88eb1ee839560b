//! Native completion-callback convention.
//!
//! The embedder implements [`CompletionSink`] by forwarding each call to the
//! matching native entry point. Message strings are only valid for the
//! duration of the call; implementations must copy what they keep.

use strato_webgpu_abi::{
    CompilationMessageKind, CreatePipelineStatus, DeviceLostReason, ErrorType, FutureId,
    MapAsyncStatus, QueueWorkDoneStatus, RawHandle, RequestAdapterStatus, RequestDeviceStatus,
};

/// One diagnostic from shader compilation, with its source location when the
/// host provides one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompilationMessage {
    pub kind: CompilationMessageKind,
    pub message: String,
    pub line_number: u32,
    pub line_position: u32,
    pub offset: u32,
    pub length: u32,
}

/// Per-operation completion entry points invoked by the bridge.
///
/// Newly created handles are bound in the handle table before the call, so a
/// completion callback may immediately use the handle it receives.
pub trait CompletionSink {
    fn request_adapter_completed(
        &mut self,
        future: FutureId,
        status: RequestAdapterStatus,
        adapter: RawHandle,
        message: &str,
    );

    fn request_device_completed(
        &mut self,
        future: FutureId,
        status: RequestDeviceStatus,
        device: RawHandle,
        message: &str,
    );

    fn buffer_map_completed(&mut self, future: FutureId, status: MapAsyncStatus, message: &str);

    fn queue_work_done_completed(&mut self, future: FutureId, status: QueueWorkDoneStatus);

    fn create_compute_pipeline_completed(
        &mut self,
        future: FutureId,
        status: CreatePipelineStatus,
        pipeline: RawHandle,
        message: &str,
    );

    fn create_render_pipeline_completed(
        &mut self,
        future: FutureId,
        status: CreatePipelineStatus,
        pipeline: RawHandle,
        message: &str,
    );

    fn compilation_info_completed(&mut self, future: FutureId, messages: &[CompilationMessage]);

    fn pop_error_scope_completed(&mut self, future: FutureId, ty: ErrorType, message: &str);

    /// Fires at most once per device, or once with
    /// [`DeviceLostReason::FailedCreation`] when the device request failed.
    fn device_lost(&mut self, future: FutureId, reason: DeviceLostReason, message: &str);

    fn uncaptured_error(&mut self, device: RawHandle, ty: ErrorType, message: &str);
}
