//! Translation of host error objects into native status codes.
//!
//! Host errors never unwind across the boundary: scoped errors ride the
//! future broker, uncaptured ones are queued here and drained during event
//! processing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use strato_webgpu_abi::{DeviceLostReason, ErrorType, RawHandle};

#[derive(Debug, Clone)]
pub struct UncapturedError {
    pub device: RawHandle,
    pub ty: ErrorType,
    pub message: String,
}

/// Queue fed by the host's uncaptured-error callbacks.
///
/// The callbacks must be `Send` on native hosts, so the queue sits behind an
/// `Arc<Mutex<_>>` even though the bridge itself is single-threaded.
#[derive(Clone, Default)]
pub(crate) struct ErrorQueue {
    inner: Arc<Mutex<VecDeque<UncapturedError>>>,
}

impl ErrorQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn drain(&self) -> Vec<UncapturedError> {
        self.inner.lock().unwrap().drain(..).collect()
    }

    /// Uncaptured-error handler for `device`, suitable for
    /// `wgpu::Device::on_uncaptured_error`.
    pub(crate) fn handler_for(
        &self,
        device: RawHandle,
    ) -> impl Fn(wgpu::Error) + Send + 'static {
        let queue = Arc::clone(&self.inner);
        move |err| {
            let (ty, message) = classify(&err);
            tracing::warn!(device, ?ty, message, "uncaptured device error");
            queue.lock().unwrap().push_back(UncapturedError {
                device,
                ty,
                message,
            });
        }
    }
}

pub(crate) fn classify(err: &wgpu::Error) -> (ErrorType, String) {
    match err {
        wgpu::Error::OutOfMemory { .. } => (ErrorType::OutOfMemory, err.to_string()),
        wgpu::Error::Validation { description, .. } => {
            (ErrorType::Validation, description.clone())
        }
        wgpu::Error::Internal { description, .. } => (ErrorType::Internal, description.clone()),
    }
}

pub(crate) fn lost_reason(reason: wgpu::DeviceLostReason) -> DeviceLostReason {
    match reason {
        wgpu::DeviceLostReason::Destroyed => DeviceLostReason::Destroyed,
        _ => DeviceLostReason::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_drains_in_push_order() {
        let queue = ErrorQueue::new();
        let handler_a = queue.handler_for(1);
        let handler_b = queue.handler_for(2);

        handler_a(wgpu::Error::Validation {
            source: Box::new(std::fmt::Error),
            description: "first".into(),
        });
        handler_b(wgpu::Error::Validation {
            source: Box::new(std::fmt::Error),
            description: "second".into(),
        });

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].device, 1);
        assert_eq!(drained[0].ty, ErrorType::Validation);
        assert_eq!(drained[0].message, "first");
        assert_eq!(drained[1].device, 2);
        assert!(queue.drain().is_empty());
    }
}
