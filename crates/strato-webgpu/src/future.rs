//! Future broker: maps native future ids onto pending host operations.
//!
//! Each registered operation is a boxed local future that resolves to the
//! settled outcome. Settlements are buffered per id until they are claimed,
//! either by `process_events` (all of them, in settlement order) or by
//! `wait_any` (exactly the winning id). Host operations cannot be cancelled;
//! a registration always drains to a settlement, which is also when its
//! keep-alive token is released.

use std::cell::Cell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, LocalBoxFuture};
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};

use strato_webgpu_abi::{
    CreatePipelineStatus, DeviceLostReason, ErrorType, FutureId, MapAsyncStatus,
    QueueWorkDoneStatus, RawHandle,
};

use crate::sink::CompilationMessage;

/// Outcome of one host operation, ready to be marshalled to native code.
pub(crate) enum SettledOp {
    RequestAdapter {
        handle: RawHandle,
        adapter: Option<wgpu::Adapter>,
    },
    RequestDevice {
        device_handle: RawHandle,
        queue_handle: RawHandle,
        lost_future: FutureId,
        result: Result<(wgpu::Device, wgpu::Queue), String>,
    },
    MapAsync {
        buffer: RawHandle,
        status: MapAsyncStatus,
        message: String,
    },
    WorkDone {
        status: QueueWorkDoneStatus,
    },
    PopErrorScope {
        ty: ErrorType,
        message: String,
    },
    CompilationInfo {
        messages: Vec<CompilationMessage>,
    },
    CreateComputePipeline {
        handle: RawHandle,
        status: CreatePipelineStatus,
        pipeline: Option<wgpu::ComputePipeline>,
        message: String,
    },
    CreateRenderPipeline {
        handle: RawHandle,
        status: CreatePipelineStatus,
        pipeline: Option<wgpu::RenderPipeline>,
        message: String,
    },
    DeviceLost {
        device: RawHandle,
        reason: DeviceLostReason,
        message: String,
    },
}

pub(crate) struct Settlement {
    pub future: FutureId,
    pub op: SettledOp,
}

/// Source of timer futures for `wait_any` timeouts. Time belongs to the
/// embedder's scheduler, so the bridge never owns a clock of its own.
pub trait TimerSource {
    fn delay(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Timer that never fires. With it, a `wait_any` timeout degrades to an
/// untimed wait.
pub struct NeverTimer;

impl TimerSource for NeverTimer {
    fn delay(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        future::pending().boxed_local()
    }
}

/// Token held for the lifetime of one outstanding operation.
struct KeepAlive {
    counter: Rc<Cell<usize>>,
}

impl KeepAlive {
    fn new(counter: &Rc<Cell<usize>>) -> Self {
        counter.set(counter.get() + 1);
        Self {
            counter: Rc::clone(counter),
        }
    }
}

impl Drop for KeepAlive {
    fn drop(&mut self) {
        self.counter.set(self.counter.get() - 1);
    }
}

struct PendingFuture {
    _keep_alive: KeepAlive,
    ready: Option<SettledOp>,
}

pub(crate) struct FutureBroker {
    pending: HashMap<u64, PendingFuture>,
    /// Driver futures for every operation that has not yet settled.
    pub(crate) sources: FuturesUnordered<LocalBoxFuture<'static, Settlement>>,
    /// Ids in settlement order; stale entries (already claimed by `wait_any`)
    /// are skipped on pop.
    settled: VecDeque<FutureId>,
    live_ops: Rc<Cell<usize>>,
}

impl FutureBroker {
    pub(crate) fn new() -> Self {
        Self {
            pending: HashMap::new(),
            sources: FuturesUnordered::new(),
            settled: VecDeque::new(),
            live_ops: Rc::new(Cell::new(0)),
        }
    }

    /// Number of operations whose keep-alive token has not been released.
    pub(crate) fn outstanding(&self) -> usize {
        self.live_ops.get()
    }

    pub(crate) fn is_pending(&self, id: FutureId) -> bool {
        self.pending.contains_key(&id.0)
    }

    pub(crate) fn register(&mut self, id: FutureId, driver: LocalBoxFuture<'static, SettledOp>) {
        assert!(!id.is_null(), "null future id registered");
        assert!(
            !self.pending.contains_key(&id.0),
            "future id {} registered while still pending",
            id.0
        );
        tracing::trace!(future = id.0, "operation registered");
        self.pending.insert(
            id.0,
            PendingFuture {
                _keep_alive: KeepAlive::new(&self.live_ops),
                ready: None,
            },
        );
        self.sources.push(
            async move {
                Settlement {
                    future: id,
                    op: driver.await,
                }
            }
            .boxed_local(),
        );
    }

    /// Drains every driver future that can settle without waiting.
    pub(crate) fn poll_sources(&mut self) {
        loop {
            let polled = self.sources.next().now_or_never();
            match polled {
                Some(Some(settlement)) => self.absorb(settlement),
                _ => break,
            }
        }
    }

    pub(crate) fn absorb(&mut self, settlement: Settlement) {
        let id = settlement.future;
        tracing::trace!(future = id.0, "operation settled");
        let entry = self
            .pending
            .get_mut(&id.0)
            .unwrap_or_else(|| panic!("settlement for unknown future id {}", id.0));
        assert!(entry.ready.is_none(), "future id {} settled twice", id.0);
        entry.ready = Some(settlement.op);
        self.settled.push_back(id);
    }

    /// First id from `ids` (in settlement order) whose result is buffered.
    pub(crate) fn first_ready_of(&self, ids: &[FutureId]) -> Option<FutureId> {
        self.settled
            .iter()
            .copied()
            .find(|id| ids.contains(id) && self.is_ready(*id))
    }

    fn is_ready(&self, id: FutureId) -> bool {
        self.pending
            .get(&id.0)
            .is_some_and(|entry| entry.ready.is_some())
    }

    /// Claims a buffered settlement, removing the id from the table and
    /// releasing its keep-alive token.
    pub(crate) fn take_ready(&mut self, id: FutureId) -> Option<Settlement> {
        if !self.is_ready(id) {
            return None;
        }
        let entry = self.pending.remove(&id.0).unwrap_or_else(|| {
            panic!("future id {} vanished while being claimed", id.0)
        });
        entry.ready.map(|op| Settlement { future: id, op })
    }

    /// Claims the oldest unclaimed settlement.
    pub(crate) fn pop_ready(&mut self) -> Option<Settlement> {
        while let Some(id) = self.settled.pop_front() {
            if let Some(settlement) = self.take_ready(id) {
                return Some(settlement);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_intrusive::channel::shared::oneshot_channel;

    fn work_done_driver() -> (
        impl FnOnce(QueueWorkDoneStatus),
        LocalBoxFuture<'static, SettledOp>,
    ) {
        let (sender, receiver) = oneshot_channel();
        let settle = move |status| {
            sender.send(status).ok();
        };
        let driver = async move {
            let status = receiver
                .receive()
                .await
                .unwrap_or(QueueWorkDoneStatus::Error);
            SettledOp::WorkDone { status }
        }
        .boxed_local();
        (settle, driver)
    }

    #[test]
    fn settlement_order_wins_over_registration_order() {
        let mut broker = FutureBroker::new();
        let (send_a, driver_a) = work_done_driver();
        let (send_b, driver_b) = work_done_driver();
        broker.register(FutureId(1), driver_a);
        broker.register(FutureId(2), driver_b);

        send_b(QueueWorkDoneStatus::Success);
        send_a(QueueWorkDoneStatus::Success);
        broker.poll_sources();

        assert_eq!(broker.pop_ready().unwrap().future, FutureId(2));
        assert_eq!(broker.pop_ready().unwrap().future, FutureId(1));
        assert!(broker.pop_ready().is_none());
    }

    #[test]
    fn keep_alive_released_exactly_once_on_claim() {
        let mut broker = FutureBroker::new();
        let (send, driver) = work_done_driver();
        broker.register(FutureId(7), driver);
        assert_eq!(broker.outstanding(), 1);

        send(QueueWorkDoneStatus::Success);
        broker.poll_sources();
        // Buffered but unclaimed settlements still hold their token.
        assert_eq!(broker.outstanding(), 1);

        assert!(broker.take_ready(FutureId(7)).is_some());
        assert_eq!(broker.outstanding(), 0);
        assert!(!broker.is_pending(FutureId(7)));
    }

    #[test]
    fn take_ready_leaves_other_ids_registered() {
        let mut broker = FutureBroker::new();
        let (send_a, driver_a) = work_done_driver();
        let (_send_b, driver_b) = work_done_driver();
        broker.register(FutureId(1), driver_a);
        broker.register(FutureId(2), driver_b);

        send_a(QueueWorkDoneStatus::Success);
        broker.poll_sources();

        assert_eq!(broker.first_ready_of(&[FutureId(1), FutureId(2)]), Some(FutureId(1)));
        assert!(broker.take_ready(FutureId(1)).is_some());
        assert!(broker.is_pending(FutureId(2)));
        assert!(broker.take_ready(FutureId(2)).is_none());
    }

    #[test]
    fn unsettled_future_is_not_ready() {
        let mut broker = FutureBroker::new();
        let (_send, driver) = work_done_driver();
        broker.register(FutureId(3), driver);
        broker.poll_sources();
        assert!(broker.first_ready_of(&[FutureId(3)]).is_none());
        assert!(broker.take_ready(FutureId(3)).is_none());
        assert!(broker.is_pending(FutureId(3)));
    }

    #[test]
    #[should_panic(expected = "registered while still pending")]
    fn duplicate_registration_panics() {
        let mut broker = FutureBroker::new();
        let (_s1, d1) = work_done_driver();
        let (_s2, d2) = work_done_driver();
        broker.register(FutureId(5), d1);
        broker.register(FutureId(5), d2);
    }

    #[test]
    #[should_panic(expected = "null future id")]
    fn null_future_id_panics() {
        let mut broker = FutureBroker::new();
        let (_s, d) = work_done_driver();
        broker.register(FutureId::NULL, d);
    }
}
