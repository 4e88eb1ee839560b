//! Host-side bridge between handle-based native WebGPU calls and `wgpu`.
//!
//! Native code addresses GPU resources by integer handles and flat-memory
//! descriptors; this crate resolves handles to live `wgpu` objects, decodes
//! descriptors through an injected layout table, and converts `wgpu`'s
//! asynchronous operations into the completion-callback convention native
//! code consumes (see [`CompletionSink`]).
//!
//! Everything hangs off a single [`WebGpuBridge`] context threaded through
//! the entry points; there are no global tables. The bridge is
//! single-threaded and cooperative: all continuations run on the embedder's
//! scheduler, and no entry point blocks.

mod bridge;
mod buffer;
mod decode;
mod error;
mod future;
mod handle;
mod memory;
mod registry;
mod sink;

pub use bridge::WebGpuBridge;
pub use error::UncapturedError;
pub use future::{NeverTimer, TimerSource};
pub use handle::HandleTable;
pub use memory::{GuestHeap, GuestMemory, GuestMemoryError, GuestMemoryExt, VecGuestMemory};
pub use sink::{CompilationMessage, CompletionSink};

pub use strato_webgpu_abi as abi;
