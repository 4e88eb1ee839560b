//! Binary contract shared between the native WebGPU driver and the host-side
//! bridge.
//!
//! Source of truth: `include/strato_webgpu.h` and the generated layout tables
//! that accompany it. The numeric values in this crate (handles, future ids,
//! status codes, enum encodings, sentinel patterns, struct field offsets) are
//! what actually crosses the boundary; keep them in lockstep with the header.

mod flags;
mod layout;
mod status;
mod types;

pub use flags::{BufferUsage, MapMode, ShaderStage, TextureUsage};
pub use layout::*;
pub use status::{
    BufferMapState, CompilationMessageKind, CreatePipelineStatus, DeviceLostReason, ErrorFilter,
    ErrorType, MapAsyncStatus, QueueWorkDoneStatus, RequestAdapterStatus, RequestDeviceStatus,
};
pub use types::{
    AddressMode, BlendFactor, BlendOperation, BufferBindingKind, CompareFunction, CullMode,
    FeatureName, FilterMode, FrontFace, IndexFormat, PowerPreference, PrimitiveTopology,
    SamplerBindingKind, StencilOperation, StorageTextureAccess, TextureAspect, TextureDimension,
    TextureFormat, TextureSampleType, TextureViewDimension, VertexFormat, VertexStepMode,
};

/// Opaque resource handle owned by native code. `0` is the null sentinel.
pub type RawHandle = u32;

pub const NULL_HANDLE: RawHandle = 0;

/// All-ones u32: "undefined" for copy strides, mip/layer counts and u32 limits.
pub const COPY_STRIDE_UNDEFINED: u32 = 0xFFFF_FFFF;
pub const LIMIT_U32_UNDEFINED: u32 = 0xFFFF_FFFF;
pub const MIP_LEVEL_COUNT_UNDEFINED: u32 = 0xFFFF_FFFF;
pub const ARRAY_LAYER_COUNT_UNDEFINED: u32 = 0xFFFF_FFFF;

/// All-ones u64: "undefined" for sizes and u64 limits.
pub const LIMIT_U64_UNDEFINED: u64 = u64::MAX;
/// Map/copy "rest of the buffer" size sentinel (same bit pattern as above).
pub const WHOLE_SIZE: u64 = u64::MAX;

/// Identifier of one pending asynchronous operation.
///
/// Allocated by native code and transmitted as two u32 halves where the ABI
/// cannot carry a 64-bit integer directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FutureId(pub u64);

impl FutureId {
    pub const NULL: FutureId = FutureId(0);

    pub const fn from_parts(lo: u32, hi: u32) -> Self {
        FutureId(((hi as u64) << 32) | lo as u64)
    }

    pub const fn lo(self) -> u32 {
        self.0 as u32
    }

    pub const fn hi(self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// Extension-struct type tags.
///
/// Every extension struct starts with `{ next: ptr, stype: u32 }`; the tag
/// selects the decoder. An unknown tag means the native layout tables and the
/// bridge were built from different header revisions.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SType {
    ShaderSourceWgsl = 0x0000_0001,
    ShaderSourceSpirv = 0x0000_0002,
}

impl SType {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            0x0000_0001 => Some(Self::ShaderSourceWgsl),
            0x0000_0002 => Some(Self::ShaderSourceSpirv),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn future_id_round_trips_through_halves() {
        let id = FutureId::from_parts(0xDEAD_BEEF, 0x1234_5678);
        assert_eq!(id.0, 0x1234_5678_DEAD_BEEF);
        assert_eq!(id.lo(), 0xDEAD_BEEF);
        assert_eq!(id.hi(), 0x1234_5678);
        assert!(!id.is_null());
        assert!(FutureId::from_parts(0, 0).is_null());
    }

    #[test]
    fn sentinels_are_all_ones() {
        assert_eq!(LIMIT_U32_UNDEFINED, u32::MAX);
        assert_eq!(WHOLE_SIZE, u64::MAX);
        assert_eq!(LIMIT_U64_UNDEFINED, WHOLE_SIZE);
    }
}
