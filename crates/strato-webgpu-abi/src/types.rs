//! Value enums used inside descriptors.
//!
//! `0` is reserved for "undefined"/"not used" in every enum that has an
//! optional encoding; the per-field meaning of an absent value is decided by
//! the bridge.

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerPreference {
    Undefined = 0,
    LowPower = 1,
    HighPerformance = 2,
}

impl PowerPreference {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::Undefined),
            1 => Some(Self::LowPower),
            2 => Some(Self::HighPerformance),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureName {
    DepthClipControl = 1,
    Depth32FloatStencil8 = 2,
    TimestampQuery = 3,
    TextureCompressionBc = 4,
    Float32Filterable = 5,
    IndirectFirstInstance = 6,
    ShaderF16 = 7,
}

impl FeatureName {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::DepthClipControl),
            2 => Some(Self::Depth32FloatStencil8),
            3 => Some(Self::TimestampQuery),
            4 => Some(Self::TextureCompressionBc),
            5 => Some(Self::Float32Filterable),
            6 => Some(Self::IndirectFirstInstance),
            7 => Some(Self::ShaderF16),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureDimension {
    D1 = 1,
    D2 = 2,
    D3 = 3,
}

impl TextureDimension {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::D1),
            2 => Some(Self::D2),
            3 => Some(Self::D3),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureViewDimension {
    D1 = 1,
    D2 = 2,
    D2Array = 3,
    Cube = 4,
    CubeArray = 5,
    D3 = 6,
}

impl TextureViewDimension {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::D1),
            2 => Some(Self::D2),
            3 => Some(Self::D2Array),
            4 => Some(Self::Cube),
            5 => Some(Self::CubeArray),
            6 => Some(Self::D3),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureAspect {
    All = 1,
    StencilOnly = 2,
    DepthOnly = 3,
}

impl TextureAspect {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::All),
            2 => Some(Self::StencilOnly),
            3 => Some(Self::DepthOnly),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    R8Unorm = 1,
    R8Snorm = 2,
    R8Uint = 3,
    R8Sint = 4,
    R16Uint = 5,
    R16Sint = 6,
    R16Float = 7,
    Rg8Unorm = 8,
    R32Float = 9,
    R32Uint = 10,
    R32Sint = 11,
    Rg16Float = 12,
    Rgba8Unorm = 13,
    Rgba8UnormSrgb = 14,
    Rgba8Snorm = 15,
    Rgba8Uint = 16,
    Rgba8Sint = 17,
    Bgra8Unorm = 18,
    Bgra8UnormSrgb = 19,
    Rgb10a2Unorm = 20,
    Rg32Float = 21,
    Rgba16Float = 22,
    Rgba32Float = 23,
    Depth16Unorm = 24,
    Depth24Plus = 25,
    Depth24PlusStencil8 = 26,
    Depth32Float = 27,
    Bc1RgbaUnorm = 28,
    Bc1RgbaUnormSrgb = 29,
    Bc2RgbaUnorm = 30,
    Bc2RgbaUnormSrgb = 31,
    Bc3RgbaUnorm = 32,
    Bc3RgbaUnormSrgb = 33,
    Bc7RgbaUnorm = 34,
    Bc7RgbaUnormSrgb = 35,
}

impl TextureFormat {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::R8Unorm),
            2 => Some(Self::R8Snorm),
            3 => Some(Self::R8Uint),
            4 => Some(Self::R8Sint),
            5 => Some(Self::R16Uint),
            6 => Some(Self::R16Sint),
            7 => Some(Self::R16Float),
            8 => Some(Self::Rg8Unorm),
            9 => Some(Self::R32Float),
            10 => Some(Self::R32Uint),
            11 => Some(Self::R32Sint),
            12 => Some(Self::Rg16Float),
            13 => Some(Self::Rgba8Unorm),
            14 => Some(Self::Rgba8UnormSrgb),
            15 => Some(Self::Rgba8Snorm),
            16 => Some(Self::Rgba8Uint),
            17 => Some(Self::Rgba8Sint),
            18 => Some(Self::Bgra8Unorm),
            19 => Some(Self::Bgra8UnormSrgb),
            20 => Some(Self::Rgb10a2Unorm),
            21 => Some(Self::Rg32Float),
            22 => Some(Self::Rgba16Float),
            23 => Some(Self::Rgba32Float),
            24 => Some(Self::Depth16Unorm),
            25 => Some(Self::Depth24Plus),
            26 => Some(Self::Depth24PlusStencil8),
            27 => Some(Self::Depth32Float),
            28 => Some(Self::Bc1RgbaUnorm),
            29 => Some(Self::Bc1RgbaUnormSrgb),
            30 => Some(Self::Bc2RgbaUnorm),
            31 => Some(Self::Bc2RgbaUnormSrgb),
            32 => Some(Self::Bc3RgbaUnorm),
            33 => Some(Self::Bc3RgbaUnormSrgb),
            34 => Some(Self::Bc7RgbaUnorm),
            35 => Some(Self::Bc7RgbaUnormSrgb),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressMode {
    Repeat = 1,
    MirrorRepeat = 2,
    ClampToEdge = 3,
}

impl AddressMode {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Repeat),
            2 => Some(Self::MirrorRepeat),
            3 => Some(Self::ClampToEdge),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    Nearest = 1,
    Linear = 2,
}

impl FilterMode {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Nearest),
            2 => Some(Self::Linear),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareFunction {
    Never = 1,
    Less = 2,
    Equal = 3,
    LessEqual = 4,
    Greater = 5,
    NotEqual = 6,
    GreaterEqual = 7,
    Always = 8,
}

impl CompareFunction {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Never),
            2 => Some(Self::Less),
            3 => Some(Self::Equal),
            4 => Some(Self::LessEqual),
            5 => Some(Self::Greater),
            6 => Some(Self::NotEqual),
            7 => Some(Self::GreaterEqual),
            8 => Some(Self::Always),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimitiveTopology {
    PointList = 1,
    LineList = 2,
    LineStrip = 3,
    TriangleList = 4,
    TriangleStrip = 5,
}

impl PrimitiveTopology {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::PointList),
            2 => Some(Self::LineList),
            3 => Some(Self::LineStrip),
            4 => Some(Self::TriangleList),
            5 => Some(Self::TriangleStrip),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexFormat {
    Uint16 = 1,
    Uint32 = 2,
}

impl IndexFormat {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Uint16),
            2 => Some(Self::Uint32),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrontFace {
    Ccw = 1,
    Cw = 2,
}

impl FrontFace {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Ccw),
            2 => Some(Self::Cw),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CullMode {
    None = 1,
    Front = 2,
    Back = 3,
}

impl CullMode {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::None),
            2 => Some(Self::Front),
            3 => Some(Self::Back),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendFactor {
    Zero = 1,
    One = 2,
    Src = 3,
    OneMinusSrc = 4,
    SrcAlpha = 5,
    OneMinusSrcAlpha = 6,
    Dst = 7,
    OneMinusDst = 8,
    DstAlpha = 9,
    OneMinusDstAlpha = 10,
    SrcAlphaSaturated = 11,
    Constant = 12,
    OneMinusConstant = 13,
}

impl BlendFactor {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Zero),
            2 => Some(Self::One),
            3 => Some(Self::Src),
            4 => Some(Self::OneMinusSrc),
            5 => Some(Self::SrcAlpha),
            6 => Some(Self::OneMinusSrcAlpha),
            7 => Some(Self::Dst),
            8 => Some(Self::OneMinusDst),
            9 => Some(Self::DstAlpha),
            10 => Some(Self::OneMinusDstAlpha),
            11 => Some(Self::SrcAlphaSaturated),
            12 => Some(Self::Constant),
            13 => Some(Self::OneMinusConstant),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendOperation {
    Add = 1,
    Subtract = 2,
    ReverseSubtract = 3,
    Min = 4,
    Max = 5,
}

impl BlendOperation {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Add),
            2 => Some(Self::Subtract),
            3 => Some(Self::ReverseSubtract),
            4 => Some(Self::Min),
            5 => Some(Self::Max),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StencilOperation {
    Keep = 1,
    Zero = 2,
    Replace = 3,
    Invert = 4,
    IncrementClamp = 5,
    DecrementClamp = 6,
    IncrementWrap = 7,
    DecrementWrap = 8,
}

impl StencilOperation {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Keep),
            2 => Some(Self::Zero),
            3 => Some(Self::Replace),
            4 => Some(Self::Invert),
            5 => Some(Self::IncrementClamp),
            6 => Some(Self::DecrementClamp),
            7 => Some(Self::IncrementWrap),
            8 => Some(Self::DecrementWrap),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexFormat {
    Uint8x2 = 1,
    Uint8x4 = 2,
    Sint8x2 = 3,
    Sint8x4 = 4,
    Unorm8x2 = 5,
    Unorm8x4 = 6,
    Snorm8x2 = 7,
    Snorm8x4 = 8,
    Uint16x2 = 9,
    Uint16x4 = 10,
    Sint16x2 = 11,
    Sint16x4 = 12,
    Unorm16x2 = 13,
    Unorm16x4 = 14,
    Snorm16x2 = 15,
    Snorm16x4 = 16,
    Float16x2 = 17,
    Float16x4 = 18,
    Float32 = 19,
    Float32x2 = 20,
    Float32x3 = 21,
    Float32x4 = 22,
    Uint32 = 23,
    Uint32x2 = 24,
    Uint32x3 = 25,
    Uint32x4 = 26,
    Sint32 = 27,
    Sint32x2 = 28,
    Sint32x3 = 29,
    Sint32x4 = 30,
}

impl VertexFormat {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Uint8x2),
            2 => Some(Self::Uint8x4),
            3 => Some(Self::Sint8x2),
            4 => Some(Self::Sint8x4),
            5 => Some(Self::Unorm8x2),
            6 => Some(Self::Unorm8x4),
            7 => Some(Self::Snorm8x2),
            8 => Some(Self::Snorm8x4),
            9 => Some(Self::Uint16x2),
            10 => Some(Self::Uint16x4),
            11 => Some(Self::Sint16x2),
            12 => Some(Self::Sint16x4),
            13 => Some(Self::Unorm16x2),
            14 => Some(Self::Unorm16x4),
            15 => Some(Self::Snorm16x2),
            16 => Some(Self::Snorm16x4),
            17 => Some(Self::Float16x2),
            18 => Some(Self::Float16x4),
            19 => Some(Self::Float32),
            20 => Some(Self::Float32x2),
            21 => Some(Self::Float32x3),
            22 => Some(Self::Float32x4),
            23 => Some(Self::Uint32),
            24 => Some(Self::Uint32x2),
            25 => Some(Self::Uint32x3),
            26 => Some(Self::Uint32x4),
            27 => Some(Self::Sint32),
            28 => Some(Self::Sint32x2),
            29 => Some(Self::Sint32x3),
            30 => Some(Self::Sint32x4),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexStepMode {
    Vertex = 1,
    Instance = 2,
}

impl VertexStepMode {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Vertex),
            2 => Some(Self::Instance),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferBindingKind {
    Uniform = 1,
    Storage = 2,
    ReadOnlyStorage = 3,
}

impl BufferBindingKind {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Uniform),
            2 => Some(Self::Storage),
            3 => Some(Self::ReadOnlyStorage),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplerBindingKind {
    Filtering = 1,
    NonFiltering = 2,
    Comparison = 3,
}

impl SamplerBindingKind {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Filtering),
            2 => Some(Self::NonFiltering),
            3 => Some(Self::Comparison),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureSampleType {
    Float = 1,
    UnfilterableFloat = 2,
    Depth = 3,
    Sint = 4,
    Uint = 5,
}

impl TextureSampleType {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::Float),
            2 => Some(Self::UnfilterableFloat),
            3 => Some(Self::Depth),
            4 => Some(Self::Sint),
            5 => Some(Self::Uint),
            _ => None,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageTextureAccess {
    WriteOnly = 1,
    ReadOnly = 2,
    ReadWrite = 3,
}

impl StorageTextureAccess {
    pub const fn from_u32(v: u32) -> Option<Self> {
        match v {
            1 => Some(Self::WriteOnly),
            2 => Some(Self::ReadOnly),
            3 => Some(Self::ReadWrite),
            _ => None,
        }
    }
}
