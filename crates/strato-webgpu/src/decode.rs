//! Descriptor decoder: native memory structs to host call arguments.
//!
//! All reads go through the injected layout table; nested handles are
//! resolved by the caller against the registry, nested pointers are decoded
//! recursively, and variable-length arrays are copied element by element.
//! Malformed descriptors (out-of-bounds pointers, unknown enum encodings,
//! unknown extension tags) are contract violations and panic.

use std::num::NonZeroU64;

use strato_webgpu_abi::{
    self as abi, StrField, StructLayouts, ARRAY_LAYER_COUNT_UNDEFINED, LIMIT_U32_UNDEFINED,
    LIMIT_U64_UNDEFINED, MIP_LEVEL_COUNT_UNDEFINED, RawHandle, WHOLE_SIZE,
};

use crate::memory::{must, GuestMemory, GuestMemoryExt};

fn decode_enum<T>(raw: u32, what: &str, from: fn(u32) -> Option<T>) -> T {
    from(raw).unwrap_or_else(|| {
        panic!("unknown {what} encoding {raw} (native layout/bridge version mismatch)")
    })
}

/// `u64::MAX` in a size field means "rest of the resource".
fn opt_size(raw: u64) -> Option<u64> {
    (raw != WHOLE_SIZE).then_some(raw)
}

pub(crate) struct DecodedAdapterOptions {
    pub power_preference: wgpu::PowerPreference,
    pub force_fallback_adapter: bool,
}

pub(crate) struct DecodedDevice {
    pub label: Option<String>,
    pub features: wgpu::Features,
    pub limits: wgpu::Limits,
}

pub(crate) struct DecodedBuffer {
    pub label: Option<String>,
    pub usage: abi::BufferUsage,
    pub size: u64,
    pub mapped_at_creation: bool,
}

pub(crate) struct DecodedTexture {
    pub label: Option<String>,
    pub usage: wgpu::TextureUsages,
    pub dimension: wgpu::TextureDimension,
    pub size: wgpu::Extent3d,
    pub format: wgpu::TextureFormat,
    pub mip_level_count: u32,
    pub sample_count: u32,
    pub view_formats: Vec<wgpu::TextureFormat>,
}

pub(crate) struct DecodedTextureView {
    pub label: Option<String>,
    pub format: Option<wgpu::TextureFormat>,
    pub dimension: Option<wgpu::TextureViewDimension>,
    pub aspect: wgpu::TextureAspect,
    pub base_mip_level: u32,
    pub mip_level_count: Option<u32>,
    pub base_array_layer: u32,
    pub array_layer_count: Option<u32>,
}

pub(crate) struct DecodedSampler {
    pub label: Option<String>,
    pub address_modes: [wgpu::AddressMode; 3],
    pub mag_filter: wgpu::FilterMode,
    pub min_filter: wgpu::FilterMode,
    pub mipmap_filter: wgpu::FilterMode,
    pub lod_min_clamp: f32,
    pub lod_max_clamp: f32,
    pub compare: Option<wgpu::CompareFunction>,
    pub max_anisotropy: u16,
}

pub(crate) struct DecodedShaderModule {
    pub label: Option<String>,
    pub wgsl: String,
}

pub(crate) struct DecodedBindGroupLayout {
    pub label: Option<String>,
    pub entries: Vec<wgpu::BindGroupLayoutEntry>,
}

pub(crate) struct DecodedPipelineLayout {
    pub label: Option<String>,
    pub bind_group_layouts: Vec<RawHandle>,
}

pub(crate) enum DecodedBindingResource {
    Buffer {
        handle: RawHandle,
        offset: u64,
        size: Option<u64>,
    },
    Sampler(RawHandle),
    TextureView(RawHandle),
}

pub(crate) struct DecodedBindGroupEntry {
    pub binding: u32,
    pub resource: DecodedBindingResource,
}

pub(crate) struct DecodedBindGroup {
    pub label: Option<String>,
    pub layout: RawHandle,
    pub entries: Vec<DecodedBindGroupEntry>,
}

pub(crate) struct DecodedStage {
    pub module: RawHandle,
    pub entry_point: String,
    pub constants: Vec<(String, f64)>,
}

pub(crate) struct DecodedComputePipeline {
    pub label: Option<String>,
    pub layout: Option<RawHandle>,
    pub stage: DecodedStage,
}

pub(crate) struct DecodedVertexBuffer {
    pub array_stride: u64,
    pub step_mode: wgpu::VertexStepMode,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

pub(crate) struct DecodedFragment {
    pub stage: DecodedStage,
    pub targets: Vec<Option<wgpu::ColorTargetState>>,
}

pub(crate) struct DecodedRenderPipeline {
    pub label: Option<String>,
    pub layout: Option<RawHandle>,
    pub vertex: DecodedStage,
    pub vertex_buffers: Vec<DecodedVertexBuffer>,
    pub primitive: wgpu::PrimitiveState,
    pub depth_stencil: Option<wgpu::DepthStencilState>,
    pub multisample: wgpu::MultisampleState,
    pub fragment: Option<DecodedFragment>,
}

pub(crate) struct Decoder<'a> {
    mem: &'a dyn GuestMemory,
    layouts: &'static StructLayouts,
}

impl<'a> Decoder<'a> {
    pub(crate) fn new(mem: &'a dyn GuestMemory, layouts: &'static StructLayouts) -> Self {
        Self { mem, layouts }
    }

    fn u32(&self, addr: u64) -> u32 {
        must(self.mem.read_u32(addr))
    }

    fn u64(&self, addr: u64) -> u64 {
        must(self.mem.read_u64(addr))
    }

    fn ptr(&self, addr: u64) -> u64 {
        u64::from(self.u32(addr))
    }

    fn bool(&self, addr: u64) -> bool {
        self.u32(addr) != 0
    }

    fn f32(&self, addr: u64) -> f32 {
        must(self.mem.read_f32(addr))
    }

    fn next_in_chain(&self, struct_ptr: u64) -> u64 {
        self.ptr(struct_ptr + u64::from(self.layouts.chain.next))
    }

    fn check_no_extensions(&self, struct_ptr: u64, what: &str) {
        assert_eq!(
            self.next_in_chain(struct_ptr),
            0,
            "unexpected extension chain on {what}"
        );
    }

    /// `(ptr, len)` string; `(0, 0)` decodes to the empty string.
    fn str_required(&self, base: u64, field: StrField) -> String {
        self.str_optional(base, field).unwrap_or_default()
    }

    /// `(ptr, len)` string; `(0, 0)` decodes to "absent".
    fn str_optional(&self, base: u64, field: StrField) -> Option<String> {
        let ptr = self.ptr(base + u64::from(field.ptr));
        let len = self.u32(base + u64::from(field.len)) as usize;
        if ptr == 0 {
            assert_eq!(len, 0, "null string pointer with non-zero length {len}");
            return None;
        }
        Some(must(self.mem.read_string(ptr, len)))
    }

    pub(crate) fn request_adapter_options(&self, ptr: u64) -> DecodedAdapterOptions {
        if ptr == 0 {
            return DecodedAdapterOptions {
                power_preference: wgpu::PowerPreference::None,
                force_fallback_adapter: false,
            };
        }
        self.check_no_extensions(ptr, "request adapter options");
        let l = &self.layouts.request_adapter_options;
        let raw = self.u32(ptr + u64::from(l.power_preference));
        let power_preference = match decode_enum(
            raw,
            "power preference",
            abi::PowerPreference::from_u32,
        ) {
            abi::PowerPreference::Undefined => wgpu::PowerPreference::None,
            abi::PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
            abi::PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
        };
        assert_eq!(
            self.u32(ptr + u64::from(l.compatible_surface)),
            0,
            "surface-compatible adapter requests are not supported"
        );
        DecodedAdapterOptions {
            power_preference,
            force_fallback_adapter: self.bool(ptr + u64::from(l.force_fallback_adapter)),
        }
    }

    pub(crate) fn device_descriptor(&self, ptr: u64) -> DecodedDevice {
        if ptr == 0 {
            return DecodedDevice {
                label: None,
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
            };
        }
        self.check_no_extensions(ptr, "device descriptor");
        let l = &self.layouts.device_descriptor;

        let mut features = wgpu::Features::empty();
        let count = self.u32(ptr + u64::from(l.required_feature_count));
        let array = self.ptr(ptr + u64::from(l.required_features));
        for i in 0..u64::from(count) {
            let raw = self.u32(array + i * 4);
            features |= map_feature(decode_enum(raw, "feature name", abi::FeatureName::from_u32));
        }

        let limits_ptr = self.ptr(ptr + u64::from(l.required_limits));
        let limits = if limits_ptr == 0 {
            wgpu::Limits::default()
        } else {
            self.limits(limits_ptr)
        };

        DecodedDevice {
            label: self.str_optional(ptr, l.label),
            features,
            limits,
        }
    }

    /// Required limits: the all-ones sentinel keeps the host default.
    fn limits(&self, ptr: u64) -> wgpu::Limits {
        let l = &self.layouts.limits;
        let mut limits = wgpu::Limits::default();

        let u32_limit = |offset: u32, slot: &mut u32| {
            let raw = self.u32(ptr + u64::from(offset));
            if raw != LIMIT_U32_UNDEFINED {
                *slot = raw;
            }
        };
        let u64_limit = |offset: u32, slot: &mut u64| {
            let raw = self.u64(ptr + u64::from(offset));
            if raw != LIMIT_U64_UNDEFINED {
                *slot = raw;
            }
        };
        // Limits that are 64-bit on the wire but 32-bit on this host.
        let u64_limit_u32 = |offset: u32, slot: &mut u32| {
            let raw = self.u64(ptr + u64::from(offset));
            if raw != LIMIT_U64_UNDEFINED {
                *slot = u32::try_from(raw).unwrap_or(u32::MAX);
            }
        };

        u32_limit(l.max_texture_dimension_1d, &mut limits.max_texture_dimension_1d);
        u32_limit(l.max_texture_dimension_2d, &mut limits.max_texture_dimension_2d);
        u32_limit(l.max_texture_dimension_3d, &mut limits.max_texture_dimension_3d);
        u32_limit(l.max_texture_array_layers, &mut limits.max_texture_array_layers);
        u32_limit(l.max_bind_groups, &mut limits.max_bind_groups);
        u32_limit(
            l.max_bindings_per_bind_group,
            &mut limits.max_bindings_per_bind_group,
        );
        u32_limit(
            l.max_dynamic_uniform_buffers_per_pipeline_layout,
            &mut limits.max_dynamic_uniform_buffers_per_pipeline_layout,
        );
        u32_limit(
            l.max_dynamic_storage_buffers_per_pipeline_layout,
            &mut limits.max_dynamic_storage_buffers_per_pipeline_layout,
        );
        u32_limit(
            l.max_sampled_textures_per_shader_stage,
            &mut limits.max_sampled_textures_per_shader_stage,
        );
        u32_limit(
            l.max_samplers_per_shader_stage,
            &mut limits.max_samplers_per_shader_stage,
        );
        u32_limit(
            l.max_storage_buffers_per_shader_stage,
            &mut limits.max_storage_buffers_per_shader_stage,
        );
        u32_limit(
            l.max_storage_textures_per_shader_stage,
            &mut limits.max_storage_textures_per_shader_stage,
        );
        u32_limit(
            l.max_uniform_buffers_per_shader_stage,
            &mut limits.max_uniform_buffers_per_shader_stage,
        );
        u32_limit(
            l.min_uniform_buffer_offset_alignment,
            &mut limits.min_uniform_buffer_offset_alignment,
        );
        u32_limit(
            l.min_storage_buffer_offset_alignment,
            &mut limits.min_storage_buffer_offset_alignment,
        );
        u32_limit(l.max_vertex_buffers, &mut limits.max_vertex_buffers);
        u32_limit(l.max_vertex_attributes, &mut limits.max_vertex_attributes);
        u32_limit(
            l.max_vertex_buffer_array_stride,
            &mut limits.max_vertex_buffer_array_stride,
        );
        u32_limit(l.max_color_attachments, &mut limits.max_color_attachments);
        u32_limit(
            l.max_compute_workgroup_storage_size,
            &mut limits.max_compute_workgroup_storage_size,
        );
        u32_limit(
            l.max_compute_invocations_per_workgroup,
            &mut limits.max_compute_invocations_per_workgroup,
        );
        u32_limit(
            l.max_compute_workgroup_size_x,
            &mut limits.max_compute_workgroup_size_x,
        );
        u32_limit(
            l.max_compute_workgroup_size_y,
            &mut limits.max_compute_workgroup_size_y,
        );
        u32_limit(
            l.max_compute_workgroup_size_z,
            &mut limits.max_compute_workgroup_size_z,
        );
        u32_limit(
            l.max_compute_workgroups_per_dimension,
            &mut limits.max_compute_workgroups_per_dimension,
        );
        u64_limit_u32(
            l.max_uniform_buffer_binding_size,
            &mut limits.max_uniform_buffer_binding_size,
        );
        u64_limit_u32(
            l.max_storage_buffer_binding_size,
            &mut limits.max_storage_buffer_binding_size,
        );
        u64_limit(l.max_buffer_size, &mut limits.max_buffer_size);

        limits
    }

    pub(crate) fn buffer_descriptor(&self, ptr: u64) -> DecodedBuffer {
        assert_ne!(ptr, 0, "buffer descriptor pointer is null");
        self.check_no_extensions(ptr, "buffer descriptor");
        let l = &self.layouts.buffer_descriptor;
        let usage_raw = self.u32(ptr + u64::from(l.usage));
        DecodedBuffer {
            label: self.str_optional(ptr, l.label),
            usage: abi::BufferUsage::from_bits(usage_raw).unwrap_or_else(|| {
                panic!("unknown buffer usage bits 0x{usage_raw:08x}")
            }),
            size: self.u64(ptr + u64::from(l.size)),
            mapped_at_creation: self.bool(ptr + u64::from(l.mapped_at_creation)),
        }
    }

    pub(crate) fn texture_descriptor(&self, ptr: u64) -> DecodedTexture {
        assert_ne!(ptr, 0, "texture descriptor pointer is null");
        self.check_no_extensions(ptr, "texture descriptor");
        let l = &self.layouts.texture_descriptor;

        let usage_raw = self.u32(ptr + u64::from(l.usage));
        let dimension_raw = self.u32(ptr + u64::from(l.dimension));
        let dimension = if dimension_raw == 0 {
            wgpu::TextureDimension::D2
        } else {
            map_texture_dimension(decode_enum(
                dimension_raw,
                "texture dimension",
                abi::TextureDimension::from_u32,
            ))
        };

        let view_format_count = self.u32(ptr + u64::from(l.view_format_count));
        let view_formats_ptr = self.ptr(ptr + u64::from(l.view_formats));
        let mut view_formats = Vec::with_capacity(view_format_count as usize);
        for i in 0..u64::from(view_format_count) {
            let raw = self.u32(view_formats_ptr + i * 4);
            view_formats.push(map_texture_format(decode_enum(
                raw,
                "texture format",
                abi::TextureFormat::from_u32,
            )));
        }

        let mip_level_count = self.u32(ptr + u64::from(l.mip_level_count));
        let sample_count = self.u32(ptr + u64::from(l.sample_count));

        DecodedTexture {
            label: self.str_optional(ptr, l.label),
            usage: map_texture_usage(
                abi::TextureUsage::from_bits(usage_raw).unwrap_or_else(|| {
                    panic!("unknown texture usage bits 0x{usage_raw:08x}")
                }),
            ),
            dimension,
            size: wgpu::Extent3d {
                width: self.u32(ptr + u64::from(l.width)),
                height: self.u32(ptr + u64::from(l.height)),
                depth_or_array_layers: self.u32(ptr + u64::from(l.depth_or_array_layers)),
            },
            format: map_texture_format(decode_enum(
                self.u32(ptr + u64::from(l.format)),
                "texture format",
                abi::TextureFormat::from_u32,
            )),
            mip_level_count: mip_level_count.max(1),
            sample_count: sample_count.max(1),
            view_formats,
        }
    }

    pub(crate) fn texture_view_descriptor(&self, ptr: u64) -> DecodedTextureView {
        if ptr == 0 {
            return DecodedTextureView {
                label: None,
                format: None,
                dimension: None,
                aspect: wgpu::TextureAspect::All,
                base_mip_level: 0,
                mip_level_count: None,
                base_array_layer: 0,
                array_layer_count: None,
            };
        }
        self.check_no_extensions(ptr, "texture view descriptor");
        let l = &self.layouts.texture_view_descriptor;

        let format_raw = self.u32(ptr + u64::from(l.format));
        let dimension_raw = self.u32(ptr + u64::from(l.dimension));
        let aspect_raw = self.u32(ptr + u64::from(l.aspect));
        let mip_level_count = self.u32(ptr + u64::from(l.mip_level_count));
        let array_layer_count = self.u32(ptr + u64::from(l.array_layer_count));

        DecodedTextureView {
            label: self.str_optional(ptr, l.label),
            format: (format_raw != 0).then(|| {
                map_texture_format(decode_enum(
                    format_raw,
                    "texture format",
                    abi::TextureFormat::from_u32,
                ))
            }),
            dimension: (dimension_raw != 0).then(|| {
                map_view_dimension(decode_enum(
                    dimension_raw,
                    "texture view dimension",
                    abi::TextureViewDimension::from_u32,
                ))
            }),
            aspect: if aspect_raw == 0 {
                wgpu::TextureAspect::All
            } else {
                map_aspect(decode_enum(
                    aspect_raw,
                    "texture aspect",
                    abi::TextureAspect::from_u32,
                ))
            },
            base_mip_level: self.u32(ptr + u64::from(l.base_mip_level)),
            mip_level_count: (mip_level_count != MIP_LEVEL_COUNT_UNDEFINED)
                .then_some(mip_level_count),
            base_array_layer: self.u32(ptr + u64::from(l.base_array_layer)),
            array_layer_count: (array_layer_count != ARRAY_LAYER_COUNT_UNDEFINED)
                .then_some(array_layer_count),
        }
    }

    pub(crate) fn sampler_descriptor(&self, ptr: u64) -> DecodedSampler {
        if ptr == 0 {
            return DecodedSampler {
                label: None,
                address_modes: [wgpu::AddressMode::ClampToEdge; 3],
                mag_filter: wgpu::FilterMode::Nearest,
                min_filter: wgpu::FilterMode::Nearest,
                mipmap_filter: wgpu::FilterMode::Nearest,
                lod_min_clamp: 0.0,
                lod_max_clamp: 32.0,
                compare: None,
                max_anisotropy: 1,
            };
        }
        self.check_no_extensions(ptr, "sampler descriptor");
        let l = &self.layouts.sampler_descriptor;

        let address = |offset: u32| {
            let raw = self.u32(ptr + u64::from(offset));
            if raw == 0 {
                wgpu::AddressMode::ClampToEdge
            } else {
                map_address_mode(decode_enum(raw, "address mode", abi::AddressMode::from_u32))
            }
        };
        let filter = |offset: u32| {
            let raw = self.u32(ptr + u64::from(offset));
            if raw == 0 {
                wgpu::FilterMode::Nearest
            } else {
                map_filter_mode(decode_enum(raw, "filter mode", abi::FilterMode::from_u32))
            }
        };

        let compare_raw = self.u32(ptr + u64::from(l.compare));
        let max_anisotropy = self.u32(ptr + u64::from(l.max_anisotropy));

        DecodedSampler {
            label: self.str_optional(ptr, l.label),
            address_modes: [
                address(l.address_mode_u),
                address(l.address_mode_v),
                address(l.address_mode_w),
            ],
            mag_filter: filter(l.mag_filter),
            min_filter: filter(l.min_filter),
            mipmap_filter: filter(l.mipmap_filter),
            lod_min_clamp: self.f32(ptr + u64::from(l.lod_min_clamp)),
            lod_max_clamp: self.f32(ptr + u64::from(l.lod_max_clamp)),
            compare: (compare_raw != 0).then(|| {
                map_compare(decode_enum(
                    compare_raw,
                    "compare function",
                    abi::CompareFunction::from_u32,
                ))
            }),
            max_anisotropy: u16::try_from(max_anisotropy.max(1)).unwrap_or(u16::MAX),
        }
    }

    /// Shader source arrives as an extension struct selected by its leading
    /// type tag.
    pub(crate) fn shader_module_descriptor(&self, ptr: u64) -> DecodedShaderModule {
        assert_ne!(ptr, 0, "shader module descriptor pointer is null");
        let l = &self.layouts.shader_module_descriptor;
        let ext = self.next_in_chain(ptr);
        assert_ne!(ext, 0, "shader module descriptor has no source extension");

        let stype_raw = self.u32(ext + u64::from(self.layouts.chain.stype));
        let wgsl = match abi::SType::from_u32(stype_raw) {
            Some(abi::SType::ShaderSourceWgsl) => {
                self.str_required(ext, self.layouts.shader_source_wgsl.code)
            }
            Some(abi::SType::ShaderSourceSpirv) => {
                panic!("SPIR-V shader sources are not supported by this host")
            }
            None => panic!(
                "unknown extension tag 0x{stype_raw:08x} in shader module descriptor \
                 (native layout/bridge version mismatch)"
            ),
        };
        assert_eq!(
            self.next_in_chain(ext),
            0,
            "shader module descriptor has trailing extensions"
        );

        DecodedShaderModule {
            label: self.str_optional(ptr, l.label),
            wgsl,
        }
    }

    pub(crate) fn bind_group_layout_descriptor(&self, ptr: u64) -> DecodedBindGroupLayout {
        assert_ne!(ptr, 0, "bind group layout descriptor pointer is null");
        self.check_no_extensions(ptr, "bind group layout descriptor");
        let l = &self.layouts.bind_group_layout_descriptor;
        let e = &self.layouts.bind_group_layout_entry;

        let count = self.u32(ptr + u64::from(l.entry_count));
        let array = self.ptr(ptr + u64::from(l.entries));
        let mut entries = Vec::with_capacity(count as usize);
        for i in 0..u64::from(count) {
            let base = array + i * u64::from(e.size_bytes);
            entries.push(self.bind_group_layout_entry(base));
        }

        DecodedBindGroupLayout {
            label: self.str_optional(ptr, l.label),
            entries,
        }
    }

    fn bind_group_layout_entry(&self, base: u64) -> wgpu::BindGroupLayoutEntry {
        let e = &self.layouts.bind_group_layout_entry;
        let binding = self.u32(base + u64::from(e.binding));
        let visibility_raw = self.u32(base + u64::from(e.visibility));

        let buffer_kind = self.u32(base + u64::from(e.buffer_kind));
        let sampler_kind = self.u32(base + u64::from(e.sampler_kind));
        let sample_type = self.u32(base + u64::from(e.texture_sample_type));
        let storage_access = self.u32(base + u64::from(e.storage_texture_access));

        let selected = [buffer_kind, sampler_kind, sample_type, storage_access]
            .iter()
            .filter(|&&v| v != 0)
            .count();
        assert_eq!(
            selected, 1,
            "bind group layout entry {binding} must select exactly one binding category"
        );

        let view_dimension = |offset: u32| {
            let raw = self.u32(base + u64::from(offset));
            if raw == 0 {
                wgpu::TextureViewDimension::D2
            } else {
                map_view_dimension(decode_enum(
                    raw,
                    "texture view dimension",
                    abi::TextureViewDimension::from_u32,
                ))
            }
        };

        let ty = if buffer_kind != 0 {
            wgpu::BindingType::Buffer {
                ty: match decode_enum(
                    buffer_kind,
                    "buffer binding kind",
                    abi::BufferBindingKind::from_u32,
                ) {
                    abi::BufferBindingKind::Uniform => wgpu::BufferBindingType::Uniform,
                    abi::BufferBindingKind::Storage => {
                        wgpu::BufferBindingType::Storage { read_only: false }
                    }
                    abi::BufferBindingKind::ReadOnlyStorage => {
                        wgpu::BufferBindingType::Storage { read_only: true }
                    }
                },
                has_dynamic_offset: self.bool(base + u64::from(e.buffer_has_dynamic_offset)),
                min_binding_size: NonZeroU64::new(
                    self.u64(base + u64::from(e.buffer_min_binding_size)),
                ),
            }
        } else if sampler_kind != 0 {
            wgpu::BindingType::Sampler(match decode_enum(
                sampler_kind,
                "sampler binding kind",
                abi::SamplerBindingKind::from_u32,
            ) {
                abi::SamplerBindingKind::Filtering => wgpu::SamplerBindingType::Filtering,
                abi::SamplerBindingKind::NonFiltering => wgpu::SamplerBindingType::NonFiltering,
                abi::SamplerBindingKind::Comparison => wgpu::SamplerBindingType::Comparison,
            })
        } else if sample_type != 0 {
            wgpu::BindingType::Texture {
                sample_type: match decode_enum(
                    sample_type,
                    "texture sample type",
                    abi::TextureSampleType::from_u32,
                ) {
                    abi::TextureSampleType::Float => {
                        wgpu::TextureSampleType::Float { filterable: true }
                    }
                    abi::TextureSampleType::UnfilterableFloat => {
                        wgpu::TextureSampleType::Float { filterable: false }
                    }
                    abi::TextureSampleType::Depth => wgpu::TextureSampleType::Depth,
                    abi::TextureSampleType::Sint => wgpu::TextureSampleType::Sint,
                    abi::TextureSampleType::Uint => wgpu::TextureSampleType::Uint,
                },
                view_dimension: view_dimension(e.texture_view_dimension),
                multisampled: self.bool(base + u64::from(e.texture_multisampled)),
            }
        } else {
            wgpu::BindingType::StorageTexture {
                access: match decode_enum(
                    storage_access,
                    "storage texture access",
                    abi::StorageTextureAccess::from_u32,
                ) {
                    abi::StorageTextureAccess::WriteOnly => wgpu::StorageTextureAccess::WriteOnly,
                    abi::StorageTextureAccess::ReadOnly => wgpu::StorageTextureAccess::ReadOnly,
                    abi::StorageTextureAccess::ReadWrite => wgpu::StorageTextureAccess::ReadWrite,
                },
                format: map_texture_format(decode_enum(
                    self.u32(base + u64::from(e.storage_texture_format)),
                    "texture format",
                    abi::TextureFormat::from_u32,
                )),
                view_dimension: view_dimension(e.storage_texture_view_dimension),
            }
        };

        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: map_shader_stages(
                abi::ShaderStage::from_bits(visibility_raw).unwrap_or_else(|| {
                    panic!("unknown shader stage bits 0x{visibility_raw:08x}")
                }),
            ),
            ty,
            count: None,
        }
    }

    pub(crate) fn pipeline_layout_descriptor(&self, ptr: u64) -> DecodedPipelineLayout {
        assert_ne!(ptr, 0, "pipeline layout descriptor pointer is null");
        self.check_no_extensions(ptr, "pipeline layout descriptor");
        let l = &self.layouts.pipeline_layout_descriptor;

        let count = self.u32(ptr + u64::from(l.bind_group_layout_count));
        let array = self.ptr(ptr + u64::from(l.bind_group_layouts));
        let mut bind_group_layouts = Vec::with_capacity(count as usize);
        for i in 0..u64::from(count) {
            bind_group_layouts.push(self.u32(array + i * 4));
        }

        DecodedPipelineLayout {
            label: self.str_optional(ptr, l.label),
            bind_group_layouts,
        }
    }

    pub(crate) fn bind_group_descriptor(&self, ptr: u64) -> DecodedBindGroup {
        assert_ne!(ptr, 0, "bind group descriptor pointer is null");
        self.check_no_extensions(ptr, "bind group descriptor");
        let l = &self.layouts.bind_group_descriptor;
        let e = &self.layouts.bind_group_entry;

        let layout = self.u32(ptr + u64::from(l.layout));
        assert_ne!(layout, 0, "bind group descriptor requires a layout handle");

        let count = self.u32(ptr + u64::from(l.entry_count));
        let array = self.ptr(ptr + u64::from(l.entries));
        let mut entries = Vec::with_capacity(count as usize);
        for i in 0..u64::from(count) {
            let base = array + i * u64::from(e.size_bytes);
            let binding = self.u32(base + u64::from(e.binding));
            let buffer = self.u32(base + u64::from(e.buffer));
            let sampler = self.u32(base + u64::from(e.sampler));
            let texture_view = self.u32(base + u64::from(e.texture_view));

            let selected = [buffer, sampler, texture_view]
                .iter()
                .filter(|&&v| v != 0)
                .count();
            assert_eq!(
                selected, 1,
                "bind group entry {binding} must reference exactly one resource"
            );

            let resource = if buffer != 0 {
                DecodedBindingResource::Buffer {
                    handle: buffer,
                    offset: self.u64(base + u64::from(e.offset)),
                    size: opt_size(self.u64(base + u64::from(e.size))),
                }
            } else if sampler != 0 {
                DecodedBindingResource::Sampler(sampler)
            } else {
                DecodedBindingResource::TextureView(texture_view)
            };
            entries.push(DecodedBindGroupEntry { binding, resource });
        }

        DecodedBindGroup {
            label: self.str_optional(ptr, l.label),
            layout,
            entries,
        }
    }

    fn constants(&self, count: u32, array: u64) -> Vec<(String, f64)> {
        let l = &self.layouts.constant_entry;
        let mut constants = Vec::with_capacity(count as usize);
        for i in 0..u64::from(count) {
            let base = array + i * u64::from(l.size_bytes);
            let key = self.str_required(base, l.key);
            let value = must(self.mem.read_f64(base + u64::from(l.value)));
            constants.push((key, value));
        }
        constants
    }

    pub(crate) fn compute_pipeline_descriptor(&self, ptr: u64) -> DecodedComputePipeline {
        assert_ne!(ptr, 0, "compute pipeline descriptor pointer is null");
        self.check_no_extensions(ptr, "compute pipeline descriptor");
        let l = &self.layouts.compute_pipeline_descriptor;

        let layout = self.u32(ptr + u64::from(l.layout));
        let module = self.u32(ptr + u64::from(l.module));
        assert_ne!(module, 0, "compute pipeline requires a shader module handle");

        DecodedComputePipeline {
            label: self.str_optional(ptr, l.label),
            layout: (layout != 0).then_some(layout),
            stage: DecodedStage {
                module,
                entry_point: self.str_required(ptr, l.entry_point),
                constants: self.constants(
                    self.u32(ptr + u64::from(l.constant_count)),
                    self.ptr(ptr + u64::from(l.constants)),
                ),
            },
        }
    }

    pub(crate) fn render_pipeline_descriptor(&self, ptr: u64) -> DecodedRenderPipeline {
        assert_ne!(ptr, 0, "render pipeline descriptor pointer is null");
        self.check_no_extensions(ptr, "render pipeline descriptor");
        let l = &self.layouts.render_pipeline_descriptor;

        let module = self.u32(ptr + u64::from(l.vertex_module));
        assert_ne!(module, 0, "render pipeline requires a vertex shader module");
        let vertex = DecodedStage {
            module,
            entry_point: self.str_required(ptr, l.vertex_entry_point),
            constants: self.constants(
                self.u32(ptr + u64::from(l.vertex_constant_count)),
                self.ptr(ptr + u64::from(l.vertex_constants)),
            ),
        };

        let buffer_count = self.u32(ptr + u64::from(l.vertex_buffer_count));
        let buffer_array = self.ptr(ptr + u64::from(l.vertex_buffers));
        let vb = &self.layouts.vertex_buffer_layout;
        let mut vertex_buffers = Vec::with_capacity(buffer_count as usize);
        for i in 0..u64::from(buffer_count) {
            let base = buffer_array + i * u64::from(vb.size_bytes);
            vertex_buffers.push(self.vertex_buffer(base));
        }

        let layout = self.u32(ptr + u64::from(l.layout));
        let topology_raw = self.u32(ptr + u64::from(l.primitive_topology));
        let strip_raw = self.u32(ptr + u64::from(l.primitive_strip_index_format));
        let front_raw = self.u32(ptr + u64::from(l.primitive_front_face));
        let cull_raw = self.u32(ptr + u64::from(l.primitive_cull_mode));

        let primitive = wgpu::PrimitiveState {
            topology: if topology_raw == 0 {
                wgpu::PrimitiveTopology::TriangleList
            } else {
                map_topology(decode_enum(
                    topology_raw,
                    "primitive topology",
                    abi::PrimitiveTopology::from_u32,
                ))
            },
            strip_index_format: (strip_raw != 0).then(|| {
                map_index_format(decode_enum(
                    strip_raw,
                    "index format",
                    abi::IndexFormat::from_u32,
                ))
            }),
            front_face: if front_raw == 0 {
                wgpu::FrontFace::Ccw
            } else {
                map_front_face(decode_enum(
                    front_raw,
                    "front face",
                    abi::FrontFace::from_u32,
                ))
            },
            cull_mode: if cull_raw == 0 {
                None
            } else {
                map_cull_mode(decode_enum(cull_raw, "cull mode", abi::CullMode::from_u32))
            },
            unclipped_depth: self.bool(ptr + u64::from(l.primitive_unclipped_depth)),
            ..Default::default()
        };

        let depth_stencil_ptr = self.ptr(ptr + u64::from(l.depth_stencil));
        let depth_stencil =
            (depth_stencil_ptr != 0).then(|| self.depth_stencil_state(depth_stencil_ptr));

        let sample_count = self.u32(ptr + u64::from(l.multisample_count));
        let multisample = wgpu::MultisampleState {
            count: sample_count.max(1),
            mask: u64::from(self.u32(ptr + u64::from(l.multisample_mask))),
            alpha_to_coverage_enabled: self.bool(ptr + u64::from(l.multisample_alpha_to_coverage)),
        };

        let fragment_ptr = self.ptr(ptr + u64::from(l.fragment));
        let fragment = (fragment_ptr != 0).then(|| self.fragment_state(fragment_ptr));

        DecodedRenderPipeline {
            label: self.str_optional(ptr, l.label),
            layout: (layout != 0).then_some(layout),
            vertex,
            vertex_buffers,
            primitive,
            depth_stencil,
            multisample,
            fragment,
        }
    }

    fn vertex_buffer(&self, base: u64) -> DecodedVertexBuffer {
        let l = &self.layouts.vertex_buffer_layout;
        let a = &self.layouts.vertex_attribute;

        let step_raw = self.u32(base + u64::from(l.step_mode));
        let count = self.u32(base + u64::from(l.attribute_count));
        let array = self.ptr(base + u64::from(l.attributes));

        let mut attributes = Vec::with_capacity(count as usize);
        for i in 0..u64::from(count) {
            let entry = array + i * u64::from(a.size_bytes);
            attributes.push(wgpu::VertexAttribute {
                format: map_vertex_format(decode_enum(
                    self.u32(entry + u64::from(a.format)),
                    "vertex format",
                    abi::VertexFormat::from_u32,
                )),
                offset: self.u64(entry + u64::from(a.offset)),
                shader_location: self.u32(entry + u64::from(a.shader_location)),
            });
        }

        DecodedVertexBuffer {
            array_stride: self.u64(base + u64::from(l.array_stride)),
            step_mode: match decode_enum(
                step_raw,
                "vertex step mode",
                abi::VertexStepMode::from_u32,
            ) {
                abi::VertexStepMode::Vertex => wgpu::VertexStepMode::Vertex,
                abi::VertexStepMode::Instance => wgpu::VertexStepMode::Instance,
            },
            attributes,
        }
    }

    fn depth_stencil_state(&self, ptr: u64) -> wgpu::DepthStencilState {
        let l = &self.layouts.depth_stencil_state;

        let compare = |raw: u32| {
            if raw == 0 {
                wgpu::CompareFunction::Always
            } else {
                map_compare(decode_enum(
                    raw,
                    "compare function",
                    abi::CompareFunction::from_u32,
                ))
            }
        };
        let stencil_op = |raw: u32| {
            if raw == 0 {
                wgpu::StencilOperation::Keep
            } else {
                map_stencil_op(decode_enum(
                    raw,
                    "stencil operation",
                    abi::StencilOperation::from_u32,
                ))
            }
        };
        let face = |fl: &abi::StencilFaceLayout| wgpu::StencilFaceState {
            compare: compare(self.u32(ptr + u64::from(fl.compare))),
            fail_op: stencil_op(self.u32(ptr + u64::from(fl.fail_op))),
            depth_fail_op: stencil_op(self.u32(ptr + u64::from(fl.depth_fail_op))),
            pass_op: stencil_op(self.u32(ptr + u64::from(fl.pass_op))),
        };

        wgpu::DepthStencilState {
            format: map_texture_format(decode_enum(
                self.u32(ptr + u64::from(l.format)),
                "texture format",
                abi::TextureFormat::from_u32,
            )),
            depth_write_enabled: self.bool(ptr + u64::from(l.depth_write_enabled)),
            depth_compare: compare(self.u32(ptr + u64::from(l.depth_compare))),
            stencil: wgpu::StencilState {
                front: face(&l.stencil_front),
                back: face(&l.stencil_back),
                read_mask: self.u32(ptr + u64::from(l.stencil_read_mask)),
                write_mask: self.u32(ptr + u64::from(l.stencil_write_mask)),
            },
            bias: wgpu::DepthBiasState {
                constant: must(self.mem.read_i32(ptr + u64::from(l.depth_bias))),
                slope_scale: self.f32(ptr + u64::from(l.depth_bias_slope_scale)),
                clamp: self.f32(ptr + u64::from(l.depth_bias_clamp)),
            },
        }
    }

    fn fragment_state(&self, ptr: u64) -> DecodedFragment {
        let l = &self.layouts.fragment_state;
        let t = &self.layouts.color_target_state;

        let module = self.u32(ptr + u64::from(l.module));
        assert_ne!(module, 0, "fragment state requires a shader module handle");

        let count = self.u32(ptr + u64::from(l.target_count));
        let array = self.ptr(ptr + u64::from(l.targets));
        let mut targets = Vec::with_capacity(count as usize);
        for i in 0..u64::from(count) {
            let base = array + i * u64::from(t.size_bytes);
            let format_raw = self.u32(base + u64::from(t.format));
            if format_raw == 0 {
                targets.push(None);
                continue;
            }
            let blend_ptr = self.ptr(base + u64::from(t.blend));
            let write_mask_raw = self.u32(base + u64::from(t.write_mask));
            targets.push(Some(wgpu::ColorTargetState {
                format: map_texture_format(decode_enum(
                    format_raw,
                    "texture format",
                    abi::TextureFormat::from_u32,
                )),
                blend: (blend_ptr != 0).then(|| self.blend_state(blend_ptr)),
                write_mask: wgpu::ColorWrites::from_bits(write_mask_raw).unwrap_or_else(|| {
                    panic!("unknown color write mask bits 0x{write_mask_raw:08x}")
                }),
            }));
        }

        DecodedFragment {
            stage: DecodedStage {
                module,
                entry_point: self.str_required(ptr, l.entry_point),
                constants: self.constants(
                    self.u32(ptr + u64::from(l.constant_count)),
                    self.ptr(ptr + u64::from(l.constants)),
                ),
            },
            targets,
        }
    }

    fn blend_state(&self, ptr: u64) -> wgpu::BlendState {
        let l = &self.layouts.blend_state;
        let component = |cl: &abi::BlendComponentLayout| wgpu::BlendComponent {
            operation: map_blend_operation(decode_enum(
                self.u32(ptr + u64::from(cl.operation)),
                "blend operation",
                abi::BlendOperation::from_u32,
            )),
            src_factor: map_blend_factor(decode_enum(
                self.u32(ptr + u64::from(cl.src_factor)),
                "blend factor",
                abi::BlendFactor::from_u32,
            )),
            dst_factor: map_blend_factor(decode_enum(
                self.u32(ptr + u64::from(cl.dst_factor)),
                "blend factor",
                abi::BlendFactor::from_u32,
            )),
        };
        wgpu::BlendState {
            color: component(&l.color),
            alpha: component(&l.alpha),
        }
    }
}

/// Writes host limits back into a guest limits struct, including the 64-bit
/// wire encoding of the u64 limits.
pub(crate) fn write_limits(
    mem: &dyn GuestMemory,
    layouts: &'static StructLayouts,
    ptr: u64,
    limits: &wgpu::Limits,
) {
    let l = &layouts.limits;
    let w32 = |offset: u32, value: u32| must(mem.write_u32(ptr + u64::from(offset), value));
    let w64 = |offset: u32, value: u64| must(mem.write_u64(ptr + u64::from(offset), value));

    w32(l.max_texture_dimension_1d, limits.max_texture_dimension_1d);
    w32(l.max_texture_dimension_2d, limits.max_texture_dimension_2d);
    w32(l.max_texture_dimension_3d, limits.max_texture_dimension_3d);
    w32(l.max_texture_array_layers, limits.max_texture_array_layers);
    w32(l.max_bind_groups, limits.max_bind_groups);
    w32(
        l.max_bindings_per_bind_group,
        limits.max_bindings_per_bind_group,
    );
    w32(
        l.max_dynamic_uniform_buffers_per_pipeline_layout,
        limits.max_dynamic_uniform_buffers_per_pipeline_layout,
    );
    w32(
        l.max_dynamic_storage_buffers_per_pipeline_layout,
        limits.max_dynamic_storage_buffers_per_pipeline_layout,
    );
    w32(
        l.max_sampled_textures_per_shader_stage,
        limits.max_sampled_textures_per_shader_stage,
    );
    w32(
        l.max_samplers_per_shader_stage,
        limits.max_samplers_per_shader_stage,
    );
    w32(
        l.max_storage_buffers_per_shader_stage,
        limits.max_storage_buffers_per_shader_stage,
    );
    w32(
        l.max_storage_textures_per_shader_stage,
        limits.max_storage_textures_per_shader_stage,
    );
    w32(
        l.max_uniform_buffers_per_shader_stage,
        limits.max_uniform_buffers_per_shader_stage,
    );
    w32(
        l.min_uniform_buffer_offset_alignment,
        limits.min_uniform_buffer_offset_alignment,
    );
    w32(
        l.min_storage_buffer_offset_alignment,
        limits.min_storage_buffer_offset_alignment,
    );
    w32(l.max_vertex_buffers, limits.max_vertex_buffers);
    w32(l.max_vertex_attributes, limits.max_vertex_attributes);
    w32(
        l.max_vertex_buffer_array_stride,
        limits.max_vertex_buffer_array_stride,
    );
    w32(l.max_color_attachments, limits.max_color_attachments);
    w32(
        l.max_compute_workgroup_storage_size,
        limits.max_compute_workgroup_storage_size,
    );
    w32(
        l.max_compute_invocations_per_workgroup,
        limits.max_compute_invocations_per_workgroup,
    );
    w32(
        l.max_compute_workgroup_size_x,
        limits.max_compute_workgroup_size_x,
    );
    w32(
        l.max_compute_workgroup_size_y,
        limits.max_compute_workgroup_size_y,
    );
    w32(
        l.max_compute_workgroup_size_z,
        limits.max_compute_workgroup_size_z,
    );
    w32(
        l.max_compute_workgroups_per_dimension,
        limits.max_compute_workgroups_per_dimension,
    );
    w64(
        l.max_uniform_buffer_binding_size,
        u64::from(limits.max_uniform_buffer_binding_size),
    );
    w64(
        l.max_storage_buffer_binding_size,
        u64::from(limits.max_storage_buffer_binding_size),
    );
    w64(l.max_buffer_size, limits.max_buffer_size);
}

pub(crate) fn map_feature(feature: abi::FeatureName) -> wgpu::Features {
    match feature {
        abi::FeatureName::DepthClipControl => wgpu::Features::DEPTH_CLIP_CONTROL,
        abi::FeatureName::Depth32FloatStencil8 => wgpu::Features::DEPTH32FLOAT_STENCIL8,
        abi::FeatureName::TimestampQuery => wgpu::Features::TIMESTAMP_QUERY,
        abi::FeatureName::TextureCompressionBc => wgpu::Features::TEXTURE_COMPRESSION_BC,
        abi::FeatureName::Float32Filterable => wgpu::Features::FLOAT32_FILTERABLE,
        abi::FeatureName::IndirectFirstInstance => wgpu::Features::INDIRECT_FIRST_INSTANCE,
        abi::FeatureName::ShaderF16 => wgpu::Features::SHADER_F16,
    }
}

pub(crate) fn map_buffer_usage(usage: abi::BufferUsage) -> wgpu::BufferUsages {
    let pairs = [
        (abi::BufferUsage::MAP_READ, wgpu::BufferUsages::MAP_READ),
        (abi::BufferUsage::MAP_WRITE, wgpu::BufferUsages::MAP_WRITE),
        (abi::BufferUsage::COPY_SRC, wgpu::BufferUsages::COPY_SRC),
        (abi::BufferUsage::COPY_DST, wgpu::BufferUsages::COPY_DST),
        (abi::BufferUsage::INDEX, wgpu::BufferUsages::INDEX),
        (abi::BufferUsage::VERTEX, wgpu::BufferUsages::VERTEX),
        (abi::BufferUsage::UNIFORM, wgpu::BufferUsages::UNIFORM),
        (abi::BufferUsage::STORAGE, wgpu::BufferUsages::STORAGE),
        (abi::BufferUsage::INDIRECT, wgpu::BufferUsages::INDIRECT),
        (
            abi::BufferUsage::QUERY_RESOLVE,
            wgpu::BufferUsages::QUERY_RESOLVE,
        ),
    ];
    let mut out = wgpu::BufferUsages::empty();
    for (from, to) in pairs {
        if usage.contains(from) {
            out |= to;
        }
    }
    out
}

pub(crate) fn map_texture_usage(usage: abi::TextureUsage) -> wgpu::TextureUsages {
    let pairs = [
        (abi::TextureUsage::COPY_SRC, wgpu::TextureUsages::COPY_SRC),
        (abi::TextureUsage::COPY_DST, wgpu::TextureUsages::COPY_DST),
        (
            abi::TextureUsage::TEXTURE_BINDING,
            wgpu::TextureUsages::TEXTURE_BINDING,
        ),
        (
            abi::TextureUsage::STORAGE_BINDING,
            wgpu::TextureUsages::STORAGE_BINDING,
        ),
        (
            abi::TextureUsage::RENDER_ATTACHMENT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        ),
    ];
    let mut out = wgpu::TextureUsages::empty();
    for (from, to) in pairs {
        if usage.contains(from) {
            out |= to;
        }
    }
    out
}

pub(crate) fn map_shader_stages(stages: abi::ShaderStage) -> wgpu::ShaderStages {
    let pairs = [
        (abi::ShaderStage::VERTEX, wgpu::ShaderStages::VERTEX),
        (abi::ShaderStage::FRAGMENT, wgpu::ShaderStages::FRAGMENT),
        (abi::ShaderStage::COMPUTE, wgpu::ShaderStages::COMPUTE),
    ];
    let mut out = wgpu::ShaderStages::empty();
    for (from, to) in pairs {
        if stages.contains(from) {
            out |= to;
        }
    }
    out
}

pub(crate) fn map_texture_format(format: abi::TextureFormat) -> wgpu::TextureFormat {
    use abi::TextureFormat as F;
    match format {
        F::R8Unorm => wgpu::TextureFormat::R8Unorm,
        F::R8Snorm => wgpu::TextureFormat::R8Snorm,
        F::R8Uint => wgpu::TextureFormat::R8Uint,
        F::R8Sint => wgpu::TextureFormat::R8Sint,
        F::R16Uint => wgpu::TextureFormat::R16Uint,
        F::R16Sint => wgpu::TextureFormat::R16Sint,
        F::R16Float => wgpu::TextureFormat::R16Float,
        F::Rg8Unorm => wgpu::TextureFormat::Rg8Unorm,
        F::R32Float => wgpu::TextureFormat::R32Float,
        F::R32Uint => wgpu::TextureFormat::R32Uint,
        F::R32Sint => wgpu::TextureFormat::R32Sint,
        F::Rg16Float => wgpu::TextureFormat::Rg16Float,
        F::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
        F::Rgba8UnormSrgb => wgpu::TextureFormat::Rgba8UnormSrgb,
        F::Rgba8Snorm => wgpu::TextureFormat::Rgba8Snorm,
        F::Rgba8Uint => wgpu::TextureFormat::Rgba8Uint,
        F::Rgba8Sint => wgpu::TextureFormat::Rgba8Sint,
        F::Bgra8Unorm => wgpu::TextureFormat::Bgra8Unorm,
        F::Bgra8UnormSrgb => wgpu::TextureFormat::Bgra8UnormSrgb,
        F::Rgb10a2Unorm => wgpu::TextureFormat::Rgb10a2Unorm,
        F::Rg32Float => wgpu::TextureFormat::Rg32Float,
        F::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
        F::Rgba32Float => wgpu::TextureFormat::Rgba32Float,
        F::Depth16Unorm => wgpu::TextureFormat::Depth16Unorm,
        F::Depth24Plus => wgpu::TextureFormat::Depth24Plus,
        F::Depth24PlusStencil8 => wgpu::TextureFormat::Depth24PlusStencil8,
        F::Depth32Float => wgpu::TextureFormat::Depth32Float,
        F::Bc1RgbaUnorm => wgpu::TextureFormat::Bc1RgbaUnorm,
        F::Bc1RgbaUnormSrgb => wgpu::TextureFormat::Bc1RgbaUnormSrgb,
        F::Bc2RgbaUnorm => wgpu::TextureFormat::Bc2RgbaUnorm,
        F::Bc2RgbaUnormSrgb => wgpu::TextureFormat::Bc2RgbaUnormSrgb,
        F::Bc3RgbaUnorm => wgpu::TextureFormat::Bc3RgbaUnorm,
        F::Bc3RgbaUnormSrgb => wgpu::TextureFormat::Bc3RgbaUnormSrgb,
        F::Bc7RgbaUnorm => wgpu::TextureFormat::Bc7RgbaUnorm,
        F::Bc7RgbaUnormSrgb => wgpu::TextureFormat::Bc7RgbaUnormSrgb,
    }
}

pub(crate) fn map_texture_dimension(dim: abi::TextureDimension) -> wgpu::TextureDimension {
    match dim {
        abi::TextureDimension::D1 => wgpu::TextureDimension::D1,
        abi::TextureDimension::D2 => wgpu::TextureDimension::D2,
        abi::TextureDimension::D3 => wgpu::TextureDimension::D3,
    }
}

pub(crate) fn map_view_dimension(dim: abi::TextureViewDimension) -> wgpu::TextureViewDimension {
    match dim {
        abi::TextureViewDimension::D1 => wgpu::TextureViewDimension::D1,
        abi::TextureViewDimension::D2 => wgpu::TextureViewDimension::D2,
        abi::TextureViewDimension::D2Array => wgpu::TextureViewDimension::D2Array,
        abi::TextureViewDimension::Cube => wgpu::TextureViewDimension::Cube,
        abi::TextureViewDimension::CubeArray => wgpu::TextureViewDimension::CubeArray,
        abi::TextureViewDimension::D3 => wgpu::TextureViewDimension::D3,
    }
}

pub(crate) fn map_aspect(aspect: abi::TextureAspect) -> wgpu::TextureAspect {
    match aspect {
        abi::TextureAspect::All => wgpu::TextureAspect::All,
        abi::TextureAspect::StencilOnly => wgpu::TextureAspect::StencilOnly,
        abi::TextureAspect::DepthOnly => wgpu::TextureAspect::DepthOnly,
    }
}

pub(crate) fn map_address_mode(mode: abi::AddressMode) -> wgpu::AddressMode {
    match mode {
        abi::AddressMode::Repeat => wgpu::AddressMode::Repeat,
        abi::AddressMode::MirrorRepeat => wgpu::AddressMode::MirrorRepeat,
        abi::AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
    }
}

pub(crate) fn map_filter_mode(mode: abi::FilterMode) -> wgpu::FilterMode {
    match mode {
        abi::FilterMode::Nearest => wgpu::FilterMode::Nearest,
        abi::FilterMode::Linear => wgpu::FilterMode::Linear,
    }
}

pub(crate) fn map_compare(func: abi::CompareFunction) -> wgpu::CompareFunction {
    use abi::CompareFunction as C;
    match func {
        C::Never => wgpu::CompareFunction::Never,
        C::Less => wgpu::CompareFunction::Less,
        C::Equal => wgpu::CompareFunction::Equal,
        C::LessEqual => wgpu::CompareFunction::LessEqual,
        C::Greater => wgpu::CompareFunction::Greater,
        C::NotEqual => wgpu::CompareFunction::NotEqual,
        C::GreaterEqual => wgpu::CompareFunction::GreaterEqual,
        C::Always => wgpu::CompareFunction::Always,
    }
}

pub(crate) fn map_topology(topology: abi::PrimitiveTopology) -> wgpu::PrimitiveTopology {
    use abi::PrimitiveTopology as T;
    match topology {
        T::PointList => wgpu::PrimitiveTopology::PointList,
        T::LineList => wgpu::PrimitiveTopology::LineList,
        T::LineStrip => wgpu::PrimitiveTopology::LineStrip,
        T::TriangleList => wgpu::PrimitiveTopology::TriangleList,
        T::TriangleStrip => wgpu::PrimitiveTopology::TriangleStrip,
    }
}

pub(crate) fn map_index_format(format: abi::IndexFormat) -> wgpu::IndexFormat {
    match format {
        abi::IndexFormat::Uint16 => wgpu::IndexFormat::Uint16,
        abi::IndexFormat::Uint32 => wgpu::IndexFormat::Uint32,
    }
}

pub(crate) fn map_front_face(face: abi::FrontFace) -> wgpu::FrontFace {
    match face {
        abi::FrontFace::Ccw => wgpu::FrontFace::Ccw,
        abi::FrontFace::Cw => wgpu::FrontFace::Cw,
    }
}

pub(crate) fn map_cull_mode(mode: abi::CullMode) -> Option<wgpu::Face> {
    match mode {
        abi::CullMode::None => None,
        abi::CullMode::Front => Some(wgpu::Face::Front),
        abi::CullMode::Back => Some(wgpu::Face::Back),
    }
}

pub(crate) fn map_blend_factor(factor: abi::BlendFactor) -> wgpu::BlendFactor {
    use abi::BlendFactor as B;
    match factor {
        B::Zero => wgpu::BlendFactor::Zero,
        B::One => wgpu::BlendFactor::One,
        B::Src => wgpu::BlendFactor::Src,
        B::OneMinusSrc => wgpu::BlendFactor::OneMinusSrc,
        B::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
        B::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
        B::Dst => wgpu::BlendFactor::Dst,
        B::OneMinusDst => wgpu::BlendFactor::OneMinusDst,
        B::DstAlpha => wgpu::BlendFactor::DstAlpha,
        B::OneMinusDstAlpha => wgpu::BlendFactor::OneMinusDstAlpha,
        B::SrcAlphaSaturated => wgpu::BlendFactor::SrcAlphaSaturated,
        B::Constant => wgpu::BlendFactor::Constant,
        B::OneMinusConstant => wgpu::BlendFactor::OneMinusConstant,
    }
}

pub(crate) fn map_blend_operation(op: abi::BlendOperation) -> wgpu::BlendOperation {
    use abi::BlendOperation as O;
    match op {
        O::Add => wgpu::BlendOperation::Add,
        O::Subtract => wgpu::BlendOperation::Subtract,
        O::ReverseSubtract => wgpu::BlendOperation::ReverseSubtract,
        O::Min => wgpu::BlendOperation::Min,
        O::Max => wgpu::BlendOperation::Max,
    }
}

pub(crate) fn map_stencil_op(op: abi::StencilOperation) -> wgpu::StencilOperation {
    use abi::StencilOperation as S;
    match op {
        S::Keep => wgpu::StencilOperation::Keep,
        S::Zero => wgpu::StencilOperation::Zero,
        S::Replace => wgpu::StencilOperation::Replace,
        S::Invert => wgpu::StencilOperation::Invert,
        S::IncrementClamp => wgpu::StencilOperation::IncrementClamp,
        S::DecrementClamp => wgpu::StencilOperation::DecrementClamp,
        S::IncrementWrap => wgpu::StencilOperation::IncrementWrap,
        S::DecrementWrap => wgpu::StencilOperation::DecrementWrap,
    }
}

pub(crate) fn map_vertex_format(format: abi::VertexFormat) -> wgpu::VertexFormat {
    use abi::VertexFormat as V;
    match format {
        V::Uint8x2 => wgpu::VertexFormat::Uint8x2,
        V::Uint8x4 => wgpu::VertexFormat::Uint8x4,
        V::Sint8x2 => wgpu::VertexFormat::Sint8x2,
        V::Sint8x4 => wgpu::VertexFormat::Sint8x4,
        V::Unorm8x2 => wgpu::VertexFormat::Unorm8x2,
        V::Unorm8x4 => wgpu::VertexFormat::Unorm8x4,
        V::Snorm8x2 => wgpu::VertexFormat::Snorm8x2,
        V::Snorm8x4 => wgpu::VertexFormat::Snorm8x4,
        V::Uint16x2 => wgpu::VertexFormat::Uint16x2,
        V::Uint16x4 => wgpu::VertexFormat::Uint16x4,
        V::Sint16x2 => wgpu::VertexFormat::Sint16x2,
        V::Sint16x4 => wgpu::VertexFormat::Sint16x4,
        V::Unorm16x2 => wgpu::VertexFormat::Unorm16x2,
        V::Unorm16x4 => wgpu::VertexFormat::Unorm16x4,
        V::Snorm16x2 => wgpu::VertexFormat::Snorm16x2,
        V::Snorm16x4 => wgpu::VertexFormat::Snorm16x4,
        V::Float16x2 => wgpu::VertexFormat::Float16x2,
        V::Float16x4 => wgpu::VertexFormat::Float16x4,
        V::Float32 => wgpu::VertexFormat::Float32,
        V::Float32x2 => wgpu::VertexFormat::Float32x2,
        V::Float32x3 => wgpu::VertexFormat::Float32x3,
        V::Float32x4 => wgpu::VertexFormat::Float32x4,
        V::Uint32 => wgpu::VertexFormat::Uint32,
        V::Uint32x2 => wgpu::VertexFormat::Uint32x2,
        V::Uint32x3 => wgpu::VertexFormat::Uint32x3,
        V::Uint32x4 => wgpu::VertexFormat::Uint32x4,
        V::Sint32 => wgpu::VertexFormat::Sint32,
        V::Sint32x2 => wgpu::VertexFormat::Sint32x2,
        V::Sint32x3 => wgpu::VertexFormat::Sint32x3,
        V::Sint32x4 => wgpu::VertexFormat::Sint32x4,
    }
}
