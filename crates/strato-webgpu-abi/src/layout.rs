//! Generated struct layout tables for the wasm32 native ABI.
//!
//! Every value below is a byte offset from the start of the corresponding
//! native struct (pointers are 4 bytes, u64/f64 fields 8-byte aligned).
//! The table is injected into the decoder instead of being hard-coded there so
//! a regenerated header revision only ever touches this file.

/// Offsets of a `(ptr, len)` string field pair. Strings are never
/// null-terminated; `len` is the byte length and embedded NULs are data.
#[derive(Clone, Copy, Debug)]
pub struct StrField {
    pub ptr: u32,
    pub len: u32,
}

/// Extension-chain header present at offset 0 of every chained struct.
#[derive(Clone, Copy, Debug)]
pub struct ChainLayout {
    pub next: u32,
    pub stype: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct RequestAdapterOptionsLayout {
    pub power_preference: u32,
    pub force_fallback_adapter: u32,
    pub compatible_surface: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct DeviceDescriptorLayout {
    pub label: StrField,
    pub required_feature_count: u32,
    pub required_features: u32,
    pub required_limits: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct LimitsLayout {
    pub max_texture_dimension_1d: u32,
    pub max_texture_dimension_2d: u32,
    pub max_texture_dimension_3d: u32,
    pub max_texture_array_layers: u32,
    pub max_bind_groups: u32,
    pub max_bindings_per_bind_group: u32,
    pub max_dynamic_uniform_buffers_per_pipeline_layout: u32,
    pub max_dynamic_storage_buffers_per_pipeline_layout: u32,
    pub max_sampled_textures_per_shader_stage: u32,
    pub max_samplers_per_shader_stage: u32,
    pub max_storage_buffers_per_shader_stage: u32,
    pub max_storage_textures_per_shader_stage: u32,
    pub max_uniform_buffers_per_shader_stage: u32,
    pub min_uniform_buffer_offset_alignment: u32,
    pub min_storage_buffer_offset_alignment: u32,
    pub max_vertex_buffers: u32,
    pub max_vertex_attributes: u32,
    pub max_vertex_buffer_array_stride: u32,
    pub max_color_attachments: u32,
    pub max_compute_workgroup_storage_size: u32,
    pub max_compute_invocations_per_workgroup: u32,
    pub max_compute_workgroup_size_x: u32,
    pub max_compute_workgroup_size_y: u32,
    pub max_compute_workgroup_size_z: u32,
    pub max_compute_workgroups_per_dimension: u32,
    pub max_uniform_buffer_binding_size: u32,
    pub max_storage_buffer_binding_size: u32,
    pub max_buffer_size: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct BufferDescriptorLayout {
    pub label: StrField,
    pub usage: u32,
    pub mapped_at_creation: u32,
    pub size: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct TextureDescriptorLayout {
    pub label: StrField,
    pub usage: u32,
    pub dimension: u32,
    pub width: u32,
    pub height: u32,
    pub depth_or_array_layers: u32,
    pub format: u32,
    pub mip_level_count: u32,
    pub sample_count: u32,
    pub view_format_count: u32,
    pub view_formats: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct TextureViewDescriptorLayout {
    pub label: StrField,
    pub format: u32,
    pub dimension: u32,
    pub base_mip_level: u32,
    pub mip_level_count: u32,
    pub base_array_layer: u32,
    pub array_layer_count: u32,
    pub aspect: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct SamplerDescriptorLayout {
    pub label: StrField,
    pub address_mode_u: u32,
    pub address_mode_v: u32,
    pub address_mode_w: u32,
    pub mag_filter: u32,
    pub min_filter: u32,
    pub mipmap_filter: u32,
    pub lod_min_clamp: u32,
    pub lod_max_clamp: u32,
    pub compare: u32,
    pub max_anisotropy: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct ShaderModuleDescriptorLayout {
    pub label: StrField,
    pub size_bytes: u32,
}

/// `SType::ShaderSourceWgsl` extension struct.
#[derive(Clone, Copy, Debug)]
pub struct ShaderSourceWgslLayout {
    pub code: StrField,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct BindGroupLayoutDescriptorLayout {
    pub label: StrField,
    pub entry_count: u32,
    pub entries: u32,
    pub size_bytes: u32,
}

/// Flattened bind group layout entry; a `0` in the per-category kind field
/// means that category is not used by the entry.
#[derive(Clone, Copy, Debug)]
pub struct BindGroupLayoutEntryLayout {
    pub binding: u32,
    pub visibility: u32,
    pub buffer_kind: u32,
    pub buffer_has_dynamic_offset: u32,
    pub buffer_min_binding_size: u32,
    pub sampler_kind: u32,
    pub texture_sample_type: u32,
    pub texture_view_dimension: u32,
    pub texture_multisampled: u32,
    pub storage_texture_access: u32,
    pub storage_texture_format: u32,
    pub storage_texture_view_dimension: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct PipelineLayoutDescriptorLayout {
    pub label: StrField,
    pub bind_group_layout_count: u32,
    pub bind_group_layouts: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct BindGroupDescriptorLayout {
    pub label: StrField,
    pub layout: u32,
    pub entry_count: u32,
    pub entries: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct BindGroupEntryLayout {
    pub binding: u32,
    pub buffer: u32,
    pub offset: u32,
    pub size: u32,
    pub sampler: u32,
    pub texture_view: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct ConstantEntryLayout {
    pub key: StrField,
    pub value: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct ComputePipelineDescriptorLayout {
    pub label: StrField,
    pub layout: u32,
    pub module: u32,
    pub entry_point: StrField,
    pub constant_count: u32,
    pub constants: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct RenderPipelineDescriptorLayout {
    pub label: StrField,
    pub layout: u32,
    pub vertex_module: u32,
    pub vertex_entry_point: StrField,
    pub vertex_constant_count: u32,
    pub vertex_constants: u32,
    pub vertex_buffer_count: u32,
    pub vertex_buffers: u32,
    pub primitive_topology: u32,
    pub primitive_strip_index_format: u32,
    pub primitive_front_face: u32,
    pub primitive_cull_mode: u32,
    pub primitive_unclipped_depth: u32,
    pub depth_stencil: u32,
    pub multisample_count: u32,
    pub multisample_mask: u32,
    pub multisample_alpha_to_coverage: u32,
    pub fragment: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct VertexBufferLayoutLayout {
    pub array_stride: u32,
    pub step_mode: u32,
    pub attribute_count: u32,
    pub attributes: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct VertexAttributeLayout {
    pub format: u32,
    pub shader_location: u32,
    pub offset: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct StencilFaceLayout {
    pub compare: u32,
    pub fail_op: u32,
    pub depth_fail_op: u32,
    pub pass_op: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct DepthStencilStateLayout {
    pub format: u32,
    pub depth_write_enabled: u32,
    pub depth_compare: u32,
    pub stencil_front: StencilFaceLayout,
    pub stencil_back: StencilFaceLayout,
    pub stencil_read_mask: u32,
    pub stencil_write_mask: u32,
    pub depth_bias: u32,
    pub depth_bias_slope_scale: u32,
    pub depth_bias_clamp: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct FragmentStateLayout {
    pub module: u32,
    pub entry_point: StrField,
    pub constant_count: u32,
    pub constants: u32,
    pub target_count: u32,
    pub targets: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct ColorTargetStateLayout {
    pub format: u32,
    pub blend: u32,
    pub write_mask: u32,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct BlendComponentLayout {
    pub operation: u32,
    pub src_factor: u32,
    pub dst_factor: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct BlendStateLayout {
    pub color: BlendComponentLayout,
    pub alpha: BlendComponentLayout,
    pub size_bytes: u32,
}

#[derive(Clone, Copy, Debug)]
pub struct StructLayouts {
    pub chain: ChainLayout,
    pub request_adapter_options: RequestAdapterOptionsLayout,
    pub device_descriptor: DeviceDescriptorLayout,
    pub limits: LimitsLayout,
    pub buffer_descriptor: BufferDescriptorLayout,
    pub texture_descriptor: TextureDescriptorLayout,
    pub texture_view_descriptor: TextureViewDescriptorLayout,
    pub sampler_descriptor: SamplerDescriptorLayout,
    pub shader_module_descriptor: ShaderModuleDescriptorLayout,
    pub shader_source_wgsl: ShaderSourceWgslLayout,
    pub bind_group_layout_descriptor: BindGroupLayoutDescriptorLayout,
    pub bind_group_layout_entry: BindGroupLayoutEntryLayout,
    pub pipeline_layout_descriptor: PipelineLayoutDescriptorLayout,
    pub bind_group_descriptor: BindGroupDescriptorLayout,
    pub bind_group_entry: BindGroupEntryLayout,
    pub constant_entry: ConstantEntryLayout,
    pub compute_pipeline_descriptor: ComputePipelineDescriptorLayout,
    pub render_pipeline_descriptor: RenderPipelineDescriptorLayout,
    pub vertex_buffer_layout: VertexBufferLayoutLayout,
    pub vertex_attribute: VertexAttributeLayout,
    pub depth_stencil_state: DepthStencilStateLayout,
    pub fragment_state: FragmentStateLayout,
    pub color_target_state: ColorTargetStateLayout,
    pub blend_state: BlendStateLayout,
}

/// wasm32 layout table (4-byte pointers). Descriptor structs carry their
/// `next_in_chain` pointer at offset 0; the remaining offsets follow.
pub static LAYOUTS: StructLayouts = StructLayouts {
    chain: ChainLayout { next: 0, stype: 4 },
    request_adapter_options: RequestAdapterOptionsLayout {
        power_preference: 4,
        force_fallback_adapter: 8,
        compatible_surface: 12,
        size_bytes: 16,
    },
    device_descriptor: DeviceDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        required_feature_count: 12,
        required_features: 16,
        required_limits: 20,
        size_bytes: 24,
    },
    limits: LimitsLayout {
        max_texture_dimension_1d: 0,
        max_texture_dimension_2d: 4,
        max_texture_dimension_3d: 8,
        max_texture_array_layers: 12,
        max_bind_groups: 16,
        max_bindings_per_bind_group: 20,
        max_dynamic_uniform_buffers_per_pipeline_layout: 24,
        max_dynamic_storage_buffers_per_pipeline_layout: 28,
        max_sampled_textures_per_shader_stage: 32,
        max_samplers_per_shader_stage: 36,
        max_storage_buffers_per_shader_stage: 40,
        max_storage_textures_per_shader_stage: 44,
        max_uniform_buffers_per_shader_stage: 48,
        min_uniform_buffer_offset_alignment: 52,
        min_storage_buffer_offset_alignment: 56,
        max_vertex_buffers: 60,
        max_vertex_attributes: 64,
        max_vertex_buffer_array_stride: 68,
        max_color_attachments: 72,
        max_compute_workgroup_storage_size: 76,
        max_compute_invocations_per_workgroup: 80,
        max_compute_workgroup_size_x: 84,
        max_compute_workgroup_size_y: 88,
        max_compute_workgroup_size_z: 92,
        max_compute_workgroups_per_dimension: 96,
        max_uniform_buffer_binding_size: 104,
        max_storage_buffer_binding_size: 112,
        max_buffer_size: 120,
        size_bytes: 128,
    },
    buffer_descriptor: BufferDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        usage: 12,
        mapped_at_creation: 16,
        size: 24,
        size_bytes: 32,
    },
    texture_descriptor: TextureDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        usage: 12,
        dimension: 16,
        width: 20,
        height: 24,
        depth_or_array_layers: 28,
        format: 32,
        mip_level_count: 36,
        sample_count: 40,
        view_format_count: 44,
        view_formats: 48,
        size_bytes: 52,
    },
    texture_view_descriptor: TextureViewDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        format: 12,
        dimension: 16,
        base_mip_level: 20,
        mip_level_count: 24,
        base_array_layer: 28,
        array_layer_count: 32,
        aspect: 36,
        size_bytes: 40,
    },
    sampler_descriptor: SamplerDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        address_mode_u: 12,
        address_mode_v: 16,
        address_mode_w: 20,
        mag_filter: 24,
        min_filter: 28,
        mipmap_filter: 32,
        lod_min_clamp: 36,
        lod_max_clamp: 40,
        compare: 44,
        max_anisotropy: 48,
        size_bytes: 52,
    },
    shader_module_descriptor: ShaderModuleDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        size_bytes: 12,
    },
    shader_source_wgsl: ShaderSourceWgslLayout {
        code: StrField { ptr: 8, len: 12 },
        size_bytes: 16,
    },
    bind_group_layout_descriptor: BindGroupLayoutDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        entry_count: 12,
        entries: 16,
        size_bytes: 20,
    },
    bind_group_layout_entry: BindGroupLayoutEntryLayout {
        binding: 0,
        visibility: 4,
        buffer_kind: 8,
        buffer_has_dynamic_offset: 12,
        buffer_min_binding_size: 16,
        sampler_kind: 24,
        texture_sample_type: 28,
        texture_view_dimension: 32,
        texture_multisampled: 36,
        storage_texture_access: 40,
        storage_texture_format: 44,
        storage_texture_view_dimension: 48,
        size_bytes: 56,
    },
    pipeline_layout_descriptor: PipelineLayoutDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        bind_group_layout_count: 12,
        bind_group_layouts: 16,
        size_bytes: 20,
    },
    bind_group_descriptor: BindGroupDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        layout: 12,
        entry_count: 16,
        entries: 20,
        size_bytes: 24,
    },
    bind_group_entry: BindGroupEntryLayout {
        binding: 0,
        buffer: 4,
        offset: 8,
        size: 16,
        sampler: 24,
        texture_view: 28,
        size_bytes: 32,
    },
    constant_entry: ConstantEntryLayout {
        key: StrField { ptr: 0, len: 4 },
        value: 8,
        size_bytes: 16,
    },
    compute_pipeline_descriptor: ComputePipelineDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        layout: 12,
        module: 16,
        entry_point: StrField { ptr: 20, len: 24 },
        constant_count: 28,
        constants: 32,
        size_bytes: 36,
    },
    render_pipeline_descriptor: RenderPipelineDescriptorLayout {
        label: StrField { ptr: 4, len: 8 },
        layout: 12,
        vertex_module: 16,
        vertex_entry_point: StrField { ptr: 20, len: 24 },
        vertex_constant_count: 28,
        vertex_constants: 32,
        vertex_buffer_count: 36,
        vertex_buffers: 40,
        primitive_topology: 44,
        primitive_strip_index_format: 48,
        primitive_front_face: 52,
        primitive_cull_mode: 56,
        primitive_unclipped_depth: 60,
        depth_stencil: 64,
        multisample_count: 68,
        multisample_mask: 72,
        multisample_alpha_to_coverage: 76,
        fragment: 80,
        size_bytes: 84,
    },
    vertex_buffer_layout: VertexBufferLayoutLayout {
        array_stride: 0,
        step_mode: 8,
        attribute_count: 12,
        attributes: 16,
        size_bytes: 24,
    },
    vertex_attribute: VertexAttributeLayout {
        format: 0,
        shader_location: 4,
        offset: 8,
        size_bytes: 16,
    },
    depth_stencil_state: DepthStencilStateLayout {
        format: 0,
        depth_write_enabled: 4,
        depth_compare: 8,
        stencil_front: StencilFaceLayout {
            compare: 12,
            fail_op: 16,
            depth_fail_op: 20,
            pass_op: 24,
        },
        stencil_back: StencilFaceLayout {
            compare: 28,
            fail_op: 32,
            depth_fail_op: 36,
            pass_op: 40,
        },
        stencil_read_mask: 44,
        stencil_write_mask: 48,
        depth_bias: 52,
        depth_bias_slope_scale: 56,
        depth_bias_clamp: 60,
        size_bytes: 64,
    },
    fragment_state: FragmentStateLayout {
        module: 0,
        entry_point: StrField { ptr: 4, len: 8 },
        constant_count: 12,
        constants: 16,
        target_count: 20,
        targets: 24,
        size_bytes: 28,
    },
    color_target_state: ColorTargetStateLayout {
        format: 0,
        blend: 4,
        write_mask: 8,
        size_bytes: 12,
    },
    blend_state: BlendStateLayout {
        color: BlendComponentLayout {
            operation: 0,
            src_factor: 4,
            dst_factor: 8,
        },
        alpha: BlendComponentLayout {
            operation: 12,
            src_factor: 16,
            dst_factor: 20,
        },
        size_bytes: 24,
    },
};
