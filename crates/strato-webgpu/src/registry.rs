//! Per-type handle tables for every host object the bridge can own.

use std::rc::Rc;

use crate::buffer::BufferRecord;
use crate::handle::HandleTable;

/// Adapters, devices, shader modules and pipeline layouts are held under `Rc`
/// so in-flight asynchronous operations can keep them alive across suspension
/// points without borrowing the registry.
pub struct ObjectRegistry {
    pub adapters: HandleTable<Rc<wgpu::Adapter>>,
    pub devices: HandleTable<Rc<wgpu::Device>>,
    pub queues: HandleTable<wgpu::Queue>,
    pub buffers: HandleTable<BufferRecord>,
    pub textures: HandleTable<wgpu::Texture>,
    pub texture_views: HandleTable<wgpu::TextureView>,
    pub samplers: HandleTable<wgpu::Sampler>,
    pub shader_modules: HandleTable<Rc<wgpu::ShaderModule>>,
    pub bind_group_layouts: HandleTable<wgpu::BindGroupLayout>,
    pub pipeline_layouts: HandleTable<Rc<wgpu::PipelineLayout>>,
    pub bind_groups: HandleTable<wgpu::BindGroup>,
    pub render_pipelines: HandleTable<wgpu::RenderPipeline>,
    pub compute_pipelines: HandleTable<wgpu::ComputePipeline>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self {
            adapters: HandleTable::new("adapter"),
            devices: HandleTable::new("device"),
            queues: HandleTable::new("queue"),
            buffers: HandleTable::new("buffer"),
            textures: HandleTable::new("texture"),
            texture_views: HandleTable::new("texture view"),
            samplers: HandleTable::new("sampler"),
            shader_modules: HandleTable::new("shader module"),
            bind_group_layouts: HandleTable::new("bind group layout"),
            pipeline_layouts: HandleTable::new("pipeline layout"),
            bind_groups: HandleTable::new("bind group"),
            render_pipelines: HandleTable::new("render pipeline"),
            compute_pipelines: HandleTable::new("compute pipeline"),
        }
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}
