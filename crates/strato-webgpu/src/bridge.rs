//! The bridge context: one object owning the handle tables, the future
//! broker, and the host instance, threaded through every native entry point.
//!
//! Entry points are synchronous. A call either has its result ready before it
//! returns (creation handles are bound immediately, or reserved and bound at
//! settlement) or is keyed by a native-supplied future id for later
//! observation through `process_events` / `wait_any`.

use std::collections::HashMap;
use std::num::NonZeroU64;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, Either, LocalBoxFuture};
use futures::{FutureExt, StreamExt};
use futures_intrusive::channel::shared::oneshot_channel;

use strato_webgpu_abi::{
    self as abi, BufferMapState, CreatePipelineStatus, DeviceLostReason, ErrorFilter, ErrorType,
    FutureId, MapAsyncStatus, MapMode, QueueWorkDoneStatus, RawHandle, RequestAdapterStatus,
    RequestDeviceStatus, StructLayouts, NULL_HANDLE, WHOLE_SIZE,
};

use crate::buffer::BufferRecord;
use crate::decode::{
    self, map_buffer_usage, map_feature, DecodedBindingResource, DecodedRenderPipeline, Decoder,
};
use crate::error::{classify, lost_reason, ErrorQueue};
use crate::future::{FutureBroker, NeverTimer, SettledOp, Settlement, TimerSource};
use crate::memory::{must, GuestHeap, GuestMemory, GuestMemoryExt};
use crate::registry::ObjectRegistry;
use crate::sink::{CompilationMessage, CompletionSink};

pub struct WebGpuBridge {
    instance: Rc<wgpu::Instance>,
    registry: ObjectRegistry,
    broker: FutureBroker,
    errors: ErrorQueue,
    sink: Box<dyn CompletionSink>,
    timer: Box<dyn TimerSource>,
    layouts: &'static StructLayouts,
}

impl WebGpuBridge {
    pub fn new(sink: Box<dyn CompletionSink>) -> Self {
        Self::with_timer(sink, Box::new(NeverTimer))
    }

    pub fn with_timer(sink: Box<dyn CompletionSink>, timer: Box<dyn TimerSource>) -> Self {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: wgpu::InstanceFlags::default(),
            dx12_shader_compiler: Default::default(),
            gles_minor_version: wgpu::Gles3MinorVersion::Automatic,
        });
        Self {
            instance: Rc::new(instance),
            registry: ObjectRegistry::new(),
            broker: FutureBroker::new(),
            errors: ErrorQueue::new(),
            sink,
            timer,
            layouts: &abi::LAYOUTS,
        }
    }

    /// Swaps in a regenerated layout table (a different header revision).
    pub fn with_layouts(mut self, layouts: &'static StructLayouts) -> Self {
        self.layouts = layouts;
        self
    }

    /// Operations whose keep-alive token has not yet been released.
    pub fn outstanding_operations(&self) -> usize {
        self.broker.outstanding()
    }

    // ------------------------------------------------------------------
    // Instance & adapter
    // ------------------------------------------------------------------

    pub fn instance_request_adapter(
        &mut self,
        mem: &dyn GuestMemory,
        future_id: FutureId,
        adapter_handle: RawHandle,
        options_ptr: u64,
    ) {
        let options = Decoder::new(mem, self.layouts).request_adapter_options(options_ptr);
        tracing::debug!(future = future_id.0, adapter_handle, "requesting adapter");
        self.registry.adapters.reserve(adapter_handle);
        let instance = Rc::clone(&self.instance);
        let driver = async move {
            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: options.power_preference,
                    force_fallback_adapter: options.force_fallback_adapter,
                    compatible_surface: None,
                })
                .await;
            SettledOp::RequestAdapter {
                handle: adapter_handle,
                adapter,
            }
        }
        .boxed_local();
        self.broker.register(future_id, driver);
    }

    pub fn adapter_request_device(
        &mut self,
        mem: &dyn GuestMemory,
        adapter_handle: RawHandle,
        future_id: FutureId,
        device_lost_future: FutureId,
        device_handle: RawHandle,
        queue_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).device_descriptor(descriptor_ptr);
        tracing::debug!(future = future_id.0, device_handle, "requesting device");
        self.registry.devices.reserve(device_handle);
        self.registry.queues.reserve(queue_handle);
        let adapter = Rc::clone(self.registry.adapters.get(adapter_handle));
        let driver = async move {
            let result = adapter
                .request_device(
                    &wgpu::DeviceDescriptor {
                        label: decoded.label.as_deref(),
                        required_features: decoded.features,
                        required_limits: decoded.limits.clone(),
                    },
                    None,
                )
                .await
                .map_err(|err| err.to_string());
            SettledOp::RequestDevice {
                device_handle,
                queue_handle,
                lost_future: device_lost_future,
                result,
            }
        }
        .boxed_local();
        self.broker.register(future_id, driver);
    }

    pub fn adapter_has_feature(&self, adapter_handle: RawHandle, feature_raw: u32) -> bool {
        let Some(feature) = abi::FeatureName::from_u32(feature_raw) else {
            return false;
        };
        self.registry
            .adapters
            .get(adapter_handle)
            .features()
            .contains(map_feature(feature))
    }

    pub fn adapter_limits(&self, mem: &dyn GuestMemory, adapter_handle: RawHandle, out_ptr: u64) {
        let limits = self.registry.adapters.get(adapter_handle).limits();
        decode::write_limits(mem, self.layouts, out_ptr, &limits);
    }

    pub fn drop_adapter(&mut self, handle: RawHandle) {
        self.registry.adapters.remove(handle);
    }

    // ------------------------------------------------------------------
    // Device
    // ------------------------------------------------------------------

    pub fn device_limits(&self, mem: &dyn GuestMemory, device_handle: RawHandle, out_ptr: u64) {
        let limits = self.registry.devices.get(device_handle).limits();
        decode::write_limits(mem, self.layouts, out_ptr, &limits);
    }

    pub fn device_push_error_scope(&self, device_handle: RawHandle, filter_raw: u32) {
        let filter = ErrorFilter::from_u32(filter_raw)
            .unwrap_or_else(|| panic!("unknown error filter encoding {filter_raw}"));
        self.registry
            .devices
            .get(device_handle)
            .push_error_scope(match filter {
                ErrorFilter::Validation => wgpu::ErrorFilter::Validation,
                ErrorFilter::OutOfMemory => wgpu::ErrorFilter::OutOfMemory,
                ErrorFilter::Internal => wgpu::ErrorFilter::Internal,
            });
    }

    pub fn device_pop_error_scope(&mut self, device_handle: RawHandle, future_id: FutureId) {
        let device = Rc::clone(self.registry.devices.get(device_handle));
        let driver = async move {
            let (ty, message) = match device.pop_error_scope().await {
                None => (ErrorType::NoError, String::new()),
                Some(err) => classify(&err),
            };
            SettledOp::PopErrorScope { ty, message }
        }
        .boxed_local();
        self.broker.register(future_id, driver);
    }

    /// Host-side destroy. The device's lost future resolves through the
    /// normal settlement path.
    pub fn device_destroy(&self, device_handle: RawHandle) {
        self.registry.devices.get(device_handle).destroy();
    }

    pub fn device_poll(&self, device_handle: RawHandle, wait: bool) {
        let device = self.registry.devices.get(device_handle);
        let _ = device.poll(if wait {
            wgpu::Maintain::Wait
        } else {
            wgpu::Maintain::Poll
        });
    }

    pub fn drop_device(&mut self, handle: RawHandle) {
        self.registry.devices.remove(handle);
    }

    pub fn drop_queue(&mut self, handle: RawHandle) {
        self.registry.queues.remove(handle);
    }

    // ------------------------------------------------------------------
    // Resource creation
    // ------------------------------------------------------------------

    pub fn device_create_buffer(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        buffer_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).buffer_descriptor(descriptor_ptr);
        let buffer = {
            let device = self.registry.devices.get(device_handle);
            device.create_buffer(&wgpu::BufferDescriptor {
                label: decoded.label.as_deref(),
                size: decoded.size,
                usage: map_buffer_usage(decoded.usage),
                mapped_at_creation: decoded.mapped_at_creation,
            })
        };
        self.registry.buffers.insert(
            buffer_handle,
            BufferRecord::new(buffer, decoded.size, decoded.usage, decoded.mapped_at_creation),
        );
    }

    pub fn device_create_texture(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        texture_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).texture_descriptor(descriptor_ptr);
        let texture = {
            let device = self.registry.devices.get(device_handle);
            device.create_texture(&wgpu::TextureDescriptor {
                label: decoded.label.as_deref(),
                size: decoded.size,
                mip_level_count: decoded.mip_level_count,
                sample_count: decoded.sample_count,
                dimension: decoded.dimension,
                format: decoded.format,
                usage: decoded.usage,
                view_formats: &decoded.view_formats,
            })
        };
        self.registry.textures.insert(texture_handle, texture);
    }

    pub fn texture_create_view(
        &mut self,
        mem: &dyn GuestMemory,
        texture_handle: RawHandle,
        view_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).texture_view_descriptor(descriptor_ptr);
        let view = {
            let texture = self.registry.textures.get(texture_handle);
            texture.create_view(&wgpu::TextureViewDescriptor {
                label: decoded.label.as_deref(),
                format: decoded.format,
                dimension: decoded.dimension,
                aspect: decoded.aspect,
                base_mip_level: decoded.base_mip_level,
                mip_level_count: decoded.mip_level_count,
                base_array_layer: decoded.base_array_layer,
                array_layer_count: decoded.array_layer_count,
            })
        };
        self.registry.texture_views.insert(view_handle, view);
    }

    pub fn device_create_sampler(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        sampler_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).sampler_descriptor(descriptor_ptr);
        let sampler = {
            let device = self.registry.devices.get(device_handle);
            device.create_sampler(&wgpu::SamplerDescriptor {
                label: decoded.label.as_deref(),
                address_mode_u: decoded.address_modes[0],
                address_mode_v: decoded.address_modes[1],
                address_mode_w: decoded.address_modes[2],
                mag_filter: decoded.mag_filter,
                min_filter: decoded.min_filter,
                mipmap_filter: decoded.mipmap_filter,
                lod_min_clamp: decoded.lod_min_clamp,
                lod_max_clamp: decoded.lod_max_clamp,
                compare: decoded.compare,
                anisotropy_clamp: decoded.max_anisotropy,
                border_color: None,
            })
        };
        self.registry.samplers.insert(sampler_handle, sampler);
    }

    pub fn device_create_shader_module(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        module_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).shader_module_descriptor(descriptor_ptr);
        let module = {
            let device = self.registry.devices.get(device_handle);
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: decoded.label.as_deref(),
                source: wgpu::ShaderSource::Wgsl(decoded.wgsl.into()),
            })
        };
        self.registry
            .shader_modules
            .insert(module_handle, Rc::new(module));
    }

    pub fn device_create_bind_group_layout(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        layout_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).bind_group_layout_descriptor(descriptor_ptr);
        let layout = {
            let device = self.registry.devices.get(device_handle);
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: decoded.label.as_deref(),
                entries: &decoded.entries,
            })
        };
        self.registry.bind_group_layouts.insert(layout_handle, layout);
    }

    pub fn device_create_pipeline_layout(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        layout_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).pipeline_layout_descriptor(descriptor_ptr);
        let layout = {
            let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = decoded
                .bind_group_layouts
                .iter()
                .map(|&handle| self.registry.bind_group_layouts.get(handle))
                .collect();
            let device = self.registry.devices.get(device_handle);
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: decoded.label.as_deref(),
                bind_group_layouts: &bind_group_layouts,
                push_constant_ranges: &[],
            })
        };
        self.registry
            .pipeline_layouts
            .insert(layout_handle, Rc::new(layout));
    }

    pub fn device_create_bind_group(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        bind_group_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).bind_group_descriptor(descriptor_ptr);
        let bind_group = {
            let entries: Vec<wgpu::BindGroupEntry> = decoded
                .entries
                .iter()
                .map(|entry| wgpu::BindGroupEntry {
                    binding: entry.binding,
                    resource: match &entry.resource {
                        DecodedBindingResource::Buffer {
                            handle,
                            offset,
                            size,
                        } => wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                            buffer: &self.registry.buffers.get(*handle).buffer,
                            offset: *offset,
                            size: size.map(|s| {
                                NonZeroU64::new(s).unwrap_or_else(|| {
                                    panic!("zero-sized buffer binding {}", entry.binding)
                                })
                            }),
                        }),
                        DecodedBindingResource::Sampler(handle) => {
                            wgpu::BindingResource::Sampler(self.registry.samplers.get(*handle))
                        }
                        DecodedBindingResource::TextureView(handle) => {
                            wgpu::BindingResource::TextureView(
                                self.registry.texture_views.get(*handle),
                            )
                        }
                    },
                })
                .collect();
            let layout = self.registry.bind_group_layouts.get(decoded.layout);
            let device = self.registry.devices.get(device_handle);
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: decoded.label.as_deref(),
                layout,
                entries: &entries,
            })
        };
        self.registry.bind_groups.insert(bind_group_handle, bind_group);
    }

    pub fn device_create_compute_pipeline(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        pipeline_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).compute_pipeline_descriptor(descriptor_ptr);
        let pipeline = {
            let constants: HashMap<String, f64> = decoded.stage.constants.iter().cloned().collect();
            let module: &wgpu::ShaderModule =
                self.registry.shader_modules.get(decoded.stage.module);
            let layout = decoded
                .layout
                .map(|handle| &**self.registry.pipeline_layouts.get(handle));
            let device = self.registry.devices.get(device_handle);
            device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: decoded.label.as_deref(),
                layout,
                module,
                entry_point: &decoded.stage.entry_point,
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: &constants,
                    ..Default::default()
                },
            })
        };
        self.registry.compute_pipelines.insert(pipeline_handle, pipeline);
    }

    pub fn device_create_compute_pipeline_async(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        future_id: FutureId,
        pipeline_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).compute_pipeline_descriptor(descriptor_ptr);
        self.registry.compute_pipelines.reserve(pipeline_handle);
        let device = Rc::clone(self.registry.devices.get(device_handle));
        let module = Rc::clone(self.registry.shader_modules.get(decoded.stage.module));
        let layout = decoded
            .layout
            .map(|handle| Rc::clone(self.registry.pipeline_layouts.get(handle)));
        let driver = async move {
            device.push_error_scope(wgpu::ErrorFilter::Validation);
            let constants: HashMap<String, f64> = decoded.stage.constants.iter().cloned().collect();
            let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: decoded.label.as_deref(),
                layout: layout.as_deref(),
                module: &module,
                entry_point: &decoded.stage.entry_point,
                compilation_options: wgpu::PipelineCompilationOptions {
                    constants: &constants,
                    ..Default::default()
                },
            });
            match device.pop_error_scope().await {
                None => SettledOp::CreateComputePipeline {
                    handle: pipeline_handle,
                    status: CreatePipelineStatus::Success,
                    pipeline: Some(pipeline),
                    message: String::new(),
                },
                Some(err) => {
                    let (ty, message) = classify(&err);
                    SettledOp::CreateComputePipeline {
                        handle: pipeline_handle,
                        status: pipeline_status(ty),
                        pipeline: None,
                        message,
                    }
                }
            }
        }
        .boxed_local();
        self.broker.register(future_id, driver);
    }

    pub fn device_create_render_pipeline(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        pipeline_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).render_pipeline_descriptor(descriptor_ptr);
        let pipeline = {
            let vertex_module: &wgpu::ShaderModule =
                self.registry.shader_modules.get(decoded.vertex.module);
            let fragment_module = decoded
                .fragment
                .as_ref()
                .map(|f| &**self.registry.shader_modules.get(f.stage.module));
            let layout = decoded
                .layout
                .map(|handle| &**self.registry.pipeline_layouts.get(handle));
            let device = self.registry.devices.get(device_handle);
            build_render_pipeline(device, &decoded, vertex_module, fragment_module, layout)
        };
        self.registry.render_pipelines.insert(pipeline_handle, pipeline);
    }

    pub fn device_create_render_pipeline_async(
        &mut self,
        mem: &dyn GuestMemory,
        device_handle: RawHandle,
        future_id: FutureId,
        pipeline_handle: RawHandle,
        descriptor_ptr: u64,
    ) {
        let decoded = Decoder::new(mem, self.layouts).render_pipeline_descriptor(descriptor_ptr);
        self.registry.render_pipelines.reserve(pipeline_handle);
        let device = Rc::clone(self.registry.devices.get(device_handle));
        let vertex_module = Rc::clone(self.registry.shader_modules.get(decoded.vertex.module));
        let fragment_module = decoded
            .fragment
            .as_ref()
            .map(|f| Rc::clone(self.registry.shader_modules.get(f.stage.module)));
        let layout = decoded
            .layout
            .map(|handle| Rc::clone(self.registry.pipeline_layouts.get(handle)));
        let driver = async move {
            device.push_error_scope(wgpu::ErrorFilter::Validation);
            let pipeline = build_render_pipeline(
                &device,
                &decoded,
                &vertex_module,
                fragment_module.as_deref(),
                layout.as_deref(),
            );
            match device.pop_error_scope().await {
                None => SettledOp::CreateRenderPipeline {
                    handle: pipeline_handle,
                    status: CreatePipelineStatus::Success,
                    pipeline: Some(pipeline),
                    message: String::new(),
                },
                Some(err) => {
                    let (ty, message) = classify(&err);
                    SettledOp::CreateRenderPipeline {
                        handle: pipeline_handle,
                        status: pipeline_status(ty),
                        pipeline: None,
                        message,
                    }
                }
            }
        }
        .boxed_local();
        self.broker.register(future_id, driver);
    }

    pub fn drop_texture(&mut self, handle: RawHandle) {
        self.registry.textures.remove(handle);
    }

    pub fn texture_destroy(&self, handle: RawHandle) {
        self.registry.textures.get(handle).destroy();
    }

    pub fn drop_texture_view(&mut self, handle: RawHandle) {
        self.registry.texture_views.remove(handle);
    }

    pub fn drop_sampler(&mut self, handle: RawHandle) {
        self.registry.samplers.remove(handle);
    }

    pub fn drop_shader_module(&mut self, handle: RawHandle) {
        self.registry.shader_modules.remove(handle);
    }

    pub fn drop_bind_group_layout(&mut self, handle: RawHandle) {
        self.registry.bind_group_layouts.remove(handle);
    }

    pub fn drop_pipeline_layout(&mut self, handle: RawHandle) {
        self.registry.pipeline_layouts.remove(handle);
    }

    pub fn drop_bind_group(&mut self, handle: RawHandle) {
        self.registry.bind_groups.remove(handle);
    }

    pub fn drop_render_pipeline(&mut self, handle: RawHandle) {
        self.registry.render_pipelines.remove(handle);
    }

    pub fn drop_compute_pipeline(&mut self, handle: RawHandle) {
        self.registry.compute_pipelines.remove(handle);
    }

    // ------------------------------------------------------------------
    // Buffer mapping
    // ------------------------------------------------------------------

    pub fn buffer_map_async(
        &mut self,
        buffer_handle: RawHandle,
        future_id: FutureId,
        mode_raw: u32,
        offset: u64,
        size: u64,
    ) {
        let mode = MapMode::from_bits(mode_raw)
            .unwrap_or_else(|| panic!("unknown map mode bits 0x{mode_raw:08x}"));
        assert!(
            mode == MapMode::READ || mode == MapMode::WRITE,
            "map mode must be exactly read or write"
        );

        let (sender, receiver) = oneshot_channel();
        {
            let record = self.registry.buffers.get_mut(buffer_handle);
            record.begin_map(mode);
            let slice = if size == WHOLE_SIZE {
                record.buffer.slice(offset..)
            } else {
                record.buffer.slice(offset..offset + size)
            };
            let wgpu_mode = if mode == MapMode::READ {
                wgpu::MapMode::Read
            } else {
                wgpu::MapMode::Write
            };
            slice.map_async(wgpu_mode, move |result| {
                sender.send(result).ok();
            });
        }

        let driver = async move {
            let (status, message) = match receiver.receive().await {
                Some(Ok(())) => (MapAsyncStatus::Success, String::new()),
                Some(Err(err)) => (MapAsyncStatus::ValidationError, err.to_string()),
                None => (
                    MapAsyncStatus::Unknown,
                    "map settled without a result".to_string(),
                ),
            };
            SettledOp::MapAsync {
                buffer: buffer_handle,
                status,
                message,
            }
        }
        .boxed_local();
        self.broker.register(future_id, driver);
    }

    /// Writable staged range. Returns the guest address, or 0 on failure.
    pub fn buffer_get_mapped_range(
        &mut self,
        mem: &dyn GuestHeap,
        buffer_handle: RawHandle,
        offset: u64,
        size: u64,
    ) -> u64 {
        self.registry
            .buffers
            .get_mut(buffer_handle)
            .stage_mapped_range(mem, offset, size, true)
    }

    /// Read-only staged range. Returns the guest address, or 0 on failure.
    pub fn buffer_get_const_mapped_range(
        &mut self,
        mem: &dyn GuestHeap,
        buffer_handle: RawHandle,
        offset: u64,
        size: u64,
    ) -> u64 {
        self.registry
            .buffers
            .get_mut(buffer_handle)
            .stage_mapped_range(mem, offset, size, false)
    }

    pub fn buffer_unmap(&mut self, mem: &dyn GuestHeap, buffer_handle: RawHandle) {
        self.registry.buffers.get_mut(buffer_handle).unmap(mem);
    }

    pub fn buffer_destroy(&mut self, mem: &dyn GuestHeap, buffer_handle: RawHandle) {
        self.registry.buffers.get_mut(buffer_handle).destroy(mem);
    }

    pub fn buffer_get_size(&self, buffer_handle: RawHandle) -> u64 {
        self.registry.buffers.get(buffer_handle).size()
    }

    pub fn buffer_get_usage(&self, buffer_handle: RawHandle) -> u32 {
        self.registry.buffers.get(buffer_handle).usage().bits()
    }

    pub fn buffer_get_map_state(&self, buffer_handle: RawHandle) -> BufferMapState {
        self.registry.buffers.get(buffer_handle).map_state()
    }

    pub fn drop_buffer(&mut self, mem: &dyn GuestHeap, handle: RawHandle) {
        if let Some(mut record) = self.registry.buffers.remove(handle) {
            record.unmap(mem);
        }
    }

    // ------------------------------------------------------------------
    // Queue
    // ------------------------------------------------------------------

    pub fn queue_write_buffer(
        &self,
        mem: &dyn GuestMemory,
        queue_handle: RawHandle,
        buffer_handle: RawHandle,
        offset: u64,
        data_ptr: u64,
        size: u64,
    ) {
        let data = must(mem.read_bytes(data_ptr, size as usize));
        let queue = self.registry.queues.get(queue_handle);
        let buffer = &self.registry.buffers.get(buffer_handle).buffer;
        queue.write_buffer(buffer, offset, &data);
    }

    /// Submission with no command buffers; flushes pending queue writes.
    pub fn queue_submit(&self, queue_handle: RawHandle) {
        self.registry
            .queues
            .get(queue_handle)
            .submit(std::iter::empty());
    }

    pub fn queue_on_submitted_work_done(&mut self, queue_handle: RawHandle, future_id: FutureId) {
        let (sender, receiver) = oneshot_channel();
        self.registry
            .queues
            .get(queue_handle)
            .on_submitted_work_done(move || {
                sender.send(()).ok();
            });
        let driver = async move {
            let status = match receiver.receive().await {
                Some(()) => QueueWorkDoneStatus::Success,
                None => QueueWorkDoneStatus::Error,
            };
            SettledOp::WorkDone { status }
        }
        .boxed_local();
        self.broker.register(future_id, driver);
    }

    // ------------------------------------------------------------------
    // Shader module introspection
    // ------------------------------------------------------------------

    pub fn shader_module_get_compilation_info(
        &mut self,
        module_handle: RawHandle,
        future_id: FutureId,
    ) {
        let module = Rc::clone(self.registry.shader_modules.get(module_handle));
        let driver = async move {
            let info = module.get_compilation_info().await;
            let messages = info
                .messages
                .iter()
                .map(|msg| CompilationMessage {
                    kind: match msg.message_type {
                        wgpu::CompilationMessageType::Error => abi::CompilationMessageKind::Error,
                        wgpu::CompilationMessageType::Warning => {
                            abi::CompilationMessageKind::Warning
                        }
                        wgpu::CompilationMessageType::Info => abi::CompilationMessageKind::Info,
                    },
                    message: msg.message.clone(),
                    line_number: msg.location.map_or(0, |loc| loc.line_number),
                    line_position: msg.location.map_or(0, |loc| loc.line_position),
                    offset: msg.location.map_or(0, |loc| loc.offset),
                    length: msg.location.map_or(0, |loc| loc.length),
                })
                .collect();
            SettledOp::CompilationInfo { messages }
        }
        .boxed_local();
        self.broker.register(future_id, driver);
    }

    // ------------------------------------------------------------------
    // Event delivery
    // ------------------------------------------------------------------

    /// Dispatches every settled-but-undelivered completion, in settlement
    /// order, then drains queued uncaptured errors.
    pub fn process_events(&mut self) {
        self.broker.poll_sources();
        while let Some(settlement) = self.broker.pop_ready() {
            self.deliver(settlement);
            self.broker.poll_sources();
        }
        for err in self.errors.drain() {
            self.sink.uncaptured_error(err.device, err.ty, &err.message);
        }
    }

    /// Races the listed futures (and an optional timeout). Dispatches and
    /// removes only the winner; on timeout every id stays registered and the
    /// null id is returned. An id that is not registered is already complete
    /// and is returned as-is.
    pub async fn wait_any(&mut self, ids: &[FutureId], timeout: Option<Duration>) -> FutureId {
        for &id in ids {
            if !id.is_null() && !self.broker.is_pending(id) {
                return id;
            }
        }

        let mut timer: LocalBoxFuture<'static, ()> = match timeout {
            Some(duration) => self.timer.delay(duration),
            None => future::pending().boxed_local(),
        };

        loop {
            self.broker.poll_sources();
            if let Some(id) = self.broker.first_ready_of(ids) {
                if let Some(settlement) = self.broker.take_ready(id) {
                    self.deliver(settlement);
                }
                return id;
            }
            match future::select(self.broker.sources.next(), &mut timer).await {
                Either::Left((Some(settlement), _)) => self.broker.absorb(settlement),
                Either::Left((None, _)) => {
                    (&mut timer).await;
                    return FutureId::NULL;
                }
                Either::Right(((), _)) => return FutureId::NULL,
            }
        }
    }

    fn deliver(&mut self, settlement: Settlement) {
        let Settlement { future, op } = settlement;
        match op {
            SettledOp::RequestAdapter { handle, adapter } => match adapter {
                Some(adapter) => {
                    self.registry.adapters.bind(handle, Rc::new(adapter));
                    self.sink.request_adapter_completed(
                        future,
                        RequestAdapterStatus::Success,
                        handle,
                        "",
                    );
                }
                None => self.sink.request_adapter_completed(
                    future,
                    RequestAdapterStatus::Unavailable,
                    NULL_HANDLE,
                    "no suitable adapter found",
                ),
            },
            SettledOp::RequestDevice {
                device_handle,
                queue_handle,
                lost_future,
                result,
            } => match result {
                Ok((device, queue)) => {
                    let device = Rc::new(device);
                    device.on_uncaptured_error(Box::new(self.errors.handler_for(device_handle)));
                    if !lost_future.is_null() {
                        let (sender, receiver) = oneshot_channel();
                        device.set_device_lost_callback(move |reason, message| {
                            sender.send((reason, message)).ok();
                        });
                        let driver = async move {
                            let (reason, message) = receiver
                                .receive()
                                .await
                                .unwrap_or((wgpu::DeviceLostReason::Unknown, String::new()));
                            SettledOp::DeviceLost {
                                device: device_handle,
                                reason: lost_reason(reason),
                                message,
                            }
                        }
                        .boxed_local();
                        self.broker.register(lost_future, driver);
                    }
                    self.registry.devices.bind(device_handle, device);
                    self.registry.queues.bind(queue_handle, queue);
                    self.sink.request_device_completed(
                        future,
                        RequestDeviceStatus::Success,
                        device_handle,
                        "",
                    );
                }
                Err(message) => {
                    self.sink.request_device_completed(
                        future,
                        RequestDeviceStatus::Error,
                        NULL_HANDLE,
                        &message,
                    );
                    if !lost_future.is_null() {
                        self.sink.device_lost(
                            lost_future,
                            DeviceLostReason::FailedCreation,
                            &message,
                        );
                    }
                }
            },
            SettledOp::MapAsync {
                buffer,
                status,
                message,
            } => {
                if self.registry.buffers.contains(buffer) {
                    self.registry
                        .buffers
                        .get_mut(buffer)
                        .resolve_map(status == MapAsyncStatus::Success);
                }
                self.sink.buffer_map_completed(future, status, &message);
            }
            SettledOp::WorkDone { status } => {
                self.sink.queue_work_done_completed(future, status);
            }
            SettledOp::PopErrorScope { ty, message } => {
                self.sink.pop_error_scope_completed(future, ty, &message);
            }
            SettledOp::CompilationInfo { messages } => {
                self.sink.compilation_info_completed(future, &messages);
            }
            SettledOp::CreateComputePipeline {
                handle,
                status,
                pipeline,
                message,
            } => match pipeline {
                Some(pipeline) => {
                    self.registry.compute_pipelines.bind(handle, pipeline);
                    self.sink
                        .create_compute_pipeline_completed(future, status, handle, &message);
                }
                None => self.sink.create_compute_pipeline_completed(
                    future,
                    status,
                    NULL_HANDLE,
                    &message,
                ),
            },
            SettledOp::CreateRenderPipeline {
                handle,
                status,
                pipeline,
                message,
            } => match pipeline {
                Some(pipeline) => {
                    self.registry.render_pipelines.bind(handle, pipeline);
                    self.sink
                        .create_render_pipeline_completed(future, status, handle, &message);
                }
                None => self.sink.create_render_pipeline_completed(
                    future,
                    status,
                    NULL_HANDLE,
                    &message,
                ),
            },
            SettledOp::DeviceLost {
                device,
                reason,
                message,
            } => {
                // The device is gone; stop routing uncaptured errors to it.
                if self.registry.devices.contains(device) {
                    self.registry
                        .devices
                        .get(device)
                        .on_uncaptured_error(Box::new(|_err: wgpu::Error| {}));
                }
                self.sink.device_lost(future, reason, &message);
            }
        }
    }
}

fn pipeline_status(ty: ErrorType) -> CreatePipelineStatus {
    match ty {
        ErrorType::Internal => CreatePipelineStatus::InternalError,
        ErrorType::OutOfMemory | ErrorType::Validation => CreatePipelineStatus::ValidationError,
        _ => CreatePipelineStatus::Unknown,
    }
}

fn build_render_pipeline(
    device: &wgpu::Device,
    decoded: &DecodedRenderPipeline,
    vertex_module: &wgpu::ShaderModule,
    fragment_module: Option<&wgpu::ShaderModule>,
    layout: Option<&wgpu::PipelineLayout>,
) -> wgpu::RenderPipeline {
    let vertex_constants: HashMap<String, f64> =
        decoded.vertex.constants.iter().cloned().collect();
    let fragment_constants: HashMap<String, f64> = decoded
        .fragment
        .as_ref()
        .map(|f| f.stage.constants.iter().cloned().collect())
        .unwrap_or_default();

    let buffers: Vec<wgpu::VertexBufferLayout> = decoded
        .vertex_buffers
        .iter()
        .map(|vb| wgpu::VertexBufferLayout {
            array_stride: vb.array_stride,
            step_mode: vb.step_mode,
            attributes: &vb.attributes,
        })
        .collect();

    let fragment = match (&decoded.fragment, fragment_module) {
        (Some(f), Some(module)) => Some(wgpu::FragmentState {
            module,
            entry_point: &f.stage.entry_point,
            compilation_options: wgpu::PipelineCompilationOptions {
                constants: &fragment_constants,
                ..Default::default()
            },
            targets: &f.targets,
        }),
        (None, _) => None,
        (Some(_), None) => panic!("fragment stage requires a shader module handle"),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: decoded.label.as_deref(),
        layout,
        vertex: wgpu::VertexState {
            module: vertex_module,
            entry_point: &decoded.vertex.entry_point,
            compilation_options: wgpu::PipelineCompilationOptions {
                constants: &vertex_constants,
                ..Default::default()
            },
            buffers: &buffers,
        },
        primitive: decoded.primitive,
        depth_stencil: decoded.depth_stencil.clone(),
        multisample: decoded.multisample,
        fragment,
        multiview: None,
    })
}
