//! Shader modules, compilation info, and asynchronous pipeline creation.

mod common;

use common::{
    boot, write_compute_pipeline_descriptor, write_shader_module_wgsl, SinkEvent, DEVICE,
};

use strato_webgpu::abi::{CreatePipelineStatus, FutureId, LAYOUTS};
use strato_webgpu::{GuestMemory, GuestMemoryExt};

const MODULE: u32 = 40;
const PIPELINE: u32 = 41;

const COMPUTE_WGSL: &str = "@compute @workgroup_size(1) fn main() {}";

fn create_module(h: &mut common::Harness, wgsl: &str) {
    write_shader_module_wgsl(&h.mem, 0x100, 0x140, 0x180, wgsl);
    h.bridge
        .device_create_shader_module(&h.mem, DEVICE, MODULE, 0x100);
}

#[test]
fn compute_pipeline_async_binds_the_reserved_handle() {
    let Some(mut h) = boot("compute_pipeline_async_binds_the_reserved_handle") else {
        return;
    };
    create_module(&mut h, COMPUTE_WGSL);

    write_compute_pipeline_descriptor(&h.mem, 0x400, MODULE, 0x500, "main");
    let future = FutureId(600);
    h.bridge
        .device_create_compute_pipeline_async(&h.mem, DEVICE, future, PIPELINE, 0x400);
    h.bridge.device_poll(DEVICE, true);
    let winner = pollster::block_on(h.bridge.wait_any(&[future], None));
    assert_eq!(winner, future);

    assert_eq!(
        h.take_events(),
        vec![SinkEvent::ComputePipeline {
            future,
            status: CreatePipelineStatus::Success,
            pipeline: PIPELINE,
            message: String::new(),
        }]
    );
    // The handle is live and can be released by native code.
    h.bridge.drop_compute_pipeline(PIPELINE);
    // Only the device-lost future from boot remains.
    assert_eq!(h.bridge.outstanding_operations(), 1);
}

#[test]
fn compute_pipeline_async_with_bad_entry_point_reports_validation() {
    let Some(mut h) = boot("compute_pipeline_async_with_bad_entry_point_reports_validation")
    else {
        return;
    };
    create_module(&mut h, COMPUTE_WGSL);

    write_compute_pipeline_descriptor(&h.mem, 0x400, MODULE, 0x500, "not_an_entry_point");
    let future = FutureId(601);
    h.bridge
        .device_create_compute_pipeline_async(&h.mem, DEVICE, future, PIPELINE, 0x400);
    h.bridge.device_poll(DEVICE, true);
    pollster::block_on(h.bridge.wait_any(&[future], None));

    let events = h.take_events();
    let SinkEvent::ComputePipeline {
        status,
        pipeline,
        message,
        ..
    } = &events[0]
    else {
        panic!("expected a compute pipeline completion, got {events:?}");
    };
    assert_eq!(*status, CreatePipelineStatus::ValidationError);
    assert_eq!(*pipeline, 0);
    assert!(!message.is_empty());

    // The reservation never bound; releasing it is still legal.
    h.bridge.drop_compute_pipeline(PIPELINE);
}

#[test]
fn compilation_info_settles_for_a_clean_module() {
    let Some(mut h) = boot("compilation_info_settles_for_a_clean_module") else {
        return;
    };
    create_module(&mut h, COMPUTE_WGSL);

    let future = FutureId(602);
    h.bridge.shader_module_get_compilation_info(MODULE, future);
    h.bridge.device_poll(DEVICE, true);
    let winner = pollster::block_on(h.bridge.wait_any(&[future], None));
    assert_eq!(winner, future);

    let events = h.take_events();
    assert!(
        matches!(&events[..], [SinkEvent::CompilationInfo { future: f, .. }] if *f == future),
        "expected compilation info, got {events:?}"
    );
    assert_eq!(h.bridge.outstanding_operations(), 1);
}

#[test]
fn render_pipeline_descriptor_decodes_through_the_full_layout() {
    let Some(mut h) = boot("render_pipeline_descriptor_decodes_through_the_full_layout") else {
        return;
    };

    let wgsl = "\
        struct VSIn { @location(0) pos: vec2<f32> };\n\
        @vertex fn vs_main(in: VSIn) -> @builtin(position) vec4<f32> {\n\
            return vec4<f32>(in.pos, 0.0, 1.0);\n\
        }\n\
        @fragment fn fs_main() -> @location(0) vec4<f32> {\n\
            return vec4<f32>(1.0, 0.0, 0.0, 1.0);\n\
        }";
    create_module(&mut h, wgsl);

    let mem = &h.mem;
    let desc = 0x1000u64;
    let fragment = 0x1100u64;
    let targets = 0x1140u64;
    let vbuf = 0x1180u64;
    let attrs = 0x11C0u64;
    let vs_entry = 0x1200u64;
    let fs_entry = 0x1240u64;

    mem.write(vs_entry, b"vs_main").unwrap();
    mem.write(fs_entry, b"fs_main").unwrap();

    let l = &LAYOUTS.render_pipeline_descriptor;
    mem.write_u32(desc, 0).unwrap();
    mem.write_u32(desc + u64::from(l.label.ptr), 0).unwrap();
    mem.write_u32(desc + u64::from(l.label.len), 0).unwrap();
    mem.write_u32(desc + u64::from(l.layout), 0).unwrap();
    mem.write_u32(desc + u64::from(l.vertex_module), MODULE).unwrap();
    mem.write_u32(desc + u64::from(l.vertex_entry_point.ptr), vs_entry as u32)
        .unwrap();
    mem.write_u32(desc + u64::from(l.vertex_entry_point.len), 7).unwrap();
    mem.write_u32(desc + u64::from(l.vertex_constant_count), 0).unwrap();
    mem.write_u32(desc + u64::from(l.vertex_constants), 0).unwrap();
    mem.write_u32(desc + u64::from(l.vertex_buffer_count), 1).unwrap();
    mem.write_u32(desc + u64::from(l.vertex_buffers), vbuf as u32).unwrap();
    mem.write_u32(
        desc + u64::from(l.primitive_topology),
        strato_webgpu::abi::PrimitiveTopology::TriangleList as u32,
    )
    .unwrap();
    mem.write_u32(desc + u64::from(l.primitive_strip_index_format), 0).unwrap();
    mem.write_u32(desc + u64::from(l.primitive_front_face), 0).unwrap();
    mem.write_u32(desc + u64::from(l.primitive_cull_mode), 0).unwrap();
    mem.write_u32(desc + u64::from(l.primitive_unclipped_depth), 0).unwrap();
    mem.write_u32(desc + u64::from(l.depth_stencil), 0).unwrap();
    mem.write_u32(desc + u64::from(l.multisample_count), 1).unwrap();
    mem.write_u32(desc + u64::from(l.multisample_mask), 0xFFFF_FFFF).unwrap();
    mem.write_u32(desc + u64::from(l.multisample_alpha_to_coverage), 0).unwrap();
    mem.write_u32(desc + u64::from(l.fragment), fragment as u32).unwrap();

    let vl = &LAYOUTS.vertex_buffer_layout;
    mem.write_u64(vbuf + u64::from(vl.array_stride), 8).unwrap();
    mem.write_u32(
        vbuf + u64::from(vl.step_mode),
        strato_webgpu::abi::VertexStepMode::Vertex as u32,
    )
    .unwrap();
    mem.write_u32(vbuf + u64::from(vl.attribute_count), 1).unwrap();
    mem.write_u32(vbuf + u64::from(vl.attributes), attrs as u32).unwrap();

    let al = &LAYOUTS.vertex_attribute;
    mem.write_u32(
        attrs + u64::from(al.format),
        strato_webgpu::abi::VertexFormat::Float32x2 as u32,
    )
    .unwrap();
    mem.write_u32(attrs + u64::from(al.shader_location), 0).unwrap();
    mem.write_u64(attrs + u64::from(al.offset), 0).unwrap();

    let fl = &LAYOUTS.fragment_state;
    mem.write_u32(fragment + u64::from(fl.module), MODULE).unwrap();
    mem.write_u32(fragment + u64::from(fl.entry_point.ptr), fs_entry as u32)
        .unwrap();
    mem.write_u32(fragment + u64::from(fl.entry_point.len), 7).unwrap();
    mem.write_u32(fragment + u64::from(fl.constant_count), 0).unwrap();
    mem.write_u32(fragment + u64::from(fl.constants), 0).unwrap();
    mem.write_u32(fragment + u64::from(fl.target_count), 1).unwrap();
    mem.write_u32(fragment + u64::from(fl.targets), targets as u32).unwrap();

    let tl = &LAYOUTS.color_target_state;
    mem.write_u32(
        targets + u64::from(tl.format),
        strato_webgpu::abi::TextureFormat::Rgba8Unorm as u32,
    )
    .unwrap();
    mem.write_u32(targets + u64::from(tl.blend), 0).unwrap();
    mem.write_u32(targets + u64::from(tl.write_mask), 0xF).unwrap();

    let future = FutureId(603);
    h.bridge
        .device_create_render_pipeline_async(&h.mem, DEVICE, future, PIPELINE, desc);
    h.bridge.device_poll(DEVICE, true);
    pollster::block_on(h.bridge.wait_any(&[future], None));

    assert_eq!(
        h.take_events(),
        vec![SinkEvent::RenderPipeline {
            future,
            status: CreatePipelineStatus::Success,
            pipeline: PIPELINE,
            message: String::new(),
        }]
    );
    h.bridge.drop_render_pipeline(PIPELINE);
    h.bridge.drop_shader_module(MODULE);
}
