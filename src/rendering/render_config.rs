use bytemuck::{Pod, Zeroable};

use crate::rendering::scene::{MarkerInstance, TrailVertex};

// Uniform shared by both pipelines
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ViewUniform {
    pub view_projection: [f32; 16],
}

const MARKER_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32, 2 => Float32x4];
const TRAIL_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

// Configuration for rendering and shaders
pub struct RenderConfig {
    pub surface_format: wgpu::TextureFormat,
    pub marker_pipeline: wgpu::RenderPipeline,
    pub trail_pipeline: wgpu::RenderPipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl RenderConfig {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        // Load shader
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Playback Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shader.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Playback Bind Group Layout"),
            entries: &[
                // view
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Playback Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Markers and label tags: one instanced quad each, cut to a circle
        let marker_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader_module,
            surface_format,
            "Marker Render Pipeline",
            ("marker_vertex", "marker_fragment"),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &MARKER_ATTRIBUTES,
            },
            wgpu::PrimitiveTopology::TriangleList,
        );

        // Trails: one line strip per body
        let trail_pipeline = Self::create_pipeline(
            device,
            &pipeline_layout,
            &shader_module,
            surface_format,
            "Trail Render Pipeline",
            ("trail_vertex", "trail_fragment"),
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<TrailVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &TRAIL_ATTRIBUTES,
            },
            wgpu::PrimitiveTopology::LineStrip,
        );

        Self {
            surface_format,
            marker_pipeline,
            trail_pipeline,
            bind_group_layout,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader_module: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        label: &str,
        (vertex_entry, fragment_entry): (&str, &str),
        buffer: wgpu::VertexBufferLayout<'_>,
        topology: wgpu::PrimitiveTopology,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader_module,
                entry_point: Some(vertex_entry),
                buffers: &[buffer],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader_module,
                entry_point: Some(fragment_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    // Draw into the sRGB view of the surface
                    format: surface_format.add_srgb_suffix(),
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    pub fn create_bind_group(
        &self,
        device: &wgpu::Device,
        view_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Playback Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_buffer.as_entire_binding(),
            }],
        })
    }
}
