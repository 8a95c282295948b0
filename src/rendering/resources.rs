use bytemuck::Pod;
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::rendering::render_config::{RenderConfig, ViewUniform};
use crate::rendering::scene::{MarkerInstance, TrailVertex};

// A vertex buffer that is rewritten every frame and grows when it runs out
pub(crate) struct DynamicBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl DynamicBuffer {
    // Never allocate a zero-sized buffer
    const MIN_CAPACITY: usize = 64;

    fn new<T: Pod>(device: &wgpu::Device, label: &'static str) -> Self {
        Self {
            label,
            buffer: Self::allocate::<T>(device, label, Self::MIN_CAPACITY),
            capacity: Self::MIN_CAPACITY,
            len: 0,
        }
    }

    fn allocate<T: Pod>(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<T>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn write<T: Pod>(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, items: &[T]) {
        self.len = items.len() as u32;
        if items.is_empty() {
            return;
        }
        if items.len() > self.capacity {
            self.capacity = items.len().next_power_of_two();
            self.buffer = Self::allocate::<T>(device, self.label, self.capacity);
        }
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(items));
    }

    pub(crate) fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub(crate) fn len(&self) -> u32 {
        self.len
    }
}

// GPU buffers for one window
pub(crate) struct SceneResources {
    pub(crate) view_buffer: wgpu::Buffer,
    pub(crate) bind_group: wgpu::BindGroup,
    pub(crate) markers: DynamicBuffer,
    pub(crate) trails: DynamicBuffer,
}

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device, render_config: &RenderConfig) -> Self {
        let view_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("View Buffer"),
            contents: bytemuck::cast_slice(&[ViewUniform {
                view_projection: Mat4::IDENTITY.to_cols_array(),
            }]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = render_config.create_bind_group(device, &view_buffer);

        Self {
            view_buffer,
            bind_group,
            markers: DynamicBuffer::new::<MarkerInstance>(device, "Marker Instance Buffer"),
            trails: DynamicBuffer::new::<TrailVertex>(device, "Trail Vertex Buffer"),
        }
    }

    pub(crate) fn update_view(&self, queue: &wgpu::Queue, view_projection: Mat4) {
        let uniform = ViewUniform {
            view_projection: view_projection.to_cols_array(),
        };
        queue.write_buffer(&self.view_buffer, 0, bytemuck::cast_slice(&[uniform]));
    }

    pub(crate) fn update_markers(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[MarkerInstance],
    ) {
        self.markers.write(device, queue, instances);
    }

    pub(crate) fn update_trails(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        vertices: &[TrailVertex],
    ) {
        self.trails.write(device, queue, vertices);
    }
}
