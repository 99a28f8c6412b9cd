use crate::GpuVertex;
use wgpu::util::DeviceExt;

/// A static mesh on the GPU: vertex buffer plus optional u16 index buffer.
/// Buffers are immutable after upload and freed when the mesh drops.
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index: Option<(wgpu::Buffer, u32)>,
    vertex_count: u32,
}

impl Mesh {
    pub fn upload<V: GpuVertex>(
        device: &wgpu::Device,
        label: &str,
        vertices: &[V],
        indices: Option<&[u16]>,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index = indices.map(|indices| {
            let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
            (buffer, indices.len() as u32)
        });

        Self {
            vertex_buffer,
            index,
            vertex_count: vertices.len() as u32,
        }
    }

    /// Bind the buffers and issue the draw call, indexed when an index
    /// buffer was uploaded.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        match &self.index {
            Some((buffer, count)) => {
                pass.set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint16);
                pass.draw_indexed(0..*count, 0, 0..1);
            }
            None => pass.draw(0..self.vertex_count, 0..1),
        }
    }
}
