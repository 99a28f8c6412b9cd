use bytemuck::Pod;
use prism_assets::{ColorVertex, NormalVertex, UvVertex};

/// A CPU vertex type with a matching GPU buffer layout. Pipelines are
/// parameterized over this instead of hard-coding attribute tables.
pub trait GpuVertex: Pod {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: Self::ATTRIBUTES,
        }
    }
}

impl GpuVertex for ColorVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x4];
}

impl GpuVertex for UvVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];
}

impl GpuVertex for NormalVertex {
    const ATTRIBUTES: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute_span(attributes: &[wgpu::VertexAttribute]) -> u64 {
        attributes
            .iter()
            .map(|a| a.offset + a.format.size())
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn strides_match_struct_sizes() {
        assert_eq!(
            ColorVertex::layout().array_stride,
            std::mem::size_of::<ColorVertex>() as u64
        );
        assert_eq!(
            UvVertex::layout().array_stride,
            std::mem::size_of::<UvVertex>() as u64
        );
        assert_eq!(
            NormalVertex::layout().array_stride,
            std::mem::size_of::<NormalVertex>() as u64
        );
    }

    #[test]
    fn attributes_fill_the_stride_exactly() {
        assert_eq!(
            attribute_span(ColorVertex::ATTRIBUTES),
            ColorVertex::layout().array_stride
        );
        assert_eq!(
            attribute_span(UvVertex::ATTRIBUTES),
            UvVertex::layout().array_stride
        );
        assert_eq!(
            attribute_span(NormalVertex::ATTRIBUTES),
            NormalVertex::layout().array_stride
        );
    }

    #[test]
    fn shader_locations_are_sequential() {
        for attributes in [
            ColorVertex::ATTRIBUTES,
            UvVertex::ATTRIBUTES,
            NormalVertex::ATTRIBUTES,
        ] {
            for (i, attribute) in attributes.iter().enumerate() {
                assert_eq!(attribute.shader_location, i as u32);
            }
        }
    }
}
