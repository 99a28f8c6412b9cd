//! Procedural meshes for the scene progression. Generators return plain
//! CPU-side vertex/index vectors; upload is the render crate's job.

use bytemuck::{Pod, Zeroable};

/// Position + RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Position + texture coordinate.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct UvVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Position + normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct NormalVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Two flat triangles sharing an edge, one color per corner. The first
/// scene of the progression: no transforms, positions already in clip
/// space.
pub fn colored_triangles() -> (Vec<ColorVertex>, Vec<u16>) {
    let vertices = vec![
        ColorVertex {
            position: [-0.8, -0.6, 0.0],
            color: [1.0, 0.0, 0.0, 1.0],
        },
        ColorVertex {
            position: [0.0, 0.8, 0.0],
            color: [0.0, 1.0, 0.0, 1.0],
        },
        ColorVertex {
            position: [0.8, -0.6, 0.0],
            color: [0.0, 0.0, 1.0, 1.0],
        },
        ColorVertex {
            position: [0.0, -0.9, 0.0],
            color: [1.0, 1.0, 0.0, 1.0],
        },
    ];
    let indices = vec![0, 1, 2, 0, 2, 3];
    (vertices, indices)
}

/// Square-based pyramid, indexed, one color per vertex. The transform and
/// fly-camera scenes both draw this.
pub fn pyramid() -> (Vec<ColorVertex>, Vec<u16>) {
    let vertices = vec![
        // Base corners
        ColorVertex {
            position: [-0.5, -0.5, -0.5],
            color: [1.0, 0.0, 0.0, 1.0],
        },
        ColorVertex {
            position: [0.5, -0.5, -0.5],
            color: [0.0, 1.0, 0.0, 1.0],
        },
        ColorVertex {
            position: [0.5, -0.5, 0.5],
            color: [0.0, 0.0, 1.0, 1.0],
        },
        ColorVertex {
            position: [-0.5, -0.5, 0.5],
            color: [1.0, 0.0, 1.0, 1.0],
        },
        // Apex
        ColorVertex {
            position: [0.0, 0.5, 0.0],
            color: [1.0, 1.0, 0.0, 1.0],
        },
    ];
    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,  2, 3, 0, // base
        0, 1, 4,           // sides
        1, 2, 4,
        2, 3, 4,
        3, 0, 4,
    ];
    (vertices, indices)
}

/// Axis-aligned cuboid with per-face texture coordinates, non-indexed
/// (36 vertices). Extents are half sizes along each axis.
pub fn textured_cuboid(hx: f32, hy: f32, hz: f32) -> Vec<UvVertex> {
    // Each face: four corners counter-clockwise from bottom-left, UVs
    // covering the full texture.
    let faces: [[[f32; 3]; 4]; 6] = [
        // +Z
        [[-hx, -hy, hz], [hx, -hy, hz], [hx, hy, hz], [-hx, hy, hz]],
        // -Z
        [[hx, -hy, -hz], [-hx, -hy, -hz], [-hx, hy, -hz], [hx, hy, -hz]],
        // +X
        [[hx, -hy, hz], [hx, -hy, -hz], [hx, hy, -hz], [hx, hy, hz]],
        // -X
        [[-hx, -hy, -hz], [-hx, -hy, hz], [-hx, hy, hz], [-hx, hy, -hz]],
        // +Y
        [[-hx, hy, hz], [hx, hy, hz], [hx, hy, -hz], [-hx, hy, -hz]],
        // -Y
        [[-hx, -hy, -hz], [hx, -hy, -hz], [hx, -hy, hz], [-hx, -hy, hz]],
    ];
    let corner_uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

    let mut vertices = Vec::with_capacity(36);
    for face in &faces {
        for &corner in &[0usize, 1, 2, 2, 3, 0] {
            vertices.push(UvVertex {
                position: face[corner],
                uv: corner_uvs[corner],
            });
        }
    }
    vertices
}

/// Flat square ground plane in XZ at the given height, indexed. UVs run
/// 0..`uv_repeat` so a repeating sampler tiles the texture across it.
pub fn ground_plane(half_extent: f32, height: f32, uv_repeat: f32) -> (Vec<UvVertex>, Vec<u16>) {
    let e = half_extent;
    let r = uv_repeat;
    #[rustfmt::skip]
    let vertices = vec![
        UvVertex { position: [-e, height,  e], uv: [0.0, 0.0] },
        UvVertex { position: [ e, height,  e], uv: [r, 0.0] },
        UvVertex { position: [ e, height, -e], uv: [r, r] },
        UvVertex { position: [-e, height, -e], uv: [0.0, r] },
    ];
    let indices = vec![0, 1, 2, 2, 3, 0];
    (vertices, indices)
}

/// Unit cube with face normals, indexed: 24 vertices, 36 indices. The
/// lighting scene draws it twice, once Phong-shaded and once as the lamp.
pub fn lit_cube() -> (Vec<NormalVertex>, Vec<u16>) {
    let p = 0.5_f32;
    #[rustfmt::skip]
    let vertices = vec![
        // +Z face
        NormalVertex { position: [-p, -p,  p], normal: [0.0, 0.0, 1.0] },
        NormalVertex { position: [ p, -p,  p], normal: [0.0, 0.0, 1.0] },
        NormalVertex { position: [ p,  p,  p], normal: [0.0, 0.0, 1.0] },
        NormalVertex { position: [-p,  p,  p], normal: [0.0, 0.0, 1.0] },
        // -Z face
        NormalVertex { position: [ p, -p, -p], normal: [0.0, 0.0, -1.0] },
        NormalVertex { position: [-p, -p, -p], normal: [0.0, 0.0, -1.0] },
        NormalVertex { position: [-p,  p, -p], normal: [0.0, 0.0, -1.0] },
        NormalVertex { position: [ p,  p, -p], normal: [0.0, 0.0, -1.0] },
        // +X face
        NormalVertex { position: [ p, -p,  p], normal: [1.0, 0.0, 0.0] },
        NormalVertex { position: [ p, -p, -p], normal: [1.0, 0.0, 0.0] },
        NormalVertex { position: [ p,  p, -p], normal: [1.0, 0.0, 0.0] },
        NormalVertex { position: [ p,  p,  p], normal: [1.0, 0.0, 0.0] },
        // -X face
        NormalVertex { position: [-p, -p, -p], normal: [-1.0, 0.0, 0.0] },
        NormalVertex { position: [-p, -p,  p], normal: [-1.0, 0.0, 0.0] },
        NormalVertex { position: [-p,  p,  p], normal: [-1.0, 0.0, 0.0] },
        NormalVertex { position: [-p,  p, -p], normal: [-1.0, 0.0, 0.0] },
        // +Y face
        NormalVertex { position: [-p,  p,  p], normal: [0.0, 1.0, 0.0] },
        NormalVertex { position: [ p,  p,  p], normal: [0.0, 1.0, 0.0] },
        NormalVertex { position: [ p,  p, -p], normal: [0.0, 1.0, 0.0] },
        NormalVertex { position: [-p,  p, -p], normal: [0.0, 1.0, 0.0] },
        // -Y face
        NormalVertex { position: [-p, -p, -p], normal: [0.0, -1.0, 0.0] },
        NormalVertex { position: [ p, -p, -p], normal: [0.0, -1.0, 0.0] },
        NormalVertex { position: [ p, -p,  p], normal: [0.0, -1.0, 0.0] },
        NormalVertex { position: [-p, -p,  p], normal: [0.0, -1.0, 0.0] },
    ];
    #[rustfmt::skip]
    let indices: Vec<u16> = vec![
        0,1,2, 2,3,0,       // +Z
        4,5,6, 6,7,4,       // -Z
        8,9,10, 10,11,8,    // +X
        12,13,14, 14,15,12, // -X
        16,17,18, 18,19,16, // +Y
        20,21,22, 22,23,20, // -Y
    ];
    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_structs_are_tightly_packed() {
        assert_eq!(std::mem::size_of::<ColorVertex>(), 28);
        assert_eq!(std::mem::size_of::<UvVertex>(), 20);
        assert_eq!(std::mem::size_of::<NormalVertex>(), 24);
    }

    #[test]
    fn colored_triangles_index_in_range() {
        let (vertices, indices) = colored_triangles();
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn pyramid_has_six_faces() {
        let (vertices, indices) = pyramid();
        assert_eq!(vertices.len(), 5);
        assert_eq!(indices.len(), 18);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn textured_cuboid_covers_six_faces() {
        let vertices = textured_cuboid(0.25, 0.5, 0.25);
        assert_eq!(vertices.len(), 36);
        assert!(
            vertices
                .iter()
                .all(|v| v.uv[0] >= 0.0 && v.uv[0] <= 1.0 && v.uv[1] >= 0.0 && v.uv[1] <= 1.0)
        );
        assert!(vertices.iter().all(|v| v.position[0].abs() == 0.25));
    }

    #[test]
    fn ground_plane_sits_flat_and_tiles() {
        let (vertices, indices) = ground_plane(5.0, -0.25, 5.0);
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 6);
        assert!(vertices.iter().all(|v| v.position[1] == -0.25));
        assert!(vertices.iter().any(|v| v.uv == [5.0, 5.0]));
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn lit_cube_normals_are_unit_axis_vectors() {
        let (vertices, indices) = lit_cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        for v in &vertices {
            let n = v.normal;
            let len_sq = n[0] * n[0] + n[1] * n[1] + n[2] * n[2];
            assert_eq!(len_sq, 1.0);
        }
    }
}
