//! WGSL sources and the Pod uniform structs that mirror their uniform
//! blocks. Positions and colors ride in vec4 slots to keep the WGSL and
//! Rust layouts trivially identical.

use bytemuck::{Pod, Zeroable};

/// Single combined model-view-projection matrix.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct MvpUniform {
    pub mvp: [[f32; 4]; 4],
}

/// Uniform block for the Phong-lit scene. `model` is kept separate from
/// `view_proj` because lighting works on world-space positions and
/// normals. Vec3 quantities occupy the xyz of a vec4 slot.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct PhongUniform {
    pub model: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub light_color: [f32; 4],
    pub light_pos: [f32; 4],
    pub view_pos: [f32; 4],
}

/// Pass-through colored vertices, positions already in clip space.
pub const FLAT_COLOR_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Colored vertices through a model-view-projection transform.
pub const MVP_COLOR_SHADER: &str = r#"
struct Uniforms {
    mvp: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.mvp * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

/// Textured vertices through a model-view-projection transform. The
/// texture and sampler live in group 1 so the matrix uniform can be
/// shared with the other pipelines.
pub const TEXTURE_SHADER: &str = r#"
struct Uniforms {
    mvp: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var t_diffuse: texture_2d<f32>;
@group(1) @binding(1)
var s_diffuse: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.mvp * vec4<f32>(vertex.position, 1.0);
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(t_diffuse, s_diffuse, in.uv);
}
"#;

/// Phong shading: ambient + diffuse + specular in world space.
pub const PHONG_SHADER: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view_proj: mat4x4<f32>,
    object_color: vec4<f32>,
    light_color: vec4<f32>,
    light_pos: vec4<f32>,
    view_pos: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world_pos = uniforms.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_pos = world_pos.xyz;
    out.world_normal = (uniforms.model * vec4<f32>(vertex.normal, 0.0)).xyz;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let ambient_strength = 0.1;
    let specular_strength = 0.8;
    let shininess = 16.0;

    let normal = normalize(in.world_normal);
    let light_dir = normalize(uniforms.light_pos.xyz - in.world_pos);
    let view_dir = normalize(uniforms.view_pos.xyz - in.world_pos);
    let reflect_dir = reflect(-light_dir, normal);

    let ambient = ambient_strength * uniforms.light_color.rgb;
    let diffuse = max(dot(normal, light_dir), 0.0) * uniforms.light_color.rgb;
    let specular = specular_strength
        * pow(max(dot(view_dir, reflect_dir), 0.0), shininess)
        * uniforms.light_color.rgb;

    let phong = (ambient + diffuse + specular) * uniforms.object_color.rgb;
    return vec4<f32>(phong, 1.0);
}
"#;

/// Solid white marker cube at the light position.
pub const LAMP_SHADER: &str = r#"
struct Uniforms {
    mvp: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) normal: vec3<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.mvp * vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 1.0, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_wgsl;

    #[test]
    fn every_embedded_shader_validates() {
        for (stage, source) in [
            ("flat_color", FLAT_COLOR_SHADER),
            ("mvp_color", MVP_COLOR_SHADER),
            ("texture", TEXTURE_SHADER),
            ("phong", PHONG_SHADER),
            ("lamp", LAMP_SHADER),
        ] {
            if let Err(e) = validate_wgsl(stage, source) {
                panic!("{e}");
            }
        }
    }

    #[test]
    fn uniform_structs_have_std140_friendly_sizes() {
        assert_eq!(std::mem::size_of::<MvpUniform>(), 64);
        assert_eq!(std::mem::size_of::<PhongUniform>(), 192);
        assert_eq!(std::mem::size_of::<PhongUniform>() % 16, 0);
    }
}
