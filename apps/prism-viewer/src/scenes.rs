//! The scene progression: each stage is one scene built from the
//! shared mesh/shader/texture helpers. Scenes own their GPU resources for
//! the whole run and draw into a pass the frame loop opens.

use anyhow::Result;
use glam::{Mat4, Vec3};
use prism_assets::{
    TextureData, colored_triangles, ground_plane, lit_cube, pyramid, textured_cuboid,
};
use prism_camera::Camera;
use prism_render::shaders::{self, MvpUniform, PhongUniform};
use prism_render::{
    DepthTexture, GpuContext, GpuVertex, Mesh, RenderError, Texture2d, UniformBuffer,
    build_pipeline, build_shader,
};
use std::path::Path;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 100.0;

const LIGHT_POSITION: Vec3 = Vec3::new(-2.5, 5.0, 0.0);
const LIGHT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const OBJECT_COLOR: [f32; 4] = [1.0, 0.2, 0.0, 1.0];
const LAMP_SCALE: f32 = 0.3;

/// Which stage of the progression to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SceneKind {
    /// Flat colored triangles, no transforms.
    Triangle,
    /// Indexed pyramid through a fixed model/view/projection.
    Transform,
    /// The same pyramid with the fly camera driving view and zoom.
    Camera,
    /// Textured flash-drive model on a tiled ground plane, fly camera.
    Texture,
    /// Phong-lit cube plus a lamp marker cube.
    Lighting,
}

/// Per-frame data the frame loop hands to a scene.
pub struct FrameInfo<'a> {
    pub queue: &'a wgpu::Queue,
    pub camera: &'a Camera,
    pub aspect: f32,
}

pub trait Scene {
    /// Whether the fly camera drives this scene (and the cursor should be
    /// captured).
    fn uses_camera(&self) -> bool {
        false
    }

    /// Record draw commands. Uniform writes go through the queue and land
    /// before the encoder is submitted.
    fn draw(&self, frame: &FrameInfo<'_>, pass: &mut wgpu::RenderPass<'_>);
}

pub fn build(
    kind: SceneKind,
    gpu: &GpuContext,
    texture_path: Option<&Path>,
) -> Result<Box<dyn Scene>> {
    let scene: Box<dyn Scene> = match kind {
        SceneKind::Triangle => Box::new(TriangleScene::new(gpu)?),
        SceneKind::Transform => Box::new(TransformScene::new(gpu)?),
        SceneKind::Camera => Box::new(CameraScene::new(gpu)?),
        SceneKind::Texture => Box::new(TextureScene::new(gpu, texture_path)?),
        SceneKind::Lighting => Box::new(LightingScene::new(gpu)?),
    };
    tracing::info!("scene '{kind:?}' ready");
    Ok(scene)
}

/// Shader + layouts + vertex type into a depth-tested triangle pipeline
/// targeting the surface format.
fn scene_pipeline<V: GpuVertex>(
    gpu: &GpuContext,
    label: &str,
    shader_source: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
) -> Result<wgpu::RenderPipeline, RenderError> {
    let shader = build_shader(gpu.device(), label, shader_source)?;

    let layout = gpu
        .device()
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

    build_pipeline(
        gpu.device(),
        &wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[V::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(gpu.format().into())],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(DepthTexture::state()),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        },
    )
}

fn perspective(fov_degrees: f32, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(fov_degrees.to_radians(), aspect, NEAR_PLANE, FAR_PLANE)
}

/// Model transform shared by the transform and camera stages: scale by
/// two, rotate about the (1,1,1) diagonal, sit at the origin.
fn spun_model(angle_degrees: f32) -> Mat4 {
    Mat4::from_axis_angle(Vec3::ONE.normalize(), angle_degrees.to_radians())
        * Mat4::from_scale(Vec3::splat(2.0))
}

fn mvp_uniform(gpu: &GpuContext, label: &str) -> UniformBuffer<MvpUniform> {
    UniformBuffer::new(
        gpu.device(),
        label,
        wgpu::ShaderStages::VERTEX,
        &MvpUniform {
            mvp: Mat4::IDENTITY.to_cols_array_2d(),
        },
    )
}

struct TriangleScene {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
}

impl TriangleScene {
    fn new(gpu: &GpuContext) -> Result<Self> {
        let pipeline = scene_pipeline::<prism_assets::ColorVertex>(
            gpu,
            "triangle_scene",
            shaders::FLAT_COLOR_SHADER,
            &[],
        )?;
        let (vertices, indices) = colored_triangles();
        let mesh = Mesh::upload(gpu.device(), "triangles", &vertices, Some(&indices));
        Ok(Self { pipeline, mesh })
    }
}

impl Scene for TriangleScene {
    fn draw(&self, _frame: &FrameInfo<'_>, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        self.mesh.draw(pass);
    }
}

struct TransformScene {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    mvp: UniformBuffer<MvpUniform>,
}

impl TransformScene {
    fn new(gpu: &GpuContext) -> Result<Self> {
        let mvp = mvp_uniform(gpu, "transform_mvp");
        let pipeline = scene_pipeline::<prism_assets::ColorVertex>(
            gpu,
            "transform_scene",
            shaders::MVP_COLOR_SHADER,
            &[mvp.bind_group_layout()],
        )?;
        let (vertices, indices) = pyramid();
        let mesh = Mesh::upload(gpu.device(), "pyramid", &vertices, Some(&indices));
        Ok(Self {
            pipeline,
            mesh,
            mvp,
        })
    }
}

impl Scene for TransformScene {
    fn draw(&self, frame: &FrameInfo<'_>, pass: &mut wgpu::RenderPass<'_>) {
        // Fixed view five units back; no camera in this stage.
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
        let mvp = perspective(45.0, frame.aspect) * view * spun_model(30.0);
        self.mvp.write(
            frame.queue,
            &MvpUniform {
                mvp: mvp.to_cols_array_2d(),
            },
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, self.mvp.bind_group(), &[]);
        self.mesh.draw(pass);
    }
}

struct CameraScene {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    mvp: UniformBuffer<MvpUniform>,
}

impl CameraScene {
    fn new(gpu: &GpuContext) -> Result<Self> {
        let mvp = mvp_uniform(gpu, "camera_mvp");
        let pipeline = scene_pipeline::<prism_assets::ColorVertex>(
            gpu,
            "camera_scene",
            shaders::MVP_COLOR_SHADER,
            &[mvp.bind_group_layout()],
        )?;
        let (vertices, indices) = pyramid();
        let mesh = Mesh::upload(gpu.device(), "pyramid", &vertices, Some(&indices));
        Ok(Self {
            pipeline,
            mesh,
            mvp,
        })
    }
}

impl Scene for CameraScene {
    fn uses_camera(&self) -> bool {
        true
    }

    fn draw(&self, frame: &FrameInfo<'_>, pass: &mut wgpu::RenderPass<'_>) {
        let mvp = perspective(frame.camera.zoom(), frame.aspect)
            * frame.camera.view_matrix()
            * spun_model(30.0);
        self.mvp.write(
            frame.queue,
            &MvpUniform {
                mvp: mvp.to_cols_array_2d(),
            },
        );
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, self.mvp.bind_group(), &[]);
        self.mesh.draw(pass);
    }
}

/// Composite model: a flash-drive body cuboid, its connector cuboid, and a
/// tiled ground plane they rest on. One pipeline and texture, one MVP
/// uniform per part so each draw sees its own transform.
struct TextureScene {
    pipeline: wgpu::RenderPipeline,
    texture: Texture2d,
    parts: Vec<(Mesh, UniformBuffer<MvpUniform>, Mat4)>,
}

impl TextureScene {
    const GROUND_HEIGHT: f32 = -0.25;

    fn new(gpu: &GpuContext, texture_path: Option<&Path>) -> Result<Self> {
        let data = match texture_path {
            Some(path) => TextureData::load(path)?,
            None => {
                tracing::info!("no --texture given, using procedural checkerboard");
                TextureData::checkerboard(256, 32)
            }
        };
        let texture = Texture2d::upload(gpu.device(), gpu.queue(), "scene_texture", &data);

        let (plane_vertices, plane_indices) = ground_plane(5.0, Self::GROUND_HEIGHT, 5.0);
        let body_vertices = textured_cuboid(0.5, 0.125, 0.25);
        let connector_vertices = textured_cuboid(0.2, 0.08, 0.17);

        // Each half-height lifts its part so it sits on the plane.
        let parts = vec![
            (
                Mesh::upload(gpu.device(), "ground", &plane_vertices, Some(&plane_indices)),
                mvp_uniform(gpu, "ground_mvp"),
                Mat4::IDENTITY,
            ),
            (
                Mesh::upload(gpu.device(), "drive_body", &body_vertices, None),
                mvp_uniform(gpu, "drive_body_mvp"),
                Mat4::from_translation(Vec3::new(0.0, Self::GROUND_HEIGHT + 0.125, 0.0)),
            ),
            (
                Mesh::upload(gpu.device(), "drive_connector", &connector_vertices, None),
                mvp_uniform(gpu, "drive_connector_mvp"),
                Mat4::from_translation(Vec3::new(0.7, Self::GROUND_HEIGHT + 0.08, 0.0)),
            ),
        ];

        let pipeline = scene_pipeline::<prism_assets::UvVertex>(
            gpu,
            "texture_scene",
            shaders::TEXTURE_SHADER,
            &[parts[0].1.bind_group_layout(), texture.bind_group_layout()],
        )?;

        Ok(Self {
            pipeline,
            texture,
            parts,
        })
    }
}

impl Scene for TextureScene {
    fn uses_camera(&self) -> bool {
        true
    }

    fn draw(&self, frame: &FrameInfo<'_>, pass: &mut wgpu::RenderPass<'_>) {
        let view_proj = perspective(frame.camera.zoom(), frame.aspect) * frame.camera.view_matrix();

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(1, self.texture.bind_group(), &[]);
        for (mesh, mvp, model) in &self.parts {
            mvp.write(
                frame.queue,
                &MvpUniform {
                    mvp: (view_proj * *model).to_cols_array_2d(),
                },
            );
            pass.set_bind_group(0, mvp.bind_group(), &[]);
            mesh.draw(pass);
        }
    }
}

struct LightingScene {
    cube_pipeline: wgpu::RenderPipeline,
    lamp_pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
    phong: UniformBuffer<PhongUniform>,
    lamp_mvp: UniformBuffer<MvpUniform>,
}

impl LightingScene {
    fn new(gpu: &GpuContext) -> Result<Self> {
        let phong = UniformBuffer::new(
            gpu.device(),
            "phong_uniforms",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            &PhongUniform {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                view_proj: Mat4::IDENTITY.to_cols_array_2d(),
                object_color: OBJECT_COLOR,
                light_color: LIGHT_COLOR,
                light_pos: LIGHT_POSITION.extend(1.0).to_array(),
                view_pos: [0.0; 4],
            },
        );
        let lamp_mvp = mvp_uniform(gpu, "lamp_mvp");

        let cube_pipeline = scene_pipeline::<prism_assets::NormalVertex>(
            gpu,
            "lighting_scene",
            shaders::PHONG_SHADER,
            &[phong.bind_group_layout()],
        )?;
        let lamp_pipeline = scene_pipeline::<prism_assets::NormalVertex>(
            gpu,
            "lamp",
            shaders::LAMP_SHADER,
            &[lamp_mvp.bind_group_layout()],
        )?;

        let (vertices, indices) = lit_cube();
        let mesh = Mesh::upload(gpu.device(), "cube", &vertices, Some(&indices));
        Ok(Self {
            cube_pipeline,
            lamp_pipeline,
            mesh,
            phong,
            lamp_mvp,
        })
    }
}

impl Scene for LightingScene {
    fn uses_camera(&self) -> bool {
        true
    }

    fn draw(&self, frame: &FrameInfo<'_>, pass: &mut wgpu::RenderPass<'_>) {
        let view_proj = perspective(frame.camera.zoom(), frame.aspect) * frame.camera.view_matrix();
        let model = spun_model(45.0);

        self.phong.write(
            frame.queue,
            &PhongUniform {
                model: model.to_cols_array_2d(),
                view_proj: view_proj.to_cols_array_2d(),
                object_color: OBJECT_COLOR,
                light_color: LIGHT_COLOR,
                light_pos: LIGHT_POSITION.extend(1.0).to_array(),
                view_pos: frame.camera.position.extend(1.0).to_array(),
            },
        );
        pass.set_pipeline(&self.cube_pipeline);
        pass.set_bind_group(0, self.phong.bind_group(), &[]);
        self.mesh.draw(pass);

        // Small white cube marking the light source.
        let lamp_model =
            Mat4::from_translation(LIGHT_POSITION) * Mat4::from_scale(Vec3::splat(LAMP_SCALE));
        self.lamp_mvp.write(
            frame.queue,
            &MvpUniform {
                mvp: (view_proj * lamp_model).to_cols_array_2d(),
            },
        );
        pass.set_pipeline(&self.lamp_pipeline);
        pass.set_bind_group(0, self.lamp_mvp.bind_group(), &[]);
        self.mesh.draw(pass);
    }
}
