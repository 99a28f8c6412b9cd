//! GPU resource helpers shared by every scene: context setup, validated
//! shader and pipeline construction, static mesh upload, texture upload,
//! and uniform plumbing.
//!
//! # Invariants
//! - Vertex and index buffers are immutable after upload.
//! - Each GPU resource is owned by exactly one wrapper for its full
//!   lifetime and released exactly once at shutdown (on drop).
//! - Shader and pipeline failures are detected during setup and reported
//!   with a diagnostic log; nothing fails during the steady-state loop.

mod context;
mod depth;
mod error;
mod mesh;
mod shader;
pub mod shaders;
mod texture;
mod uniform;
mod vertex;

pub use context::GpuContext;
pub use depth::DepthTexture;
pub use error::RenderError;
pub use mesh::Mesh;
pub use shader::{build_pipeline, build_shader, validate_wgsl};
pub use texture::Texture2d;
pub use uniform::UniformBuffer;
pub use vertex::GpuVertex;
