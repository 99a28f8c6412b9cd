//! CPU-side asset preparation: image decode into raw RGBA pixels and
//! procedural mesh generation for the study scenes.
//!
//! Nothing here touches the GPU; the render crate consumes these types.

mod geometry;
mod texture;

pub use geometry::{
    ColorVertex, NormalVertex, UvVertex, colored_triangles, ground_plane, lit_cube, pyramid,
    textured_cuboid,
};
pub use texture::{AssetError, TextureData, flip_rows_vertically};
