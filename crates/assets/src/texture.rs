//! Image decode into raw RGBA8 pixel buffers.
//!
//! Decoded rows are flipped vertically before upload: the decoder's origin
//! is the top-left corner while the texture-coordinate origin the scenes
//! were authored against is the bottom-left.

use std::path::{Path, PathBuf};

/// Errors from texture loading. All are detected during setup and fatal to
/// the process; nothing here recovers or retries.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load texture {path}: {source}")]
    TextureLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("unsupported image format: {channels} channels (expected 3 or 4)")]
    UnsupportedChannels { channels: u8 },
}

/// A decoded image, always expanded to RGBA8, rows already flipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl TextureData {
    /// Decode a PNG or JPEG file. Sources with 3 (RGB) or 4 (RGBA)
    /// channels are accepted; anything else is rejected.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let img = image::open(path).map_err(|source| AssetError::TextureLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let channels = img.color().channel_count();
        if channels != 3 && channels != 4 {
            return Err(AssetError::UnsupportedChannels { channels });
        }

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let mut pixels = rgba.into_raw();
        flip_rows_vertically(&mut pixels, width, height, 4);

        tracing::debug!("loaded texture {} ({}x{})", path.display(), width, height);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Procedural checkerboard, used when no texture file is supplied.
    pub fn checkerboard(size: u32, cell: u32) -> Self {
        let cell = cell.max(1);
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let on = ((x / cell) + (y / cell)) % 2 == 0;
                let v = if on { 220 } else { 60 };
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Self {
            width: size,
            height: size,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Reverse the row order of a tightly packed pixel buffer in place.
pub fn flip_rows_vertically(pixels: &mut [u8], width: u32, height: u32, bytes_per_pixel: u32) {
    let row_len = (width * bytes_per_pixel) as usize;
    debug_assert_eq!(pixels.len(), row_len * height as usize);

    let mut top = 0;
    let mut bottom = height as usize;
    while top + 1 < bottom {
        bottom -= 1;
        let (upper, lower) = pixels.split_at_mut(bottom * row_len);
        upper[top * row_len..(top + 1) * row_len].swap_with_slice(&mut lower[..row_len]);
        top += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_swaps_rows_of_known_pattern() {
        // 2x3 image, one byte per pixel, rows [0 0] [1 1] [2 2].
        let mut pixels = vec![0, 0, 1, 1, 2, 2];
        flip_rows_vertically(&mut pixels, 2, 3, 1);
        assert_eq!(pixels, vec![2, 2, 1, 1, 0, 0]);
    }

    #[test]
    fn flip_is_an_involution() {
        let original: Vec<u8> = (0..4 * 4 * 4).map(|i| (i % 251) as u8).collect();
        let mut pixels = original.clone();
        flip_rows_vertically(&mut pixels, 4, 4, 4);
        assert_ne!(pixels, original);
        flip_rows_vertically(&mut pixels, 4, 4, 4);
        assert_eq!(pixels, original);
    }

    #[test]
    fn flip_leaves_single_row_untouched() {
        let mut pixels = vec![7, 8, 9, 10];
        flip_rows_vertically(&mut pixels, 1, 1, 4);
        assert_eq!(pixels, vec![7, 8, 9, 10]);
    }

    #[test]
    fn checkerboard_dimensions_and_alpha() {
        let tex = TextureData::checkerboard(8, 2);
        assert_eq!(tex.width(), 8);
        assert_eq!(tex.height(), 8);
        assert_eq!(tex.pixels().len(), 8 * 8 * 4);
        assert!(tex.pixels().chunks_exact(4).all(|px| px[3] == 255));
        // Adjacent cells differ.
        let first = &tex.pixels()[0..4];
        let third = &tex.pixels()[2 * 4..3 * 4];
        assert_ne!(first, third);
    }

    #[test]
    fn load_reports_missing_file_with_path() {
        let err = TextureData::load(Path::new("does/not/exist.png")).unwrap_err();
        match err {
            AssetError::TextureLoad { path, .. } => {
                assert_eq!(path, Path::new("does/not/exist.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
