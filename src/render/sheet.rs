//! Frame metadata for finished atlases.
//!
//! Writes a TexturePacker-compatible JSON Hash so engines can address cells
//! by name instead of recomputing grid offsets.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{AtlasError, Result};

use super::atlas::Atlas;

/// Write frame metadata for `atlas`.
///
/// Frames are named `<sheet>-<index>`; `image` is the atlas file name the
/// metadata refers to.
pub fn write_sheet_json(atlas: &Atlas, sheet: &str, image: &str, path: &Path) -> Result<()> {
    let output = TexturePackerJson::from_atlas(atlas, sheet, image);
    let json = serde_json::to_string_pretty(&output).map_err(|e| AtlasError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to serialize sheet metadata: {}", e),
    })?;
    fs::write(path, json).map_err(|e| AtlasError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write sheet metadata: {}", e),
    })?;
    Ok(())
}

/// Frame key for sprite `index` of `sheet`. Zero-padded so keys sort in
/// reading order.
fn frame_name(sheet: &str, index: usize, total: usize) -> String {
    let digits = total.saturating_sub(1).to_string().len();
    format!("{}-{:0width$}", sheet, index, width = digits)
}

// --- TexturePacker JSON serialization types ---

#[derive(Serialize)]
struct TexturePackerJson {
    frames: BTreeMap<String, TPFrame>,
    meta: TPMeta,
}

#[derive(Serialize)]
struct TPFrame {
    frame: TPRect,
    rotated: bool,
    trimmed: bool,
    #[serde(rename = "spriteSourceSize")]
    sprite_source_size: TPRect,
    #[serde(rename = "sourceSize")]
    source_size: TPSize,
}

#[derive(Serialize)]
struct TPRect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct TPSize {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
struct TPMeta {
    app: String,
    version: String,
    image: String,
    format: String,
    size: TPSize,
    scale: String,
}

impl TexturePackerJson {
    fn from_atlas(atlas: &Atlas, sheet: &str, image: &str) -> Self {
        let total = atlas.frames.len();
        let mut frames = BTreeMap::new();

        for f in &atlas.frames {
            frames.insert(
                frame_name(sheet, f.index, total),
                TPFrame {
                    frame: TPRect {
                        x: f.x,
                        y: f.y,
                        w: f.w,
                        h: f.h,
                    },
                    rotated: false,
                    trimmed: false,
                    sprite_source_size: TPRect {
                        x: 0,
                        y: 0,
                        w: f.w,
                        h: f.h,
                    },
                    source_size: TPSize { w: f.w, h: f.h },
                },
            );
        }

        TexturePackerJson {
            frames,
            meta: TPMeta {
                app: "atlasify".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                image: image.to_string(),
                format: "RGBA8888".to_string(),
                size: TPSize {
                    w: atlas.width(),
                    h: atlas.height(),
                },
                scale: "1".to_string(),
            },
        }
    }
}
