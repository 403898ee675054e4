//! Atlas assembly.
//!
//! Ties the pipeline together: detect sprites, gate on the expected count,
//! normalize each sprite into a cell and lay the cells out on a fixed grid.

use image::imageops;
use image::RgbaImage;

use crate::error::{AtlasError, Result};
use crate::segment;
use crate::types::{Component, SheetParams};

use super::cell::{is_fully_transparent, CellNormalizer};

/// A sprite's placement in the atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Position in reading order.
    pub index: usize,
    pub col: u32,
    pub row: u32,
    /// Pixel rect of the cell in the atlas.
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    /// Where the sprite was found on the source sheet.
    pub source: Component,
    /// True when alpha cleanup left nothing visible.
    pub blank: bool,
}

/// A finished atlas image plus the frames placed on it.
#[derive(Debug, Clone)]
pub struct Atlas {
    pub image: RgbaImage,
    pub frames: Vec<Frame>,
}

impl Atlas {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Frames whose cell came out fully transparent.
    pub fn blank_frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().filter(|f| f.blank)
    }
}

/// Grid `(col, row)` of the sprite at `index` in a grid `cols` wide.
pub fn grid_position(index: usize, cols: u32) -> (u32, u32) {
    let cols = cols as usize;
    ((index % cols) as u32, (index / cols) as u32)
}

/// Builds fixed-grid atlases from loosely arranged sheets.
pub struct AtlasBuilder<'a> {
    params: &'a SheetParams,
}

impl<'a> AtlasBuilder<'a> {
    pub fn new(params: &'a SheetParams) -> Self {
        Self { params }
    }

    /// Detect, validate, normalize and pack the sprites of `image`.
    ///
    /// Fails with [`AtlasError::CountMismatch`] when segmentation does not find
    /// exactly `expected_count` sprites; nothing is allocated for the atlas in
    /// that case.
    pub fn build(&self, image: &RgbaImage) -> Result<Atlas> {
        let params = self.params;
        params.validate()?;

        let components = segment::detect(image, params);
        if components.len() != params.expected_count {
            return Err(AtlasError::CountMismatch {
                expected: params.expected_count,
                found: components.len(),
            });
        }

        let (width, height) = params.atlas_size();
        let mut canvas = RgbaImage::new(width, height);
        let normalizer = CellNormalizer::from_params(params);
        let mut frames = Vec::with_capacity(components.len());

        for (index, component) in components.into_iter().enumerate() {
            let (col, row) = grid_position(index, params.cols);
            let (x, y) = (col * params.cell_w, row * params.cell_h);

            let cell = normalizer.normalize(image, &component);
            imageops::replace(&mut canvas, &cell, x as i64, y as i64);

            frames.push(Frame {
                index,
                col,
                row,
                x,
                y,
                w: params.cell_w,
                h: params.cell_h,
                source: component,
                blank: is_fully_transparent(&cell),
            });
        }

        Ok(Atlas {
            image: canvas,
            frames,
        })
    }
}

/// Compact `image` into an atlas described by `params`.
pub fn build_sheet(image: &RgbaImage, params: &SheetParams) -> Result<RgbaImage> {
    AtlasBuilder::new(params).build(image).map(|atlas| atlas.image)
}
