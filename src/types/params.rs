//! Per-sheet compaction parameters.

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};

/// Default minimum alpha for a pixel to count towards segmentation.
pub const DEFAULT_ALPHA_THRESHOLD: u8 = 128;

/// Default noise floor for connected regions, in pixels.
pub const DEFAULT_MIN_PIXELS: usize = 500;

/// Default row clustering tolerance, in pixels.
pub const DEFAULT_ROW_GAP: u32 = 40;

/// Everything the pipeline needs to turn one source sheet into an atlas.
///
/// Loaded from a manifest entry or built directly by library callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetParams {
    /// Number of sprites the sheet must contain. Only used as a validation gate.
    #[serde(rename = "expected")]
    pub expected_count: usize,

    /// Atlas grid width, in cells.
    pub cols: u32,

    /// Atlas grid height, in cells.
    pub rows: u32,

    pub cell_w: u32,
    pub cell_h: u32,

    /// Minimum alpha for a pixel to count towards segmentation.
    #[serde(default = "default_alpha_threshold")]
    pub alpha_threshold: u8,

    /// Regions smaller than this are discarded as noise.
    #[serde(default = "default_min_pixels")]
    pub min_pixels: usize,

    /// Alpha below this is cleared to zero inside each cell.
    #[serde(default = "default_alpha_cleanup")]
    pub alpha_cleanup: u8,

    /// Transparent border kept around each sprite inside its cell.
    #[serde(default = "default_pad")]
    pub pad: u32,

    #[serde(default = "default_row_gap")]
    pub row_gap: u32,
}

fn default_alpha_threshold() -> u8 {
    DEFAULT_ALPHA_THRESHOLD
}

fn default_min_pixels() -> usize {
    DEFAULT_MIN_PIXELS
}

fn default_alpha_cleanup() -> u8 {
    96
}

fn default_pad() -> u32 {
    1
}

fn default_row_gap() -> u32 {
    DEFAULT_ROW_GAP
}

impl SheetParams {
    /// Parameters for a `cols × rows` grid of `cell_w × cell_h` cells holding
    /// `expected_count` sprites, with default thresholds.
    pub fn new(expected_count: usize, cols: u32, rows: u32, cell_w: u32, cell_h: u32) -> Self {
        Self {
            expected_count,
            cols,
            rows,
            cell_w,
            cell_h,
            alpha_threshold: default_alpha_threshold(),
            min_pixels: default_min_pixels(),
            alpha_cleanup: default_alpha_cleanup(),
            pad: default_pad(),
            row_gap: default_row_gap(),
        }
    }

    pub fn with_thresholds(mut self, alpha_threshold: u8, min_pixels: usize, alpha_cleanup: u8) -> Self {
        self.alpha_threshold = alpha_threshold;
        self.min_pixels = min_pixels;
        self.alpha_cleanup = alpha_cleanup;
        self
    }

    pub fn with_pad(mut self, pad: u32) -> Self {
        self.pad = pad;
        self
    }

    pub fn with_row_gap(mut self, row_gap: u32) -> Self {
        self.row_gap = row_gap;
        self
    }

    /// Number of cells in the atlas grid.
    pub fn capacity(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Atlas dimensions in pixels.
    pub fn atlas_size(&self) -> (u32, u32) {
        (self.cols * self.cell_w, self.rows * self.cell_h)
    }

    /// Reject parameter sets that cannot produce a well-formed atlas.
    ///
    /// An expected count larger than the grid would place sprites outside the
    /// canvas, so it is refused here rather than at placement time.
    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 || self.rows == 0 {
            return Err(AtlasError::Config {
                message: format!("Grid must be at least 1x1, got {}x{}", self.cols, self.rows),
                help: Some("Set cols and rows to positive integers".to_string()),
            });
        }

        if self.cell_w == 0 || self.cell_h == 0 {
            return Err(AtlasError::Config {
                message: format!(
                    "Cell size must be non-zero, got {}x{}",
                    self.cell_w, self.cell_h
                ),
                help: Some("Set cell_w and cell_h to positive integers".to_string()),
            });
        }

        if self.cols.checked_mul(self.cell_w).is_none() || self.rows.checked_mul(self.cell_h).is_none() {
            return Err(AtlasError::Config {
                message: format!(
                    "Atlas of {}x{} cells at {}x{} overflows image dimensions",
                    self.cols, self.rows, self.cell_w, self.cell_h
                ),
                help: None,
            });
        }

        if self.expected_count > self.capacity() {
            return Err(AtlasError::Config {
                message: format!(
                    "Expected {} sprites but a {}x{} grid only holds {}",
                    self.expected_count,
                    self.cols,
                    self.rows,
                    self.capacity()
                ),
                help: Some("Increase cols or rows so every sprite gets a cell".to_string()),
            });
        }

        Ok(())
    }
}
