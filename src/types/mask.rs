//! Boolean opacity mask derived from an image's alpha channel.

use image::RgbaImage;

/// A boolean grid marking which pixels are opaque enough to belong to a sprite.
///
/// Built once per sheet and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphaMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl AlphaMask {
    /// Threshold an image's alpha channel: a pixel is set when `alpha >= threshold`.
    pub fn from_image(image: &RgbaImage, threshold: u8) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let cells = image.pixels().map(|p| p[3] >= threshold).collect();

        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a mask by evaluating `f(x, y)` for every cell.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }

        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at `(x, y)`, or `false` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    /// Number of set cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }
}
