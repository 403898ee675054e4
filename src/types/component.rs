//! Connected sprite regions found in an alpha mask.

use serde::Serialize;

/// One maximal 4-connected region of opaque pixels.
///
/// The bounding box is inclusive on both edges, so a single pixel at `(3, 4)`
/// has `min_x == max_x == 3` and `min_y == max_y == 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Component {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
    /// Number of mask pixels in the region (not the bounding box area).
    pub pixels: usize,
}

impl Component {
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32, pixels: usize) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    /// Vertical center of the bounding box, used for row clustering.
    pub fn center_y(&self) -> f64 {
        (self.min_y as f64 + self.max_y as f64) / 2.0
    }

    /// Whether `(x, y)` lies inside the bounding box.
    #[cfg(test)]
    pub(crate) fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }
}
