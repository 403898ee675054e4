//! Sprite segmentation: finding sprites in a sheet and putting them in
//! reading order.

mod order;
mod scanner;

pub use order::RowMajorSorter;
pub use scanner::ComponentScanner;

use image::RgbaImage;

use crate::types::{AlphaMask, Component, SheetParams};

/// Detect the sprites in an image and return them in reading order.
///
/// This is the mask → scan → sort half of the pipeline, shared by atlas
/// building and `atlasify inspect`.
pub fn detect(image: &RgbaImage, params: &SheetParams) -> Vec<Component> {
    let mask = AlphaMask::from_image(image, params.alpha_threshold);
    let components = ComponentScanner::new(params.min_pixels).scan(&mask);
    RowMajorSorter::new(params.row_gap).sort(components)
}
