//! Per-sprite cell normalization.
//!
//! Turns one detected component into a fixed-size cell: crop, clear soft
//! alpha fringes, trim, scale uniformly with nearest-neighbour sampling, and
//! center on a transparent background.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::types::{Component, SheetParams};

/// Normalizes sprites into `cell_w × cell_h` cells.
#[derive(Debug, Clone, Copy)]
pub struct CellNormalizer {
    pub cell_w: u32,
    pub cell_h: u32,
    pub pad: u32,
    pub alpha_cleanup: u8,
}

impl CellNormalizer {
    pub fn new(cell_w: u32, cell_h: u32, pad: u32, alpha_cleanup: u8) -> Self {
        Self {
            cell_w,
            cell_h,
            pad,
            alpha_cleanup,
        }
    }

    pub fn from_params(params: &SheetParams) -> Self {
        Self::new(params.cell_w, params.cell_h, params.pad, params.alpha_cleanup)
    }

    /// Area available to the sprite once padding is removed (at least 1x1).
    pub fn usable(&self) -> (u32, u32) {
        let border = self.pad.saturating_mul(2);
        let w = self.cell_w.saturating_sub(border).max(1);
        let h = self.cell_h.saturating_sub(border).max(1);
        (w, h)
    }

    /// Size a `w × h` sprite is scaled to so it fits the usable area.
    ///
    /// A single factor is applied to both axes, and small sprites are scaled
    /// up as well as large ones down. Half-pixel results round to even.
    pub fn fit(&self, w: u32, h: u32) -> (u32, u32) {
        let (usable_w, usable_h) = self.usable();
        let scale = (usable_w as f64 / w as f64).min(usable_h as f64 / h as f64);
        let target_w = ((w as f64 * scale).round_ties_even() as u32).max(1);
        let target_h = ((h as f64 * scale).round_ties_even() as u32).max(1);
        (target_w, target_h)
    }

    /// Build the cell for `component` from the source sheet.
    ///
    /// A component whose pixels are all cleared by the alpha cleanup gives a
    /// fully transparent cell.
    pub fn normalize(&self, image: &RgbaImage, component: &Component) -> RgbaImage {
        let mut cell = RgbaImage::new(self.cell_w, self.cell_h);

        let mut sprite = imageops::crop_imm(
            image,
            component.min_x,
            component.min_y,
            component.width(),
            component.height(),
        )
        .to_image();
        clean_alpha(&mut sprite, self.alpha_cleanup);

        let Some((x, y, w, h)) = opaque_bounds(&sprite) else {
            return cell;
        };

        let trimmed = imageops::crop_imm(&sprite, x, y, w, h).to_image();
        let (target_w, target_h) = self.fit(w, h);
        let resized = imageops::resize(&trimmed, target_w, target_h, FilterType::Nearest);

        let offset_x = self.cell_w.saturating_sub(target_w) / 2;
        let offset_y = self.cell_h.saturating_sub(target_h) / 2;
        blit_opaque(&mut cell, &resized, offset_x, offset_y);

        cell
    }
}

/// Zero the alpha of every pixel below `threshold`.
fn clean_alpha(image: &mut RgbaImage, threshold: u8) {
    for pixel in image.pixels_mut() {
        if pixel[3] < threshold {
            pixel[3] = 0;
        }
    }
}

/// Tight `(x, y, w, h)` box around pixels with nonzero alpha.
fn opaque_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    bounds.map(|(x0, y0, x1, y1)| (x0, y0, x1 - x0 + 1, y1 - y0 + 1))
}

/// Copy the visible pixels of `top` onto a transparent `canvas` at `(ox, oy)`.
///
/// Pixels falling outside the canvas are clipped.
fn blit_opaque(canvas: &mut RgbaImage, top: &RgbaImage, ox: u32, oy: u32) {
    for (x, y, pixel) in top.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        let (cx, cy) = (ox + x, oy + y);
        if cx < canvas.width() && cy < canvas.height() {
            canvas.put_pixel(cx, cy, *pixel);
        }
    }
}

/// Returns true if every pixel in the image has alpha == 0.
pub fn is_fully_transparent(image: &RgbaImage) -> bool {
    image.pixels().all(|p| p[3] == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// A transparent sheet with an opaque `w × h` rectangle at `(x, y)`.
    fn sheet_with_rect(x: u32, y: u32, w: u32, h: u32, colour: Rgba<u8>) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(64, 64, CLEAR);
        for py in y..y + h {
            for px in x..x + w {
                img.put_pixel(px, py, colour);
            }
        }
        img
    }

    fn component_for(x: u32, y: u32, w: u32, h: u32) -> Component {
        Component::new(x, y, x + w - 1, y + h - 1, (w * h) as usize)
    }

    /// Bounding box of visible pixels in a cell, as `(x, y, w, h)`.
    fn visible_bounds(cell: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        opaque_bounds(cell)
    }

    #[test]
    fn test_usable_area_subtracts_padding() {
        let normalizer = CellNormalizer::new(16, 16, 1, 96);
        assert_eq!(normalizer.usable(), (14, 14));
    }

    #[test]
    fn test_usable_area_is_at_least_one() {
        let normalizer = CellNormalizer::new(4, 6, 5, 96);
        assert_eq!(normalizer.usable(), (1, 1));
    }

    #[test]
    fn test_fit_preserves_aspect_ratio() {
        let normalizer = CellNormalizer::new(16, 16, 1, 96);
        assert_eq!(normalizer.fit(20, 10), (14, 7));
        assert_eq!(normalizer.fit(10, 28), (5, 14));
    }

    #[test]
    fn test_fit_upscales_small_sprites() {
        let normalizer = CellNormalizer::new(32, 32, 1, 96);
        assert_eq!(normalizer.fit(5, 5), (30, 30));
    }

    #[test]
    fn test_fit_exact_size_is_identity() {
        let normalizer = CellNormalizer::new(16, 16, 1, 96);
        assert_eq!(normalizer.fit(14, 14), (14, 14));
        assert_eq!(normalizer.fit(14, 9), (14, 9));
    }

    #[test]
    fn test_usable_area_saturates_huge_padding() {
        let normalizer = CellNormalizer::new(16, 16, u32::MAX, 96);
        assert_eq!(normalizer.usable(), (1, 1));
        assert_eq!(normalizer.fit(4, 3), (1, 1));
    }

    #[test]
    fn test_fit_rounds_half_to_even() {
        let normalizer = CellNormalizer::new(16, 16, 1, 96);
        // Both scale by 3.5: 10.5 rounds down to 10, 3.5 rounds up to 4.
        assert_eq!(normalizer.fit(4, 3), (14, 10));
        assert_eq!(normalizer.fit(4, 1), (14, 4));
    }

    #[test]
    fn test_half_pixel_height_is_centered_on_even_size() {
        let img = sheet_with_rect(3, 5, 4, 3, RED);
        let comp = component_for(3, 5, 4, 3);

        let cell = CellNormalizer::new(16, 16, 1, 96).normalize(&img, &comp);

        // 14x10 leaves 6 spare rows, split 3 above and 3 below.
        assert_eq!(visible_bounds(&cell), Some((1, 3, 14, 10)));
    }

    #[test]
    fn test_cell_is_always_cell_sized() {
        let normalizer = CellNormalizer::new(16, 12, 1, 96);
        for (w, h) in [(1u32, 1u32), (3, 40), (50, 2), (14, 10), (60, 60)] {
            let img = sheet_with_rect(2, 2, w, h, RED);
            let comp = component_for(2, 2, w, h);
            let cell = normalizer.normalize(&img, &comp);
            assert_eq!(cell.dimensions(), (16, 12), "sprite {}x{}", w, h);
        }
    }

    #[test]
    fn test_exact_fit_sprite_is_copied_unscaled() {
        let img = sheet_with_rect(10, 20, 14, 14, RED);
        let comp = component_for(10, 20, 14, 14);

        let cell = CellNormalizer::new(16, 16, 1, 96).normalize(&img, &comp);

        assert_eq!(visible_bounds(&cell), Some((1, 1, 14, 14)));
        assert_eq!(*cell.get_pixel(1, 1), RED);
        assert_eq!(*cell.get_pixel(14, 14), RED);
        assert_eq!(*cell.get_pixel(0, 0), CLEAR);
        assert_eq!(*cell.get_pixel(15, 15), CLEAR);
    }

    #[test]
    fn test_wide_sprite_is_centered_vertically() {
        let img = sheet_with_rect(0, 0, 28, 14, RED);
        let comp = component_for(0, 0, 28, 14);

        let cell = CellNormalizer::new(16, 16, 1, 96).normalize(&img, &comp);

        // 28x14 scales by 0.5 to 14x7; leftover 9 rows split 4 above, 5 below.
        assert_eq!(visible_bounds(&cell), Some((1, 4, 14, 7)));
    }

    #[test]
    fn test_odd_margin_rounds_toward_top_left() {
        let img = sheet_with_rect(0, 0, 14, 13, RED);
        let comp = component_for(0, 0, 14, 13);

        let cell = CellNormalizer::new(16, 16, 1, 96).normalize(&img, &comp);

        // 14x13 fits unscaled; 3 spare rows put 1 above and 2 below.
        assert_eq!(visible_bounds(&cell), Some((1, 1, 14, 13)));
    }

    #[test]
    fn test_upscale_uses_nearest_neighbour() {
        // 2x2 checker: red/blue over blue/red, scaled 2x2 -> 14x14.
        let mut img = RgbaImage::from_pixel(4, 4, CLEAR);
        img.put_pixel(1, 1, RED);
        img.put_pixel(2, 1, BLUE);
        img.put_pixel(1, 2, BLUE);
        img.put_pixel(2, 2, RED);
        let comp = component_for(1, 1, 2, 2);

        let cell = CellNormalizer::new(16, 16, 1, 96).normalize(&img, &comp);

        assert_eq!(visible_bounds(&cell), Some((1, 1, 14, 14)));
        // Sample the middle of each quadrant; every pixel is a pure source colour.
        assert_eq!(*cell.get_pixel(4, 4), RED);
        assert_eq!(*cell.get_pixel(11, 4), BLUE);
        assert_eq!(*cell.get_pixel(4, 11), BLUE);
        assert_eq!(*cell.get_pixel(11, 11), RED);
        assert!(cell
            .pixels()
            .all(|p| *p == RED || *p == BLUE || *p == CLEAR));
    }

    #[test]
    fn test_alpha_cleanup_trims_soft_fringe() {
        // Opaque 14x14 core with a 1px fringe at alpha 40.
        let mut img = sheet_with_rect(9, 9, 16, 16, Rgba([255, 0, 0, 40]));
        for y in 10..24 {
            for x in 10..24 {
                img.put_pixel(x, y, RED);
            }
        }
        let comp = component_for(9, 9, 16, 16);

        let cell = CellNormalizer::new(16, 16, 1, 96).normalize(&img, &comp);

        // The fringe is cleared before trimming, so the core fits unscaled.
        assert_eq!(visible_bounds(&cell), Some((1, 1, 14, 14)));
        assert!(cell.pixels().all(|p| p[3] == 0 || p[3] == 255));
    }

    #[test]
    fn test_alpha_at_cleanup_threshold_is_kept() {
        let img = sheet_with_rect(0, 0, 14, 14, Rgba([0, 255, 0, 96]));
        let comp = component_for(0, 0, 14, 14);

        let cell = CellNormalizer::new(16, 16, 1, 96).normalize(&img, &comp);
        assert_eq!(*cell.get_pixel(5, 5), Rgba([0, 255, 0, 96]));
    }

    #[test]
    fn test_degenerate_sprite_gives_transparent_cell() {
        let img = sheet_with_rect(4, 4, 20, 20, Rgba([255, 255, 255, 95]));
        let comp = component_for(4, 4, 20, 20);

        let cell = CellNormalizer::new(32, 32, 1, 96).normalize(&img, &comp);

        assert_eq!(cell.dimensions(), (32, 32));
        assert!(is_fully_transparent(&cell));
    }

    #[test]
    fn test_crop_is_limited_to_component_box() {
        // Two sprites side by side; only the first is normalized.
        let mut img = sheet_with_rect(0, 0, 14, 14, RED);
        for y in 0..14 {
            for x in 20..34 {
                img.put_pixel(x, y, BLUE);
            }
        }
        let comp = component_for(0, 0, 14, 14);

        let cell = CellNormalizer::new(16, 16, 1, 96).normalize(&img, &comp);
        assert!(cell.pixels().all(|p| *p != BLUE));
    }

    #[test]
    fn test_is_fully_transparent() {
        let mut img = RgbaImage::from_pixel(4, 4, CLEAR);
        assert!(is_fully_transparent(&img));
        img.put_pixel(2, 2, RED);
        assert!(!is_fully_transparent(&img));
    }
}
