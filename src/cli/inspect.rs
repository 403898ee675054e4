//! Inspect command implementation.
//!
//! Runs segmentation and row ordering on a sheet without writing anything,
//! so `min_pixels` and `row_gap` can be tuned before a build.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::error::{AtlasError, Result};
use crate::output::{display_path, plural, Printer};
use crate::render::load_rgba;
use crate::segment::{ComponentScanner, RowMajorSorter};
use crate::types::{
    AlphaMask, Component, DEFAULT_ALPHA_THRESHOLD, DEFAULT_MIN_PIXELS, DEFAULT_ROW_GAP,
};

/// Show detected sprites in reading order without building an atlas
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Sprite sheet to inspect
    #[arg(required = true)]
    pub input: PathBuf,

    /// Minimum alpha for a pixel to count as part of a sprite
    #[arg(long, default_value_t = DEFAULT_ALPHA_THRESHOLD)]
    pub alpha_threshold: u8,

    /// Regions with fewer pixels are ignored
    #[arg(long, default_value_t = DEFAULT_MIN_PIXELS)]
    pub min_pixels: usize,

    /// Vertical tolerance for grouping sprites into rows
    #[arg(long, default_value_t = DEFAULT_ROW_GAP)]
    pub row_gap: u32,

    /// Print the rows as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct RowReport<'a> {
    center_y: f64,
    sprites: &'a [Component],
}

/// Detect sprites and report them grouped by row.
pub fn run(args: InspectArgs, printer: &Printer) -> Result<Vec<Vec<Component>>> {
    printer.status("Loading", &display_path(&args.input));
    let image = load_rgba(&args.input)?;

    let mask = AlphaMask::from_image(&image, args.alpha_threshold);
    if mask.is_empty() {
        printer.warning(
            "Empty",
            &format!("no pixels reach alpha {}", args.alpha_threshold),
        );
    }
    let components = ComponentScanner::new(args.min_pixels).scan(&mask);
    let rows = RowMajorSorter::new(args.row_gap).rows(components);

    let total: usize = rows.iter().map(Vec::len).sum();
    printer.info(
        "Analyzed",
        &format!(
            "{}x{} image, {} opaque pixels",
            image.width(),
            image.height(),
            mask.count()
        ),
    );

    if args.json {
        let report: Vec<RowReport> = rows
            .iter()
            .map(|row| RowReport {
                center_y: mean_center(row),
                sprites: row,
            })
            .collect();
        let json = serde_json::to_string_pretty(&report).map_err(|e| AtlasError::Io {
            path: args.input.clone(),
            message: format!("Failed to serialize report: {}", e),
        })?;
        println!("{}", json);
    } else {
        let mut index = 0;
        for (row_index, row) in rows.iter().enumerate() {
            printer.info(
                &format!("Row {}", row_index),
                &format!(
                    "center y {:.1}, {}",
                    mean_center(row),
                    plural(row.len(), "sprite", "sprites")
                ),
            );
            for c in row {
                printer.status(
                    &format!("#{}", index),
                    &format!(
                        "({}, {})-({}, {}) {}x{}, {} px",
                        c.min_x,
                        c.min_y,
                        c.max_x,
                        c.max_y,
                        c.width(),
                        c.height(),
                        c.pixels
                    ),
                );
                index += 1;
            }
        }
    }

    printer.status(
        "Finished",
        &format!(
            "{} in {}",
            plural(total, "sprite", "sprites"),
            plural(rows.len(), "row", "rows")
        ),
    );

    Ok(rows)
}

fn mean_center(row: &[Component]) -> f64 {
    row.iter().map(Component::center_y).sum::<f64>() / row.len().max(1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn fill(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32) {
        for py in y..y + h {
            for px in x..x + w {
                img.put_pixel(px, py, Rgba([0, 0, 0, 255]));
            }
        }
    }

    fn inspect_args(input: PathBuf) -> InspectArgs {
        InspectArgs {
            input,
            alpha_threshold: 128,
            min_pixels: 50,
            row_gap: DEFAULT_ROW_GAP,
            json: false,
        }
    }

    #[test]
    fn test_inspect_groups_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sheet.png");

        let mut img = RgbaImage::new(100, 120);
        fill(&mut img, 40, 4, 20, 20);
        fill(&mut img, 0, 0, 20, 20);
        fill(&mut img, 10, 80, 20, 20);
        // Noise below min_pixels.
        fill(&mut img, 90, 50, 3, 3);
        img.save(&path).unwrap();

        let rows = run(inspect_args(path), &Printer::new()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[0][0].min_x, 0);
        assert_eq!(rows[0][1].min_x, 40);
        assert_eq!(rows[1][0].min_y, 80);
    }

    #[test]
    fn test_inspect_transparent_sheet_has_no_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.png");
        RgbaImage::new(32, 32).save(&path).unwrap();

        let rows = run(inspect_args(path), &Printer::new()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_inspect_missing_file() {
        let dir = tempdir().unwrap();
        let result = run(inspect_args(dir.path().join("nope.png")), &Printer::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_mean_center() {
        let row = [
            Component::new(0, 0, 9, 9, 100),
            Component::new(20, 10, 29, 19, 100),
        ];
        assert_eq!(mean_center(&row), 9.5);
    }
}
