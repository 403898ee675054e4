//! Build command implementation.
//!
//! Compacts every sheet listed in the manifest into a fixed-grid atlas.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{AtlasError, Result};
use crate::manifest::{Manifest, SheetEntry, MANIFEST_FILENAME};
use crate::output::{display_path, plural, Printer};
use crate::render::{load_rgba, write_png, write_sheet_json, AtlasBuilder};

/// Compact sprite sheets into fixed-grid atlases
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Manifest listing the sheets to build
    #[arg(long, short, default_value = MANIFEST_FILENAME)]
    pub manifest: PathBuf,

    /// Asset directory (overrides the manifest's `dir`)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Output directory (default: the asset directory)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Only build the named sheet (repeatable)
    #[arg(long = "sheet", value_name = "NAME")]
    pub sheets: Vec<String>,

    /// Keep building the remaining sheets after one fails
    #[arg(long)]
    pub keep_going: bool,

    /// Write TexturePacker frame metadata for every sheet
    #[arg(long)]
    pub meta: bool,
}

/// Build the selected sheets and return the atlas paths written.
///
/// By default the first failing sheet aborts the batch. With `--keep-going`
/// every sheet is attempted, each failure is reported, and the command fails
/// at the end if any sheet did.
pub fn run(args: BuildArgs, printer: &Printer) -> Result<Vec<PathBuf>> {
    let manifest = Manifest::load(&args.manifest)?;
    let dir = args.dir.clone().unwrap_or_else(|| manifest.dir.clone());
    let out_dir = args.output.clone().unwrap_or_else(|| dir.clone());
    let sheets = manifest.select(&args.sheets)?;

    printer.verbose("Manifest", &display_path(&args.manifest));

    let mut written = Vec::with_capacity(sheets.len());
    let mut failed = 0usize;

    for sheet in &sheets {
        match build_sheet_entry(sheet, &dir, &out_dir, args.meta, printer) {
            Ok(path) => written.push(path),
            Err(err) => {
                let err = err.in_sheet(sheet.name());
                if !args.keep_going {
                    return Err(err);
                }
                printer.error("Failed", &err.to_string());
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(AtlasError::Batch {
            failed,
            total: sheets.len(),
        });
    }

    printer.status("Finished", &plural(written.len(), "atlas", "atlases"));

    Ok(written)
}

/// Compact one sheet and write its atlas (and metadata, if requested).
fn build_sheet_entry(
    sheet: &SheetEntry,
    dir: &Path,
    out_dir: &Path,
    force_meta: bool,
    printer: &Printer,
) -> Result<PathBuf> {
    let name = sheet.name();
    let source = sheet.source_path(dir);
    let params = &sheet.params;

    printer.status(
        "Compacting",
        &format!(
            "{} ({}, {})",
            name,
            display_path(&source),
            plural(params.expected_count, "sprite", "sprites")
        ),
    );

    let image = load_rgba(&source)?;
    let atlas = AtlasBuilder::new(params).build(&image)?;

    if printer.is_verbose() {
        for frame in &atlas.frames {
            let c = &frame.source;
            printer.verbose(
                &format!("#{}", frame.index),
                &format!(
                    "({}, {})-({}, {}) {} px -> cell ({}, {})",
                    c.min_x,
                    c.min_y,
                    c.max_x,
                    c.max_y,
                    c.pixels,
                    frame.col,
                    frame.row
                ),
            );
        }
    }

    for frame in atlas.blank_frames() {
        printer.warning(
            "Blank",
            &format!(
                "{} sprite #{} has no pixels above alpha {}",
                name, frame.index, params.alpha_cleanup
            ),
        );
    }

    let output = sheet.output_path(out_dir);
    write_png(&atlas.image, &output)?;
    printer.info(
        "Wrote",
        &format!(
            "{} ({}x{})",
            display_path(&output),
            atlas.width(),
            atlas.height()
        ),
    );

    if sheet.meta || force_meta {
        let meta = sheet.meta_path(out_dir);
        let image_name = output
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        write_sheet_json(&atlas, &name, image_name, &meta)?;
        printer.info("Wrote", &display_path(&meta));
    }

    Ok(output)
}
