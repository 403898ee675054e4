//! Init command implementation.
//!
//! Generates a starter `atlasify.yaml` describing the stock sheet set.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{AtlasError, Result};
use crate::manifest::{Manifest, MANIFEST_FILENAME};
use crate::output::{display_path, plural, Printer};

/// Create a starter atlasify.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory to create the manifest in (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing atlasify.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(AtlasError::Config {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    let manifest = Manifest::stock();
    let yaml = render_manifest(&manifest);

    fs::write(&manifest_path, &yaml).map_err(|e| AtlasError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    printer.status(
        "Created",
        &format!(
            "{} ({})",
            display_path(&manifest_path),
            plural(manifest.sheets.len(), "sheet", "sheets")
        ),
    );

    Ok(())
}

/// Build YAML manually for clean, commented formatting.
fn render_manifest(manifest: &Manifest) -> String {
    let mut yaml = String::new();

    yaml.push_str("# Sheets are read from and written to `dir`.\n");
    yaml.push_str(&format!("dir: {}\n", manifest.dir.display()));
    yaml.push_str("sheets:\n");

    for sheet in &manifest.sheets {
        let p = &sheet.params;
        yaml.push_str(&format!("  - name: {}\n", sheet.name()));
        yaml.push_str(&format!("    source: {}\n", sheet.source.display()));
        yaml.push_str(&format!("    expected: {}\n", p.expected_count));
        yaml.push_str(&format!("    cols: {}\n", p.cols));
        yaml.push_str(&format!("    rows: {}\n", p.rows));
        yaml.push_str(&format!("    cell_w: {}\n", p.cell_w));
        yaml.push_str(&format!("    cell_h: {}\n", p.cell_h));
        yaml.push_str(&format!("    alpha_threshold: {}\n", p.alpha_threshold));
        yaml.push_str(&format!("    min_pixels: {}\n", p.min_pixels));
        yaml.push_str(&format!("    alpha_cleanup: {}\n", p.alpha_cleanup));
        yaml.push_str(&format!("    pad: {}\n", p.pad));
        yaml.push_str(&format!("    row_gap: {}\n", p.row_gap));
    }

    yaml
}
