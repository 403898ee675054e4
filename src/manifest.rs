//! Batch manifest (atlasify.yaml) parsing.
//!
//! The manifest names the asset directory and lists every sheet to compact
//! along with its grid and threshold parameters.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AtlasError, Result};
use crate::types::SheetParams;

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "atlasify.yaml";

/// Batch manifest loaded from atlasify.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory holding source sheets; atlases are written next to them.
    /// Relative paths are resolved against the manifest's own directory.
    pub dir: PathBuf,

    /// Sheets to process, in order.
    pub sheets: Vec<SheetEntry>,
}

/// One sheet to compact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetEntry {
    /// Label for messages and frame names (default: source file stem).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Source sheet, relative to the manifest directory.
    pub source: PathBuf,

    /// Output atlas (default: `<source stem>_compact.png`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Also write TexturePacker frame metadata beside the atlas.
    #[serde(default)]
    pub meta: bool,

    #[serde(flatten)]
    pub params: SheetParams,
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            sheets: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from an atlasify.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| AtlasError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        let mut manifest = Self::parse(&content)?;
        if manifest.dir.is_relative() {
            if let Some(parent) = path.parent() {
                manifest.dir = parent.join(&manifest.dir);
            }
        }

        Ok(manifest)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        let manifest: Self = serde_yaml::from_str(content).map_err(|e| AtlasError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })?;

        manifest.validate()?;
        Ok(manifest)
    }

    /// Check sheet names are unique and every sheet's parameters are usable.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for sheet in &self.sheets {
            let name = sheet.name();
            if !seen.insert(name.clone()) {
                return Err(AtlasError::Config {
                    message: format!("Duplicate sheet name '{}'", name),
                    help: Some("Give each sheet a unique `name`".to_string()),
                });
            }

            sheet.params.validate().map_err(|e| e.in_sheet(&name))?;
        }

        Ok(())
    }

    /// Pick sheets by name, preserving manifest order. An empty selection
    /// means every sheet.
    pub fn select(&self, names: &[String]) -> Result<Vec<&SheetEntry>> {
        if names.is_empty() {
            return Ok(self.sheets.iter().collect());
        }

        if let Some(unknown) = names
            .iter()
            .find(|n| !self.sheets.iter().any(|s| &s.name() == *n))
        {
            let available: Vec<String> = self.sheets.iter().map(SheetEntry::name).collect();
            return Err(AtlasError::Config {
                message: format!("No sheet named '{}'", unknown),
                help: Some(format!("Available sheets: {}", available.join(", "))),
            });
        }

        Ok(self
            .sheets
            .iter()
            .filter(|s| names.contains(&s.name()))
            .collect())
    }

    /// The three sheets of the stock character/item/hazard set.
    pub fn stock() -> Self {
        Self {
            dir: PathBuf::from("public/sprites"),
            sheets: vec![
                SheetEntry::new(
                    "characters",
                    "characters_sheet.png",
                    SheetParams::new(30, 10, 3, 16, 16),
                ),
                SheetEntry::new(
                    "items",
                    "items_sheet.png",
                    SheetParams::new(5, 5, 1, 16, 16).with_thresholds(128, 1000, 96),
                ),
                SheetEntry::new(
                    "hazards",
                    "hazards_sheet.png",
                    SheetParams::new(8, 8, 1, 32, 32),
                ),
            ],
        }
    }
}

impl SheetEntry {
    pub fn new(name: &str, source: impl Into<PathBuf>, params: SheetParams) -> Self {
        Self {
            name: Some(name.to_string()),
            source: source.into(),
            output: None,
            meta: false,
            params,
        }
    }

    /// Display name: the explicit `name`, else the source file stem.
    pub fn name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.source
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("sheet")
                .to_string()
        })
    }

    pub fn source_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.source)
    }

    /// Output atlas path. Defaults to `<source stem>_compact.png` in `dir`.
    pub fn output_path(&self, dir: &Path) -> PathBuf {
        match &self.output {
            Some(output) => dir.join(output),
            None => {
                let stem = self
                    .source
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("sheet");
                dir.join(format!("{}_compact.png", stem))
            }
        }
    }

    /// Metadata path: the output path with a `.json` extension.
    pub fn meta_path(&self, dir: &Path) -> PathBuf {
        self.output_path(dir).with_extension("json")
    }
}
