//! atlasify - Sprite sheet compactor
//!
//! A library for turning loosely arranged, hand-authored sprite sheets into
//! dense fixed-grid atlases: sprites are found by connected-component
//! analysis of the alpha channel, put in reading order, and normalized into
//! uniform, centered cells.

pub mod cli;
pub mod error;
pub mod manifest;
pub mod output;
pub mod render;
pub mod segment;
pub mod types;

pub use error::{AtlasError, Result};
pub use manifest::{Manifest, SheetEntry, MANIFEST_FILENAME};
pub use render::{
    build_sheet, grid_position, load_rgba, write_png, write_sheet_json, Atlas, AtlasBuilder,
    CellNormalizer, Frame,
};
pub use segment::{detect, ComponentScanner, RowMajorSorter};
pub use types::{
    AlphaMask, Component, SheetParams, DEFAULT_ALPHA_THRESHOLD, DEFAULT_MIN_PIXELS,
    DEFAULT_ROW_GAP,
};
