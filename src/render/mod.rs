//! Rendering module for atlasify.
//!
//! Normalizes detected sprites into cells and assembles them into the final
//! atlas image, plus PNG and metadata output.

mod atlas;
mod cell;
mod png;
mod sheet;

pub use atlas::{build_sheet, grid_position, Atlas, AtlasBuilder, Frame};
pub use cell::{is_fully_transparent, CellNormalizer};
pub use png::{load_rgba, write_png};
pub use sheet::write_sheet_json;
