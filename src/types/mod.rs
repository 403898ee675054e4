//! Core data types for atlasify.

mod component;
mod mask;
mod params;

pub use component::Component;
pub use mask::AlphaMask;
pub use params::{SheetParams, DEFAULT_ALPHA_THRESHOLD, DEFAULT_MIN_PIXELS, DEFAULT_ROW_GAP};
