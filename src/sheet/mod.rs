//! Sprite sheet handling
//!
//! This module contains sheet-related functionality:
//! - Fixed-grid sprite extraction from sheet images
//! - Separator-color-bounded region detection

/// Sheet loading and grid extraction
pub mod grid;
/// Separator-bounded rectangle detection
pub mod regions;

pub use grid::{Sprite, SpriteId, SpriteSheet};
pub use regions::Region;
