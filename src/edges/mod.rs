//! Transition-tile edge analysis
//!
//! This module contains the edge-matching analyzer:
//! - Hex-corner geometry and the fixed compatibility table
//! - Band-sampled edge signature extraction with origin validation
//! - The exhaustive pairing pass over compatible short edges
//! - The serializable full/connect tile map projection

/// Exhaustive pairing of compatible short edges
pub mod connections;
/// Corners, directions, compatibility, and line rasterization
pub mod geometry;
/// Alpha-channel edge signature extraction
pub mod signature;
/// Serializable tile map projection
pub mod tilemap;

pub use connections::{AnalysisConfig, SheetAnalysis, analyze_sheet};
pub use geometry::{Corner, Direction};
pub use signature::EdgeSignature;
pub use tilemap::{TileMap, project_tile_map};
