//! Serializable full/connect projection of a sheet analysis

use crate::edges::connections::SheetAnalysis;
use crate::edges::geometry::Direction;
use crate::sheet::grid::SpriteId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Edge classification of a single tile
///
/// Full edges span an entire side and are recorded by direction only;
/// transitional edges that found at least one match map to the candidate
/// neighbor positions, similarity discarded at this stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileEdges {
    /// Directions whose edge meets the edge-type threshold
    pub full: Vec<Direction>,
    /// Transitional directions mapped to candidate neighbor positions
    pub connect: BTreeMap<Direction, Vec<SpriteId>>,
}

/// Map from sheet position to per-tile edge classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileMap {
    /// Tiles keyed by their `"row,col"` sheet position
    pub tiles: BTreeMap<SpriteId, TileEdges>,
}

/// Collapse a sheet analysis into its serializable tile map
///
/// Every sprite of the analysis gets an entry, even when both partitions are
/// empty. Retained edges at or above the edge-type threshold are classified
/// full; edges below it contribute a connect entry only when at least one
/// candidate match survived the similarity floor.
pub fn project_tile_map(analysis: &SheetAnalysis, edge_type_threshold: f64) -> TileMap {
    let mut tiles = BTreeMap::new();

    for sprite in &analysis.edges {
        let connections = analysis
            .connections
            .iter()
            .find(|candidate| candidate.id == sprite.id);

        let mut entry = TileEdges::default();
        for edge in &sprite.edges {
            if edge.length as f64 >= edge_type_threshold {
                entry.full.push(edge.direction);
                continue;
            }

            let matched = connections
                .and_then(|sprite_connections| {
                    sprite_connections
                        .edges
                        .iter()
                        .find(|record| record.direction == edge.direction)
                })
                .filter(|record| !record.matches.is_empty());
            if let Some(record) = matched {
                entry.connect.insert(
                    edge.direction,
                    record.matches.iter().map(|m| m.sprite).collect(),
                );
            }
        }

        tiles.insert(sprite.id, entry);
    }

    TileMap { tiles }
}
