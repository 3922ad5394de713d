//! Exhaustive pairing of compatible short edges across a sprite sheet

use crate::edges::geometry::{Direction, are_directions_compatible};
use crate::edges::signature::{EdgeSignature, extract_all_edges};
use crate::io::configuration::{
    DEFAULT_BAND_HALF_WIDTH, DEFAULT_EDGE_TYPE_THRESHOLD, DEFAULT_MIN_EDGE_LENGTH,
    DEFAULT_SIMILARITY_FLOOR,
};
use crate::sheet::grid::{SpriteId, SpriteSheet};
use std::cmp::Ordering;

/// Tunable thresholds for edge extraction and the pairing pass
///
/// The defaults are the heuristic values tuned against the coastline sheet;
/// other sheet geometries can override them from the command line.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    /// Half-width of the sampling band around each corner path
    pub band_half_width: i64,
    /// Minimum pixel count for an edge to be retained at all
    pub min_edge_length: usize,
    /// Length at or above which an edge is full rather than transitional
    pub edge_type_threshold: f64,
    /// Similarity percentage a candidate match must exceed
    pub similarity_floor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            band_half_width: DEFAULT_BAND_HALF_WIDTH,
            min_edge_length: DEFAULT_MIN_EDGE_LENGTH,
            edge_type_threshold: DEFAULT_EDGE_TYPE_THRESHOLD,
            similarity_floor: DEFAULT_SIMILARITY_FLOOR,
        }
    }
}

/// Retained edge signatures for one sprite
#[derive(Debug, Clone)]
pub struct SpriteEdges {
    /// Grid position of the sprite
    pub id: SpriteId,
    /// Retained signatures in direction enumeration order
    pub edges: Vec<EdgeSignature>,
}

/// One candidate pairing for an edge of a sprite
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMatch {
    /// Sprite the matching edge belongs to
    pub sprite: SpriteId,
    /// Direction of the matching edge
    pub direction: Direction,
    /// Length of the matching edge
    pub length: usize,
    /// Similarity percentage in [0, 100]
    pub similarity: f64,
}

/// Candidate matches for one transitional edge of a sprite
#[derive(Debug, Clone)]
pub struct EdgeConnections {
    /// Direction of the edge being matched
    pub direction: Direction,
    /// Length of the edge being matched
    pub length: usize,
    /// Matches sorted by non-increasing similarity
    pub matches: Vec<EdgeMatch>,
}

/// Connection records for one sprite
#[derive(Debug, Clone)]
pub struct SpriteConnections {
    /// Grid position of the sprite
    pub id: SpriteId,
    /// One record per transitional edge, in direction enumeration order
    pub edges: Vec<EdgeConnections>,
}

impl SpriteConnections {
    /// Whether any edge of this sprite found at least one match
    pub fn has_matches(&self) -> bool {
        self.edges.iter().any(|edge| !edge.matches.is_empty())
    }
}

/// Edge index and pairing results for a whole sheet
#[derive(Debug, Clone)]
pub struct SheetAnalysis {
    /// Retained edge sets per sprite, row-major
    pub edges: Vec<SpriteEdges>,
    /// Pairing results per sprite, row-major
    pub connections: Vec<SpriteConnections>,
}

/// Similarity score between two edges, a symmetric percentage in [0, 100]
///
/// Zero when either edge is zero-length; 100 only when the lengths are
/// exactly equal; decreases linearly with the relative length difference.
/// Pixel positions are never compared, only aggregate counts.
pub fn similarity(first: &EdgeSignature, second: &EdgeSignature) -> f64 {
    if first.length == 0 || second.length == 0 {
        return 0.0;
    }

    let difference = first.length.abs_diff(second.length) as f64;
    let longest = first.length.max(second.length) as f64;
    (100.0 * (1.0 - difference / longest)).max(0.0)
}

/// Build the per-sprite retained edge index for a sheet, row-major
pub fn edge_index(sheet: &SpriteSheet, config: &AnalysisConfig) -> Vec<SpriteEdges> {
    sheet
        .sprites()
        .iter()
        .map(|sprite| SpriteEdges {
            id: sprite.id(),
            edges: extract_all_edges(sprite, config.band_half_width, config.min_edge_length),
        })
        .collect()
}

// Candidates for one edge: every short compatible edge of every sprite in the
// index, self included, scored and filtered by the similarity floor.
fn collect_matches(
    edge: &EdgeSignature,
    index: &[SpriteEdges],
    config: &AnalysisConfig,
) -> Vec<EdgeMatch> {
    let mut matches: Vec<EdgeMatch> = index
        .iter()
        .flat_map(|other| {
            other
                .edges
                .iter()
                .filter(|candidate| candidate.length as f64 <= config.edge_type_threshold)
                .filter(|candidate| are_directions_compatible(edge.direction, candidate.direction))
                .filter_map(|candidate| {
                    let score = similarity(edge, candidate);
                    (score > config.similarity_floor).then(|| EdgeMatch {
                        sprite: other.id,
                        direction: candidate.direction,
                        length: candidate.length,
                        similarity: score,
                    })
                })
        })
        .collect();

    // Stable sort keeps insertion order between equal scores
    matches.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    matches
}

/// Pair every transitional edge against every compatible transitional edge
///
/// Edges longer than the edge-type threshold are excluded from pairing on
/// both sides (equality is retained). Each retained short edge produces a
/// record even when no candidate survives the similarity floor.
pub fn analyze_connections(
    index: &[SpriteEdges],
    config: &AnalysisConfig,
) -> Vec<SpriteConnections> {
    index
        .iter()
        .map(|sprite| SpriteConnections {
            id: sprite.id,
            edges: sprite
                .edges
                .iter()
                .filter(|edge| edge.length as f64 <= config.edge_type_threshold)
                .map(|edge| EdgeConnections {
                    direction: edge.direction,
                    length: edge.length,
                    matches: collect_matches(edge, index, config),
                })
                .collect(),
        })
        .collect()
}

/// Run edge extraction and connection analysis over a whole sheet
pub fn analyze_sheet(sheet: &SpriteSheet, config: &AnalysisConfig) -> SheetAnalysis {
    let edges = edge_index(sheet, config);
    let connections = analyze_connections(&edges, config);
    SheetAnalysis { edges, connections }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::geometry::Corner;

    fn signature(direction: Direction, length: usize) -> EdgeSignature {
        EdgeSignature {
            direction,
            length,
            pixels: Vec::new(),
        }
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = signature(Direction::new(Corner::Right, Corner::Bottom), 20);
        let b = signature(Direction::new(Corner::Top, Corner::Left), 18);
        assert!((similarity(&a, &b) - similarity(&b, &a)).abs() < f64::EPSILON);
        assert!((similarity(&a, &b) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_similarity_of_equal_nonzero_lengths_is_hundred() {
        let a = signature(Direction::new(Corner::Top, Corner::Right), 33);
        let b = signature(Direction::new(Corner::Left, Corner::Bottom), 33);
        assert!((similarity(&a, &b) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similarity_with_zero_length_is_zero() {
        let a = signature(Direction::new(Corner::Top, Corner::Right), 0);
        let b = signature(Direction::new(Corner::Left, Corner::Bottom), 25);
        assert!(similarity(&a, &b).abs() < f64::EPSILON);
        assert!(similarity(&b, &a).abs() < f64::EPSILON);
        assert!(similarity(&a, &a).abs() < f64::EPSILON);
    }
}
