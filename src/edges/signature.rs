//! Directional alpha-channel edge signatures sampled along corner paths

use crate::edges::geometry::{Direction, line_pixels};
use crate::io::configuration::{ALPHA_OPAQUE_THRESHOLD, EDGE_ORIGIN_MAX_START, EDGE_ORIGIN_SCAN};
use crate::sheet::grid::Sprite;
use std::collections::HashSet;

/// Alpha pattern found along one corner-to-corner path of a sprite
///
/// Computed once per sprite per direction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeSignature {
    /// Direction the path was sampled along
    pub direction: Direction,
    /// Count of present pixels collected over the whole path
    pub length: usize,
    /// Coordinates of the present pixels, in scan order
    pub pixels: Vec<(i64, i64)>,
}

impl EdgeSignature {
    /// A zero-length signature for the given direction
    pub const fn empty(direction: Direction) -> Self {
        Self {
            direction,
            length: 0,
            pixels: Vec::new(),
        }
    }
}

// Perpendicular to the path direction, unit length; (0,0) when the path is
// degenerate so band offsets collapse onto the line itself.
fn perpendicular(dx: i64, dy: i64) -> (f64, f64) {
    let length = ((dx * dx + dy * dy) as f64).sqrt();
    if length == 0.0 {
        (0.0, 0.0)
    } else {
        (-(dy as f64) / length, dx as f64 / length)
    }
}

fn band_offsets(half_width: i64) -> std::ops::RangeInclusive<i64> {
    -half_width..=half_width
}

// A band sample counts as present when its alpha exceeds the opacity threshold.
fn band_has_present(
    sprite: &Sprite,
    center: (i64, i64),
    perp: (f64, f64),
    half_width: i64,
) -> bool {
    band_offsets(half_width).any(|offset| {
        let check_x = (center.0 as f64 + offset as f64 * perp.0) as i64;
        let check_y = (center.1 as f64 + offset as f64 * perp.1) as i64;
        sprite
            .alpha_at(check_x, check_y)
            .is_some_and(|alpha| alpha > ALPHA_OPAQUE_THRESHOLD)
    })
}

/// Extract the edge signature between two corners of a sprite
///
/// Walks the straight-line pixel path between the corner positions and, for
/// each path point, samples a perpendicular band of `2 * half_width + 1`
/// pixels. Coordinates are deduplicated across the whole scan; a sample is
/// present when its alpha exceeds 128.
///
/// An origin-validity gate then inspects the first 10 path points (fewer on a
/// shorter path): if no band sample there is present, or the first present one
/// occurs beyond path index 5, the whole edge is discarded as zero-length.
/// This rejects "edges" that do not actually start at the claimed corner,
/// distinguishing a real transition edge from incidental nearby artwork.
pub fn extract_edge(sprite: &Sprite, direction: Direction, band_half_width: i64) -> EdgeSignature {
    let (x1, y1) = direction.from.position(sprite.width(), sprite.height());
    let (x2, y2) = direction.to.position(sprite.width(), sprite.height());

    let path = line_pixels(x1, y1, x2, y2);
    let perp = perpendicular(x2 - x1, y2 - y1);

    let mut seen = HashSet::new();
    let mut pixels = Vec::new();

    for &(x, y) in &path {
        for offset in band_offsets(band_half_width) {
            let check_x = (x as f64 + offset as f64 * perp.0) as i64;
            let check_y = (y as f64 + offset as f64 * perp.1) as i64;
            if !seen.insert((check_x, check_y)) {
                continue;
            }
            if sprite
                .alpha_at(check_x, check_y)
                .is_some_and(|alpha| alpha > ALPHA_OPAQUE_THRESHOLD)
            {
                pixels.push((check_x, check_y));
            }
        }
    }

    if !pixels.is_empty() {
        let first_present = path
            .iter()
            .take(EDGE_ORIGIN_SCAN)
            .position(|&point| band_has_present(sprite, point, perp, band_half_width));

        if !first_present.is_some_and(|index| index <= EDGE_ORIGIN_MAX_START) {
            pixels.clear();
        }
    }

    EdgeSignature {
        direction,
        length: pixels.len(),
        pixels,
    }
}

/// Extract the retained edge set of a sprite
///
/// Computes a signature for each of the eight valid directions and keeps only
/// those whose length meets the minimum-length noise floor. Retention order
/// follows the fixed direction enumeration.
pub fn extract_all_edges(
    sprite: &Sprite,
    band_half_width: i64,
    min_length: usize,
) -> Vec<EdgeSignature> {
    Direction::VALID
        .iter()
        .map(|&direction| extract_edge(sprite, direction, band_half_width))
        .filter(|edge| edge.length >= min_length)
        .collect()
}
