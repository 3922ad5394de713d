//! Rendering of analysis results as text or JSON

use crate::edges::connections::SheetAnalysis;
use crate::edges::tilemap::TileMap;
use crate::io::configuration::REPORT_MATCH_LIMIT;
use crate::io::error::{Result, fs_error};
use std::fmt::Write as _;
use std::path::Path;

fn pixel_extent_line(pixels: &[(i64, i64)], indent: &str) -> Option<String> {
    let first = pixels.first()?;
    let last = pixels.last()?;
    Some(format!(
        "{indent}Pixels: ({}, {}) -> ({}, {})\n",
        first.0, first.1, last.0, last.1
    ))
}

/// Render the per-sprite, per-edge candidate match report
///
/// Sprites without any match are omitted; matches are capped at the report
/// limit per edge. With `show_pixels` the first and last collected pixel of
/// each edge is included.
pub fn render_report(analysis: &SheetAnalysis, show_pixels: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Transition Sprite Connections");
    let _ = writeln!(out, "{}", "=".repeat(70));
    let _ = writeln!(out);

    for sprite in &analysis.connections {
        if !sprite.has_matches() {
            continue;
        }

        let _ = writeln!(out, "Sprite ({},{}):", sprite.id.row, sprite.id.col);

        let retained = analysis
            .edges
            .iter()
            .find(|candidate| candidate.id == sprite.id);

        let mut ordered: Vec<_> = sprite.edges.iter().collect();
        ordered.sort_by_key(|edge| edge.direction);

        for edge in ordered {
            let _ = writeln!(out, "  Edge [{}] (length: {}):", edge.direction, edge.length);

            if show_pixels {
                let signature = retained.and_then(|sprite_edges| {
                    sprite_edges
                        .edges
                        .iter()
                        .find(|candidate| candidate.direction == edge.direction)
                });
                if let Some(line) =
                    signature.and_then(|s| pixel_extent_line(&s.pixels, "    "))
                {
                    out.push_str(&line);
                }
            }

            for matched in edge.matches.iter().take(REPORT_MATCH_LIMIT) {
                let _ = writeln!(
                    out,
                    "    Connects to: Sprite ({},{}) [{}] (length: {}) (similarity: {:.1}%)",
                    matched.sprite.row,
                    matched.sprite.col,
                    matched.direction,
                    matched.length,
                    matched.similarity
                );

                if show_pixels {
                    let other = analysis
                        .edges
                        .iter()
                        .find(|candidate| candidate.id == matched.sprite)
                        .and_then(|sprite_edges| {
                            sprite_edges
                                .edges
                                .iter()
                                .find(|candidate| candidate.direction == matched.direction)
                        });
                    if let Some(line) =
                        other.and_then(|s| pixel_extent_line(&s.pixels, "      "))
                    {
                        out.push_str(&line);
                    }
                }
            }
        }

        let _ = writeln!(out);
    }

    out
}

/// Write a tile map as a pretty-printed JSON document
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn write_tile_map_json(map: &TileMap, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| fs_error(parent, "create directory", e))?;
        }
    }

    let json = serde_json::to_string_pretty(map)
        .map_err(|e| fs_error(path, "serialize tile map", std::io::Error::other(e)))?;
    std::fs::write(path, json).map_err(|e| fs_error(path, "write tile map", e))
}
