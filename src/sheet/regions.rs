//! Detection of rectangular sprite regions bounded by a separator color
//!
//! The separator color is whatever the sheet holds at pixel (0,0). A region
//! is accepted only when its interior is entirely non-separator and all four
//! bounding rows/columns are separator or image boundary, so non-rectangular
//! separator-bounded shapes are rejected rather than mislabeled.

use crate::io::error::{PipelineError, Result};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::path::Path;

/// Axis-aligned rectangle detected in a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

// Visited mask over the image, row-major.
struct VisitedMask {
    cells: Vec<bool>,
    width: u32,
}

impl VisitedMask {
    fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![false; (width as usize) * (height as usize)],
            width,
        }
    }

    fn get(&self, x: u32, y: u32) -> bool {
        self.cells
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
            .unwrap_or(false)
    }

    fn mark_rect(&mut self, region: Region) {
        for y in region.y..region.y.saturating_add(region.height) {
            for x in region.x..region.x.saturating_add(region.width) {
                let index = (y as usize) * (self.width as usize) + x as usize;
                if let Some(cell) = self.cells.get_mut(index) {
                    *cell = true;
                }
            }
        }
    }
}

fn pixel(image: &RgbaImage, x: u32, y: u32) -> Option<&Rgba<u8>> {
    image.get_pixel_checked(x, y)
}

fn is_separator(image: &RgbaImage, separator: Rgba<u8>, x: u32, y: u32) -> bool {
    pixel(image, x, y).is_some_and(|p| *p == separator)
}

// Measures how far the region extends rightward/downward from its top-left
// corner before hitting the separator color.
fn measure_extent(
    image: &RgbaImage,
    separator: Rgba<u8>,
    start: (u32, u32),
    horizontal: bool,
) -> u32 {
    let limit = if horizontal {
        image.width()
    } else {
        image.height()
    };
    let from = if horizontal { start.0 } else { start.1 };

    let mut extent = 0;
    for position in from..limit {
        let (x, y) = if horizontal {
            (position, start.1)
        } else {
            (start.0, position)
        };
        if is_separator(image, separator, x, y) {
            break;
        }
        extent += 1;
    }
    extent
}

fn interior_is_clear(image: &RgbaImage, separator: Rgba<u8>, region: Region) -> bool {
    for y in region.y..region.y.saturating_add(region.height) {
        for x in region.x..region.x.saturating_add(region.width) {
            if is_separator(image, separator, x, y) {
                return false;
            }
        }
    }
    true
}

// All four bounding rows/columns outside the rectangle must be separator
// pixels or lie on the image boundary.
fn boundary_is_separator(image: &RgbaImage, separator: Rgba<u8>, region: Region) -> bool {
    let right = region.x.saturating_add(region.width);
    let bottom = region.y.saturating_add(region.height);

    if region.y > 0 {
        for x in region.x..right {
            if !is_separator(image, separator, x, region.y - 1) {
                return false;
            }
        }
    }
    if bottom < image.height() {
        for x in region.x..right {
            if !is_separator(image, separator, x, bottom) {
                return false;
            }
        }
    }
    if region.x > 0 {
        for y in region.y..bottom {
            if !is_separator(image, separator, region.x - 1, y) {
                return false;
            }
        }
    }
    if right < image.width() {
        for y in region.y..bottom {
            if !is_separator(image, separator, right, y) {
                return false;
            }
        }
    }
    true
}

/// Find rectangular regions separated by the color at pixel (0,0)
///
/// Row-major scan; each candidate's area is marked visited whether or not it
/// validates, so overlapping rescans never occur. Empty images yield an
/// empty list.
pub fn find_regions(image: &RgbaImage) -> Vec<Region> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let Some(separator) = pixel(image, 0, 0).copied() else {
        return Vec::new();
    };

    let mut visited = VisitedMask::new(width, height);
    let mut regions = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if visited.get(x, y) || is_separator(image, separator, x, y) {
                continue;
            }

            let region = Region {
                x,
                y,
                width: measure_extent(image, separator, (x, y), true),
                height: measure_extent(image, separator, (x, y), false),
            };

            let valid = interior_is_clear(image, separator, region)
                && boundary_is_separator(image, separator, region);

            visited.mark_rect(region);
            if valid {
                regions.push(region);
            }
        }
    }

    regions
}

/// Load an image and find its separator-bounded regions
///
/// # Errors
///
/// Returns an error if the image cannot be opened or decoded.
pub fn detect_regions<P: AsRef<Path>>(path: P) -> Result<Vec<Region>> {
    let path_buf = path.as_ref().to_path_buf();
    let image = image::open(&path_buf).map_err(|e| PipelineError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    Ok(find_regions(&image.to_rgba8()))
}

/// Resolve a proposed region name against the names already taken
///
/// Empty proposals fall back to `rect_{index}`; collisions get a numeric
/// `_{n}` suffix.
pub fn resolve_region_name(
    taken: &BTreeMap<String, Region>,
    proposal: &str,
    index: usize,
) -> String {
    let base = if proposal.trim().is_empty() {
        format!("rect_{index}")
    } else {
        proposal.trim().to_string()
    };

    if !taken.contains_key(&base) {
        return base;
    }

    let mut counter = 1;
    let mut candidate = format!("{base}_{counter}");
    while taken.contains_key(&candidate) {
        counter += 1;
        candidate = format!("{base}_{counter}");
    }
    candidate
}

/// Interactively assign a name to each region
///
/// Prompts are written to `prompt` (stderr in the CLI) and names are read one
/// line at a time from `input`. Exhausted input falls back to the generated
/// names.
///
/// # Errors
///
/// Returns an error if reading a name or writing a prompt fails.
pub fn name_regions_interactive<R: BufRead, W: Write>(
    regions: &[Region],
    mut input: R,
    mut prompt: W,
) -> Result<BTreeMap<String, Region>> {
    writeln!(
        prompt,
        "\nFound {} rectangles. Please name each one:",
        regions.len()
    )?;
    writeln!(prompt, "(Press Enter to use an auto-generated name)\n")?;

    let mut named = BTreeMap::new();
    for (index, &region) in regions.iter().enumerate() {
        writeln!(prompt, "Rectangle {index}:")?;
        writeln!(prompt, "  Position: ({}, {})", region.x, region.y)?;
        writeln!(prompt, "  Size: {}x{}", region.width, region.height)?;
        write!(prompt, "  Name: ")?;
        prompt.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        let name = resolve_region_name(&named, &line, index);
        if name != line.trim() && !line.trim().is_empty() {
            writeln!(prompt, "  (Name already used, using '{name}' instead)")?;
        }
        named.insert(name, region);
        writeln!(prompt)?;
    }

    Ok(named)
}
