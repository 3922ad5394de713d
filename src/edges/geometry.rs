//! Hex-corner geometry, directed edges, and the fixed compatibility table

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One of the four named corner positions on a hex-shaped tile sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Corner {
    /// Top point of the hex outline
    Top,
    /// Right point of the hex outline
    Right,
    /// Bottom point of the hex outline
    Bottom,
    /// Left point of the hex outline
    Left,
}

impl Corner {
    /// All corners in index order
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Numeric index of this corner (0-3)
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Corner for a numeric index, if in range
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Top),
            1 => Some(Self::Right),
            2 => Some(Self::Bottom),
            3 => Some(Self::Left),
            _ => None,
        }
    }

    /// Pixel position of this corner for a sprite of the given dimensions
    ///
    /// Reproduces the fixed table for 102x52 sprites: (51,0), (101,25),
    /// (51,51), (0,25). Coordinates are signed so degenerate sprite sizes
    /// stay representable; sampling bounds-checks against the sprite anyway.
    pub const fn position(self, width: u32, height: u32) -> (i64, i64) {
        let w = width as i64;
        let h = height as i64;
        match self {
            Self::Top => (w / 2, 0),
            Self::Right => (w - 1, h / 2 - 1),
            Self::Bottom => (w / 2, h - 1),
            Self::Left => (0, h / 2 - 1),
        }
    }
}

/// A directed corner-to-corner edge of a sprite, displayed as `"0->1"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction {
    /// Corner the edge starts from
    pub from: Corner,
    /// Corner the edge runs to
    pub to: Corner,
}

impl Direction {
    /// The eight directed corner pairs that run along hex tile sides
    ///
    /// Each geometrically adjacent corner pair appears in both orientations;
    /// diagonals (top-bottom, left-right) are not edges.
    pub const VALID: [Self; 8] = [
        Self::new(Corner::Top, Corner::Right),
        Self::new(Corner::Right, Corner::Top),
        Self::new(Corner::Right, Corner::Bottom),
        Self::new(Corner::Bottom, Corner::Right),
        Self::new(Corner::Bottom, Corner::Left),
        Self::new(Corner::Left, Corner::Bottom),
        Self::new(Corner::Left, Corner::Top),
        Self::new(Corner::Top, Corner::Left),
    ];

    /// Create a direction from two corners
    pub const fn new(from: Corner, to: Corner) -> Self {
        Self { from, to }
    }

    /// The direction on a neighboring sprite that can physically abut this one
    ///
    /// The mapping is a fixed involution over the eight valid directions,
    /// derived from the hex-tile adjacency geometry; it never inspects pixel
    /// data. Invalid corner pairs have no counterpart.
    pub const fn counterpart(self) -> Option<Self> {
        use Corner::{Bottom, Left, Right, Top};
        match (self.from, self.to) {
            (Left, Bottom) => Some(Self::new(Top, Right)),
            (Top, Right) => Some(Self::new(Left, Bottom)),
            (Right, Bottom) => Some(Self::new(Top, Left)),
            (Top, Left) => Some(Self::new(Right, Bottom)),
            (Bottom, Right) => Some(Self::new(Left, Top)),
            (Left, Top) => Some(Self::new(Bottom, Right)),
            (Right, Top) => Some(Self::new(Bottom, Left)),
            (Bottom, Left) => Some(Self::new(Right, Top)),
            _ => None,
        }
    }
}

/// Check whether two edge directions can abut on neighboring sprites
///
/// Content-independent: only the geometric adjacency type is checked, never
/// pixel data. Symmetric over the eight valid directions.
pub fn are_directions_compatible(first: Direction, second: Direction) -> bool {
    first.counterpart() == Some(second)
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from.index(), self.to.index())
    }
}

/// Error returned when a direction label cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError {
    input: String,
}

impl fmt::Display for ParseDirectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid direction label '{}'", self.input)
    }
}

impl std::error::Error for ParseDirectionError {}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParseDirectionError {
            input: s.to_string(),
        };
        let (from_part, to_part) = s.split_once("->").ok_or_else(err)?;
        let from_index: usize = from_part.parse().map_err(|_| err())?;
        let to_index: usize = to_part.parse().map_err(|_| err())?;
        let from = Corner::from_index(from_index).ok_or_else(err)?;
        let to = Corner::from_index(to_index).ok_or_else(err)?;
        Ok(Self::new(from, to))
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(D::Error::custom)
    }
}

/// All pixels along a line between two points, endpoints included
///
/// Integer Bresenham rasterization: every step from start to end is visited
/// with no gaps, regardless of slope or direction.
pub fn line_pixels(x1: i64, y1: i64, x2: i64, y2: i64) -> Vec<(i64, i64)> {
    let mut pixels = Vec::new();
    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx - dy;

    let (mut x, mut y) = (x1, y1);
    loop {
        pixels.push((x, y));
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }

    pixels
}
