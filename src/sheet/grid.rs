//! Sprite sheet loading and fixed-grid sprite extraction

use crate::io::error::{PipelineError, Result};
use image::RgbaImage;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Grid position of a sprite within its sheet, displayed as `"row,col"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId {
    /// Row within the sheet grid
    pub row: u32,
    /// Column within the sheet grid
    pub col: u32,
}

impl SpriteId {
    /// Create a sprite id from a grid position
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Error returned when a sprite id key cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSpriteIdError {
    input: String,
}

impl fmt::Display for ParseSpriteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid sprite id '{}'", self.input)
    }
}

impl std::error::Error for ParseSpriteIdError {}

impl FromStr for SpriteId {
    type Err = ParseSpriteIdError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let err = || ParseSpriteIdError {
            input: s.to_string(),
        };
        let (row_part, col_part) = s.split_once(',').ok_or_else(err)?;
        let row = row_part.trim().parse().map_err(|_| err())?;
        let col = col_part.trim().parse().map_err(|_| err())?;
        Ok(Self { row, col })
    }
}

impl Serialize for SpriteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SpriteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(D::Error::custom)
    }
}

/// A single sprite cropped from a sheet, immutable once extracted
#[derive(Debug, Clone)]
pub struct Sprite {
    id: SpriteId,
    image: RgbaImage,
}

impl Sprite {
    /// Wrap an image buffer as a sprite at the given grid position
    pub const fn new(id: SpriteId, image: RgbaImage) -> Self {
        Self { id, image }
    }

    /// Grid position of this sprite
    pub const fn id(&self) -> SpriteId {
        self.id
    }

    /// Pixel width of this sprite
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Pixel height of this sprite
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Alpha value at a signed pixel position, or `None` when out of bounds
    pub fn alpha_at(&self, x: i64, y: i64) -> Option<u8> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        self.image
            .get_pixel_checked(x, y)
            .and_then(|pixel| pixel.0.get(3).copied())
    }
}

/// Grid of sprites extracted from a sheet image
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    sprites: Vec<Sprite>,
    rows: u32,
    cols: u32,
}

impl SpriteSheet {
    /// Load a sheet image and crop it into a grid of sprites
    ///
    /// `total_rows` is the row count of the full sheet and determines the
    /// per-sprite height; only the first `rows` rows are extracted.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be opened or decoded.
    pub fn load<P: AsRef<Path>>(path: P, cols: u32, rows: u32, total_rows: u32) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let sheet = image::open(&path_buf).map_err(|e| PipelineError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        Ok(Self::from_image(&sheet.to_rgba8(), cols, rows, total_rows))
    }

    /// Crop an in-memory sheet image into a grid of sprites
    ///
    /// Cell size is the integer division of sheet width by `cols` and sheet
    /// height by `total_rows`. An empty sheet, or one too small to hold a
    /// single cell, yields no sprites rather than an error.
    pub fn from_image(sheet: &RgbaImage, cols: u32, rows: u32, total_rows: u32) -> Self {
        let sprite_width = sheet.width().checked_div(cols).unwrap_or(0);
        let sprite_height = sheet.height().checked_div(total_rows).unwrap_or(0);

        if sprite_width == 0 || sprite_height == 0 {
            return Self {
                sprites: Vec::new(),
                rows: 0,
                cols: 0,
            };
        }

        let mut sprites = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let x = col * sprite_width;
                let y = row * sprite_height;
                let cell =
                    image::imageops::crop_imm(sheet, x, y, sprite_width, sprite_height).to_image();
                sprites.push(Sprite::new(SpriteId::new(row, col), cell));
            }
        }

        Self {
            sprites,
            rows,
            cols,
        }
    }

    /// Sprites in row-major order
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Number of extracted rows
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of extracted columns
    pub const fn cols(&self) -> u32 {
        self.cols
    }
}
