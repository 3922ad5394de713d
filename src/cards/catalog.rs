//! Card catalog loading and derived image filenames

use crate::io::error::{PipelineError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// One card entry from the catalog JSON
///
/// Accepts both the raw Scryfall field names (`name`, `set`,
/// `collector_number`, `image_uris`) and the processed card-info names
/// (`CardName`, `SetID`, `CollectorNo`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Card {
    /// Card display name
    #[serde(default, alias = "CardName")]
    pub name: String,
    /// Set code the printing belongs to
    #[serde(default, rename = "set", alias = "SetID")]
    pub set_code: String,
    /// Collector number within the set
    #[serde(default, rename = "collector_number", alias = "CollectorNo")]
    pub collector_number: String,
    /// Image URLs for this printing
    #[serde(default)]
    pub image_uris: ImageUris,
}

/// Image URLs attached to a card entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageUris {
    /// Full-resolution PNG URL
    #[serde(default)]
    pub png: Option<String>,
}

impl Card {
    /// Whether the entry carries every field the filename scheme needs
    pub fn is_identified(&self) -> bool {
        !self.name.is_empty() && !self.set_code.is_empty() && !self.collector_number.is_empty()
    }

    /// Filename of the resized image for this card at the given width
    pub fn resized_file_name(&self, width: u32) -> String {
        format!(
            "{}-{}-{width}-{}.png",
            self.set_code,
            self.collector_number,
            sanitize_card_name(&self.name)
        )
    }

    /// Short `set-collector` label for progress messages
    pub fn label(&self) -> String {
        format!("{}-{}", self.set_code, self.collector_number)
    }
}

/// Load a card catalog from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not hold a JSON
/// array of card objects.
pub fn load_catalog(path: &Path) -> Result<Vec<Card>> {
    let text = std::fs::read_to_string(path).map_err(|e| PipelineError::FileSystem {
        path: path.to_path_buf(),
        operation: "read catalog",
        source: e,
    })?;

    serde_json::from_str(&text).map_err(|e| PipelineError::CardCatalog {
        path: path.to_path_buf(),
        reason: format!("expected an array of card objects: {e}"),
    })
}

/// Convert a card name to its safe filename form
///
/// Lowercases, strips characters outside word/whitespace/hyphen, collapses
/// whitespace and hyphen runs to a single hyphen, and trims leading and
/// trailing hyphens.
pub fn sanitize_card_name(name: &str) -> String {
    let mut sanitized = String::with_capacity(name.len());
    let mut separator_pending = false;

    for c in name.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            separator_pending = !sanitized.is_empty();
        } else if c.is_alphanumeric() || c == '_' {
            if separator_pending {
                sanitized.push('-');
                separator_pending = false;
            }
            sanitized.push(c);
        }
    }

    sanitized
}

/// Expected resized filenames for every fully identified catalog entry
pub fn expected_file_names(cards: &[Card], width: u32) -> HashSet<String> {
    cards
        .iter()
        .filter(|card| card.is_identified())
        .map(|card| card.resized_file_name(width))
        .collect()
}
