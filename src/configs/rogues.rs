//! Patching rogue config files with derived sprite filenames
//!
//! The walking and face images are not referenced by the original configs,
//! so the mapping is applied after the fact: face lines are matched against
//! the face image directory, walking-sprite lines come from the fixed
//! character table below.

use crate::io::error::{PipelineError, Result, fs_error};
use std::path::Path;

/// Character sprite codes and their display names
///
/// Target config filenames derive from the display name; walking-sprite and
/// shadow filenames derive from the code.
pub const CHARACTER_SPRITES: &[(&str, &str)] = &[
    ("W_Amg", "High Priest"),
    ("W_Fwz", "Priestess"),
    ("W_Kht", "Crusader"),
    ("W_Lrd", "Paladin"),
    ("W_Mwz", "Cleric"),
    ("W_Wg", "Arch Angel"),
    ("Bk_Amg", "Necromancer"),
    ("Bk_Djn", "Aga Galneer"),
    ("Bk_Fwz", "Witch"),
    ("Bk_Kht", "Undead Knight"),
    ("Bk_Lrd", "Vampire Lord"),
    ("Bk_Mwz", "Warlock"),
    ("Bk_Wg", "Nether Fiend"),
    ("Bu_Amg", "Thought Invoker"),
    ("Bu_Djn", "Saltrem Tor"),
    ("Bu_Fwz", "Seer"),
    ("Bu_Lrd", "Merfolk Shaman"),
    ("Bu_Mwz", "Conjurer"),
    ("Bu_Wrm", "Sea Drake"),
    ("Bu_Sft", "Shapeshifter"),
    ("R_Amg", "War Mage"),
    ("R_Djn", "Queltosh"),
    ("R_Fwz", "Sorceress"),
    ("R_Lrd", "Goblin Warlord"),
    ("R_Mwz", "Sorcerer"),
    ("R_Wrm", "Crag Hydra"),
    ("Troll", "Troll Shaman"),
    ("G_Amg", "Summoner"),
    ("G_Djn", "Alt_A_Kesh"),
    ("G_Fwz", "Enchantress"),
    ("G_Kht", "Beast Master"),
    ("G_Lrd", "Elvish Magi"),
    ("G_Mwz", "Druid"),
    ("G_Wrm", "Forest Dragon"),
    ("Dg_Bru", "Mandurang"),
    ("Dg_Gwr", "Prismat"),
    ("Dg_Rbg", "Dracur"),
    ("Dg_Uwb", "Whim"),
    ("Dg_Wug", "Kiska_Ra"),
    ("M_Ape", "Ape Lord"),
    ("M_Cen", "Centaur Warchief"),
    ("M_Cen2", "Centaur Shaman"),
    ("M_Fng", "Fungus Master"),
    ("M_Fwz", "Elementalist"),
    ("M_Kht", "Lord of Fate"),
    ("M_Lrd", "Mind Stealer"),
    ("M_Trl", "Sedge Beast"),
    ("M_Tsk", "Guardian of the Tusk"),
    ("M_Wg", "Winged Stallion"),
];

// Special-case shadow sheets shared between several characters; checked by
// substring before any prefix rule applies.
const SHADOW_XREF: &[(&str, &str)] = &[
    ("Kht", "Skht"),
    ("Djn", "Sdjn"),
    ("Fwz", "Sfwz"),
    ("Mwz", "Smwz"),
    ("Trl", "Strl"),
    ("Troll", "Strl"),
    ("Wrm", "Swrm"),
    ("Dg_", "S_Dg"),
    ("Ego_F", "Sego_F"),
    ("Ego_M", "Sego_M"),
];

/// Derive the shadow sprite name for a character sprite code
pub fn shadow_sprite_name(name: &str) -> String {
    for (pattern, shadow) in SHADOW_XREF {
        if name.contains(pattern) {
            return (*shadow).to_string();
        }
    }

    if name.chars().count() < 4 {
        return format!("S{name}");
    }

    let mut parts = name.split('_');
    let prefix = parts.next().unwrap_or_default();
    let Some(base) = parts.next() else {
        return format!("S{name}");
    };

    match prefix {
        // The W_ prefix keeps the full remainder, underscores included
        "W" => format!("Sw_{}", name.get(2..).unwrap_or_default()),
        "Bk" => format!("Sb_{base}"),
        "Bu" => format!("Su_{base}"),
        "G" => format!("Sg_{base}"),
        "R" => format!("Sr_{base}"),
        "M" => format!("Sm_{base}"),
        _ => format!("S{base}"),
    }
}

/// Result of a config patch pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSummary {
    /// Config filenames that received new lines
    pub updated: Vec<String>,
    /// Config filenames skipped because the lines already existed
    pub skipped: Vec<String>,
    /// Expected config filenames that were not found
    pub missing: Vec<String>,
}

// Face image names match their config by lowercased stem with the sheet
// prefix stripped and hyphens folded to underscores.
fn normalized_face_name(file_name: &str) -> String {
    file_name
        .to_lowercase()
        .replace(".png", "")
        .replace("mps_", "")
        .replace('-', "_")
}

fn file_names(dir: &Path, operation: &'static str) -> Result<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| fs_error(dir, operation, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| fs_error(dir, operation, e))?;
        if let Some(name) = entry.path().file_name().and_then(|s| s.to_str()) {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

fn append_lines(path: &Path, content: &str, lines: &str) -> Result<()> {
    let mut patched = String::with_capacity(content.len() + lines.len() + 1);
    patched.push_str(content);
    if !patched.ends_with('\n') {
        patched.push('\n');
    }
    patched.push_str(lines);
    std::fs::write(path, patched).map_err(|e| fs_error(path, "write config", e))
}

/// Append `face` lines to every rogue config missing one
///
/// Each `.toml` file in `rogues_dir` is matched to a face image in
/// `faces_dir` by normalized name.
///
/// # Errors
///
/// Returns an error if either directory cannot be read, a config cannot be
/// read or written, or a config has no matching face image.
pub fn patch_faces(rogues_dir: &Path, faces_dir: &Path) -> Result<PatchSummary> {
    let face_images = file_names(faces_dir, "read faces directory")?;
    let configs = file_names(rogues_dir, "read rogues directory")?;

    let mut summary = PatchSummary::default();
    for file_name in configs {
        if !file_name.ends_with(".toml") {
            continue;
        }

        let base_name = file_name.trim_end_matches(".toml");
        let face_file = face_images
            .iter()
            .find(|face| normalized_face_name(face) == base_name)
            .ok_or_else(|| PipelineError::MissingAsset {
                name: base_name.to_string(),
                reason: format!("no face image in '{}'", faces_dir.display()),
            })?;

        let path = rogues_dir.join(&file_name);
        let content =
            std::fs::read_to_string(&path).map_err(|e| fs_error(&path, "read config", e))?;

        if content.contains("face") {
            summary.skipped.push(file_name);
            continue;
        }

        append_lines(&path, &content, &format!("face = \"{face_file}\"\n"))?;
        summary.updated.push(file_name);
    }

    Ok(summary)
}

/// Append walking-sprite lines to the configs of the character table
///
/// Missing config files are recorded and skipped rather than failing the
/// pass, matching the incremental way the configs were authored.
///
/// # Errors
///
/// Returns an error if a config file cannot be read or written.
pub fn patch_walking_sprites(rogues_dir: &Path) -> Result<PatchSummary> {
    let mut summary = PatchSummary::default();

    for (code, display_name) in CHARACTER_SPRITES {
        let file_name = format!("{}.toml", display_name.to_lowercase().replace(' ', "_"));
        let path = rogues_dir.join(&file_name);

        if !path.exists() {
            summary.missing.push(file_name);
            continue;
        }

        let content =
            std::fs::read_to_string(&path).map_err(|e| fs_error(&path, "read config", e))?;
        if content.contains("walking_sprite") || content.contains("walking_shadow_sprite") {
            summary.skipped.push(file_name);
            continue;
        }

        let shadow = shadow_sprite_name(code);
        let lines = format!(
            "walking_sprite = \"{code}.spr.png\"\nwalking_shadow_sprite = \"{shadow}.spr.png\"\n"
        );
        append_lines(&path, &content, &lines)?;
        summary.updated.push(file_name);
    }

    Ok(summary)
}
