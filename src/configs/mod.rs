//! Config file patching utilities

/// Rogue config patching and shadow-sprite name derivation
pub mod rogues;

pub use rogues::{PatchSummary, patch_faces, patch_walking_sprites, shadow_sprite_name};
