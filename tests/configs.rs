//! Validates shadow name derivation and rogue config patching

use spriteprep::configs::rogues::{
    CHARACTER_SPRITES, patch_faces, patch_walking_sprites, shadow_sprite_name,
};
use std::path::Path;

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}

#[test]
fn test_shadow_names_from_the_shared_sheet_table() {
    // Substring matches win before any prefix rule applies.
    assert_eq!(shadow_sprite_name("Bk_Kht"), "Skht");
    assert_eq!(shadow_sprite_name("Bu_Djn"), "Sdjn");
    assert_eq!(shadow_sprite_name("G_Fwz"), "Sfwz");
    assert_eq!(shadow_sprite_name("W_Mwz"), "Smwz");
    assert_eq!(shadow_sprite_name("M_Trl"), "Strl");
    assert_eq!(shadow_sprite_name("Troll"), "Strl");
    assert_eq!(shadow_sprite_name("G_Wrm"), "Swrm");
    assert_eq!(shadow_sprite_name("Dg_Bru"), "S_Dg");
    assert_eq!(shadow_sprite_name("Ego_F"), "Sego_F");
}

#[test]
fn test_shadow_names_from_prefix_rules() {
    // The W_ prefix keeps the whole remainder; the others keep the second
    // underscore component.
    assert_eq!(shadow_sprite_name("W_Amg"), "Sw_Amg");
    assert_eq!(shadow_sprite_name("Bk_Lrd"), "Sb_Lrd");
    assert_eq!(shadow_sprite_name("Bu_Sft"), "Su_Sft");
    assert_eq!(shadow_sprite_name("G_Amg"), "Sg_Amg");
    assert_eq!(shadow_sprite_name("R_Lrd"), "Sr_Lrd");
    assert_eq!(shadow_sprite_name("M_Cen2"), "Sm_Cen2");
    assert_eq!(shadow_sprite_name("X_Foo"), "SFoo");
}

#[test]
fn test_shadow_names_for_short_and_plain_names() {
    assert_eq!(shadow_sprite_name("Wg"), "SWg");
    assert_eq!(shadow_sprite_name("Lords"), "SLords");
}

#[test]
fn test_every_character_sprite_code_gets_a_shadow() {
    for (code, _) in CHARACTER_SPRITES {
        let shadow = shadow_sprite_name(code);
        assert!(
            shadow.starts_with('S'),
            "shadow for {code} should start with S, got {shadow}"
        );
    }
}

#[test]
fn test_patch_walking_appends_sprite_lines() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    let high_priest = dir.path().join("high_priest.toml");
    std::fs::write(&high_priest, "name = \"High Priest\"").unwrap_or_default();
    let witch = dir.path().join("witch.toml");
    std::fs::write(&witch, "walking_sprite = \"Bk_Fwz.spr.png\"\n").unwrap_or_default();

    let summary = patch_walking_sprites(dir.path()).unwrap_or_default();

    assert!(summary.updated.contains(&"high_priest.toml".to_string()));
    assert!(summary.skipped.contains(&"witch.toml".to_string()));
    assert!(summary.missing.contains(&"crusader.toml".to_string()));

    let patched = read(&high_priest);
    assert!(
        patched.contains("name = \"High Priest\"\nwalking_sprite = \"W_Amg.spr.png\"\n"),
        "missing newline guard or sprite line: {patched}"
    );
    assert!(
        patched.contains("walking_shadow_sprite = \"Sw_Amg.spr.png\"\n"),
        "missing shadow line: {patched}"
    );

    // The skipped file is untouched.
    assert_eq!(read(&witch), "walking_sprite = \"Bk_Fwz.spr.png\"\n");
}

#[test]
fn test_patch_faces_matches_normalized_names() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    let rogues = dir.path().join("rogues");
    let faces = dir.path().join("faces");
    std::fs::create_dir_all(&rogues).unwrap_or_default();
    std::fs::create_dir_all(&faces).unwrap_or_default();

    std::fs::write(rogues.join("vampire_lord.toml"), "name = \"Vampire Lord\"\n")
        .unwrap_or_default();
    std::fs::write(faces.join("MPS_Vampire-Lord.png"), b"png").unwrap_or_default();

    let summary = patch_faces(&rogues, &faces).unwrap_or_default();
    assert_eq!(summary.updated, vec!["vampire_lord.toml".to_string()]);

    let patched = read(&rogues.join("vampire_lord.toml"));
    assert!(
        patched.ends_with("face = \"MPS_Vampire-Lord.png\"\n"),
        "face line missing: {patched}"
    );
}

#[test]
fn test_patch_faces_skips_configs_that_already_have_one() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    let rogues = dir.path().join("rogues");
    let faces = dir.path().join("faces");
    std::fs::create_dir_all(&rogues).unwrap_or_default();
    std::fs::create_dir_all(&faces).unwrap_or_default();

    let config = rogues.join("witch.toml");
    std::fs::write(&config, "face = \"MPS_Witch.png\"\n").unwrap_or_default();
    std::fs::write(faces.join("MPS_Witch.png"), b"png").unwrap_or_default();

    let summary = patch_faces(&rogues, &faces).unwrap_or_default();
    assert_eq!(summary.skipped, vec!["witch.toml".to_string()]);
    assert_eq!(read(&config), "face = \"MPS_Witch.png\"\n");
}

#[test]
fn test_patch_faces_fails_when_no_face_matches() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    let rogues = dir.path().join("rogues");
    let faces = dir.path().join("faces");
    std::fs::create_dir_all(&rogues).unwrap_or_default();
    std::fs::create_dir_all(&faces).unwrap_or_default();

    std::fs::write(rogues.join("seer.toml"), "name = \"Seer\"\n").unwrap_or_default();

    let result = patch_faces(&rogues, &faces);
    assert!(result.is_err(), "a config without a face image must fail");
}

#[test]
fn test_patch_faces_ignores_non_toml_files() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    let rogues = dir.path().join("rogues");
    let faces = dir.path().join("faces");
    std::fs::create_dir_all(&rogues).unwrap_or_default();
    std::fs::create_dir_all(&faces).unwrap_or_default();

    std::fs::write(rogues.join("readme.txt"), "notes").unwrap_or_default();

    let summary = patch_faces(&rogues, &faces).unwrap_or_default();
    assert!(summary.updated.is_empty());
    assert!(summary.skipped.is_empty());
}
