//! Validates catalog parsing, filename derivation, and cleanup planning

use image::DynamicImage;
use spriteprep::cards::catalog::{
    Card, expected_file_names, load_catalog, sanitize_card_name,
};
use spriteprep::cards::cleanup::{delete_images, plan_cleanup};
use spriteprep::cards::fetch::resize_to_width;
use std::collections::HashSet;

#[test]
fn test_sanitize_card_name_cases() {
    assert_eq!(sanitize_card_name("Ajani's Pridemate"), "ajanis-pridemate");
    assert_eq!(sanitize_card_name("Fire // Ice"), "fire-ice");
    assert_eq!(sanitize_card_name("  -Lead-  "), "lead");
    assert_eq!(sanitize_card_name("Borrowing 100,000 Arrows"), "borrowing-100000-arrows");
    assert_eq!(sanitize_card_name("under_score"), "under_score");
    assert_eq!(sanitize_card_name(""), "");
    assert_eq!(sanitize_card_name("///"), "");
}

#[test]
fn test_resized_file_name_scheme() {
    let card = Card {
        name: "Ajani's Pridemate".to_string(),
        set_code: "m21".to_string(),
        collector_number: "123".to_string(),
        ..Card::default()
    };
    assert_eq!(
        card.resized_file_name(300),
        "m21-123-300-ajanis-pridemate.png"
    );
}

#[test]
fn test_load_catalog_accepts_both_field_schemes() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    let path = dir.path().join("cards.json");
    let json = r#"[
        {
            "name": "Witch",
            "set": "lea",
            "collector_number": "7",
            "image_uris": {"png": "https://cards.example/witch.png"}
        },
        {
            "CardName": "Warlock",
            "SetID": "leb",
            "CollectorNo": "9"
        }
    ]"#;
    std::fs::write(&path, json).unwrap_or_default();

    let cards = load_catalog(&path).unwrap_or_default();
    assert_eq!(cards.len(), 2);

    assert!(cards.first().is_some_and(|card| {
        card.name == "Witch"
            && card.set_code == "lea"
            && card.collector_number == "7"
            && card.image_uris.png.as_deref() == Some("https://cards.example/witch.png")
    }));
    assert!(cards.get(1).is_some_and(|card| {
        card.name == "Warlock"
            && card.set_code == "leb"
            && card.collector_number == "9"
            && card.image_uris.png.is_none()
    }));
}

#[test]
fn test_load_catalog_rejects_non_array_documents() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    let path = dir.path().join("cards.json");
    std::fs::write(&path, r#"{"name": "not a list"}"#).unwrap_or_default();

    let result = load_catalog(&path);
    assert!(result.is_err(), "object documents must be rejected");
}

#[test]
fn test_load_catalog_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    assert!(load_catalog(&dir.path().join("absent.json")).is_err());
}

#[test]
fn test_expected_file_names_skip_incomplete_entries() {
    let cards = vec![
        Card {
            name: "Witch".to_string(),
            set_code: "lea".to_string(),
            collector_number: "7".to_string(),
            ..Card::default()
        },
        // No collector number: cannot derive a filename
        Card {
            name: "Nameless".to_string(),
            set_code: "lea".to_string(),
            ..Card::default()
        },
    ];

    let expected = expected_file_names(&cards, 300);
    assert_eq!(expected.len(), 1);
    assert!(expected.contains("lea-7-300-witch.png"));
}

#[test]
fn test_plan_cleanup_partitions_disk_against_catalog() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    std::fs::write(dir.path().join("keep.png"), b"png").unwrap_or_default();
    std::fs::write(dir.path().join("orphan.png"), b"png").unwrap_or_default();
    std::fs::write(dir.path().join("notes.txt"), b"text").unwrap_or_default();

    let expected: HashSet<String> = ["keep.png".to_string(), "wanted.png".to_string()]
        .into_iter()
        .collect();

    let plan = plan_cleanup(dir.path(), &expected).unwrap_or_default();
    assert_eq!(plan.existing, 2, "only PNG files count");
    assert_eq!(plan.orphaned, vec!["orphan.png".to_string()]);
    assert_eq!(plan.missing, vec!["wanted.png".to_string()]);
}

#[test]
fn test_delete_images_removes_only_named_files() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    std::fs::write(dir.path().join("keep.png"), b"png").unwrap_or_default();
    std::fs::write(dir.path().join("orphan.png"), b"png").unwrap_or_default();

    let outcome = delete_images(dir.path(), &["orphan.png".to_string()]);
    assert_eq!(outcome.deleted, 1);
    assert!(outcome.failures.is_empty());
    assert!(dir.path().join("keep.png").exists());
    assert!(!dir.path().join("orphan.png").exists());
}

#[test]
fn test_delete_images_collects_per_file_failures() {
    let dir = tempfile::tempdir().unwrap_or_else(|_| unreachable!("tempdir failed"));
    let outcome = delete_images(dir.path(), &["ghost.png".to_string()]);
    assert_eq!(outcome.deleted, 0);
    assert_eq!(outcome.failures.len(), 1);
}

#[test]
fn test_resize_preserves_aspect_ratio() {
    let image = DynamicImage::new_rgba8(100, 50);
    let resized = resize_to_width(&image, 300);
    assert_eq!((resized.width(), resized.height()), (300, 150));

    let tall = DynamicImage::new_rgba8(60, 240);
    let resized_tall = resize_to_width(&tall, 30);
    assert_eq!((resized_tall.width(), resized_tall.height()), (30, 120));
}

#[test]
fn test_resize_at_target_width_is_identity() {
    let image = DynamicImage::new_rgba8(300, 99);
    let resized = resize_to_width(&image, 300);
    assert_eq!((resized.width(), resized.height()), (300, 99));
}
