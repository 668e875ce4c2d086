//! Integration tests for locator resolution, listing, and serve planning

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use pano_as::models::ServeMode;
use pano_as::AppContext;
use pano_common::Error;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

fn context() -> (TempDir, AppContext) {
    let root = tempfile::tempdir().unwrap();
    let ctx = AppContext::new(root.path());
    (root, ctx)
}

fn touch(dir: &Path, names: &[&str]) {
    std::fs::create_dir_all(dir).unwrap();
    for name in names {
        std::fs::write(dir.join(name), b"bytes").unwrap();
    }
}

#[tokio::test]
async fn test_list_images_nested_locator() {
    let (root, ctx) = context();
    touch(
        &root.path().join("images/alpha/beta/gamma"),
        &["b.jpg", "a.jpg", "a_compressed.jpg", "readme.md"],
    );

    let listing = ctx.images.list_images("alpha/beta/gamma").await.unwrap();

    assert_eq!(listing.directory, "alpha/beta/gamma");
    assert_eq!(listing.count, 3);
    let filenames: Vec<&str> = listing.images.iter().map(|i| i.filename.as_str()).collect();
    // Canonical order, compressed variants included in the plain listing
    assert_eq!(filenames, vec!["a.jpg", "a_compressed.jpg", "b.jpg"]);
    assert_eq!(listing.images[0].path, "/images/alpha/beta/gamma/a.jpg");
}

#[tokio::test]
async fn test_list_images_legacy_flat_locator() {
    let (root, ctx) = context();
    touch(&root.path().join("images/legacy-shoot"), &["pano.webp"]);

    let listing = ctx.images.list_images("legacy-shoot").await.unwrap();
    assert_eq!(listing.count, 1);
    assert_eq!(listing.images[0].path, "/images/legacy-shoot/pano.webp");
}

#[tokio::test]
async fn test_unknown_locator_is_not_found() {
    let (_root, ctx) = context();

    let result = ctx.images.list_images("nowhere").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_serve_plan_substitutes_and_falls_back() {
    let (root, ctx) = context();
    touch(
        &root.path().join("images/shoot"),
        &["room1.jpg", "room1_compressed.jpg", "room2.jpg"],
    );

    let plan = ctx.images.serve_plan("shoot", true, false).await.unwrap();

    assert_eq!(plan.images_to_serve.len(), 2);
    let first = &plan.images_to_serve[0];
    assert_eq!(first.filename, "room1_compressed.jpg");
    assert_eq!(first.original_filename, "room1.jpg");
    assert!(first.is_compressed);
    assert_eq!(first.served_path, "/images/shoot/room1_compressed.jpg");

    let second = &plan.images_to_serve[1];
    assert_eq!(second.filename, "room2.jpg");
    assert!(!second.is_compressed);

    assert_eq!(plan.unavailable_images, vec!["room2.jpg".to_string()]);
    assert_eq!(plan.stats.total_original_images, 2);
    assert_eq!(plan.stats.total_compressed_images, 1);
    assert_eq!(plan.stats.images_with_compressed, 1);
    assert_eq!(plan.stats.images_without_compressed, 1);
    assert_eq!(plan.stats.current_mode, ServeMode::Compressed);
    assert_eq!(plan.stats.fallback_count, 1);
}

#[tokio::test]
async fn test_serve_plan_original_mode_has_no_fallbacks() {
    let (root, ctx) = context();
    touch(
        &root.path().join("images/shoot"),
        &["room1.jpg", "room1_compressed.jpg", "room2.jpg"],
    );

    let plan = ctx.images.serve_plan("shoot", false, false).await.unwrap();

    assert!(plan.images_to_serve.iter().all(|e| !e.is_compressed));
    assert!(plan.unavailable_images.is_empty());
    assert_eq!(plan.stats.current_mode, ServeMode::Original);
    assert_eq!(plan.stats.fallback_count, 0);
}

#[tokio::test]
async fn test_serve_plan_is_deterministic() {
    let (root, ctx) = context();
    touch(
        &root.path().join("images/shoot"),
        &["z.jpg", "a.jpg", "a_compressed.jpg", "m.png", "m_compressed.webp"],
    );

    let first = ctx.images.serve_plan("shoot", true, false).await.unwrap();
    let second = ctx.images.serve_plan("shoot", true, false).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_serve_plan_mapping_lists_every_original() {
    let (root, ctx) = context();
    touch(
        &root.path().join("images/shoot"),
        &["room1.jpg", "room1_compressed.jpg", "room2.jpg", "lonely_compressed.jpg"],
    );

    let plan = ctx.images.serve_plan("shoot", true, false).await.unwrap();

    assert_eq!(plan.image_mapping.len(), 2);
    assert!(plan.image_mapping["room1.jpg"].has_compressed);
    assert!(!plan.image_mapping["room2.jpg"].has_compressed);
    // Orphan compressed files are never independent entries
    assert!(!plan.image_mapping.contains_key("lonely_compressed.jpg"));
    assert!(plan
        .images_to_serve
        .iter()
        .all(|e| e.original_filename != "lonely_compressed.jpg"));
}

/// GPS fields serialized as a standalone EXIF segment; the extractor reads
/// the same bytes a camera would embed
fn gps_tiff_bytes() -> Vec<u8> {
    let latitude = Field {
        tag: Tag::GPSLatitude,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![
            Rational { num: 48, denom: 1 },
            Rational { num: 51, denom: 1 },
            Rational { num: 30, denom: 1 },
        ]),
    };
    let latitude_ref = Field {
        tag: Tag::GPSLatitudeRef,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![b"N".to_vec()]),
    };
    let longitude = Field {
        tag: Tag::GPSLongitude,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![
            Rational { num: 2, denom: 1 },
            Rational { num: 17, denom: 1 },
            Rational { num: 40, denom: 1 },
        ]),
    };
    let longitude_ref = Field {
        tag: Tag::GPSLongitudeRef,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![b"E".to_vec()]),
    };

    let mut writer = Writer::new();
    writer.push_field(&latitude);
    writer.push_field(&latitude_ref);
    writer.push_field(&longitude);
    writer.push_field(&longitude_ref);
    let mut cursor = Cursor::new(Vec::new());
    writer.write(&mut cursor, false).unwrap();
    cursor.into_inner()
}

#[tokio::test]
async fn test_serve_plan_reads_gps_from_original_file() {
    let (root, ctx) = context();
    let dir = root.path().join("images/shoot");
    std::fs::create_dir_all(&dir).unwrap();
    // Original carries GPS metadata; its compressed sibling is stripped
    std::fs::write(dir.join("room1.jpg"), gps_tiff_bytes()).unwrap();
    std::fs::write(dir.join("room1_compressed.jpg"), b"stripped").unwrap();

    let plan = ctx.images.serve_plan("shoot", true, true).await.unwrap();

    let entry = &plan.images_to_serve[0];
    assert!(entry.is_compressed);
    let fix = entry.gps.as_ref().expect("gps read from the original file");
    assert!((fix.latitude - (48.0 + 51.0 / 60.0 + 30.0 / 3600.0)).abs() < 1e-9);
}

#[tokio::test]
async fn test_serve_plan_gps_failures_are_silent() {
    let (root, ctx) = context();
    touch(&root.path().join("images/shoot"), &["room1.jpg", "room2.jpg"]);

    let plan = ctx.images.serve_plan("shoot", false, true).await.unwrap();

    // No metadata in the files; every entry is served with a null fix
    assert_eq!(plan.images_to_serve.len(), 2);
    assert!(plan.images_to_serve.iter().all(|e| e.gps.is_none()));
}
