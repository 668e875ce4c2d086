//! Image listing and serve-plan types

use super::gps::GpsFix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One file in a plain directory listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageFile {
    pub filename: String,
    /// Public path the viewer fetches, e.g. `/images/alpha/beta/gamma/room1.jpg`
    pub path: String,
}

/// Every recognized image in a resolved directory, compressed variants
/// included, in canonical order
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryImages {
    /// The locator string as supplied by the caller
    pub directory: String,
    pub images: Vec<ImageFile>,
    pub count: usize,
}

/// One logical image in a serve plan
///
/// `original_filename` always names the non-suffixed form; when
/// `is_compressed` is true, `filename` is the on-disk compressed file
/// actually served.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    pub filename: String,
    pub original_filename: String,
    pub is_compressed: bool,
    pub served_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps: Option<GpsFix>,
}

/// Original-to-compressed correspondence for one logical image
///
/// Recomputed per request from the directory listing, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariantMapping {
    pub original: String,
    pub compressed: Option<String>,
    pub has_compressed: bool,
}

/// Which rendition the plan was asked to prefer
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServeMode {
    Compressed,
    Original,
}

/// Serving statistics for one plan
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServeStats {
    pub total_original_images: usize,
    pub total_compressed_images: usize,
    pub images_with_compressed: usize,
    pub images_without_compressed: usize,
    pub current_mode: ServeMode,
    /// Originals served in place of a requested-but-missing compressed variant
    pub fallback_count: usize,
}

/// Deterministic serving plan for one directory
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServePlan {
    pub directory_path: String,
    pub use_compressed: bool,
    pub images_to_serve: Vec<ImageEntry>,
    pub unavailable_images: Vec<String>,
    pub stats: ServeStats,
    pub image_mapping: BTreeMap<String, VariantMapping>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_entry_camel_case_fields() {
        let entry = ImageEntry {
            filename: "room1_compressed.jpg".to_string(),
            original_filename: "room1.jpg".to_string(),
            is_compressed: true,
            served_path: "/images/shoot/room1_compressed.jpg".to_string(),
            gps: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"originalFilename\":\"room1.jpg\""));
        assert!(json.contains("\"isCompressed\":true"));
        assert!(json.contains("\"servedPath\""));
        assert!(!json.contains("gps"));
    }

    #[test]
    fn test_serve_mode_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ServeMode::Compressed).unwrap(),
            "\"compressed\""
        );
        assert_eq!(
            serde_json::to_string(&ServeMode::Original).unwrap(),
            "\"original\""
        );
    }

    #[test]
    fn test_variant_mapping_serializes_missing_compressed_as_null() {
        let mapping = VariantMapping {
            original: "room2.jpg".to_string(),
            compressed: None,
            has_compressed: false,
        };
        let json = serde_json::to_string(&mapping).unwrap();
        assert!(json.contains("\"compressed\":null"));
        assert!(json.contains("\"hasCompressed\":false"));
    }
}
