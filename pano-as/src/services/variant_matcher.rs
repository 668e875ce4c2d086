//! Original/compressed variant matching
//!
//! Decides, per request, which physical file represents each logical image:
//! the original, or its `_compressed` sibling when one exists and the caller
//! asked for it. Pure over a filename listing; re-running on an unchanged
//! listing produces an identical ordered plan.

use crate::models::{ImageEntry, VariantMapping};
use std::collections::BTreeMap;

/// Recognized image file extensions (lowercase)
pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".webp"];

/// Marker substring distinguishing compressed variants from originals
pub const COMPRESSED_MARKER: &str = "_compressed";

/// True when the filename carries a recognized image extension
pub fn is_image_file(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Strip a recognized image extension, matched case-insensitively
///
/// Unrecognized suffixes are kept: only the four serving extensions count.
fn strip_image_extension(filename: &str) -> &str {
    let lower = filename.to_lowercase();
    for ext in IMAGE_EXTENSIONS {
        if lower.ends_with(ext) {
            return &filename[..filename.len() - ext.len()];
        }
    }
    filename
}

/// A directory listing split into originals and compressed variants,
/// each in canonical order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub originals: Vec<String>,
    pub compressed: Vec<String>,
}

/// Entries chosen for serving plus the originals that fell back because a
/// requested compressed variant was missing
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOutcome {
    pub entries: Vec<ImageEntry>,
    pub unavailable: Vec<String>,
}

/// Variant matching over one directory listing
#[derive(Debug, Clone, Default)]
pub struct VariantMatcher {}

impl VariantMatcher {
    pub fn new() -> Self {
        Self {}
    }

    /// Filter a listing down to recognized images in canonical order
    ///
    /// The sort is a plain byte-wise compare: stable, locale-independent,
    /// and the display/serve order used everywhere downstream.
    pub fn list(&self, files: &[String]) -> Vec<String> {
        let mut images: Vec<String> = files
            .iter()
            .filter(|name| is_image_file(name))
            .cloned()
            .collect();
        images.sort();
        images
    }

    /// Split a listing into originals and compressed variants
    pub fn partition(&self, files: &[String]) -> Partition {
        let (compressed, originals): (Vec<String>, Vec<String>) = self
            .list(files)
            .into_iter()
            .partition(|name| name.contains(COMPRESSED_MARKER));
        Partition {
            originals,
            compressed,
        }
    }

    /// Compute the original-to-compressed correspondence for a listing
    pub fn mapping(&self, files: &[String]) -> BTreeMap<String, VariantMapping> {
        self.mapping_from(&self.partition(files))
    }

    /// Correspondence from an existing partition
    ///
    /// A compressed candidate matches when its lowercased name starts with
    /// `<base>_compressed` lowercased, tolerating any trailing extension or
    /// suffix. Among several candidates the first in canonical order wins.
    pub fn mapping_from(&self, partition: &Partition) -> BTreeMap<String, VariantMapping> {
        let mut mapping = BTreeMap::new();
        for original in &partition.originals {
            let candidate =
                format!("{}{}", strip_image_extension(original), COMPRESSED_MARKER).to_lowercase();
            let matched = partition
                .compressed
                .iter()
                .find(|name| name.to_lowercase().starts_with(&candidate))
                .cloned();
            mapping.insert(
                original.clone(),
                VariantMapping {
                    original: original.clone(),
                    has_compressed: matched.is_some(),
                    compressed: matched,
                },
            );
        }
        mapping
    }

    /// Build the serving plan for a listing
    ///
    /// One entry per original. With `use_compressed`, an original whose
    /// compressed variant is missing is served as-is and recorded as
    /// unavailable; compressed files with no original are never served.
    pub fn plan(&self, files: &[String], use_compressed: bool, public_prefix: &str) -> PlanOutcome {
        self.plan_from(&self.mapping(files), use_compressed, public_prefix)
    }

    /// Serving plan from an existing mapping
    pub fn plan_from(
        &self,
        mapping: &BTreeMap<String, VariantMapping>,
        use_compressed: bool,
        public_prefix: &str,
    ) -> PlanOutcome {
        let mut entries = Vec::with_capacity(mapping.len());
        let mut unavailable = Vec::new();

        for (original, variant) in mapping {
            match (use_compressed, &variant.compressed) {
                (true, Some(compressed)) => entries.push(ImageEntry {
                    filename: compressed.clone(),
                    original_filename: original.clone(),
                    is_compressed: true,
                    served_path: format!("{}/{}", public_prefix, compressed),
                    gps: None,
                }),
                (requested, _) => {
                    if requested {
                        unavailable.push(original.clone());
                    }
                    entries.push(ImageEntry {
                        filename: original.clone(),
                        original_filename: original.clone(),
                        is_compressed: false,
                        served_path: format!("{}/{}", public_prefix, original),
                        gps: None,
                    });
                }
            }
        }

        PlanOutcome {
            entries,
            unavailable,
        }
    }
}
