//! Directory listing and serve-plan assembly
//!
//! Ties the resolver, variant matcher, and GPS extractor together into the
//! two image-serving operations: a plain listing of everything in a
//! directory, and the original-vs-compressed serving plan.

use crate::models::{DirectoryImages, ImageFile, ServeMode, ServePlan, ServeStats};
use crate::services::{GpsExtractor, PathResolver, VariantMatcher};
use pano_common::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Image listing and serve planning over one images root
#[derive(Debug, Clone)]
pub struct ImageService {
    resolver: PathResolver,
    matcher: VariantMatcher,
    gps: GpsExtractor,
}

impl ImageService {
    pub fn new(images_root: impl Into<PathBuf>) -> Self {
        Self {
            resolver: PathResolver::new(images_root),
            matcher: VariantMatcher::new(),
            gps: GpsExtractor::new(),
        }
    }

    /// List every recognized image in the directory a locator resolves to,
    /// compressed variants included, in canonical order
    pub async fn list_images(&self, locator: &str) -> Result<DirectoryImages> {
        let resolved = self.resolver.resolve(locator).await?;
        let files = directory_files(&resolved.directory).await?;

        let images: Vec<ImageFile> = self
            .matcher
            .list(&files)
            .into_iter()
            .map(|filename| ImageFile {
                path: format!("{}/{}", resolved.public_prefix, filename),
                filename,
            })
            .collect();

        tracing::info!(directory = %locator, count = images.len(), "Listed directory images");
        Ok(DirectoryImages {
            directory: locator.to_string(),
            count: images.len(),
            images,
        })
    }

    /// Build the serving plan for a directory
    ///
    /// One entry per original image, substituting the compressed variant
    /// when requested and available. With `include_gps`, each entry is
    /// annotated from its ORIGINAL file (compressed renditions may have
    /// stripped metadata); extraction failures leave the entry's fix `None`
    /// and never abort the plan.
    pub async fn serve_plan(
        &self,
        locator: &str,
        use_compressed: bool,
        include_gps: bool,
    ) -> Result<ServePlan> {
        let resolved = self.resolver.resolve(locator).await?;
        let files = directory_files(&resolved.directory).await?;

        let partition = self.matcher.partition(&files);
        let mapping = self.matcher.mapping_from(&partition);
        let outcome = self
            .matcher
            .plan_from(&mapping, use_compressed, &resolved.public_prefix);

        let mut entries = outcome.entries;
        if include_gps {
            for entry in &mut entries {
                let original_path = resolved.directory.join(&entry.original_filename);
                entry.gps = self.gps.extract_from_file(&original_path).await;
            }
        }

        let images_with_compressed = mapping.values().filter(|m| m.has_compressed).count();
        let stats = ServeStats {
            total_original_images: partition.originals.len(),
            total_compressed_images: partition.compressed.len(),
            images_with_compressed,
            images_without_compressed: mapping.len() - images_with_compressed,
            current_mode: if use_compressed {
                ServeMode::Compressed
            } else {
                ServeMode::Original
            },
            fallback_count: outcome.unavailable.len(),
        };

        tracing::info!(
            directory = %locator,
            mode = ?stats.current_mode,
            fallbacks = stats.fallback_count,
            "Built serve plan"
        );
        Ok(ServePlan {
            directory_path: locator.to_string(),
            use_compressed,
            images_to_serve: entries,
            unavailable_images: outcome.unavailable,
            stats,
            image_mapping: mapping,
        })
    }
}

/// File names (not subdirectories) in one directory, unordered
pub(crate) async fn directory_files(dir: &Path) -> Result<Vec<String>> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
        if is_file {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    Ok(names)
}
