//! # Pano Asset Service
//!
//! Core library backing the panoramic ("360°") image viewer:
//! - Locator resolution (nested project/section/subsection or legacy flat)
//! - Original/compressed variant matching and serve planning
//! - GPS metadata extraction with altitude sign correction
//! - Durable per-image and whole-project annotation persistence
//! - Project catalog traversal
//!
//! The HTTP routing layer lives outside this crate; it maps these
//! operations' results onto transport responses. The image recompression
//! pipeline is likewise external, reached through the [`services::ImageCompressor`]
//! trait.

pub mod models;
pub mod services;

pub use pano_common::{Error, Result};

use services::{CompressionRunner, ImageService, ProgressStore, ProjectCatalog};
use std::path::{Path, PathBuf};

/// Directory under the root folder holding the image hierarchy
pub const IMAGES_DIR: &str = "images";

/// Request context bundling every service, built once from the resolved
/// root folder (the directory containing `images/` and `progress/`)
///
/// Handlers receive this by value or reference; there is no process-wide
/// mutable state and no caching layer behind it.
#[derive(Debug, Clone)]
pub struct AppContext {
    root: PathBuf,
    pub images: ImageService,
    pub progress: ProgressStore,
    pub catalog: ProjectCatalog,
    pub compression: CompressionRunner,
}

impl AppContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let images_root = root.join(IMAGES_DIR);
        Self {
            images: ImageService::new(images_root.clone()),
            progress: ProgressStore::new(root.clone()),
            catalog: ProjectCatalog::new(images_root.clone()),
            compression: CompressionRunner::new(images_root),
            root,
        }
    }

    /// Resolved root folder this context was built from
    pub fn root(&self) -> &Path {
        &self.root
    }
}
