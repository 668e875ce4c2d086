//! Compression run bookkeeping
//!
//! The pixel pipeline lives outside this crate; an implementation of
//! [`ImageCompressor`] is supplied by the recompression service. This module
//! owns what the core actually depends on: the `_compressed` output naming
//! convention, the skip-if-present policy, and the size/savings statistics.

use crate::models::{
    CompressionOptions, CompressionOutcome, CompressionReport, CompressionStatus,
    CompressionSummary,
};
use crate::services::image_service::directory_files;
use crate::services::variant_matcher::COMPRESSED_MARKER;
use crate::services::{PathResolver, VariantMatcher};
use pano_common::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

/// External recompression collaborator
///
/// Writes a rendition of `source` to `destination`, resized to fit within
/// `max_width` square without enlargement, at the requested quality.
#[allow(async_fn_in_trait)]
pub trait ImageCompressor {
    async fn compress(
        &self,
        source: &Path,
        destination: &Path,
        options: &CompressionOptions,
    ) -> Result<()>;
}

/// Compressed counterpart name for an original: `<basename>_compressed<ext>`
pub fn compressed_name(original: &str) -> String {
    match original.rfind('.') {
        Some(index) => format!(
            "{}{}{}",
            &original[..index],
            COMPRESSED_MARKER,
            &original[index..]
        ),
        None => format!("{}{}", original, COMPRESSED_MARKER),
    }
}

/// Drives a compression run over one directory
#[derive(Debug, Clone)]
pub struct CompressionRunner {
    resolver: PathResolver,
    matcher: VariantMatcher,
}

impl CompressionRunner {
    pub fn new(images_root: impl Into<PathBuf>) -> Self {
        Self {
            resolver: PathResolver::new(images_root),
            matcher: VariantMatcher::new(),
        }
    }

    /// Compress every original in the directory a locator resolves to
    ///
    /// Originals whose compressed counterpart already exists are skipped but
    /// still reported with their sizes. A failure on one image becomes an
    /// error-status outcome and the run continues.
    pub async fn run<C: ImageCompressor>(
        &self,
        locator: &str,
        compressor: &C,
        options: &CompressionOptions,
    ) -> Result<CompressionReport> {
        let resolved = self.resolver.resolve(locator).await?;
        let files = directory_files(&resolved.directory).await?;
        let originals = self.matcher.partition(&files).originals;

        tracing::info!(
            directory = %locator,
            count = originals.len(),
            "Starting compression run"
        );

        let mut results = Vec::with_capacity(originals.len());
        for original in &originals {
            results.push(
                self.compress_one(&resolved.directory, original, compressor, options)
                    .await,
            );
        }

        let total_original: f64 = results.iter().map(|r| r.original_size as f64).sum();
        let total_compressed: f64 = results.iter().map(|r| r.compressed_size as f64).sum();
        let total_savings = if total_original > 0.0 {
            round2((total_original - total_compressed) / total_original * 100.0)
        } else {
            0.0
        };

        Ok(CompressionReport {
            directory_path: locator.to_string(),
            processed: results.len(),
            total: originals.len(),
            summary: CompressionSummary {
                total_original_size: round2(total_original / 1024.0 / 1024.0),
                total_compressed_size: round2(total_compressed / 1024.0 / 1024.0),
                total_savings,
                compression_settings: options.clone(),
            },
            results,
        })
    }

    async fn compress_one<C: ImageCompressor>(
        &self,
        directory: &Path,
        original: &str,
        compressor: &C,
        options: &CompressionOptions,
    ) -> CompressionOutcome {
        let source = directory.join(original);
        let name = compressed_name(original);
        let destination = directory.join(&name);

        let error_outcome = |message: String| {
            tracing::warn!(original = %original, "Compression failed: {}", message);
            CompressionOutcome {
                original: original.to_string(),
                compressed: None,
                status: CompressionStatus::Error,
                original_size: 0,
                compressed_size: 0,
                savings: 0.0,
                error: Some(message),
            }
        };

        // Compressed counterpart already on disk: report it, don't redo it
        if let Ok(existing) = fs::metadata(&destination).await {
            let original_size = match fs::metadata(&source).await {
                Ok(metadata) => metadata.len(),
                Err(e) => return error_outcome(e.to_string()),
            };
            tracing::debug!(compressed = %name, "Compressed version already exists");
            return CompressionOutcome {
                original: original.to_string(),
                compressed: Some(name),
                status: CompressionStatus::AlreadyExists,
                original_size,
                compressed_size: existing.len(),
                savings: savings_percent(original_size, existing.len()),
                error: None,
            };
        }

        let original_size = match fs::metadata(&source).await {
            Ok(metadata) => metadata.len(),
            Err(e) => return error_outcome(e.to_string()),
        };

        if let Err(e) = compressor.compress(&source, &destination, options).await {
            return error_outcome(e.to_string());
        }

        let compressed_size = match fs::metadata(&destination).await {
            Ok(metadata) => metadata.len(),
            Err(e) => return error_outcome(e.to_string()),
        };

        tracing::info!(
            original = %original,
            compressed = %name,
            savings = savings_percent(original_size, compressed_size),
            "Compressed image"
        );
        CompressionOutcome {
            original: original.to_string(),
            compressed: Some(name),
            status: CompressionStatus::Compressed,
            original_size,
            compressed_size,
            savings: savings_percent(original_size, compressed_size),
            error: None,
        }
    }
}

/// Percent saved relative to the original, rounded to 2 decimals
fn savings_percent(original_size: u64, compressed_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    round2((original_size as f64 - compressed_size as f64) / original_size as f64 * 100.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
