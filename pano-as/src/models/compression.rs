//! Compression run reporting types
//!
//! The recompression pipeline itself is an external collaborator; these
//! shapes describe what it was asked to do and what it saved.

use serde::{Deserialize, Serialize};

/// Settings forwarded to the external compressor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CompressionOptions {
    /// Encoder quality, 1-100
    #[serde(default = "default_quality")]
    pub quality: u8,
    /// Longest-edge bound; images are fit within a square of this size
    /// without enlargement
    #[serde(default = "default_max_width")]
    pub max_width: u32,
}

fn default_quality() -> u8 {
    80
}

fn default_max_width() -> u32 {
    4096
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            quality: default_quality(),
            max_width: default_max_width(),
        }
    }
}

/// What happened to one original during a compression run
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CompressionStatus {
    Compressed,
    AlreadyExists,
    Error,
}

/// Per-image result of a compression run
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompressionOutcome {
    pub original: String,
    pub compressed: Option<String>,
    pub status: CompressionStatus,
    pub original_size: u64,
    pub compressed_size: u64,
    /// Percent saved relative to the original, rounded to 2 decimals
    pub savings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Whole-run totals, sizes in megabytes rounded to 2 decimals
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompressionSummary {
    pub total_original_size: f64,
    pub total_compressed_size: f64,
    pub total_savings: f64,
    pub compression_settings: CompressionOptions,
}

/// Full report for one compression run over a directory
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    pub directory_path: String,
    pub processed: usize,
    pub total: usize,
    pub results: Vec<CompressionOutcome>,
    pub summary: CompressionSummary,
}
