//! Persisted annotation state for panoramic images

use super::gps::GpsFix;
use serde::{Deserialize, Serialize};

/// Fixed schema version stamped into every progress document
pub const PROGRESS_VERSION: &str = "1.0";

/// Annotation state for one image, as persisted on disk
///
/// Identity is `(projectPath, imageId, filename)`. Hotspot links are
/// client-defined payloads stored verbatim; typing them here would drop
/// fields the editor round-trips through us.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDocument {
    pub image_id: String,
    pub filename: String,
    pub project_path: String,
    #[serde(default)]
    pub links: Vec<serde_json::Value>,
    #[serde(default)]
    pub north_calibration: Option<f64>,
    #[serde(default)]
    pub gps_coordinates: Option<GpsFix>,
    /// ISO-8601 stamp written by the store on every save
    pub last_modified: String,
    pub version: String,
}

/// Save-side input; the store stamps `lastModified` and `version`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProgressInput {
    pub image_id: String,
    pub filename: String,
    pub project_path: String,
    #[serde(default)]
    pub links: Vec<serde_json::Value>,
    #[serde(default)]
    pub north_calibration: Option<f64>,
    #[serde(default)]
    pub gps_coordinates: Option<GpsFix>,
}

/// Acknowledgement returned by a successful save
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    pub image_id: String,
    pub filename: String,
    /// File name the document was written under
    pub saved_to: String,
    /// The `lastModified` stamp written into the document
    pub timestamp: String,
}

/// Outcome of a single-image progress lookup
///
/// A missing or unreadable document is data, not an error; the identity is
/// echoed back so the caller can still say which image had no progress.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageProgress {
    Found {
        document: ProgressDocument,
        loaded_from: String,
    },
    Missing {
        image_id: String,
        filename: String,
    },
}

impl ImageProgress {
    pub fn is_found(&self) -> bool {
        matches!(self, ImageProgress::Found { .. })
    }
}

/// One successfully loaded document in a whole-project load
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadedDocument {
    #[serde(flatten)]
    pub document: ProgressDocument,
    pub loaded_from: String,
}

/// One unreadable progress file in a whole-project load
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoadError {
    pub file_name: String,
    pub message: String,
}

/// Everything saved under one project, plus per-file failures
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub project_path: String,
    pub documents: Vec<LoadedDocument>,
    pub errors: Vec<LoadError>,
    /// Progress files seen during enumeration, readable or not
    pub total_files: usize,
}

impl ProjectProgress {
    pub fn loaded_count(&self) -> usize {
        self.documents.len()
    }
}
