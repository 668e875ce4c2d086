//! Durable annotation persistence
//!
//! Progress documents live directly on the filesystem:
//! `<root>/progress/<sanitizedProjectPath>/img_<imageId>_<sanitizedFilename>.json`,
//! plus a whole-project snapshot at `<root>/saved_output.json`. Saves are
//! unconditional upserts; concurrent writers to one key are last-write-wins.

use crate::models::{
    ImageProgress, LoadError, LoadedDocument, ProgressDocument, ProgressInput, ProjectProgress,
    SaveReceipt, PROGRESS_VERSION,
};
use pano_common::{time, Error, Result};
use std::path::PathBuf;
use tokio::fs;

/// Directory under the root folder holding per-project progress documents
pub const PROGRESS_DIR: &str = "progress";

/// Whole-project snapshot file name, directly under the root folder
pub const SNAPSHOT_FILE: &str = "saved_output.json";

/// Filesystem-backed progress store
#[derive(Debug, Clone)]
pub struct ProgressStore {
    progress_root: PathBuf,
    snapshot_path: PathBuf,
}

impl ProgressStore {
    /// Create a store rooted at the folder containing `progress/`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            progress_root: root.join(PROGRESS_DIR),
            snapshot_path: root.join(SNAPSHOT_FILE),
        }
    }

    /// Project paths become one directory name: every path separator
    /// collapses to an underscore
    pub fn sanitize_project_path(project_path: &str) -> String {
        project_path.replace(['/', '\\'], "_")
    }

    /// Filenames keep only `[A-Za-z0-9._-]`; everything else becomes an
    /// underscore
    pub fn sanitize_filename(filename: &str) -> String {
        filename
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn document_file_name(image_id: &str, filename: &str) -> String {
        format!("img_{}_{}.json", image_id, Self::sanitize_filename(filename))
    }

    fn project_dir(&self, project_path: &str) -> PathBuf {
        self.progress_root
            .join(Self::sanitize_project_path(project_path))
    }

    fn validate_identity(image_id: &str, filename: &str, project_path: &str) -> Result<()> {
        if image_id.is_empty() || filename.is_empty() || project_path.is_empty() {
            return Err(Error::InvalidInput(
                "imageId, filename, and projectPath are required".to_string(),
            ));
        }
        Ok(())
    }

    /// Save one image's annotation state, overwriting any prior document
    ///
    /// The written document gets a fresh `lastModified` stamp and the fixed
    /// schema version; nothing from a previous save is merged.
    pub async fn save(&self, input: ProgressInput) -> Result<SaveReceipt> {
        Self::validate_identity(&input.image_id, &input.filename, &input.project_path)?;

        let project_dir = self.project_dir(&input.project_path);
        fs::create_dir_all(&project_dir).await?;

        let file_name = Self::document_file_name(&input.image_id, &input.filename);
        let document = ProgressDocument {
            image_id: input.image_id,
            filename: input.filename,
            project_path: input.project_path,
            links: input.links,
            north_calibration: input.north_calibration,
            gps_coordinates: input.gps_coordinates,
            last_modified: time::iso8601(&time::now()),
            version: PROGRESS_VERSION.to_string(),
        };

        let body = serde_json::to_string_pretty(&document)
            .map_err(|e| Error::Internal(format!("Failed to serialize progress: {}", e)))?;
        fs::write(project_dir.join(&file_name), body).await?;

        tracing::info!(
            image_id = %document.image_id,
            saved_to = %file_name,
            "Saved image progress"
        );

        Ok(SaveReceipt {
            image_id: document.image_id.clone(),
            filename: document.filename.clone(),
            saved_to: file_name,
            timestamp: document.last_modified.clone(),
        })
    }

    /// Load one image's annotation state
    ///
    /// Both "no file" and "file exists but cannot be parsed" come back as
    /// [`ImageProgress::Missing`]: a corrupt document is indistinguishable
    /// from an absent one by contract.
    pub async fn load_one(
        &self,
        image_id: &str,
        filename: &str,
        project_path: &str,
    ) -> Result<ImageProgress> {
        Self::validate_identity(image_id, filename, project_path)?;

        let file_name = Self::document_file_name(image_id, filename);
        let path = self.project_dir(project_path).join(&file_name);

        let missing = || ImageProgress::Missing {
            image_id: image_id.to_string(),
            filename: filename.to_string(),
        };

        match fs::read_to_string(&path).await {
            Ok(body) => match serde_json::from_str(&body) {
                Ok(document) => Ok(ImageProgress::Found {
                    document,
                    loaded_from: file_name,
                }),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        "Corrupt progress document treated as missing: {}", e
                    );
                    Ok(missing())
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(missing()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Load every progress document saved under one project
    ///
    /// Unreadable files accumulate into `errors` without aborting the batch.
    /// A project whose storage area does not exist (or cannot be enumerated)
    /// yields zero documents, keeping "no progress yet" indistinguishable
    /// from "feature unused".
    pub async fn load_project(&self, project_path: &str) -> Result<ProjectProgress> {
        let project_path = project_path.trim();
        if project_path.is_empty() {
            return Err(Error::InvalidInput(
                "projectPath is required and cannot be empty".to_string(),
            ));
        }

        let mut progress = ProjectProgress {
            project_path: project_path.to_string(),
            documents: Vec::new(),
            errors: Vec::new(),
            total_files: 0,
        };

        let project_dir = self.project_dir(project_path);
        let mut entries = match fs::read_dir(&project_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(progress),
            Err(e) => {
                tracing::warn!(
                    directory = %project_dir.display(),
                    "Cannot enumerate progress directory, reporting no documents: {}", e
                );
                return Ok(progress);
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(
                        directory = %project_dir.display(),
                        "Progress enumeration stopped early: {}", e
                    );
                    break;
                }
            };

            let file_name = entry.file_name().to_string_lossy().into_owned();
            if !file_name.starts_with("img_") || !file_name.ends_with(".json") {
                continue;
            }
            progress.total_files += 1;

            match fs::read_to_string(entry.path()).await {
                Ok(body) => match serde_json::from_str(&body) {
                    Ok(document) => progress.documents.push(LoadedDocument {
                        document,
                        loaded_from: file_name,
                    }),
                    Err(e) => {
                        tracing::warn!(file = %file_name, "Failed to parse progress file: {}", e);
                        progress.errors.push(LoadError {
                            file_name,
                            message: e.to_string(),
                        });
                    }
                },
                Err(e) => {
                    tracing::warn!(file = %file_name, "Failed to read progress file: {}", e);
                    progress.errors.push(LoadError {
                        file_name,
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            project_path = %progress.project_path,
            loaded = progress.loaded_count(),
            errors = progress.errors.len(),
            "Loaded project progress"
        );
        Ok(progress)
    }

    /// Overwrite the whole-project snapshot
    ///
    /// The payload is caller-defined; it is written verbatim as pretty JSON.
    /// Returns the timestamp of the write.
    pub async fn save_snapshot(&self, data: &serde_json::Value) -> Result<String> {
        let body = serde_json::to_string_pretty(data)
            .map_err(|e| Error::Internal(format!("Failed to serialize snapshot: {}", e)))?;
        fs::write(&self.snapshot_path, body).await?;

        let timestamp = time::iso8601(&time::now());
        tracing::info!(path = %self.snapshot_path.display(), "Saved project snapshot");
        Ok(timestamp)
    }
}
