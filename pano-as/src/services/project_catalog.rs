//! Project catalog traversal
//!
//! Walks exactly three directory levels under the images root to build the
//! navigation tree. A branch that cannot be read is logged and dropped
//! without touching its siblings; empty branches are pruned outright.

use crate::models::{DirectoryEntry, ProjectSummary, Section, SubSection};
use crate::services::variant_matcher::is_image_file;
use pano_common::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Read-only catalog builder over one images root
#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    images_root: PathBuf,
}

impl ProjectCatalog {
    pub fn new(images_root: impl Into<PathBuf>) -> Self {
        Self {
            images_root: images_root.into(),
        }
    }

    /// Build the full project/section/subsection summary tree
    ///
    /// A missing images root yields an empty catalog. Sections with no
    /// subsections and projects with no sections are omitted entirely; a
    /// subsection with zero images is kept (count 0 is still a subsection).
    pub async fn build(&self) -> Result<Vec<ProjectSummary>> {
        let projects_listing = match Self::subdirectories(&self.images_root).await {
            Ok(listing) => listing,
            Err(Error::NotFound(_)) => {
                tracing::info!(
                    root = %self.images_root.display(),
                    "Images directory not found, catalog is empty"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut projects = Vec::new();
        for project_name in projects_listing {
            let project_path = self.images_root.join(&project_name);
            let sections = self.build_sections(&project_name, &project_path).await;
            // Only keep projects that still have sections
            if !sections.is_empty() {
                projects.push(ProjectSummary {
                    name: project_name,
                    sections,
                });
            }
        }

        tracing::info!(count = projects.len(), "Built project catalog");
        Ok(projects)
    }

    async fn build_sections(&self, project_name: &str, project_path: &Path) -> Vec<Section> {
        let section_names = match Self::subdirectories(project_path).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(
                    project = %project_name,
                    "Error reading project directory: {}", e
                );
                return Vec::new();
            }
        };

        let mut sections = Vec::new();
        for section_name in section_names {
            let section_path = project_path.join(&section_name);
            let sub_sections = self
                .build_sub_sections(project_name, &section_name, &section_path)
                .await;
            // Only keep sections that still have subsections
            if !sub_sections.is_empty() {
                sections.push(Section {
                    name: section_name,
                    sub_sections,
                });
            }
        }
        sections
    }

    async fn build_sub_sections(
        &self,
        project_name: &str,
        section_name: &str,
        section_path: &Path,
    ) -> Vec<SubSection> {
        let sub_section_names = match Self::subdirectories(section_path).await {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!(
                    project = %project_name,
                    section = %section_name,
                    "Error reading section directory: {}", e
                );
                return Vec::new();
            }
        };

        let mut sub_sections = Vec::new();
        for sub_section_name in sub_section_names {
            let image_count = self.count_images(&section_path.join(&sub_section_name)).await;
            sub_sections.push(SubSection {
                path: format!(
                    "/images/{}/{}/{}/",
                    project_name, section_name, sub_section_name
                ),
                name: sub_section_name,
                image_count,
            });
        }
        sub_sections
    }

    /// Count recognized images in one subsection, degrading to 0 on error
    async fn count_images(&self, sub_section_path: &Path) -> usize {
        let mut entries = match fs::read_dir(sub_section_path).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    directory = %sub_section_path.display(),
                    "Error counting images: {}", e
                );
                return 0;
            }
        };

        let mut count = 0;
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let is_file = entry
                        .file_type()
                        .await
                        .map(|t| t.is_file())
                        .unwrap_or(false);
                    if is_file && is_image_file(&entry.file_name().to_string_lossy()) {
                        count += 1;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(
                        directory = %sub_section_path.display(),
                        "Error counting images: {}", e
                    );
                    break;
                }
            }
        }
        count
    }

    /// List the top-level directories under the images root
    pub async fn list_directories(&self) -> Result<Vec<DirectoryEntry>> {
        let directories = Self::subdirectories(&self.images_root)
            .await?
            .into_iter()
            .map(|name| DirectoryEntry {
                path: format!("/images/{}/", name),
                name,
            })
            .collect();
        Ok(directories)
    }

    /// Names of the immediate subdirectories of `dir`, in enumeration order
    async fn subdirectories(dir: &Path) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(format!(
                    "Directory not found: {}",
                    dir.display()
                )))
            }
            Err(e) => return Err(Error::Io(e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}
