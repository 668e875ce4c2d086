//! Locator-to-directory resolution
//!
//! Turns a caller-supplied locator string into the physical directory it
//! names under the images root, plus the public path prefix the viewer uses
//! to fetch files from it. The only I/O is an existence check.

use crate::models::AssetLocator;
use pano_common::{Error, Result};
use std::path::{Path, PathBuf};

/// A locator resolved to a physical directory
#[derive(Debug, Clone)]
pub struct ResolvedDirectory {
    pub locator: AssetLocator,
    pub directory: PathBuf,
    /// Public prefix for files in this directory, e.g. `/images/alpha/beta/gamma`
    pub public_prefix: String,
}

/// Locator resolver over one images root
#[derive(Debug, Clone)]
pub struct PathResolver {
    images_root: PathBuf,
}

impl PathResolver {
    pub fn new(images_root: impl Into<PathBuf>) -> Self {
        Self {
            images_root: images_root.into(),
        }
    }

    pub fn images_root(&self) -> &Path {
        &self.images_root
    }

    /// Resolve a locator to an existing directory
    ///
    /// Exactly three non-empty segments select the nested layout; everything
    /// else is joined as one opaque segment (legacy flat layout). Fails with
    /// `NotFound` when the directory does not exist.
    pub async fn resolve(&self, locator: &str) -> Result<ResolvedDirectory> {
        if locator.is_empty() {
            return Err(Error::InvalidInput("Directory path is required".to_string()));
        }

        let parsed = AssetLocator::parse(locator);
        let (directory, public_prefix) = match &parsed {
            AssetLocator::Hierarchical {
                project,
                section,
                subsection,
            } => (
                self.images_root.join(project).join(section).join(subsection),
                format!("/images/{}/{}/{}", project, section, subsection),
            ),
            AssetLocator::Flat(name) => {
                (self.images_root.join(name), format!("/images/{}", name))
            }
        };

        match tokio::fs::metadata(&directory).await {
            Ok(metadata) if metadata.is_dir() => {
                tracing::debug!(
                    locator = %locator,
                    directory = %directory.display(),
                    "Resolved image directory"
                );
                Ok(ResolvedDirectory {
                    locator: parsed,
                    directory,
                    public_prefix,
                })
            }
            Ok(_) => Err(Error::NotFound(format!("Directory not found: {}", locator))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(format!("Directory not found: {}", locator)))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
}
