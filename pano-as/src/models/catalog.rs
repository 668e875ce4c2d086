//! Project catalog summary tree

use serde::Serialize;

/// One subsection directory and its image count
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubSection {
    pub name: String,
    /// Public path prefix, e.g. `/images/alpha/beta/gamma/`
    pub path: String,
    pub image_count: usize,
}

/// One section and its surviving subsections
///
/// A section with zero subsections is pruned from the catalog entirely.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub name: String,
    pub sub_sections: Vec<SubSection>,
}

/// One project and its surviving sections
///
/// A project with zero sections is pruned from the catalog entirely.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub name: String,
    pub sections: Vec<Section>,
}

/// One top-level directory under the images root
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub name: String,
    /// Public path prefix, e.g. `/images/legacy-shoot/`
    pub path: String,
}
