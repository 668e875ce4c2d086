//! Data model for the asset service
//!
//! Serialized types use camelCase field names: the progress documents on
//! disk and the response shapes consumed by the routing layer both predate
//! this crate and must keep their exact JSON spelling.

pub mod catalog;
pub mod compression;
pub mod gps;
pub mod images;
pub mod locator;
pub mod progress;

pub use catalog::{DirectoryEntry, ProjectSummary, Section, SubSection};
pub use compression::{
    CompressionOptions, CompressionOutcome, CompressionReport, CompressionStatus,
    CompressionSummary,
};
pub use gps::GpsFix;
pub use images::{
    DirectoryImages, ImageEntry, ImageFile, ServeMode, ServePlan, ServeStats, VariantMapping,
};
pub use locator::AssetLocator;
pub use progress::{
    ImageProgress, LoadError, LoadedDocument, ProgressDocument, ProgressInput, ProjectProgress,
    SaveReceipt, PROGRESS_VERSION,
};
