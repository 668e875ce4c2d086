//! Filesystem-backed services of the asset backend
//!
//! Every service is stateless over its configured root: each call re-reads
//! the filesystem, and nothing is cached between requests.

pub mod compression;
pub mod gps_extractor;
pub mod image_service;
pub mod path_resolver;
pub mod progress_store;
pub mod project_catalog;
pub mod variant_matcher;

pub use compression::{CompressionRunner, ImageCompressor};
pub use gps_extractor::GpsExtractor;
pub use image_service::ImageService;
pub use path_resolver::{PathResolver, ResolvedDirectory};
pub use progress_store::ProgressStore;
pub use project_catalog::ProjectCatalog;
pub use variant_matcher::VariantMatcher;
