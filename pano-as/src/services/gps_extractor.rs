//! GPS metadata extraction from image files
//!
//! Reads the EXIF GPS IFD and converts latitude/longitude/altitude into a
//! signed decimal [`GpsFix`]. Extraction is best-effort: images without GPS
//! tags, corrupt EXIF blocks, and unreadable files all collapse to `None`,
//! never an error, so one bad image cannot abort a batch.

use crate::models::GpsFix;
use exif::{In, Reader, Tag, Value};
use std::io::Cursor;
use std::path::Path;

/// GPS metadata extractor
#[derive(Debug, Clone, Default)]
pub struct GpsExtractor {}

impl GpsExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Extract a GPS fix from raw image bytes
    pub fn extract(&self, bytes: &[u8]) -> Option<GpsFix> {
        let exif = match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
            Ok(exif) => exif,
            Err(e) => {
                tracing::debug!("No usable EXIF metadata: {}", e);
                return None;
            }
        };

        let latitude = Self::coordinate(&exif, Tag::GPSLatitude, Tag::GPSLatitudeRef, b'S')?;
        let longitude = Self::coordinate(&exif, Tag::GPSLongitude, Tag::GPSLongitudeRef, b'W')?;
        let altitude = Self::altitude(&exif);

        tracing::debug!(latitude, longitude, "Extracted GPS fix");
        Some(GpsFix {
            latitude,
            longitude,
            altitude,
        })
    }

    /// Extract a GPS fix from an image file on disk
    ///
    /// Compressed variants may carry stripped metadata, so callers pass the
    /// ORIGINAL file's path here, not the served one.
    pub async fn extract_from_file(&self, path: &Path) -> Option<GpsFix> {
        match tokio::fs::read(path).await {
            Ok(bytes) => self.extract(&bytes),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    "Failed to read image for GPS extraction: {}", e
                );
                None
            }
        }
    }

    /// Decimal degrees from a DMS rational triple plus hemisphere reference
    fn coordinate(exif: &exif::Exif, tag: Tag, ref_tag: Tag, negative_ref: u8) -> Option<f64> {
        let field = exif.get_field(tag, In::PRIMARY)?;
        let degrees = Self::dms_to_decimal(&field.value)?;
        let negative = exif
            .get_field(ref_tag, In::PRIMARY)
            .map(|f| Self::ref_matches(&f.value, negative_ref))
            .unwrap_or(false);
        Some(if negative { -degrees } else { degrees })
    }

    fn dms_to_decimal(value: &Value) -> Option<f64> {
        let parts = match value {
            Value::Rational(parts) if !parts.is_empty() => parts,
            _ => return None,
        };
        let component = |index: usize| {
            parts
                .get(index)
                .and_then(|r| (r.denom != 0).then(|| r.to_f64()))
        };
        let degrees = component(0)?;
        let minutes = component(1).unwrap_or(0.0);
        let seconds = component(2).unwrap_or(0.0);
        Some(degrees + minutes / 60.0 + seconds / 3600.0)
    }

    fn ref_matches(value: &Value, expected: u8) -> bool {
        match value {
            Value::Ascii(strings) => strings
                .first()
                .and_then(|s| s.first())
                .map(|b| b.eq_ignore_ascii_case(&expected))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Altitude with the hemisphere correction applied
    ///
    /// `GPSAltitudeRef` 1 means the value is measured below the reference
    /// sea level, so the raw rational is negated.
    fn altitude(exif: &exif::Exif) -> Option<f64> {
        let field = exif.get_field(Tag::GPSAltitude, In::PRIMARY)?;
        let raw = match &field.value {
            Value::Rational(parts) => parts
                .first()
                .and_then(|r| (r.denom != 0).then(|| r.to_f64()))?,
            _ => return None,
        };
        let below_sea_level = exif
            .get_field(Tag::GPSAltitudeRef, In::PRIMARY)
            .and_then(|f| f.value.get_uint(0))
            .map(|v| v == 1)
            .unwrap_or(false);
        Some(if below_sea_level { -raw } else { raw })
    }
}
