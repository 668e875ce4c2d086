//! GPS position type shared by EXIF extraction and annotation overrides

use serde::{Deserialize, Serialize};

/// A GPS fix in signed decimal degrees
///
/// Altitude is meters relative to sea level; negative values are below the
/// reference. The field is omitted from JSON when absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GpsFix {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}
