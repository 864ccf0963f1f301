//! Shared query types for the search layer.
//!
//! These types travel between the orchestrator and the entity backends and
//! are always available regardless of which backends are compiled in.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Radius applied when a caller supplies coordinates without a radius.
pub const DEFAULT_RADIUS_METERS: f64 = 5000.0;

/// Sort direction for paginated backend queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending (smallest first).
    Asc,
    /// Descending (largest first).
    #[default]
    Desc,
}

/// A validated geo-proximity filter.
///
/// A filter only exists when both coordinates resolved to finite numbers;
/// a partial pair is a caller error, never a silent "no filter". Use
/// [`GeoFilter::from_parts`] to build one from optional request values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoFilter {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Search radius in meters.
    #[serde(default = "default_radius")]
    pub radius_meters: f64,
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS_METERS
}

impl GeoFilter {
    /// Create a filter from a complete coordinate pair.
    pub fn new(latitude: f64, longitude: f64, radius_meters: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_meters,
        }
    }

    /// Build a filter from optional request parameters.
    ///
    /// Returns `Ok(None)` when both coordinates are absent, and an
    /// [`Error::InvalidGeoFilter`] when exactly one is present or either
    /// value is non-finite. A missing radius falls back to
    /// [`DEFAULT_RADIUS_METERS`].
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
        radius_meters: Option<f64>,
    ) -> Result<Option<Self>> {
        match (latitude, longitude) {
            (None, None) => Ok(None),
            (Some(_), None) => Err(Error::invalid_geo("latitude supplied without longitude")),
            (None, Some(_)) => Err(Error::invalid_geo("longitude supplied without latitude")),
            (Some(lat), Some(lon)) => {
                if !lat.is_finite() || !lon.is_finite() {
                    return Err(Error::invalid_geo(format!(
                        "coordinates must be finite numbers (got {lat}, {lon})"
                    )));
                }
                let radius = radius_meters.unwrap_or(DEFAULT_RADIUS_METERS);
                if !radius.is_finite() || radius <= 0.0 {
                    return Err(Error::invalid_geo(format!(
                        "radius must be a positive number of meters (got {radius})"
                    )));
                }
                Ok(Some(Self::new(lat, lon, radius)))
            }
        }
    }
}
