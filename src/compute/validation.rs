//! Validation for geographic coordinates and places.

use crate::error::{MapcoreError, Result};
use mapcore_types::place::{CandidatePlace, Place};
use mapcore_types::point::GeoPoint;

/// Validates a coordinate has finite, in-range latitude and longitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]
///
/// # Examples
///
/// ```
/// use mapcore::compute::validation::validate_geo_point;
/// use mapcore::GeoPoint;
///
/// // Valid point
/// let nyc = GeoPoint::new(40.7128, -74.0060);
/// assert!(validate_geo_point(&nyc).is_ok());
///
/// // Invalid longitude
/// let invalid = GeoPoint::new(40.0, 200.0);
/// assert!(validate_geo_point(&invalid).is_err());
///
/// // Non-finite latitude
/// let invalid = GeoPoint::new(f64::NAN, -74.0);
/// assert!(validate_geo_point(&invalid).is_err());
/// ```
pub fn validate_geo_point(point: &GeoPoint) -> Result<()> {
    match coordinate_issue(point) {
        Some(reason) => Err(MapcoreError::InvalidInput(reason)),
        None => Ok(()),
    }
}

/// Why a coordinate is unusable, or `None` when it is fine.
fn coordinate_issue(point: &GeoPoint) -> Option<String> {
    let (lat, lon) = (point.latitude(), point.longitude());

    if !lon.is_finite() {
        return Some(format!("Longitude must be finite, got: {}", lon));
    }

    if !lat.is_finite() {
        return Some(format!("Latitude must be finite, got: {}", lat));
    }

    if !(-180.0..=180.0).contains(&lon) {
        return Some(format!("Longitude out of range [-180.0, 180.0]: {}", lon));
    }

    if !(-90.0..=90.0).contains(&lat) {
        return Some(format!("Latitude out of range [-90.0, 90.0]: {}", lat));
    }

    None
}

/// Validates the reference place of a match.
pub fn validate_place(place: &Place) -> Result<()> {
    match coordinate_issue(&place.location) {
        Some(reason) => Err(MapcoreError::InvalidInput(format!(
            "Reference place '{}': {}",
            place.name, reason
        ))),
        None => Ok(()),
    }
}

/// Validates every candidate, naming the first offending index.
pub fn validate_candidates(candidates: &[CandidatePlace]) -> Result<()> {
    for (idx, candidate) in candidates.iter().enumerate() {
        if let Some(reason) = coordinate_issue(&candidate.location) {
            return Err(MapcoreError::InvalidInput(format!(
                "Candidate at index {}: {}",
                idx, reason
            )));
        }
    }
    Ok(())
}
