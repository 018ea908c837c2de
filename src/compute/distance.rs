//! Distances between geographic coordinates, in kilometers.

use geo::{Distance, Geodesic, Haversine, Rhumb};
use mapcore_types::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// Distance metrics for candidate-to-reference distances.
///
/// - **Haversine**: Fast spherical distance, the default
/// - **Geodesic**: Ellipsoidal distance (Karney 2013), slower
/// - **Rhumb**: Constant bearing distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    #[default]
    Haversine,
    Geodesic,
    Rhumb,
}

/// Calculate the distance between two coordinates using the specified metric.
///
/// # Returns
///
/// Distance in kilometers
///
/// # Examples
///
/// ```rust
/// use mapcore::compute::distance::{DistanceMetric, distance_km};
/// use mapcore::GeoPoint;
///
/// let nyc = GeoPoint::new(40.7128, -74.0060);
/// let la = GeoPoint::new(34.0522, -118.2437);
///
/// let dist = distance_km(&nyc, &la, DistanceMetric::Haversine);
/// assert!(dist > 3_900.0); // ~3,944 km
/// ```
pub fn distance_km(a: &GeoPoint, b: &GeoPoint, metric: DistanceMetric) -> f64 {
    let (p1, p2) = (a.to_point(), b.to_point());
    let meters = match metric {
        DistanceMetric::Haversine => Haversine.distance(p1, p2),
        DistanceMetric::Geodesic => Geodesic.distance(p1, p2),
        DistanceMetric::Rhumb => Rhumb.distance(p1, p2),
    };
    meters / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coincident_points_are_zero_for_every_metric() {
        let p = GeoPoint::new(40.785091, -73.968285);
        for metric in [
            DistanceMetric::Haversine,
            DistanceMetric::Geodesic,
            DistanceMetric::Rhumb,
        ] {
            assert_eq!(distance_km(&p, &p, metric), 0.0);
        }
    }

    #[test]
    fn test_metrics_agree_over_short_distances() {
        let a = GeoPoint::new(40.785091, -73.968285);
        let b = GeoPoint::new(40.785271, -73.968285);
        let h = distance_km(&a, &b, DistanceMetric::Haversine);
        let g = distance_km(&a, &b, DistanceMetric::Geodesic);
        let r = distance_km(&a, &b, DistanceMetric::Rhumb);
        assert!((h - 0.02).abs() < 0.001);
        assert!((h - g).abs() < 0.001);
        assert!((h - r).abs() < 1e-6);
    }

    #[test]
    fn test_metric_serde_names() {
        let json = serde_json::to_string(&DistanceMetric::Geodesic).unwrap();
        assert_eq!(json, "\"geodesic\"");
    }
}
