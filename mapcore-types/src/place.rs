use crate::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// Error type for GeoJSON conversions.
#[cfg(feature = "geojson")]
#[derive(Debug)]
pub enum GeoJsonError {
    /// Deserialization failed
    Deserialization(String),
    /// Invalid geometry type
    InvalidGeometry(String),
    /// Invalid coordinates
    InvalidCoordinates(String),
    /// A required property is missing
    MissingProperty(String),
}

#[cfg(feature = "geojson")]
impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deserialization(msg) => write!(f, "GeoJSON deserialization error: {}", msg),
            Self::InvalidGeometry(msg) => write!(f, "Invalid GeoJSON geometry: {}", msg),
            Self::InvalidCoordinates(msg) => write!(f, "Invalid GeoJSON coordinates: {}", msg),
            Self::MissingProperty(msg) => write!(f, "Missing GeoJSON property: {}", msg),
        }
    }
}

#[cfg(feature = "geojson")]
impl std::error::Error for GeoJsonError {}

/// A named place at a known location, typically the result of geocoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub location: GeoPoint,
}

impl Place {
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &GeoPoint {
        &self.location
    }
}

/// A place returned by an external check-in or place-search service.
///
/// Only `name` and `location` take part in matching. The remaining fields
/// are the service's own identifiers and are carried through untouched.
///
/// # Examples
///
/// ```
/// use mapcore_types::place::CandidatePlace;
/// use mapcore_types::point::GeoPoint;
///
/// let venue = CandidatePlace::new("Blue Bottle", GeoPoint::new(37.7764, -122.4232))
///     .with_id("4b5a")
///     .with_category("Coffee Shop");
/// assert_eq!(venue.id.as_deref(), Some("4b5a"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidatePlace {
    pub name: String,
    pub location: GeoPoint,
    /// Service-specific identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Link to the place's page on the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl CandidatePlace {
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            name: name.into(),
            location,
            id: None,
            category: None,
            link: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &GeoPoint {
        &self.location
    }

    /// Parse a single GeoJSON `Feature` with a `Point` geometry.
    ///
    /// The `name` property is required; `category` and `link` properties and
    /// the feature `id` are picked up when present.
    ///
    /// # Examples
    ///
    /// ```
    /// # #[cfg(feature = "geojson")]
    /// # {
    /// use mapcore_types::place::CandidatePlace;
    ///
    /// let json = r#"{
    ///     "type": "Feature",
    ///     "id": "v1",
    ///     "geometry": {"type": "Point", "coordinates": [-73.968285, 40.785091]},
    ///     "properties": {"name": "Central Park"}
    /// }"#;
    /// let place = CandidatePlace::from_geojson(json).unwrap();
    /// assert_eq!(place.name, "Central Park");
    /// assert_eq!(place.location.latitude(), 40.785091);
    /// # }
    /// ```
    #[cfg(feature = "geojson")]
    pub fn from_geojson(geojson: &str) -> Result<Self, GeoJsonError> {
        match parse_geojson(geojson)? {
            geojson::GeoJson::Feature(feature) => Self::from_feature(&feature),
            _ => Err(GeoJsonError::InvalidGeometry(
                "GeoJSON document is not a Feature".to_string(),
            )),
        }
    }

    /// Parse every feature of a GeoJSON `FeatureCollection`.
    #[cfg(feature = "geojson")]
    pub fn collection_from_geojson(geojson: &str) -> Result<Vec<Self>, GeoJsonError> {
        match parse_geojson(geojson)? {
            geojson::GeoJson::FeatureCollection(collection) => collection
                .features
                .iter()
                .map(Self::from_feature)
                .collect(),
            geojson::GeoJson::Feature(feature) => Ok(vec![Self::from_feature(&feature)?]),
            geojson::GeoJson::Geometry(_) => Err(GeoJsonError::InvalidGeometry(
                "GeoJSON document is a bare geometry, expected features".to_string(),
            )),
        }
    }

    #[cfg(feature = "geojson")]
    fn from_feature(feature: &geojson::Feature) -> Result<Self, GeoJsonError> {
        use geojson::Value;
        use geojson::feature::Id;

        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| GeoJsonError::InvalidGeometry("Feature has no geometry".to_string()))?;

        let location = match &geometry.value {
            Value::Point(coords) => {
                if coords.len() < 2 {
                    return Err(GeoJsonError::InvalidCoordinates(
                        "Point must have at least 2 coordinates".to_string(),
                    ));
                }
                GeoPoint::new(coords[1], coords[0])
            }
            _ => {
                return Err(GeoJsonError::InvalidGeometry(
                    "Feature geometry is not a Point".to_string(),
                ));
            }
        };

        let string_property = |key: &str| {
            feature
                .property(key)
                .and_then(|value| value.as_str())
                .map(str::to_string)
        };

        let name = string_property("name")
            .ok_or_else(|| GeoJsonError::MissingProperty("name".to_string()))?;

        let id = match &feature.id {
            Some(Id::String(id)) => Some(id.clone()),
            Some(Id::Number(id)) => Some(id.to_string()),
            None => None,
        };

        Ok(Self {
            name,
            location,
            id,
            category: string_property("category"),
            link: string_property("link"),
        })
    }
}

#[cfg(feature = "geojson")]
fn parse_geojson(geojson: &str) -> Result<geojson::GeoJson, GeoJsonError> {
    geojson
        .parse::<geojson::GeoJson>()
        .map_err(|e| GeoJsonError::Deserialization(format!("Failed to parse GeoJSON: {}", e)))
}

impl From<Place> for CandidatePlace {
    fn from(place: Place) -> Self {
        Self::new(place.name, place.location)
    }
}
