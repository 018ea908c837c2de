//! Serializable configuration for the matcher and the rasterizer.
//!
//! Every field has a default, so partial JSON or TOML documents are accepted.

use crate::compute::distance::DistanceMetric;
use crate::error::{MapcoreError, Result};
use serde::{Deserialize, Serialize};

/// Largest accepted output side (`icon_size + 2 * buffer`) in pixels.
pub const MAX_IMAGE_SIDE: u32 = 4096;

/// Ordered classification rules for the place matcher.
///
/// A candidate is exact when it is closer than `exact_distance_km` and its
/// normalized name is within `exact_max_edits` edits; failing that it is good
/// when closer than `good_distance_km` and within `good_max_edits` edits.
/// Everything else is bad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchThresholds {
    #[serde(default = "MatchThresholds::default_exact_distance_km")]
    pub exact_distance_km: f64,
    #[serde(default = "MatchThresholds::default_exact_max_edits")]
    pub exact_max_edits: usize,
    #[serde(default = "MatchThresholds::default_good_distance_km")]
    pub good_distance_km: f64,
    #[serde(default = "MatchThresholds::default_good_max_edits")]
    pub good_max_edits: usize,
}

impl MatchThresholds {
    const fn default_exact_distance_km() -> f64 {
        0.01
    }

    const fn default_exact_max_edits() -> usize {
        2
    }

    const fn default_good_distance_km() -> f64 {
        0.03
    }

    const fn default_good_max_edits() -> usize {
        5
    }

    pub fn validate(&self) -> Result<()> {
        for (label, value) in [
            ("exact_distance_km", self.exact_distance_km),
            ("good_distance_km", self.good_distance_km),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MapcoreError::Config(format!(
                    "{} must be finite and non-negative, got: {}",
                    label, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            exact_distance_km: Self::default_exact_distance_km(),
            exact_max_edits: Self::default_exact_max_edits(),
            good_distance_km: Self::default_good_distance_km(),
            good_max_edits: Self::default_good_max_edits(),
        }
    }
}

/// Options for signed distance field generation.
///
/// # Example
///
/// ```rust
/// use mapcore::SdfParameters;
///
/// let params = SdfParameters::default().with_icon_size(32).with_radius(4.0);
/// assert_eq!(params.size(), 38);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SdfParameters {
    /// Side of the square glyph area in pixels
    #[serde(default = "SdfParameters::default_icon_size")]
    pub icon_size: u32,

    /// Padding around the glyph on every side, room for halos
    #[serde(default = "SdfParameters::default_buffer")]
    pub buffer: u32,

    /// Distance in pixels spanned by the full alpha ramp
    #[serde(default = "SdfParameters::default_radius")]
    pub radius: f64,

    /// Position of the shape edge within the 0..255 alpha range
    #[serde(default = "SdfParameters::default_cutoff")]
    pub cutoff: f64,
}

impl SdfParameters {
    const fn default_icon_size() -> u32 {
        16
    }

    const fn default_buffer() -> u32 {
        3
    }

    const fn default_radius() -> f64 {
        8.0
    }

    const fn default_cutoff() -> f64 {
        0.25
    }

    pub fn with_icon_size(mut self, icon_size: u32) -> Self {
        self.icon_size = icon_size;
        self
    }

    pub fn with_buffer(mut self, buffer: u32) -> Self {
        self.buffer = buffer;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    /// Side of the output image: `icon_size + 2 * buffer`.
    ///
    /// Saturates on overflow; `validate` rejects such values.
    pub fn size(&self) -> u32 {
        self.icon_size
            .saturating_add(self.buffer.saturating_mul(2))
    }

    /// Check the options before any drawing happens.
    pub fn validate(&self) -> Result<()> {
        if self.icon_size == 0 {
            return Err(MapcoreError::InvalidParameters(
                "icon_size must be greater than zero".to_string(),
            ));
        }

        if self.buffer == 0 {
            return Err(MapcoreError::InvalidParameters(
                "buffer must be greater than zero".to_string(),
            ));
        }

        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(MapcoreError::InvalidParameters(format!(
                "radius must be finite and positive, got: {}",
                self.radius
            )));
        }

        if !self.cutoff.is_finite() {
            return Err(MapcoreError::InvalidParameters(format!(
                "cutoff must be finite, got: {}",
                self.cutoff
            )));
        }

        let size = self
            .buffer
            .checked_mul(2)
            .and_then(|padding| self.icon_size.checked_add(padding))
            .ok_or_else(|| {
                MapcoreError::InvalidParameters(format!(
                    "icon_size {} with buffer {} overflows the image extent",
                    self.icon_size, self.buffer
                ))
            })?;

        if size > MAX_IMAGE_SIDE {
            return Err(MapcoreError::InvalidParameters(format!(
                "image side {} exceeds the maximum of {} pixels",
                size, MAX_IMAGE_SIDE
            )));
        }

        Ok(())
    }
}

impl Default for SdfParameters {
    fn default() -> Self {
        Self {
            icon_size: Self::default_icon_size(),
            buffer: Self::default_buffer(),
            radius: Self::default_radius(),
            cutoff: Self::default_cutoff(),
        }
    }
}

/// Combined configuration for both components.
///
/// # Example
///
/// ```rust
/// use mapcore::Config;
///
/// let json = r#"{
///     "matcher": { "exact_max_edits": 1 },
///     "distance_metric": "geodesic",
///     "sdf": { "icon_size": 24 }
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.matcher.exact_max_edits, 1);
/// assert_eq!(config.matcher.good_max_edits, 5);
/// assert_eq!(config.sdf.icon_size, 24);
/// assert_eq!(config.sdf.buffer, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub matcher: MatchThresholds,

    /// Metric used for the candidate-to-reference distance
    #[serde(default)]
    pub distance_metric: DistanceMetric,

    #[serde(default)]
    pub sdf: SdfParameters,
}

impl Config {
    pub fn with_thresholds(mut self, thresholds: MatchThresholds) -> Self {
        self.matcher = thresholds;
        self
    }

    pub fn with_distance_metric(mut self, metric: DistanceMetric) -> Self {
        self.distance_metric = metric;
        self
    }

    pub fn with_sdf(mut self, params: SdfParameters) -> Self {
        self.sdf = params;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.matcher.validate()?;
        self.sdf.validate()
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MapcoreError::Config(e.to_string()))
    }
}
