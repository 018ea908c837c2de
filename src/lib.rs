//! Place matching and signed distance field icon rasterization for map
//! applications.
//!
//! Two independent components:
//! - **Place matcher**: classifies check-in service results against a
//!   geocoded place as exact, good or bad matches by name similarity and
//!   distance
//! - **SDF rasterizer**: turns a painted icon into an alpha-only distance
//!   field for resolution-independent rendering
//!
//! ```rust
//! use mapcore::{CandidatePlace, GeoPoint, Place, SdfParameters, SdfRasterizer, match_places};
//!
//! let here = GeoPoint::new(40.785091, -73.968285);
//! let matches = match_places(
//!     &Place::new("Central Park", here),
//!     vec![CandidatePlace::new("Central  PARK", here)],
//! )?;
//! assert_eq!(matches.exact.len(), 1);
//!
//! let mut rasterizer = SdfRasterizer::new(SdfParameters::default())?;
//! let icon = rasterizer.rasterize(|canvas, buffer| {
//!     canvas.fill_circle(8.0 + buffer as f64, 8.0 + buffer as f64, 6.0);
//!     Ok::<(), std::convert::Infallible>(())
//! })?;
//! assert_eq!(icon.width(), 22);
//! # Ok::<(), mapcore::MapcoreError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod matcher;
pub mod sdf;

pub use error::{ErrorKind, MapcoreError, Result};

pub use config::{Config, MAX_IMAGE_SIDE, MatchThresholds, SdfParameters};

pub use compute::distance::DistanceMetric;

pub use matcher::{MatchBucket, MatchKind, MatchScore, PlaceMatcher, match_places};

pub use sdf::{Canvas, CoverageBitmap, SdfRasterizer, SdfResult, rasterize};

#[cfg(feature = "sync")]
pub use sdf::SyncRasterizer;

pub use mapcore_types::place::{CandidatePlace, Place};
pub use mapcore_types::point::GeoPoint;

#[cfg(feature = "geojson")]
pub use mapcore_types::place::GeoJsonError;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{MapcoreError, Result};

    pub use crate::{CandidatePlace, GeoPoint, Place};

    pub use crate::{MatchBucket, MatchKind, PlaceMatcher};

    pub use crate::{Canvas, SdfParameters, SdfRasterizer, SdfResult};

    #[cfg(feature = "sync")]
    pub use crate::SyncRasterizer;

    pub use crate::{Config, DistanceMetric};
}
