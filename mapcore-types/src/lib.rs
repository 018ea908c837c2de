//! # mapcore-types
//!
//! Plain data types shared by the `mapcore` place matcher:
//!
//! - **Coordinates**: `GeoPoint`
//! - **Places**: `Place` (the geocoded reference) and `CandidatePlace`
//!   (a result from a check-in or place-search service)
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use mapcore_types::place::{CandidatePlace, Place};
//! use mapcore_types::point::GeoPoint;
//!
//! let location = GeoPoint::new(40.785091, -73.968285);
//! let reference = Place::new("Central Park", location);
//! let candidate = CandidatePlace::new("central park", location);
//! assert_eq!(reference.location(), candidate.location());
//! ```

pub mod place;
pub mod point;
