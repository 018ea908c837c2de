//! Pure algorithms behind the matcher and the rasterizer.
//!
//! Nothing in here owns state between calls:
//! - `distance`: great-circle distances between coordinates
//! - `levenshtein`: name normalization and edit distance
//! - `edt`: squared Euclidean distance transform
//! - `validation`: coordinate checks

pub mod distance;
pub mod edt;
pub mod levenshtein;
pub mod validation;
