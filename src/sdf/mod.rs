//! Signed distance field rasterization for map icons.
//!
//! An icon source paints onto a [`Canvas`]; the painted alpha is read back as
//! coverage and run through a squared Euclidean distance transform twice,
//! once from outside the shape and once from inside. The signed difference
//! is encoded into the alpha channel of an otherwise black RGBA image that a
//! renderer can scale without re-rasterizing the source.
//!
//! This is the same approach as Mapbox's TinySDF, generalized to arbitrary
//! drawings instead of font glyphs.

pub mod canvas;
pub mod rasterizer;
#[cfg(feature = "sync")]
pub mod sync;

pub use canvas::{Canvas, CoverageBitmap};
pub use rasterizer::{SdfRasterizer, SdfResult, encode_distance, rasterize};
#[cfg(feature = "sync")]
pub use sync::SyncRasterizer;
