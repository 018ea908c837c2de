//! Thread-safe wrapper for sharing one rasterizer's scratch buffers.
//!
//! Enable the `sync` feature to use this module:
//!
//! ```toml
//! [dependencies]
//! mapcore = { version = "0.1", features = ["sync"] }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use mapcore::{SdfParameters, SyncRasterizer};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rasterizer = SyncRasterizer::new(SdfParameters::default())?;
//! let shared = rasterizer.clone();
//!
//! let handle = thread::spawn(move || {
//!     shared.rasterize(|canvas, buffer| {
//!         canvas.fill_circle(8.0 + buffer as f64, 8.0 + buffer as f64, 6.0);
//!         Ok::<(), std::convert::Infallible>(())
//!     })
//! });
//!
//! let local = rasterizer.rasterize(|_, _| Ok::<(), std::convert::Infallible>(()))?;
//! let remote = handle.join().unwrap()?;
//! assert_eq!(local.width(), remote.width());
//! # Ok(())
//! # }
//! ```

use super::canvas::Canvas;
use super::rasterizer::{SdfRasterizer, SdfResult};
use crate::config::SdfParameters;
use crate::error::Result;
use parking_lot::Mutex;
use std::fmt::Display;
use std::sync::Arc;

/// Shared `SdfRasterizer` behind `Arc<Mutex<_>>`.
///
/// Each call holds the lock for the whole draw-and-transform, so the canvas
/// and distance grids are never visible to two callers at once.
#[derive(Debug, Clone)]
pub struct SyncRasterizer {
    inner: Arc<Mutex<SdfRasterizer>>,
}

impl SyncRasterizer {
    pub fn new(params: SdfParameters) -> Result<Self> {
        Ok(Self::from_rasterizer(SdfRasterizer::new(params)?))
    }

    pub fn from_rasterizer(rasterizer: SdfRasterizer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(rasterizer)),
        }
    }

    pub fn params(&self) -> SdfParameters {
        *self.inner.lock().params()
    }

    /// See [`SdfRasterizer::rasterize`].
    pub fn rasterize<F, E>(&self, draw: F) -> Result<SdfResult>
    where
        F: FnOnce(&mut Canvas, u32) -> std::result::Result<(), E>,
        E: Display,
    {
        self.inner.lock().rasterize(draw)
    }
}
