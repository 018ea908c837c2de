use super::canvas::Canvas;
use crate::compute::edt::{DistanceGrid, EdtScratch, INF};
use crate::config::{Config, SdfParameters};
use crate::error::{MapcoreError, Result};
use bytes::Bytes;
use std::fmt::Display;

/// A finished distance field: black RGBA with the distance in alpha.
///
/// Alpha 255 is deep inside the shape, 0 far outside; the edge sits at
/// `255 * (1 - cutoff)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdfResult {
    data: Bytes,
    width: u32,
    height: u32,
}

impl SdfResult {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA bytes, `width * height * 4` long.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Encoded distance at a pixel.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y as usize * self.width as usize + x as usize) * 4 + 3])
    }

    /// The single-channel distance field, row-major.
    pub fn alpha_channel(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.chunks_exact(4).map(|px| px[3])
    }

    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

/// Map a signed pixel distance to an alpha byte, clamped to `0..=255`.
#[inline]
pub fn encode_distance(distance: f64, radius: f64, cutoff: f64) -> u8 {
    let value = (255.0 - 255.0 * (distance / radius + cutoff)).round();
    // NaN saturates to 0 in the cast
    value.clamp(0.0, 255.0) as u8
}

/// Turns painted icons into signed distance fields.
///
/// The drawing surface and both distance grids are allocated once and
/// reused by every call, so a rasterizer is configured for one icon size.
#[derive(Debug)]
pub struct SdfRasterizer {
    params: SdfParameters,
    canvas: Option<Canvas>,
    grid_outer: DistanceGrid,
    grid_inner: DistanceGrid,
    scratch: EdtScratch,
}

impl SdfRasterizer {
    pub fn new(params: SdfParameters) -> Result<Self> {
        params.validate()?;
        let size = params.size() as usize;
        Ok(Self {
            params,
            canvas: Some(Canvas::new(params.size(), params.size())),
            grid_outer: DistanceGrid::new(size, size, INF),
            grid_inner: DistanceGrid::new(size, size, 0.0),
            scratch: EdtScratch::new(size),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.sdf)
    }

    pub fn params(&self) -> &SdfParameters {
        &self.params
    }

    /// Side of the produced image: `icon_size + 2 * buffer`.
    pub fn size(&self) -> u32 {
        self.params.size()
    }

    /// Paint an icon with `draw` and convert it to a distance field.
    ///
    /// `draw` receives a cleared surface and the buffer offset; the glyph
    /// belongs in the `icon_size` square starting at `(buffer, buffer)`.
    /// Anything painted outside that square is ignored. A failing `draw`
    /// yields [`MapcoreError::RenderFailed`] and no partial result.
    ///
    /// ```rust
    /// use mapcore::{SdfParameters, SdfRasterizer};
    ///
    /// let mut rasterizer = SdfRasterizer::new(SdfParameters::default())?;
    /// let sdf = rasterizer.rasterize(|canvas, buffer| {
    ///     let b = buffer as f64;
    ///     canvas.fill_rect(b + 4.0, b + 4.0, 8.0, 8.0);
    ///     Ok::<(), std::convert::Infallible>(())
    /// })?;
    /// assert_eq!(sdf.width(), 22);
    /// assert_eq!(sdf.data().len(), 22 * 22 * 4);
    /// # Ok::<(), mapcore::MapcoreError>(())
    /// ```
    pub fn rasterize<F, E>(&mut self, draw: F) -> Result<SdfResult>
    where
        F: FnOnce(&mut Canvas, u32) -> std::result::Result<(), E>,
        E: Display,
    {
        let mut canvas = self.take_canvas();
        let outcome = draw(&mut canvas, self.params.buffer);
        let result = match outcome {
            Ok(()) => self.encode(&canvas),
            Err(e) => Err(render_failed(e)),
        };
        self.canvas = Some(canvas);
        result
    }

    /// Like [`rasterize`](Self::rasterize) for icon sources that decode
    /// asynchronously.
    ///
    /// The surface is moved into the future and must be handed back when
    /// drawing completes, so nothing else can touch it in between.
    pub async fn rasterize_async<F, Fut, E>(&mut self, draw: F) -> Result<SdfResult>
    where
        F: FnOnce(Canvas, u32) -> Fut,
        Fut: Future<Output = std::result::Result<Canvas, E>>,
        E: Display,
    {
        let canvas = self.take_canvas();
        let canvas = draw(canvas, self.params.buffer)
            .await
            .map_err(render_failed)?;
        let result = self.encode(&canvas);
        self.canvas = Some(canvas);
        result
    }

    fn take_canvas(&mut self) -> Canvas {
        let size = self.size();
        let mut canvas = self
            .canvas
            .take()
            .unwrap_or_else(|| Canvas::new(size, size));
        canvas.clear();
        canvas
    }

    fn encode(&mut self, canvas: &Canvas) -> Result<SdfResult> {
        let size = self.size();
        if canvas.width() != size || canvas.height() != size {
            let err = MapcoreError::RenderFailed(format!(
                "draw callback returned a {}x{} surface, expected {}x{}",
                canvas.width(),
                canvas.height(),
                size,
                size
            ));
            log::warn!("{}", err);
            return Err(err);
        }

        let SdfParameters {
            icon_size,
            buffer,
            radius,
            cutoff,
        } = self.params;
        let coverage = canvas.coverage(buffer, buffer, icon_size, icon_size);

        self.grid_outer.fill(INF);
        self.grid_inner.fill(0.0);

        for y in 0..icon_size {
            for x in 0..icon_size {
                let a = coverage.get(x, y);
                if a == 0.0 {
                    continue;
                }

                let (gx, gy) = ((x + buffer) as usize, (y + buffer) as usize);
                if a == 1.0 {
                    self.grid_outer.set(gx, gy, 0.0);
                    self.grid_inner.set(gx, gy, INF);
                } else {
                    // Anti-aliased edge: seed the sub-pixel offset of the edge
                    let d = 0.5 - a;
                    self.grid_outer.set(gx, gy, if d > 0.0 { d * d } else { 0.0 });
                    self.grid_inner.set(gx, gy, if d < 0.0 { d * d } else { 0.0 });
                }
            }
        }

        self.grid_outer.transform(&mut self.scratch);
        self.grid_inner.transform_region(
            buffer as usize,
            buffer as usize,
            icon_size as usize,
            icon_size as usize,
            &mut self.scratch,
        );

        let mut data = Vec::with_capacity(size as usize * size as usize * 4);
        for (outer, inner) in self
            .grid_outer
            .as_slice()
            .iter()
            .zip(self.grid_inner.as_slice())
        {
            let d = outer.sqrt() - inner.sqrt();
            data.extend_from_slice(&[0, 0, 0, encode_distance(d, radius, cutoff)]);
        }

        log::debug!(
            "Rasterized {}x{} distance field ({} covered pixels)",
            size,
            size,
            coverage.covered_pixels()
        );

        Ok(SdfResult {
            data: Bytes::from(data),
            width: size,
            height: size,
        })
    }
}

fn render_failed<E: Display>(err: E) -> MapcoreError {
    log::warn!("Icon draw callback failed: {}", err);
    MapcoreError::RenderFailed(err.to_string())
}

/// Rasterize a single icon with a throwaway rasterizer.
pub fn rasterize<F, E>(params: SdfParameters, draw: F) -> Result<SdfResult>
where
    F: FnOnce(&mut Canvas, u32) -> std::result::Result<(), E>,
    E: Display,
{
    SdfRasterizer::new(params)?.rasterize(draw)
}
