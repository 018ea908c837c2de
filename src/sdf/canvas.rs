//! Drawing surface handed to icon sources, and the coverage read back from it.
//!
//! The canvas is a straight-alpha RGBA8 buffer. Shapes are painted in black
//! with source-over compositing, so only the alpha channel carries
//! information; it is interpreted as per-pixel coverage.

/// Exclusively owned RGBA8 drawing surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Raw RGBA bytes for sources that render straight into the buffer.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * 4)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.pixels[i..i + 4]);
        Some(px)
    }

    /// Overwrite a pixel. Writes outside the surface are clipped.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&rgba);
        }
    }

    pub fn alpha(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).map(|i| self.pixels[i + 3])
    }

    /// Overwrite only the alpha channel of a pixel.
    pub fn set_alpha(&mut self, x: u32, y: u32, alpha: u8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i + 3] = alpha;
        }
    }

    /// Composite `coverage` (0..=1) of black over the pixel.
    pub fn blend_coverage(&mut self, x: u32, y: u32, coverage: f64) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let src = coverage.clamp(0.0, 1.0);
        if src == 0.0 {
            return;
        }
        let dst = self.pixels[i + 3] as f64 / 255.0;
        let out = src + dst * (1.0 - src);
        self.pixels[i] = 0;
        self.pixels[i + 1] = 0;
        self.pixels[i + 2] = 0;
        self.pixels[i + 3] = (out * 255.0).round() as u8;
    }

    /// Fill an axis-aligned rectangle, anti-aliasing fractional edges by
    /// exact area coverage.
    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if width.is_nan() || height.is_nan() || width <= 0.0 || height <= 0.0 {
            return;
        }
        let (x1, y1) = (x + width, y + height);

        let px0 = x.floor().max(0.0) as u32;
        let py0 = y.floor().max(0.0) as u32;
        let px1 = (x1.ceil().max(0.0) as u32).min(self.width);
        let py1 = (y1.ceil().max(0.0) as u32).min(self.height);

        for py in py0..py1 {
            let cover_y = overlap(py as f64, y, y1);
            for px in px0..px1 {
                let cover_x = overlap(px as f64, x, x1);
                self.blend_coverage(px, py, cover_x * cover_y);
            }
        }
    }

    /// Fill a circle, anti-aliased with 4×4 supersampling per pixel.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        const SAMPLES: u32 = 4;

        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let r2 = radius * radius;
        let px0 = (cx - radius).floor().max(0.0) as u32;
        let py0 = (cy - radius).floor().max(0.0) as u32;
        let px1 = ((cx + radius).ceil().max(0.0) as u32).min(self.width);
        let py1 = ((cy + radius).ceil().max(0.0) as u32).min(self.height);

        let step = 1.0 / SAMPLES as f64;
        for py in py0..py1 {
            for px in px0..px1 {
                let mut inside = 0u32;
                for sy in 0..SAMPLES {
                    for sx in 0..SAMPLES {
                        let dx = px as f64 + (sx as f64 + 0.5) * step - cx;
                        let dy = py as f64 + (sy as f64 + 0.5) * step - cy;
                        if dx * dx + dy * dy <= r2 {
                            inside += 1;
                        }
                    }
                }
                self.blend_coverage(px, py, inside as f64 / (SAMPLES * SAMPLES) as f64);
            }
        }
    }

    /// Composite a pre-rendered 8-bit coverage mask (e.g. a font rasterizer's
    /// glyph bitmap) with its top-left corner at `(x, y)`.
    pub fn blit_alpha(&mut self, x: u32, y: u32, mask_width: u32, mask: &[u8]) {
        if mask_width == 0 {
            return;
        }
        for (row, line) in mask.chunks(mask_width as usize).enumerate() {
            for (col, &a) in line.iter().enumerate() {
                let (px, py) = (x as u64 + col as u64, y as u64 + row as u64);
                if px < self.width as u64 && py < self.height as u64 {
                    self.blend_coverage(px as u32, py as u32, a as f64 / 255.0);
                }
            }
        }
    }

    /// Read back alpha coverage of the `width × height` region at `(x0, y0)`.
    ///
    /// Pixels of the region that fall outside the surface read as empty.
    pub fn coverage(&self, x0: u32, y0: u32, width: u32, height: u32) -> CoverageBitmap {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let a = match (x0.checked_add(x), y0.checked_add(y)) {
                    (Some(px), Some(py)) => self.alpha(px, py).unwrap_or(0),
                    _ => 0,
                };
                data.push(a as f64 / 255.0);
            }
        }
        CoverageBitmap {
            width,
            height,
            data,
        }
    }
}

/// Length of `[cell, cell + 1] ∩ [lo, hi]`.
#[inline]
fn overlap(cell: f64, lo: f64, hi: f64) -> f64 {
    ((cell + 1.0).min(hi) - cell.max(lo)).max(0.0)
}

/// Per-pixel coverage in `[0, 1]`: 0 is outside the shape, 1 fully inside.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageBitmap {
    width: u32,
    height: u32,
    data: Vec<f64>,
}

impl CoverageBitmap {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Number of pixels with any coverage at all.
    pub fn covered_pixels(&self) -> usize {
        self.data.iter().filter(|&&a| a > 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_transparent() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.pixels().len(), 4 * 3 * 4);
        assert!(canvas.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_rect_integer_edges_are_opaque() {
        let mut canvas = Canvas::new(6, 6);
        canvas.fill_rect(1.0, 1.0, 3.0, 2.0);
        assert_eq!(canvas.alpha(1, 1), Some(255));
        assert_eq!(canvas.alpha(3, 2), Some(255));
        assert_eq!(canvas.alpha(4, 1), Some(0));
        assert_eq!(canvas.alpha(1, 3), Some(0));
        assert_eq!(canvas.alpha(0, 0), Some(0));
    }

    #[test]
    fn test_fill_rect_fractional_edge_is_partial() {
        let mut canvas = Canvas::new(4, 1);
        canvas.fill_rect(0.0, 0.0, 1.5, 1.0);
        assert_eq!(canvas.alpha(0, 0), Some(255));
        assert_eq!(canvas.alpha(1, 0), Some(128));
        assert_eq!(canvas.alpha(2, 0), Some(0));
    }

    #[test]
    fn test_fill_rect_clips_to_surface() {
        let mut canvas = Canvas::new(3, 3);
        canvas.fill_rect(-5.0, -5.0, 100.0, 100.0);
        assert!(canvas.pixels().chunks(4).all(|px| px[3] == 255));
    }

    #[test]
    fn test_source_over_accumulates() {
        let mut canvas = Canvas::new(1, 1);
        canvas.set_alpha(0, 0, 51);
        canvas.blend_coverage(0, 0, 0.5);
        // 0.5 + 0.2 * (1 - 0.5) = 0.6
        assert_eq!(canvas.alpha(0, 0), Some(153));
    }

    #[test]
    fn test_fill_circle_center_and_rim() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(5.0, 5.0, 3.0);
        assert_eq!(canvas.alpha(5, 5), Some(255));
        assert_eq!(canvas.alpha(0, 0), Some(0));
        // The edge crosses these pixels between sample points
        for (x, y) in [(7, 5), (7, 3), (2, 5)] {
            let rim = canvas.alpha(x, y).unwrap();
            assert!(rim > 0 && rim < 255, "rim alpha {} at ({}, {})", rim, x, y);
        }
        // A sliver thinner than the sample spacing gets no coverage
        assert_eq!(canvas.alpha(7, 2), Some(0));
    }

    #[test]
    fn test_blit_alpha() {
        let mut canvas = Canvas::new(4, 4);
        canvas.blit_alpha(2, 2, 2, &[255, 128, 0, 64, 255, 255]);
        assert_eq!(canvas.alpha(2, 2), Some(255));
        assert_eq!(canvas.alpha(3, 2), Some(128));
        assert_eq!(canvas.alpha(2, 3), Some(0));
        assert_eq!(canvas.alpha(3, 3), Some(64));
    }

    #[test]
    fn test_coverage_region() {
        let mut canvas = Canvas::new(5, 5);
        canvas.put_pixel(2, 2, [0, 0, 0, 255]);
        canvas.set_alpha(3, 2, 51);
        let coverage = canvas.coverage(1, 1, 3, 3);
        assert_eq!(coverage.width(), 3);
        assert_eq!(coverage.get(1, 1), 1.0);
        assert!((coverage.get(2, 1) - 0.2).abs() < 1e-12);
        assert_eq!(coverage.get(0, 0), 0.0);
        assert_eq!(coverage.covered_pixels(), 2);
    }

    #[test]
    fn test_clear() {
        let mut canvas = Canvas::new(2, 2);
        canvas.fill_rect(0.0, 0.0, 2.0, 2.0);
        canvas.clear();
        assert!(canvas.pixels().iter().all(|&b| b == 0));
    }
}
