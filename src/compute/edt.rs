//! 2D squared Euclidean distance transform.
//!
//! Felzenszwalb & Huttenlocher, "Distance Transforms of Sampled Functions"
//! (<https://cs.brown.edu/people/pfelzens/papers/dt-final.pdf>). The 2D
//! transform is separable: a 1D lower-envelope pass over every column of the
//! region, then one over every row, for `O(width * height)` overall.

/// Sentinel for "no seed reachable". Far above any squared distance a
/// realistic grid can produce, so an unseeded cell never wins the envelope.
pub const INF: f64 = 1e20;

/// Reusable buffers for the 1D transform, sized to the longest line.
#[derive(Debug, Clone)]
pub struct EdtScratch {
    /// Sampled values along the current line
    f: Vec<f64>,
    /// Parabola vertices of the lower envelope
    v: Vec<usize>,
    /// Boundaries between envelope parabolas
    z: Vec<f64>,
}

impl EdtScratch {
    pub fn new(max_len: usize) -> Self {
        Self {
            f: vec![0.0; max_len],
            v: vec![0; max_len],
            z: vec![0.0; max_len + 1],
        }
    }

    pub fn capacity(&self) -> usize {
        self.f.len()
    }

    fn ensure(&mut self, len: usize) {
        if self.f.len() < len {
            self.f.resize(len, 0.0);
            self.v.resize(len, 0);
            self.z.resize(len + 1, 0.0);
        }
    }
}

/// A `width × height` grid of squared distances, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceGrid {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl DistanceGrid {
    pub fn new(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.data[y * self.width + x] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Transform the whole grid in place.
    pub fn transform(&mut self, scratch: &mut EdtScratch) {
        self.transform_region(0, 0, self.width, self.height, scratch);
    }

    /// Transform the `width × height` region at `(x0, y0)` in place.
    ///
    /// Cells outside the region are read by neither pass and keep their
    /// values. The region must lie inside the grid.
    pub fn transform_region(
        &mut self,
        x0: usize,
        y0: usize,
        width: usize,
        height: usize,
        scratch: &mut EdtScratch,
    ) {
        debug_assert!(x0 + width <= self.width && y0 + height <= self.height);
        scratch.ensure(width.max(height));

        let stride = self.width;
        for x in x0..x0 + width {
            edt_1d(&mut self.data, y0 * stride + x, stride, height, scratch);
        }
        for y in y0..y0 + height {
            edt_1d(&mut self.data, y * stride + x0, 1, width, scratch);
        }
    }
}

/// 1D squared distance transform of `length` samples starting at `offset`,
/// `stride` apart.
fn edt_1d(
    grid: &mut [f64],
    offset: usize,
    stride: usize,
    length: usize,
    scratch: &mut EdtScratch,
) {
    if length == 0 {
        return;
    }

    let EdtScratch { f, v, z } = scratch;

    v[0] = 0;
    z[0] = -INF;
    z[1] = INF;
    f[0] = grid[offset];

    let mut k = 0usize;
    for q in 1..length {
        f[q] = grid[offset + q * stride];
        let q2 = (q * q) as f64;

        // Pop parabolas hidden by the new one at q
        let mut s;
        loop {
            let r = v[k];
            s = (f[q] - f[r] + q2 - (r * r) as f64) / (q - r) as f64 / 2.0;
            if s > z[k] || k == 0 {
                break;
            }
            k -= 1;
        }

        k = if s > z[k] { k + 1 } else { 0 };
        v[k] = q;
        z[k] = s;
        z[k + 1] = INF;
    }

    let mut k = 0usize;
    for q in 0..length {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let r = v[k];
        let qr = q as f64 - r as f64;
        grid[offset + q * stride] = f[r] + qr * qr;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(seeds: &[(usize, usize)], width: usize, height: usize) -> Vec<f64> {
        let mut out = vec![INF; width * height];
        for y in 0..height {
            for x in 0..width {
                for &(sx, sy) in seeds {
                    let dx = x as f64 - sx as f64;
                    let dy = y as f64 - sy as f64;
                    let d = dx * dx + dy * dy;
                    if d < out[y * width + x] {
                        out[y * width + x] = d;
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_single_seed_line() {
        let mut grid = DistanceGrid::new(7, 1, INF);
        grid.set(3, 0, 0.0);
        let mut scratch = EdtScratch::new(7);
        grid.transform(&mut scratch);
        assert_eq!(grid.as_slice(), &[9.0, 4.0, 1.0, 0.0, 1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_matches_brute_force() {
        let (width, height) = (13, 9);
        let seeds = [(1, 1), (11, 2), (6, 7), (0, 8)];
        let mut grid = DistanceGrid::new(width, height, INF);
        for &(x, y) in &seeds {
            grid.set(x, y, 0.0);
        }
        let mut scratch = EdtScratch::new(1);
        grid.transform(&mut scratch);

        let expected = brute_force(&seeds, width, height);
        for (got, want) in grid.as_slice().iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-9, "got {} want {}", got, want);
        }
    }

    #[test]
    fn test_fractional_seed_values() {
        // A seed carrying a sub-pixel offset adds to every distance
        let mut grid = DistanceGrid::new(5, 1, INF);
        grid.set(2, 0, 0.25);
        let mut scratch = EdtScratch::new(5);
        grid.transform(&mut scratch);
        assert_eq!(grid.as_slice(), &[4.25, 1.25, 0.25, 1.25, 4.25]);
    }

    #[test]
    fn test_region_leaves_outside_untouched() {
        let mut grid = DistanceGrid::new(6, 6, 0.0);
        for y in 1..5 {
            for x in 1..5 {
                grid.set(x, y, INF);
            }
        }
        grid.set(2, 2, 0.0);
        let mut scratch = EdtScratch::new(6);
        grid.transform_region(1, 1, 4, 4, &mut scratch);

        assert_eq!(grid.get(0, 0), 0.0);
        assert_eq!(grid.get(5, 5), 0.0);
        assert_eq!(grid.get(2, 2), 0.0);
        assert_eq!(grid.get(4, 4), 8.0);
        assert_eq!(grid.get(1, 4), 5.0);
    }

    #[test]
    fn test_unseeded_grid_stays_large() {
        let mut grid = DistanceGrid::new(4, 4, INF);
        let mut scratch = EdtScratch::new(4);
        grid.transform(&mut scratch);
        assert!(grid.as_slice().iter().all(|&d| d >= INF));
    }

    #[test]
    fn test_scratch_grows_on_demand() {
        let mut scratch = EdtScratch::new(2);
        let mut grid = DistanceGrid::new(10, 3, INF);
        grid.set(9, 2, 0.0);
        grid.transform(&mut scratch);
        assert!(scratch.capacity() >= 10);
        assert_eq!(grid.get(0, 0), 81.0 + 4.0);
    }
}
