//! Box-average filter.
//!
//! Every output pixel is the per-channel arithmetic mean of a square window
//! of half-width `radius` centred on it. The window is clamped to the
//! region's own edges (not the parent image's), so pixels near the region
//! border average over fewer samples.
//!
//! For an `H x W` region and output pixel `(y, x)`:
//!
//! ```text
//! x1 = max(0, x - r)      x2 = min(W - 1, x + r)
//! y1 = max(0, y - r)      y2 = min(H - 1, y + r)
//! out[y][x][c] = mean(in[y1..=y2][x1..=x2][c])
//! ```
//!
//! Means are rounded to the nearest integer, halves away from zero.
//!
//! Two implementations are provided. [`box_mean_reference`] is the direct
//! `O(H * W * r^2)` definition and serves as ground truth in tests.
//! [`box_mean`] computes the same values in `O(H * W)` from a summed-area
//! table. Window sums are exact integers, so both produce identical bytes.

use super::region::RegionView;
use crate::types::PixelBuffer;

/// Inclusive window bounds along one axis, clamped to `[0, len - 1]`.
#[inline]
fn window(pos: u32, len: u32, radius: u32) -> (u32, u32) {
    let lo = pos.saturating_sub(radius);
    let hi = pos.saturating_add(radius).min(len - 1);
    (lo, hi)
}

/// `round(sum / count)` for non-negative integers, halves rounded up.
#[inline]
fn rounded_mean(sum: u64, count: u64) -> u8 {
    ((2 * sum + count) / (2 * count)).min(255) as u8
}

/// Box blur of `region` using a summed-area table.
///
/// Returns a freshly allocated buffer with the region's shape.
pub fn box_mean(region: &RegionView<'_>, radius: u32) -> PixelBuffer {
    let (width, height, channels) = (region.width(), region.height(), region.channels());

    // radius 0 is the identity
    if radius == 0 || width == 0 || height == 0 {
        return region.to_buffer();
    }

    let mut output = PixelBuffer::zeroed(width, height, channels);
    let table = SummedAreaTable::new(region);
    for y in 0..height {
        let (y1, y2) = window(y, height, radius);
        for x in 0..width {
            let (x1, x2) = window(x, width, radius);
            let count = u64::from(x2 - x1 + 1) * u64::from(y2 - y1 + 1);
            let out = output.pixel_mut(x, y);
            for (c, sample) in out.iter_mut().enumerate() {
                *sample = rounded_mean(table.window_sum(x1, y1, x2, y2, c), count);
            }
        }
    }

    output
}

/// Box blur of `region` by direct summation over every window.
///
/// This is the literal definition of the filter: slow for large radii, kept
/// as the reference the fast path is checked against.
pub fn box_mean_reference(region: &RegionView<'_>, radius: u32) -> PixelBuffer {
    let (width, height, channels) = (region.width(), region.height(), region.channels());
    let mut output = PixelBuffer::zeroed(width, height, channels);
    let mut sums = vec![0f64; channels];

    for y in 0..height {
        for x in 0..width {
            let (x1, x2) = window(x, width, radius);
            let (y1, y2) = window(y, height, radius);

            sums.iter_mut().for_each(|s| *s = 0.0);
            for wy in y1..=y2 {
                for wx in x1..=x2 {
                    for (c, sum) in sums.iter_mut().enumerate() {
                        *sum += f64::from(region.sample(wx, wy, c));
                    }
                }
            }

            let count = f64::from((x2 - x1 + 1) * (y2 - y1 + 1));
            for (sample, sum) in output.pixel_mut(x, y).iter_mut().zip(&sums) {
                *sample = (sum / count).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    output
}

/// Per-channel integral image with a zero top row and left column.
///
/// `at(x, y, c)` is the sum of all samples strictly above and left of
/// `(x, y)`, so any window sum takes four lookups.
struct SummedAreaTable {
    stride: usize,
    channels: usize,
    sums: Vec<u64>,
}

impl SummedAreaTable {
    fn new(region: &RegionView<'_>) -> Self {
        let (width, height, channels) = (
            region.width() as usize,
            region.height() as usize,
            region.channels(),
        );
        let stride = (width + 1) * channels;
        let mut sums = vec![0u64; stride * (height + 1)];
        let mut row_sum = vec![0u64; channels];

        for y in 0..height {
            row_sum.iter_mut().for_each(|s| *s = 0);
            let row = region.row(y as u32);
            let above = y * stride;
            let here = (y + 1) * stride;
            for x in 0..width {
                for c in 0..channels {
                    row_sum[c] += u64::from(row[x * channels + c]);
                    let idx = (x + 1) * channels + c;
                    sums[here + idx] = sums[above + idx] + row_sum[c];
                }
            }
        }

        Self {
            stride,
            channels,
            sums,
        }
    }

    #[inline]
    fn at(&self, x: u32, y: u32, c: usize) -> u64 {
        self.sums[y as usize * self.stride + x as usize * self.channels + c]
    }

    /// Sum of channel `c` over the inclusive window `[x1, x2] x [y1, y2]`.
    #[inline]
    fn window_sum(&self, x1: u32, y1: u32, x2: u32, y2: u32, c: usize) -> u64 {
        self.at(x2 + 1, y2 + 1, c) + self.at(x1, y1, c)
            - self.at(x1, y2 + 1, c)
            - self.at(x2 + 1, y1, c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blur::region::select_region;
    use crate::types::Rect;

    fn gray(width: u32, height: u32, data: Vec<u8>) -> PixelBuffer {
        PixelBuffer::from_raw(width, height, 1, data).unwrap()
    }

    /// The 4x4 single-channel scenario with one bright pixel at (1, 1).
    fn single_spike() -> PixelBuffer {
        #[rustfmt::skip]
        let data = vec![
            0, 0,   0, 0,
            0, 255, 0, 0,
            0, 0,   0, 0,
            0, 0,   0, 0,
        ];
        gray(4, 4, data)
    }

    #[test]
    fn test_window_clamps_to_region() {
        assert_eq!(window(0, 4, 1), (0, 1));
        assert_eq!(window(3, 4, 1), (2, 3));
        assert_eq!(window(2, 10, 0), (2, 2));
        assert_eq!(window(5, 10, 100), (0, 9));
        assert_eq!(window(0, 1, u32::MAX), (0, 0));
    }

    #[test]
    fn test_rounded_mean() {
        assert_eq!(rounded_mean(255, 9), 28); // 28.33
        assert_eq!(rounded_mean(255, 4), 64); // 63.75
        assert_eq!(rounded_mean(3, 2), 2); // 1.5 rounds up
        assert_eq!(rounded_mean(0, 7), 0);
        assert_eq!(rounded_mean(255 * 25, 25), 255);
    }

    #[test]
    fn test_spike_interior_pixel() {
        let buf = single_spike();
        let region = select_region(&buf, None).unwrap();
        let out = box_mean(&region, 1);

        // mean of the 3x3 block around (1, 1) = 255 / 9 = 28.33
        assert_eq!(out.pixel(1, 1), &[28]);
    }

    #[test]
    fn test_spike_corner_pixel() {
        let buf = single_spike();
        let region = select_region(&buf, None).unwrap();
        let out = box_mean(&region, 1);

        // corner window is 2x2: 255 / 4 = 63.75
        assert_eq!(out.pixel(0, 0), &[64]);
        // far corner never sees the spike
        assert_eq!(out.pixel(3, 3), &[0]);
    }

    #[test]
    fn test_spike_matches_reference() {
        let buf = single_spike();
        let region = select_region(&buf, None).unwrap();
        assert_eq!(box_mean(&region, 1), box_mean_reference(&region, 1));
    }

    #[test]
    fn test_radius_zero_is_identity() {
        let buf = single_spike();
        let region = select_region(&buf, None).unwrap();
        assert_eq!(box_mean(&region, 0), buf);
        assert_eq!(box_mean_reference(&region, 0), buf);
    }

    #[test]
    fn test_large_radius_is_uniform_mean() {
        let buf = gray(3, 2, vec![0, 30, 60, 90, 120, 150]);
        let region = select_region(&buf, None).unwrap();
        let out = box_mean(&region, 3);
        // (0 + 30 + 60 + 90 + 120 + 150) / 6 = 75
        assert!(out.data().iter().all(|&v| v == 75));
    }

    #[test]
    fn test_channels_averaged_independently() {
        let data = vec![
            255, 0, 10, //
            0, 255, 20,
        ];
        let buf = PixelBuffer::from_raw(2, 1, 3, data).unwrap();
        let region = select_region(&buf, None).unwrap();
        let out = box_mean(&region, 1);

        // 127.5 rounds up
        assert_eq!(out.pixel(0, 0), &[128, 128, 15]);
        assert_eq!(out.pixel(1, 0), &[128, 128, 15]);
    }

    #[test]
    fn test_clamping_uses_region_edges_not_parent() {
        // 6x6 parent, bright everywhere except a dark 2x2 block in the middle
        let mut data = vec![200u8; 36];
        for (x, y) in [(2, 2), (3, 2), (2, 3), (3, 3)] {
            data[y * 6 + x] = 0;
        }
        let buf = gray(6, 6, data);
        let region = select_region(&buf, Some(Rect::new(2, 2, 4, 4))).unwrap();
        let out = box_mean(&region, 1);

        // The bright parent pixels around the selection are never sampled
        assert!(out.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_output_shape_matches_region() {
        let buf = PixelBuffer::zeroed(7, 5, 3);
        let region = select_region(&buf, Some(Rect::new(1, 2, 6, 5))).unwrap();
        let out = box_mean(&region, 2);
        assert_eq!(out.width(), 5);
        assert_eq!(out.height(), 3);
        assert_eq!(out.channels(), 3);
    }

    #[test]
    fn test_empty_region() {
        for (w, h) in [(0, 0), (5, 0), (0, 5)] {
            let buf = PixelBuffer::zeroed(w, h, 3);
            let region = select_region(&buf, None).unwrap();
            let fast = box_mean(&region, 4);
            assert_eq!((fast.width(), fast.height()), (w, h));
            assert!(fast.data().is_empty());
            assert!(box_mean_reference(&region, 4).data().is_empty());
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
