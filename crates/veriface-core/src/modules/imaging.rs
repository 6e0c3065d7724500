//! Image statistics shared by the evidence extractors and the content fallback.
//!
//! All measurements operate on 8-bit planes and use the scales of the usual
//! 8-bit color conversions (luma 0-255, HSV saturation 0-255, Lab `a` around 128).

use image::{GrayImage, Luma, RgbImage};
use imageproc::gradients::{horizontal_sobel, vertical_sobel};
use rustfft::{num_complex::Complex, FftPlanner};

/// Smallest plane the 3x3 operators accept.
pub const MIN_DIMENSION: u32 = 3;

/// 256-bin histogram of luminance values.
#[derive(Debug, Clone)]
pub struct Histogram {
    bins: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Compute histogram from grayscale image.
    #[must_use]
    pub fn from_luma(image: &GrayImage) -> Self {
        let mut bins = [0u64; 256];
        for pixel in image.pixels() {
            bins[usize::from(pixel.0[0])] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Returns the total pixel count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Mean luminance.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let sum: u64 = self
            .bins
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u64) * count)
            .sum();
        sum as f64 / self.total as f64
    }

    /// Population variance of luminance.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let mean = self.mean();
        self.bins
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let diff = (i as f64) - mean;
                diff * diff * (count as f64)
            })
            .sum::<f64>()
            / (self.total as f64)
    }

    /// Population standard deviation of luminance.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

/// Grayscale plane using BT.601 weights.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn luma_plane(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let y = 0.114f64.mul_add(
            f64::from(b),
            0.299f64.mul_add(f64::from(r), 0.587 * f64::from(g)),
        );
        Luma([y.round().clamp(0.0, 255.0) as u8])
    })
}

/// Mirror an out-of-range coordinate without repeating the edge pixel.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
const fn reflect101(i: i64, len: u32) -> u32 {
    let n = len as i64;
    let mut i = i;
    if i < 0 {
        i = -i;
    }
    if i >= n {
        i = 2 * n - 2 - i;
    }
    i as u32
}

/// Variance of the 3x3 Laplacian response with reflect-101 borders.
///
/// Returns `None` for planes smaller than 3x3.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn laplacian_variance(gray: &GrayImage) -> Option<f64> {
    let (w, h) = gray.dimensions();
    if w < MIN_DIMENSION || h < MIN_DIMENSION {
        return None;
    }
    let at = |x: i64, y: i64| f64::from(gray.get_pixel(reflect101(x, w), reflect101(y, h)).0[0]);

    let mut responses = Vec::with_capacity(w as usize * h as usize);
    for y in 0..i64::from(h) {
        for x in 0..i64::from(w) {
            let response =
                at(x, y - 1) + at(x - 1, y) + at(x + 1, y) + at(x, y + 1) - 4.0 * at(x, y);
            responses.push(response);
        }
    }
    Some(mean_variance(&responses).1)
}

/// Mean and population variance of a sample, `(0, 0)` when empty.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_variance(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance)
}

/// HSV saturation per pixel on the 0-255 scale.
#[must_use]
pub fn saturation_values(rgb: &RgbImage) -> Vec<f64> {
    rgb.pixels()
        .map(|p| {
            let max = p.0.iter().copied().max().unwrap_or(0);
            let min = p.0.iter().copied().min().unwrap_or(0);
            if max == 0 {
                0.0
            } else {
                (255.0 * f64::from(max - min) / f64::from(max)).round()
            }
        })
        .collect()
}

/// Population variance of HSV saturation.
#[must_use]
pub fn saturation_variance(rgb: &RgbImage) -> f64 {
    mean_variance(&saturation_values(rgb)).1
}

fn srgb_to_linear(c: u8) -> f64 {
    let c = f64::from(c) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > 0.008_856 {
        t.cbrt()
    } else {
        7.787f64.mul_add(t, 16.0 / 116.0)
    }
}

/// CIELAB `a` channel per pixel (D65 white point).
#[must_use]
pub fn lab_a_values(rgb: &RgbImage) -> Vec<f64> {
    rgb.pixels()
        .map(|p| {
            let [r, g, b] = p.0.map(srgb_to_linear);
            let x = 0.180_423f64.mul_add(b, 0.412_453f64.mul_add(r, 0.357_580 * g)) / 0.950_456;
            let y = 0.072_169f64.mul_add(b, 0.212_671f64.mul_add(r, 0.715_160 * g));
            500.0 * (lab_f(x) - lab_f(y))
        })
        .collect()
}

/// tan(22.5°) and tan(67.5°), the sector bounds for non-maximum suppression.
const TAN_22: f64 = 0.414_213_56;
const TAN_67: f64 = 2.414_213_56;

/// Canny edge map without Gaussian pre-smoothing.
///
/// Gradients come from the 3x3 Sobel pair with replicated borders and the
/// magnitude is `|gx| + |gy|`. Pixels at or below `low` are never edges; the
/// rest survive non-maximum suppression along the quantised gradient direction
/// and are kept when 8-connected to a pixel above `high`. Edge pixels are 255.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn canny_unblurred(gray: &GrayImage, low: f64, high: f64) -> GrayImage {
    let (w, h) = gray.dimensions();
    let gx = horizontal_sobel(gray);
    let gy = vertical_sobel(gray);
    let magnitude: Vec<i32> = gx
        .pixels()
        .zip(gy.pixels())
        .map(|(dx, dy)| i32::from(dx.0[0]).abs() + i32::from(dy.0[0]).abs())
        .collect();

    let (wi, hi) = (i64::from(w), i64::from(h));
    let index = |x: i64, y: i64| (y * wi + x) as usize;
    let mag = |x: i64, y: i64| {
        if x < 0 || y < 0 || x >= wi || y >= hi {
            0
        } else {
            magnitude[index(x, y)]
        }
    };

    let mut candidate = vec![false; magnitude.len()];
    let mut stack = Vec::new();
    for y in 0..hi {
        for x in 0..wi {
            let m = mag(x, y);
            if f64::from(m) <= low {
                continue;
            }
            let dx = i32::from(gx.get_pixel(x as u32, y as u32).0[0]);
            let dy = i32::from(gy.get_pixel(x as u32, y as u32).0[0]);
            let (ax, ay) = (f64::from(dx.abs()), f64::from(dy.abs()));

            let is_max = if ay < ax * TAN_22 {
                m > mag(x - 1, y) && m >= mag(x + 1, y)
            } else if ay > ax * TAN_67 {
                m > mag(x, y - 1) && m >= mag(x, y + 1)
            } else {
                // opposite signs put the ridge on the anti-diagonal
                let s = if (dx ^ dy) < 0 { -1 } else { 1 };
                m > mag(x - s, y - 1) && m > mag(x + s, y + 1)
            };
            if !is_max {
                continue;
            }
            candidate[index(x, y)] = true;
            if f64::from(m) > high {
                stack.push((x, y));
            }
        }
    }

    let mut edges = GrayImage::new(w, h);
    for &(x, y) in &stack {
        edges.put_pixel(x as u32, y as u32, Luma([255]));
    }
    while let Some((x, y)) = stack.pop() {
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                if nx < 0 || ny < 0 || nx >= wi || ny >= hi {
                    continue;
                }
                let pixel = edges.get_pixel_mut(nx as u32, ny as u32);
                if candidate[index(nx, ny)] && pixel.0[0] == 0 {
                    *pixel = Luma([255]);
                    stack.push((nx, ny));
                }
            }
        }
    }
    edges
}

/// Fraction of pixels marked as edges by [`canny_unblurred`] with the given
/// hysteresis thresholds.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn edge_density(gray: &GrayImage, low: f64, high: f64) -> f64 {
    let total = u64::from(gray.width()) * u64::from(gray.height());
    if total == 0 {
        return 0.0;
    }
    let edges = canny_unblurred(gray, low, high);
    let marked = edges.pixels().filter(|p| p.0[0] > 0).count();
    marked as f64 / total as f64
}

/// Share of log-magnitude spectral energy inside the central half window.
///
/// The spectrum is the zero-frequency-centred 2-D DFT of the plane; the window
/// spans rows `h/4..3h/4` and columns `w/4..3w/4`. Returns 0.0 for an empty
/// plane or a spectrum without energy.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn central_energy_ratio(gray: &GrayImage) -> f64 {
    let (w, h) = (gray.width() as usize, gray.height() as usize);
    if w == 0 || h == 0 {
        return 0.0;
    }

    let mut planner = FftPlanner::<f64>::new();
    let mut rows: Vec<Complex<f64>> = gray
        .pixels()
        .map(|p| Complex::new(f64::from(p.0[0]), 0.0))
        .collect();
    planner.plan_fft_forward(w).process(&mut rows);

    let mut cols = vec![Complex::new(0.0, 0.0); w * h];
    for y in 0..h {
        for x in 0..w {
            cols[x * h + y] = rows[y * w + x];
        }
    }
    planner.plan_fft_forward(h).process(&mut cols);

    let (mut central, mut total) = (0.0, 0.0);
    for x in 0..w {
        for y in 0..h {
            let energy = (cols[x * h + y].norm() + 1.0).ln();
            // position after moving the zero frequency to the centre
            let sy = (y + h / 2) % h;
            let sx = (x + w / 2) % w;
            if (h / 4..3 * h / 4).contains(&sy) && (w / 4..3 * w / 4).contains(&sx) {
                central += energy;
            }
            total += energy;
        }
    }

    if total > 0.0 {
        central / total
    } else {
        0.0
    }
}
