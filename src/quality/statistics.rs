//! Pixel statistics feeding the brightness and sharpness scores
//!
//! - Mean luma over the face region (or the full frame)
//! - Edge energy as the variance of a 3x3 Laplacian over the same window

use image::{imageops, GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::quality::geometry::NormalizedRect;

/// Smallest window (pixels per side) on which the Laplacian is defined
const MIN_WINDOW_SIDE: u32 = 3;

/// Brightness and focus measurements for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStatistics {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Mean luma in [0, 1]
    pub mean_luma: f64,
    /// Laplacian variance in 8-bit luma units; higher is sharper
    pub edge_energy: f64,
}

impl FrameStatistics {
    /// Statistics precomputed by the caller
    ///
    /// `mean_luma` is clamped to [0, 1] and `edge_energy` to >= 0; non-finite
    /// values become 0.
    pub fn new(width: u32, height: u32, mean_luma: f64, edge_energy: f64) -> Self {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            width,
            height,
            mean_luma: finite_or_zero(mean_luma).clamp(0.0, 1.0),
            edge_energy: finite_or_zero(edge_energy).max(0.0),
        }
    }

    /// Measure a grayscale frame, restricted to `region` when given
    ///
    /// Regions smaller than 3x3 pixels fall back to the full frame.
    pub fn from_gray(image: &GrayImage, region: Option<&NormalizedRect>) -> Self {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Self::new(width, height, 0.0, 0.0);
        }

        let window = pixel_window(width, height, region);
        Self::new(
            width,
            height,
            mean_luma(image, window),
            laplacian_variance(image, window),
        )
    }

    /// Measure an RGB frame by way of its luma
    pub fn from_rgb(image: &RgbImage, region: Option<&NormalizedRect>) -> Self {
        Self::from_gray(&imageops::grayscale(image), region)
    }
}

type Window = (u32, u32, u32, u32);

fn pixel_window(width: u32, height: u32, region: Option<&NormalizedRect>) -> Window {
    let full = (0, 0, width, height);
    let Some(rect) = region.and_then(NormalizedRect::clamped) else {
        return full;
    };
    let (x0, y0, x1, y1) = rect.to_pixel_bounds(width, height);
    if x1 - x0 < MIN_WINDOW_SIDE || y1 - y0 < MIN_WINDOW_SIDE {
        full
    } else {
        (x0, y0, x1, y1)
    }
}

fn mean_luma(image: &GrayImage, (x0, y0, x1, y1): Window) -> f64 {
    let mut sum = 0u64;
    let mut count = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            sum += image.get_pixel(x, y).0[0] as u64;
            count += 1;
        }
    }
    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64 / 255.0
}

/// Variance of the `[0,1,0; 1,-4,1; 0,1,0]` response over the window interior
fn laplacian_variance(image: &GrayImage, (x0, y0, x1, y1): Window) -> f64 {
    if x1 - x0 < MIN_WINDOW_SIDE || y1 - y0 < MIN_WINDOW_SIDE {
        return 0.0;
    }

    let px = |x: u32, y: u32| image.get_pixel(x, y).0[0] as f64;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut count = 0u64;

    for y in y0 + 1..y1 - 1 {
        for x in x0 + 1..x1 - 1 {
            let laplacian = px(x, y - 1) + px(x, y + 1) + px(x - 1, y) + px(x + 1, y) - 4.0 * px(x, y);
            sum += laplacian;
            sum_sq += laplacian * laplacian;
            count += 1;
        }
    }

    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    (sum_sq / count as f64 - mean * mean).max(0.0)
}
