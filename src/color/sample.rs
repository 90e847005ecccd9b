//! Averaged skin and hair color samples supplied by the segmentation stage

use palette::{encoding, FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

use crate::color::{rgb_to_lab, LabColor};

/// HSV triple: hue in degrees [0, 360), saturation and value in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HsvColor {
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
}

/// An averaged color taken from a segmentation mask
///
/// Owned by the caller; the engine only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    /// Normalized sRGB channels in [0, 1]
    pub rgb: [f64; 3],
    /// HSV view of the same color
    pub hsv: HsvColor,
}

impl ColorSample {
    /// Build a sample from normalized sRGB, deriving HSV
    ///
    /// Channels are clamped to [0, 1]; non-finite channels become 0.
    pub fn from_rgb(r: f64, g: f64, b: f64) -> Self {
        let rgb = [clamp_unit(r), clamp_unit(g), clamp_unit(b)];
        let hsv = Hsv::<encoding::Srgb, f64>::from_color(Srgb::new(rgb[0], rgb[1], rgb[2]));
        Self {
            rgb,
            hsv: HsvColor {
                hue: hsv.hue.into_positive_degrees(),
                saturation: hsv.saturation,
                value: hsv.value,
            },
        }
    }

    /// Build a sample from 8-bit sRGB, deriving HSV
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Build a sample with HSV precomputed by the caller
    pub fn with_hsv(rgb: [f64; 3], hsv: HsvColor) -> Self {
        Self {
            rgb: [clamp_unit(rgb[0]), clamp_unit(rgb[1]), clamp_unit(rgb[2])],
            hsv,
        }
    }

    /// Lab coordinates of the sample
    pub fn lab(&self) -> LabColor {
        rgb_to_lab(self.rgb[0], self.rgb[1], self.rgb[2])
    }
}

fn clamp_unit(c: f64) -> f64 {
    if c.is_finite() {
        c.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
