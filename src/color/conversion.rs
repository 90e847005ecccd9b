//! Color space conversion utilities
//!
//! Provides the sRGB to CIE L*a*b* conversion used everywhere in the crate:
//! - sRGB inverse companding (piecewise linear / 2.4 power law)
//! - Linear RGB to XYZ under D65
//! - XYZ to Lab with the exact CIE ε/κ constants
//!
//! This is the only place the gamma and chromaticity constants are applied.

use crate::color::{delta_e, delta_e_2000, LabColor};
use crate::constants::{cie, d65, srgb};
use crate::{AnalysisError, Result};

/// Convert normalized sRGB channels to Lab (D65)
///
/// Channels outside [0, 1] are clamped and non-finite values are treated as 0,
/// so this never fails. The resulting `l` is clamped to [0, 100].
///
/// # Arguments
///
/// * `r`, `g`, `b` - sRGB channel values in range [0, 1]
pub fn rgb_to_lab(r: f64, g: f64, b: f64) -> LabColor {
    let linear = [
        srgb_to_linear(sanitize_channel(r)),
        srgb_to_linear(sanitize_channel(g)),
        srgb_to_linear(sanitize_channel(b)),
    ];

    let mut xyz = [0.0f64; 3];
    for (out, row) in xyz.iter_mut().zip(d65::RGB_TO_XYZ.iter()) {
        *out = 100.0 * (row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2]);
    }

    let fx = lab_f(xyz[0] / d65::WHITE_POINT_XYZ[0]);
    let fy = lab_f(xyz[1] / d65::WHITE_POINT_XYZ[1]);
    let fz = lab_f(xyz[2] / d65::WHITE_POINT_XYZ[2]);

    LabColor::new(
        (116.0 * fy - 16.0).clamp(0.0, 100.0),
        500.0 * (fx - fy),
        200.0 * (fy - fz),
    )
}

/// Convert 8-bit sRGB channels to Lab (D65)
pub fn rgb8_to_lab(r: u8, g: u8, b: u8) -> LabColor {
    rgb_to_lab(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
}

/// Parse a hexadecimal color string into normalized sRGB channels
///
/// Accepts "#RRGGBB" or "RRGGBB".
///
/// # Errors
///
/// Returns `AnalysisError::InvalidParameter` if the string is not six hex digits
pub fn hex_to_rgb(hex: &str) -> Result<[f64; 3]> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(AnalysisError::InvalidParameter {
            parameter: "hex".to_string(),
            value: hex.to_string(),
        });
    }

    let mut rgb = [0.0f64; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| {
            AnalysisError::InvalidParameter {
                parameter: "hex".to_string(),
                value: hex.to_string(),
            }
        })?;
        *channel = byte as f64 / 255.0;
    }
    Ok(rgb)
}

fn sanitize_channel(c: f64) -> f64 {
    if c.is_finite() {
        c.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// sRGB inverse companding
fn srgb_to_linear(c: f64) -> f64 {
    if c <= srgb::LINEAR_THRESHOLD {
        c / srgb::LINEAR_SLOPE
    } else {
        ((c + srgb::GAMMA_OFFSET) / (1.0 + srgb::GAMMA_OFFSET)).powf(srgb::GAMMA_EXPONENT)
    }
}

/// CIE Lab transfer function
fn lab_f(t: f64) -> f64 {
    if t > cie::EPSILON {
        t.cbrt()
    } else {
        (cie::KAPPA * t + 16.0) / 116.0
    }
}

/// Color converter façade bundling conversion and difference metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    /// Create a new color converter (D65 reference white)
    pub fn new() -> Self {
        Self
    }

    /// Convert normalized RGB to Lab; see [`rgb_to_lab`]
    pub fn rgb_to_lab(&self, r: f64, g: f64, b: f64) -> LabColor {
        rgb_to_lab(r, g, b)
    }

    /// Convert 8-bit RGB to Lab; see [`rgb8_to_lab`]
    pub fn rgb8_to_lab(&self, r: u8, g: u8, b: u8) -> LabColor {
        rgb8_to_lab(r, g, b)
    }

    /// Parse a hex string and convert it to Lab
    pub fn hex_to_lab(&self, hex: &str) -> Result<LabColor> {
        let [r, g, b] = hex_to_rgb(hex)?;
        Ok(rgb_to_lab(r, g, b))
    }

    /// CIE76 color difference; see [`delta_e`]
    pub fn delta_e(&self, lab1: LabColor, lab2: LabColor) -> f64 {
        delta_e(lab1, lab2)
    }

    /// CIEDE2000 color difference; see [`delta_e_2000`]
    pub fn delta_e_2000(&self, lab1: LabColor, lab2: LabColor) -> f64 {
        delta_e_2000(lab1, lab2)
    }
}
