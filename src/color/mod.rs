//! Color conversion and difference module
//!
//! This module handles the sRGB to CIE L*a*b* conversion, the CIE76 and
//! CIEDE2000 perceptual distances, and the color samples fed to the
//! seasonal classifier.

pub mod conversion;
pub mod difference;
pub mod lab;
pub mod sample;

pub use conversion::{hex_to_rgb, rgb8_to_lab, rgb_to_lab, ColorConverter};
pub use difference::{delta_e, delta_e_2000, DistanceMetric};
pub use lab::LabColor;
pub use sample::{ColorSample, HsvColor};
