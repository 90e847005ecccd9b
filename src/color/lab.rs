//! CIE L*a*b* value type

use palette::{white_point::D65, FromColor, Lab, Srgb};
use serde::{Deserialize, Serialize};

/// A color in CIE L*a*b* (D65)
///
/// `l` is lightness in [0, 100], `a` the green-red axis, `b` the blue-yellow
/// axis. Values coming out of [`crate::color::rgb_to_lab`] always have `l`
/// clamped to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabColor {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl LabColor {
    /// Create a Lab color from literal coordinates
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Create a Lab color from an `[L, a, b]` triple
    pub const fn from_array(lab: [f64; 3]) -> Self {
        Self::new(lab[0], lab[1], lab[2])
    }

    /// Chroma (distance from the neutral axis)
    pub fn chroma(&self) -> f64 {
        self.a.hypot(self.b)
    }

    /// Hue angle in degrees, in [0, 360)
    pub fn hue_degrees(&self) -> f64 {
        if self.a == 0.0 && self.b == 0.0 {
            return 0.0;
        }
        let hue = self.b.atan2(self.a).to_degrees();
        if hue < 0.0 {
            hue + 360.0
        } else {
            hue
        }
    }

    /// Convert to display sRGB, clamped to the sRGB gamut
    pub fn to_srgb(&self) -> Srgb<f64> {
        let srgb = Srgb::<f64>::from_color(Lab::<D65, f64>::from(*self));
        Srgb::new(
            srgb.red.clamp(0.0, 1.0),
            srgb.green.clamp(0.0, 1.0),
            srgb.blue.clamp(0.0, 1.0),
        )
    }

    /// Hexadecimal representation of the gamut-clamped sRGB color (e.g. "#FF0000")
    pub fn to_hex(&self) -> String {
        let srgb = self.to_srgb();
        let r = (srgb.red * 255.0).round() as u8;
        let g = (srgb.green * 255.0).round() as u8;
        let b = (srgb.blue * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl From<LabColor> for Lab<D65, f64> {
    fn from(color: LabColor) -> Self {
        Lab::new(color.l, color.a, color.b)
    }
}

impl From<Lab<D65, f64>> for LabColor {
    fn from(lab: Lab<D65, f64>) -> Self {
        LabColor::new(lab.l, lab.a, lab.b)
    }
}
