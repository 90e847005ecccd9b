//! Perceptual color difference metrics
//!
//! - CIE76: Euclidean distance in Lab
//! - CIEDE2000: CIE Technical Report 142-2001, with lightness, chroma and hue
//!   weighting plus the blue-region rotation term

use crate::color::LabColor;
use crate::constants::cie::TWENTY_FIVE_POW_7;
use serde::{Deserialize, Serialize};

/// Which color difference formula to use for distance comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Euclidean distance (ΔE*ab, 1976)
    #[default]
    Cie76,
    /// CIEDE2000 (ΔE00)
    Ciede2000,
}

impl DistanceMetric {
    /// Distance between two colors under this metric
    pub fn distance(self, lab1: LabColor, lab2: LabColor) -> f64 {
        match self {
            DistanceMetric::Cie76 => delta_e(lab1, lab2),
            DistanceMetric::Ciede2000 => delta_e_2000(lab1, lab2),
        }
    }
}

/// CIE76 color difference
pub fn delta_e(lab1: LabColor, lab2: LabColor) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// CIEDE2000 color difference with kL = kC = kH = 1
pub fn delta_e_2000(lab1: LabColor, lab2: LabColor) -> f64 {
    const KL: f64 = 1.0;
    const KC: f64 = 1.0;
    const KH: f64 = 1.0;

    let c1 = lab1.a.hypot(lab1.b);
    let c2 = lab2.a.hypot(lab2.b);
    let c_mean_pow7 = ((c1 + c2) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (c_mean_pow7 / (c_mean_pow7 + TWENTY_FIVE_POW_7)).sqrt());

    let a1p = lab1.a * (1.0 + g);
    let a2p = lab2.a * (1.0 + g);
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = hue_angle(a1p, lab1.b);
    let h2p = hue_angle(a2p, lab2.b);

    let delta_lp = lab2.l - lab1.l;
    let delta_cp = c2p - c1p;

    let chroma_product = c1p * c2p;
    let delta_hp = if chroma_product == 0.0 {
        0.0
    } else {
        let diff = h2p - h1p;
        if diff.abs() <= 180.0 {
            diff
        } else if diff > 180.0 {
            diff - 360.0
        } else {
            diff + 360.0
        }
    };
    let delta_big_hp = 2.0 * chroma_product.sqrt() * (delta_hp.to_radians() / 2.0).sin();

    let lp_mean = (lab1.l + lab2.l) / 2.0;
    let cp_mean = (c1p + c2p) / 2.0;
    let hp_mean = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (hp_mean - 30.0).to_radians().cos()
        + 0.24 * (2.0 * hp_mean).to_radians().cos()
        + 0.32 * (3.0 * hp_mean + 6.0).to_radians().cos()
        - 0.20 * (4.0 * hp_mean - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-((hp_mean - 275.0) / 25.0).powi(2)).exp();
    let cp_mean_pow7 = cp_mean.powi(7);
    let rc = 2.0 * (cp_mean_pow7 / (cp_mean_pow7 + TWENTY_FIVE_POW_7)).sqrt();
    let rt = -(2.0 * delta_theta).to_radians().sin() * rc;

    let l_offset_sq = (lp_mean - 50.0).powi(2);
    let sl = 1.0 + (0.015 * l_offset_sq) / (20.0 + l_offset_sq).sqrt();
    let sc = 1.0 + 0.045 * cp_mean;
    let sh = 1.0 + 0.015 * cp_mean * t;

    let l_term = delta_lp / (KL * sl);
    let c_term = delta_cp / (KC * sc);
    let h_term = delta_big_hp / (KH * sh);

    (l_term * l_term + c_term * c_term + h_term * h_term + rt * c_term * h_term)
        .max(0.0)
        .sqrt()
}

/// Hue angle in degrees resolved to [0, 360)
fn hue_angle(a: f64, b: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        return 0.0;
    }
    let h = b.atan2(a).to_degrees();
    if h < 0.0 {
        h + 360.0
    } else {
        h
    }
}
