//! Reference values and thresholds for color analysis
//!
//! This module contains compile-time constants for colorimetry, seasonal
//! classification and frame acceptance. Everything tunable at runtime is
//! mirrored in [`crate::config`], whose defaults are taken from here.

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 represents average daylight with a correlated
/// color temperature of 6504K. This is the standard reference for digital
/// images and computer displays.
pub mod d65 {
    /// D65 white point in CIE XYZ, scaled so that Yn = 100
    /// Source: CIE 15:2004 Colorimetry, 3rd edition
    pub const WHITE_POINT_XYZ: [f64; 3] = [95.047, 100.000, 108.883];

    /// Linear sRGB to XYZ matrix (IEC 61966-2-1, D65, Y in [0, 1])
    pub const RGB_TO_XYZ: [[f64; 3]; 3] = [
        [0.412_456_4, 0.357_576_1, 0.180_437_5],
        [0.212_672_9, 0.715_152_2, 0.072_175_0],
        [0.019_333_9, 0.119_192_0, 0.950_304_1],
    ];
}

/// sRGB transfer function constants (IEC 61966-2-1)
pub mod srgb {
    /// Encoded values at or below this use the linear segment
    pub const LINEAR_THRESHOLD: f64 = 0.04045;

    /// Slope divisor of the linear segment
    pub const LINEAR_SLOPE: f64 = 12.92;

    /// Offset of the power-law segment
    pub const GAMMA_OFFSET: f64 = 0.055;

    /// Exponent of the power-law segment
    pub const GAMMA_EXPONENT: f64 = 2.4;
}

/// CIE L*a*b* nonlinearity constants (exact rational forms)
pub mod cie {
    /// ε = (6/29)^3
    pub const EPSILON: f64 = 216.0 / 24389.0;

    /// κ = (29/3)^3
    pub const KAPPA: f64 = 24389.0 / 27.0;

    /// 25^7, used by the CIEDE2000 chroma compensation terms
    pub const TWENTY_FIVE_POW_7: f64 = 6_103_515_625.0;
}

/// Warm/cool and light/dark boundaries for the seasonal buckets
pub mod classification {
    /// b* at or above this value counts as warm
    pub const WARM_B_THRESHOLD: f64 = 12.0;

    /// L* at or above this value counts as light
    pub const LIGHT_L_THRESHOLD: f64 = 65.0;
}

/// Canonical skin-tone reference points per season (L*, a*, b*)
///
/// Each point sits inside its own bucket of the warm/light grid.
pub mod season_references {
    pub const SPRING: [f64; 3] = [72.0, 12.0, 20.0];
    pub const SUMMER: [f64; 3] = [70.0, 10.0, 8.0];
    pub const AUTUMN: [f64; 3] = [55.0, 15.0, 22.0];
    pub const WINTER: [f64; 3] = [50.0, 10.0, 6.0];
}

/// Frame acceptance thresholds and scoring curve parameters
pub mod quality {
    /// Minimum overall score before a frame may be analyzed
    pub const MIN_QUALITY_SCORE_FOR_ANALYSIS: f64 = 0.60;

    /// Minimum brightness sub-score before a frame may be analyzed
    pub const MIN_BRIGHTNESS_SCORE_FOR_ANALYSIS: f64 = 0.45;

    /// Minimum face size sub-score before a frame may be analyzed
    pub const MIN_FACE_SIZE_SCORE_FOR_ANALYSIS: f64 = 0.50;

    /// Minimum face position sub-score before a frame may be analyzed
    pub const MIN_FACE_POSITION_SCORE_FOR_ANALYSIS: f64 = 0.50;

    /// Overall score below which a single holistic message is shown
    pub const HOLISTIC_FEEDBACK_THRESHOLD: f64 = 0.25;

    /// Brightness sub-score below which the message names the exposure direction
    pub const SEVERE_BRIGHTNESS_THRESHOLD: f64 = 0.30;

    /// Sharpness sub-score below which the user is asked to hold still
    pub const SHARPNESS_FEEDBACK_THRESHOLD: f64 = 0.50;

    /// Face area (fraction of frame) below which the face is too small
    pub const FACE_AREA_MIN_RATIO: f64 = 0.12;

    /// Face area (fraction of frame) above which the face is too close
    pub const FACE_AREA_MAX_RATIO: f64 = 0.45;

    /// Face area at which the size score reaches zero again
    pub const FACE_AREA_CUTOFF_RATIO: f64 = 0.90;

    /// Normalized center offset tolerated without penalty
    pub const POSITION_TOLERANCE: f64 = 0.05;

    /// Normalized center offset at which the position score reaches zero
    pub const POSITION_CUTOFF: f64 = 0.55;

    /// Mean luma (0-1) that scores a perfect brightness
    pub const TARGET_LUMA: f64 = 0.55;

    /// Width of the brightness curve around the target
    pub const LUMA_SIGMA: f64 = 0.18;

    /// Laplacian variance (8-bit luma units) treated as fully in focus
    pub const IN_FOCUS_EDGE_ENERGY: f64 = 120.0;

    /// Fewer landmarks than this are treated as absent geometry
    pub const MIN_LANDMARK_COUNT: usize = 3;

    /// Sub-score weights in the overall combination: size, position, brightness, sharpness
    pub const WEIGHTS: [f64; 4] = [0.30, 0.20, 0.30, 0.20];
}
