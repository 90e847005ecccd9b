//! # Scan Seasons
//!
//! A Rust crate for personal-color season analysis from camera frames.
//!
//! This library provides:
//! - sRGB to CIE Lab conversion under D65
//! - CIE76 and CIEDE2000 color differences
//! - Four-season classification of skin color with confidence
//! - Frame quality scoring with acceptance gating and user feedback
//!
//! ## Example
//!
//! ```rust,no_run
//! use scan_seasons::{analyze_season, ColorSample, FaceObservation, NormalizedRect};
//!
//! let frame = image::open("selfie.jpg")?.to_rgb8();
//! let face = FaceObservation::from_bounding_box(NormalizedRect::new(0.3, 0.25, 0.4, 0.5));
//! let skin = ColorSample::from_rgb8(224, 172, 138);
//!
//! let analysis = analyze_season(&frame, Some(&face), &skin, None)?;
//! println!("{} ({:.2})", analysis.classification.season, analysis.classification.confidence);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use image::RgbImage;
use serde::{Deserialize, Serialize};

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod pipeline;
pub mod quality;
pub mod season;

pub use color::{delta_e, delta_e_2000, rgb_to_lab, ColorConverter, ColorSample, DistanceMetric, LabColor};
pub use config::EngineConfig;
pub use error::{AnalysisError, Result};
pub use pipeline::SeasonAnalyzer;
pub use quality::{FaceObservation, FrameQualityScorer, FrameStatistics, NormalizedPoint, NormalizedRect, QualityScore};
pub use season::{ClassificationResult, Season, SeasonClassifier};

/// Complete analysis of one accepted frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonAnalysis {
    /// Quality assessment that admitted the frame
    pub quality: QualityScore,
    /// Season classification of the sampled skin color
    pub classification: ClassificationResult,
}

/// Score a frame and classify the sampled colors with default settings
///
/// This is the main entry point for one-shot analysis. Skin and hair samples
/// are averaged by the caller from the face region of `frame`.
///
/// # Arguments
///
/// * `frame` - Camera frame in sRGB
/// * `face` - Face landmarks and/or bounding box in normalized coordinates
/// * `skin` - Averaged skin color sample
/// * `hair` - Optional averaged hair color sample
///
/// # Errors
///
/// Returns `AnalysisError::InsufficientQuality` if the frame is not
/// acceptable; the error carries the feedback message to show the user.
pub fn analyze_season(
    frame: &RgbImage,
    face: Option<&FaceObservation>,
    skin: &ColorSample,
    hair: Option<&ColorSample>,
) -> Result<SeasonAnalysis> {
    let analyzer = SeasonAnalyzer::new();
    let quality = analyzer.assess_image(frame, face);
    let classification = analyzer.analyze(&quality, skin, hair)?;
    Ok(SeasonAnalysis {
        quality,
        classification,
    })
}
