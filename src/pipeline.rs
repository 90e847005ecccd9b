//! Quality-gated season analysis
//!
//! Combines the frame scorer and the season classifier: a frame is only
//! classified once its quality score is acceptable.

use image::RgbImage;
use tracing::debug;

use crate::color::ColorSample;
use crate::config::EngineConfig;
use crate::quality::{FaceObservation, FrameQualityScorer, FrameStatistics, QualityScore};
use crate::season::{ClassificationResult, SeasonClassifier};
use crate::{AnalysisError, Result};

/// Scorer and classifier sharing one configuration
#[derive(Debug, Clone, Default)]
pub struct SeasonAnalyzer {
    classifier: SeasonClassifier,
    scorer: FrameQualityScorer,
}

impl SeasonAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an analyzer from a full engine configuration
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if either section fails validation
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            classifier: SeasonClassifier::with_config(config.classification.clone())?,
            scorer: FrameQualityScorer::with_config(config.quality.clone())?,
        })
    }

    pub fn classifier(&self) -> &SeasonClassifier {
        &self.classifier
    }

    pub fn scorer(&self) -> &FrameQualityScorer {
        &self.scorer
    }

    /// Score a frame from precomputed statistics
    pub fn assess_frame(&self, stats: &FrameStatistics, face: Option<&FaceObservation>) -> QualityScore {
        self.scorer.score(stats, face)
    }

    /// Score an RGB frame
    pub fn assess_image(&self, image: &RgbImage, face: Option<&FaceObservation>) -> QualityScore {
        self.scorer.score_rgb(image, face)
    }

    /// Classify skin (and optional hair) samples if the frame passed
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InsufficientQuality` carrying the score's
    /// feedback when the frame is not acceptable for analysis
    pub fn analyze(
        &self,
        quality: &QualityScore,
        skin: &ColorSample,
        hair: Option<&ColorSample>,
    ) -> Result<ClassificationResult> {
        if !quality.is_acceptable_for_analysis {
            debug!(overall = quality.overall, "frame rejected by quality gate");
            return Err(AnalysisError::InsufficientQuality {
                overall: quality.overall,
                minimum: self.scorer.config().acceptance.min_overall,
                feedback: quality.feedback_message.clone(),
            });
        }
        Ok(self.classifier.classify_sample(skin, hair))
    }
}
