//! Configuration structures for the scan_seasons engine.
//!
//! This module defines all tunable parameters for classification and frame
//! scoring. Defaults come from [`crate::constants`]; a configuration can be
//! stored as JSON for reproducible experiments.
//!
//! # Configuration Loading
//!
//! ```no_run
//! use scan_seasons::EngineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = EngineConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = EngineConfig::default();
//! # Ok::<(), scan_seasons::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`ClassificationConfig`]: warm/light thresholds, metric and season references
//! - [`QualityConfig`]: sub-score weights, acceptance thresholds and curve shapes

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::DistanceMetric;
use crate::constants::{classification, quality};
use crate::season::SeasonReferences;
use crate::{AnalysisError, Result};

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seasonal classification settings
    #[serde(default)]
    pub classification: ClassificationConfig,

    /// Frame quality scoring settings
    #[serde(default)]
    pub quality: QualityConfig,
}

/// Seasonal classification parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// b* at or above this is warm
    pub warm_b_threshold: f64,

    /// L* at or above this is light
    pub light_l_threshold: f64,

    /// Metric used for reference-distance confirmation
    #[serde(default)]
    pub metric: DistanceMetric,

    /// Reference Lab color per season
    #[serde(default)]
    pub references: SeasonReferences,
}

/// Frame quality parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    /// Weights of the sub-scores in the overall score
    #[serde(default)]
    pub weights: QualityWeights,

    /// Minimums a frame must clear to be analyzed
    #[serde(default)]
    pub acceptance: AcceptanceThresholds,

    /// Shapes of the sub-score curves
    #[serde(default)]
    pub curves: ScoringCurves,

    /// Thresholds selecting the feedback message
    #[serde(default)]
    pub feedback: FeedbackThresholds,
}

/// Sub-score weights. Must be non-negative and sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    pub face_size: f64,
    pub face_position: f64,
    pub brightness: f64,
    pub sharpness: f64,
}

/// Acceptance thresholds, all in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceThresholds {
    pub min_overall: f64,
    pub min_brightness: f64,
    pub min_face_size: f64,
    pub min_face_position: f64,
}

/// Parameters of the sub-score curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringCurves {
    /// Face area ratio where the size score reaches 1
    pub face_area_min_ratio: f64,

    /// Face area ratio after which the size score starts to fall
    pub face_area_max_ratio: f64,

    /// Face area ratio at which the size score is 0
    pub face_area_cutoff_ratio: f64,

    /// Normalized center offset without penalty
    pub position_tolerance: f64,

    /// Normalized center offset at which the position score is 0
    pub position_cutoff: f64,

    /// Mean luma scoring a perfect brightness
    pub target_luma: f64,

    /// Width of the brightness curve
    pub luma_sigma: f64,

    /// Laplacian variance treated as fully in focus
    pub in_focus_edge_energy: f64,

    /// Fewer landmarks than this count as absent geometry
    pub min_landmark_count: usize,
}

/// Thresholds selecting which feedback message is shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackThresholds {
    pub holistic_overall: f64,
    pub severe_brightness: f64,
    pub sharpness: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            warm_b_threshold: classification::WARM_B_THRESHOLD,
            light_l_threshold: classification::LIGHT_L_THRESHOLD,
            metric: DistanceMetric::Cie76,
            references: SeasonReferences::default(),
        }
    }
}

impl Default for QualityWeights {
    fn default() -> Self {
        let [face_size, face_position, brightness, sharpness] = quality::WEIGHTS;
        Self {
            face_size,
            face_position,
            brightness,
            sharpness,
        }
    }
}

impl Default for AcceptanceThresholds {
    fn default() -> Self {
        Self {
            min_overall: quality::MIN_QUALITY_SCORE_FOR_ANALYSIS,
            min_brightness: quality::MIN_BRIGHTNESS_SCORE_FOR_ANALYSIS,
            min_face_size: quality::MIN_FACE_SIZE_SCORE_FOR_ANALYSIS,
            min_face_position: quality::MIN_FACE_POSITION_SCORE_FOR_ANALYSIS,
        }
    }
}

impl Default for ScoringCurves {
    fn default() -> Self {
        Self {
            face_area_min_ratio: quality::FACE_AREA_MIN_RATIO,
            face_area_max_ratio: quality::FACE_AREA_MAX_RATIO,
            face_area_cutoff_ratio: quality::FACE_AREA_CUTOFF_RATIO,
            position_tolerance: quality::POSITION_TOLERANCE,
            position_cutoff: quality::POSITION_CUTOFF,
            target_luma: quality::TARGET_LUMA,
            luma_sigma: quality::LUMA_SIGMA,
            in_focus_edge_energy: quality::IN_FOCUS_EDGE_ENERGY,
            min_landmark_count: quality::MIN_LANDMARK_COUNT,
        }
    }
}

impl Default for FeedbackThresholds {
    fn default() -> Self {
        Self {
            holistic_overall: quality::HOLISTIC_FEEDBACK_THRESHOLD,
            severe_brightness: quality::SEVERE_BRIGHTNESS_THRESHOLD,
            sharpness: quality::SHARPNESS_FEEDBACK_THRESHOLD,
        }
    }
}

impl QualityWeights {
    /// Weights as an array: size, position, brightness, sharpness
    pub fn as_array(&self) -> [f64; 4] {
        [self.face_size, self.face_position, self.brightness, self.sharpness]
    }
}

impl ClassificationConfig {
    /// Check that thresholds and references are finite
    pub fn validate(&self) -> Result<()> {
        if !self.warm_b_threshold.is_finite() || !self.light_l_threshold.is_finite() {
            return Err(AnalysisError::invalid_config(
                "classification thresholds must be finite",
            ));
        }
        if !(0.0..=100.0).contains(&self.light_l_threshold) {
            return Err(AnalysisError::invalid_config(format!(
                "light_l_threshold {} outside [0, 100]",
                self.light_l_threshold
            )));
        }
        self.references.validate()
    }
}

impl QualityConfig {
    /// Check weights, thresholds and curve ordering
    pub fn validate(&self) -> Result<()> {
        let weights = self.weights.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(AnalysisError::invalid_config(
                "quality weights must be finite and non-negative",
            ));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(AnalysisError::invalid_config(format!(
                "quality weights sum to {:.4}, expected 1",
                sum
            )));
        }

        let a = &self.acceptance;
        let f = &self.feedback;
        let unit_values = [
            ("min_overall", a.min_overall),
            ("min_brightness", a.min_brightness),
            ("min_face_size", a.min_face_size),
            ("min_face_position", a.min_face_position),
            ("holistic_overall", f.holistic_overall),
            ("severe_brightness", f.severe_brightness),
            ("sharpness", f.sharpness),
        ];
        for (name, value) in unit_values {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::invalid_config(format!(
                    "{} = {} outside [0, 1]",
                    name, value
                )));
            }
        }

        let c = &self.curves;
        if !(0.0 < c.face_area_min_ratio
            && c.face_area_min_ratio <= c.face_area_max_ratio
            && c.face_area_max_ratio < c.face_area_cutoff_ratio
            && c.face_area_cutoff_ratio <= 1.0)
        {
            return Err(AnalysisError::invalid_config(
                "face area ratios must satisfy 0 < min <= max < cutoff <= 1",
            ));
        }
        if !(0.0 <= c.position_tolerance && c.position_tolerance < c.position_cutoff) {
            return Err(AnalysisError::invalid_config(
                "position tolerance must be below the position cutoff",
            ));
        }
        if !(0.0..=1.0).contains(&c.target_luma) || !(c.luma_sigma > 0.0) {
            return Err(AnalysisError::invalid_config(
                "target_luma must be in [0, 1] and luma_sigma positive",
            ));
        }
        if !(c.in_focus_edge_energy > 0.0) {
            return Err(AnalysisError::invalid_config(
                "in_focus_edge_energy must be positive",
            ));
        }
        if c.min_landmark_count < 3 {
            return Err(AnalysisError::invalid_config(
                "min_landmark_count must be at least 3",
            ));
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.classification.validate()?;
        self.quality.validate()
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AnalysisError::config_parse("invalid configuration JSON", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::config_io(format!("reading {}", path.display()), e))?;
        Self::from_json_str(&content)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config_parse("serializing configuration", e))?;
        std::fs::write(path, json)
            .map_err(|e| AnalysisError::config_io(format!("writing {}", path.display()), e))
    }
}
