//! Frame quality scoring
//!
//! Decides whether a camera frame is good enough for color analysis. Four
//! sub-scores in [0, 1] are combined with fixed weights:
//! - face size: face area relative to the frame, against a target band
//! - face position: distance of the face center from the frame center
//! - brightness: mean luma against a mid-bright target
//! - sharpness: Laplacian edge energy against an in-focus level
//!
//! When a frame is rejected, exactly one feedback message is chosen in a fixed
//! precedence order: holistic, brightness, face size, face position, sharpness.

use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::QualityConfig;
use crate::quality::geometry::{FaceObservation, FaceRegion, NormalizedPoint};
use crate::quality::statistics::FrameStatistics;
use crate::Result;

/// User-facing feedback messages
pub mod feedback {
    pub const NO_FACE: &str = "No face detected. Look straight at the camera.";
    pub const HOLISTIC: &str = "Find even lighting and center your face in the frame.";
    pub const TOO_DARK: &str = "It's too dark. Move to a brighter spot.";
    pub const TOO_BRIGHT: &str = "It's too bright. Avoid direct light on your face.";
    pub const POOR_LIGHTING: &str = "Lighting could be better. Try facing a window.";
    pub const TOO_CLOSE: &str = "Move a little farther from the camera.";
    pub const TOO_FAR: &str = "Move closer to the camera.";
    pub const CENTER_FACE: &str = "Center your face in the frame.";
    pub const HOLD_STILL: &str = "Hold still, the image is blurry.";
    pub const HOLD_STEADY: &str = "Hold steady while the image settles.";
}

/// Quality assessment of one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityScore {
    pub overall: f64,
    pub face_size: f64,
    pub face_position: f64,
    pub brightness: f64,
    pub sharpness: f64,
    pub is_acceptable_for_analysis: bool,
    /// Single prioritized hint, present only when the frame is rejected
    pub feedback_message: Option<String>,
}

impl QualityScore {
    /// All sub-scores zero, not acceptable, no message
    pub fn zero() -> Self {
        Self {
            overall: 0.0,
            face_size: 0.0,
            face_position: 0.0,
            brightness: 0.0,
            sharpness: 0.0,
            is_acceptable_for_analysis: false,
            feedback_message: None,
        }
    }
}

impl Default for QualityScore {
    fn default() -> Self {
        Self::zero()
    }
}

#[derive(Debug, Clone, Copy)]
struct SubScores {
    face_size: f64,
    face_position: f64,
    brightness: f64,
    sharpness: f64,
}

/// Frame quality scorer
#[derive(Debug, Clone, Default)]
pub struct FrameQualityScorer {
    config: QualityConfig,
}

impl FrameQualityScorer {
    /// Create a scorer with the default weights, thresholds and curves
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if weights do not sum to 1,
    /// thresholds leave [0, 1], or curve parameters are out of order
    pub fn with_config(config: QualityConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            warn!(error = %err, "rejected quality configuration");
            return Err(err);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &QualityConfig {
        &self.config
    }

    /// Score a frame from precomputed statistics and face geometry
    ///
    /// Without usable geometry the zero score is returned.
    pub fn score(&self, stats: &FrameStatistics, face: Option<&FaceObservation>) -> QualityScore {
        match self.resolve(face) {
            Some(region) => self.score_region(stats, &region),
            None => Self::no_face(),
        }
    }

    /// Score an RGB frame, measuring brightness and sharpness over the face
    pub fn score_rgb(&self, image: &RgbImage, face: Option<&FaceObservation>) -> QualityScore {
        match self.resolve(face) {
            Some(region) => {
                let stats = FrameStatistics::from_rgb(image, Some(&region.bounds));
                self.score_region(&stats, &region)
            }
            None => Self::no_face(),
        }
    }

    /// Score a grayscale frame, measuring brightness and sharpness over the face
    pub fn score_gray(&self, image: &GrayImage, face: Option<&FaceObservation>) -> QualityScore {
        match self.resolve(face) {
            Some(region) => {
                let stats = FrameStatistics::from_gray(image, Some(&region.bounds));
                self.score_region(&stats, &region)
            }
            None => Self::no_face(),
        }
    }

    /// Weighted combination of the four sub-scores, clamped to [0, 1]
    pub fn overall(&self, face_size: f64, face_position: f64, brightness: f64, sharpness: f64) -> f64 {
        let w = &self.config.weights;
        (w.face_size * face_size
            + w.face_position * face_position
            + w.brightness * brightness
            + w.sharpness * sharpness)
            .clamp(0.0, 1.0)
    }

    /// Face size score from the face area ratio
    ///
    /// Rises linearly to 1 at the lower edge of the target band, stays at 1
    /// within it, then falls linearly to 0 at the cutoff.
    pub fn face_size_score(&self, area_ratio: f64) -> f64 {
        let c = &self.config.curves;
        let score = if area_ratio < c.face_area_min_ratio {
            area_ratio / c.face_area_min_ratio
        } else if area_ratio <= c.face_area_max_ratio {
            1.0
        } else {
            1.0 - (area_ratio - c.face_area_max_ratio) / (c.face_area_cutoff_ratio - c.face_area_max_ratio)
        };
        unit(score)
    }

    /// Face position score from the face center
    ///
    /// The offset from the frame center is normalized by the center-to-corner
    /// distance; offsets within the tolerance score 1.
    pub fn face_position_score(&self, center: NormalizedPoint) -> f64 {
        let c = &self.config.curves;
        let offset = (center.x - 0.5).hypot(center.y - 0.5) / 0.5f64.sqrt();
        let excess = (offset - c.position_tolerance).max(0.0);
        unit(1.0 - excess / (c.position_cutoff - c.position_tolerance))
    }

    /// Brightness score: Gaussian around the target luma
    pub fn brightness_score(&self, mean_luma: f64) -> f64 {
        let c = &self.config.curves;
        let deviation = mean_luma - c.target_luma;
        unit((-(deviation * deviation) / (2.0 * c.luma_sigma * c.luma_sigma)).exp())
    }

    /// Sharpness score: edge energy relative to the in-focus level
    pub fn sharpness_score(&self, edge_energy: f64) -> f64 {
        unit(edge_energy / self.config.curves.in_focus_edge_energy)
    }

    fn resolve(&self, face: Option<&FaceObservation>) -> Option<FaceRegion> {
        face?.region(self.config.curves.min_landmark_count)
    }

    fn no_face() -> QualityScore {
        debug!("no usable face geometry, returning zero score");
        QualityScore {
            feedback_message: Some(feedback::NO_FACE.to_string()),
            ..QualityScore::zero()
        }
    }

    fn score_region(&self, stats: &FrameStatistics, region: &FaceRegion) -> QualityScore {
        let sub = SubScores {
            face_size: self.face_size_score(region.area),
            face_position: self.face_position_score(region.center),
            brightness: self.brightness_score(stats.mean_luma),
            sharpness: self.sharpness_score(stats.edge_energy),
        };
        let overall = self.overall(sub.face_size, sub.face_position, sub.brightness, sub.sharpness);

        let a = &self.config.acceptance;
        let is_acceptable = overall >= a.min_overall
            && sub.brightness >= a.min_brightness
            && sub.face_size >= a.min_face_size
            && sub.face_position >= a.min_face_position;

        let feedback_message = if is_acceptable {
            None
        } else {
            Some(self.feedback(&sub, overall, region.area, stats.mean_luma).to_string())
        };

        debug!(
            overall,
            face_size = sub.face_size,
            face_position = sub.face_position,
            brightness = sub.brightness,
            sharpness = sub.sharpness,
            acceptable = is_acceptable,
            source = ?region.source,
            "scored frame"
        );

        QualityScore {
            overall,
            face_size: sub.face_size,
            face_position: sub.face_position,
            brightness: sub.brightness,
            sharpness: sub.sharpness,
            is_acceptable_for_analysis: is_acceptable,
            feedback_message,
        }
    }

    /// First failing check wins; the order is part of the contract
    fn feedback(&self, sub: &SubScores, overall: f64, face_area: f64, mean_luma: f64) -> &'static str {
        let a = &self.config.acceptance;
        let f = &self.config.feedback;
        let c = &self.config.curves;

        if overall < f.holistic_overall {
            return feedback::HOLISTIC;
        }
        if sub.brightness < a.min_brightness {
            return if sub.brightness >= f.severe_brightness {
                feedback::POOR_LIGHTING
            } else if mean_luma < c.target_luma {
                feedback::TOO_DARK
            } else {
                feedback::TOO_BRIGHT
            };
        }
        if sub.face_size < a.min_face_size {
            return if face_area > c.face_area_max_ratio {
                feedback::TOO_CLOSE
            } else if sub.face_position < a.min_face_position {
                feedback::CENTER_FACE
            } else {
                feedback::TOO_FAR
            };
        }
        if sub.face_position < a.min_face_position {
            return feedback::CENTER_FACE;
        }
        if sub.sharpness < f.sharpness {
            return feedback::HOLD_STILL;
        }
        feedback::HOLD_STEADY
    }
}

fn unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::geometry::NormalizedRect;
    use image::Luma;

    const CENTERED: NormalizedRect = NormalizedRect::new(0.3, 0.25, 0.4, 0.5);

    fn stats(mean_luma: f64, edge_energy: f64) -> FrameStatistics {
        FrameStatistics::new(640, 480, mean_luma, edge_energy)
    }

    fn score_box(rect: NormalizedRect, mean_luma: f64, edge_energy: f64) -> QualityScore {
        FrameQualityScorer::new().score(
            &stats(mean_luma, edge_energy),
            Some(&FaceObservation::from_bounding_box(rect)),
        )
    }

    fn sub(face_size: f64, face_position: f64, brightness: f64, sharpness: f64) -> SubScores {
        SubScores {
            face_size,
            face_position,
            brightness,
            sharpness,
        }
    }

    #[test]
    fn test_ideal_frame_is_acceptable() {
        let score = score_box(CENTERED, 0.55, 500.0);
        assert!((score.overall - 1.0).abs() < 1e-12);
        assert!(score.is_acceptable_for_analysis);
        assert!(score.feedback_message.is_none());
    }

    #[test]
    fn test_absent_geometry_yields_zero_score() {
        let scorer = FrameQualityScorer::new();
        for face in [None, Some(FaceObservation::default())] {
            let score = scorer.score(&stats(0.55, 500.0), face.as_ref());
            assert_eq!(score.overall, 0.0);
            assert_eq!(score.face_size, 0.0);
            assert_eq!(score.face_position, 0.0);
            assert_eq!(score.brightness, 0.0);
            assert_eq!(score.sharpness, 0.0);
            assert!(!score.is_acceptable_for_analysis);
            assert_eq!(score.feedback_message.as_deref(), Some(feedback::NO_FACE));
        }
    }

    #[test]
    fn test_too_dark() {
        let score = score_box(CENTERED, 0.1, 500.0);
        assert!(!score.is_acceptable_for_analysis);
        assert_eq!(score.feedback_message.as_deref(), Some(feedback::TOO_DARK));
    }

    #[test]
    fn test_too_bright() {
        let score = score_box(CENTERED, 0.98, 500.0);
        assert_eq!(score.feedback_message.as_deref(), Some(feedback::TOO_BRIGHT));
    }

    #[test]
    fn test_mediocre_lighting() {
        let score = score_box(CENTERED, 0.3, 500.0);
        assert!(score.brightness >= 0.3 && score.brightness < 0.45);
        assert_eq!(score.feedback_message.as_deref(), Some(feedback::POOR_LIGHTING));
    }

    #[test]
    fn test_face_too_small() {
        let score = score_box(NormalizedRect::new(0.45, 0.45, 0.1, 0.1), 0.55, 500.0);
        assert!(score.face_size < 0.5);
        assert_eq!(score.feedback_message.as_deref(), Some(feedback::TOO_FAR));
    }

    #[test]
    fn test_face_too_large() {
        let score = score_box(NormalizedRect::new(0.0, 0.0, 1.0, 1.0), 0.55, 500.0);
        assert_eq!(score.face_size, 0.0);
        assert_eq!(score.feedback_message.as_deref(), Some(feedback::TOO_CLOSE));
    }

    #[test]
    fn test_small_face_in_corner_asks_to_center() {
        let score = score_box(NormalizedRect::new(0.0, 0.0, 0.15, 0.15), 0.55, 500.0);
        assert!(score.face_size < 0.5 && score.face_position < 0.5);
        assert_eq!(score.feedback_message.as_deref(), Some(feedback::CENTER_FACE));
    }

    #[test]
    fn test_off_center_face() {
        let score = score_box(NormalizedRect::new(0.6, 0.1, 0.35, 0.6), 0.55, 500.0);
        assert_eq!(score.face_size, 1.0);
        assert!(score.face_position < 0.5);
        assert_eq!(score.feedback_message.as_deref(), Some(feedback::CENTER_FACE));
    }

    #[test]
    fn test_brightness_outranks_face_size() {
        let score = score_box(NormalizedRect::new(0.45, 0.45, 0.1, 0.1), 0.05, 500.0);
        assert_eq!(score.feedback_message.as_deref(), Some(feedback::TOO_DARK));
    }

    #[test]
    fn test_holistic_feedback_comes_first() {
        let score = score_box(NormalizedRect::new(0.0, 0.0, 0.05, 0.05), 0.02, 0.0);
        assert!(score.overall < 0.25);
        assert_eq!(score.feedback_message.as_deref(), Some(feedback::HOLISTIC));
    }

    #[test]
    fn test_feedback_order_for_sharpness_and_fallback() {
        let scorer = FrameQualityScorer::new();
        let luma = 0.55;

        let blurry = sub(0.6, 0.6, 0.5, 0.0);
        let overall = scorer.overall(0.6, 0.6, 0.5, 0.0);
        assert!(overall < 0.6);
        assert_eq!(scorer.feedback(&blurry, overall, 0.2, luma), feedback::HOLD_STILL);

        let marginal = sub(0.5, 0.5, 0.45, 0.5);
        let overall = scorer.overall(0.5, 0.5, 0.45, 0.5);
        assert!(overall < 0.6);
        assert_eq!(scorer.feedback(&marginal, overall, 0.2, luma), feedback::HOLD_STEADY);
    }

    #[test]
    fn test_blur_alone_does_not_gate() {
        // Sharpness only enters through the overall score
        let score = score_box(CENTERED, 0.55, 10.0);
        assert!(score.sharpness < 0.1);
        assert!(score.is_acceptable_for_analysis);
    }

    #[test]
    fn test_face_size_curve_breakpoints() {
        let scorer = FrameQualityScorer::new();
        let c = scorer.config().curves;
        let area_at_min = c.face_area_min_ratio * 0.5;
        assert!((scorer.face_size_score(area_at_min) - 0.5).abs() < 1e-12);
        assert_eq!(scorer.face_size_score(c.face_area_min_ratio), 1.0);
        assert_eq!(scorer.face_size_score(c.face_area_max_ratio), 1.0);
        assert_eq!(scorer.face_size_score(c.face_area_cutoff_ratio), 0.0);
    }

    #[test]
    fn test_sub_score_curves_stay_in_unit_range() {
        let scorer = FrameQualityScorer::new();
        for i in 0..=200 {
            let t = i as f64 / 100.0 - 0.5;
            for value in [
                scorer.face_size_score(t),
                scorer.face_position_score(NormalizedPoint::new(t, 1.0 - t)),
                scorer.brightness_score(t),
                scorer.sharpness_score(t * 300.0),
            ] {
                assert!((0.0..=1.0).contains(&value), "value {} for t {}", value, t);
            }
        }
        assert_eq!(scorer.face_position_score(NormalizedPoint::new(0.5, 0.5)), 1.0);
        assert_eq!(scorer.face_position_score(NormalizedPoint::new(0.0, 0.0)), 0.0);
        assert_eq!(scorer.brightness_score(0.55), 1.0);
    }

    #[test]
    fn test_brightness_is_unimodal() {
        let scorer = FrameQualityScorer::new();
        let target = scorer.config().curves.target_luma;
        let mut previous = scorer.brightness_score(0.0);
        for i in 1..=100 {
            let luma = i as f64 / 100.0;
            let current = scorer.brightness_score(luma);
            if luma <= target {
                assert!(current >= previous);
            } else {
                assert!(current <= previous);
            }
            previous = current;
        }
    }

    #[test]
    fn test_overall_is_monotone_in_each_sub_score() {
        let scorer = FrameQualityScorer::new();
        let steps: Vec<f64> = (0..=10).map(|i| i as f64 / 10.0).collect();
        for &base in &steps {
            for index in 0..4 {
                let mut previous = f64::MIN;
                for &value in &steps {
                    let mut s = [base; 4];
                    s[index] = value;
                    let overall = scorer.overall(s[0], s[1], s[2], s[3]);
                    assert!(overall >= previous);
                    assert!((0.0..=1.0).contains(&overall));
                    previous = overall;
                }
            }
        }
    }

    #[test]
    fn test_score_is_idempotent() {
        let scorer = FrameQualityScorer::new();
        let face = FaceObservation::from_bounding_box(NormalizedRect::new(0.2, 0.2, 0.3, 0.4));
        let first = scorer.score(&stats(0.42, 77.0), Some(&face));
        let second = scorer.score(&stats(0.42, 77.0), Some(&face));
        assert_eq!(first, second);
        assert_eq!(first.overall.to_bits(), second.overall.to_bits());
    }

    #[test]
    fn test_score_gray_measures_face_region() {
        // Well-exposed textured face on a black background
        let image = GrayImage::from_fn(200, 200, |x, y| {
            if (60..140).contains(&x) && (50..150).contains(&y) {
                Luma([if (x + y) % 2 == 0 { 110 } else { 170 }])
            } else {
                Luma([0])
            }
        });
        let face = FaceObservation::from_bounding_box(NormalizedRect::new(0.3, 0.25, 0.4, 0.5));
        let score = FrameQualityScorer::new().score_gray(&image, Some(&face));
        assert!(score.is_acceptable_for_analysis, "{:?}", score);
        assert_eq!(score.sharpness, 1.0);
    }

    #[test]
    fn test_custom_config_validation() {
        let mut config = QualityConfig::default();
        config.weights.brightness = 0.9;
        assert!(FrameQualityScorer::with_config(config).is_err());

        let mut config = QualityConfig::default();
        config.acceptance.min_overall = 0.9;
        let strict = FrameQualityScorer::with_config(config).unwrap();
        let score = strict.score(&stats(0.45, 60.0), Some(&FaceObservation::from_bounding_box(CENTERED)));
        assert!(!score.is_acceptable_for_analysis);
    }
}
