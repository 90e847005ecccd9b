//! Seasonal classification of skin color
//!
//! Classifies a skin Lab color with a fixed warm/light bucket rule and
//! confirms the result against per-season reference colors:
//! - Bucket: warm if b* >= 12, light if L* >= 65 (boundaries count as true)
//! - Reference ranking by CIE76 or CIEDE2000 distance
//! - Confidence from the gap between the chosen season and its closest rival

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::color::{delta_e, delta_e_2000, ColorSample, DistanceMetric, LabColor};
use crate::config::ClassificationConfig;
use crate::season::Season;
use crate::Result;

/// Outcome of classifying one skin sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Season chosen by the bucket rule
    pub season: Season,
    /// Gap between the nearest and second-nearest reference distances (0.0-1.0)
    pub confidence: f64,
    /// Distance from the skin color to `next_closest_season`'s reference
    pub delta_e_to_next_closest: f64,
    /// Second-nearest reference season, or the third when the second is `season`
    pub next_closest_season: Season,
    /// Season whose reference is closest to the skin color
    pub nearest_reference_season: Season,
    /// Metric used for the reference distances
    pub metric: DistanceMetric,
    /// Classified skin color
    pub skin_lab: LabColor,
    /// Companion hair color, if supplied
    pub hair_lab: Option<LabColor>,
    /// CIE76 distance between skin and hair, if hair was supplied
    pub skin_hair_contrast: Option<f64>,
}

/// Per-season distances under both metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    /// Season whose reference was measured
    pub season: Season,
    /// CIE76 distance to the reference
    pub cie76: f64,
    /// CIEDE2000 distance to the reference
    pub ciede2000: f64,
}

/// Seasonal classifier with configurable thresholds and references
#[derive(Debug, Clone, Default)]
pub struct SeasonClassifier {
    config: ClassificationConfig,
}

impl SeasonClassifier {
    /// Create a classifier with the default thresholds and references
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidConfig` if thresholds or references are not finite
    pub fn with_config(config: ClassificationConfig) -> Result<Self> {
        if let Err(err) = config.validate() {
            warn!(error = %err, "rejected classification configuration");
            return Err(err);
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassificationConfig {
        &self.config
    }

    /// Apply the warm/light bucket rule
    pub fn bucket(&self, lab: LabColor) -> Season {
        let is_warm = lab.b >= self.config.warm_b_threshold;
        let is_light = lab.l >= self.config.light_l_threshold;
        Season::from_traits(is_warm, is_light)
    }

    /// Classify a skin color using the configured metric
    pub fn classify(&self, skin: LabColor) -> ClassificationResult {
        self.classify_with_metric(skin, None, self.config.metric)
    }

    /// Classify a skin color and record a companion hair color
    pub fn classify_with_hair(&self, skin: LabColor, hair: Option<LabColor>) -> ClassificationResult {
        self.classify_with_metric(skin, hair, self.config.metric)
    }

    /// Classify averaged skin (and optional hair) samples
    pub fn classify_sample(&self, skin: &ColorSample, hair: Option<&ColorSample>) -> ClassificationResult {
        self.classify_with_hair(skin.lab(), hair.map(ColorSample::lab))
    }

    /// Classify with an explicit distance metric for reference confirmation
    pub fn classify_with_metric(
        &self,
        skin: LabColor,
        hair: Option<LabColor>,
        metric: DistanceMetric,
    ) -> ClassificationResult {
        let skin = sanitize(skin);
        let hair = hair.map(sanitize);

        let season = self.bucket(skin);
        let ranking = self.ranked_distances(skin, metric);
        let (nearest_reference_season, nearest_distance) = ranking[0];

        // Runner-up reference, skipping the bucket's own season when it holds that slot
        let (next_closest_season, next_distance) = if ranking[1].0 == season {
            ranking[2]
        } else {
            ranking[1]
        };

        let runner_up_distance = ranking[1].1;
        let separation = runner_up_distance + nearest_distance;
        let confidence = if separation > f64::EPSILON {
            ((runner_up_distance - nearest_distance) / separation).clamp(0.0, 1.0)
        } else {
            0.0
        };

        debug!(
            %season,
            %nearest_reference_season,
            %next_closest_season,
            confidence,
            l = skin.l,
            b = skin.b,
            ?metric,
            "classified skin color"
        );

        ClassificationResult {
            season,
            confidence,
            delta_e_to_next_closest: next_distance,
            next_closest_season,
            nearest_reference_season,
            metric,
            skin_lab: skin,
            hair_lab: hair,
            skin_hair_contrast: hair.map(|hair| delta_e(skin, hair)),
        }
    }

    /// Distance from `lab` to each season's reference, in canonical season order
    pub fn reference_distances(&self, lab: LabColor, metric: DistanceMetric) -> [(Season, f64); 4] {
        Season::ALL.map(|season| {
            let distance = metric.distance(lab, self.config.references.get(season));
            trace!(%season, distance, ?metric, "reference distance");
            (season, distance)
        })
    }

    /// Season whose reference is nearest to `lab`, with its distance
    pub fn nearest_by(&self, lab: LabColor, metric: DistanceMetric) -> (Season, f64) {
        self.ranked_distances(sanitize(lab), metric)[0]
    }

    /// CIE76 and CIEDE2000 distances from `lab` to every reference
    ///
    /// The two metrics may rank seasons differently near category boundaries.
    pub fn compare_metrics(&self, lab: LabColor) -> Vec<MetricComparison> {
        let lab = sanitize(lab);
        self.config
            .references
            .iter()
            .map(|(season, reference)| MetricComparison {
                season,
                cie76: delta_e(lab, reference),
                ciede2000: delta_e_2000(lab, reference),
            })
            .collect()
    }

    /// Reference distances sorted ascending; ties keep canonical season order
    fn ranked_distances(&self, lab: LabColor, metric: DistanceMetric) -> [(Season, f64); 4] {
        let mut ranking = self.reference_distances(lab, metric);
        ranking.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranking
    }
}

/// Replace non-finite components with 0 so every input classifies
fn sanitize(lab: LabColor) -> LabColor {
    let finite = |v: f64| if v.is_finite() { v } else { 0.0 };
    LabColor::new(finite(lab.l), finite(lab.a), finite(lab.b))
}
