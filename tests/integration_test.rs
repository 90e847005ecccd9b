//! Integration tests for the season analysis pipeline
//!
//! These tests exercise the public API end to end:
//! - sRGB to Lab conversion against reference values
//! - Season classification at the bucket boundaries
//! - Frame quality scoring on synthetic frames
//! - Quality gating and user feedback
//! - Configuration round trips

use image::{Rgb, RgbImage};
use scan_seasons::quality::feedback;
use scan_seasons::{
    analyze_season, delta_e, delta_e_2000, rgb_to_lab, AnalysisError, ColorSample, DistanceMetric, EngineConfig,
    FaceObservation, FrameQualityScorer, LabColor, NormalizedPoint, NormalizedRect, Season,
    SeasonAnalyzer, SeasonClassifier,
};

const FRAME_SIZE: u32 = 200;

/// Frame with a textured skin-toned face in the central 40% x 50% box
fn synthetic_frame(dark: [u8; 3], light: [u8; 3], background: [u8; 3]) -> RgbImage {
    RgbImage::from_fn(FRAME_SIZE, FRAME_SIZE, |x, y| {
        if (60..140).contains(&x) && (50..150).contains(&y) {
            Rgb(if (x + y) % 2 == 0 { dark } else { light })
        } else {
            Rgb(background)
        }
    })
}

fn skin_frame() -> RgbImage {
    synthetic_frame([200, 150, 120], [240, 190, 160], [30, 30, 30])
}

fn centered_box() -> FaceObservation {
    FaceObservation::from_bounding_box(NormalizedRect::new(0.3, 0.25, 0.4, 0.5))
}

fn ellipse_landmarks(count: usize) -> Vec<NormalizedPoint> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64 * std::f64::consts::TAU;
            NormalizedPoint::new(0.5 + 0.2 * t.cos(), 0.5 + 0.25 * t.sin())
        })
        .collect()
}

// ============================================================================
// Color Conversion
// ============================================================================

#[test]
fn test_rgb_to_lab_reference_values() {
    let cases = [
        ([1.0, 1.0, 1.0], [100.0, 0.0, 0.0]),
        ([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        ([1.0, 0.0, 0.0], [53.24, 80.09, 67.20]),
        ([0.0, 1.0, 0.0], [87.73, -86.18, 83.18]),
        ([0.0, 0.0, 1.0], [32.30, 79.19, -107.86]),
    ];
    for (rgb, expected) in cases {
        let lab = rgb_to_lab(rgb[0], rgb[1], rgb[2]);
        assert!((lab.l - expected[0]).abs() < 0.05, "L for {:?}: {:?}", rgb, lab);
        assert!((lab.a - expected[1]).abs() < 0.05, "a for {:?}: {:?}", rgb, lab);
        assert!((lab.b - expected[2]).abs() < 0.05, "b for {:?}: {:?}", rgb, lab);
    }
}

#[test]
fn test_rgb_to_lab_is_total() {
    for rgb in [[-1.0, 2.0, 0.5], [f64::NAN, 0.5, 0.5], [f64::INFINITY, 0.0, 0.0]] {
        let lab = rgb_to_lab(rgb[0], rgb[1], rgb[2]);
        assert!(lab.l.is_finite() && lab.a.is_finite() && lab.b.is_finite());
        assert!((0.0..=100.0).contains(&lab.l));
    }
}

#[test]
fn test_distances_agree_on_identity() {
    let skin = ColorSample::from_rgb8(224, 172, 138).lab();
    assert_eq!(delta_e(skin, skin), 0.0);
    assert!(delta_e_2000(skin, skin).abs() < 1e-12);
    let other = LabColor::new(60.0, 14.0, 18.0);
    assert!(delta_e(skin, other) > 0.0);
    assert!(delta_e_2000(skin, other) > 0.0);
}

// ============================================================================
// Season Classification
// ============================================================================

#[test]
fn test_classification_boundaries() {
    let classifier = SeasonClassifier::new();
    let cases = [
        (LabColor::new(65.0, 10.0, 12.0), Season::Spring),
        (LabColor::new(64.999, 10.0, 12.0), Season::Autumn),
        (LabColor::new(65.0, 10.0, 11.999), Season::Summer),
        (LabColor::new(64.999, 10.0, 11.999), Season::Winter),
        (LabColor::new(72.0, 12.0, 20.0), Season::Spring),
        (LabColor::new(50.0, 10.0, 6.0), Season::Winter),
    ];
    for (lab, expected) in cases {
        let result = classifier.classify(lab);
        assert_eq!(result.season, expected, "{:?}", lab);
        assert_ne!(result.next_closest_season, result.season);
        assert!((0.0..=1.0).contains(&result.confidence));
        assert!(result.delta_e_to_next_closest >= 0.0);
    }
}

#[test]
fn test_next_closest_when_bucket_differs_from_nearest_reference() {
    let classifier = SeasonClassifier::new();
    let lab = LabColor::new(66.0, 11.0, 13.0);
    let result = classifier.classify(lab);

    let mut ranking = classifier.reference_distances(lab, DistanceMetric::Cie76);
    ranking.sort_by(|x, y| x.1.total_cmp(&y.1));
    assert_eq!(ranking[0].0, Season::Summer);
    assert_eq!(ranking[1].0, Season::Spring);

    assert_eq!(result.season, Season::Spring);
    assert_eq!(result.nearest_reference_season, Season::Summer);
    assert_eq!(result.next_closest_season, ranking[2].0);
    assert_eq!(result.delta_e_to_next_closest, ranking[2].1);

    let expected = (ranking[1].1 - ranking[0].1) / (ranking[1].1 + ranking[0].1);
    assert!((result.confidence - expected).abs() < 1e-12);
    assert!(result.confidence > 0.0);
}

#[test]
fn test_reference_color_has_high_confidence() {
    let classifier = SeasonClassifier::new();
    for season in Season::ALL {
        let result = classifier.classify(season.reference_lab());
        assert_eq!(result.season, season);
        assert_eq!(result.nearest_reference_season, season);
        assert!((result.confidence - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_classification_is_deterministic() {
    let classifier = SeasonClassifier::new();
    let skin = ColorSample::from_rgb8(198, 140, 110);
    let hair = ColorSample::from_rgb8(60, 40, 30);
    let first = classifier.classify_sample(&skin, Some(&hair));
    let second = classifier.classify_sample(&skin, Some(&hair));
    assert_eq!(first, second);
    assert!(first.skin_hair_contrast.is_some());
}

// ============================================================================
// Frame Quality
// ============================================================================

#[test]
fn test_well_lit_frame_is_accepted() {
    let score = FrameQualityScorer::new().score_rgb(&skin_frame(), Some(&centered_box()));
    assert!(score.is_acceptable_for_analysis, "{:?}", score);
    assert!(score.feedback_message.is_none());
    assert_eq!(score.face_size, 1.0);
    assert_eq!(score.sharpness, 1.0);
}

#[test]
fn test_landmarks_are_preferred_over_bounding_box() {
    let scorer = FrameQualityScorer::new();
    let face = FaceObservation::new(
        Some(ellipse_landmarks(16)),
        Some(NormalizedRect::new(0.0, 0.0, 0.1, 0.1)),
    );
    let score = scorer.score_rgb(&skin_frame(), Some(&face));
    assert!(score.is_acceptable_for_analysis, "{:?}", score);
    assert!(score.face_position > 0.99);

    let box_only = FaceObservation::from_bounding_box(NormalizedRect::new(0.0, 0.0, 0.1, 0.1));
    assert!(!scorer.score_rgb(&skin_frame(), Some(&box_only)).is_acceptable_for_analysis);
}

#[test]
fn test_too_few_landmarks_fall_back_to_box() {
    let face = FaceObservation::new(
        Some(vec![NormalizedPoint::new(0.5, 0.5), NormalizedPoint::new(0.6, 0.6)]),
        Some(NormalizedRect::new(0.3, 0.25, 0.4, 0.5)),
    );
    let score = FrameQualityScorer::new().score_rgb(&skin_frame(), Some(&face));
    assert!(score.is_acceptable_for_analysis);
}

#[test]
fn test_dark_frame_asks_for_light() {
    let frame = synthetic_frame([18, 14, 12], [24, 20, 18], [5, 5, 5]);
    let score = FrameQualityScorer::new().score_rgb(&frame, Some(&centered_box()));
    assert!(!score.is_acceptable_for_analysis);
    assert_eq!(score.feedback_message.as_deref(), Some(feedback::TOO_DARK));
}

#[test]
fn test_missing_face_gives_zero_score() {
    let score = FrameQualityScorer::new().score_rgb(&skin_frame(), None);
    assert_eq!(score.overall, 0.0);
    assert!(!score.is_acceptable_for_analysis);
    assert_eq!(score.feedback_message.as_deref(), Some(feedback::NO_FACE));
}

// ============================================================================
// Gated Analysis
// ============================================================================

#[test]
fn test_analyze_season_end_to_end() {
    let skin = ColorSample::from_rgb8(224, 172, 138);
    let analysis = analyze_season(&skin_frame(), Some(&centered_box()), &skin, None).unwrap();
    assert!(analysis.quality.is_acceptable_for_analysis);
    assert_eq!(
        analysis.classification.season,
        SeasonClassifier::new().bucket(skin.lab())
    );
    assert_eq!(analysis.classification.hair_lab, None);
}

#[test]
fn test_analyze_season_rejects_dark_frame() {
    let frame = synthetic_frame([18, 14, 12], [24, 20, 18], [5, 5, 5]);
    let err = analyze_season(&frame, Some(&centered_box()), &ColorSample::from_rgb8(224, 172, 138), None)
        .unwrap_err();
    assert!(err.is_recoverable());
    assert!(matches!(err, AnalysisError::InsufficientQuality { .. }));
    assert_eq!(err.user_message(), feedback::TOO_DARK);
}

#[test]
fn test_engine_config_round_trip_drives_analyzer() {
    let dir = std::env::temp_dir().join(format!("scan_seasons_it_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("engine.json");

    let mut config = EngineConfig::default();
    config.quality.acceptance.min_overall = 0.9;
    config.to_json_file(&path).unwrap();
    let loaded = EngineConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded, config);

    let strict = SeasonAnalyzer::from_config(&loaded).unwrap();
    // Flat face: no edge energy, overall capped at 0.8
    let frame = synthetic_frame([180, 140, 120], [180, 140, 120], [30, 30, 30]);
    let score = strict.assess_image(&frame, Some(&centered_box()));
    assert!(!score.is_acceptable_for_analysis);
    assert!(SeasonAnalyzer::new().assess_image(&frame, Some(&centered_box())).is_acceptable_for_analysis);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_public_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SeasonAnalyzer>();
    assert_send_sync::<SeasonClassifier>();
    assert_send_sync::<FrameQualityScorer>();
    assert_send_sync::<EngineConfig>();
    assert_send_sync::<AnalysisError>();
}

#[test]
fn test_analyzer_shared_across_threads() {
    let analyzer = std::sync::Arc::new(SeasonAnalyzer::new());
    let handles: Vec<_> = (0..4u8)
        .map(|i| {
            let analyzer = std::sync::Arc::clone(&analyzer);
            std::thread::spawn(move || {
                let skin = ColorSample::from_rgb8(180 + i * 10, 140, 120);
                analyzer.classifier().classify_sample(&skin, None)
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        let skin = ColorSample::from_rgb8(180 + i as u8 * 10, 140, 120);
        assert_eq!(result, SeasonClassifier::new().classify_sample(&skin, None));
    }
}
