//! Frame quality assessment
//!
//! Scores camera frames for face size, face position, brightness and
//! sharpness, and decides whether a frame is fit for color analysis.

pub mod geometry;
pub mod scorer;
pub mod statistics;

pub use geometry::{FaceObservation, FaceRegion, GeometrySource, NormalizedPoint, NormalizedRect};
pub use scorer::{feedback, FrameQualityScorer, QualityScore};
pub use statistics::FrameStatistics;
