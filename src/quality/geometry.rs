//! Face geometry in normalized image coordinates
//!
//! Coordinates are fractions of the image width/height with the origin at the
//! top-left corner. Landmarks give a tighter estimate of the face extent than
//! a detector's bounding box, so they are preferred when usable.

use serde::{Deserialize, Serialize};

/// A point in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    fn clamped(&self) -> Self {
        Self::new(self.x.clamp(0.0, 1.0), self.y.clamp(0.0, 1.0))
    }
}

/// A rectangle in normalized image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NormalizedRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Intersection with the unit square, or `None` if empty or non-finite
    pub fn clamped(&self) -> Option<Self> {
        if ![self.x, self.y, self.width, self.height].iter().all(|v| v.is_finite()) {
            return None;
        }
        let x0 = self.x.clamp(0.0, 1.0);
        let y0 = self.y.clamp(0.0, 1.0);
        let x1 = (self.x + self.width).clamp(0.0, 1.0);
        let y1 = (self.y + self.height).clamp(0.0, 1.0);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self::new(x0, y0, x1 - x0, y1 - y0))
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn center(&self) -> NormalizedPoint {
        NormalizedPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Pixel bounds `(x0, y0, x1, y1)`, end-exclusive, within a `width` x `height` image
    pub fn to_pixel_bounds(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let to_px = |v: f64, size: u32| ((v * size as f64).max(0.0) as u32).min(size);
        let x0 = to_px(self.x, width);
        let y0 = to_px(self.y, height);
        let x1 = (((self.x + self.width) * width as f64).ceil().max(0.0) as u32).min(width);
        let y1 = (((self.y + self.height) * height as f64).ceil().max(0.0) as u32).min(height);
        (x0, y0, x1.max(x0), y1.max(y0))
    }

    /// Smallest rectangle enclosing all points
    fn enclosing(points: &[NormalizedPoint]) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (1.0f64, 1.0f64, 0.0f64, 0.0f64);
        for p in points {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Self::new(x0, y0, (x1 - x0).max(0.0), (y1 - y0).max(0.0))
    }
}

/// Where a [`FaceRegion`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometrySource {
    Landmarks,
    BoundingBox,
}

/// Face geometry reported by the landmark/detection stage
///
/// Either source may be missing. With neither usable, the frame has no face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceObservation {
    pub landmarks: Option<Vec<NormalizedPoint>>,
    pub bounding_box: Option<NormalizedRect>,
}

impl FaceObservation {
    pub fn new(landmarks: Option<Vec<NormalizedPoint>>, bounding_box: Option<NormalizedRect>) -> Self {
        Self {
            landmarks,
            bounding_box,
        }
    }

    pub fn from_landmarks(landmarks: Vec<NormalizedPoint>) -> Self {
        Self::new(Some(landmarks), None)
    }

    pub fn from_bounding_box(bounding_box: NormalizedRect) -> Self {
        Self::new(None, Some(bounding_box))
    }

    /// Resolve the face region, preferring landmarks over the bounding box
    ///
    /// Landmarks are used when at least `min_landmarks` finite points span a
    /// non-degenerate hull. Otherwise the bounding box is used if it overlaps
    /// the image. Returns `None` when neither is usable.
    pub fn region(&self, min_landmarks: usize) -> Option<FaceRegion> {
        self.landmark_region(min_landmarks)
            .or_else(|| self.bounding_box_region())
    }

    fn landmark_region(&self, min_landmarks: usize) -> Option<FaceRegion> {
        let points: Vec<NormalizedPoint> = self
            .landmarks
            .as_ref()?
            .iter()
            .filter(|p| p.is_finite())
            .map(NormalizedPoint::clamped)
            .collect();
        if points.len() < min_landmarks.max(3) {
            return None;
        }

        let area = polygon_area(&convex_hull(&points));
        if area <= 0.0 {
            return None;
        }
        let bounds = NormalizedRect::enclosing(&points);
        Some(FaceRegion {
            area,
            center: bounds.center(),
            bounds,
            source: GeometrySource::Landmarks,
        })
    }

    fn bounding_box_region(&self) -> Option<FaceRegion> {
        let bounds = self.bounding_box?.clamped()?;
        Some(FaceRegion {
            area: bounds.area(),
            center: bounds.center(),
            bounds,
            source: GeometrySource::BoundingBox,
        })
    }
}

/// Resolved face extent used for scoring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceRegion {
    /// Face area as a fraction of the image area
    pub area: f64,
    /// Center of the face extent
    pub center: NormalizedPoint,
    /// Axis-aligned extent, used to select pixels
    pub bounds: NormalizedRect,
    pub source: GeometrySource,
}

/// Convex hull (Andrew's monotone chain), counter-clockwise without repeats
fn convex_hull(points: &[NormalizedPoint]) -> Vec<NormalizedPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let cross = |o: &NormalizedPoint, a: &NormalizedPoint, b: &NormalizedPoint| {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };

    let mut hull: Vec<NormalizedPoint> = Vec::with_capacity(sorted.len() * 2);
    for p in sorted.iter() {
        while hull.len() >= 2 && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    let lower_len = hull.len() + 1;
    for p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(&hull[hull.len() - 2], &hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(*p);
    }
    hull.pop();
    hull
}

/// Shoelace area
fn polygon_area(polygon: &[NormalizedPoint]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice_area: f64 = polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum();
    twice_area.abs() / 2.0
}
