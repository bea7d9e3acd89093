/// Joint angle geometry
///
/// Pure functions for the interior angle at a vertex formed by three 2D
/// points, plus the confidence gate deciding whether landmarks may be used.
/// Angles are unit-independent: any consistent coordinate space works.

use crate::models::landmark::{Landmark, Point};

/// Interior angle at `vertex` in degrees, within [0, 180].
///
/// Each arm's direction is measured against the horizontal axis with `atan2`;
/// the absolute difference is wrapped into [0, 360) and folded onto [0, 180].
/// A zero-length arm has direction 0, so coincident points still yield a
/// deterministic value.
pub fn angle_between(first: Point, vertex: Point, last: Point) -> f32 {
    let to_first = (first.y - vertex.y).atan2(first.x - vertex.x);
    let to_last = (last.y - vertex.y).atan2(last.x - vertex.x);

    let mut degrees = (to_last - to_first).abs().to_degrees().rem_euclid(360.0);
    if degrees > 180.0 {
        degrees = 360.0 - degrees;
    }
    degrees
}

/// Interior angle, or `None` when any point is missing or the geometry is not finite
pub fn angle(first: Option<Point>, vertex: Option<Point>, last: Option<Point>) -> Option<f32> {
    let degrees = angle_between(first?, vertex?, last?);
    degrees.is_finite().then_some(degrees)
}

/// True iff the landmark exists and its confidence is at least `min_confidence`
pub fn is_reliable(landmark: Option<&Landmark>, min_confidence: f32) -> bool {
    landmark.map_or(false, |lm| lm.confidence >= min_confidence)
}

/// Conjunction of [`is_reliable`] over a triple
pub fn are_reliable(
    first: Option<&Landmark>,
    vertex: Option<&Landmark>,
    last: Option<&Landmark>,
    min_confidence: f32,
) -> bool {
    is_reliable(first, min_confidence)
        && is_reliable(vertex, min_confidence)
        && is_reliable(last, min_confidence)
}

/// Angle over three landmarks, gated on reliability
pub fn landmark_angle(
    first: Option<&Landmark>,
    vertex: Option<&Landmark>,
    last: Option<&Landmark>,
    min_confidence: f32,
) -> Option<f32> {
    if !are_reliable(first, vertex, last, min_confidence) {
        return None;
    }
    angle(
        first.map(Landmark::point),
        vertex.map(Landmark::point),
        last.map(Landmark::point),
    )
}
