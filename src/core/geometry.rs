// core/geometry.rs

// Planar geometry shared by every planning stage: the field point type,
// Euclidean distances, polyline length and clamped point-to-segment distance.

use nalgebra::Point2;

/// A position on the field, in meters.
pub type Point = Point2<f64>;

/// Squared segment length below which a segment is treated as a single point.
const DEGENERATE_SEGMENT_SQ: f64 = 1e-12;

/// Euclidean distance between two points.
pub fn distance(a: &Point, b: &Point) -> f64 {
    nalgebra::distance(a, b)
}

/// Sum of Euclidean distances between consecutive points.
///
/// Returns 0 for fewer than two points.
pub fn path_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| distance(&w[0], &w[1])).sum()
}

/// Minimum distance from `point` to the segment `seg_start`-`seg_end`.
///
/// The projection parameter is clamped to [0, 1]. Zero-length segments fall
/// back to the distance to `seg_start`.
pub fn point_to_segment_distance(point: &Point, seg_start: &Point, seg_end: &Point) -> f64 {
    let v = seg_end - seg_start;
    let u = point - seg_start;
    let len_sq = v.norm_squared();
    if len_sq < DEGENERATE_SEGMENT_SQ {
        return u.norm();
    }

    let t = (u.dot(&v) / len_sq).clamp(0.0, 1.0);
    let projection = *seg_start + v * t;
    distance(point, &projection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_length_of_short_inputs_is_zero() {
        assert_eq!(path_length(&[]), 0.0);
        assert_eq!(path_length(&[Point::new(3.0, 4.0)]), 0.0);
    }

    #[test]
    fn path_length_sums_segments() {
        let pts = [Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(3.0, 10.0)];
        assert!((path_length(&pts) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn segment_distance_uses_perpendicular_inside_segment() {
        let d = point_to_segment_distance(
            &Point::new(1.0, 2.0),
            &Point::new(0.0, 0.0),
            &Point::new(4.0, 0.0),
        );
        assert!((d - 2.0).abs() < 1e-12);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let d = point_to_segment_distance(
            &Point::new(-3.0, 4.0),
            &Point::new(0.0, 0.0),
            &Point::new(4.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segment_falls_back_to_point_distance() {
        let a = Point::new(1.0, 1.0);
        let d = point_to_segment_distance(&Point::new(4.0, 5.0), &a, &a);
        assert!((d - 5.0).abs() < 1e-12);
    }
}
