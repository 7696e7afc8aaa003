//! Catmull-Rom smoothing of pruned waypoints into a drivable curve.
//!
//! The curve passes through every waypoint. Ends are clamped by repeating the
//! first and last waypoint as virtual control points.

use crate::core::Point;

/// Interpolates `density` points per waypoint segment with a uniform
/// Catmull-Rom spline and appends the final waypoint.
///
/// Inputs with fewer than two waypoints come back unchanged. The output holds
/// `(n - 1) * density + 1` points and its last element is the last waypoint
/// exactly.
pub fn smooth_path(waypoints: &[Point], density: usize) -> Vec<Point> {
    if waypoints.len() < 2 {
        return waypoints.to_vec();
    }
    let first = waypoints[0];
    let last = waypoints[waypoints.len() - 1];

    let mut controls = Vec::with_capacity(waypoints.len() + 2);
    controls.push(first);
    controls.extend_from_slice(waypoints);
    controls.push(last);

    let mut path = Vec::with_capacity((waypoints.len() - 1) * density + 1);
    for window in controls.windows(4) {
        let [p0, p1, p2, p3] = [window[0].coords, window[1].coords, window[2].coords, window[3].coords];
        for step in 0..density {
            let t = step as f64 / density as f64;
            let t2 = t * t;
            let t3 = t2 * t;
            let q = (p1 * 2.0
                + (p2 - p0) * t
                + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
                + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
                * 0.5;
            path.push(Point::from(q));
        }
    }

    path.push(last);
    path
}
