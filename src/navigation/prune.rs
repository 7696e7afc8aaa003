// src/navigation/prune.rs
// Drops waypoints the intake sweeps up anyway while driving between their neighbours.

use crate::core::{Point, point_to_segment_distance};

/// Removes interior waypoints lying within `capture_half_width` of the
/// straight segment joining their kept neighbours.
///
/// Each pass rebuilds the kept list against the neighbours that survived so
/// far, and passes repeat until one removes nothing. First and last
/// waypoints are always kept.
pub fn prune_waypoints(waypoints: &[Point], capture_half_width: f64) -> Vec<Point> {
    if waypoints.len() <= 2 {
        return waypoints.to_vec();
    }

    let mut kept: Vec<usize> = (0..waypoints.len()).collect();
    let mut passes = 0usize;
    let mut changed = true;

    while changed {
        changed = false;
        passes += 1;

        let mut next_kept = Vec::with_capacity(kept.len());
        next_kept.push(kept[0]);
        for j in 1..kept.len() - 1 {
            let seg_start = &waypoints[next_kept[next_kept.len() - 1]];
            let seg_end = &waypoints[kept[j + 1]];
            let dist = point_to_segment_distance(&waypoints[kept[j]], seg_start, seg_end);
            if dist >= capture_half_width {
                next_kept.push(kept[j]);
            } else {
                changed = true;
            }
        }
        next_kept.push(kept[kept.len() - 1]);
        kept = next_kept;
    }

    log::debug!(
        "Pruned {} of {} waypoints in {} passes",
        waypoints.len() - kept.len(),
        waypoints.len(),
        passes
    );
    kept.into_iter().map(|i| waypoints[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn near_collinear_middle_is_dropped() {
        let w = pts(&[(0.0, 0.0), (1.0, 0.1), (2.0, 0.0)]);
        assert_eq!(prune_waypoints(&w, 0.45), pts(&[(0.0, 0.0), (2.0, 0.0)]));
    }

    #[test]
    fn far_detour_is_kept() {
        let w = pts(&[(0.0, 0.0), (1.0, 2.0), (2.0, 0.0)]);
        assert_eq!(prune_waypoints(&w, 0.45), w);
    }

    #[test]
    fn two_points_pass_through() {
        let w = pts(&[(0.0, 0.0), (0.0, 0.0)]);
        assert_eq!(prune_waypoints(&w, 0.45), w);
    }

    #[test]
    fn removal_cascades_across_passes() {
        // (3,0) is only close enough once (1,0.3) is gone and (2,0.6)-(4,0) is tested.
        let w = pts(&[(0.0, 0.0), (1.0, 0.3), (2.0, 0.6), (3.0, 0.0), (4.0, 0.0)]);
        let pruned = prune_waypoints(&w, 0.45);
        assert_eq!(pruned.first(), w.first());
        assert_eq!(pruned.last(), w.last());
        assert!(pruned.len() < w.len());
        assert_eq!(prune_waypoints(&pruned, 0.45), pruned);
    }
}
