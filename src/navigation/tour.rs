//! Visit ordering: greedy nearest-neighbor construction and open-path 2-opt.

use crate::core::{Point, distance};

use super::cluster::nearest_index;

/// Minimum gain for a 2-opt move to count as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-10;

/// Orders `points` greedily, always moving to the nearest remaining point.
///
/// `start` is where the walk begins and is not part of the output. Ties go to
/// the point that appears first in `points`.
pub fn nearest_neighbor_order(points: &[Point], start: &Point) -> Vec<Point> {
    let mut remaining = points.to_vec();
    let mut ordered = Vec::with_capacity(points.len());
    let mut current = *start;

    while let Some(idx) = nearest_index(&remaining, &current) {
        let chosen = remaining.remove(idx);
        ordered.push(chosen);
        current = chosen;
    }

    ordered
}

/// Open-path 2-opt refinement with the first point pinned.
///
/// Sweeps every edge pair until a sweep finds no strictly improving reversal,
/// or until `max_sweeps` sweeps have run. Tours shorter than four points are
/// returned unchanged.
pub fn two_opt_improve(tour: &[Point], max_sweeps: Option<usize>) -> Vec<Point> {
    let mut tour = tour.to_vec();
    let n = tour.len();
    if n < 4 {
        return tour;
    }

    let mut sweeps = 0usize;
    let mut swaps = 0usize;
    let mut improved = true;

    while improved {
        if max_sweeps.is_some_and(|cap| sweeps >= cap) {
            log::debug!("2-opt stopped at sweep cap ({} sweeps)", sweeps);
            break;
        }
        improved = false;
        sweeps += 1;

        for i in 0..n - 1 {
            for j in i + 2..n {
                let (d_old, d_new) = if j + 1 < n {
                    (
                        distance(&tour[i], &tour[i + 1]) + distance(&tour[j], &tour[j + 1]),
                        distance(&tour[i], &tour[j]) + distance(&tour[i + 1], &tour[j + 1]),
                    )
                } else {
                    // j is the tail: reversing only rewires the edge leaving i
                    (distance(&tour[i], &tour[i + 1]), distance(&tour[i], &tour[j]))
                };

                if d_new < d_old - IMPROVEMENT_EPSILON {
                    tour[i + 1..=j].reverse();
                    swaps += 1;
                    improved = true;
                }
            }
        }
    }

    log::debug!("2-opt: {} swaps over {} sweeps ({} points)", swaps, sweeps, n);
    tour
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::path_length;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn nearest_neighbor_walks_outward() {
        let points = pts(&[(5.0, 0.0), (1.0, 0.0), (3.0, 0.0)]);
        let order = nearest_neighbor_order(&points, &Point::origin());
        assert_eq!(order, pts(&[(1.0, 0.0), (3.0, 0.0), (5.0, 0.0)]));
    }

    #[test]
    fn nearest_neighbor_ties_take_first_listed() {
        let points = pts(&[(0.0, 1.0), (0.0, -1.0)]);
        let order = nearest_neighbor_order(&points, &Point::origin());
        assert_eq!(order[0], Point::new(0.0, 1.0));
    }

    #[test]
    fn short_tours_are_untouched() {
        let tour = pts(&[(0.0, 0.0), (5.0, 5.0), (1.0, 0.0)]);
        assert_eq!(two_opt_improve(&tour, None), tour);
    }

    #[test]
    fn crossing_is_removed() {
        // 0 -> (1,1) -> (1,0) -> (2,1) -> (2,0) crosses itself twice
        let tour = pts(&[(0.0, 0.0), (1.0, 1.0), (1.0, 0.0), (2.0, 1.0), (2.0, 0.0)]);
        let improved = two_opt_improve(&tour, None);
        assert_eq!(improved[0], tour[0]);
        assert_eq!(improved.len(), tour.len());
        assert!(path_length(&improved) < path_length(&tour) - 1e-9);
    }

    #[test]
    fn tail_reversal_is_considered() {
        // Walking to the far point first and doubling back is fixed by
        // reversing the whole tail.
        let tour = pts(&[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let improved = two_opt_improve(&tour, None);
        assert_eq!(improved, pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (10.0, 0.0)]));
    }

    #[test]
    fn zero_sweep_cap_returns_input() {
        let tour = pts(&[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(two_opt_improve(&tour, Some(0)), tour);
    }
}
