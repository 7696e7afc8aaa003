//! Connectivity clustering and cluster selection.
//!
//! Two targets share a cluster when a chain of hops, each no longer than the
//! clustering radius, connects them. Expansion is a breadth-first flood fill
//! over an explicit work queue.

use std::collections::VecDeque;

use crate::core::{Point, distance};

/// A cluster together with how attractive it is from a reference position.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCluster {
    /// Member targets, never empty
    pub points: Vec<Point>,
    /// `size / (min_distance + bias)`
    pub score: f64,
    /// Distance from the reference position to the nearest member
    pub min_distance: f64,
}

impl ScoredCluster {
    /// Number of targets in the cluster
    pub fn size(&self) -> usize {
        self.points.len()
    }
}

/// Outcome of choosing the best cluster from a full partition.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSelection {
    /// The winning cluster
    pub cluster: ScoredCluster,
    /// Total number of clusters in the partition
    pub num_clusters: usize,
}

/// Flood-fills from `seed`, marking every reached index in `visited`.
fn expand(targets: &[Point], seed: usize, radius: f64, visited: &mut [bool]) -> Vec<Point> {
    let mut members = vec![seed];
    let mut queue = VecDeque::from([seed]);
    visited[seed] = true;

    while let Some(curr) = queue.pop_front() {
        for (i, p) in targets.iter().enumerate() {
            if !visited[i] && distance(p, &targets[curr]) <= radius {
                visited[i] = true;
                members.push(i);
                queue.push_back(i);
            }
        }
    }

    // Keep members in input order.
    members.sort_unstable();
    members.into_iter().map(|i| targets[i]).collect()
}

/// Partitions `targets` into connected clusters under `radius`.
///
/// Seeds are taken in input order, so the partition order is deterministic.
pub fn find_all_clusters(targets: &[Point], radius: f64) -> Vec<Vec<Point>> {
    let mut visited = vec![false; targets.len()];
    let mut clusters = Vec::new();

    for seed in 0..targets.len() {
        if visited[seed] {
            continue;
        }
        clusters.push(expand(targets, seed, radius, &mut visited));
    }

    clusters
}

/// Returns the single cluster grown from the target nearest to `reference`.
///
/// Empty input yields an empty cluster.
pub fn find_nearest_cluster(targets: &[Point], reference: &Point, radius: f64) -> Vec<Point> {
    let Some(seed) = nearest_index(targets, reference) else {
        return Vec::new();
    };
    let mut visited = vec![false; targets.len()];
    expand(targets, seed, radius, &mut visited)
}

/// Index of the point nearest to `reference`, first one on ties.
pub(crate) fn nearest_index(points: &[Point], reference: &Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let d = distance(p, reference);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Scores a non-empty cluster as `size / (min_distance + bias)`.
///
/// Returns `None` for an empty cluster.
pub fn score_cluster(cluster: &[Point], reference: &Point, distance_bias: f64) -> Option<ScoredCluster> {
    let min_distance = cluster
        .iter()
        .map(|p| distance(p, reference))
        .min_by(f64::total_cmp)?;

    Some(ScoredCluster {
        points: cluster.to_vec(),
        score: cluster.len() as f64 / (min_distance + distance_bias),
        min_distance,
    })
}

/// Scores every cluster and keeps the one with the strictly greatest score.
///
/// Ties go to the cluster encountered first in partition order.
pub fn select_best_cluster(
    clusters: &[Vec<Point>],
    reference: &Point,
    distance_bias: f64,
) -> Option<ClusterSelection> {
    let mut best: Option<ScoredCluster> = None;

    for cluster in clusters {
        let Some(scored) = score_cluster(cluster, reference, distance_bias) else {
            continue;
        };
        if best.as_ref().is_none_or(|b| scored.score > b.score) {
            best = Some(scored);
        }
    }

    best.map(|cluster| ClusterSelection {
        cluster,
        num_clusters: clusters.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn chain_is_connected_even_when_ends_are_far_apart() {
        let targets = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let clusters = find_all_clusters(&targets, 1.0);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].len(), 4);
    }

    #[test]
    fn radius_is_inclusive() {
        let targets = pts(&[(0.0, 0.0), (1.5, 0.0)]);
        assert_eq!(find_all_clusters(&targets, 1.5).len(), 1);
        assert_eq!(find_all_clusters(&targets, 1.49).len(), 2);
    }

    #[test]
    fn nearest_cluster_seeds_from_closest_target() {
        let targets = pts(&[(10.0, 0.0), (10.5, 0.0), (1.0, 0.0), (1.2, 0.5)]);
        let cluster = find_nearest_cluster(&targets, &Point::new(0.0, 0.0), 1.5);
        assert_eq!(cluster, pts(&[(1.0, 0.0), (1.2, 0.5)]));
    }

    #[test]
    fn nearest_cluster_of_nothing_is_empty() {
        assert!(find_nearest_cluster(&[], &Point::origin(), 1.5).is_empty());
    }

    #[test]
    fn selection_ties_keep_first_cluster() {
        // Mirror images around the reference score identically.
        let clusters = vec![pts(&[(-2.0, 0.0)]), pts(&[(2.0, 0.0)])];
        let sel = select_best_cluster(&clusters, &Point::origin(), 0.5).unwrap();
        assert_eq!(sel.cluster.points, pts(&[(-2.0, 0.0)]));
        assert_eq!(sel.num_clusters, 2);
    }

    #[test]
    fn bigger_cluster_can_beat_nearer_one() {
        let clusters = vec![
            pts(&[(1.0, 0.0)]),
            pts(&[(3.0, 0.0), (3.5, 0.0), (4.0, 0.0), (4.5, 0.0)]),
        ];
        // 1 / 1.5 = 0.67 versus 4 / 3.5 = 1.14
        let sel = select_best_cluster(&clusters, &Point::origin(), 0.5).unwrap();
        assert_eq!(sel.cluster.size(), 4);
        assert!((sel.cluster.min_distance - 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_partition_has_no_selection() {
        assert!(select_best_cluster(&[], &Point::origin(), 0.5).is_none());
    }
}
