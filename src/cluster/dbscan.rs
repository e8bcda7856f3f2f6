//! Default density-clustering implementation (DBSCAN)

use ndarray::{ArrayView1, ArrayView2};

use crate::cluster::EmbeddingClusterer;
use crate::error::{Error, Result};

/// DBSCAN over embedding rows with Euclidean distance.
///
/// A row is a core point when at least `min_points` other rows lie within
/// `epsilon`. Border rows join the first cluster whose expansion reaches
/// them; everything else is noise. Labels are contiguous from 0 in
/// discovery order, so output is deterministic for identical input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dbscan;

fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// Indices of all rows within epsilon of `row`, excluding `row` itself
fn region_query(points: ArrayView2<'_, f64>, row: usize, epsilon_sq: f64) -> Vec<usize> {
    let target = points.row(row);
    (0..points.nrows())
        .filter(|&other| {
            other != row && squared_distance(target, points.row(other)) <= epsilon_sq
        })
        .collect()
}

impl EmbeddingClusterer for Dbscan {
    fn cluster(
        &self,
        points: ArrayView2<'_, f64>,
        epsilon: f64,
        min_points: usize,
    ) -> Result<Vec<Option<usize>>> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "epsilon must be positive, got {epsilon}"
            )));
        }
        if min_points == 0 {
            return Err(Error::InvalidParameter(
                "min_points must be at least 1".to_string(),
            ));
        }

        let n = points.nrows();
        let epsilon_sq = epsilon * epsilon;
        let mut labels: Vec<Option<usize>> = vec![None; n];
        let mut visited = vec![false; n];
        let mut next_cluster = 0usize;

        for row in 0..n {
            if visited[row] {
                continue;
            }
            visited[row] = true;

            let neighbors = region_query(points, row, epsilon_sq);
            if neighbors.len() < min_points {
                continue; // noise for now; may become a border point later
            }

            // Core point: start a cluster and expand through the queue
            let cluster_id = next_cluster;
            next_cluster += 1;
            labels[row] = Some(cluster_id);

            let mut queue = neighbors;
            while let Some(candidate) = queue.pop() {
                if labels[candidate].is_none() {
                    labels[candidate] = Some(cluster_id);
                }
                if visited[candidate] {
                    continue;
                }
                visited[candidate] = true;

                let candidate_neighbors = region_query(points, candidate, epsilon_sq);
                if candidate_neighbors.len() >= min_points {
                    for neighbor in candidate_neighbors {
                        if !visited[neighbor] || labels[neighbor].is_none() {
                            queue.push(neighbor);
                        }
                    }
                }
            }
        }

        Ok(labels)
    }
}
