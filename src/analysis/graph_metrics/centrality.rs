//! Centrality measures over a [`Network`]
//!
//! Every function returns one value per node position. Measures that can fail
//! for a particular topology return [`CentralityError`] so the caller can
//! substitute its fallback.

use super::network::{DistanceMatrix, Network};
use std::collections::VecDeque;
use thiserror::Error;

const EIGEN_TOLERANCE: f64 = 1e-10;
const EIGEN_MAX_ITERATIONS: usize = 10_000;
const PIVOT_EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CentralityError {
    #[error("power iteration did not converge after {iterations} iterations")]
    NotConverged { iterations: usize },

    #[error("linear system is singular")]
    Singular,

    #[error("solution contains non-finite values")]
    NonFinite,
}

/// Betweenness centrality normalized by (n - 1)(n - 2) / 2.
///
/// Uses Brandes' accumulation over breadth-first shortest paths. With two
/// or fewer nodes the normalization is undefined and every entry is NaN.
pub fn betweenness_centrality(network: &Network) -> Vec<f64> {
    let adjacency = network.adjacency();
    let n = adjacency.len();
    let mut betweenness = vec![0.0; n];

    for source in 0..n {
        let mut distance: Vec<Option<usize>> = vec![None; n];
        let mut sigma = vec![0.0; n];
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut order = Vec::with_capacity(n);
        let mut queue = VecDeque::new();

        distance[source] = Some(0);
        sigma[source] = 1.0;
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            order.push(v);
            let d_v = distance[v].unwrap_or(0);
            for &w in &adjacency[v] {
                if distance[w].is_none() {
                    distance[w] = Some(d_v + 1);
                    queue.push_back(w);
                }
                if distance[w] == Some(d_v + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut delta = vec![0.0; n];
        for &w in order.iter().rev() {
            for &v in &predecessors[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                betweenness[w] += delta[w];
            }
        }
    }

    // Each unordered pair was visited from both ends
    let pairs = (n as f64 - 1.0) * (n as f64 - 2.0) / 2.0;
    betweenness
        .into_iter()
        .map(|b| if pairs > 0.0 { b / 2.0 / pairs } else { f64::NAN })
        .collect()
}

/// Sum of inverse distances to every reachable node.
pub fn harmonic_centrality(distances: &DistanceMatrix) -> Vec<f64> {
    distances
        .iter()
        .map(|row| {
            row.iter()
                .flatten()
                .filter(|&&d| d > 0)
                .map(|&d| 1.0 / d as f64)
                .sum()
        })
        .collect()
}

/// Leading eigenvector of the adjacency matrix, scaled so the maximum is 1.
///
/// Power iteration runs on A + I so bipartite graphs do not oscillate; the
/// shift leaves the eigenvectors unchanged. An edgeless graph scores 1
/// everywhere.
pub fn eigenvector_centrality(network: &Network) -> Result<Vec<f64>, CentralityError> {
    let adjacency = network.adjacency();
    let n = adjacency.len();
    if network.edge_count() == 0 {
        return Ok(vec![1.0; n]);
    }

    let mut x: Vec<f64> = adjacency.iter().map(|nbrs| nbrs.len() as f64 + 1.0).collect();
    scale_to_max(&mut x);

    for _ in 0..EIGEN_MAX_ITERATIONS {
        let mut next: Vec<f64> = adjacency
            .iter()
            .enumerate()
            .map(|(i, nbrs)| x[i] + nbrs.iter().map(|&j| x[j]).sum::<f64>())
            .collect();
        scale_to_max(&mut next);

        let change = next
            .iter()
            .zip(&x)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        x = next;

        if change < EIGEN_TOLERANCE {
            return Ok(x);
        }
    }

    Err(CentralityError::NotConverged {
        iterations: EIGEN_MAX_ITERATIONS,
    })
}

fn scale_to_max(values: &mut [f64]) {
    let max = values.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        values.iter_mut().for_each(|v| *v /= max);
    }
}

/// Alpha centrality: the solution of (I - alpha * A^T) x = 1.
pub fn alpha_centrality(network: &Network, alpha: f64) -> Result<Vec<f64>, CentralityError> {
    let n = network.node_count();
    let mut matrix = vec![vec![0.0; n]; n];
    for (i, row) in matrix.iter_mut().enumerate() {
        row[i] = 1.0;
    }
    // Undirected: A is symmetric, so A^T = A
    for (a, b) in network.edge_pairs() {
        matrix[a][b] -= alpha;
        matrix[b][a] -= alpha;
    }

    let solution = solve_linear_system(matrix, vec![1.0; n])?;
    if solution.iter().all(|v| v.is_finite()) {
        Ok(solution)
    } else {
        Err(CentralityError::NonFinite)
    }
}

/// Gaussian elimination with partial pivoting.
fn solve_linear_system(
    mut matrix: Vec<Vec<f64>>,
    mut rhs: Vec<f64>,
) -> Result<Vec<f64>, CentralityError> {
    let n = rhs.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&a, &b| matrix[a][col].abs().total_cmp(&matrix[b][col].abs()))
            .ok_or(CentralityError::Singular)?;
        if matrix[pivot][col].abs() < PIVOT_EPSILON {
            return Err(CentralityError::Singular);
        }
        matrix.swap(col, pivot);
        rhs.swap(col, pivot);

        for row in (col + 1)..n {
            let factor = matrix[row][col] / matrix[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                matrix[row][k] -= factor * matrix[col][k];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| matrix[row][k] * solution[k]).sum();
        solution[row] = (rhs[row] - tail) / matrix[row][row];
    }

    Ok(solution)
}
