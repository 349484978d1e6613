//! Whole-network structure measures combined into the topology bonus
//!
//! - global efficiency: mean inverse distance over ordered pairs
//! - connectedness: share of unordered pairs that can reach each other
//! - hierarchy (Krackhardt): share of reachable pairs that are not mutual
//! - least upper boundedness (Krackhardt): share of pairs inside a component
//!   that have a common node reaching both
//!
//! Each is NaN when the network is too small for it to be defined.

use super::network::DistanceMatrix;
use crate::metrics::mean;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopologyMetrics {
    pub efficiency: f64,
    pub connectedness: f64,
    pub hierarchy: f64,
    pub lub: f64,
    /// `weight` times the mean of the finite terms
    /// (efficiency, connectedness, 1 - hierarchy, 1 - lub)
    pub score: f64,
}

impl TopologyMetrics {
    pub fn compute(distances: &DistanceMatrix, components: &[usize], weight: f64) -> Self {
        let efficiency = global_efficiency(distances);
        let connectedness = connectedness(distances);
        let hierarchy = hierarchy(distances);
        let lub = lub(distances, components);

        let terms: Vec<f64> = [efficiency, connectedness, 1.0 - hierarchy, 1.0 - lub]
            .into_iter()
            .filter(|v| v.is_finite())
            .collect();
        let average = mean(&terms);
        let score = if average.is_nan() { 0.0 } else { weight * average };

        Self {
            efficiency,
            connectedness,
            hierarchy,
            lub,
            score,
        }
    }
}

fn reaches(distances: &DistanceMatrix, from: usize, to: usize) -> bool {
    distances[from][to].is_some()
}

pub fn global_efficiency(distances: &DistanceMatrix) -> f64 {
    let n = distances.len();
    if n < 2 {
        return f64::NAN;
    }

    let total: f64 = distances
        .iter()
        .flat_map(|row| row.iter().flatten())
        .filter(|&&d| d > 0)
        .map(|&d| 1.0 / d as f64)
        .sum();

    total / (n * (n - 1)) as f64
}

pub fn connectedness(distances: &DistanceMatrix) -> f64 {
    let n = distances.len();
    if n < 2 {
        return f64::NAN;
    }

    let mut connected = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if reaches(distances, i, j) || reaches(distances, j, i) {
                connected += 1;
            }
        }
    }

    connected as f64 / (n * (n - 1) / 2) as f64
}

pub fn hierarchy(distances: &DistanceMatrix) -> f64 {
    let n = distances.len();
    let mut reachable = 0usize;
    let mut mutual = 0usize;

    for i in 0..n {
        for j in 0..n {
            if i != j && reaches(distances, i, j) {
                reachable += 1;
                if reaches(distances, j, i) {
                    mutual += 1;
                }
            }
        }
    }

    if reachable == 0 {
        return f64::NAN;
    }
    1.0 - mutual as f64 / reachable as f64
}

pub fn lub(distances: &DistanceMatrix, components: &[usize]) -> f64 {
    let n = distances.len();

    let mut sizes = vec![0usize; n];
    for &component in components {
        sizes[component] += 1;
    }
    let max_violations: usize = sizes
        .iter()
        .filter(|&&s| s >= 3)
        .map(|&s| (s - 1) * (s - 2) / 2)
        .sum();
    if max_violations == 0 {
        return f64::NAN;
    }

    let mut violations = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if components[i] != components[j] {
                continue;
            }
            let bounded = (0..n).any(|k| reaches(distances, k, i) && reaches(distances, k, j));
            if !bounded {
                violations += 1;
            }
        }
    }

    1.0 - violations as f64 / max_violations as f64
}
