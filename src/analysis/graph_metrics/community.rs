//! Walktrap community detection
//!
//! Agglomerative clustering driven by short random walks (Pons & Latapy).
//! Each node gets a unit self-loop, walks of `steps` hops define a probability
//! vector per community, and the adjacent pair whose merge least increases the
//! within-community walk distance is merged first. The partition with the
//! highest modularity along the merge sequence is returned.

use std::collections::BTreeSet;

struct Community {
    size: usize,
    probabilities: Vec<f64>,
}

/// Community id (1-based, numbered in node order) for each node.
pub fn walktrap_membership(adjacency: &[Vec<usize>], steps: usize) -> Vec<usize> {
    let n = adjacency.len();
    if n == 0 {
        return Vec::new();
    }

    let degrees: Vec<f64> = adjacency.iter().map(|nbrs| nbrs.len() as f64 + 1.0).collect();
    let edges: Vec<(usize, usize)> = adjacency
        .iter()
        .enumerate()
        .flat_map(|(a, nbrs)| nbrs.iter().filter(move |&&b| a < b).map(move |&b| (a, b)))
        .collect();

    let mut communities: Vec<Option<Community>> = (0..n)
        .map(|node| {
            Some(Community {
                size: 1,
                probabilities: walk_distribution(adjacency, &degrees, node, steps),
            })
        })
        .collect();

    let mut labels: Vec<usize> = (0..n).collect();
    let mut best_labels = labels.clone();
    let mut best_modularity = modularity(&labels, &edges, &degrees);

    loop {
        let candidates: BTreeSet<(usize, usize)> = edges
            .iter()
            .map(|&(a, b)| (labels[a].min(labels[b]), labels[a].max(labels[b])))
            .filter(|(a, b)| a != b)
            .collect();

        let mut chosen: Option<((usize, usize), f64)> = None;
        for &(a, b) in &candidates {
            let (Some(left), Some(right)) = (&communities[a], &communities[b]) else {
                continue;
            };
            let cost = merge_cost(left, right, &degrees, n);
            if chosen.is_none_or(|(_, best)| cost < best) {
                chosen = Some(((a, b), cost));
            }
        }

        let Some(((keep, absorb), _)) = chosen else {
            break;
        };

        let (Some(left), Some(right)) = (communities[keep].take(), communities[absorb].take())
        else {
            break;
        };
        communities[keep] = Some(merge(left, right));
        for label in labels.iter_mut().filter(|label| **label == absorb) {
            *label = keep;
        }

        let q = modularity(&labels, &edges, &degrees);
        if q > best_modularity {
            best_modularity = q;
            best_labels = labels.clone();
        }
    }

    renumber(&best_labels)
}

/// Probability of each node after a random walk of `steps` hops from `start`.
fn walk_distribution(
    adjacency: &[Vec<usize>],
    degrees: &[f64],
    start: usize,
    steps: usize,
) -> Vec<f64> {
    let n = adjacency.len();
    let mut current = vec![0.0; n];
    current[start] = 1.0;

    for _ in 0..steps {
        let mut next = vec![0.0; n];
        for (j, &mass) in current.iter().enumerate() {
            if mass == 0.0 {
                continue;
            }
            let share = mass / degrees[j];
            next[j] += share;
            for &k in &adjacency[j] {
                next[k] += share;
            }
        }
        current = next;
    }

    current
}

fn merge_cost(left: &Community, right: &Community, degrees: &[f64], n: usize) -> f64 {
    let distance: f64 = left
        .probabilities
        .iter()
        .zip(&right.probabilities)
        .zip(degrees)
        .map(|((a, b), d)| (a - b).powi(2) / d)
        .sum();
    let (s1, s2) = (left.size as f64, right.size as f64);
    (s1 * s2 / (s1 + s2)) * distance / n as f64
}

fn merge(left: Community, right: Community) -> Community {
    let size = left.size + right.size;
    let (s1, s2) = (left.size as f64, right.size as f64);
    let probabilities = left
        .probabilities
        .iter()
        .zip(&right.probabilities)
        .map(|(a, b)| (s1 * a + s2 * b) / size as f64)
        .collect();
    Community {
        size,
        probabilities,
    }
}

/// Newman modularity of a labelling on the loop-free graph.
fn modularity(labels: &[usize], edges: &[(usize, usize)], degrees_with_loop: &[f64]) -> f64 {
    let m = edges.len() as f64;
    if m == 0.0 {
        return f64::NAN;
    }

    let n = labels.len();
    let mut internal = vec![0.0; n];
    let mut degree_sum = vec![0.0; n];

    for &(a, b) in edges {
        if labels[a] == labels[b] {
            internal[labels[a]] += 1.0;
        }
    }
    for (node, &label) in labels.iter().enumerate() {
        degree_sum[label] += degrees_with_loop[node] - 1.0;
    }

    internal
        .iter()
        .zip(&degree_sum)
        .map(|(l, d)| l / m - (d / (2.0 * m)).powi(2))
        .sum()
}

fn renumber(labels: &[usize]) -> Vec<usize> {
    let mut mapping: Vec<Option<usize>> = vec![None; labels.len()];
    let mut next = 0;
    labels
        .iter()
        .map(|&label| {
            *mapping[label].get_or_insert_with(|| {
                next += 1;
                next
            })
        })
        .collect()
}
