//! Local cohesion measures: clustering coefficient and structural constraint
//!
//! Both are undefined for some nodes (NaN), and callers decide how to treat
//! those entries.

/// Local clustering coefficient for each node.
///
/// C = (edges among neighbors) / (k * (k - 1) / 2). Nodes with fewer than two
/// neighbors have no defined coefficient and get NaN.
pub fn local_clustering(adjacency: &[Vec<usize>]) -> Vec<f64> {
    adjacency
        .iter()
        .map(|neighbors| {
            let k = neighbors.len();
            if k < 2 {
                return f64::NAN;
            }

            let mut links = 0usize;
            for (i, &a) in neighbors.iter().enumerate() {
                for &b in &neighbors[i + 1..] {
                    if adjacency[a].binary_search(&b).is_ok() {
                        links += 1;
                    }
                }
            }

            links as f64 / (k * (k - 1) / 2) as f64
        })
        .collect()
}

/// Burt's structural constraint for each node.
///
/// With proportional tie strength p_ij = 1 / deg(i) for neighbors,
///
/// ```text
/// C_i = sum over neighbors j of (p_ij + sum over neighbors q != j of p_iq * p_qj)^2
/// ```
///
/// Low constraint means the node spans otherwise unconnected contacts.
/// Isolated nodes get NaN. Neighbor lists must be sorted.
pub fn structural_constraint(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let strength = |from: usize, to: usize| -> f64 {
        let neighbors = &adjacency[from];
        if neighbors.binary_search(&to).is_ok() {
            1.0 / neighbors.len() as f64
        } else {
            0.0
        }
    };

    adjacency
        .iter()
        .enumerate()
        .map(|(i, neighbors)| {
            if neighbors.is_empty() {
                return f64::NAN;
            }

            neighbors
                .iter()
                .map(|&j| {
                    let indirect: f64 = neighbors
                        .iter()
                        .filter(|&&q| q != j)
                        .map(|&q| strength(i, q) * strength(q, j))
                        .sum();
                    (strength(i, j) + indirect).powi(2)
                })
                .sum()
        })
        .collect()
}
