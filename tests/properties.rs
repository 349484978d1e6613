//! Property-based tests for the scoring primitives and analyzers
//!
//! These tests verify invariants that should hold for all inputs:
//! - normalize maps finite vectors onto [0, 1] with the extremes at 0 and 1
//! - gini_balance ignores input order and stays in [0, 1]
//! - the cascade analyzer is deterministic and keeps roles in [0, 1]

use engagemap::{analyze_cascade, analyze_dynamics, gini_balance, normalize};
use engagemap::{DynamicsRecord, NetworkEdge};
use proptest::prelude::*;

/// Edge list over a small id space so graphs have shared nodes
fn edge_list() -> impl Strategy<Value = Vec<NetworkEdge>> {
    prop::collection::vec((0u8..12, 0u8..12, 1u32..6), 1..30).prop_map(|rows| {
        rows.into_iter()
            .map(|(from, to, layer)| NetworkEdge::new(format!("n{}", from), format!("n{}", to), layer))
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_normalize_spans_unit_interval(values in prop::collection::vec(-1e6f64..1e6, 2..40)) {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assume!(max > min);

        let scaled = normalize(&values);
        prop_assert_eq!(scaled.len(), values.len());
        prop_assert!(scaled.iter().all(|v| (0.0..=1.0).contains(v)));

        for (original, scaled) in values.iter().zip(&scaled) {
            if *original == min {
                prop_assert_eq!(*scaled, 0.0);
            }
            if *original == max {
                prop_assert_eq!(*scaled, 1.0);
            }
        }
    }

    #[test]
    fn prop_normalize_constant_input_is_zero(value in -1e3f64..1e3, len in 1usize..20) {
        prop_assert_eq!(normalize(&vec![value; len]), vec![0.0; len]);
    }

    #[test]
    fn prop_gini_balance_is_bounded(values in prop::collection::vec(-10.0f64..100.0, 0..40)) {
        let balance = gini_balance(&values);
        prop_assert!((0.0..=1.0).contains(&balance));
    }

    #[test]
    fn prop_gini_balance_ignores_order(values in prop::collection::vec(0.0f64..100.0, 1..40)) {
        let mut reversed = values.clone();
        reversed.reverse();
        let mut rotated = values.clone();
        rotated.rotate_left(values.len() / 2);

        let balance = gini_balance(&values);
        prop_assert!((balance - gini_balance(&reversed)).abs() < 1e-9);
        prop_assert!((balance - gini_balance(&rotated)).abs() < 1e-9);
    }

    #[test]
    fn prop_gini_balance_of_equal_values_is_one(value in 0.001f64..1e4, len in 1usize..30) {
        prop_assert!((gini_balance(&vec![value; len]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prop_dynamics_score_is_bounded(
        rows in prop::collection::vec((0u8..4, 0u8..6, 0.01f64..=1.0, 0.01f64..=1.0), 1..25)
    ) {
        let records: Vec<DynamicsRecord> = rows
            .into_iter()
            .map(|(domain, dimension, salience, weight)| {
                DynamicsRecord::new(format!("d{}", domain), format!("x{}", dimension), salience, weight)
            })
            .collect();

        let result = analyze_dynamics(&records).unwrap();
        prop_assert!((0.0..=1.0).contains(&result.dynamics_score));
        prop_assert!(result.domain_table.iter().all(|d| (0.0..=1.0).contains(&d.domain_score)));
    }

    #[test]
    fn prop_cascade_is_deterministic_and_bounded(edges in edge_list()) {
        let first = analyze_cascade(&edges, 0.5).unwrap();
        let second = analyze_cascade(&edges, 0.5).unwrap();

        prop_assert_eq!(&first.node_table, &second.node_table);
        prop_assert_eq!(first.cascade_score, second.cascade_score);
        prop_assert!((0.0..=1.0).contains(&first.cascade_score));
        for node in &first.node_table {
            for score in [node.knitting, node.bridging, node.channeling, node.reaching] {
                prop_assert!((0.0..=1.0).contains(&score));
            }
        }
    }
}
