//! Property-based tests for ordering keys and progress
//!
//! Uses proptest to verify properties that should hold for all inputs.

use std::collections::BTreeSet;

use proptest::prelude::*;
use sprintboard::core::models::OrderKey;
use sprintboard::core::services::ordering::is_normalized;
use sprintboard::core::services::{
    compute_insertion_index, compute_progress, needs_normalization, normalize, plan_spaced_keys,
};

fn key(v: f64) -> OrderKey {
    OrderKey::new(v).unwrap()
}

proptest! {
    /// The midpoint lies strictly between its neighbours
    #[test]
    fn insertion_is_strictly_between(a in -1.0e9..1.0e9_f64, gap in 1.0e-3..1.0e6_f64) {
        let (prev, next) = (key(a), key(a + gap));
        let mid = compute_insertion_index(Some(prev), Some(next)).unwrap();
        prop_assert!(prev < mid && mid < next);
    }

    /// Tail insertion lands after the last key
    #[test]
    fn tail_insertion_is_after(prev in -1.0e12..1.0e12_f64) {
        let k = compute_insertion_index(Some(key(prev)), None).unwrap();
        prop_assert!(k > key(prev));
    }

    /// Head insertion before a positive key lands before it and stays positive
    #[test]
    fn head_insertion_is_before(next in 1.0e-6..1.0e12_f64) {
        let k = compute_insertion_index(None, Some(key(next))).unwrap();
        prop_assert!(k < key(next));
        prop_assert!(k.value() > 0.0);
    }

    /// Either there is room for a key, or the caller is told to normalize
    #[test]
    fn insertion_never_returns_a_colliding_key(a in 0.0..1.0e3_f64, ulps in 1_u64..4) {
        let prev = key(a);
        let next = key(f64::from_bits(a.to_bits() + ulps));
        match compute_insertion_index(Some(prev), Some(next)) {
            Ok(mid) => prop_assert!(prev < mid && mid < next),
            Err(_) => prop_assert!(needs_normalization(Some(prev), Some(next))),
        }
    }

    /// Spaced keys are strictly increasing and normalization collapses them to 1..=n
    #[test]
    fn bulk_reorder_plan_then_normalize(ids in prop::collection::btree_set(0_u32..10_000, 1..50)) {
        let ids: Vec<u32> = ids.into_iter().collect();
        let plan = plan_spaced_keys(&ids).unwrap();
        prop_assert!(plan.windows(2).all(|w| w[0].1 < w[1].1));

        let normalized = normalize(&ids);
        let keys: Vec<OrderKey> = normalized.iter().map(|(_, k)| *k).collect();
        prop_assert!(is_normalized(&keys));
        let order: Vec<u32> = normalized.iter().map(|(id, _)| *id).collect();
        prop_assert_eq!(order, ids);
    }

    /// Head insert, normalize, head insert again never collides
    #[test]
    fn head_insert_after_normalize_never_collides(n in 1_usize..40, inserts in 1_usize..80) {
        let mut keys: Vec<OrderKey> = (0..n).map(OrderKey::from_position).collect();
        for _ in 0..inserts {
            let head = keys[0];
            if needs_normalization(None, Some(head)) {
                let positions: Vec<usize> = (0..keys.len()).collect();
                keys = normalize(&positions).into_iter().map(|(_, k)| k).collect();
                prop_assert!(is_normalized(&keys));
            }
            let new_head = compute_insertion_index(None, Some(keys[0])).unwrap();
            prop_assert!(!keys.contains(&new_head));
            keys.insert(0, new_head);
        }
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    /// Progress is always a percentage matching the set sizes
    #[test]
    fn progress_is_a_percentage(open in prop::collection::btree_set(0_u32..500, 0..40),
                                done in prop::collection::btree_set(500_u32..1000, 0..40)) {
        let p = compute_progress(&open, &done);
        prop_assert!((0.0..=100.0).contains(&p));
        let total = open.len() + done.len();
        if total == 0 {
            prop_assert!(p.abs() < f64::EPSILON);
        } else {
            #[allow(clippy::cast_precision_loss)]
            let expected = 100.0 * done.len() as f64 / total as f64;
            prop_assert!((p - expected).abs() < 1e-9);
        }
    }
}

#[test]
fn test_progress_examples() {
    let empty: BTreeSet<u32> = BTreeSet::new();
    let two: BTreeSet<u32> = [1, 2].into_iter().collect();
    assert!(compute_progress(&empty, &empty).abs() < f64::EPSILON);
    assert!(compute_progress(&two, &empty).abs() < f64::EPSILON);
    assert!((compute_progress(&empty, &two) - 100.0).abs() < f64::EPSILON);

    let one: BTreeSet<u32> = [1].into_iter().collect();
    let other_two: BTreeSet<u32> = [2, 3].into_iter().collect();
    assert!((compute_progress(&one, &other_two) - 200.0 / 3.0).abs() < 1e-9);
}
