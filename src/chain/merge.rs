//! # Chain Merging
//!
//! Generalized merge of several totally ordered chains into one sequence
//! that holds every distinct element once and preserves each chain's
//! relative order.
//!
//! ## Algorithm
//!
//! One cursor per chain and one *active* chain, starting at the first:
//!
//! 1. Take the head of the active chain.
//! 2. If it sits below the head of any other chain, it is blocked: move
//!    the active pointer to the next live chain (wrapping) and retry.
//! 3. Otherwise emit it and advance every chain whose head it is. The
//!    active chain stays active.
//!
//! Exhausted chains are skipped. If every live chain is examined once in
//! a row without an emission, no order satisfies all chains and the merge
//! fails with the remaining elements of each live chain.
//!
//! ```text
//! [D, B, R]      D  B  .  .  R
//! [E, C, R]  ->  .  .  E  C  R   =>  [D, B, E, C, R]
//! ```

use std::fmt;

use thiserror::Error;
use tracing::{trace, warn};

/// No chain can advance without breaking another chain's order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("merge stalled with {} blocked chain(s)", .blocked.len())]
pub struct MergeError<T: fmt::Debug> {
    /// `(chain index, unconsumed elements head first)` for each live chain.
    pub blocked: Vec<(usize, Vec<T>)>,
}

/// Merge `chains` in caller order. See the module docs for the rules.
///
/// Chains must be duplicate-free. On failure nothing of the partial merge
/// is returned.
pub fn merge_chains<T, C>(chains: &[C]) -> Result<Vec<T>, MergeError<T>>
where
    T: Copy + Eq + fmt::Debug,
    C: AsRef<[T]>,
{
    let chains: Vec<&[T]> = chains.iter().map(AsRef::as_ref).collect();
    let count = chains.len();
    let mut cursors = vec![0usize; count];
    let mut merged = Vec::with_capacity(chains.iter().map(|c| c.len()).sum());
    let mut active = 0;
    let mut stalled = 0;

    loop {
        let live = (0..count).filter(|&i| cursors[i] < chains[i].len()).count();
        if live == 0 {
            break;
        }

        let Some(&head) = chains[active].get(cursors[active]) else {
            active = (active + 1) % count;
            continue;
        };

        let blocker = (0..count).find(|&i| {
            i != active
                && chains[i]
                    .get(cursors[i] + 1..)
                    .is_some_and(|tail| tail.contains(&head))
        });

        if let Some(blocker) = blocker {
            stalled += 1;
            trace!(?head, chain = active, blocker, stalled, live, "merge head blocked");
            if stalled >= live {
                let blocked: Vec<_> = (0..count)
                    .filter(|&i| cursors[i] < chains[i].len())
                    .map(|i| (i, chains[i][cursors[i]..].to_vec()))
                    .collect();
                warn!(blocked = blocked.len(), "merge made no progress over a full pass");
                return Err(MergeError { blocked });
            }
            active = (active + 1) % count;
            continue;
        }

        for (i, chain) in chains.iter().enumerate() {
            if chain.get(cursors[i]) == Some(&head) {
                cursors[i] += 1;
            }
        }
        trace!(?head, chain = active, "merge emitted");
        merged.push(head);
        stalled = 0;
    }

    Ok(merged)
}

/// Lookup order over `chains`, each given most-derived first.
///
/// Every chain keeps its own order, and where no chain orders two
/// elements the one from the later chain comes first. The chains are
/// merged root first in caller order and the result is read from the
/// tail. On failure the blocked remainders are listed root first.
pub fn precedence_order<T, C>(chains: &[C]) -> Result<Vec<T>, MergeError<T>>
where
    T: Copy + Eq + fmt::Debug,
    C: AsRef<[T]>,
{
    let root_first: Vec<Vec<T>> = chains
        .iter()
        .map(|chain| chain.as_ref().iter().rev().copied().collect())
        .collect();
    let mut order = merge_chains(&root_first)?;
    order.reverse();
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_chain_is_unchanged() {
        let merged = merge_chains(&[vec![3, 2, 1]]).unwrap();
        assert_eq!(merged, vec![3, 2, 1]);
    }

    #[test]
    fn test_disjoint_chains_concatenate_in_input_order() {
        let merged = merge_chains(&[vec![1, 2], vec![3, 4]]).unwrap();
        assert_eq!(merged, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_shared_root_is_deferred_until_last() {
        // D -> B -> R and E -> C -> R
        let merged = merge_chains(&[vec!['D', 'B', 'R'], vec!['E', 'C', 'R']]).unwrap();
        assert_eq!(merged, vec!['D', 'B', 'E', 'C', 'R']);
    }

    #[test]
    fn test_identical_chains_collapse() {
        let merged = merge_chains(&[vec![1, 2, 3], vec![1, 2, 3]]).unwrap();
        assert_eq!(merged, vec![1, 2, 3]);
    }

    #[test]
    fn test_diamond() {
        // Left and Right both derive from Base.
        let merged = merge_chains(&[vec!["Left", "Base"], vec!["Right", "Base"]]).unwrap();
        assert_eq!(merged, vec!["Left", "Right", "Base"]);
    }

    #[test]
    fn test_blocked_head_waits_for_other_chain() {
        // Chain 0's head appears deeper in chain 1, so chain 1 goes first.
        let merged = merge_chains(&[vec![2, 3], vec![1, 2, 3]]).unwrap();
        assert_eq!(merged, vec![1, 2, 3]);
    }

    #[test]
    fn test_contradictory_orders_fail() {
        let err = merge_chains(&[vec!['X', 'Y'], vec!['Y', 'X']]).unwrap_err();
        assert_eq!(err.blocked, vec![(0, vec!['X', 'Y']), (1, vec!['Y', 'X'])]);
    }

    #[test]
    fn test_conflict_reports_only_live_chains() {
        let err = merge_chains(&[vec![9], vec![1, 2], vec![2, 1]]).unwrap_err();
        assert_eq!(err.blocked, vec![(1, vec![1, 2]), (2, vec![2, 1])]);
    }

    #[test]
    fn test_empty_inputs() {
        let none: Vec<Vec<u8>> = Vec::new();
        assert!(merge_chains(&none).unwrap().is_empty());
        assert!(merge_chains(&[Vec::<u8>::new(), Vec::new()]).unwrap().is_empty());
    }

    #[test]
    fn test_precedence_prefers_later_chains() {
        let order = precedence_order(&[vec!['A'], vec!['B']]).unwrap();
        assert_eq!(order, vec!['B', 'A']);
    }

    #[test]
    fn test_precedence_diamond() {
        let order = precedence_order(&[vec!["Left", "Base"], vec!["Right", "Base"]]).unwrap();
        assert_eq!(order, vec!["Right", "Left", "Base"]);
    }

    #[test]
    fn test_precedence_keeps_derived_before_base() {
        // The later chain is the base alone; the derived level still wins.
        let order = precedence_order(&[vec!['D', 'B'], vec!['B']]).unwrap();
        assert_eq!(order, vec!['D', 'B']);
    }

    #[test]
    fn test_precedence_contradictory_orders_fail() {
        assert!(precedence_order(&[vec!['X', 'Y'], vec!['Y', 'X']]).is_err());
    }

    /// Chains drawn as ordered subsequences of one global order, so a
    /// valid merge always exists.
    fn compatible_chains() -> impl Strategy<Value = Vec<Vec<u8>>> {
        proptest::collection::vec(proptest::collection::btree_set(0u8..24, 0..8), 1..5).prop_map(|sets| {
            sets.into_iter()
                .map(|set| set.into_iter().rev().collect::<Vec<u8>>())
                .collect::<Vec<_>>()
        })
    }

    proptest! {
        #[test]
        fn test_merge_keeps_every_level_once(chains in compatible_chains()) {
            let merged = merge_chains(&chains).unwrap();
            let mut expected: Vec<u8> = chains.iter().flatten().copied().collect();
            expected.sort_unstable();
            expected.dedup();
            let mut got = merged.clone();
            got.sort_unstable();
            let before = got.len();
            got.dedup();
            prop_assert_eq!(before, got.len());
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn test_merge_preserves_each_chain_order(chains in compatible_chains()) {
            let merged = merge_chains(&chains).unwrap();
            let position = |x: &u8| merged.iter().position(|m| m == x).unwrap();
            for chain in &chains {
                for pair in chain.windows(2) {
                    prop_assert!(position(&pair[0]) < position(&pair[1]));
                }
            }
        }

        #[test]
        fn test_precedence_preserves_each_chain_order(chains in compatible_chains()) {
            let order = precedence_order(&chains).unwrap();
            let position = |x: &u8| order.iter().position(|m| m == x).unwrap();
            for chain in &chains {
                for pair in chain.windows(2) {
                    prop_assert!(position(&pair[0]) < position(&pair[1]));
                }
            }
        }

        #[test]
        fn test_merge_is_deterministic(chains in compatible_chains()) {
            prop_assert_eq!(merge_chains(&chains).unwrap(), merge_chains(&chains).unwrap());
        }
    }
}
