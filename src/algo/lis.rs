//! Longest Increasing Subsequence
//!
//! Used by the keyed reconciler to decide which matched nodes can stay where
//! they are. The input is the position mapping of the unresolved middle
//! segment: for each new-sequence slot, the old index of the node that
//! matched it, or `None` for a brand-new node.
//!
//! # Algorithm
//!
//! Patience sorting over slot indices:
//! - `tails[l]` holds the slot whose value ends the smallest-valued
//!   increasing run of length `l + 1` seen so far
//! - each new value binary-searches `tails`, extends or replaces in place,
//!   and records the slot before it as its predecessor
//! - after the scan, predecessors are followed back from the last tail
//!
//! # Complexity
//!
//! - Time: O(n log n)
//! - Space: O(n)

/// Slot indices of one longest strictly-increasing subsequence of `values`.
///
/// `None` entries never take part. The result is in ascending slot order and
/// refers to positions in `values`, not to the values themselves.
pub fn longest_increasing_subsequence(values: &[Option<usize>]) -> Vec<usize> {
    let mut predecessors: Vec<Option<usize>> = vec![None; values.len()];
    // (slot, value) ending each run length
    let mut tails: Vec<(usize, usize)> = Vec::new();

    for (slot, value) in values.iter().enumerate() {
        let Some(value) = *value else { continue };

        let len = tails.partition_point(|&(_, tail)| tail < value);
        if len > 0 {
            predecessors[slot] = Some(tails[len - 1].0);
        }
        if len == tails.len() {
            tails.push((slot, value));
        } else {
            tails[len] = (slot, value);
        }
    }

    let mut sequence = Vec::with_capacity(tails.len());
    let mut cursor = tails.last().map(|&(slot, _)| slot);
    while let Some(slot) = cursor {
        sequence.push(slot);
        cursor = predecessors[slot];
    }
    sequence.reverse();
    sequence
}
