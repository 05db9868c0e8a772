//! Keyed children reconciliation ("fast diff")
//!
//! Transforms the host children of one container from an old keyed sibling
//! sequence into a new one with as few mounts, unmounts and moves as
//! possible. Host objects of nodes whose keys appear on both sides are
//! always reused.
//!
//! # Algorithm
//!
//! 1. Patch the common prefix (same keys at the same leading positions)
//! 2. Patch the common suffix, walking both ends with independent cursors
//! 3. If only new nodes remain, mount them; if only old nodes remain,
//!    unmount them
//! 4. Otherwise:
//!    - index the remaining new nodes by key
//!    - walk the remaining old nodes once: unmount the unmatched, patch the
//!      matched and record `new slot -> old index`
//!    - if matched nodes were met out of order, keep the longest increasing
//!      run of old indices in place and move everything else; new nodes are
//!      mounted in the same right-to-left sweep so every anchor is already
//!      in its final position when it is used
//!
//! # Complexity
//!
//! - Time: O(n + m log m) over the unresolved middle segment
//! - Space: O(m)
//!
//! Unkeyed siblings compare equal (`None == None`), so an all-unkeyed
//! sequence is patched positionally by the prefix pass.

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::host::Host;
use crate::node::{Key, Node};
use crate::patch::Patcher;

use super::lis::longest_increasing_subsequence;

impl<H: Host> Patcher<'_, H> {
    /// Reconcile `old` into `new` under `container`.
    ///
    /// `tail` is the host object following this sequence in the container,
    /// if the sequence does not run to the container's end.
    pub(crate) fn patch_keyed_children(
        &mut self,
        old: &[Node<H::Handle>],
        new: &mut [Node<H::Handle>],
        container: &H::Handle,
        tail: Option<&H::Handle>,
    ) {
        // 1. Common prefix
        let mut start = 0;
        while start < old.len() && start < new.len() && old[start].key == new[start].key {
            // later old siblings are untouched and still in place
            self.patch_in_place(&old[start], &mut new[start], container, || {
                anchor_from(old, start + 1).or_else(|| tail.cloned())
            });
            start += 1;
        }

        // 2. Common suffix
        let mut old_end = old.len();
        let mut new_end = new.len();
        while old_end > start && new_end > start && old[old_end - 1].key == new[new_end - 1].key {
            // the patched suffix new[new_end..] is already final
            let (head, done) = new.split_at_mut(new_end);
            self.patch_in_place(&old[old_end - 1], &mut head[new_end - 1], container, || {
                anchor_from(done, 0).or_else(|| tail.cloned())
            });
            old_end -= 1;
            new_end -= 1;
        }

        tracing::trace!(
            prefix = start,
            suffix = old.len() - old_end,
            old_left = old_end - start,
            new_left = new_end - start,
            "trimmed common ends"
        );

        // 3. Pure insertion / pure removal
        if start == old_end {
            if start < new_end {
                let anchor = anchor_from(new, new_end).or_else(|| tail.cloned());
                for node in &mut new[start..new_end] {
                    self.mount(node, container, anchor.as_ref());
                }
            }
            return;
        }
        if start == new_end {
            for node in &old[start..old_end] {
                self.unmount(node);
            }
            return;
        }

        // 4. General case
        self.patch_unknown_sequence(old, start..old_end, new, start..new_end, container, tail);
    }

    fn patch_unknown_sequence(
        &mut self,
        old: &[Node<H::Handle>],
        old_range: Range<usize>,
        new: &mut [Node<H::Handle>],
        new_range: Range<usize>,
        container: &H::Handle,
        tail: Option<&H::Handle>,
    ) {
        let new_start = new_range.start;
        let new_end = new_range.end;
        let old_end = old_range.end;
        let count = new_range.len();

        // Later duplicates win; the shadowed node is mounted fresh.
        let mut key_index: FxHashMap<Key, usize> = FxHashMap::default();
        for (i, node) in new[new_range].iter().enumerate() {
            let Some(key) = &node.key else { continue };
            if key_index.insert(key.clone(), new_start + i).is_some() {
                tracing::warn!(%key, "duplicate key among new siblings, mounting the earlier node fresh");
            }
        }

        // new slot -> old index
        let mut source: Vec<Option<usize>> = vec![None; count];
        let mut moved = false;
        let mut max_seen = 0;
        let mut patched = 0;

        for i in old_range {
            let old_node = &old[i];

            // Every new slot is taken: whatever is left cannot match.
            if patched == count {
                self.unmount(old_node);
                continue;
            }

            let Some(k) = old_node.key.as_ref().and_then(|key| key_index.get(key)).copied() else {
                self.unmount(old_node);
                continue;
            };

            let slot = k - new_start;
            if source[slot].is_some() {
                tracing::warn!(key = ?old_node.key, "duplicate key among old siblings, unmounting the extra node");
                self.unmount(old_node);
                continue;
            }

            // old[i + 1..old_end] is unprocessed; past it only the new suffix is final
            let (head, done) = new.split_at_mut(new_end);
            self.patch_in_place(old_node, &mut head[k], container, || {
                anchor_from(&old[..old_end], i + 1)
                    .or_else(|| anchor_from(done, 0))
                    .or_else(|| tail.cloned())
            });
            patched += 1;
            source[slot] = Some(i);

            if k < max_seen {
                moved = true;
            } else {
                max_seen = k;
            }
        }

        let stable = if moved {
            longest_increasing_subsequence(&source)
        } else {
            Vec::new()
        };
        tracing::trace!(count, patched, moved, stable = stable.len(), "keyed middle segment");

        let mut stable = stable.iter().rev().peekable();
        for i in (0..count).rev() {
            let at = new_start + i;
            match source[i] {
                None => {
                    let anchor = anchor_from(new, at + 1).or_else(|| tail.cloned());
                    self.mount(&mut new[at], container, anchor.as_ref());
                }
                Some(_) if !moved => {}
                Some(_) if stable.next_if_eq(&&i).is_some() => {}
                Some(_) => {
                    let anchor = anchor_from(new, at + 1).or_else(|| tail.cloned());
                    self.move_node(&new[at], container, anchor.as_ref());
                    self.stats.moved += 1;
                }
            }
        }
    }

    /// Patch `old` into `new` at the old node's current position.
    ///
    /// A node with its own host object marks that position itself; anything
    /// else (an empty fragment) is anchored on `successor`, the first live
    /// host object after it.
    fn patch_in_place(
        &mut self,
        old: &Node<H::Handle>,
        new: &mut Node<H::Handle>,
        container: &H::Handle,
        successor: impl FnOnce() -> Option<H::Handle>,
    ) {
        let anchor = if old.is_mounted() { None } else { successor() };
        self.patch(Some(old), new, container, anchor.as_ref());
    }
}

/// First host handle at or after `start`, skipping nodes without one
/// (empty fragments).
fn anchor_from<H: Clone>(nodes: &[Node<H>], start: usize) -> Option<H> {
    nodes.get(start..)?.iter().find_map(Node::first_handle)
}
