//! Reconciliation algorithms.
//!
//! - `lis`: longest increasing subsequence over the position mapping
//! - `keyed`: keyed children reconciliation (prefix/suffix trim, key
//!   matching, minimal moves)

mod keyed;
mod lis;

pub use lis::longest_increasing_subsequence;
