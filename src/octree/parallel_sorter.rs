//! Bitonic sorting network over a power-of-two buffer of `KeyEntry`.
//!
//! Every `(j, k)` step is one rayon pass of independent compare-exchanges and
//! returns before the next step starts. Steps are never fused or reordered.
use rayon::prelude::*;
use crate::models::KeyEntry;
use crate::utils::OctreeError;

/// Lower bound on entries handled by one rayon task in a pass, so the
/// short-distance steps do not split into thousands of two-element jobs.
const MIN_ENTRIES_PER_TASK: usize = 1024;

/// Work done by one run of the network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortStats {
    /// Number of `(j, k)` passes.
    pub steps: usize,
    /// Number of compare-exchange operations over all passes.
    pub compare_exchanges: usize,
}

/// One `(j, k)` pass.
///
/// Index `i` pairs with `i ^ j`. Splitting the buffer into blocks of `2j`, the
/// first half of a block pairs with the second half, and since `k >= 2j` every
/// pair in a block shares the same merge direction (bit `k` of the block start).
fn compare_exchange_pass(entries: &mut [KeyEntry], j: usize, k: usize) {
    let block = 2 * j;
    let min_blocks = (MIN_ENTRIES_PER_TASK / block).max(1);

    entries
        .par_chunks_mut(block)
        .enumerate()
        .with_min_len(min_blocks)
        .for_each(|(b, chunk)| {
            let ascending = (b * block) & k == 0;
            let (lower, upper) = chunk.split_at_mut(j);
            for (a, c) in lower.iter_mut().zip(upper.iter_mut()) {
                let out_of_order = if ascending { *a > *c } else { *a < *c };
                if out_of_order {
                    std::mem::swap(a, c);
                }
            }
        });
}

/// Sorts `entries` ascending by `(key, index)` with a bitonic network.
///
/// Padding entries are maximal and finish at the tail. The number of passes is
/// `log2(n) * (log2(n) + 1) / 2` whatever the keys are.
///
/// # Errors
/// Returns `NotPowerOfTwo` if `entries.len()` is not a power of two.
///
/// # Examples
///
/// ```
/// use rs_nbody::models::KeyEntry;
/// use rs_nbody::octree::bitonic_sort;
///
/// let mut entries = vec![
///     KeyEntry::new(7, 0),
///     KeyEntry::new(0, 1),
///     KeyEntry::new(3, 2),
///     KeyEntry::PADDING,
/// ];
/// let stats = bitonic_sort(&mut entries).unwrap();
///
/// assert_eq!(stats.steps, 3);
/// assert_eq!(entries[0], KeyEntry::new(0, 1));
/// assert_eq!(entries[3], KeyEntry::PADDING);
/// ```
pub fn bitonic_sort(entries: &mut [KeyEntry]) -> Result<SortStats, OctreeError> {
    let n = entries.len();
    let mut stats = SortStats::default();
    if n <= 1 {
        return Ok(stats);
    }
    if !n.is_power_of_two() {
        return Err(OctreeError::NotPowerOfTwo(n));
    }

    let mut k = 2;
    while k <= n {
        let mut j = k / 2;
        while j > 0 {
            compare_exchange_pass(entries, j, k);
            stats.steps += 1;
            stats.compare_exchanges += n / 2;
            j /= 2;
        }
        k *= 2;
    }
    Ok(stats)
}

/// True if keys never decrease and no valid entry follows a padding entry.
pub fn is_sorted_with_padding_last(entries: &[KeyEntry]) -> bool {
    let keys_ordered = entries.windows(2).all(|w| w[0].key <= w[1].key);
    let first_padding = entries.iter().position(|e| !e.is_valid()).unwrap_or(entries.len());
    keys_ordered && entries[first_padding..].iter().all(|e| !e.is_valid())
}
