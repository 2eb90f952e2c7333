/// Length of a sort buffer holding `n` valid entries: the next power of two, at least 1.
#[inline]
pub fn padded_len(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Number of groups of `group_size` needed to cover `n` items.
#[inline]
pub fn group_count(n: usize, group_size: usize) -> usize {
    if group_size == 0 { 0 } else { n.div_ceil(group_size) }
}

/// Number of compare-exchange passes a bitonic network runs on `n` (power of two) entries:
/// `log2(n) * (log2(n) + 1) / 2`.
#[inline]
pub fn bitonic_step_count(n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let log = n.trailing_zeros() as usize;
    log * (log + 1) / 2
}
