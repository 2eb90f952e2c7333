/// A spatial key paired with the index of the particle it was computed from.
///
/// Entries order by `(key, index)`. The padding entry is maximal on both fields,
/// so it always sorts after every valid entry.
///
/// # Examples
///
/// ```
/// use rs_nbody::models::KeyEntry;
///
/// let a = KeyEntry::new(7, 3);
/// let b = KeyEntry::new(7, 1);
///
/// assert!(b < a);
/// assert!(a < KeyEntry::PADDING);
/// assert!(!KeyEntry::PADDING.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyEntry {
    pub key: u64,
    pub index: u32,
}

impl KeyEntry {
    pub const SENTINEL_KEY: u64 = u64::MAX;
    pub const INVALID_INDEX: u32 = u32::MAX;

    /// Fills the tail of a padded sort buffer.
    pub const PADDING: KeyEntry = KeyEntry {
        key: Self::SENTINEL_KEY,
        index: Self::INVALID_INDEX,
    };

    pub const fn new(key: u64, index: u32) -> Self {
        Self { key, index }
    }

    /// False for padding entries.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.index != Self::INVALID_INDEX && self.key != Self::SENTINEL_KEY
    }
}

impl Default for KeyEntry {
    fn default() -> Self {
        KeyEntry::PADDING
    }
}
