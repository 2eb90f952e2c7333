//! Leaf-level occupancy of the implicit octree.
use std::sync::atomic::{AtomicBool, Ordering};
use rayon::prelude::*;
use crate::models::{Aabb, GlobalBounds, KeyEntry, Vec3};
use crate::octree::decode_morton;
use crate::utils::{OctreeError, MAX_OCCUPANCY_DEPTH};

/// One flag per leaf cell at depth `L` (2^(3L) cells), indexed by Morton key.
///
/// Flags are atomics so that many workers can scatter into the table at once;
/// every writer stores the same value, so races are harmless.
#[derive(Debug)]
pub struct OccupancyTable {
    depth: u32,
    flags: Vec<AtomicBool>,
}

impl OccupancyTable {
    /// Allocates a cleared table for subdivision `depth`.
    ///
    /// # Errors
    /// Returns `OccupancyTableTooLarge` if `depth` exceeds `MAX_OCCUPANCY_DEPTH`.
    pub fn new(depth: u32) -> Result<Self, OctreeError> {
        if depth > MAX_OCCUPANCY_DEPTH {
            return Err(OctreeError::OccupancyTableTooLarge { depth, max: MAX_OCCUPANCY_DEPTH });
        }
        let cells = 1usize << (3 * depth);
        let mut flags = Vec::with_capacity(cells);
        flags.resize_with(cells, || AtomicBool::new(false));
        Ok(Self { depth, flags })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Number of cells in the table.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Resets every flag.
    pub fn clear(&mut self) {
        self.flags.par_iter_mut().for_each(|f| *f.get_mut() = false);
    }

    /// Marks the cell addressed by `entry`. Padding and out-of-range keys are
    /// ignored; returns whether a flag was written.
    #[inline]
    pub fn mark(&self, entry: &KeyEntry) -> bool {
        if !entry.is_valid() {
            return false;
        }
        match usize::try_from(entry.key).ok().and_then(|k| self.flags.get(k)) {
            Some(flag) => {
                flag.store(true, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, cell: u64) -> bool {
        usize::try_from(cell)
            .ok()
            .and_then(|c| self.flags.get(c))
            .is_some_and(|f| f.load(Ordering::Relaxed))
    }

    /// Number of set flags.
    pub fn occupied_count(&self) -> usize {
        self.flags.par_iter().filter(|f| f.load(Ordering::Relaxed)).count()
    }

    /// Indices of the occupied cells in ascending order.
    pub fn occupied_cells(&self) -> Vec<u64> {
        self.flags
            .par_iter()
            .enumerate()
            .filter(|(_, f)| f.load(Ordering::Relaxed))
            .map(|(i, _)| i as u64)
            .collect()
    }

    /// Snapshot of the flags as plain booleans.
    pub fn to_flags(&self) -> Vec<bool> {
        self.flags.par_iter().map(|f| f.load(Ordering::Relaxed)).collect()
    }

    /// World-space boxes of the occupied cells, for debug overlays.
    pub fn occupied_boxes(&self, bounds: &GlobalBounds) -> Vec<Aabb> {
        self.occupied_cells()
            .into_iter()
            .map(|cell| cell_bounds(cell, self.depth, bounds))
            .collect()
    }
}

impl PartialEq for OccupancyTable {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth && self.to_flags() == other.to_flags()
    }
}

/// Clears `table` and marks the cell of every valid entry.
///
/// Entries are scattered independently across the worker pool. Returns the
/// number of entries that marked a cell (padding is skipped).
///
/// # Examples
///
/// ```
/// use rs_nbody::models::KeyEntry;
/// use rs_nbody::octree::{extract_nodes, OccupancyTable};
///
/// let mut table = OccupancyTable::new(1).unwrap();
/// let entries = [
///     KeyEntry::new(0, 0),
///     KeyEntry::new(0, 2),
///     KeyEntry::new(7, 1),
///     KeyEntry::PADDING,
/// ];
/// extract_nodes(&mut table, &entries);
///
/// assert_eq!(table.occupied_cells(), vec![0, 7]);
/// ```
pub fn extract_nodes(table: &mut OccupancyTable, entries: &[KeyEntry]) -> usize {
    table.clear();
    let table = &*table;
    entries.par_iter().map(|e| table.mark(e) as usize).sum()
}

/// World-space box of leaf `cell` at `depth` inside `bounds`.
pub fn cell_bounds(cell: u64, depth: u32, bounds: &GlobalBounds) -> Aabb {
    let (cx, cy, cz) = decode_morton(cell);
    let size = bounds.extent() * (1.0 / (1u64 << depth) as f64);
    let min = bounds.min + Vec3::new(cx as f64 * size.x, cy as f64 * size.y, cz as f64 * size.z);
    Aabb::new(min, min + size)
}
