use approx::assert_relative_eq;
use crate::models::{Aabb, KeyEntry, Vec3};
use crate::octree::{cell_bounds, encode_morton, extract_nodes, OccupancyTable};
use crate::utils::{OctreeError, MAX_OCCUPANCY_DEPTH};

#[test]
fn test_table_size() {
    assert_eq!(OccupancyTable::new(0).unwrap().len(), 1);
    assert_eq!(OccupancyTable::new(1).unwrap().len(), 8);
    assert_eq!(OccupancyTable::new(4).unwrap().len(), 4096);
    assert!(matches!(
        OccupancyTable::new(MAX_OCCUPANCY_DEPTH + 1),
        Err(OctreeError::OccupancyTableTooLarge { .. })
    ));
}

#[test]
fn test_flags_match_distinct_keys() {
    let mut table = OccupancyTable::new(2).unwrap();
    let entries = [
        KeyEntry::new(3, 0),
        KeyEntry::new(3, 1),
        KeyEntry::new(3, 2),
        KeyEntry::new(17, 3),
        KeyEntry::new(63, 4),
        KeyEntry::PADDING,
        KeyEntry::PADDING,
        KeyEntry::PADDING,
    ];
    let marked = extract_nodes(&mut table, &entries);
    assert_eq!(marked, 5);
    assert_eq!(table.occupied_count(), 3);
    assert_eq!(table.occupied_cells(), vec![3, 17, 63]);
    assert!(table.is_occupied(17));
    assert!(!table.is_occupied(18));
    assert!(!table.is_occupied(u64::MAX));
}

#[test]
fn test_out_of_range_keys_are_ignored() {
    let mut table = OccupancyTable::new(1).unwrap();
    let entries = [KeyEntry::new(8, 0), KeyEntry::new(1, 1)];
    assert_eq!(extract_nodes(&mut table, &entries), 1);
    assert_eq!(table.occupied_cells(), vec![1]);
}

#[test]
fn test_extraction_is_idempotent_and_clears() {
    let entries = [KeyEntry::new(0, 0), KeyEntry::new(5, 1), KeyEntry::new(5, 2), KeyEntry::PADDING];
    let mut once = OccupancyTable::new(1).unwrap();
    extract_nodes(&mut once, &entries);
    let mut twice = OccupancyTable::new(1).unwrap();
    extract_nodes(&mut twice, &entries);
    extract_nodes(&mut twice, &entries);
    assert_eq!(once, twice);

    // A later run only reflects its own entries.
    extract_nodes(&mut twice, &[KeyEntry::new(2, 0)]);
    assert_eq!(twice.to_flags(), vec![false, false, true, false, false, false, false, false]);
}

#[test]
fn test_cell_bounds_tile_the_cube() {
    let bounds = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let low = cell_bounds(0, 1, &bounds);
    assert_eq!(low, Aabb::new(Vec3::splat(-1.0), Vec3::splat(0.0)));
    let high = cell_bounds(7, 1, &bounds);
    assert_eq!(high, Aabb::new(Vec3::splat(0.0), Vec3::splat(1.0)));

    let cell = cell_bounds(encode_morton(3, 0, 1), 2, &bounds);
    assert_relative_eq!(cell.min.x, 0.5);
    assert_relative_eq!(cell.min.y, -1.0);
    assert_relative_eq!(cell.min.z, -0.5);
    assert_relative_eq!(cell.max.x, 1.0);
}

#[test]
fn test_occupied_boxes() {
    let bounds = Aabb::new(Vec3::splat(0.0), Vec3::splat(8.0));
    let mut table = OccupancyTable::new(1).unwrap();
    extract_nodes(&mut table, &[KeyEntry::new(7, 0)]);
    assert_eq!(table.occupied_boxes(&bounds), vec![Aabb::new(Vec3::splat(4.0), Vec3::splat(8.0))]);
}
