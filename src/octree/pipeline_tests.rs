use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::models::{KeyEntry, Vec3};
use crate::octree::{decode_morton, is_sorted_with_padding_last, spatial_key, PipelineOrchestrator};
use crate::utils::{bitonic_step_count, OctreeError, PipelineConfig};

fn random_cloud(n: usize, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Vec3::new(
            rng.random_range(-800.0..800.0),
            rng.random_range(-800.0..800.0),
            rng.random_range(-100.0..100.0),
        ))
        .collect()
}

#[test]
fn test_reference_scenario() {
    let positions = vec![
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, -1.0),
        Vec3::new(0.5, 0.5, 0.5),
    ];
    let config = PipelineConfig::new(Some(1), Some(4), None, None);
    let mut pipeline = PipelineOrchestrator::new(config).unwrap();
    let stats = *pipeline.run(&positions).unwrap();

    let bounds = pipeline.bounds().unwrap();
    assert_eq!(bounds.min, Vec3::splat(-1.0));
    assert_eq!(bounds.max, Vec3::splat(1.0));

    let keys = pipeline.valid_keys();
    assert_eq!(keys.len(), 4);
    assert_eq!(keys[0].key, 0);
    assert_eq!(keys[1].key, 0);
    assert_eq!(keys[2].key, 7);
    assert_eq!(keys[3].key, 7);
    let mut low: Vec<u32> = keys[..2].iter().map(|e| e.index).collect();
    low.sort_unstable();
    assert_eq!(low, vec![0, 2]);
    let mut high: Vec<u32> = keys[2..].iter().map(|e| e.index).collect();
    high.sort_unstable();
    assert_eq!(high, vec![1, 3]);

    assert_eq!(pipeline.occupancy().len(), 8);
    assert_eq!(pipeline.occupancy().occupied_cells(), vec![0, 7]);
    assert_eq!(stats.occupied_cells, 2);
    assert_eq!(stats.sort.steps, 3);
}

#[test]
fn test_single_particle() {
    for depth in [0, 1, 5] {
        let config = PipelineConfig::new(Some(depth), Some(1), None, None);
        let mut pipeline = PipelineOrchestrator::new(config).unwrap();
        let stats = *pipeline.run(&[Vec3::ZERO]).unwrap();

        let bounds = pipeline.bounds().unwrap();
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::ZERO);
        assert_eq!(pipeline.sorted_keys(), &[KeyEntry::new(0, 0)]);
        assert_eq!(stats.sort.steps, 0);
        assert_eq!(pipeline.occupancy().occupied_count(), 1);
        assert!(pipeline.occupancy().is_occupied(0));
    }
}

#[test]
fn test_random_cloud_invariants() {
    let positions = random_cloud(3000, 21);
    let config = PipelineConfig::new(Some(5), Some(positions.len()), Some(128), None);
    let mut pipeline = PipelineOrchestrator::new(config).unwrap();
    let stats = *pipeline.run(&positions).unwrap();

    let bounds = pipeline.bounds().unwrap();
    assert!(bounds.is_cube());
    assert!(positions.iter().all(|p| bounds.contains(*p)));

    assert_eq!(pipeline.sorted_keys().len(), 4096);
    assert!(is_sorted_with_padding_last(pipeline.sorted_keys()));
    assert_eq!(stats.sort.steps, bitonic_step_count(4096));

    // Every entry carries the key of the particle it points at.
    for entry in pipeline.valid_keys() {
        let p = positions[entry.index as usize];
        assert_eq!(entry.key, spatial_key(p, &bounds, 5));
        let (cx, cy, cz) = decode_morton(entry.key);
        assert!(cx < 32 && cy < 32 && cz < 32);
    }

    let mut distinct: Vec<u64> = pipeline.valid_keys().iter().map(|e| e.key).collect();
    distinct.dedup();
    assert_eq!(pipeline.occupancy().occupied_cells(), distinct);
    assert_eq!(stats.occupied_cells, distinct.len());
    assert_eq!(pipeline.group_bounds().len(), 24);
    assert_eq!(pipeline.occupied_boxes().len(), distinct.len());
}

#[test]
fn test_particle_count_change_reallocates() {
    let config = PipelineConfig::new(Some(3), Some(10), Some(4), None);
    let mut pipeline = PipelineOrchestrator::new(config).unwrap();
    pipeline.run(&random_cloud(10, 1)).unwrap();
    assert_eq!(pipeline.sorted_keys().len(), 16);
    assert_eq!(pipeline.group_bounds().len(), 3);

    let grown = random_cloud(100, 2);
    pipeline.run(&grown).unwrap();
    assert_eq!(pipeline.config().particle_count, 100);
    assert_eq!(pipeline.sorted_keys().len(), 128);
    assert_eq!(pipeline.valid_keys().len(), 100);
    assert_eq!(pipeline.group_bounds().len(), 25);
    assert!(is_sorted_with_padding_last(pipeline.sorted_keys()));

    pipeline.run(&random_cloud(3, 3)).unwrap();
    assert_eq!(pipeline.sorted_keys().len(), 4);
    assert_eq!(pipeline.valid_keys().len(), 3);
}

#[test]
fn test_reconfigure_depth() {
    let positions = random_cloud(64, 4);
    let mut pipeline = PipelineOrchestrator::new(PipelineConfig::new(Some(1), Some(64), None, None)).unwrap();
    pipeline.run(&positions).unwrap();
    assert_eq!(pipeline.occupancy().len(), 8);

    pipeline.reconfigure(PipelineConfig::new(Some(3), Some(64), None, None)).unwrap();
    assert!(pipeline.bounds().is_none());
    assert!(pipeline.valid_keys().is_empty());
    pipeline.run(&positions).unwrap();
    assert_eq!(pipeline.occupancy().len(), 512);
    assert_eq!(pipeline.occupancy().depth(), 3);
}

#[test]
fn test_dedicated_worker_pool_matches_global_pool() {
    let positions = random_cloud(1500, 8);
    let mut global = PipelineOrchestrator::new(PipelineConfig::new(Some(4), Some(1500), None, None)).unwrap();
    let mut dedicated = PipelineOrchestrator::new(PipelineConfig::new(Some(4), Some(1500), None, Some(2))).unwrap();
    global.run(&positions).unwrap();
    dedicated.run(&positions).unwrap();
    assert_eq!(global.sorted_keys(), dedicated.sorted_keys());
    assert_eq!(global.occupancy(), dedicated.occupancy());
    assert_eq!(global.bounds(), dedicated.bounds());
}

#[test]
fn test_invalid_configurations_are_fatal() {
    assert_eq!(
        PipelineOrchestrator::new(PipelineConfig::new(Some(22), Some(4), None, None)).err(),
        Some(OctreeError::DepthTooLarge { depth: 22, max: 21 })
    );
    assert_eq!(
        PipelineOrchestrator::new(PipelineConfig::new(None, Some(0), None, None)).err(),
        Some(OctreeError::EmptyParticleSet)
    );

    let mut pipeline = PipelineOrchestrator::new(PipelineConfig::default()).unwrap();
    assert_eq!(pipeline.run(&[]).err(), Some(OctreeError::EmptyParticleSet));
    assert!(pipeline.occupied_boxes().is_empty());
}
