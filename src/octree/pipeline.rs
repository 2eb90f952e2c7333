//! Per-step orchestration of the index pipeline.
//!
//! The orchestrator owns every intermediate buffer and runs the stages in the
//! fixed order Bounds -> Keys -> Sort -> Extract. A stage only starts once the
//! previous stage's parallel work has returned, and each buffer is handed to
//! exactly one stage at a time through a `&mut` borrow.
use std::time::{Duration, Instant};
use log::{debug, info};
use rayon::{ThreadPool, ThreadPoolBuilder};
use crate::models::{Aabb, GlobalBounds, KeyEntry, Vec3};
use crate::octree::{
    bitonic_sort, encode_keys, extract_nodes, is_sorted_with_padding_last, reduce_bounds,
    OccupancyTable, SortStats,
};
use crate::utils::{OctreeError, PipelineConfig};

/// Timings and counters from the most recent run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PipelineStats {
    pub bounds_time: Duration,
    pub keys_time: Duration,
    pub sort_time: Duration,
    pub extract_time: Duration,
    pub sort: SortStats,
    pub occupied_cells: usize,
}

impl PipelineStats {
    pub fn total_time(&self) -> Duration {
        self.bounds_time + self.keys_time + self.sort_time + self.extract_time
    }
}

/// Builds the sorted key array and occupancy table once per simulation step.
///
/// # Examples
///
/// ```
/// use rs_nbody::models::Vec3;
/// use rs_nbody::octree::PipelineOrchestrator;
/// use rs_nbody::utils::PipelineConfig;
///
/// let positions = vec![
///     Vec3::new(-1.0, -1.0, -1.0),
///     Vec3::new(1.0, 1.0, 1.0),
///     Vec3::new(-1.0, -1.0, -1.0),
///     Vec3::new(0.5, 0.5, 0.5),
/// ];
/// let config = PipelineConfig::new(Some(1), Some(positions.len()), None, None);
/// let mut pipeline = PipelineOrchestrator::new(config).unwrap();
/// pipeline.run(&positions).unwrap();
///
/// assert_eq!(pipeline.occupancy().occupied_cells(), vec![0, 7]);
/// assert_eq!(pipeline.valid_keys().len(), 4);
/// ```
pub struct PipelineOrchestrator {
    config: PipelineConfig,
    pool: Option<ThreadPool>,
    group_bounds: Vec<Aabb>,
    keys: Vec<KeyEntry>,
    occupancy: OccupancyTable,
    bounds: Option<GlobalBounds>,
    valid_count: usize,
    stats: PipelineStats,
}

fn build_pool(worker_threads: Option<usize>) -> Result<Option<ThreadPool>, OctreeError> {
    match worker_threads {
        None => Ok(None),
        Some(threads) => ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("octree-worker-{}", i))
            .build()
            .map(Some)
            .map_err(|e| OctreeError::ThreadPool(e.to_string())),
    }
}

/// Runs the four stages on buffers sized for `positions`.
fn run_stages(
    positions: &[Vec3],
    config: &PipelineConfig,
    group_bounds: &mut [Aabb],
    keys: &mut [KeyEntry],
    occupancy: &mut OccupancyTable,
) -> Result<(GlobalBounds, PipelineStats), OctreeError> {
    let mut stats = PipelineStats::default();

    let start = Instant::now();
    let bounds = reduce_bounds(positions, config.group_size, group_bounds)?;
    stats.bounds_time = start.elapsed();

    let start = Instant::now();
    encode_keys(positions, &bounds, config.depth, keys)?;
    stats.keys_time = start.elapsed();

    let start = Instant::now();
    stats.sort = bitonic_sort(keys)?;
    stats.sort_time = start.elapsed();
    debug_assert!(is_sorted_with_padding_last(keys));

    let start = Instant::now();
    extract_nodes(occupancy, &keys[..positions.len()]);
    stats.occupied_cells = occupancy.occupied_count();
    stats.extract_time = start.elapsed();

    Ok((bounds, stats))
}

impl PipelineOrchestrator {
    /// Validates `config` and allocates the intermediate buffers.
    ///
    /// # Errors
    /// Any error from [`PipelineConfig::validate`], or `ThreadPool` if a dedicated
    /// worker pool was requested and could not be built.
    pub fn new(config: PipelineConfig) -> Result<Self, OctreeError> {
        config.validate()?;
        let pool = build_pool(config.worker_threads)?;
        let occupancy = OccupancyTable::new(config.depth)?;
        info!(
            "Allocating index pipeline: {} particles, depth {}, {} groups, {} key slots, {} cells",
            config.particle_count,
            config.depth,
            config.group_count(),
            config.padded_count(),
            config.cell_count()
        );
        Ok(Self {
            config,
            pool,
            group_bounds: vec![Aabb::EMPTY; config.group_count()],
            keys: vec![KeyEntry::PADDING; config.padded_count()],
            occupancy,
            bounds: None,
            valid_count: 0,
            stats: PipelineStats::default(),
        })
    }

    /// Applies a new configuration, reallocating whatever buffers it resizes.
    /// Previous results are discarded.
    pub fn reconfigure(&mut self, config: PipelineConfig) -> Result<(), OctreeError> {
        config.validate()?;
        if config.worker_threads != self.config.worker_threads {
            self.pool = build_pool(config.worker_threads)?;
        }
        if config.depth != self.config.depth {
            self.occupancy = OccupancyTable::new(config.depth)?;
        }
        info!(
            "Reallocating index pipeline: {} -> {} particles, depth {} -> {}",
            self.config.particle_count, config.particle_count, self.config.depth, config.depth
        );
        self.group_bounds = vec![Aabb::EMPTY; config.group_count()];
        self.keys = vec![KeyEntry::PADDING; config.padded_count()];
        self.occupancy.clear();
        self.bounds = None;
        self.valid_count = 0;
        self.stats = PipelineStats::default();
        self.config = config;
        Ok(())
    }

    /// Runs Bounds -> Keys -> Sort -> Extract over `positions`.
    ///
    /// If the particle count differs from the configured one, the buffers are
    /// reallocated first; data is never truncated.
    ///
    /// # Errors
    /// * `EmptyParticleSet` if `positions` is empty.
    /// * Any stage error (these indicate a misconfigured pipeline).
    pub fn run(&mut self, positions: &[Vec3]) -> Result<&PipelineStats, OctreeError> {
        if positions.is_empty() {
            return Err(OctreeError::EmptyParticleSet);
        }
        if positions.len() != self.config.particle_count {
            self.reconfigure(self.config.with_particle_count(positions.len()))?;
        }

        let config = self.config;
        let group_bounds = &mut self.group_bounds;
        let keys = &mut self.keys;
        let occupancy = &mut self.occupancy;
        let (bounds, stats) = match &self.pool {
            Some(pool) => pool.install(|| run_stages(positions, &config, group_bounds, keys, occupancy)),
            None => run_stages(positions, &config, group_bounds, keys, occupancy),
        }?;

        debug!(
            "Index built in {:?} (bounds {:?}, keys {:?}, sort {:?} over {} steps, extract {:?}); {} cells occupied",
            stats.total_time(),
            stats.bounds_time,
            stats.keys_time,
            stats.sort_time,
            stats.sort.steps,
            stats.extract_time,
            stats.occupied_cells
        );

        self.bounds = Some(bounds);
        self.valid_count = positions.len();
        self.stats = stats;
        Ok(&self.stats)
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Cube bounds of the last run, `None` before the first run.
    pub fn bounds(&self) -> Option<GlobalBounds> {
        self.bounds
    }

    /// The full padded key buffer; the first `valid_keys().len()` entries are particles.
    pub fn sorted_keys(&self) -> &[KeyEntry] {
        &self.keys
    }

    /// Sorted entries that belong to particles.
    pub fn valid_keys(&self) -> &[KeyEntry] {
        &self.keys[..self.valid_count]
    }

    pub fn occupancy(&self) -> &OccupancyTable {
        &self.occupancy
    }

    /// Tight per-group boxes from the first bounds reduction pass.
    pub fn group_bounds(&self) -> &[Aabb] {
        &self.group_bounds
    }

    pub fn last_stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// World-space boxes of the occupied leaf cells of the last run.
    pub fn occupied_boxes(&self) -> Vec<Aabb> {
        match &self.bounds {
            Some(bounds) => self.occupancy.occupied_boxes(bounds),
            None => Vec::new(),
        }
    }
}
