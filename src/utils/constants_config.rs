// src/utils/constants_config.rs
use crate::utils::{
    DEFAULT_PIPELINE_CONFIG, MAX_DEPTH, MAX_OCCUPANCY_DEPTH,
    errors::OctreeError,
    group_count, padded_len,
};

/// Configuration constants consumed by the index pipeline at initialization.
///
/// * `depth` - subdivision depth `L`; the occupancy table holds 2^(3L) cells.
/// * `particle_count` - number of particles `N` the buffers are sized for.
/// * `group_size` - particles per group in the first bounds reduction pass.
/// * `worker_threads` - size of a dedicated worker pool, or `None` for rayon's global pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub depth: u32,
    pub particle_count: usize,
    pub group_size: usize,
    pub worker_threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        DEFAULT_PIPELINE_CONFIG
    }
}

impl PipelineConfig {
    pub fn new(
        depth: Option<u32>,
        particle_count: Option<usize>,
        group_size: Option<usize>,
        worker_threads: Option<usize>,
    ) -> Self {
        let default = DEFAULT_PIPELINE_CONFIG;
        Self {
            depth: depth.unwrap_or(default.depth),
            particle_count: particle_count.unwrap_or(default.particle_count),
            group_size: group_size.unwrap_or(default.group_size),
            worker_threads,
        }
    }

    /// Returns a copy of this configuration sized for `particle_count` particles.
    pub fn with_particle_count(&self, particle_count: usize) -> Self {
        Self { particle_count, ..*self }
    }

    /// Rejects configurations the pipeline cannot run with.
    ///
    /// # Errors
    /// * `DepthTooLarge` if `3 * depth` does not fit the 63 usable key bits.
    /// * `OccupancyTableTooLarge` if the 2^(3L) table would be unreasonably large.
    /// * `EmptyParticleSet` if `particle_count` is zero.
    /// * `InvalidGroupSize` if `group_size` is zero.
    /// * `ThreadPool` if a dedicated pool of zero workers is requested.
    pub fn validate(&self) -> Result<(), OctreeError> {
        if self.depth > MAX_DEPTH {
            return Err(OctreeError::DepthTooLarge { depth: self.depth, max: MAX_DEPTH });
        }
        if self.depth > MAX_OCCUPANCY_DEPTH {
            return Err(OctreeError::OccupancyTableTooLarge { depth: self.depth, max: MAX_OCCUPANCY_DEPTH });
        }
        if self.particle_count == 0 { return Err(OctreeError::EmptyParticleSet); }
        if self.group_size == 0 { return Err(OctreeError::InvalidGroupSize); }
        if self.worker_threads == Some(0) {
            return Err(OctreeError::ThreadPool("worker pool needs at least one thread".to_string()));
        }
        Ok(())
    }

    /// Cells per axis at the configured depth (2^L).
    pub fn cells_per_axis(&self) -> u32 {
        1 << self.depth
    }

    /// Total leaf cells at the configured depth (2^(3L)).
    pub fn cell_count(&self) -> usize {
        1usize << (3 * self.depth)
    }

    /// Length of the key buffer: the next power of two at or above `particle_count`.
    pub fn padded_count(&self) -> usize {
        padded_len(self.particle_count)
    }

    /// Number of groups in the first bounds reduction pass.
    pub fn group_count(&self) -> usize {
        group_count(self.particle_count, self.group_size)
    }
}
