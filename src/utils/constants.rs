use crate::utils;

/// Largest subdivision depth whose interleaved key (3 bits per level) fits in 63 bits,
/// leaving `u64::MAX` free as the padding sentinel.
pub const MAX_DEPTH: u32 = 21;

/// Largest depth for which the occupancy table (2^(3L) flags) is allocated.
pub const MAX_OCCUPANCY_DEPTH: u32 = 10;

pub const DEFAULT_DEPTH: u32 = 4;
pub const DEFAULT_GROUP_SIZE: usize = 256;
pub const DEFAULT_PARTICLE_COUNT: usize = 32;

pub const DEFAULT_PIPELINE_CONFIG: utils::PipelineConfig = utils::PipelineConfig {
    depth: DEFAULT_DEPTH,
    particle_count: DEFAULT_PARTICLE_COUNT,
    group_size: DEFAULT_GROUP_SIZE,
    worker_threads: None,
};

/// Cells per axis of the regular debug grid.
pub const DEFAULT_GRID_RESOLUTION: u32 = 16;
/// Half edge of the fixed scene cube the regular grid covers.
pub const DEFAULT_SCENE_HALF_EXTENT: f64 = 1000.0;
/// Largest regular grid resolution (cells per axis) that will be allocated.
pub const MAX_GRID_RESOLUTION: u32 = 1024;
