use std::fmt;
use std::error::Error;

/// Represents errors that can occur while configuring or running the octree index pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum OctreeError {
    /// The particle set is empty; bounds are undefined.
    EmptyParticleSet,
    /// The subdivision depth does not fit the key width.
    DepthTooLarge { depth: u32, max: u32 },
    /// The occupancy table for this depth would be too large to allocate.
    OccupancyTableTooLarge { depth: u32, max: u32 },
    /// The bounds reduction group size is zero.
    InvalidGroupSize,
    /// A preallocated buffer is smaller than the padded particle count.
    CapacityExceeded { required: usize, available: usize },
    /// The sort network was given a buffer whose length is not a power of two.
    NotPowerOfTwo(usize),
    /// A per-particle array does not match the number of positions.
    ParticleCountMismatch { expected: usize, found: usize },
    /// A simulation parameter is outside its valid range.
    InvalidParameter(String),
    /// The dedicated worker pool could not be created.
    ThreadPool(String),
}

impl fmt::Display for OctreeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OctreeError::EmptyParticleSet => write!(f, "Particle set is empty"),
            OctreeError::DepthTooLarge { depth, max } => {
                write!(f, "Subdivision depth {} exceeds the key width limit of {}", depth, max)
            }
            OctreeError::OccupancyTableTooLarge { depth, max } => {
                write!(f, "Occupancy table for depth {} is too large (max depth {})", depth, max)
            }
            OctreeError::InvalidGroupSize => write!(f, "Group size must be greater than zero"),
            OctreeError::CapacityExceeded { required, available } => {
                write!(f, "Buffer holds {} entries but {} are required", available, required)
            }
            OctreeError::NotPowerOfTwo(len) => write!(f, "Length {} is not a power of two", len),
            OctreeError::ParticleCountMismatch { expected, found } => {
                write!(f, "Expected {} particles, found {}", expected, found)
            }
            OctreeError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            OctreeError::ThreadPool(msg) => write!(f, "Thread pool error: {}", msg),
        }
    }
}

impl Error for OctreeError {}
