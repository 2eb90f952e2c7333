//! Global bounding volume for the particle set.
//!
//! The reduction runs in two passes. Pass 1 splits the positions into groups of
//! `group_size` and reduces every group independently on the rayon pool, writing
//! one box per group. Pass 2 folds the per-group boxes on the calling thread.
//! The final box is then cubified so every axis is subdivided with the same
//! cell size.
use log::{debug, warn};
use rayon::prelude::*;
use crate::models::{Aabb, GlobalBounds, Vec3};
use crate::utils::{group_count, OctreeError};

/// Groups at or below this size are folded directly instead of split further.
const LEAF_REDUCE_LEN: usize = 8;

/// Pairwise reduction of one group, the way a workgroup halves its shared
/// buffer each round.
fn reduce_group(points: &[Vec3]) -> Aabb {
    if points.len() <= LEAF_REDUCE_LEN {
        return Aabb::from_points(points);
    }
    let (left, right) = points.split_at(points.len() / 2);
    reduce_group(left).merge(reduce_group(right))
}

/// Pass 1: writes the box of each group of `group_size` positions into `partials`.
///
/// Returns the number of groups written. Groups are independent, so they run
/// in any order across the worker pool.
///
/// # Errors
/// * `EmptyParticleSet` if `positions` is empty.
/// * `InvalidGroupSize` if `group_size` is zero.
/// * `CapacityExceeded` if `partials` cannot hold one box per group.
pub fn reduce_group_bounds(
    positions: &[Vec3],
    group_size: usize,
    partials: &mut [Aabb],
) -> Result<usize, OctreeError> {
    if positions.is_empty() { return Err(OctreeError::EmptyParticleSet); }
    if group_size == 0 { return Err(OctreeError::InvalidGroupSize); }

    let groups = group_count(positions.len(), group_size);
    if partials.len() < groups {
        return Err(OctreeError::CapacityExceeded { required: groups, available: partials.len() });
    }

    positions
        .par_chunks(group_size)
        .zip(partials[..groups].par_iter_mut())
        .for_each(|(group, out)| *out = reduce_group(group));

    Ok(groups)
}

/// Pass 2: folds the per-group boxes into one box on a single worker.
pub fn combine_group_bounds(partials: &[Aabb]) -> Aabb {
    partials.iter().fold(Aabb::EMPTY, |acc, b| acc.merge(*b))
}

/// Computes the cubified global bounds of `positions`.
///
/// `partials` is the intermediate per-group buffer; after the call its first
/// `ceil(N / group_size)` slots hold the tight box of each group.
///
/// # Examples
///
/// ```
/// use rs_nbody::models::{Aabb, Vec3};
/// use rs_nbody::octree::reduce_bounds;
///
/// let positions = vec![
///     Vec3::new(-1.0, -1.0, -1.0),
///     Vec3::new(1.0, 1.0, 1.0),
///     Vec3::new(0.5, 0.5, 0.5),
/// ];
/// let mut partials = vec![Aabb::EMPTY; 2];
/// let bounds = reduce_bounds(&positions, 2, &mut partials).unwrap();
///
/// assert_eq!(bounds.min, Vec3::new(-1.0, -1.0, -1.0));
/// assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 1.0));
/// ```
pub fn reduce_bounds(
    positions: &[Vec3],
    group_size: usize,
    partials: &mut [Aabb],
) -> Result<GlobalBounds, OctreeError> {
    let groups = reduce_group_bounds(positions, group_size, partials)?;
    let tight = combine_group_bounds(&partials[..groups]);

    if !tight.min.is_finite() || !tight.max.is_finite() {
        warn!("Particle bounds are not finite ({:?}); keys will be clamped into range", tight);
    }

    let cube = tight.cubify();
    if cube.extent().max_component() == 0.0 {
        debug!("All {} particles coincide; bounds degenerate to a point", positions.len());
    }
    Ok(cube)
}
