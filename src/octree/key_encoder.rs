//! Morton (Z-order) keys.
//!
//! A key interleaves the `L` bits of a particle's integer cell coordinate on each
//! axis, x taking the most significant bit of every 3-bit group:
//! `key = spread(x) << 2 | spread(y) << 1 | spread(z)`.
use rayon::prelude::*;
use crate::models::{GlobalBounds, KeyEntry, Vec3};
use crate::utils::{padded_len, OctreeError, MAX_DEPTH};

/// Spreads the low 21 bits of `v` so that two zero bits separate each original bit.
#[inline]
pub fn spread_bits(v: u32) -> u64 {
    let mut x = (v as u64) & 0x1f_ffff;
    x = (x | x << 32) & 0x001f_0000_0000_ffff;
    x = (x | x << 16) & 0x001f_0000_ff00_00ff;
    x = (x | x << 8) & 0x100f_00f0_0f00_f00f;
    x = (x | x << 4) & 0x10c3_0c30_c30c_30c3;
    x = (x | x << 2) & 0x1249_2492_4924_9249;
    x
}

/// Inverse of [`spread_bits`]: gathers every third bit back into a 21-bit value.
#[inline]
pub fn compact_bits(v: u64) -> u32 {
    let mut x = v & 0x1249_2492_4924_9249;
    x = (x ^ (x >> 2)) & 0x10c3_0c30_c30c_30c3;
    x = (x ^ (x >> 4)) & 0x100f_00f0_0f00_f00f;
    x = (x ^ (x >> 8)) & 0x001f_0000_ff00_00ff;
    x = (x ^ (x >> 16)) & 0x001f_0000_0000_ffff;
    x = (x ^ (x >> 32)) & 0x1f_ffff;
    x as u32
}

/// Interleaves three cell coordinates into one key.
///
/// # Examples
///
/// ```
/// use rs_nbody::octree::{decode_morton, encode_morton};
///
/// assert_eq!(encode_morton(1, 1, 1), 7);
/// assert_eq!(encode_morton(1, 0, 0), 4);
/// assert_eq!(decode_morton(encode_morton(5, 9, 3)), (5, 9, 3));
/// ```
#[inline]
pub fn encode_morton(cx: u32, cy: u32, cz: u32) -> u64 {
    (spread_bits(cx) << 2) | (spread_bits(cy) << 1) | spread_bits(cz)
}

/// De-interleaves a key back into its cell coordinates.
#[inline]
pub fn decode_morton(key: u64) -> (u32, u32, u32) {
    (compact_bits(key >> 2), compact_bits(key >> 1), compact_bits(key))
}

/// Maps one axis value into `[0, cells)`.
///
/// Values on the upper face land in the last cell. Degenerate extents and NaN
/// land in cell 0 instead of dividing by zero.
#[inline]
fn axis_cell(value: f64, min: f64, extent: f64, cells: u32) -> u32 {
    if !(extent.is_finite() && extent > 0.0) {
        return 0;
    }
    let t = (value - min) / extent * cells as f64;
    if t.is_nan() {
        return 0;
    }
    t.floor().clamp(0.0, (cells - 1) as f64) as u32
}

/// Integer cell coordinate of `p` at subdivision `depth` within `bounds`.
pub fn cell_coordinates(p: Vec3, bounds: &GlobalBounds, depth: u32) -> (u32, u32, u32) {
    let cells = 1u32 << depth;
    let extent = bounds.extent();
    (
        axis_cell(p.x, bounds.min.x, extent.x, cells),
        axis_cell(p.y, bounds.min.y, extent.y, cells),
        axis_cell(p.z, bounds.min.z, extent.z, cells),
    )
}

/// Morton key of `p` at subdivision `depth` within `bounds`.
#[inline]
pub fn spatial_key(p: Vec3, bounds: &GlobalBounds, depth: u32) -> u64 {
    let (cx, cy, cz) = cell_coordinates(p, bounds, depth);
    encode_morton(cx, cy, cz)
}

/// Writes one `KeyEntry` per particle into `out`, followed by padding.
///
/// Entries are produced independently in parallel; `out[i]` carries particle
/// `i`'s key and index. Slots from `positions.len()` onwards receive
/// `KeyEntry::PADDING`.
///
/// # Errors
/// * `DepthTooLarge` if `3 * depth` exceeds the usable key bits.
/// * `CapacityExceeded` if `out` is shorter than the padded particle count.
/// * `InvalidParameter` if there are more particles than a `u32` index can address.
pub fn encode_keys(
    positions: &[Vec3],
    bounds: &GlobalBounds,
    depth: u32,
    out: &mut [KeyEntry],
) -> Result<(), OctreeError> {
    if depth > MAX_DEPTH {
        return Err(OctreeError::DepthTooLarge { depth, max: MAX_DEPTH });
    }
    let n = positions.len();
    if n >= KeyEntry::INVALID_INDEX as usize {
        return Err(OctreeError::InvalidParameter(format!("{} particles exceed the u32 index range", n)));
    }
    let required = padded_len(n);
    if out.len() < required {
        return Err(OctreeError::CapacityExceeded { required, available: out.len() });
    }

    let (valid, padding) = out.split_at_mut(n);
    valid
        .par_iter_mut()
        .zip(positions.par_iter())
        .enumerate()
        .for_each(|(i, (entry, &p))| {
            *entry = KeyEntry::new(spatial_key(p, bounds, depth), i as u32);
        });
    padding.par_iter_mut().for_each(|entry| *entry = KeyEntry::PADDING);

    Ok(())
}
