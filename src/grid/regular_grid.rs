//! A uniform grid over a fixed scene volume that counts particles per cell.
//!
//! Unlike the octree index, the grid does not adapt to the particles: the scene
//! box and resolution are fixed at construction and particles outside the
//! scene are not counted. Cells are indexed linearly as `x + R * (y + R * z)`.
use std::sync::atomic::{AtomicU32, Ordering};
use log::debug;
use rayon::prelude::*;
use crate::models::{Aabb, Vec3};
use crate::utils::{OctreeError, DEFAULT_GRID_RESOLUTION, DEFAULT_SCENE_HALF_EXTENT, MAX_GRID_RESOLUTION};

#[derive(Debug)]
pub struct RegularGrid {
    resolution: u32,
    scene: Aabb,
    counts: Vec<AtomicU32>,
}

impl RegularGrid {
    /// Creates an empty grid of `resolution`^3 cells covering `scene`.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if the resolution is zero or too large, or if
    /// the scene box is empty, degenerate or not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_nbody::grid::RegularGrid;
    /// use rs_nbody::models::{Aabb, Vec3};
    ///
    /// let scene = Aabb::new(Vec3::splat(0.0), Vec3::splat(4.0));
    /// let mut grid = RegularGrid::new(2, scene).unwrap();
    /// grid.bin(&[Vec3::splat(1.0), Vec3::splat(1.5), Vec3::splat(3.0), Vec3::splat(9.0)]);
    ///
    /// assert_eq!(grid.count(0), 2);
    /// assert_eq!(grid.count(7), 1);
    /// assert_eq!(grid.occupied_count(), 2);
    /// ```
    pub fn new(resolution: u32, scene: Aabb) -> Result<Self, OctreeError> {
        if resolution == 0 || resolution > MAX_GRID_RESOLUTION {
            return Err(OctreeError::InvalidParameter(format!(
                "grid resolution must be in 1..={}, got {}", MAX_GRID_RESOLUTION, resolution
            )));
        }
        let extent = scene.extent();
        if !extent.is_finite() || extent.x <= 0.0 || extent.y <= 0.0 || extent.z <= 0.0 {
            return Err(OctreeError::InvalidParameter(format!("grid scene {:?} has no volume", scene)));
        }
        let cells = (resolution as usize).pow(3);
        let mut counts = Vec::with_capacity(cells);
        counts.resize_with(cells, || AtomicU32::new(0));
        Ok(Self { resolution, scene, counts })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn scene(&self) -> Aabb {
        self.scene
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Linear index of the cell containing `p`, or `None` outside the scene.
    pub fn cell_index(&self, p: Vec3) -> Option<usize> {
        if !self.scene.contains(p) {
            return None;
        }
        let r = self.resolution as f64;
        let extent = self.scene.extent();
        let last = (self.resolution - 1) as usize;
        let axis = |v: f64, min: f64, e: f64| (((v - min) / e * r).floor() as usize).min(last);
        let x = axis(p.x, self.scene.min.x, extent.x);
        let y = axis(p.y, self.scene.min.y, extent.y);
        let z = axis(p.z, self.scene.min.z, extent.z);
        let res = self.resolution as usize;
        Some(x + res * (y + res * z))
    }

    pub fn clear(&mut self) {
        self.counts.par_iter_mut().for_each(|c| *c.get_mut() = 0);
    }

    /// Clears the grid and counts `positions` into it in parallel.
    /// Returns the number of particles that fell inside the scene.
    pub fn bin(&mut self, positions: &[Vec3]) -> usize {
        self.clear();
        let grid = &*self;
        let binned: usize = positions
            .par_iter()
            .filter_map(|&p| grid.cell_index(p))
            .map(|cell| {
                grid.counts[cell].fetch_add(1, Ordering::Relaxed);
                1usize
            })
            .sum();
        if binned < positions.len() {
            debug!("{} of {} particles lie outside the grid scene", positions.len() - binned, positions.len());
        }
        binned
    }

    /// Particles counted in `cell`; zero for out-of-range cells.
    pub fn count(&self, cell: usize) -> u32 {
        self.counts.get(cell).map_or(0, |c| c.load(Ordering::Relaxed))
    }

    pub fn counts(&self) -> Vec<u32> {
        self.counts.par_iter().map(|c| c.load(Ordering::Relaxed)).collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.counts.par_iter().filter(|c| c.load(Ordering::Relaxed) > 0).count()
    }

    /// World-space box of linear cell `cell`.
    pub fn cell_box(&self, cell: usize) -> Aabb {
        let res = self.resolution as usize;
        let (x, y, z) = (cell % res, (cell / res) % res, cell / (res * res));
        let size = self.scene.extent() * (1.0 / self.resolution as f64);
        let min = self.scene.min + Vec3::new(x as f64 * size.x, y as f64 * size.y, z as f64 * size.z);
        Aabb::new(min, min + size)
    }

    /// Boxes of every non-empty cell, in linear index order.
    pub fn occupied_boxes(&self) -> Vec<Aabb> {
        (0..self.counts.len())
            .filter(|&cell| self.count(cell) > 0)
            .map(|cell| self.cell_box(cell))
            .collect()
    }
}

impl Default for RegularGrid {
    fn default() -> Self {
        let scene = Aabb::new(
            Vec3::splat(-DEFAULT_SCENE_HALF_EXTENT),
            Vec3::splat(DEFAULT_SCENE_HALF_EXTENT),
        );
        let cells = (DEFAULT_GRID_RESOLUTION as usize).pow(3);
        let mut counts = Vec::with_capacity(cells);
        counts.resize_with(cells, || AtomicU32::new(0));
        Self { resolution: DEFAULT_GRID_RESOLUTION, scene, counts }
    }
}
