use approx::relative_eq;
use crate::models::Vec3;

/// An axis-aligned box described by its `min` and `max` corners.
///
/// The pipeline's `GlobalBounds` is an `Aabb` that has been forced to a cube with
/// [`Aabb::cubify`]. Containment is a closed interval on every axis, so points on
/// the faces count as inside.
///
/// # Examples
///
/// ```
/// use rs_nbody::models::{Aabb, Vec3};
///
/// let tight = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 1.0));
/// let cube = tight.cubify();
///
/// assert!(cube.is_cube());
/// assert_eq!(cube.min, Vec3::new(0.0, -1.0, -1.5));
/// assert_eq!(cube.max, Vec3::new(4.0, 3.0, 2.5));
/// assert!(cube.contains(Vec3::new(4.0, 2.0, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// The cube that bounds every particle in the current step.
pub type GlobalBounds = Aabb;

impl Aabb {
    /// The identity of the min/max reduction: it contains nothing and
    /// merging it with any box returns that box.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f64::INFINITY),
        max: Vec3::splat(f64::NEG_INFINITY),
    };

    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A zero-extent box around a single point.
    pub const fn from_point(p: Vec3) -> Self {
        Self { min: p, max: p }
    }

    /// Tight box around `points`; `Aabb::EMPTY` when `points` is empty.
    pub fn from_points(points: &[Vec3]) -> Self {
        points.iter().fold(Aabb::EMPTY, |acc, &p| acc.include(p))
    }

    /// Grows the box to contain `p`.
    #[inline]
    pub fn include(self, p: Vec3) -> Self {
        Self { min: self.min.min(p), max: self.max.max(p) }
    }

    /// Smallest box containing both boxes. Associative and commutative.
    #[inline]
    pub fn merge(self, other: Aabb) -> Self {
        Self { min: self.min.min(other.min), max: self.max.max(other.max) }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Closed-interval containment test.
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
            p.y >= self.min.y && p.y <= self.max.y &&
            p.z >= self.min.z && p.z <= self.max.z
    }

    /// Forces the box to a cube centred on the original centre whose edge is the
    /// longest original edge. The result always contains the original box: a face
    /// that rounding pulled inside is pushed back out to the original face.
    pub fn cubify(&self) -> Aabb {
        let center = self.center();
        let half = self.extent().max_component() * 0.5;
        let offset = Vec3::splat(half);
        Aabb {
            min: (center - offset).min(self.min),
            max: (center + offset).max(self.max),
        }
    }

    /// True when all three edges have the same length (up to rounding).
    pub fn is_cube(&self) -> bool {
        let e = self.extent();
        relative_eq!(e.x, e.y, epsilon = 1e-12, max_relative = 1e-9) &&
            relative_eq!(e.y, e.z, epsilon = 1e-12, max_relative = 1e-9)
    }
}
