use crate::models::Vec3;
use crate::utils::OctreeError;

/// Structure-of-arrays particle storage owned by the simulation.
///
/// The index pipeline only reads `positions`; the integrator updates
/// `positions` and `velocities` once per step.
#[derive(Debug, Clone, Default)]
pub struct ParticleState {
    pub positions: Vec<Vec3>,
    pub velocities: Vec<Vec3>,
    pub masses: Vec<f64>,
}

impl ParticleState {
    /// Builds a state from matching per-particle arrays.
    ///
    /// # Errors
    /// Returns `ParticleCountMismatch` if the arrays differ in length.
    pub fn new(positions: Vec<Vec3>, velocities: Vec<Vec3>, masses: Vec<f64>) -> Result<Self, OctreeError> {
        let state = Self { positions, velocities, masses };
        state.check_lengths()?;
        Ok(state)
    }

    /// Particles at the given positions, at rest, with unit mass.
    pub fn at_rest(positions: Vec<Vec3>) -> Self {
        let n = positions.len();
        Self {
            positions,
            velocities: vec![Vec3::ZERO; n],
            masses: vec![1.0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn check_lengths(&self) -> Result<(), OctreeError> {
        let n = self.positions.len();
        for found in [self.velocities.len(), self.masses.len()] {
            if found != n {
                return Err(OctreeError::ParticleCountMismatch { expected: n, found });
            }
        }
        Ok(())
    }

    /// Sum of `mass * velocity` over all particles.
    pub fn total_momentum(&self) -> Vec3 {
        self.velocities
            .iter()
            .zip(&self.masses)
            .fold(Vec3::ZERO, |acc, (&v, &m)| acc + v * m)
    }
}
