//! Direct-sum gravity.
//!
//! The index pipeline only builds the octree; forces are still computed by
//! brute force over every pair, one particle per parallel work item.
use rayon::prelude::*;
use crate::models::{ParticleState, Vec3};
use crate::utils::OctreeError;

/// Step parameters shared by integrators.
///
/// * `g` - gravitational constant in simulation units.
/// * `dt` - time step.
/// * `softening` - Plummer softening length; keeps close encounters finite.
/// * `damping` - velocity multiplier applied every step (`1.0` = no damping).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParams {
    pub g: f64,
    pub dt: f64,
    pub softening: f64,
    pub damping: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            g: 3.30,
            dt: 0.50,
            softening: 10.0,
            damping: 1.0,
        }
    }
}

impl SimulationParams {
    pub fn new(g: Option<f64>, dt: Option<f64>, softening: Option<f64>, damping: Option<f64>) -> Self {
        let default = Self::default();
        Self {
            g: g.unwrap_or(default.g),
            dt: dt.unwrap_or(default.dt),
            softening: softening.unwrap_or(default.softening),
            damping: damping.unwrap_or(default.damping),
        }
    }

    pub fn validate(&self) -> Result<(), OctreeError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(OctreeError::InvalidParameter(format!("dt must be positive, got {}", self.dt)));
        }
        if !(self.g.is_finite() && self.g >= 0.0) {
            return Err(OctreeError::InvalidParameter(format!("g must be non-negative, got {}", self.g)));
        }
        if !(self.softening.is_finite() && self.softening >= 0.0) {
            return Err(OctreeError::InvalidParameter(format!(
                "softening must be non-negative, got {}", self.softening
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(OctreeError::InvalidParameter(format!(
                "damping must be in [0, 1], got {}", self.damping
            )));
        }
        Ok(())
    }
}

/// Advances particle positions and velocities by one time step.
pub trait Integrator: Send + Sync {
    fn integrate(&self, state: &mut ParticleState, params: &SimulationParams) -> Result<(), OctreeError>;
}

/// O(n^2) softened gravity with a semi-implicit Euler update.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectSumIntegrator;

impl DirectSumIntegrator {
    /// Gravitational acceleration on every particle from every other particle.
    pub fn accelerations(positions: &[Vec3], masses: &[f64], params: &SimulationParams) -> Vec<Vec3> {
        let eps2 = params.softening * params.softening;
        positions
            .par_iter()
            .enumerate()
            .map(|(i, &pi)| {
                positions
                    .iter()
                    .zip(masses)
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .fold(Vec3::ZERO, |acc, (_, (&pj, &mj))| {
                        let d = pj - pi;
                        let r2 = d.length_squared() + eps2;
                        if r2 == 0.0 {
                            return acc;
                        }
                        let inv_r3 = 1.0 / (r2 * r2.sqrt());
                        acc + d * (params.g * mj * inv_r3)
                    })
            })
            .collect()
    }
}

impl Integrator for DirectSumIntegrator {
    fn integrate(&self, state: &mut ParticleState, params: &SimulationParams) -> Result<(), OctreeError> {
        state.check_lengths()?;
        params.validate()?;

        let accelerations = Self::accelerations(&state.positions, &state.masses, params);
        let (dt, damping) = (params.dt, params.damping);
        state
            .velocities
            .par_iter_mut()
            .zip(state.positions.par_iter_mut())
            .zip(accelerations.par_iter())
            .for_each(|((v, p), &a)| {
                *v = (*v + a * dt) * damping;
                *p = *p + *v * dt;
            });
        Ok(())
    }
}
