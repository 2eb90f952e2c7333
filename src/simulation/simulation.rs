use log::debug;
use crate::models::ParticleState;
use crate::octree::{PipelineOrchestrator, PipelineStats};
use crate::simulation::{DirectSumIntegrator, Integrator, SimulationParams};
use crate::utils::{OctreeError, PipelineConfig};

/// Owns the particle state and runs integrate-then-index once per step.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use rs_nbody::simulation::{spawn_uniform_sphere, Simulation, SimulationParams};
/// use rs_nbody::utils::PipelineConfig;
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let state = spawn_uniform_sphere(64, 100.0, &mut rng);
/// let mut sim = Simulation::new(state, SimulationParams::default(), PipelineConfig::default())
///     .expect("Failed to create simulation");
///
/// sim.simulate(5).expect("Simulation failed");
/// assert_eq!(sim.steps(), 5);
/// assert!(sim.pipeline().occupancy().occupied_count() > 0);
/// ```
pub struct Simulation {
    state: ParticleState,
    params: SimulationParams,
    integrator: Box<dyn Integrator>,
    pipeline: PipelineOrchestrator,
    steps: u64,
}

impl Simulation {
    /// Creates a simulation with the direct-sum integrator. The pipeline's
    /// particle count is taken from `state`.
    ///
    /// # Errors
    /// Returns an error if the state arrays disagree in length, the parameters
    /// are invalid, or the pipeline configuration is rejected.
    pub fn new(state: ParticleState, params: SimulationParams, config: PipelineConfig) -> Result<Self, OctreeError> {
        Self::with_integrator(state, params, config, Box::new(DirectSumIntegrator))
    }

    pub fn with_integrator(
        state: ParticleState,
        params: SimulationParams,
        config: PipelineConfig,
        integrator: Box<dyn Integrator>,
    ) -> Result<Self, OctreeError> {
        state.check_lengths()?;
        params.validate()?;
        let pipeline = PipelineOrchestrator::new(config.with_particle_count(state.len()))?;
        Ok(Self { state, params, integrator, pipeline, steps: 0 })
    }

    /// Integrates one time step, then rebuilds the spatial index on the new positions.
    pub fn step(&mut self) -> Result<&PipelineStats, OctreeError> {
        self.integrator.integrate(&mut self.state, &self.params)?;
        self.steps += 1;
        let stats = self.pipeline.run(&self.state.positions)?;
        debug!("Step {}: {} occupied cells", self.steps, stats.occupied_cells);
        Ok(stats)
    }

    /// Runs `steps` consecutive steps.
    pub fn simulate(&mut self, steps: usize) -> Result<(), OctreeError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    pub fn state(&self) -> &ParticleState {
        &self.state
    }

    /// Mutable access for adding or removing particles; the pipeline
    /// reallocates on the next step when the count changes.
    pub fn state_mut(&mut self) -> &mut ParticleState {
        &mut self.state
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SimulationParams) -> Result<(), OctreeError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    pub fn pipeline(&self) -> &PipelineOrchestrator {
        &self.pipeline
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }
}
