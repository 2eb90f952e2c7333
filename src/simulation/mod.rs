#[cfg(feature = "simulation")]
mod integrator;
#[cfg(feature = "simulation")]
mod spawn;
#[cfg(feature = "simulation")]
mod simulation;

#[cfg(feature = "simulation")]
pub use integrator::*;
#[cfg(feature = "simulation")]
pub use spawn::*;
#[cfg(feature = "simulation")]
pub use simulation::*;
