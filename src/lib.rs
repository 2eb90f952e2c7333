//! Parallel construction of the implicit octree used by a Barnes-Hut N-body
//! simulation.
//!
//! Every step the [`octree::PipelineOrchestrator`] reduces the particle
//! positions to a cube, assigns each particle a Morton key, sorts the keys with
//! a bitonic network and marks the occupied leaf cells. Each stage is a rayon
//! data-parallel pass and a stage only starts once the previous one returned.
pub mod utils;
pub mod models;
pub mod octree;
pub mod grid;
pub mod simulation;
