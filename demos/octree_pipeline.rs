// demos/octree_pipeline.rs

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rs_nbody::grid::RegularGrid;
use rs_nbody::simulation::{spawn_uniform_sphere, Simulation, SimulationParams};
use rs_nbody::utils::{OctreeError, PipelineConfig};

fn main() -> Result<(), OctreeError> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(42);
    let state = spawn_uniform_sphere(4096, 800.0, &mut rng);
    let config = PipelineConfig::new(Some(5), None, None, None);
    let mut sim = Simulation::new(state, SimulationParams::default(), config)?;
    let mut grid = RegularGrid::default();

    for _ in 0..10 {
        let stats = *sim.step()?;
        let binned = grid.bin(&sim.state().positions);
        info!(
            "step {}: index built in {:?}, {} octree cells occupied, {} grid cells occupied ({} particles in scene)",
            sim.steps(),
            stats.total_time(),
            stats.occupied_cells,
            grid.occupied_count(),
            binned
        );
    }

    let pipeline = sim.pipeline();
    if let Some(bounds) = pipeline.bounds() {
        println!("Final bounds: {:?} -> {:?}", bounds.min, bounds.max);
    }
    println!("Occupied leaf cells: {}", pipeline.occupancy().occupied_count());
    println!("Debug boxes: {}", pipeline.occupied_boxes().len());
    Ok(())
}
