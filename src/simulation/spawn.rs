use rand::Rng;
use crate::models::{ParticleState, Vec3};

/// `count` unit-mass particles at rest, uniformly distributed inside a sphere
/// of `radius` around the origin (rejection sampling from the enclosing cube).
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use rs_nbody::simulation::spawn_uniform_sphere;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let state = spawn_uniform_sphere(100, 800.0, &mut rng);
///
/// assert_eq!(state.len(), 100);
/// assert!(state.positions.iter().all(|p| p.length_squared() <= 800.0 * 800.0));
/// ```
pub fn spawn_uniform_sphere<R: Rng + ?Sized>(count: usize, radius: f64, rng: &mut R) -> ParticleState {
    let r2 = radius * radius;
    let positions = (0..count)
        .map(|_| loop {
            let p = Vec3::new(
                rng.random_range(-1.0..=1.0) * radius,
                rng.random_range(-1.0..=1.0) * radius,
                rng.random_range(-1.0..=1.0) * radius,
            );
            if p.length_squared() <= r2 {
                break p;
            }
        })
        .collect();
    ParticleState::at_rest(positions)
}
