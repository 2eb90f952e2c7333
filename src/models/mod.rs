mod vec3;
mod bounds;
mod key_entry;
mod particle_state;

pub use vec3::*;
pub use bounds::*;
pub use key_entry::*;
pub use particle_state::*;
