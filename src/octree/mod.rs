mod bounds_reducer;
mod key_encoder;
mod parallel_sorter;
mod node_extractor;
mod pipeline;

pub use bounds_reducer::*;
pub use key_encoder::*;
pub use parallel_sorter::*;
pub use node_extractor::*;
pub use pipeline::*;

#[cfg(test)]
mod node_extractor_tests;
#[cfg(test)]
mod pipeline_tests;
