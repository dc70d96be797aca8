//! Intermediate code generation.

mod generator;
mod line_generator;
mod name_generator;
pub mod optimiser;
mod triad;
mod verify;

#[cfg(test)]
mod properties;

pub use generator::TriadGenerator;
pub use triad::*;
pub use verify::verify;
