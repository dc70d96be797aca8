//! Generic logic for listings of instructions.
mod generic_listing;
mod position;

pub use generic_listing::*;
pub use position::*;
