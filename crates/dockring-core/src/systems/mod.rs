//! Systems - logic that operates on the map's ships

mod admission;
mod movement;

pub use movement::*;
