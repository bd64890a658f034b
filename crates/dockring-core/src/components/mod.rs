//! Component definitions for the ECS simulation.
//!
//! Components are pure data structs attached to ship entities.
//! They have no behavior - that lives in the map and its systems.

mod ship;

pub use ship::*;
