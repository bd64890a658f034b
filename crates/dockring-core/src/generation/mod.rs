//! Generation - procedural creation of ship registries

mod registry;

pub use registry::*;
