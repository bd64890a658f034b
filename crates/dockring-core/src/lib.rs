//! Dockring Core - Docking Ring Simulation Engine
//!
//! An ECS-based simulation of a circular space-station docking structure.
//! Ships occupy cells of concentric rings, enter and leave through a single
//! docking node, and advance one ring per tick.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Ships
//! - **Components**: `Ship` (id, direction, registry) and `Berth` (current node)
//! - **Systems**: Admission, launch and movement passes over the map
//!
//! Pure coordinate math, adjacency and movement decisions live in
//! `dockring_logic`; this crate owns the mutable state.
//!
//! # Example
//!
//! ```rust,no_run
//! use dockring_core::prelude::*;
//!
//! let mut engine = StationEngine::new(StationConfig::default()).unwrap();
//! engine.subscribe(|report: &TickReport| println!("tick {}", report.tick));
//!
//! for _ in 0..100 {
//!     engine.next_tick();
//! }
//! ```

pub mod components;
pub mod engine;
pub mod generation;
pub mod map;
pub mod occupancy;
pub mod persistence;
pub mod routes;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{ListenerId, StationEngine, TickReport};
    pub use crate::map::NavigationMap;
    pub use crate::systems::MovementReport;
    pub use dockring_logic::config::{AdmissionRing, StationConfig};
    pub use dockring_logic::{Coordinate, Dimensions, Direction, MapError, Node};
    pub use dockring_logic::registry::Registry;
}
