//! Pure navigation logic for the docking ring.
//!
//! This crate holds everything about the station's navigation graph that does
//! not need an entity store: the ring/segment coordinate system, node
//! variants, ship registries, one-step adjacency and the movement decision.
//! Functions take plain data and return results, so they are unit-testable
//! and shared by the engine and the headless harness alike.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`adjacency`] | Direction-aware set of nodes reachable in one tick |
//! | [`config`] | Station configuration, admission ring policy, validation |
//! | [`coords`] | `(ring, segment)` ↔ linear index bijection |
//! | [`error`] | Map construction and index errors |
//! | [`movement`] | Single-step movement decision for one ship |
//! | [`node`] | Docking node / ring node variants and travel direction |
//! | [`registry`] | `LLL-DDD` ship registries with (possibly forged) checksums |

pub mod adjacency;
pub mod config;
pub mod coords;
pub mod error;
pub mod movement;
pub mod node;
pub mod registry;

pub use coords::{Coordinate, Dimensions};
pub use error::MapError;
pub use node::{Direction, Node};
