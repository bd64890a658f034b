//! Errors raised by the navigation map.

use thiserror::Error;

/// Structural errors: bad map dimensions or an index outside the map.
///
/// Routine absence (no free berth, unknown registry, unknown ship) is never
/// reported through this type; those are `Option`/`bool` results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// The map needs at least one ring and three segments per ring.
    #[error("invalid map dimensions: {rings} rings x {segments} segments (need rings >= 1, segments >= 3)")]
    Configuration { rings: u32, segments: u32 },
    /// A node index outside `0..=max`.
    #[error("node index {index} out of range 0..={max}")]
    OutOfRange { index: i64, max: i64 },
}
