//! Ring/segment coordinate system.
//!
//! The station is a set of concentric rings around a single docking node.
//! Ring 0 is reserved for the dock; rings `1..=rings` are each split into
//! `segments` angular cells that wrap cyclically.
//!
//! ```text
//! index 0                      → dock (0, 0)
//! index 1 ..= segments         → ring 1, segments 0..segments
//! index segments+1 ..= 2·seg   → ring 2, ...
//! ```
//!
//! # Usage
//!
//! ```
//! use dockring_logic::coords::{Coordinate, Dimensions};
//!
//! let dims = Dimensions::new(3, 4).unwrap();
//! assert_eq!(dims.index_of(2, 0), 5);
//! assert_eq!(dims.coordinate_of(12).unwrap(), Coordinate::new(3, 3));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::node::Node;

/// Minimum number of rings around the dock.
pub const MIN_RINGS: u32 = 1;
/// Minimum segments per ring; fewer would make `segment ± 1` collide.
pub const MIN_SEGMENTS: u32 = 3;

/// A `(ring, segment)` location. The dock is `(0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub ring: u32,
    pub segment: u32,
}

impl Coordinate {
    pub const DOCK: Self = Self { ring: 0, segment: 0 };

    pub fn new(ring: u32, segment: u32) -> Self {
        Self { ring, segment }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.ring, self.segment)
    }
}

/// Validated map dimensions and the index math built on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    rings: u32,
    segments: u32,
}

impl Dimensions {
    /// Validate dimensions. Fails before any node exists.
    ///
    /// Every node index must fit both `i64` and `usize`, which bounds
    /// `rings · segments`.
    pub fn new(rings: u32, segments: u32) -> Result<Self, MapError> {
        let indexable = (rings as u64)
            .checked_mul(segments as u64)
            .filter(|&max| i64::try_from(max).is_ok() && usize::try_from(max).is_ok())
            .is_some();
        if rings < MIN_RINGS || segments < MIN_SEGMENTS || !indexable {
            return Err(MapError::Configuration { rings, segments });
        }
        Ok(Self { rings, segments })
    }

    pub fn ring_count(&self) -> u32 {
        self.rings
    }

    pub fn segment_count(&self) -> u32 {
        self.segments
    }

    /// Highest valid node index (`rings · segments`).
    pub fn max_index(&self) -> usize {
        self.rings as usize * self.segments as usize
    }

    /// Total nodes including the dock.
    pub fn node_count(&self) -> usize {
        self.max_index() + 1
    }

    /// Wrap any segment value into `0..segments`.
    pub fn wrap_segment(&self, segment: i64) -> u32 {
        segment.rem_euclid(self.segments as i64) as u32
    }

    /// Linear index of `(ring, segment)`. Ring 0 is always index 0.
    ///
    /// The ring is not bounds-checked here; use [`Dimensions::node`] for a
    /// checked lookup.
    pub fn index_of(&self, ring: u32, segment: i64) -> usize {
        if ring == 0 {
            return 0;
        }
        self.segments as usize * (ring as usize - 1) + self.wrap_segment(segment) as usize + 1
    }

    /// Inverse of [`Dimensions::index_of`].
    pub fn coordinate_of(&self, index: i64) -> Result<Coordinate, MapError> {
        let max = self.max_index() as i64;
        if index < 0 || index > max {
            return Err(MapError::OutOfRange { index, max });
        }
        if index == 0 {
            return Ok(Coordinate::DOCK);
        }
        let offset = (index - 1) as u64;
        let segments = self.segments as u64;
        // index <= rings · segments, so the ring always fits.
        let ring = u32::try_from(offset / segments + 1).map_err(|_| MapError::OutOfRange { index, max })?;
        Ok(Coordinate {
            ring,
            segment: (offset % segments) as u32,
        })
    }

    /// Checked node lookup by location. Segments wrap; rings past the outer
    /// boundary are out of range.
    pub fn node(&self, ring: u32, segment: i64) -> Result<Node, MapError> {
        if ring == 0 {
            return Ok(Node::Dock);
        }
        let index = self.index_of(ring, segment);
        if ring > self.rings {
            return Err(MapError::OutOfRange {
                index: index as i64,
                max: self.max_index() as i64,
            });
        }
        Ok(Node::Ring(Coordinate::new(ring, self.wrap_segment(segment))))
    }

    /// Checked node lookup by linear index.
    pub fn node_at_index(&self, index: i64) -> Result<Node, MapError> {
        Ok(Node::from_coordinate(self.coordinate_of(index)?))
    }

    /// Linear index of a node.
    pub fn index(&self, node: Node) -> usize {
        let c = node.coordinate();
        self.index_of(c.ring, c.segment as i64)
    }

    /// Whether a node lies on this map.
    pub fn contains(&self, node: Node) -> bool {
        match node {
            Node::Dock => true,
            Node::Ring(c) => c.ring >= 1 && c.ring <= self.rings && c.segment < self.segments,
        }
    }

    /// All nodes of one ring in ascending segment order. Empty for ring 0 or
    /// rings past the boundary.
    pub fn ring_nodes(&self, ring: u32) -> impl Iterator<Item = Node> {
        let segments = if ring >= 1 && ring <= self.rings { self.segments } else { 0 };
        (0..segments).map(move |segment| Node::Ring(Coordinate::new(ring, segment)))
    }

    /// Every node in index order, dock first.
    pub fn nodes(&self) -> impl Iterator<Item = Node> + '_ {
        std::iter::once(Node::Dock).chain((1..=self.rings).flat_map(move |ring| self.ring_nodes(ring)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        Dimensions::new(3, 4).unwrap()
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            Dimensions::new(0, 4),
            Err(MapError::Configuration { rings: 0, segments: 4 })
        );
        assert_eq!(
            Dimensions::new(3, 2),
            Err(MapError::Configuration { rings: 3, segments: 2 })
        );
        assert!(Dimensions::new(1, 3).is_ok());
    }

    #[test]
    fn dock_index_ignores_segment() {
        let d = dims();
        for segment in [-100, -1, 0, 1, 3, 4, 99] {
            assert_eq!(d.index_of(0, segment), 0);
        }
    }

    #[test]
    fn index_of_wraps_segments() {
        let d = dims();
        assert_eq!(d.index_of(1, 0), 1);
        assert_eq!(d.index_of(1, 4), 1);
        assert_eq!(d.index_of(1, -1), 4);
        assert_eq!(d.index_of(2, 0), 5);
        assert_eq!(d.index_of(3, 3), 12);
        assert_eq!(d.index_of(3, -5), 12);
    }

    #[test]
    fn coordinate_of_known_indices() {
        let d = dims();
        assert_eq!(d.coordinate_of(0).unwrap(), Coordinate::DOCK);
        assert_eq!(d.coordinate_of(1).unwrap(), Coordinate::new(1, 0));
        assert_eq!(d.coordinate_of(5).unwrap(), Coordinate::new(2, 0));
        assert_eq!(d.coordinate_of(12).unwrap(), Coordinate::new(3, 3));
    }

    #[test]
    fn coordinate_of_rejects_out_of_range() {
        let d = dims();
        assert_eq!(d.coordinate_of(13), Err(MapError::OutOfRange { index: 13, max: 12 }));
        assert_eq!(d.coordinate_of(-1), Err(MapError::OutOfRange { index: -1, max: 12 }));
    }

    #[test]
    fn round_trip_both_ways() {
        let d = Dimensions::new(5, 7).unwrap();
        for index in 0..=d.max_index() as i64 {
            let c = d.coordinate_of(index).unwrap();
            assert_eq!(d.index_of(c.ring, c.segment as i64) as i64, index);
        }
        for ring in 1..=5u32 {
            for segment in -20i64..20 {
                let c = d.coordinate_of(d.index_of(ring, segment) as i64).unwrap();
                assert_eq!(c, Coordinate::new(ring, segment.rem_euclid(7) as u32));
            }
        }
    }

    #[test]
    fn round_trip_past_u32_indices() {
        let d = Dimensions::new(2_000_000_000, 4).unwrap();
        assert_eq!(d.index_of(2_000_000_000, 3), 8_000_000_000);
        assert_eq!(d.coordinate_of(8_000_000_000).unwrap(), Coordinate::new(2_000_000_000, 3));
        assert_eq!(d.coordinate_of(4_294_967_297).unwrap(), Coordinate::new(1_073_741_825, 0));
        assert_eq!(d.max_index(), 8_000_000_000);
    }

    #[test]
    fn rejects_unindexable_dimensions() {
        assert_eq!(
            Dimensions::new(u32::MAX, u32::MAX),
            Err(MapError::Configuration { rings: u32::MAX, segments: u32::MAX })
        );
    }

    #[test]
    fn node_lookup_checks_rings() {
        let d = dims();
        assert_eq!(d.node(0, 17).unwrap(), Node::Dock);
        assert_eq!(d.node(2, -1).unwrap(), Node::Ring(Coordinate::new(2, 3)));
        assert!(matches!(d.node(4, 0), Err(MapError::OutOfRange { .. })));
    }

    #[test]
    fn nodes_are_in_index_order() {
        let d = dims();
        let nodes: Vec<Node> = d.nodes().collect();
        assert_eq!(nodes.len(), d.node_count());
        for (index, node) in nodes.iter().enumerate() {
            assert_eq!(d.index(*node), index);
            assert!(d.contains(*node));
        }
    }
}
