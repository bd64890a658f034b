//! Navigation node variants and travel direction.

use serde::{Deserialize, Serialize};

use crate::coords::Coordinate;

/// A cell of the navigation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Node {
    /// The single docking node at the centre. Holds any number of ships.
    Dock,
    /// A ring cell at `ring >= 1`. Holds at most one ship.
    Ring(Coordinate),
}

impl Node {
    /// Dock for ring 0, otherwise a ring node at the coordinate.
    pub fn from_coordinate(c: Coordinate) -> Self {
        if c.ring == 0 {
            Node::Dock
        } else {
            Node::Ring(c)
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        match self {
            Node::Dock => Coordinate::DOCK,
            Node::Ring(c) => *c,
        }
    }

    pub fn ring(&self) -> u32 {
        self.coordinate().ring
    }

    pub fn segment(&self) -> u32 {
        self.coordinate().segment
    }

    pub fn is_dock(&self) -> bool {
        matches!(self, Node::Dock)
    }

    /// Whether only one ship may occupy this node at a time.
    pub fn is_exclusive(&self) -> bool {
        !self.is_dock()
    }

    /// Ship capacity; `None` means unlimited.
    pub fn capacity(&self) -> Option<usize> {
        match self {
            Node::Dock => None,
            Node::Ring(_) => Some(1),
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Dock => write!(f, "Dock"),
            Node::Ring(c) => write!(f, "Ring {} Segment {}", c.ring, c.segment),
        }
    }
}

/// Travel direction, fixed for a ship's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward the dock.
    Inbound,
    /// Away from the dock, toward open space.
    Outbound,
}

impl Direction {
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Inbound => "Inbound",
            Direction::Outbound => "Outbound",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Inbound => Direction::Outbound,
            Direction::Outbound => Direction::Inbound,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
