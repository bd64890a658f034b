//! Single-step movement decision for one ship.
//!
//! Ships make progress radially: inbound ships step one ring toward the dock,
//! outbound ships step one ring away. There is no sidestepping along a ring.
//!
//! When the radial target holds a ship travelling the other way, that ship's
//! own target is this node, so the pair passes each other in one exchange.
//! Any other occupant makes the ship hold for the tick. Every move brings a
//! ship one ring closer to its exit, so an occupied ring never stalls.
//!
//! Exits:
//! - an inbound ship sitting on the dock has docked and leaves the map;
//! - an outbound ship on the outer ring leaves the structure.
//!
//! Every `Advance`/`Exchange` target is a member of
//! [`valid_neighbors`](crate::adjacency::valid_neighbors) for the same
//! node and direction.

use crate::coords::{Coordinate, Dimensions};
use crate::node::{Direction, Node};

/// Outcome of planning one ship's move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Stay put this tick.
    Hold,
    /// Move into the given free node.
    Advance(Node),
    /// Trade places with the oncoming ship on the given node.
    Exchange(Node),
    /// Journey complete; remove the ship from the map.
    Exit,
}

/// Radial target of a ring ship, or `None` when the ship exits instead.
pub fn radial_target(dims: &Dimensions, c: Coordinate, direction: Direction) -> Option<Node> {
    let ring = match direction {
        Direction::Inbound => c.ring.saturating_sub(1),
        Direction::Outbound if c.ring >= dims.ring_count() => return None,
        Direction::Outbound => c.ring + 1,
    };
    Some(Node::from_coordinate(Coordinate::new(ring, c.segment)))
}

/// Decide the next step for a ship at `node` travelling in `direction`.
///
/// `occupant` reports the direction of the ship holding a node, or `None`
/// when the node can take another ship. The dock is always `None`.
pub fn plan_step(
    dims: &Dimensions,
    node: Node,
    direction: Direction,
    occupant: impl Fn(Node) -> Option<Direction>,
) -> Step {
    let c = match (node, direction) {
        (Node::Dock, Direction::Inbound) => return Step::Exit,
        (Node::Dock, Direction::Outbound) => {
            return dims
                .ring_nodes(1)
                .find(|n| occupant(*n).is_none())
                .map_or(Step::Hold, Step::Advance)
        }
        (Node::Ring(c), _) => c,
    };

    let Some(target) = radial_target(dims, c, direction) else {
        return Step::Exit;
    };
    match occupant(target) {
        None => Step::Advance(target),
        Some(other) if other != direction => Step::Exchange(target),
        Some(_) => Step::Hold,
    }
}
