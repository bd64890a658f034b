//! One-step adjacency over the ring graph.
//!
//! Rules, applied in order:
//! 1. The node itself is always reachable (a ship may hold position).
//! 2. The dock: inbound ships go nowhere else; outbound ships fan out to
//!    every segment of ring 1.
//! 3. Ring nodes reach both same-ring neighbours (segments wrap).
//! 4. Outbound ring nodes reach `ring + 1` unless already on the outer ring.
//! 5. Inbound ring nodes always reach `ring - 1`; from ring 1 that is the dock.
//!
//! Leaving the structure from the outer ring is an exit, not a move to a
//! node, so rule 4 has no counterpart past the boundary.

use crate::coords::{Coordinate, Dimensions};
use crate::node::{Direction, Node};

/// Nodes reachable from `node` in one tick, `node` itself first.
///
/// With at least three segments per ring the result never holds duplicates.
pub fn valid_neighbors(dims: &Dimensions, node: Node, direction: Direction) -> Vec<Node> {
    let mut out = Vec::with_capacity(dims.segment_count() as usize + 1);
    out.push(node);

    let c = match node {
        Node::Dock => {
            if direction == Direction::Outbound {
                out.extend(dims.ring_nodes(1));
            }
            return out;
        }
        Node::Ring(c) => c,
    };

    let segment = c.segment as i64;
    out.push(ring_node(dims, c.ring, segment + 1));
    out.push(ring_node(dims, c.ring, segment - 1));

    match direction {
        Direction::Outbound => {
            if c.ring < dims.ring_count() {
                out.push(ring_node(dims, c.ring + 1, segment));
            }
        }
        Direction::Inbound => out.push(ring_node(dims, c.ring.saturating_sub(1), segment)),
    }
    out
}

fn ring_node(dims: &Dimensions, ring: u32, segment: i64) -> Node {
    Node::from_coordinate(Coordinate::new(ring, dims.wrap_segment(segment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        Dimensions::new(3, 4).unwrap()
    }

    fn ring(r: u32, s: u32) -> Node {
        Node::Ring(Coordinate::new(r, s))
    }

    #[test]
    fn dock_outbound_fans_out_to_ring_one() {
        let n = valid_neighbors(&dims(), Node::Dock, Direction::Outbound);
        assert_eq!(n, vec![Node::Dock, ring(1, 0), ring(1, 1), ring(1, 2), ring(1, 3)]);
    }

    #[test]
    fn dock_inbound_is_terminal() {
        assert_eq!(valid_neighbors(&dims(), Node::Dock, Direction::Inbound), vec![Node::Dock]);
    }

    #[test]
    fn outer_ring_inbound() {
        let n = valid_neighbors(&dims(), ring(3, 0), Direction::Inbound);
        assert_eq!(n, vec![ring(3, 0), ring(3, 1), ring(3, 3), ring(2, 0)]);
    }

    #[test]
    fn outer_ring_outbound_stops_at_boundary() {
        let n = valid_neighbors(&dims(), ring(3, 0), Direction::Outbound);
        assert_eq!(n, vec![ring(3, 0), ring(3, 1), ring(3, 3)]);
    }

    #[test]
    fn inner_ring_outbound_reaches_next_ring() {
        let n = valid_neighbors(&dims(), ring(1, 3), Direction::Outbound);
        assert_eq!(n, vec![ring(1, 3), ring(1, 0), ring(1, 2), ring(2, 3)]);
    }

    #[test]
    fn ring_one_inbound_reaches_dock() {
        let n = valid_neighbors(&dims(), ring(1, 2), Direction::Inbound);
        assert_eq!(n.len(), 4);
        assert_eq!(n[3], Node::Dock);
    }

    #[test]
    fn no_duplicates_on_minimum_ring() {
        let d = Dimensions::new(1, 3).unwrap();
        for node in d.nodes() {
            for direction in [Direction::Inbound, Direction::Outbound] {
                let mut n = valid_neighbors(&d, node, direction);
                let len = n.len();
                n.sort();
                n.dedup();
                assert_eq!(n.len(), len, "{node} {direction}");
            }
        }
    }
}
