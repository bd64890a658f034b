//! Route ledger - per-ship history of visited nodes
//!
//! A route starts with the node a ship was admitted or launched at and grows
//! by one entry per successful move. Entries are never removed or reordered,
//! and routes outlive the ship on the map so finished journeys stay visible.

use std::collections::BTreeMap;

use dockring_logic::Node;
use serde::{Deserialize, Serialize};

use crate::components::ShipId;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteLedger {
    routes: BTreeMap<ShipId, Vec<Node>>,
}

impl RouteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a singleton route for a new ship. No-op if the ship already has one.
    pub fn start(&mut self, ship: ShipId, node: Node) {
        self.routes.entry(ship).or_insert_with(|| vec![node]);
    }

    /// Record a move. Returns `false` for a ship with no route.
    pub fn append(&mut self, ship: ShipId, node: Node) -> bool {
        match self.routes.get_mut(&ship) {
            Some(route) => {
                route.push(node);
                true
            }
            None => false,
        }
    }

    /// Recorded route, empty for an unknown ship.
    pub fn route(&self, ship: ShipId) -> &[Node] {
        self.routes.get(&ship).map(|r| r.as_slice()).unwrap_or(&[])
    }

    pub fn contains(&self, ship: ShipId) -> bool {
        self.routes.contains_key(&ship)
    }

    /// Number of ships with a route, including departed ones.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShipId, &[Node])> {
        self.routes.iter().map(|(id, route)| (*id, route.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockring_logic::Coordinate;

    #[test]
    fn test_route_grows_in_order() {
        let mut ledger = RouteLedger::new();
        let a = Node::Ring(Coordinate::new(3, 1));
        let b = Node::Ring(Coordinate::new(2, 1));
        ledger.start(ShipId(0), a);
        assert_eq!(ledger.route(ShipId(0)), &[a]);
        assert!(ledger.append(ShipId(0), b));
        assert!(ledger.append(ShipId(0), Node::Dock));
        assert_eq!(ledger.route(ShipId(0)), &[a, b, Node::Dock]);
    }

    #[test]
    fn test_unknown_ship_has_empty_route() {
        let mut ledger = RouteLedger::new();
        assert!(ledger.route(ShipId(42)).is_empty());
        assert!(!ledger.append(ShipId(42), Node::Dock));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_start_does_not_reset() {
        let mut ledger = RouteLedger::new();
        ledger.start(ShipId(1), Node::Dock);
        ledger.append(ShipId(1), Node::Ring(Coordinate::new(1, 0)));
        ledger.start(ShipId(1), Node::Dock);
        assert_eq!(ledger.route(ShipId(1)).len(), 2);
    }
}
