//! Occupancy tracker - which ship is on which node
//!
//! Ring nodes hold at most one ship; the dock holds any number and is never
//! reported as occupied. Ring occupancy is answered from the node index kept
//! on the map. Listing queries walk ships in ascending id order, so "first
//! match" is well defined.
//!
//! Mutators are crate-private: ships only move through the movement system.

use dockring_logic::movement::radial_target;
use dockring_logic::registry::Registry;
use dockring_logic::{Direction, Node};
use log::{debug, info};

use crate::components::{Berth, Ship, ShipId};
use crate::map::NavigationMap;

impl NavigationMap {
    /// Whether `node` can take another ship. Always true for the dock.
    pub fn is_free(&self, node: Node) -> bool {
        !node.is_exclusive() || !self.occupancy.contains_key(&node)
    }

    /// Ship on the ring node at `(ring, segment)`. The dock never reports one.
    pub fn ship_at(&self, ring: u32, segment: i64) -> Option<Ship> {
        let node = self.node_at(ring, segment).ok()?;
        if !node.is_exclusive() {
            return None;
        }
        self.occupant(node).and_then(|id| self.ship(id))
    }

    /// First ship whose registry renders as `text` (e.g. `"ABC-123"`).
    pub fn find_ship_by_registry(&self, text: &str) -> Option<Ship> {
        self.ships().find(|ship| ship.registry.to_string() == text)
    }

    /// Registries of every ship on the map, in ship id order.
    pub fn all_registries(&self) -> Vec<Registry> {
        self.ships().map(|ship| ship.registry).collect()
    }

    pub fn ship(&self, id: ShipId) -> Option<Ship> {
        let entity = *self.index.get(&id)?;
        self.world.get::<&Ship>(entity).ok().map(|s| *s)
    }

    /// Current node of a ship still on the map.
    pub fn location(&self, id: ShipId) -> Option<Node> {
        let entity = *self.index.get(&id)?;
        self.world.get::<&Berth>(entity).ok().map(|b| b.node)
    }

    /// Ships on the map in ascending id order.
    pub fn ships(&self) -> impl Iterator<Item = Ship> + '_ {
        self.index
            .values()
            .filter_map(move |&entity| self.world.get::<&Ship>(entity).ok().map(|s| *s))
    }

    /// Ships with their current node, ascending id order.
    pub fn berths(&self) -> Vec<(Ship, Node)> {
        self.index
            .values()
            .filter_map(|&entity| {
                let ship = *self.world.get::<&Ship>(entity).ok()?;
                let berth = *self.world.get::<&Berth>(entity).ok()?;
                Some((ship, berth.node))
            })
            .collect()
    }

    /// Ships currently sitting on the dock.
    pub fn docked_ships(&self) -> Vec<Ship> {
        self.berths()
            .into_iter()
            .filter(|(_, node)| node.is_dock())
            .map(|(ship, _)| ship)
            .collect()
    }

    pub fn ship_count(&self) -> usize {
        self.index.len()
    }

    /// Direction of the ship holding a ring node. `None` for a free node
    /// and always for the dock.
    pub(crate) fn occupant_direction(&self, node: Node) -> Option<Direction> {
        self.occupant(node)
            .and_then(|id| self.ship(id))
            .map(|ship| ship.direction)
    }

    /// Move a ship one step onto `node` and record it in its route.
    ///
    /// Refuses (returns `false`) for an unknown ship, a node that is not a
    /// one-step neighbor in the ship's direction, the ship's own node, or an
    /// exclusive node held by another ship.
    pub(crate) fn move_ship(&mut self, id: ShipId, node: Node) -> bool {
        let (Some(ship), Some(from)) = (self.ship(id), self.location(id)) else {
            return false;
        };
        if node == from || !self.valid_neighbors(from, ship.direction).contains(&node) {
            debug!("{} cannot move from {} to {}", id, from, node);
            return false;
        }
        if let Some(holder) = self.occupant(node) {
            debug!("Ship {} blocked at {} by {}", id, node, holder);
            return false;
        }
        self.place(id, from, node);
        true
    }

    /// Swap two oncoming ships on adjacent ring nodes of one segment.
    ///
    /// Both ships must head for each other's node; otherwise nothing moves
    /// and `false` is returned. Both routes grow by one entry.
    pub(crate) fn exchange_ships(&mut self, a: ShipId, b: ShipId) -> bool {
        let (Some(ship_a), Some(at_a)) = (self.ship(a), self.location(a)) else {
            return false;
        };
        let (Some(ship_b), Some(at_b)) = (self.ship(b), self.location(b)) else {
            return false;
        };
        let (Node::Ring(ca), Node::Ring(cb)) = (at_a, at_b) else {
            return false;
        };
        if a == b
            || radial_target(&self.dims, ca, ship_a.direction) != Some(at_b)
            || radial_target(&self.dims, cb, ship_b.direction) != Some(at_a)
        {
            return false;
        }
        self.occupancy.remove(&at_a);
        self.occupancy.remove(&at_b);
        self.place(a, at_a, at_b);
        self.place(b, at_b, at_a);
        debug!("{} and {} passed between {} and {}", a, b, at_a, at_b);
        true
    }

    /// Remove a ship from the simulation. Its route is kept.
    pub(crate) fn remove_ship(&mut self, id: ShipId) -> Option<Ship> {
        let ship = self.despawn_ship(id)?;
        info!("{} ({}) left the map", ship.registry, id);
        Some(ship)
    }

    fn occupant(&self, node: Node) -> Option<ShipId> {
        self.occupancy.get(&node).copied()
    }

    /// Set a ship's berth and keep the node index and route in step.
    fn place(&mut self, id: ShipId, from: Node, to: Node) {
        let Some(&entity) = self.index.get(&id) else {
            return;
        };
        if let Ok(mut berth) = self.world.get::<&mut Berth>(entity) {
            berth.node = to;
        }
        if self.occupancy.get(&from) == Some(&id) {
            self.occupancy.remove(&from);
        }
        if to.is_exclusive() {
            self.occupancy.insert(to, id);
        }
        self.routes.append(id, to);
    }
}
