//! Navigation map - the station graph plus the ships on it
//!
//! `NavigationMap` owns the ECS world of ships, the ship-id index and the
//! route ledger. Structural queries (node lookup, index math, adjacency) are
//! here; occupancy queries live in `occupancy`, admission and launch in
//! `systems::admission`, movement in `systems::movement`.

use std::collections::BTreeMap;

use dockring_logic::adjacency;
use dockring_logic::config::{AdmissionRing, ConfigError, StationConfig};
use dockring_logic::registry::Registry;
use dockring_logic::{Coordinate, Dimensions, Direction, MapError, Node};
use hecs::{Entity, World};

use crate::components::{Berth, Ship, ShipId};
use crate::routes::RouteLedger;

const DEFAULT_FORGED_REGISTRY_CHANCE: f64 = 0.1;

pub struct NavigationMap {
    pub(crate) dims: Dimensions,
    pub(crate) admission_ring: AdmissionRing,
    pub(crate) forged_registry_chance: f64,
    /// ECS world holding one entity per ship on the map
    pub(crate) world: World,
    /// Ship id → entity, ascending id order is the canonical iteration order
    pub(crate) index: BTreeMap<ShipId, Entity>,
    /// Ring node → the ship holding it. The dock is never listed.
    pub(crate) occupancy: BTreeMap<Node, ShipId>,
    pub(crate) routes: RouteLedger,
    pub(crate) next_id: u32,
}

impl NavigationMap {
    /// Build an empty map. Fails on fewer than 1 ring or 3 segments.
    pub fn new(ring_count: u32, segment_count: u32) -> Result<Self, MapError> {
        Ok(Self::with_dimensions(Dimensions::new(ring_count, segment_count)?))
    }

    pub fn with_dimensions(dims: Dimensions) -> Self {
        Self {
            dims,
            admission_ring: AdmissionRing::default(),
            forged_registry_chance: DEFAULT_FORGED_REGISTRY_CHANCE,
            world: World::new(),
            index: BTreeMap::new(),
            occupancy: BTreeMap::new(),
            routes: RouteLedger::new(),
            next_id: 0,
        }
    }

    pub fn from_config(config: &StationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut map = Self::with_dimensions(config.dimensions()?);
        map.admission_ring = config.admission_ring;
        map.forged_registry_chance = config.forged_registry_chance;
        Ok(map)
    }

    pub fn set_admission_ring(&mut self, admission_ring: AdmissionRing) {
        self.admission_ring = admission_ring;
    }

    pub fn admission_ring(&self) -> AdmissionRing {
        self.admission_ring
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn ring_count(&self) -> u32 {
        self.dims.ring_count()
    }

    pub fn segment_count(&self) -> u32 {
        self.dims.segment_count()
    }

    /// Node at `(ring, segment)`; segments wrap, ring 0 is the dock.
    pub fn node_at(&self, ring: u32, segment: i64) -> Result<Node, MapError> {
        self.dims.node(ring, segment)
    }

    pub fn node_at_index(&self, index: i64) -> Result<Node, MapError> {
        self.dims.node_at_index(index)
    }

    pub fn index_of(&self, ring: u32, segment: i64) -> usize {
        self.dims.index_of(ring, segment)
    }

    pub fn coordinate_of(&self, index: i64) -> Result<Coordinate, MapError> {
        self.dims.coordinate_of(index)
    }

    /// Every node in index order, dock first.
    pub fn nodes(&self) -> Vec<Node> {
        self.dims.nodes().collect()
    }

    /// Nodes reachable from `node` in one tick, `node` included.
    pub fn valid_neighbors(&self, node: Node, direction: Direction) -> Vec<Node> {
        adjacency::valid_neighbors(&self.dims, node, direction)
    }

    pub fn valid_neighbors_at(
        &self,
        ring: u32,
        segment: i64,
        direction: Direction,
    ) -> Result<Vec<Node>, MapError> {
        Ok(self.valid_neighbors(self.node_at(ring, segment)?, direction))
    }

    pub fn valid_neighbors_at_index(
        &self,
        index: i64,
        direction: Direction,
    ) -> Result<Vec<Node>, MapError> {
        Ok(self.valid_neighbors(self.node_at_index(index)?, direction))
    }

    /// Recorded route of a ship, empty if the ship is unknown.
    pub fn route_of(&self, ship: ShipId) -> &[Node] {
        self.routes.route(ship)
    }

    pub fn routes(&self) -> &RouteLedger {
        &self.routes
    }

    /// Put a new ship on `node` and open its route. Callers check `is_free`.
    pub(crate) fn spawn_ship(&mut self, direction: Direction, registry: Registry, node: Node) -> ShipId {
        let id = ShipId(self.next_id);
        self.next_id += 1;
        let entity = self.world.spawn((Ship::new(id, direction, registry), Berth::new(node)));
        self.index.insert(id, entity);
        if node.is_exclusive() {
            self.occupancy.insert(node, id);
        }
        self.routes.start(id, node);
        id
    }

    /// Take a ship off the map. Its route stays in the ledger.
    pub(crate) fn despawn_ship(&mut self, id: ShipId) -> Option<Ship> {
        let entity = self.index.remove(&id)?;
        let ship = self.world.get::<&Ship>(entity).ok().map(|s| *s);
        let node = self.world.get::<&Berth>(entity).ok().map(|b| b.node);
        if let Some(node) = node {
            if self.occupancy.get(&node) == Some(&id) {
                self.occupancy.remove(&node);
            }
        }
        let _ = self.world.despawn(entity);
        ship
    }
}

impl std::fmt::Debug for NavigationMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationMap")
            .field("dims", &self.dims)
            .field("admission_ring", &self.admission_ring)
            .field("ships", &self.index.len())
            .field("occupied", &self.occupancy.len())
            .field("routes", &self.routes.len())
            .finish()
    }
}
