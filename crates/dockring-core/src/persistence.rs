//! Save/Load functionality for persisting simulation state
//!
//! Uses bincode for binary serialization of the whole station. Ship
//! entities are flattened into `SavedShip` records and respawned on load.
//! Tick listeners are runtime wiring and are not saved.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use dockring_logic::config::{ConfigError, StationConfig};
use dockring_logic::Node;
use hecs::World;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{Berth, Ship, ShipId};
use crate::engine::StationEngine;
use crate::map::NavigationMap;
use crate::routes::RouteLedger;

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the simulation state
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub tick: u64,
    pub config: StationConfig,
    pub next_ship_id: u32,
    /// Ships on the map, ascending id order
    pub ships: Vec<SavedShip>,
    /// Routes of every ship ever seen, including departed ones
    pub routes: RouteLedger,
    pub selected: Option<ShipId>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SavedShip {
    pub ship: Ship,
    pub node: Node,
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("Corrupt save: {0}")]
    Corrupt(String),
}

/// Read a JSON station config and validate it.
pub fn read_config<R: Read>(reader: R) -> Result<StationConfig, SaveError> {
    let config: StationConfig = serde_json::from_reader(reader)?;
    config.validate()?;
    Ok(config)
}

fn snapshot(engine: &StationEngine) -> SaveData {
    let map = &engine.map;
    SaveData {
        version: SAVE_VERSION,
        tick: engine.tick,
        config: engine.config.clone(),
        next_ship_id: map.next_id,
        ships: map
            .berths()
            .into_iter()
            .map(|(ship, node)| SavedShip { ship, node })
            .collect(),
        routes: map.routes.clone(),
        selected: engine.selected,
    }
}

/// Rebuild a map from saved ships, checking the occupancy invariant.
fn restore_map(data: &SaveData) -> Result<NavigationMap, SaveError> {
    let mut map = NavigationMap::from_config(&data.config)?;
    let mut world = World::new();
    let mut index = BTreeMap::new();
    let mut occupancy = BTreeMap::new();

    for saved in &data.ships {
        if !map.dims.contains(saved.node) {
            return Err(SaveError::Corrupt(format!("{} off the map at {}", saved.ship.id, saved.node)));
        }
        if saved.ship.id.0 >= data.next_ship_id {
            return Err(SaveError::Corrupt(format!("{} beyond id counter", saved.ship.id)));
        }
        if index.contains_key(&saved.ship.id) {
            return Err(SaveError::Corrupt(format!("duplicate {}", saved.ship.id)));
        }
        if saved.node.is_exclusive() && occupancy.insert(saved.node, saved.ship.id).is_some() {
            return Err(SaveError::Corrupt(format!("{} shared by several ships", saved.node)));
        }
        let entity = world.spawn((saved.ship, Berth::new(saved.node)));
        index.insert(saved.ship.id, entity);
    }

    map.world = world;
    map.index = index;
    map.occupancy = occupancy;
    map.routes = data.routes.clone();
    map.next_id = data.next_ship_id;
    Ok(map)
}

impl StationEngine {
    /// Save simulation state to a writer
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        bincode::serialize_into(writer, &snapshot(self))?;
        Ok(())
    }

    /// Load simulation state from a reader. Registered listeners are kept.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let data: SaveData = bincode::deserialize_from(reader)?;
        if data.version != SAVE_VERSION {
            warn!("Rejected save with version {}", data.version);
            return Err(SaveError::VersionMismatch {
                expected: SAVE_VERSION,
                found: data.version,
            });
        }
        let map = restore_map(&data).inspect_err(|e| warn!("Rejected save: {}", e))?;

        self.map = map;
        self.config = data.config;
        self.tick = data.tick;
        self.selected = data.selected;
        self.reseed();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TickReport;
    use dockring_logic::{Coordinate, Direction};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::rc::Rc;

    fn busy_engine() -> StationEngine {
        let config = StationConfig {
            inbound_spawn_chance: 0.8,
            outbound_spawn_chance: 0.5,
            seed: Some(9),
            ..Default::default()
        };
        let mut engine = StationEngine::new(config).unwrap();
        for _ in 0..20 {
            engine.next_tick();
        }
        engine
    }

    #[test]
    fn test_save_load_roundtrip() {
        let engine = busy_engine();
        let mut buffer = Vec::new();
        engine.save(&mut buffer).expect("Save failed");

        let mut loaded = StationEngine::new(StationConfig::default()).unwrap();
        loaded.load(&buffer[..]).expect("Load failed");

        assert_eq!(loaded.current_tick(), 20);
        assert_eq!(loaded.config(), engine.config());
        assert_eq!(loaded.map().berths(), engine.map().berths());
        assert_eq!(loaded.map().routes(), engine.map().routes());
        assert_eq!(loaded.map().all_registries(), engine.map().all_registries());
    }

    #[test]
    fn test_load_restores_occupancy() {
        let engine = busy_engine();
        let mut buffer = Vec::new();
        engine.save(&mut buffer).unwrap();

        let mut loaded = StationEngine::new(StationConfig::default()).unwrap();
        loaded.load(&buffer[..]).unwrap();
        for node in loaded.map().nodes() {
            assert_eq!(loaded.map().is_free(node), engine.map().is_free(node), "{node}");
        }
        assert_eq!(loaded.map().occupancy, engine.map().occupancy);
    }

    #[test]
    fn test_load_keeps_listeners_and_id_counter() {
        let engine = busy_engine();
        let mut buffer = Vec::new();
        engine.save(&mut buffer).unwrap();

        let mut loaded = StationEngine::new(StationConfig::default()).unwrap();
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        loaded.subscribe(move |_: &TickReport| c.set(c.get() + 1));
        loaded.load(&buffer[..]).unwrap();

        let report = loaded.next_tick();
        assert_eq!(calls.get(), 1);
        assert_eq!(report.tick, 21);
        let max_old = engine.map().routes().iter().map(|(id, _)| id).max();
        for new_id in report.admitted.into_iter().chain(report.launched) {
            assert!(Some(new_id) > max_old);
        }
    }

    #[test]
    fn test_version_mismatch() {
        let engine = busy_engine();
        let mut data = snapshot(&engine);
        data.version = 99;
        let buffer = bincode::serialize(&data).unwrap();

        let mut loaded = StationEngine::new(StationConfig::default()).unwrap();
        match loaded.load(&buffer[..]) {
            Err(SaveError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, 99);
            }
            other => panic!("expected version mismatch, got {other:?}"),
        }
        assert_eq!(loaded.current_tick(), 0);
    }

    #[test]
    fn test_corrupt_occupancy_rejected() {
        let engine = busy_engine();
        let mut data = snapshot(&engine);
        let ring = Node::Ring(Coordinate::new(1, 0));
        data.ships = vec![
            SavedShip { ship: Ship { id: ShipId(0), ..data_ship() }, node: ring },
            SavedShip { ship: Ship { id: ShipId(1), ..data_ship() }, node: ring },
        ];
        data.next_ship_id = 2;
        let buffer = bincode::serialize(&data).unwrap();

        let mut loaded = StationEngine::new(StationConfig::default()).unwrap();
        assert!(matches!(loaded.load(&buffer[..]), Err(SaveError::Corrupt(_))));
    }

    fn data_ship() -> Ship {
        let mut rng = StdRng::seed_from_u64(0);
        let registry = crate::generation::random_registry(&mut rng, 0.0);
        Ship::new(ShipId(0), Direction::Inbound, registry)
    }

    #[test]
    fn test_read_config() {
        let json = r#"{ "ring_count": 4, "segment_count": 6, "seed": 3 }"#;
        let config = read_config(json.as_bytes()).unwrap();
        assert_eq!(config.ring_count, 4);
        assert_eq!(config.seed, Some(3));

        let bad = r#"{ "segment_count": 2 }"#;
        assert!(matches!(read_config(bad.as_bytes()), Err(SaveError::Config(_))));
        assert!(matches!(read_config("not json".as_bytes()), Err(SaveError::Json(_))));
    }
}
