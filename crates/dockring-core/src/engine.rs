//! Simulation engine - main entry point for running the station

use dockring_logic::config::{ConfigError, StationConfig};
use dockring_logic::Node;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::components::{Ship, ShipId};
use crate::map::NavigationMap;
use crate::systems::{movement_system, MovementReport};

/// Summary of one completed tick, handed to every listener.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick counter after the increment
    pub tick: u64,
    pub movement: MovementReport,
    /// Inbound ship admitted this tick, if any
    pub admitted: Option<ShipId>,
    /// Outbound ship launched this tick, if any
    pub launched: Option<ShipId>,
}

/// Handle returned by [`StationEngine::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&TickReport)>;

/// Main simulation engine
pub struct StationEngine {
    pub(crate) map: NavigationMap,
    pub(crate) config: StationConfig,
    pub(crate) tick: u64,
    pub(crate) selected: Option<ShipId>,
    rng: StdRng,
    /// Called synchronously after each tick, in registration order
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl StationEngine {
    /// Create an engine with an empty map. Fails on an invalid config.
    pub fn new(config: StationConfig) -> Result<Self, ConfigError> {
        let map = NavigationMap::from_config(&config)?;
        let rng = seed_rng(config.seed, 0);
        Ok(Self {
            map,
            config,
            tick: 0,
            selected: None,
            rng,
            listeners: Vec::new(),
            next_listener: 0,
        })
    }

    /// Advance the simulation by one tick.
    ///
    /// Order: move ships, maybe admit an inbound ship, maybe launch an
    /// outbound ship, bump the counter, then notify listeners.
    pub fn next_tick(&mut self) -> TickReport {
        let movement = movement_system(&mut self.map);

        let admitted = if self.rng.gen_bool(self.config.inbound_spawn_chance) {
            self.map.admit_inbound(&mut self.rng)
        } else {
            None
        };

        let launched = if self.rng.gen_bool(self.config.outbound_spawn_chance) {
            Some(self.map.launch_outbound(&mut self.rng))
        } else {
            None
        };

        self.tick += 1;
        let report = TickReport {
            tick: self.tick,
            movement,
            admitted,
            launched,
        };
        debug!(
            "Tick {}: {} ships, {} advanced, {} held, {} exited",
            self.tick,
            self.map.ship_count(),
            report.movement.advanced.len(),
            report.movement.held.len(),
            report.movement.exited()
        );

        for (_, listener) in self.listeners.iter_mut() {
            listener(&report);
        }
        report
    }

    /// Register a tick-completed listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&TickReport) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn map(&self) -> &NavigationMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut NavigationMap {
        &mut self.map
    }

    /// Mutable access to the engine RNG, for callers driving admission by hand.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Select a ship for inspection. An id not on the map clears the
    /// selection; returns whether a ship is now selected.
    pub fn select_ship(&mut self, id: ShipId) -> bool {
        self.selected = self.map.ship(id).map(|ship| ship.id);
        self.selected.is_some()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Selected ship, if it is still on the map.
    pub fn selected_ship(&self) -> Option<Ship> {
        self.selected.and_then(|id| self.map.ship(id))
    }

    /// Route of the selected ship. Survives the ship leaving the map.
    pub fn selected_route(&self) -> &[Node] {
        match self.selected {
            Some(id) => self.map.route_of(id),
            None => &[],
        }
    }

    pub(crate) fn reseed(&mut self) {
        self.rng = seed_rng(self.config.seed, self.tick);
    }
}

/// Seeded RNG when a seed is configured, offset by `tick` so a reloaded
/// engine does not replay its opening draws.
fn seed_rng(seed: Option<u64>, tick: u64) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(tick)),
        None => StdRng::from_entropy(),
    }
}
