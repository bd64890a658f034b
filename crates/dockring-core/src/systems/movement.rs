//! Movement system - advances every ship one step per tick
//!
//! Ships are processed one at a time in ascending id order and occupancy is
//! updated immediately, so the lowest id claims a contested node and anyone
//! after it holds. A node vacated earlier in the pass is open to later ships.
//! An oncoming pair on one segment trades places; the partner counts as
//! moved and is skipped when its own turn comes.

use std::collections::BTreeSet;

use dockring_logic::movement::{plan_step, Step};
use dockring_logic::{Direction, Node};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::components::ShipId;
use crate::map::NavigationMap;

/// What happened to each ship during one movement pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementReport {
    /// Moved to a new node and stayed on the map
    pub advanced: Vec<ShipId>,
    /// Target taken; stayed put
    pub held: Vec<ShipId>,
    /// Inbound ships that reached the dock and left the map
    pub docked: Vec<ShipId>,
    /// Outbound ships that left past the outer ring
    pub departed: Vec<ShipId>,
}

impl MovementReport {
    pub fn exited(&self) -> usize {
        self.docked.len() + self.departed.len()
    }
}

/// Run one movement pass over every ship on the map.
pub fn movement_system(map: &mut NavigationMap) -> MovementReport {
    let mut report = MovementReport::default();
    let mut moved = BTreeSet::new();
    let ids: Vec<ShipId> = map.index.keys().copied().collect();

    for id in ids {
        if moved.contains(&id) {
            continue;
        }
        let (Some(ship), Some(node)) = (map.ship(id), map.location(id)) else {
            continue;
        };
        let dims = map.dimensions();
        let step = plan_step(&dims, node, ship.direction, |n| map.occupant_direction(n));

        match step {
            Step::Hold => {
                debug!("{} holding at {}", id, node);
                report.held.push(id);
            }
            Step::Advance(target) => {
                if !map.move_ship(id, target) {
                    report.held.push(id);
                    continue;
                }
                if target == Node::Dock && ship.direction == Direction::Inbound {
                    info!("Inbound {} ({}) docked", ship.registry, id);
                    map.remove_ship(id);
                    report.docked.push(id);
                } else {
                    report.advanced.push(id);
                }
            }
            Step::Exchange(target) => {
                let partner = map.ship_at(target.ring(), target.segment() as i64).map(|s| s.id);
                match partner {
                    Some(partner) if map.exchange_ships(id, partner) => {
                        moved.insert(partner);
                        report.advanced.push(id);
                        report.advanced.push(partner);
                    }
                    _ => report.held.push(id),
                }
            }
            Step::Exit => {
                map.remove_ship(id);
                match ship.direction {
                    Direction::Inbound => report.docked.push(id),
                    Direction::Outbound => {
                        info!("Outbound {} ({}) departed from {}", ship.registry, id, node);
                        report.departed.push(id);
                    }
                }
            }
        }
    }

    report
}
