//! Ship components.

use dockring_logic::registry::Registry;
use dockring_logic::{Direction, Node};
use serde::{Deserialize, Serialize};

/// Stable ship identity, allocated in ascending order by the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub u32);

impl std::fmt::Display for ShipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity data of a ship. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub id: ShipId,
    pub direction: Direction,
    pub registry: Registry,
}

impl Ship {
    pub fn new(id: ShipId, direction: Direction, registry: Registry) -> Self {
        Self {
            id,
            direction,
            registry,
        }
    }
}

impl std::fmt::Display for Ship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ship: {}, Registry: {}", self.direction, self.registry)
    }
}

/// The node a ship currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Berth {
    pub node: Node,
}

impl Berth {
    pub fn new(node: Node) -> Self {
        Self { node }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ship_display() {
        let registry = Registry::new("QRS", "404").unwrap();
        let ship = Ship::new(ShipId(7), Direction::Inbound, registry);
        assert_eq!(ship.to_string(), "Ship: Inbound, Registry: QRS-404");
        assert_eq!(ship.id.to_string(), "#7");
    }
}
