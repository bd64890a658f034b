//! Admission - bringing new ships onto the map
//!
//! Inbound ships appear on the first free segment of the admission ring,
//! scanning segments in ascending order. Outbound ships are launched from the
//! dock, which never runs out of room.

use dockring_logic::{Direction, Node};
use log::{debug, info};
use rand::Rng;

use crate::components::ShipId;
use crate::generation::random_registry;
use crate::map::NavigationMap;

impl NavigationMap {
    /// Ring scanned by inbound admission.
    pub fn admission_ring_number(&self) -> u32 {
        self.admission_ring.ring(&self.dims)
    }

    /// First free node of the admission ring, lowest segment first.
    pub fn free_admission_node(&self) -> Option<Node> {
        self.dims
            .ring_nodes(self.admission_ring_number())
            .find(|node| self.is_free(*node))
    }

    /// Admit a new inbound ship if the admission ring has room.
    ///
    /// Returns `false` with no side effects when every scanned node is taken.
    pub fn try_admit_inbound(&mut self, rng: &mut impl Rng) -> bool {
        self.admit_inbound(rng).is_some()
    }

    /// Like [`NavigationMap::try_admit_inbound`] but returns the new ship's id.
    pub fn admit_inbound(&mut self, rng: &mut impl Rng) -> Option<ShipId> {
        let Some(node) = self.free_admission_node() else {
            debug!("Admission ring {} full", self.admission_ring_number());
            return None;
        };
        let registry = random_registry(rng, self.forged_registry_chance);
        let id = self.spawn_ship(Direction::Inbound, registry, node);
        info!("Inbound {} ({}) admitted at {}", registry, id, node);
        Some(id)
    }

    /// Create an outbound ship on the dock. Always succeeds.
    pub fn launch_outbound(&mut self, rng: &mut impl Rng) -> ShipId {
        let registry = random_registry(rng, self.forged_registry_chance);
        let id = self.spawn_ship(Direction::Outbound, registry, Node::Dock);
        info!("Outbound {} ({}) launched from dock", registry, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use dockring_logic::config::AdmissionRing;
    use dockring_logic::Coordinate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn ring(r: u32, s: u32) -> Node {
        Node::Ring(Coordinate::new(r, s))
    }

    #[test]
    fn test_admits_lowest_free_segment() {
        let mut map = NavigationMap::new(3, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let ids: Vec<ShipId> = (0..4).map(|_| map.admit_inbound(&mut rng).unwrap()).collect();
        for (segment, id) in ids.iter().enumerate() {
            assert_eq!(map.location(*id), Some(ring(3, segment as u32)));
            assert_eq!(map.ship(*id).unwrap().direction, Direction::Inbound);
        }
    }

    #[test]
    fn test_full_ring_rejects_without_side_effects() {
        let mut map = NavigationMap::new(3, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..4 {
            assert!(map.try_admit_inbound(&mut rng));
        }
        let routes_before = map.routes().len();
        assert!(!map.try_admit_inbound(&mut rng));
        assert_eq!(map.ship_count(), 4);
        assert_eq!(map.routes().len(), routes_before);
    }

    #[test]
    fn test_fills_gap_first() {
        let mut map = NavigationMap::new(3, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let ids: Vec<ShipId> = (0..4).map(|_| map.admit_inbound(&mut rng).unwrap()).collect();
        map.remove_ship(ids[2]);
        let id = map.admit_inbound(&mut rng).unwrap();
        assert_eq!(map.location(id), Some(ring(3, 2)));
    }

    #[test]
    fn test_route_starts_at_admission_node() {
        let mut map = NavigationMap::new(3, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let id = map.admit_inbound(&mut rng).unwrap();
        assert_eq!(map.route_of(id), &[ring(3, 0)]);
    }

    #[test]
    fn test_legacy_admission_ring() {
        let mut map = NavigationMap::new(3, 4).unwrap();
        map.set_admission_ring(AdmissionRing::Legacy);
        let mut rng = StdRng::seed_from_u64(5);
        let id = map.admit_inbound(&mut rng).unwrap();
        assert_eq!(map.location(id), Some(ring(2, 0)));
    }

    #[test]
    fn test_launch_outbound_on_dock() {
        let mut map = NavigationMap::new(3, 4).unwrap();
        let mut rng = StdRng::seed_from_u64(6);
        let ids: Vec<ShipId> = (0..10).map(|_| map.launch_outbound(&mut rng)).collect();
        for id in &ids {
            assert_eq!(map.location(*id), Some(Node::Dock));
            assert_eq!(map.route_of(*id), &[Node::Dock]);
            assert_eq!(map.ship(*id).unwrap().direction, Direction::Outbound);
        }
        assert!(map.is_free(Node::Dock));
    }
}
