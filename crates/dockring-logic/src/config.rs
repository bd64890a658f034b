//! Station configuration and validation.
//!
//! Defaults reproduce the classic 3-ring, 4-segment station with a 10%
//! spawn chance per tick in each direction and a 10% forged-registry rate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coords::Dimensions;
use crate::error::MapError;

/// Which ring inbound admission scans for a free berth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AdmissionRing {
    /// The true outer ring, `ring_count`.
    #[default]
    Outermost,
    /// One ring inside the outer boundary, `ring_count - 1`, never below
    /// ring 1. Kept for stations tuned against the older scan.
    Legacy,
}

impl AdmissionRing {
    /// Ring number scanned on a map with these dimensions.
    pub fn ring(&self, dims: &Dimensions) -> u32 {
        match self {
            AdmissionRing::Outermost => dims.ring_count(),
            AdmissionRing::Legacy => dims.ring_count().saturating_sub(1).max(1),
        }
    }
}

/// Full configuration for a simulated station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StationConfig {
    pub ring_count: u32,
    pub segment_count: u32,
    /// Per-tick probability of attempting inbound admission.
    pub inbound_spawn_chance: f64,
    /// Per-tick probability of launching an outbound ship from the dock.
    pub outbound_spawn_chance: f64,
    /// Probability a new ship displays a random checksum digit.
    pub forged_registry_chance: f64,
    pub admission_ring: AdmissionRing,
    /// Fixed RNG seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            ring_count: 3,
            segment_count: 4,
            inbound_spawn_chance: 0.1,
            outbound_spawn_chance: 0.1,
            forged_registry_chance: 0.1,
            admission_ring: AdmissionRing::Outermost,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Map(#[from] MapError),
    #[error("{field} must be a probability in [0, 1], got {value}")]
    InvalidProbability { field: &'static str, value: f64 },
}

impl StationConfig {
    /// Check the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dimensions()?;
        for (field, value) in [
            ("inbound_spawn_chance", self.inbound_spawn_chance),
            ("outbound_spawn_chance", self.outbound_spawn_chance),
            ("forged_registry_chance", self.forged_registry_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }
        Ok(())
    }

    pub fn dimensions(&self) -> Result<Dimensions, MapError> {
        Dimensions::new(self.ring_count, self.segment_count)
    }
}
