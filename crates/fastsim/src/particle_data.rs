//! Static properties of particle species, keyed by PDG id.

use std::collections::HashMap;

use crate::error::{FastSimError, Result};

/// Charge, mass and mean proper decay length of one species.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleData {
    /// Charge in units of the elementary charge
    pub charge: f64,
    /// Mass (GeV/c²)
    pub mass: f64,
    /// Mean proper decay length `c·τ` (cm); `None` for stable species
    pub ctau: Option<f64>,
}

impl ParticleData {
    pub fn stable(charge: f64, mass: f64) -> Self {
        Self {
            charge,
            mass,
            ctau: None,
        }
    }

    pub fn unstable(charge: f64, mass: f64, ctau: f64) -> Self {
        Self {
            charge,
            mass,
            ctau: Some(ctau),
        }
    }

    fn antiparticle(self) -> Self {
        Self {
            charge: -self.charge,
            ..self
        }
    }
}

/// Lookup table of particle species.
///
/// Only particles are stored; a negative PDG id resolves to the
/// antiparticle of the stored species with the opposite charge.
///
/// # Examples
///
/// ```
/// use fastsim::particle_data::ParticleDataTable;
///
/// let table = ParticleDataTable::standard();
/// assert_eq!(table.get(211).unwrap().charge, 1.0);
/// assert_eq!(table.get(-211).unwrap().charge, -1.0);
/// assert!(table.get(22).unwrap().ctau.is_none());
/// assert!(table.get(999_999).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParticleDataTable {
    species: HashMap<i32, ParticleData>,
}

impl ParticleDataTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Leptons, photon, light mesons and baryons commonly seen in a tracker.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table
            .insert(11, ParticleData::stable(-1.0, 0.000_510_999))
            .insert(12, ParticleData::stable(0.0, 0.0))
            .insert(13, ParticleData::unstable(-1.0, 0.105_658, 65_865.9))
            .insert(14, ParticleData::stable(0.0, 0.0))
            .insert(15, ParticleData::unstable(-1.0, 1.776_86, 0.008_711))
            .insert(16, ParticleData::stable(0.0, 0.0))
            .insert(22, ParticleData::stable(0.0, 0.0))
            .insert(111, ParticleData::unstable(0.0, 0.134_977, 2.55e-6))
            .insert(130, ParticleData::unstable(0.0, 0.497_611, 1_534.0))
            .insert(211, ParticleData::unstable(1.0, 0.139_570, 780.45))
            .insert(310, ParticleData::unstable(0.0, 0.497_611, 2.684_4))
            .insert(321, ParticleData::unstable(1.0, 0.493_677, 371.2))
            .insert(2112, ParticleData::stable(0.0, 0.939_565))
            .insert(2212, ParticleData::stable(1.0, 0.938_272))
            .insert(3122, ParticleData::unstable(0.0, 1.115_683, 7.89));
        table
    }

    /// Adds or replaces a species.
    pub fn insert(&mut self, pdg_id: i32, data: ParticleData) -> &mut Self {
        self.species.insert(pdg_id, data);
        self
    }

    pub fn get(&self, pdg_id: i32) -> Result<ParticleData> {
        if let Some(data) = self.species.get(&pdg_id) {
            return Ok(*data);
        }
        self.species
            .get(&pdg_id.saturating_neg())
            .map(|data| data.antiparticle())
            .ok_or(FastSimError::UnknownParticle(pdg_id))
    }

    pub fn charge(&self, pdg_id: i32) -> Result<f64> {
        self.get(pdg_id).map(|data| data.charge)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }
}
