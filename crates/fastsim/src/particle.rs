//! Particle state carried through the detector.

use std::fmt;

use nalgebra::{Point3, Vector3};

/// A particle being propagated through the tracker.
///
/// Positions are in cm, time in ns, momentum and energy in GeV. The
/// navigator overwrites position, time and momentum after every move; the
/// owner of the particle (usually the [`ParticleLooper`](crate::looper::ParticleLooper))
/// keeps it alive.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// PDG Monte Carlo particle code
    pub pdg_id: i32,
    /// Charge in units of the elementary charge
    pub charge: f64,
    /// Position (cm)
    pub position: Point3<f64>,
    /// Lab-frame time (ns)
    pub time: f64,
    /// Momentum (GeV/c)
    pub momentum: Vector3<f64>,
    /// Total energy (GeV)
    pub energy: f64,
    /// Remaining proper lifetime as `c·τ` (cm); `None` for stable particles
    pub remaining_proper_lifetime_c: Option<f64>,
    /// Index of the simulated track this particle feeds, once registered
    pub sim_track: Option<usize>,
}

impl Particle {
    /// Creates a stable particle.
    ///
    /// # Examples
    ///
    /// ```
    /// use fastsim::particle::Particle;
    /// use nalgebra::{Point3, Vector3};
    ///
    /// // massless neutral particle leaving the origin at 45 degrees
    /// let photon = Particle::new(22, 0.0, Point3::origin(), 0.0, Vector3::new(1.0, 0.0, 1.0), 2f64.sqrt());
    /// assert!(photon.is_stable());
    /// assert!((photon.pt() - 1.0).abs() < 1e-12);
    /// assert!(photon.mass() < 1e-7);
    /// ```
    pub fn new(
        pdg_id: i32,
        charge: f64,
        position: Point3<f64>,
        time: f64,
        momentum: Vector3<f64>,
        energy: f64,
    ) -> Self {
        Self {
            pdg_id,
            charge,
            position,
            time,
            momentum,
            energy,
            remaining_proper_lifetime_c: None,
            sim_track: None,
        }
    }

    /// Creates a particle from its mass instead of its energy.
    pub fn with_mass(
        pdg_id: i32,
        charge: f64,
        position: Point3<f64>,
        momentum: Vector3<f64>,
        mass: f64,
    ) -> Self {
        let energy = (momentum.magnitude_squared() + mass * mass).sqrt();
        Self::new(pdg_id, charge, position, 0.0, momentum, energy)
    }

    /// Sets the remaining proper lifetime (`c·τ`, cm).
    pub fn with_proper_lifetime_c(mut self, proper_lifetime_c: f64) -> Self {
        self.remaining_proper_lifetime_c = Some(proper_lifetime_c);
        self
    }

    /// Distance from the beam axis (cm)
    pub fn radius(&self) -> f64 {
        self.position.x.hypot(self.position.y)
    }

    /// Transverse momentum (GeV/c)
    pub fn pt(&self) -> f64 {
        self.momentum.x.hypot(self.momentum.y)
    }

    /// Momentum magnitude (GeV/c)
    pub fn p(&self) -> f64 {
        self.momentum.magnitude()
    }

    /// Invariant mass (GeV/c²), clamped at zero against rounding
    pub fn mass(&self) -> f64 {
        (self.energy * self.energy - self.momentum.magnitude_squared())
            .max(0.0)
            .sqrt()
    }

    /// Lorentz factor `E / m`; infinite for massless particles
    pub fn gamma(&self) -> f64 {
        let mass = self.mass();
        if mass > 0.0 {
            self.energy / mass
        } else {
            f64::INFINITY
        }
    }

    /// Kinetic energy (GeV)
    pub fn kinetic_energy(&self) -> f64 {
        self.energy - self.mass()
    }

    pub fn is_stable(&self) -> bool {
        self.remaining_proper_lifetime_c.is_none()
    }

    /// True once the remaining proper lifetime has run out.
    pub fn has_decayed(&self) -> bool {
        matches!(self.remaining_proper_lifetime_c, Some(remaining) if remaining <= 0.0)
    }

    /// Reduces the remaining proper lifetime, never below zero.
    pub fn reduce_remaining_proper_lifetime_c(&mut self, reduction: f64) {
        if let Some(remaining) = self.remaining_proper_lifetime_c.as_mut() {
            *remaining = (*remaining - reduction).max(0.0);
        }
    }

    /// True when the transverse momentum points towards the beam axis.
    pub fn moves_inward(&self) -> bool {
        self.momentum.x * self.position.x + self.momentum.y * self.position.y < 0.0
    }

    /// True when the particle does not move at all.
    pub fn is_at_rest(&self) -> bool {
        self.momentum.x == 0.0 && self.momentum.y == 0.0 && self.momentum.z == 0.0
    }

    /// Stops the particle in place; the energy drops to the rest mass.
    pub fn stop(&mut self) {
        self.energy = self.mass();
        self.momentum = Vector3::zeros();
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "pdgId={} charge={} position=({:.4}, {:.4}, {:.4}, t={:.4}) momentum=({:.4}, {:.4}, {:.4}, E={:.4})",
            self.pdg_id,
            self.charge,
            self.position.x,
            self.position.y,
            self.position.z,
            self.time,
            self.momentum.x,
            self.momentum.y,
            self.momentum.z,
            self.energy,
        )
    }
}
