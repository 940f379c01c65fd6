use std::f64::consts::{PI, TAU};

use nalgebra::{Point2, Vector3};

use super::KinematicState;
use crate::constants::{FIELD_CURVATURE_FACTOR, ROOT_TOLERANCE};
use crate::error::{FastSimError, Result};

/// Motion of a charged particle in a uniform axial field: a circle in the
/// transverse plane, a straight line along z.
///
/// The transverse position is `center + radius · (cos φ, sin φ)` with the
/// phase advancing as `φ = φ₀ + ω · Δ(timeC)`. The sign of `ω` carries the
/// sense of rotation: clockwise (negative) for a positive charge in a field
/// along +z.
#[derive(Debug, Clone, PartialEq)]
pub struct HelixTrajectory {
    state: KinematicState,
    radius: f64,
    center: Point2<f64>,
    phase: f64,
    phase_speed: f64,
}

impl HelixTrajectory {
    /// Sets up the helix for a particle of `charge` (e) in `magnetic_field_z` (T).
    ///
    /// Both `charge` and `magnetic_field_z` must be non-zero and the state
    /// must carry transverse momentum.
    pub fn new(state: KinematicState, charge: f64, magnetic_field_z: f64) -> Self {
        let pt = state.pt();
        let q_b = charge * magnetic_field_z;
        let radius = pt / (FIELD_CURVATURE_FACTOR * q_b.abs());
        let phase_speed = -q_b * FIELD_CURVATURE_FACTOR / state.energy;

        let sense = phase_speed.signum();
        let sin_phase = -sense * state.momentum.x / pt;
        let cos_phase = sense * state.momentum.y / pt;
        let phase = sin_phase.atan2(cos_phase);
        let center = Point2::new(
            state.position.x - radius * cos_phase,
            state.position.y - radius * sin_phase,
        );

        Self {
            state,
            radius,
            center,
            phase,
            phase_speed,
        }
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// Radius of the transverse circle (cm)
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    /// Current phase on the transverse circle (rad)
    pub fn phase(&self) -> f64 {
        self.phase
    }

    /// Signed angular speed per unit `timeC` (rad/cm)
    pub fn phase_speed(&self) -> f64 {
        self.phase_speed
    }

    /// `timeC` needed for one full turn (cm)
    pub fn period_c(&self) -> f64 {
        TAU / self.phase_speed.abs()
    }

    fn center_distance(&self) -> f64 {
        self.center.x.hypot(self.center.y)
    }

    /// Smallest distance from the beam axis reached on the circle
    pub fn min_radius(&self) -> f64 {
        (self.center_distance() - self.radius).abs()
    }

    /// Largest distance from the beam axis reached on the circle
    pub fn max_radius(&self) -> f64 {
        self.center_distance() + self.radius
    }

    pub fn crosses_radius(&self, radius: f64) -> bool {
        self.min_radius() <= radius && radius <= self.max_radius()
    }

    fn point_at(&self, phase: f64) -> Point2<f64> {
        Point2::new(
            self.center.x + self.radius * phase.cos(),
            self.center.y + self.radius * phase.sin(),
        )
    }

    fn residual(&self, phase: f64, radius: f64) -> f64 {
        let point = self.point_at(phase);
        (point.x.hypot(point.y) - radius).abs()
    }

    /// Phases at which the circle meets the cylinder of `radius`.
    ///
    /// Writing the intersection condition in `s = sin φ` gives
    /// `a·s² + b·s + c = 0` with `a = F² + G²`, `b = 2EF`, `c = E² − G²`,
    /// `E = cx² + cy² + r² − R²`, `F = 2·cy·r`, `G = 2·cx·r`. Every root
    /// `s` fixes `φ` up to the ambiguity `φ ↔ π − φ` of `asin`: each
    /// candidate is checked against the cylinder and reflected when it misses.
    fn intersection_phases(&self, radius: f64) -> Result<Vec<f64>> {
        let (cx, cy, r) = (self.center.x, self.center.y, self.radius);
        let e = cx * cx + cy * cy + r * r - radius * radius;
        let f = 2.0 * cy * r;
        let g = 2.0 * cx * r;

        let a = f * f + g * g;
        let b = 2.0 * e * f;
        let c = e * e - g * g;
        if a == 0.0 {
            // circle centred on the axis: it never crosses another radius
            return Ok(Vec::new());
        }

        let discriminant = (b * b - 4.0 * a * c).max(0.0);
        let q = -0.5 * (b + b.signum() * discriminant.sqrt());
        let roots = if q == 0.0 {
            [-b / (2.0 * a); 2]
        } else {
            [q / a, c / q]
        };

        let mut phases = Vec::with_capacity(4);
        for sin_phase in roots {
            phases.extend(self.select_phases(sin_phase, radius)?);
        }
        Ok(phases
            .into_iter()
            .map(|phase| self.refine(phase, radius))
            .collect())
    }

    /// The phases with `sin φ = sin_phase` that lie on the cylinder of `radius`:
    /// `asin(sin_phase)`, its reflection `π − asin(sin_phase)`, or both.
    ///
    /// # Errors
    ///
    /// [`FastSimError::RootSelection`] when neither branch lies within
    /// [`ROOT_TOLERANCE`] of the cylinder.
    pub(super) fn select_phases(&self, sin_phase: f64, radius: f64) -> Result<Vec<f64>> {
        let phase = sin_phase.clamp(-1.0, 1.0).asin();
        let reflected = PI - phase;
        let direct_residual = self.residual(phase, radius);
        let reflected_residual = self.residual(reflected, radius);

        if direct_residual > ROOT_TOLERANCE && reflected_residual > ROOT_TOLERANCE {
            return Err(FastSimError::RootSelection {
                radius,
                residual: direct_residual.min(reflected_residual),
            });
        }

        let mut phases = Vec::with_capacity(2);
        if direct_residual <= ROOT_TOLERANCE {
            phases.push(phase);
        }
        // both branches lie on the cylinder when the circle centre sits on the y axis
        if reflected_residual <= ROOT_TOLERANCE {
            phases.push(reflected);
        }
        Ok(phases)
    }

    /// Newton steps on `|point(φ)|² − R²`; `asin` loses precision close to
    /// tangential intersections.
    fn refine(&self, mut phase: f64, radius: f64) -> f64 {
        let squared_residual = |phase: f64| {
            let point = self.point_at(phase);
            point.x * point.x + point.y * point.y - radius * radius
        };
        for _ in 0..2 {
            let value = squared_residual(phase);
            let slope =
                2.0 * self.radius * (self.center.y * phase.cos() - self.center.x * phase.sin());
            if value == 0.0 || slope == 0.0 {
                break;
            }
            let candidate = phase - value / slope;
            if squared_residual(candidate).abs() >= value.abs() {
                break;
            }
            phase = candidate;
        }
        phase
    }

    /// Smallest positive `timeC` at which the helix reaches `radius`.
    ///
    /// With `on_layer` set, intersections at the current position are ignored.
    pub fn barrel_crossing_time_c(&self, radius: f64, on_layer: bool) -> Result<Option<f64>> {
        if !self.crosses_radius(radius) {
            return Ok(None);
        }

        let start = Point2::new(self.state.position.x, self.state.position.y);
        let period = self.period_c();
        let time_c = self
            .intersection_phases(radius)?
            .into_iter()
            .filter(|&phase| !on_layer || (self.point_at(phase) - start).norm() > ROOT_TOLERANCE)
            .map(|phase| ((phase - self.phase) / self.phase_speed).rem_euclid(period))
            .filter(|&time_c| time_c > 0.0)
            .min_by(f64::total_cmp);
        Ok(time_c)
    }

    /// Rotates position and transverse momentum by `ω · Δ(timeC)` and moves
    /// z linearly. `|p|` and `E` do not change.
    pub fn advance(&mut self, delta_time_c: f64) {
        let phase = self.phase + self.phase_speed * delta_time_c;
        let point = self.point_at(phase);
        let pt = self.state.pt();
        let sense = self.phase_speed.signum();

        self.state.position.x = point.x;
        self.state.position.y = point.y;
        self.state.position.z += self.state.momentum.z / self.state.energy * delta_time_c;
        self.state.momentum = Vector3::new(
            -sense * pt * phase.sin(),
            sense * pt * phase.cos(),
            self.state.momentum.z,
        );
        self.state.advance_time(delta_time_c);
        self.phase = phase;
    }
}
