use super::KinematicState;

/// Motion along a straight line: neutral particles or no field.
#[derive(Debug, Clone, PartialEq)]
pub struct StraightTrajectory {
    state: KinematicState,
}

impl StraightTrajectory {
    pub fn new(state: KinematicState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    /// `timeC` at which the transverse distance to the axis is smallest,
    /// relative to now; may be negative.
    fn closest_approach_time_c(&self) -> f64 {
        let pt2 = self.state.pt().powi(2);
        if pt2 == 0.0 {
            return 0.0;
        }
        let p = &self.state.momentum;
        let x = &self.state.position;
        -(x.x * p.x + x.y * p.y) / pt2 * self.state.energy
    }

    /// Range of radii the line visits from now on.
    pub fn radial_band(&self) -> (f64, f64) {
        if self.state.pt() == 0.0 {
            let r = self.state.radius();
            return (r, r);
        }
        let t = self.closest_approach_time_c().max(0.0);
        let closest = self.state.position + self.state.momentum / self.state.energy * t;
        (closest.x.hypot(closest.y), f64::INFINITY)
    }

    pub fn crosses_radius(&self, radius: f64) -> bool {
        let (min_r, max_r) = self.radial_band();
        self.state.pt() > 0.0 && min_r <= radius && radius <= max_r
    }

    /// Solves `|x_T + p_T/E · t|² = R²` for the smallest positive `t`.
    pub fn barrel_crossing_time_c(&self, radius: f64, on_layer: bool) -> Option<f64> {
        let p = &self.state.momentum;
        let x = &self.state.position;

        let a = p.x * p.x + p.y * p.y;
        if a == 0.0 {
            return None;
        }
        let b = x.x * p.x + x.y * p.y;
        let c = x.x * x.x + x.y * x.y - radius * radius;

        let discriminant = b * b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / a * self.state.energy;
        let t2 = (-b + sqrt_discriminant) / a * self.state.energy;

        let time_c = if on_layer {
            // drop the solution at the current position
            if t1.abs() < t2.abs() { t2 } else { t1 }
        } else if t1 > 0.0 {
            t1
        } else {
            t2
        };
        (time_c > 0.0).then_some(time_c)
    }

    pub fn advance(&mut self, delta_time_c: f64) {
        let velocity = self.state.momentum / self.state.energy;
        self.state.position += velocity * delta_time_c;
        self.state.advance_time(delta_time_c);
    }
}
