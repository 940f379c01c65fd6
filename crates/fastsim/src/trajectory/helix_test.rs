use std::f64::consts::TAU;

use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::FastSimError;
use crate::constants::{FIELD_CURVATURE_FACTOR, SPEED_OF_LIGHT};
use crate::trajectory::{HelixTrajectory, KinematicState};

const PION_MASS: f64 = 0.139_570;

fn make_state(position: Point3<f64>, momentum: Vector3<f64>) -> KinematicState {
    KinematicState {
        position,
        time: 0.0,
        momentum,
        energy: (momentum.magnitude_squared() + PION_MASS * PION_MASS).sqrt(),
    }
}

/// `timeC` from a point on the circle to a point at chord distance `chord`
fn arc_time_c(helix: &HelixTrajectory, chord: f64) -> f64 {
    let angle = 2.0 * (chord / (2.0 * helix.radius())).asin();
    let state = helix.state();
    helix.radius() * angle * state.energy / state.pt()
}

#[test]
fn test_radius_at_3_8_tesla() {
    let state = make_state(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
    let helix = HelixTrajectory::new(state, 1.0, 3.8);

    let expected = 1.0 / (SPEED_OF_LIGHT * 1.0e-4 * 3.8);
    assert_relative_eq!(helix.radius(), expected, max_relative = 1e-9);
    assert_relative_eq!(helix.radius(), 87.77, max_relative = 1e-3);
}

#[test]
fn test_positive_charge_turns_clockwise() {
    let state = make_state(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
    let mut helix = HelixTrajectory::new(state, 1.0, 3.8);
    assert!(helix.phase_speed() < 0.0);

    helix.advance(1.0);
    assert!(helix.state().position.y < 0.0);

    let state = make_state(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
    let mut negative = HelixTrajectory::new(state, -1.0, 3.8);
    negative.advance(1.0);
    assert!(negative.state().position.y > 0.0);
}

#[test]
fn test_center_is_one_radius_from_the_start() {
    let state = make_state(Point3::new(3.0, -4.0, 1.0), Vector3::new(0.6, 0.8, 2.0));
    let helix = HelixTrajectory::new(state, -1.0, 2.0);

    let center = helix.center();
    assert_relative_eq!((3.0 - center.x).hypot(-4.0 - center.y), helix.radius(), max_relative = 1e-12);
    // centre lies perpendicular to the transverse momentum
    assert_relative_eq!((3.0 - center.x) * 0.6 + (-4.0 - center.y) * 0.8, 0.0, epsilon = 1e-9);
}

#[test]
fn test_closure_after_one_period() {
    let momentum = Vector3::new(0.7, -1.3, 0.0);
    let start = Point3::new(2.0, 1.0, 5.0);
    let mut helix = HelixTrajectory::new(make_state(start, momentum), 1.0, 3.8);

    helix.advance(helix.period_c());

    let state = helix.state();
    assert_relative_eq!(state.position, start, max_relative = 1e-6);
    assert_relative_eq!(state.momentum, momentum, max_relative = 1e-6);
}

#[test]
fn test_longitudinal_motion_is_linear() {
    let momentum = Vector3::new(1.0, 0.0, 2.0);
    let mut helix = HelixTrajectory::new(make_state(Point3::origin(), momentum), -1.0, 3.8);
    let period = helix.period_c();
    let energy = helix.state().energy;

    helix.advance(period);

    let state = helix.state();
    assert_relative_eq!(state.position.z, 2.0 / energy * period, max_relative = 1e-12);
    assert_relative_eq!(state.position.x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(state.time, period / SPEED_OF_LIGHT, max_relative = 1e-12);
    assert_eq!(state.momentum.z, 2.0);
    assert_relative_eq!(state.momentum.magnitude(), momentum.magnitude(), max_relative = 1e-12);
}

#[test]
fn test_radial_band() {
    let helix = HelixTrajectory::new(
        make_state(Point3::origin(), Vector3::new(0.0, 1.0, 0.0)),
        1.0,
        3.8,
    );

    assert_relative_eq!(helix.min_radius(), 0.0, epsilon = 1e-9);
    assert_relative_eq!(helix.max_radius(), 2.0 * helix.radius(), max_relative = 1e-12);
    assert!(helix.crosses_radius(100.0));
    assert!(!helix.crosses_radius(200.0));
    assert_eq!(helix.barrel_crossing_time_c(200.0, false).unwrap(), None);
}

#[test]
fn test_crossing_time_from_the_axis() {
    // centre on the y axis: both branches of asin are intersections
    let helix = HelixTrajectory::new(
        make_state(Point3::origin(), Vector3::new(1.0, 0.0, 0.0)),
        1.0,
        3.8,
    );
    assert_relative_eq!(helix.center().x, 0.0, epsilon = 1e-12);

    let time_c = helix.barrel_crossing_time_c(10.0, false).unwrap().unwrap();
    assert_relative_eq!(time_c, arc_time_c(&helix, 10.0), max_relative = 1e-9);
}

#[test]
fn test_on_layer_finds_the_way_back() {
    let mut helix = HelixTrajectory::new(
        make_state(Point3::origin(), Vector3::new(0.6, 0.3, 0.0)),
        -1.0,
        3.8,
    );
    let radius = 50.0;
    let first = helix.barrel_crossing_time_c(radius, false).unwrap().unwrap();
    helix.advance(first);

    let again = HelixTrajectory::new(helix.state().clone(), -1.0, 3.8);
    let second = again.barrel_crossing_time_c(radius, true).unwrap().unwrap();

    // the circle leaves the cylinder and re-enters it symmetrically
    let full_turn = TAU * again.radius() * again.state().energy / again.state().pt();
    assert_relative_eq!(second, full_turn - 2.0 * first, max_relative = 1e-9);
}

#[test]
fn test_round_trip_lands_on_surface() {
    let mut rng = ChaChaRng::seed_from_u64(42);

    for _ in 0..200 {
        let pt = rng.random_range(0.5..5.0);
        let angle = rng.random_range(0.0..TAU);
        let pz = rng.random_range(-3.0..3.0);
        let charge = if rng.random::<bool>() { 1.0 } else { -1.0 };
        let field = rng.random_range(0.5..4.0);
        let momentum = Vector3::new(pt * angle.cos(), pt * angle.sin(), pz);

        let mut helix = HelixTrajectory::new(make_state(Point3::origin(), momentum), charge, field);
        let radius = rng.random_range(1.0..0.95 * helix.max_radius());

        let time_c = helix.barrel_crossing_time_c(radius, false).unwrap().unwrap();
        assert_relative_eq!(time_c, arc_time_c(&helix, radius), max_relative = 1e-8);

        helix.advance(time_c);
        let position = helix.state().position;
        assert!((position.x.hypot(position.y) - radius).abs() < 1e-7);
    }
}

#[test]
fn test_crossing_from_off_axis_start() {
    let mut rng = ChaChaRng::seed_from_u64(7);

    for _ in 0..100 {
        let start = Point3::new(rng.random_range(-3.0f64..3.0), rng.random_range(-3.0f64..3.0), 0.0);
        let momentum = Vector3::new(rng.random_range(-2.0f64..2.0), rng.random_range(-2.0f64..2.0), 0.5);
        if momentum.x.hypot(momentum.y) < 0.3 {
            continue;
        }
        let mut helix = HelixTrajectory::new(make_state(start, momentum), -1.0, 3.8);
        let radius = 20.0;
        if !helix.crosses_radius(radius) {
            continue;
        }

        let time_c = helix.barrel_crossing_time_c(radius, false).unwrap().unwrap();
        assert!(time_c > 0.0 && time_c < helix.period_c());

        helix.advance(time_c);
        let position = helix.state().position;
        assert!((position.x.hypot(position.y) - radius).abs() < 1e-7);
    }
}

#[test]
fn test_phase_off_the_cylinder_is_rejected() {
    // centre on the y axis at (0, -r): sin φ = 0 gives (±r, -r), both at r·√2 from the axis
    let helix = HelixTrajectory::new(make_state(Point3::origin(), Vector3::new(1.0, 0.0, 0.0)), 1.0, 3.8);
    let r = helix.radius();

    let result = helix.select_phases(0.0, 20.0);
    assert!(matches!(result, Err(FastSimError::RootSelection { radius, .. }) if radius == 20.0));

    let phases = helix.select_phases(0.0, r * 2f64.sqrt()).unwrap();
    assert_eq!(phases.len(), 2);
}

#[test]
fn test_curvature_factor() {
    assert_relative_eq!(FIELD_CURVATURE_FACTOR, 0.002_997_924_58, max_relative = 1e-12);
}
