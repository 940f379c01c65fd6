use approx::assert_relative_eq;
use nalgebra::{Point3, Vector3};
use units::MagneticField;

use crate::constants::SPEED_OF_LIGHT;
use crate::error::FastSimError;
use crate::geometry::{
    BarrelLayer, FieldSource, ForwardLayer, Geometry, Layer, LayerId, ThicknessProfile,
};
use crate::navigator::{LayerNavigator, NavigatorState};
use crate::particle::Particle;

fn make_geometry(radii: &[f64], z: &[f64], field: f64) -> Geometry {
    Geometry::new(
        radii
            .iter()
            .map(|&radius| BarrelLayer::new(radius, ThicknessProfile::uniform(200.0, 0.02)))
            .collect(),
        z.iter()
            .map(|&z| ForwardLayer::new(z, ThicknessProfile::uniform(20.0, 0.02)))
            .collect(),
        FieldSource::Uniform(MagneticField::from_tesla(field)),
    )
    .unwrap()
}

fn photon(position: Point3<f64>, momentum: Vector3<f64>) -> Particle {
    Particle::new(22, 0.0, position, 0.0, momentum, momentum.magnitude())
}

/// Positions (radius for barrel, z for forward) of the next `limit` crossings
fn walk(navigator: &mut LayerNavigator, particle: &mut Particle, limit: usize) -> Vec<f64> {
    let mut positions = Vec::new();
    while positions.len() < limit {
        match navigator.move_to_next_layer(particle).unwrap() {
            Some(layer) => positions.push(layer.position()),
            None => break,
        }
    }
    positions
}

#[test]
fn test_outward_photon_crosses_every_barrel_layer() {
    let geometry = make_geometry(&[1.0, 5.0, 10.0], &[], 0.0);
    let mut particle = photon(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
    let mut navigator = LayerNavigator::new(&geometry);

    let mut previous_time_c = 0.0;
    for (radius, delta_time_c) in [(1.0, 1.0), (5.0, 4.0), (10.0, 5.0)] {
        let layer = navigator.move_to_next_layer(&mut particle).unwrap().unwrap();
        assert_eq!(layer.position(), radius);

        let time_c = particle.time * SPEED_OF_LIGHT;
        assert_relative_eq!(time_c - previous_time_c, delta_time_c, max_relative = 1e-12);
        assert_relative_eq!(particle.position.x, radius, max_relative = 1e-12);
        previous_time_c = time_c;
    }

    assert!(navigator.move_to_next_layer(&mut particle).unwrap().is_none());
    assert_eq!(navigator.state(), NavigatorState::Exhausted);
    // further calls keep reporting the end
    assert!(navigator.move_to_next_layer(&mut particle).unwrap().is_none());
}

#[test]
fn test_states() {
    let geometry = make_geometry(&[1.0, 5.0], &[], 0.0);
    let mut particle = photon(Point3::origin(), Vector3::new(0.0, 2.0, 0.0));
    let mut navigator = LayerNavigator::new(&geometry);
    assert_eq!(navigator.state(), NavigatorState::Uninitialized);
    assert!(navigator.current_layer().is_none());

    let layer = navigator.move_to_next_layer(&mut particle).unwrap().unwrap();
    assert_eq!(layer.id(), LayerId::barrel(0));
    assert_eq!(navigator.state(), NavigatorState::OnLayer(layer));
    assert_eq!(navigator.current_layer(), Some(Layer::Barrel(&geometry.barrel_layers()[0])));
}

#[test]
fn test_barrel_cursor_advances_one_layer_at_a_time() {
    let geometry = make_geometry(&[1.0, 5.0, 10.0, 20.0], &[], 0.0);
    let mut particle = photon(Point3::new(0.5, 0.0, 0.0), Vector3::new(1.0, 1.0, 0.0));
    let mut navigator = LayerNavigator::new(&geometry);
    assert!(navigator.next_barrel_layer().is_none());

    for index in 0..4 {
        let layer = navigator.move_to_next_layer(&mut particle).unwrap().unwrap();
        assert_eq!(layer.index(), index);
        let expected = geometry.barrel_layers().get(index + 1).map(BarrelLayer::radius);
        assert_eq!(navigator.next_barrel_layer().map(BarrelLayer::radius), expected);
    }
}

#[test]
fn test_inward_photon_passes_through_the_axis() {
    let geometry = make_geometry(&[1.0, 5.0, 10.0], &[], 0.0);
    let mut particle = photon(Point3::new(20.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
    let mut navigator = LayerNavigator::new(&geometry);

    let radii = walk(&mut navigator, &mut particle, 10);
    assert_eq!(radii, vec![10.0, 5.0, 1.0, 1.0, 5.0, 10.0]);
    assert_relative_eq!(particle.position.x, -10.0, max_relative = 1e-12);
}

#[test]
fn test_particle_at_rest_is_exhausted() {
    let geometry = make_geometry(&[1.0, 5.0], &[-50.0, 50.0], 3.8);
    let mut particle = Particle::with_mass(2212, 1.0, Point3::new(2.0, 0.0, 0.0), Vector3::zeros(), 0.938);
    let mut navigator = LayerNavigator::new(&geometry);

    assert!(navigator.move_to_next_layer(&mut particle).unwrap().is_none());
    assert_eq!(navigator.state(), NavigatorState::Exhausted);
}

#[test]
fn test_particle_leaving_the_tracker() {
    let geometry = make_geometry(&[1.0, 5.0, 10.0], &[], 0.0);
    let mut particle = photon(Point3::new(12.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 3.0));
    let mut navigator = LayerNavigator::new(&geometry);

    assert!(navigator.move_to_next_layer(&mut particle).unwrap().is_none());
    assert_eq!(particle.position, Point3::new(12.0, 0.0, 0.0));
}

#[test]
fn test_start_on_surface_moving_outward() {
    let geometry = make_geometry(&[1.0, 5.0, 10.0], &[], 0.0);
    let mut particle = photon(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
    let mut navigator = LayerNavigator::new(&geometry);

    assert_eq!(walk(&mut navigator, &mut particle, 10), vec![10.0]);
}

#[test]
fn test_start_on_surface_moving_inward() {
    let geometry = make_geometry(&[1.0, 5.0, 10.0], &[], 0.0);
    let mut particle = photon(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
    let mut navigator = LayerNavigator::new(&geometry);

    assert_eq!(walk(&mut navigator, &mut particle, 10), vec![1.0, 1.0, 5.0, 10.0]);
}

#[test]
fn test_forward_layers_along_the_beam() {
    let geometry = make_geometry(&[1.0, 5.0, 10.0], &[-100.0, -50.0, 50.0, 100.0], 3.8);

    let mut forward = photon(Point3::origin(), Vector3::new(0.0, 0.0, 1.0));
    let mut navigator = LayerNavigator::new(&geometry);
    assert_eq!(walk(&mut navigator, &mut forward, 10), vec![50.0, 100.0]);

    let mut backward = photon(Point3::origin(), Vector3::new(0.0, 0.0, -1.0));
    let mut navigator = LayerNavigator::new(&geometry);
    assert_eq!(walk(&mut navigator, &mut backward, 10), vec![-50.0, -100.0]);
    assert_eq!(navigator.next_forward_layer().map(ForwardLayer::z), Some(-100.0));
}

#[test]
fn test_barrel_and_forward_interleave() {
    let geometry = make_geometry(&[4.0, 10.0], &[-5.0, 5.0], 0.0);
    let mut particle = photon(Point3::origin(), Vector3::new(1.0, 0.0, 1.0));
    let mut navigator = LayerNavigator::new(&geometry);

    let first = navigator.move_to_next_layer(&mut particle).unwrap().unwrap();
    assert!(!first.is_forward());
    assert_eq!(first.position(), 4.0);

    let second = navigator.move_to_next_layer(&mut particle).unwrap().unwrap();
    assert!(second.is_forward());
    assert_relative_eq!(particle.position.x, 5.0, max_relative = 1e-12);

    let third = navigator.move_to_next_layer(&mut particle).unwrap().unwrap();
    assert_eq!(third.position(), 10.0);
    assert_relative_eq!(particle.position.z, 10.0, max_relative = 1e-12);

    assert!(navigator.move_to_next_layer(&mut particle).unwrap().is_none());
}

#[test]
fn test_no_forward_candidate_without_longitudinal_motion() {
    let geometry = make_geometry(&[], &[-5.0, 5.0], 0.0);
    let mut particle = photon(Point3::new(0.0, 0.0, 5.0), Vector3::new(1.0, 0.0, 0.0));
    let mut navigator = LayerNavigator::new(&geometry);

    assert!(navigator.move_to_next_layer(&mut particle).unwrap().is_none());
}

#[test]
fn test_looping_particle_bounces_between_layers() {
    // r ≈ 8.8 cm: the circle through the origin reaches r ≈ 17.6 cm
    let geometry = make_geometry(&[5.0, 10.0, 20.0], &[], 3.8);
    let momentum = Vector3::new(0.1, 0.0, 0.0);
    let mut particle = Particle::with_mass(-211, -1.0, Point3::origin(), momentum, 0.139_570);
    let mut navigator = LayerNavigator::new(&geometry);

    let radii = walk(&mut navigator, &mut particle, 8);
    assert_eq!(radii, vec![5.0, 10.0, 10.0, 5.0, 5.0, 10.0, 10.0, 5.0]);
    assert_relative_eq!(particle.pt(), 0.1, max_relative = 1e-9);
}

#[test]
fn test_helix_crossings_land_on_the_surface() {
    let geometry = make_geometry(&[3.0, 7.0, 11.0, 30.0, 60.0, 100.0], &[-200.0, 200.0], 3.8);
    let momentum = Vector3::new(0.8, -0.4, 1.2);
    let mut particle = Particle::with_mass(211, 1.0, Point3::new(0.01, 0.02, -0.5), momentum, 0.139_570);
    let mut navigator = LayerNavigator::new(&geometry);

    // barrel layers are infinitely long, so the walk only ends at a crossing limit
    for _ in 0..50 {
        let Some(layer) = navigator.move_to_next_layer(&mut particle).unwrap() else {
            break;
        };
        assert!(layer.is_on_surface(&particle.position));
        assert_relative_eq!(particle.p(), momentum.magnitude(), max_relative = 1e-9);
    }
    assert!(particle.position.z > 0.0);
}

#[test]
fn test_moving_the_particle_off_the_layer_is_an_error() {
    let geometry = make_geometry(&[1.0, 5.0], &[], 0.0);
    let mut particle = photon(Point3::origin(), Vector3::new(1.0, 0.0, 0.0));
    let mut navigator = LayerNavigator::new(&geometry);

    navigator.move_to_next_layer(&mut particle).unwrap();
    particle.position.x += 0.5;

    let result = navigator.move_to_next_layer(&mut particle);
    assert!(matches!(
        result,
        Err(FastSimError::NotOnLayer { layer, distance }) if layer == LayerId::barrel(0) && (distance - 0.5).abs() < 1e-12
    ));
}

#[test]
fn test_decay_before_the_next_layer() {
    let geometry = make_geometry(&[1.0, 5.0], &[], 0.0);
    // gamma = √2, decays after a lab path of c·τ·γ = 2 cm of timeC
    let mut particle =
        Particle::with_mass(310, 0.0, Point3::origin(), Vector3::new(1.0, 0.0, 0.0), 1.0)
            .with_proper_lifetime_c(2f64.sqrt());
    let mut navigator = LayerNavigator::new(&geometry);

    let first = navigator.move_to_next_layer(&mut particle).unwrap().unwrap();
    assert_eq!(first.position(), 1.0);
    assert_relative_eq!(particle.remaining_proper_lifetime_c.unwrap(), 2f64.sqrt() - 1.0, max_relative = 1e-12);

    assert!(navigator.move_to_next_layer(&mut particle).unwrap().is_none());
    assert_eq!(navigator.state(), NavigatorState::Decayed);
    assert!(particle.has_decayed());
    assert_relative_eq!(particle.position.x, 2f64.sqrt(), max_relative = 1e-12);
    assert_relative_eq!(particle.time * SPEED_OF_LIGHT, 2.0, max_relative = 1e-12);
}

#[test]
fn test_long_lived_particle_reaches_every_layer() {
    let geometry = make_geometry(&[1.0, 5.0], &[], 0.0);
    let mut particle =
        Particle::with_mass(310, 0.0, Point3::origin(), Vector3::new(1.0, 0.0, 0.0), 1.0)
            .with_proper_lifetime_c(100.0);
    let mut navigator = LayerNavigator::new(&geometry);

    let radii = walk(&mut navigator, &mut particle, 10);
    assert_eq!(radii, vec![1.0, 5.0]);
    // the last call moved the particle to its decay point
    assert_eq!(navigator.state(), NavigatorState::Decayed);
    assert_relative_eq!(particle.time * SPEED_OF_LIGHT, 100.0 * 2f64.sqrt(), max_relative = 1e-12);
}

#[test]
fn test_field_map_steps_match_uniform_field() {
    let uniform = make_geometry(&[5.0, 10.0, 20.0], &[], 3.8);
    let mapped = make_geometry(&[5.0, 10.0, 20.0], &[], 0.0)
        .with_field(FieldSource::Map(Box::new(|_: &Point3<f64>| 3.8)));
    let momentum = Vector3::new(0.1, 0.0, 0.0);
    let mut expected = Particle::with_mass(-211, -1.0, Point3::origin(), momentum, 0.139_570);
    let mut particle = expected.clone();

    // first step reads the map, later steps the per-layer samples
    let expected_radii = walk(&mut LayerNavigator::new(&uniform), &mut expected, 6);
    let radii = walk(&mut LayerNavigator::new(&mapped), &mut particle, 6);

    assert_eq!(radii, expected_radii);
    assert_relative_eq!(particle.position, expected.position, epsilon = 1e-9);
    assert_relative_eq!(particle.time, expected.time, max_relative = 1e-12);
}
