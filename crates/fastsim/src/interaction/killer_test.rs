use nalgebra::{Point3, Vector3};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::geometry::{ForwardLayer, Layer, ThicknessProfile};
use crate::interaction::{InteractionModel, ParticleKiller};
use crate::particle::Particle;

#[test]
fn test_stops_particle() {
    let layer = ForwardLayer::new(-120.0, ThicknessProfile::empty());
    let mut killer = ParticleKiller::new("absorber");
    let mut rng = ChaChaRng::seed_from_u64(0);
    let mut muon =
        Particle::with_mass(13, -1.0, Point3::new(1.0, 1.0, -120.0), Vector3::new(0.5, 0.5, -20.0), 0.105_658);
    let mut secondaries = Vec::new();

    killer.interact(&mut muon, Layer::Forward(&layer), &mut secondaries, &mut rng);

    assert!(muon.is_at_rest());
    assert!((muon.energy - 0.105_658).abs() < 1e-9);
    assert_eq!(muon.position, Point3::new(1.0, 1.0, -120.0));
    assert!(secondaries.is_empty());
    assert_eq!(killer.name(), "absorber");
}
