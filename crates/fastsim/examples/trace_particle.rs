//! Particle tracing example
//!
//! Builds a tracker loosely modelled on a collider barrel detector, traces a
//! charged pion and a photon through it, then simulates a small event.
//!
//! Run with: cargo run --package fastsim --example trace_particle

use nalgebra::{Point3, Vector3};

use fastsim::config::SimulationConfig;
use fastsim::event::{GenEvent, GenParticle, GenVertex};
use fastsim::{Particle, Simulation};

const TRACKER: &str = r#"{
    "geometry": {
        "barrelLayers": [
            { "radius": 4.4, "limits": [0.0, 27.0], "thickness": [0.02], "interactionModels": ["hits"] },
            { "radius": 7.3, "limits": [0.0, 27.0], "thickness": [0.02], "interactionModels": ["hits"] },
            { "radius": 25.5, "limits": [0.0, 70.0], "thickness": [0.03], "interactionModels": ["hits"] },
            { "radius": 60.0, "limits": [0.0, 110.0], "thickness": [0.03], "interactionModels": ["hits"] },
            { "radius": 110.0, "limits": [0.0, 280.0], "thickness": [0.05], "interactionModels": ["hits", "absorber"] }
        ],
        "forwardLayers": [
            { "z": 35.0, "limits": [4.8, 16.0], "thickness": [0.02], "interactionModels": ["hits"] },
            { "z": 120.0, "limits": [23.0, 110.0], "thickness": [0.05], "interactionModels": ["hits"] },
            { "z": 280.0, "limits": [0.0, 110.0], "thickness": [0.05], "interactionModels": ["hits", "absorber"] }
        ],
        "magneticField": 3.8
    },
    "interactionModels": [
        { "name": "hits", "className": "SimpleLayerHitProducer" },
        { "name": "absorber", "className": "ParticleKiller" }
    ],
    "seed": 42
}"#;

fn main() {
    println!("Fast Simulation: Layer Crossings\n");
    println!("{}", "=".repeat(60));

    let config = match SimulationConfig::from_json(TRACKER) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid tracker configuration: {}", err);
            return;
        }
    };
    let mut simulation = match Simulation::from_config(&config) {
        Ok(simulation) => simulation,
        Err(err) => {
            eprintln!("could not build the simulation: {}", err);
            return;
        }
    };

    let geometry = simulation.geometry();
    println!("\nTracker:");
    for layer in geometry.layers() {
        println!("  {}", layer);
    }
    println!("  B = {:.1} T", config.geometry.magnetic_field.to_tesla());

    // 2 GeV transverse momentum pion, r ≈ 1.76 m in 3.8 T
    let pion = Particle::with_mass(
        211,
        1.0,
        Point3::origin(),
        Vector3::new(2.0, 0.0, 0.8),
        0.139_570,
    );
    let photon = Particle::new(
        22,
        0.0,
        Point3::origin(),
        0.0,
        Vector3::new(3.0, 4.0, 12.0),
        13.0,
    );

    for (label, particle) in [("pi+", pion), ("photon", photon)] {
        println!("\n{} with p = {:.3} GeV:", label, particle.p());
        match simulation.trace(particle) {
            Ok(crossings) => {
                for crossing in &crossings {
                    println!(
                        "  {:<16} r = {:7.3} cm  z = {:8.3} cm  t = {:6.3} ns",
                        crossing.layer.to_string(),
                        crossing.position.coords.xy().magnitude(),
                        crossing.position.z,
                        crossing.time
                    );
                }
            }
            Err(err) => eprintln!("  trace failed: {}", err),
        }
    }

    println!("\n{}", "=".repeat(60));
    println!("Event simulation:");

    let event = GenEvent {
        vertices: vec![GenVertex::at(0.0, 0.0, 0.0, 0.0)],
        particles: vec![
            GenParticle {
                pdg_id: 211,
                momentum: [2.0, 0.0, 0.8, 2.1586],
                production_vertex: 0,
                end_vertex: None,
            },
            GenParticle {
                pdg_id: -211,
                momentum: [-1.0, 1.5, -0.5, 1.8811],
                production_vertex: 0,
                end_vertex: None,
            },
            GenParticle {
                pdg_id: 22,
                momentum: [3.0, 4.0, 12.0, 13.0],
                production_vertex: 0,
                end_vertex: None,
            },
        ],
        ..GenEvent::default()
    };

    match simulation.simulate_event(&event) {
        Ok(record) => {
            println!("  Sim tracks:   {}", record.sim_tracks.len());
            println!("  Sim vertices: {}", record.sim_vertices.len());
            println!("  Layer hits:   {}", record.layer_hits.len());
            for hit in &record.layer_hits {
                println!(
                    "    track {:?} pdg {:>5} on {:<16} at ({:8.3}, {:8.3}, {:8.3})",
                    hit.sim_track,
                    hit.pdg_id,
                    hit.layer.to_string(),
                    hit.position.x,
                    hit.position.y,
                    hit.position.z
                );
            }
        }
        Err(err) => eprintln!("  event simulation failed: {}", err),
    }
}
