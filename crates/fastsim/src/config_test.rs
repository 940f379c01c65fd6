use units::{Energy, Length, Time};

use crate::config::SimulationConfig;
use crate::error::FastSimError;

const CONFIG: &str = r#"{
    "geometry": {
        "barrelLayers": [
            { "radius": 4.4, "limits": [0.0, 27.5], "thickness": [0.0217], "activeLayer": "BPix1", "interactionModels": ["hits"] },
            { "radius": 7.3, "limits": [0.0, 27.5], "thickness": [0.0217], "activeLayer": "BPix2", "interactionModels": ["hits"] }
        ],
        "forwardLayers": [
            { "z": 34.5, "limits": [4.8, 16.1], "thickness": [0.058], "interactionModels": ["hits"] }
        ],
        "magneticField": 3.8
    },
    "interactionModels": [
        { "name": "hits", "className": "SimpleLayerHitProducer" }
    ],
    "beamPipeRadius": 3.0,
    "timeCut": 100.0,
    "minEnergy": 0.05,
    "maxCrossings": 200,
    "seed": 12345
}"#;

#[test]
fn test_parse_full_config() {
    let config = SimulationConfig::from_json(CONFIG).unwrap();

    assert_eq!(config.geometry.barrel_layers.len(), 2);
    assert_eq!(config.geometry.forward_layers[0].z, Length::from_cm(34.5));
    assert_eq!(config.interaction_models[0].class_name, "SimpleLayerHitProducer");
    assert_eq!(config.time_cut, Time::from_ns(100.0));
    assert_eq!(config.min_energy, Energy::from_gev(0.05));
    assert_eq!(config.max_crossings, 200);
    assert_eq!(config.seed, 12345);
}

#[test]
fn test_defaults() {
    let config = SimulationConfig::from_json("{}").unwrap();

    assert_eq!(config, SimulationConfig::default());
    assert!(config.geometry.barrel_layers.is_empty());
    assert_eq!(config.time_cut.to_ns(), 300.0);
}

#[test]
fn test_json_round_trip() {
    let config = SimulationConfig::from_json(CONFIG).unwrap();
    let json = config.to_json().unwrap();

    assert_eq!(SimulationConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_malformed_json() {
    let result = SimulationConfig::from_json(r#"{ "maxCrossings": "many" }"#);

    assert!(matches!(result, Err(FastSimError::Config(_))));
}
