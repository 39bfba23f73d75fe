#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evodrive::simulation::brain::{self, Level, Network, NetworkError, PersistenceError};
use evodrive::simulation::params::{ConfigError, Params};
use evodrive::simulation::vehicle::OutputMapping;
use ndarray::array;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::fs;

fn and_gate() -> Network {
    Network::from_levels(vec![Level {
        weights: array![[1.0], [1.0]],
        biases: array![-1.0],
    }])
    .unwrap()
}

#[test]
fn test_save_and_load() {
    let network = and_gate();
    let output = network.evaluate(&array![1.0, 1.0]).unwrap();
    assert_eq!(output, array![1.0]);

    let save_path = "test_network_save.json";
    network
        .save_to_file(save_path)
        .expect("Failed to save network");

    let loaded = Network::load_from_file(save_path).expect("Failed to load network");

    assert_eq!(loaded, network);
    assert_eq!(loaded.evaluate(&array![1.0, 1.0]).unwrap(), output);
    assert_eq!(loaded.evaluate(&array![1.0, 0.0]).unwrap(), array![0.0]);

    fs::remove_file(save_path).ok();
}

#[test]
fn test_json_preserves_weights_exactly() {
    let network = Network::new(&[5, 6, 4], &mut SmallRng::seed_from_u64(3)).unwrap();

    let json = network.to_json().unwrap();
    let restored = Network::from_json(&json).unwrap();

    let bits = |network: &Network| -> Vec<u32> {
        network
            .to_flat_vector()
            .iter()
            .map(|value| value.to_bits())
            .collect()
    };
    assert_eq!(bits(&restored), bits(&network));
}

#[test]
fn test_malformed_network_file_is_rejected() {
    let save_path = "test_network_malformed.json";
    fs::write(save_path, "{ \"levels\": [ not json").unwrap();

    assert!(matches!(
        Network::load_from_file(save_path),
        Err(PersistenceError::Json(_))
    ));
    assert!(brain::load_seed(save_path, 2).is_none());

    fs::remove_file(save_path).ok();
}

#[test]
fn test_structurally_invalid_network_is_rejected() {
    let json = r#"{ "levels": [] }"#;
    assert!(matches!(
        Network::from_json(json),
        Err(PersistenceError::Invalid(NetworkError::Empty))
    ));
}

#[test]
fn test_network_for_other_sensor_falls_back() {
    let save_path = "test_network_wrong_rays.json";
    let network = Network::new(&[3, 6, 4], &mut SmallRng::seed_from_u64(5)).unwrap();
    network.save_to_file(save_path).unwrap();

    assert!(matches!(
        Network::load_for(save_path, 5),
        Err(PersistenceError::Invalid(NetworkError::Shape { .. }))
    ));
    assert!(brain::load_seed(save_path, 5).is_none());
    assert_eq!(brain::load_seed(save_path, 3), Some(network));

    fs::remove_file(save_path).ok();
}

#[test]
fn test_missing_network_file_yields_no_seed() {
    assert!(brain::load_seed("test_network_does_not_exist.json", 5).is_none());
    assert!(matches!(
        Network::load_from_file("test_network_does_not_exist.json"),
        Err(PersistenceError::Io(_))
    ));
}

#[test]
fn test_settings_round_trip() {
    let save_path = "test_settings_save.json";
    let params = Params {
        ai_cars: 25,
        lanes: 3,
        mutation_rate: 0.2,
        output_mapping: OutputMapping::Independent,
        seed: Some(11),
        ..Params::default()
    };
    params.save_to_file(save_path).unwrap();

    let loaded = Params::load_from_file(save_path).unwrap();
    assert_eq!(loaded, params);

    fs::remove_file(save_path).ok();
}

#[test]
fn test_partial_settings_merge_over_defaults() {
    let save_path = "test_settings_partial.json";
    fs::write(save_path, r#"{ "ai_cars": 7, "ray_length": 90.0 }"#).unwrap();

    let loaded = Params::load_from_file(save_path).unwrap();
    assert_eq!(loaded.ai_cars, 7);
    assert_eq!(loaded.ray_length, 90.0);
    assert_eq!(loaded.lanes, Params::default().lanes);
    assert_eq!(loaded.traffic_cars, Params::default().traffic_cars);

    fs::remove_file(save_path).ok();
}

#[test]
fn test_invalid_settings_are_rejected() {
    let save_path = "test_settings_invalid.json";
    fs::write(save_path, r#"{ "ray_count": 0 }"#).unwrap();

    assert!(matches!(
        Params::load_from_file(save_path),
        Err(ConfigError::Invalid(_))
    ));

    fs::remove_file(save_path).ok();
}

#[test]
fn test_stored_values_outside_unit_range_are_rejected() {
    let json = and_gate().to_json().unwrap();
    assert!(json.contains("-1.0"));
    let tampered = json.replace("-1.0", "-3.0");

    assert!(matches!(
        Network::from_json(&tampered),
        Err(PersistenceError::Invalid(NetworkError::OutOfRange { index: 0 }))
    ));
}
