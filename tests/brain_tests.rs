#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evodrive::simulation::brain::{Level, Network, NetworkError};
use ndarray::{Array1, array};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(7)
}

#[test]
fn test_output_length_matches_last_level() {
    let mut rng = rng();
    for sizes in [vec![5, 6, 4], vec![3, 2], vec![7, 8, 9, 4], vec![1, 1]] {
        let network = Network::new(&sizes, &mut rng).unwrap();
        let input = Array1::from_elem(sizes[0], 0.5);

        let output = network.evaluate(&input).unwrap();
        assert_eq!(output.len(), *sizes.last().unwrap());
        assert!(output.iter().all(|&value| value == 0.0 || value == 1.0));
    }
}

#[test]
fn test_wrong_input_length_is_rejected() {
    let network = Network::new(&[5, 6, 4], &mut rng()).unwrap();

    let err = network.evaluate(&Array1::zeros(3)).unwrap_err();
    assert_eq!(
        err,
        NetworkError::InputSize {
            expected: 5,
            actual: 3
        }
    );
    assert!(network.activations(&Array1::zeros(6)).is_err());
}

#[test]
fn test_random_weights_lie_in_unit_range() {
    let network = Network::new(&[5, 6, 4], &mut rng()).unwrap();

    assert_eq!(network.layer_sizes(), vec![5, 6, 4]);
    assert_eq!(network.levels().len(), 2);
    assert_eq!(network.to_flat_vector().len(), 5 * 6 + 6 + 6 * 4 + 4);
    assert!(
        network
            .to_flat_vector()
            .iter()
            .all(|value| (-1.0..=1.0).contains(value))
    );
}

#[test]
fn test_activations_start_with_input() {
    let network = Network::new(&[3, 4, 2], &mut rng()).unwrap();
    let input = array![0.1, 0.9, 0.0];

    let layers = network.activations(&input).unwrap();
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[0], input);
    assert_eq!(layers[1].len(), 4);
    assert_eq!(layers[2], network.evaluate(&input).unwrap());
}

#[test]
fn test_step_activation_threshold() {
    let network = Network::from_levels(vec![Level {
        weights: array![[1.0, -1.0], [1.0, -1.0]],
        biases: array![-1.0, 1.0],
    }])
    .unwrap();

    // Sums plus biases: [1, -1], [-1, 1] and [0, 0]; zero does not fire.
    assert_eq!(network.evaluate(&array![1.0, 1.0]).unwrap(), array![1.0, 0.0]);
    assert_eq!(network.evaluate(&array![0.0, 0.0]).unwrap(), array![0.0, 1.0]);
    assert_eq!(network.evaluate(&array![0.5, 0.5]).unwrap(), array![0.0, 0.0]);
}

#[test]
fn test_mutate_zero_is_identity() {
    let mut rng = rng();
    let original = Network::new(&[5, 6, 4], &mut rng).unwrap();

    let mut mutated = original.clone();
    mutated.mutate(0.0, &mut rng);

    let bits = |network: &Network| -> Vec<u32> {
        network
            .to_flat_vector()
            .iter()
            .map(|value| value.to_bits())
            .collect()
    };
    assert_eq!(bits(&original), bits(&mutated));
}

#[test]
fn test_mutate_one_replaces_values_within_range() {
    let mut rng = rng();
    let original = Network::new(&[5, 6, 4], &mut rng).unwrap();

    let mutated = original.mutated(1.0, &mut rng);
    let before = original.to_flat_vector();
    let after = mutated.to_flat_vector();

    assert!(after.iter().all(|value| (-1.0..=1.0).contains(value)));
    let unchanged = before.iter().zip(&after).filter(|(a, b)| a == b).count();
    assert!(unchanged < before.len() / 10, "{} values unchanged", unchanged);
}

#[test]
fn test_partial_mutation_moves_values_towards_targets() {
    let mut rng = rng();
    let original = Network::new(&[4, 3], &mut rng).unwrap();
    let mutated = original.mutated(0.1, &mut rng);

    // Each step is at most 0.1 * |target - v| <= 0.2.
    for (before, after) in original.to_flat_vector().iter().zip(mutated.to_flat_vector()) {
        assert!((before - after).abs() <= 0.2 + 1e-6);
    }
    assert_eq!(original.layer_sizes(), mutated.layer_sizes());
}

#[test]
fn test_mutation_is_deterministic_for_a_seed() {
    let network = Network::new(&[5, 6, 4], &mut rng()).unwrap();

    let a = network.mutated(0.3, &mut SmallRng::seed_from_u64(99));
    let b = network.mutated(0.3, &mut SmallRng::seed_from_u64(99));
    assert_eq!(a, b);
}

#[test]
fn test_degenerate_layouts_are_rejected() {
    let mut rng = rng();

    assert_eq!(Network::new(&[5], &mut rng).unwrap_err(), NetworkError::Empty);
    assert_eq!(
        Network::new(&[5, 0, 4], &mut rng).unwrap_err(),
        NetworkError::ZeroSizedLevel { index: 0 }
    );
    assert_eq!(
        Network::from_levels(Vec::new()).unwrap_err(),
        NetworkError::Empty
    );
}

#[test]
fn test_unchained_levels_are_rejected() {
    let mut rng = rng();
    let levels = vec![
        Level::new_random(3, 4, &mut rng),
        Level::new_random(5, 2, &mut rng),
    ];

    assert_eq!(
        Network::from_levels(levels).unwrap_err(),
        NetworkError::MismatchedTopology {
            index: 1,
            expected: 4,
            actual: 5
        }
    );
}

#[test]
fn test_bias_length_must_match_outputs() {
    let err = Network::from_levels(vec![Level {
        weights: array![[1.0, 1.0]],
        biases: array![0.0],
    }])
    .unwrap_err();

    assert_eq!(
        err,
        NetworkError::BiasMismatch {
            index: 0,
            outputs: 2,
            biases: 1
        }
    );
}

#[test]
fn test_validate_for_checks_sensor_and_controls() {
    let network = Network::new(&[5, 6, 4], &mut rng()).unwrap();

    assert!(network.validate_for(5).is_ok());
    assert!(matches!(
        network.validate_for(3),
        Err(NetworkError::Shape {
            expected_inputs: 3,
            actual_inputs: 5,
            ..
        })
    ));

    let wrong_outputs = Network::new(&[5, 6, 2], &mut rng()).unwrap();
    assert!(wrong_outputs.validate_for(5).is_err());
}

#[test]
fn test_topology_comparison() {
    let mut rng = rng();
    let a = Network::new(&[5, 6, 4], &mut rng).unwrap();
    let b = Network::new(&[5, 6, 4], &mut rng).unwrap();
    let c = Network::new(&[5, 8, 4], &mut rng).unwrap();

    assert!(a.ensure_same_topology(&b).is_ok());
    assert_eq!(
        a.ensure_same_topology(&c).unwrap_err(),
        NetworkError::TopologyDiffers {
            left: vec![5, 6, 4],
            right: vec![5, 8, 4]
        }
    );
}

#[test]
fn test_values_outside_unit_range_are_rejected() {
    let mut rng = rng();
    let hidden = Level::new_random(2, 3, &mut rng);

    let err = Network::from_levels(vec![
        hidden.clone(),
        Level {
            weights: array![[0.5], [1.5], [-0.5]],
            biases: array![0.0],
        },
    ])
    .unwrap_err();
    assert_eq!(err, NetworkError::OutOfRange { index: 1 });

    let err = Network::from_levels(vec![Level {
        weights: array![[0.0], [0.0]],
        biases: array![f32::NAN],
    }])
    .unwrap_err();
    assert_eq!(err, NetworkError::OutOfRange { index: 0 });

    assert!(Network::from_levels(vec![hidden]).is_ok());
}
