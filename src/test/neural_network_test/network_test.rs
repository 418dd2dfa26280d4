use super::*;

fn two_layer_network(rng: &mut StdRng) -> NeuralNetwork {
    let layers = vec![
        Layer::from(AffineLayer::new(3, 4, Activation::Sigmoid, true, rng)),
        Layer::from(AffineLayer::new(4, 2, Activation::Sigmoid, true, rng)),
    ];
    NeuralNetwork::new(layers).unwrap()
}

#[test]
fn test_empty_layer_stack_is_rejected() {
    let result = NeuralNetwork::new(Vec::new());
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn test_adjacent_dimension_mismatch_is_rejected() {
    let mut rng = seeded_rng(30);
    let layers = vec![
        Layer::from(AffineLayer::new(4, 3, Activation::Sigmoid, true, &mut rng)),
        Layer::from(AffineLayer::new(4, 2, Activation::Sigmoid, true, &mut rng)),
    ];

    let result = NeuralNetwork::new(layers);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn test_heterogeneous_stack_is_accepted() {
    let mut rng = seeded_rng(31);
    let layers = vec![
        Layer::from(RadialBasisFunctionLayer::new(3, 6, Activation::Identity, &mut rng)),
        Layer::from(AffineLayer::new(6, 2, Activation::Sigmoid, true, &mut rng)),
    ];

    let network = NeuralNetwork::new(layers).unwrap();
    assert_eq!(network.layers().len(), 2);
}

#[test]
fn test_multilayer_perceptron_constructor() {
    let mut rng = seeded_rng(32);
    let network =
        NeuralNetwork::multilayer_perceptron(&[4, 8, 4], &[true, false], &mut rng).unwrap();

    assert_eq!(network.layers().len(), 2);
    assert_eq!(network.layers()[0].number_of_inputs(), 4);
    assert_eq!(network.layers()[0].number_of_outputs(), 8);
    assert_eq!(network.layers()[1].number_of_inputs(), 8);
    assert_eq!(network.layers()[1].number_of_outputs(), 4);

    // one bias flag per constructed layer
    let result = NeuralNetwork::multilayer_perceptron(&[4, 8, 4], &[true], &mut rng);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));

    // at least an input and an output width
    let result = NeuralNetwork::multilayer_perceptron(&[4], &[], &mut rng);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn test_feed_forward_composes_the_layers_in_order() {
    let mut rng = seeded_rng(33);
    let network = two_layer_network(&mut rng);
    let input = array![0.1, -0.4, 0.9];

    let mut expected = input.clone();
    for layer in network.layers() {
        expected = layer.feed_forward(&expected);
    }

    assert_eq!(network.feed_forward(&input), expected);
}

#[test]
fn test_construction_is_deterministic_under_a_seeded_rng() {
    let first = two_layer_network(&mut seeded_rng(34));
    let second = two_layer_network(&mut seeded_rng(34));
    let input = array![0.3, 0.3, 0.3];

    assert_eq!(first.feed_forward(&input), second.feed_forward(&input));
}

#[test]
fn test_testing_pass_records_full_traces() {
    let mut rng = seeded_rng(35);
    let network = two_layer_network(&mut rng);
    let examples = vec![
        TrainingExample::new(array![0.0, 0.5, 1.0], array![1.0, 0.0]),
        TrainingExample::new(array![1.0, 0.5, 0.0], array![0.0, 1.0]),
    ];

    let results = network.test(&examples).unwrap();
    assert_eq!(results.per_example.len(), 2);

    let mut cost_sum = 0.0;
    for per_example in &results.per_example {
        // input + one activation per layer
        assert_eq!(per_example.neurons.len(), 3);
        assert_eq!(per_example.neurons[0].len(), 3);
        assert_eq!(per_example.neurons[2].len(), 2);

        // error chain runs from the network input to the output layer
        assert_eq!(per_example.errors.len(), 3);
        assert_eq!(per_example.errors[0].len(), 3);
        assert_eq!(per_example.errors[2].len(), 2);

        assert_relative_eq!(
            per_example.cost,
            per_example.errors[2].mapv(|e| e * e).sum(),
            max_relative = 1e-12
        );
        cost_sum += per_example.cost;
    }

    assert_relative_eq!(results.global_cost, cost_sum / 2.0, max_relative = 1e-12);
}

#[test]
fn test_empty_example_set_is_rejected() {
    let mut rng = seeded_rng(36);
    let network = two_layer_network(&mut rng);

    let result = network.test(&[]);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn test_mismatched_example_dimensions_are_rejected() {
    let mut rng = seeded_rng(37);
    let mut network = two_layer_network(&mut rng);

    let bad_inputs = vec![TrainingExample::new(array![1.0], array![1.0, 0.0])];
    assert!(matches!(
        network.test(&bad_inputs),
        Err(ModelError::InputValidationError(_))
    ));

    let bad_targets = vec![TrainingExample::new(array![1.0, 0.0, 0.0], array![1.0])];
    assert!(matches!(
        network.test(&bad_targets),
        Err(ModelError::InputValidationError(_))
    ));

    let options = TrainingOptions::default();
    let good = vec![TrainingExample::new(array![1.0, 0.0, 0.0], array![1.0, 0.0])];
    assert!(matches!(
        network.train(&bad_inputs, &good, &options, &mut rng),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_invalid_training_options_are_rejected() {
    let mut rng = seeded_rng(38);
    let mut network = two_layer_network(&mut rng);
    let examples = vec![TrainingExample::new(array![0.1, 0.2, 0.3], array![1.0, 0.0])];

    let zero_interval = TrainingOptions {
        epoch_interval: 0,
        ..TrainingOptions::default()
    };
    assert!(matches!(
        network.train(&examples, &examples, &zero_interval, &mut rng),
        Err(ModelError::InputValidationError(_))
    ));

    let zero_epochs = TrainingOptions {
        epochs: 0,
        ..TrainingOptions::default()
    };
    assert!(matches!(
        network.train(&examples, &examples, &zero_epochs, &mut rng),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn test_snapshots_follow_the_epoch_interval() {
    let mut rng = seeded_rng(39);
    let mut network = two_layer_network(&mut rng);
    let examples = vec![
        TrainingExample::new(array![0.1, 0.2, 0.3], array![1.0, 0.0]),
        TrainingExample::new(array![0.9, 0.8, 0.7], array![0.0, 1.0]),
    ];

    let options = TrainingOptions {
        epochs: 5,
        epoch_interval: 2,
        learning_rate: 0.1,
        ..TrainingOptions::default()
    };
    let results = network.train(&examples, &examples, &options, &mut rng).unwrap();

    // epochs 0, 2, and 4 (the final epoch)
    assert_eq!(results.epoch_interval, 2);
    assert_eq!(results.cost_per_epoch_interval.len(), 3);
    assert_eq!(results.accuracy_training.len(), 3);
    assert_eq!(results.accuracy_testing.len(), 3);
}

#[test]
fn test_accuracy_endpoints() {
    let mut rng = seeded_rng(40);
    let network = two_layer_network(&mut rng);
    let inputs = [array![0.1, 0.2, 0.3], array![0.9, 0.1, 0.4]];

    let mut all_matching = Vec::new();
    let mut none_matching = Vec::new();
    for input in &inputs {
        let output = network.feed_forward(input);
        let predicted = if output[0] > output[1] { 0 } else { 1 };

        let mut matching = array![0.0, 0.0];
        matching[predicted] = 1.0;
        let mut opposite = array![0.0, 0.0];
        opposite[1 - predicted] = 1.0;

        all_matching.push(TrainingExample::new(input.clone(), matching));
        none_matching.push(TrainingExample::new(input.clone(), opposite));
    }

    assert_eq!(get_accuracy(&network, &all_matching).unwrap(), 1.0);
    assert_eq!(get_accuracy(&network, &none_matching).unwrap(), 0.0);
}

#[test]
fn test_validation_error_display() {
    let error = ModelError::InputValidationError("Layer stack cannot be empty".to_string());
    assert_eq!(
        error.to_string(),
        "Input validation error: Layer stack cannot be empty"
    );
}

#[test]
fn test_training_step_applies_the_squared_error_gradient() {
    let mut rng = seeded_rng(41);
    let layers = vec![Layer::from(AffineLayer::new(
        1,
        1,
        Activation::Identity,
        false,
        &mut rng,
    ))];
    let mut network = NeuralNetwork::new(layers).unwrap();

    let weight_before = match &network.layers()[0] {
        Layer::Affine(layer) => layer.weights()[[0, 0]],
        _ => unreachable!(),
    };

    let examples = vec![TrainingExample::new(array![2.0], array![1.0])];
    let options = TrainingOptions {
        epochs: 1,
        learning_rate: 0.1,
        shuffle: false,
        ..TrainingOptions::default()
    };
    network.train(&examples, &examples, &options, &mut rng).unwrap();

    let weight_after = match &network.layers()[0] {
        Layer::Affine(layer) => layer.weights()[[0, 0]],
        _ => unreachable!(),
    };

    // d/dw (t - w*x)^2 = -2 * (t - w*x) * x, so the descent step is
    // lr * 2 * (t - w*x) * x
    let expected = weight_before + 0.1 * 2.0 * (1.0 - weight_before * 2.0) * 2.0;
    assert_relative_eq!(weight_after, expected, max_relative = 1e-12);
}
