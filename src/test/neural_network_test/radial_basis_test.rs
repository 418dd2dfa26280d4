use super::*;

#[test]
fn test_kernel_output_stays_in_unit_interval() {
    let mut rng = seeded_rng(20);
    let layer = RadialBasisFunctionLayer::new(3, 5, Activation::Identity, &mut rng);

    let probes = [
        array![0.0, 0.0, 0.0],
        array![0.5, -0.5, 0.25],
        array![10.0, 10.0, 10.0],
        array![-100.0, 50.0, 3.0],
    ];
    for input in &probes {
        for &output in layer.calculate_outputs(input).iter() {
            assert!(output > 0.0 && output <= 1.0, "kernel output {} out of (0, 1]", output);
        }
    }
}

#[test]
fn test_kernel_formula_squares_the_width() {
    let mut rng = seeded_rng(21);
    let layer = RadialBasisFunctionLayer::new(2, 3, Activation::Identity, &mut rng);
    let input = array![0.4, -1.1];

    let outputs = layer.calculate_outputs(&input);
    for i in 0..layer.number_of_outputs() {
        let difference = &input - &layer.centers().row(i);
        let squared_distance = difference.dot(&difference);
        let expected = (-layer.widths()[i].powi(2) * squared_distance).exp();
        assert_relative_eq!(outputs[i], expected, max_relative = 1e-12);
    }
}

#[test]
fn test_unit_centred_on_its_input_outputs_one() {
    let mut rng = seeded_rng(22);
    let layer = RadialBasisFunctionLayer::new(3, 4, Activation::Identity, &mut rng);

    let input = layer.centers().row(1).to_owned();
    let outputs = layer.calculate_outputs(&input);
    assert_eq!(outputs[1], 1.0);
}

#[test]
fn test_feed_forward_is_activate_of_calculate_outputs() {
    // the activation hooks stay live even though Identity is the convention
    let mut rng = seeded_rng(23);
    let layer = RadialBasisFunctionLayer::new(2, 3, Activation::Sigmoid, &mut rng);
    let input = array![0.2, 0.7];

    assert_eq!(
        layer.feed_forward(&input),
        layer.activate(&layer.calculate_outputs(&input))
    );
}

#[test]
fn test_backpropagate_length_matches_inputs() {
    let mut rng = seeded_rng(24);
    let layer = RadialBasisFunctionLayer::new(4, 2, Activation::Identity, &mut rng);

    let input = array![1.0, 0.0, -1.0, 0.5];
    let errors = array![0.3, -0.6];
    let outputs = layer.calculate_outputs(&input);
    let derivative = layer.outputs_derivative(&outputs);

    let propagated = layer.backpropagate(&input, &errors, &outputs, &derivative);
    assert_eq!(propagated.len(), layer.number_of_inputs());
}

#[test]
fn test_positive_error_pulls_centre_towards_input() {
    let mut rng = seeded_rng(25);
    let mut layer = RadialBasisFunctionLayer::new(2, 1, Activation::Identity, &mut rng);

    // probe strictly above the centre in every coordinate
    let input = layer.centers().row(0).to_owned() + array![1.0, 1.0];
    let outputs = layer.calculate_outputs(&input);
    let derivative = layer.outputs_derivative(&outputs);
    let centre_before = layer.centers().row(0).to_owned();

    layer.accumulate_step(&input, &array![1.0], &outputs, &derivative);
    layer.update(0.5, 0.0);

    for j in 0..layer.number_of_inputs() {
        assert!(
            layer.centers()[[0, j]] > centre_before[j],
            "centre coordinate {} did not move towards the input",
            j
        );
    }
}

#[test]
#[should_panic(expected = "at least one accumulated gradient step")]
fn test_update_without_steps_is_a_precondition_violation() {
    let mut rng = seeded_rng(26);
    let mut layer = RadialBasisFunctionLayer::new(2, 2, Activation::Identity, &mut rng);
    layer.update(0.1, 0.0);
}

#[test]
fn test_initial_widths_are_positive_and_scaled() {
    let mut rng = seeded_rng(27);
    let layer = RadialBasisFunctionLayer::new(6, 10, Activation::Identity, &mut rng);
    let limit = (2.0 / 16.0_f64).sqrt();

    assert!(layer.widths().iter().all(|&w| (0.0..limit).contains(&w)));
    assert!(layer.centers().iter().all(|&c| c.abs() <= limit));
}
