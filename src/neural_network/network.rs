use crate::ModelError;
use crate::error::IoError;
use crate::neural_network::{
    Activation, AffineLayer, Layer, TestingResults, TestingResultsPerExample, TrainingExample,
    TrainingOptions, TrainingResults, Vector,
};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{BufWriter, Write};

/// A feed-forward neural network: an ordered, fixed stack of heterogeneous
/// layers trained with per-example backpropagation.
///
/// The network exclusively owns its layers. Construction validates the stack
/// (non-empty, adjacent dimensions matching) and fails fast on any mismatch;
/// no silent broadcasting ever happens.
///
/// Training runs the classic per-example state machine once per example per
/// epoch: forward pass (recording pre-activation derivatives and activations
/// per layer), error seed `target − output`, backward pass by descending layer
/// index, gradient accumulation, and a momentum-blended update. The learning
/// rate anneals linearly across epochs and training stops early once the mean
/// epoch cost drops below the configured goal.
///
/// # Example
/// ```rust
/// use rustynn::prelude::*;
/// use ndarray::array;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let mut rng = StdRng::seed_from_u64(42);
///
/// let layers = vec![
///     Layer::from(RadialBasisFunctionLayer::new(2, 6, Activation::Identity, &mut rng)),
///     Layer::from(AffineLayer::new(6, 2, Activation::Sigmoid, true, &mut rng)),
/// ];
/// let mut network = NeuralNetwork::new(layers).unwrap();
///
/// let examples = vec![
///     TrainingExample::new(array![0.0, 1.0], array![1.0, 0.0]),
///     TrainingExample::new(array![1.0, 0.0], array![0.0, 1.0]),
/// ];
///
/// let options = TrainingOptions {
///     epochs: 50,
///     learning_rate: 0.3,
///     momentum: 0.5,
///     ..TrainingOptions::default()
/// };
/// network.train(&examples, &examples, &options, &mut rng).unwrap();
///
/// let results = network.test(&examples).unwrap();
/// println!("mean cost after training: {}", results.global_cost);
/// ```
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    layers: Vec<Layer>,
}

impl NeuralNetwork {
    /// Creates a network from an explicit layer stack.
    ///
    /// # Parameters
    ///
    /// * `layers` - The layers in forward order; the network takes ownership
    ///
    /// # Returns
    ///
    /// - `Ok(NeuralNetwork)` - If the stack is non-empty and dimensionally consistent
    /// - `Err(ModelError::InputValidationError)` - On an empty stack, a zero-sized layer, or an adjacent dimension mismatch
    pub fn new(layers: Vec<Layer>) -> Result<Self, ModelError> {
        validate_layers(&layers)?;
        Ok(Self { layers })
    }

    /// Builds a sigmoid multi-layer perceptron from a list of layer widths.
    ///
    /// `neurons_per_layer = [4, 8, 4]` produces two affine layers, 4→8 and
    /// 8→4, both with sigmoid activation; `enable_bias_per_layer` holds one
    /// flag per constructed layer.
    ///
    /// # Parameters
    ///
    /// - `neurons_per_layer` - Widths of the input layer and every subsequent layer (at least two entries)
    /// - `enable_bias_per_layer` - One bias flag per constructed layer (`neurons_per_layer.len() - 1` entries)
    /// - `rng` - Random source for weight initialisation
    pub fn multilayer_perceptron(
        neurons_per_layer: &[usize],
        enable_bias_per_layer: &[bool],
        rng: &mut impl Rng,
    ) -> Result<Self, ModelError> {
        if neurons_per_layer.len() < 2 {
            return Err(ModelError::InputValidationError(
                "A multi-layer perceptron needs at least an input and an output width".to_string(),
            ));
        }
        if enable_bias_per_layer.len() != neurons_per_layer.len() - 1 {
            return Err(ModelError::InputValidationError(format!(
                "Expected {} bias flags, got {}",
                neurons_per_layer.len() - 1,
                enable_bias_per_layer.len()
            )));
        }

        let layers = neurons_per_layer
            .windows(2)
            .zip(enable_bias_per_layer)
            .map(|(widths, &enable_bias)| {
                Layer::from(AffineLayer::new(
                    widths[0],
                    widths[1],
                    Activation::Sigmoid,
                    enable_bias,
                    rng,
                ))
            })
            .collect();

        Self::new(layers)
    }

    /// Loads a network from a binary model file.
    ///
    /// # Returns
    ///
    /// - `Ok(NeuralNetwork)` - The deserialized, validated network
    /// - `Err(IoError::StdIoError)` - File access failure, or a file whose layer stack fails validation
    /// - `Err(IoError::SerializationError)` - Unknown layer/activation tag or truncated payload
    pub fn from_file(path: &str) -> Result<Self, IoError> {
        let reader = IoError::load_in_buf_reader(path)?;
        let layers: Vec<Layer> =
            bincode::deserialize_from(reader).map_err(IoError::SerializationError)?;

        Self::new(layers).map_err(|e| {
            IoError::StdIoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e.to_string(),
            ))
        })
    }

    /// Saves the network to a binary model file.
    ///
    /// Each layer is written as a tagged record carrying its full state:
    /// weight matrix, bias/width vector, accumulators, momentum buffers, step
    /// counter, and the nested tagged activation record. Reloading reproduces
    /// `feed_forward` outputs bit-for-bit.
    pub fn save_to_file(&self, path: &str) -> Result<(), IoError> {
        let file = File::create(path).map_err(IoError::StdIoError)?;
        let mut writer = BufWriter::new(file);

        bincode::serialize_into(&mut writer, &self.layers).map_err(IoError::SerializationError)?;
        writer.flush().map_err(IoError::StdIoError)?;

        Ok(())
    }

    /// Replaces this network's layers with the contents of a model file.
    pub fn read_from_file(&mut self, path: &str) -> Result<(), IoError> {
        *self = Self::from_file(path)?;
        Ok(())
    }

    /// Pure inference: feeds the input through every layer in order.
    pub fn feed_forward(&self, inputs: &Vector) -> Vector {
        let mut neurons = inputs.clone();
        for layer in &self.layers {
            neurons = layer.feed_forward(&neurons);
        }
        neurons
    }

    /// Returns the layer stack.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Trains the network on `training_examples`, recording cost and accuracy
    /// snapshots against both the training set and the held-out
    /// `testing_examples`.
    ///
    /// Per epoch: the example order is optionally reshuffled, every example
    /// runs the forward/backward/accumulate/update state machine (accumulation
    /// window of one example), and the per-epoch mean squared cost is
    /// compared against `options.cost_goal` for early stopping. Gradient
    /// accumulation uses the squared-error derivative `2·(target − output)`;
    /// the reported cost stays `Σ(target − output)²`. After each epoch the
    /// learning rate drops by `learning_rate_change / epochs`.
    ///
    /// # Parameters
    ///
    /// - `training_examples` - Examples the network learns from
    /// - `testing_examples` - Held-out examples used only for accuracy snapshots
    /// - `options` - Training-loop configuration
    /// - `rng` - Random source for the per-epoch shuffle
    ///
    /// # Returns
    ///
    /// - `Ok(TrainingResults)` - Cost and accuracy series, one entry per snapshot
    /// - `Err(ModelError::InputValidationError)` - Invalid options, empty example sets, or examples whose dimensions do not match the network
    pub fn train(
        &mut self,
        training_examples: &[TrainingExample],
        testing_examples: &[TrainingExample],
        options: &TrainingOptions,
        rng: &mut impl Rng,
    ) -> Result<TrainingResults, ModelError> {
        options.validate()?;
        self.validate_examples(training_examples)?;
        self.validate_examples(testing_examples)?;

        let mut results = TrainingResults {
            epoch_interval: options.epoch_interval,
            cost_per_epoch_interval: Vec::new(),
            accuracy_training: Vec::new(),
            accuracy_testing: Vec::new(),
        };

        let mut learning_rate = options.learning_rate;
        let mut order: Vec<usize> = (0..training_examples.len()).collect();

        let progress_bar = ProgressBar::new(options.epochs as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} | Cost: {msg}")
                .expect("Failed to set progress bar template")
                .progress_chars("█▓░"),
        );

        for epoch in 0..options.epochs {
            if options.shuffle {
                order.shuffle(rng);
            }

            let mut cost_per_epoch = 0.0;

            for &index in &order {
                let example = &training_examples[index];
                let (neurons, derivatives, mut errors) = self.forward_backward(example);

                cost_per_epoch += errors[self.layers.len()].mapv(|e| e * e).sum();

                // The gradient of the squared error is 2·(target − output).
                // The error chain is linear in its seed, so the factor is
                // applied once here rather than inside every layer.
                for error in &mut errors {
                    *error *= 2.0;
                }

                for k in 0..self.layers.len() {
                    self.layers[k].accumulate_step(
                        &neurons[k],
                        &errors[k + 1],
                        &neurons[k + 1],
                        &derivatives[k],
                    );
                }

                for layer in &mut self.layers {
                    layer.update(learning_rate, options.momentum);
                }
            }

            cost_per_epoch /= training_examples.len() as f64;

            progress_bar.set_message(format!("{:.6}", cost_per_epoch));
            progress_bar.inc(1);

            // The final epoch is always recorded, whether the loop runs to
            // completion or the cost goal stops it early.
            if epoch % options.epoch_interval == 0
                || epoch == options.epochs - 1
                || cost_per_epoch < options.cost_goal
            {
                results.cost_per_epoch_interval.push(cost_per_epoch);
                results
                    .accuracy_training
                    .push(get_accuracy(self, training_examples)?);
                results
                    .accuracy_testing
                    .push(get_accuracy(self, testing_examples)?);
            }

            if cost_per_epoch < options.cost_goal {
                break;
            }

            learning_rate -= options.learning_rate_change / options.epochs as f64;
        }

        progress_bar.finish_with_message("Training completed");

        Ok(results)
    }

    /// Runs the forward and backward passes over the given examples without
    /// any gradient accumulation or parameter update.
    ///
    /// # Returns
    ///
    /// - `Ok(TestingResults)` - Mean cost over the set and, per example, the full neuron trace, targets, error chain, and scalar cost
    /// - `Err(ModelError::InputValidationError)` - Empty example set or dimension mismatch
    pub fn test(&self, examples: &[TrainingExample]) -> Result<TestingResults, ModelError> {
        self.validate_examples(examples)?;

        let mut results = TestingResults {
            global_cost: 0.0,
            per_example: Vec::with_capacity(examples.len()),
        };

        for example in examples {
            let (neurons, _derivatives, errors) = self.forward_backward(example);

            let cost = errors[self.layers.len()].mapv(|e| e * e).sum();
            results.global_cost += cost;

            results.per_example.push(TestingResultsPerExample {
                neurons,
                targets: example.targets.clone(),
                errors,
                cost,
            });
        }

        results.global_cost /= examples.len() as f64;

        Ok(results)
    }

    /// Forward and backward pass for one example.
    ///
    /// Returns index-addressed per-layer records: `neurons[0]` is the input
    /// and `neurons[k + 1]` the activated output of layer `k`;
    /// `derivatives[k]` the activation derivative at layer `k`'s
    /// pre-activation; `errors[k + 1]` the error aligned with layer `k`'s
    /// output, seeded with `targets − output` at the last layer and
    /// propagated down to `errors[0]` at the network input.
    fn forward_backward(
        &self,
        example: &TrainingExample,
    ) -> (Vec<Vector>, Vec<Vector>, Vec<Vector>) {
        let mut neurons = Vec::with_capacity(self.layers.len() + 1);
        let mut derivatives = Vec::with_capacity(self.layers.len());
        neurons.push(example.inputs.clone());

        for (k, layer) in self.layers.iter().enumerate() {
            let pre_activation = layer.calculate_outputs(&neurons[k]);
            derivatives.push(layer.outputs_derivative(&pre_activation));
            neurons.push(layer.activate(&pre_activation));
        }

        let last = self.layers.len();
        let mut errors = vec![Vector::zeros(0); last + 1];
        errors[last] = &example.targets - &neurons[last];

        for k in (0..last).rev() {
            errors[k] = self.layers[k].backpropagate(
                &neurons[k],
                &errors[k + 1],
                &neurons[k + 1],
                &derivatives[k],
            );
        }

        (neurons, derivatives, errors)
    }

    fn validate_examples(&self, examples: &[TrainingExample]) -> Result<(), ModelError> {
        if examples.is_empty() {
            return Err(ModelError::InputValidationError(
                "Example set cannot be empty".to_string(),
            ));
        }

        let inputs = self.layers[0].number_of_inputs();
        let outputs = self.layers[self.layers.len() - 1].number_of_outputs();

        for (index, example) in examples.iter().enumerate() {
            if example.inputs.len() != inputs {
                return Err(ModelError::InputValidationError(format!(
                    "Example {} has {} inputs, network expects {}",
                    index,
                    example.inputs.len(),
                    inputs
                )));
            }
            if example.targets.len() != outputs {
                return Err(ModelError::InputValidationError(format!(
                    "Example {} has {} targets, network produces {}",
                    index,
                    example.targets.len(),
                    outputs
                )));
            }
        }

        Ok(())
    }
}

/// Fraction of examples whose predicted argmax matches the target argmax.
///
/// # Returns
///
/// - `Ok(f64)` - Accuracy in `[0.0, 1.0]`
/// - `Err(ModelError::InputValidationError)` - Empty example set or dimension mismatch
pub fn get_accuracy(
    network: &NeuralNetwork,
    examples: &[TrainingExample],
) -> Result<f64, ModelError> {
    let testing_results = network.test(examples)?;

    let mut accurate_classifications = 0usize;
    for per_example in &testing_results.per_example {
        let outputs = &per_example.neurons[per_example.neurons.len() - 1];
        if argmax(outputs) == argmax(&per_example.targets) {
            accurate_classifications += 1;
        }
    }

    Ok(accurate_classifications as f64 / examples.len() as f64)
}

fn argmax(values: &Vector) -> usize {
    let mut best = 0;
    for (index, &value) in values.iter().enumerate() {
        if value > values[best] {
            best = index;
        }
    }
    best
}

fn validate_layers(layers: &[Layer]) -> Result<(), ModelError> {
    if layers.is_empty() {
        return Err(ModelError::InputValidationError(
            "Layer stack cannot be empty".to_string(),
        ));
    }

    for (index, layer) in layers.iter().enumerate() {
        if layer.number_of_inputs() == 0 || layer.number_of_outputs() == 0 {
            return Err(ModelError::InputValidationError(format!(
                "Layer {} has a zero dimension ({}x{})",
                index,
                layer.number_of_outputs(),
                layer.number_of_inputs()
            )));
        }
    }

    for (index, pair) in layers.windows(2).enumerate() {
        if pair[0].number_of_outputs() != pair[1].number_of_inputs() {
            return Err(ModelError::InputValidationError(format!(
                "Layer {} produces {} outputs but layer {} expects {} inputs",
                index,
                pair[0].number_of_outputs(),
                index + 1,
                pair[1].number_of_inputs()
            )));
        }
    }

    Ok(())
}
