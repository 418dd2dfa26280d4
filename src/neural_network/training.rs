use crate::ModelError;
use crate::neural_network::Vector;

/// One supervised example: an input vector and the target output vector.
///
/// Examples are immutable and externally supplied; the engine imposes no
/// format beyond fixed, consistent vector lengths per model.
#[derive(Debug, Clone)]
pub struct TrainingExample {
    pub inputs: Vector,
    pub targets: Vector,
}

impl TrainingExample {
    /// Creates a new training example from an input/target pair.
    pub fn new(inputs: Vector, targets: Vector) -> Self {
        Self { inputs, targets }
    }
}

/// Configuration for [`NeuralNetwork::train`](crate::neural_network::NeuralNetwork::train).
///
/// # Fields
///
/// - `epochs` - Maximum number of passes over the training set
/// - `cost_goal` - Early-stop threshold on per-epoch mean squared cost
/// - `learning_rate` - Initial learning rate
/// - `learning_rate_change` - Total linear annealing: the rate drops by `learning_rate_change / epochs` after each epoch
/// - `momentum` - Momentum blending coefficient
/// - `shuffle` - Whether to reshuffle the example order every epoch
/// - `epoch_interval` - How often cost/accuracy snapshots are recorded
#[derive(Debug, Clone)]
pub struct TrainingOptions {
    pub epochs: usize,
    pub cost_goal: f64,
    pub learning_rate: f64,
    pub learning_rate_change: f64,
    pub momentum: f64,
    pub shuffle: bool,
    pub epoch_interval: usize,
}

impl Default for TrainingOptions {
    fn default() -> Self {
        Self {
            epochs: 1,
            cost_goal: 0.0,
            learning_rate: 0.01,
            learning_rate_change: 0.0,
            momentum: 0.0,
            shuffle: true,
            epoch_interval: 1,
        }
    }
}

impl TrainingOptions {
    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if self.epochs == 0 {
            return Err(ModelError::InputValidationError(
                "Number of epochs must be at least 1".to_string(),
            ));
        }
        if self.epoch_interval == 0 {
            return Err(ModelError::InputValidationError(
                "Epoch interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Cost and accuracy series recorded while training.
///
/// One entry is appended to each series every `epoch_interval` epochs, and
/// always for the final epoch.
#[derive(Debug, Clone)]
pub struct TrainingResults {
    pub epoch_interval: usize,
    pub cost_per_epoch_interval: Vec<f64>,
    pub accuracy_training: Vec<f64>,
    pub accuracy_testing: Vec<f64>,
}

/// Result of a testing pass: the mean cost over all examples plus a full
/// per-example breakdown for external reporting.
#[derive(Debug, Clone)]
pub struct TestingResults {
    pub global_cost: f64,
    pub per_example: Vec<TestingResultsPerExample>,
}

/// Full trace of one example through the network.
///
/// # Fields
///
/// - `neurons` - Activations per layer; `neurons[0]` is the input, `neurons[k + 1]` the output of layer `k`
/// - `targets` - The example's target vector
/// - `errors` - Error chain; `errors[k]` is aligned with layer `k`'s input, the last entry with the network output
/// - `cost` - Sum of squared output errors for this example
#[derive(Debug, Clone)]
pub struct TestingResultsPerExample {
    pub neurons: Vec<Vector>,
    pub targets: Vector,
    pub errors: Vec<Vector>,
    pub cost: f64,
}
