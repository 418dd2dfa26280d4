use crate::neural_network::{Activation, Matrix, Vector};
use ndarray::Axis;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Affine (fully connected) layer: `output = activation(W·x + b)`.
///
/// Weights and biases are initialised with a variance-scaled uniform draw from
/// `±√(2 / (inputs + outputs))` to keep activations well-scaled at the start
/// of training. A layer can be constructed without a bias term, in which case
/// the bias vector is pinned to zero and the pre-activation is exactly `W·x`.
///
/// During training the layer accumulates descent-oriented gradient steps into
/// delta buffers (`accumulate_step`), then applies their average through
/// exponentially-blended momentum buffers (`update`). The momentum buffers
/// persist across updates; the delta buffers and step counter are cleared by
/// every `update`.
///
/// # Fields
/// ## Parameters
/// - `weights` - Weight matrix with shape (outputs, inputs)
/// - `biases` - Bias vector with length `outputs` (all-zero when bias is disabled)
/// - `activation` - The owned activation function
/// - `bias_enabled` - Whether the bias term participates in forward and update steps
///
/// ## Training state
/// - `delta_weights` / `delta_biases` - Gradient accumulators for the current accumulation window
/// - `momentum_weights` / `momentum_biases` - Exponentially-blended running steps
/// - `steps` - Number of `accumulate_step` calls since the last `update`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffineLayer {
    weights: Matrix,
    delta_weights: Matrix,
    momentum_weights: Matrix,
    biases: Vector,
    delta_biases: Vector,
    momentum_biases: Vector,
    activation: Activation,
    steps: usize,
    bias_enabled: bool,
}

impl AffineLayer {
    /// Creates a new affine layer with variance-scaled random parameters.
    ///
    /// # Parameters
    ///
    /// - `number_of_inputs` - Input dimension
    /// - `number_of_outputs` - Output dimension
    /// - `activation` - Activation function applied after the affine transform
    /// - `enable_bias` - When `false`, the bias vector stays zero forever
    /// - `rng` - Random source for the initial parameter draw
    ///
    /// # Returns
    ///
    /// * `Self` - A new layer with zeroed accumulators and momentum buffers
    pub fn new(
        number_of_inputs: usize,
        number_of_outputs: usize,
        activation: Activation,
        enable_bias: bool,
        rng: &mut impl Rng,
    ) -> Self {
        let limit = (2.0 / (number_of_inputs + number_of_outputs) as f64).sqrt();

        let weights = Matrix::from_shape_fn((number_of_outputs, number_of_inputs), |_| {
            rng.random_range(-limit..limit)
        });
        let biases = if enable_bias {
            Vector::from_shape_fn(number_of_outputs, |_| rng.random_range(-limit..limit))
        } else {
            Vector::zeros(number_of_outputs)
        };

        Self {
            delta_weights: Matrix::zeros(weights.raw_dim()),
            momentum_weights: Matrix::zeros(weights.raw_dim()),
            delta_biases: Vector::zeros(number_of_outputs),
            momentum_biases: Vector::zeros(number_of_outputs),
            weights,
            biases,
            activation,
            steps: 0,
            bias_enabled: enable_bias,
        }
    }

    /// Computes the pre-activation `W·x + b` (`W·x` when bias is disabled).
    pub fn calculate_outputs(&self, inputs: &Vector) -> Vector {
        if self.bias_enabled {
            self.weights.dot(inputs) + &self.biases
        } else {
            self.weights.dot(inputs)
        }
    }

    /// Applies the owned activation function to a pre-activation vector.
    pub fn activate(&self, outputs: &Vector) -> Vector {
        self.activation.apply(outputs)
    }

    /// Computes the activation derivative at the pre-activation value.
    pub fn outputs_derivative(&self, outputs: &Vector) -> Vector {
        self.activation.derivative(outputs)
    }

    /// Runs the full forward step: `activate(calculate_outputs(inputs))`.
    pub fn feed_forward(&self, inputs: &Vector) -> Vector {
        self.activate(&self.calculate_outputs(inputs))
    }

    /// Returns `Wᵗ·(errors ⊙ derivative)`, the error attributed to the inputs.
    pub fn backpropagate(
        &self,
        _inputs: &Vector,
        errors: &Vector,
        _outputs: &Vector,
        derivative: &Vector,
    ) -> Vector {
        self.weights.t().dot(&(errors * derivative))
    }

    /// Accumulates one gradient contribution into the delta buffers.
    ///
    /// With `d = errors ⊙ derivative`, this adds `d·xᵗ` to `delta_weights` and
    /// `d` to `delta_biases`. The stored delta is already oriented as a
    /// descent step (errors follow the `target − output` convention), so
    /// `update` adds it directly.
    pub fn accumulate_step(
        &mut self,
        inputs: &Vector,
        errors: &Vector,
        _outputs: &Vector,
        derivative: &Vector,
    ) {
        let descent = errors * derivative;

        let outer = descent
            .view()
            .insert_axis(Axis(1))
            .dot(&inputs.view().insert_axis(Axis(0)));
        self.delta_weights += &outer;

        if self.bias_enabled {
            self.delta_biases += &descent;
        }

        self.steps += 1;
    }

    /// Applies the averaged accumulated step through the momentum buffers:
    /// `momentum = momentum_coefficient · momentum + learning_rate · (delta / steps)`,
    /// then `W += momentum_weights` (and likewise for the bias when enabled).
    /// Resets the delta buffers and step counter; momentum buffers persist.
    ///
    /// # Panics
    ///
    /// Panics if called with zero accumulated steps.
    pub fn update(&mut self, learning_rate: f64, momentum: f64) {
        assert!(
            self.steps > 0,
            "update requires at least one accumulated gradient step"
        );
        let scale = learning_rate / self.steps as f64;

        self.momentum_weights = &self.momentum_weights * momentum + &self.delta_weights * scale;
        self.weights += &self.momentum_weights;

        if self.bias_enabled {
            self.momentum_biases = &self.momentum_biases * momentum + &self.delta_biases * scale;
            self.biases += &self.momentum_biases;
        }

        self.delta_weights.fill(0.0);
        self.delta_biases.fill(0.0);
        self.steps = 0;
    }

    /// Input dimension of the layer.
    pub fn number_of_inputs(&self) -> usize {
        self.weights.ncols()
    }

    /// Output dimension of the layer.
    pub fn number_of_outputs(&self) -> usize {
        self.weights.nrows()
    }

    /// Returns a reference to the weight matrix (shape `(outputs, inputs)`).
    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    /// Returns a reference to the bias vector.
    pub fn biases(&self) -> &Vector {
        &self.biases
    }

    /// Returns a reference to the owned activation function.
    pub fn activation(&self) -> &Activation {
        &self.activation
    }

    /// Whether the bias term participates in this layer.
    pub fn is_bias_enabled(&self) -> bool {
        self.bias_enabled
    }
}
