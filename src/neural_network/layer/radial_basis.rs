use crate::neural_network::{Activation, Matrix, Vector};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Radial-basis-function layer: each output unit `i` is a Gaussian kernel
/// `y_i = exp(-width_i² · ‖x − center_i‖²)`.
///
/// Row `i` of the weight matrix is unit `i`'s center; entry `i` of the bias
/// vector is its width. The width is squared before use, so the kernel is a
/// proper decaying Gaussian regardless of the stored width's sign, and every
/// output lies in `(0, 1]`.
///
/// There is no bias-disable mode; a radial unit always has a width term. No
/// activation is usually composed on top (`Identity` is the conventional
/// choice), but the activation hooks are live so the layer composes under the
/// same protocol as the affine layer.
///
/// Centers are initialised with a variance-scaled uniform draw from
/// `±√(2 / (inputs + outputs))`; widths with a positive draw from
/// `(0, √(2 / (inputs + outputs)))`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadialBasisFunctionLayer {
    weights: Matrix,
    delta_weights: Matrix,
    momentum_weights: Matrix,
    biases: Vector,
    delta_biases: Vector,
    momentum_biases: Vector,
    activation: Activation,
    steps: usize,
}

impl RadialBasisFunctionLayer {
    /// Creates a new radial-basis-function layer with random centers and widths.
    ///
    /// # Parameters
    ///
    /// - `number_of_inputs` - Input dimension (center dimensionality)
    /// - `number_of_outputs` - Number of radial units
    /// - `activation` - Activation composed on top of the kernel outputs (`Identity` by convention)
    /// - `rng` - Random source for the initial center/width draw
    ///
    /// # Returns
    ///
    /// * `Self` - A new layer with zeroed accumulators and momentum buffers
    pub fn new(
        number_of_inputs: usize,
        number_of_outputs: usize,
        activation: Activation,
        rng: &mut impl Rng,
    ) -> Self {
        let limit = (2.0 / (number_of_inputs + number_of_outputs) as f64).sqrt();

        let weights = Matrix::from_shape_fn((number_of_outputs, number_of_inputs), |_| {
            rng.random_range(-limit..limit)
        });
        let biases = Vector::from_shape_fn(number_of_outputs, |_| rng.random_range(0.0..limit));

        Self {
            delta_weights: Matrix::zeros(weights.raw_dim()),
            momentum_weights: Matrix::zeros(weights.raw_dim()),
            delta_biases: Vector::zeros(number_of_outputs),
            momentum_biases: Vector::zeros(number_of_outputs),
            weights,
            biases,
            activation,
            steps: 0,
        }
    }

    /// Evaluates every kernel unit: `y_i = exp(-width_i² · ‖x − center_i‖²)`.
    pub fn calculate_outputs(&self, inputs: &Vector) -> Vector {
        Vector::from_shape_fn(self.number_of_outputs(), |i| {
            let difference = inputs - &self.weights.row(i);
            let squared_distance = difference.dot(&difference);
            (-self.biases[i].powi(2) * squared_distance).exp()
        })
    }

    /// Applies the owned activation function to the kernel outputs.
    pub fn activate(&self, outputs: &Vector) -> Vector {
        self.activation.apply(outputs)
    }

    /// Computes the activation derivative at the kernel output value.
    pub fn outputs_derivative(&self, outputs: &Vector) -> Vector {
        self.activation.derivative(outputs)
    }

    /// Runs the full forward step: `activate(calculate_outputs(inputs))`.
    pub fn feed_forward(&self, inputs: &Vector) -> Vector {
        self.activate(&self.calculate_outputs(inputs))
    }

    /// Attributes the output error to the inputs through the kernel partials:
    /// `prev_j = Σ_i errors_i · derivative_i · ∂y_i/∂x_j` with
    /// `∂y_i/∂x_j = y_i · (-width_i²) · 2 · (x_j − center_ij)`.
    pub fn backpropagate(
        &self,
        inputs: &Vector,
        errors: &Vector,
        outputs: &Vector,
        derivative: &Vector,
    ) -> Vector {
        let mut propagated = Vector::zeros(self.number_of_inputs());

        for i in 0..self.number_of_outputs() {
            let scale = errors[i] * derivative[i] * outputs[i] * -self.biases[i].powi(2) * 2.0;
            for j in 0..self.number_of_inputs() {
                propagated[j] += scale * (inputs[j] - self.weights[[i, j]]);
            }
        }

        propagated
    }

    /// Accumulates one gradient contribution for every center and width.
    ///
    /// Per unit `i` and coordinate `j`, with `e_i = errors_i · derivative_i`:
    /// - `∂y_i/∂center_ij = y_i · (-width_i²) · 2 · (x_j − center_ij) · (−1)`
    /// - `∂y_i/∂width_i = y_i · (−‖x − center_i‖²) · 2 · width_i`
    ///
    /// and the descent-oriented deltas are `delta += e_i · ∂y_i/∂param`,
    /// matching the affine layer's sign convention.
    pub fn accumulate_step(
        &mut self,
        inputs: &Vector,
        errors: &Vector,
        outputs: &Vector,
        derivative: &Vector,
    ) {
        for i in 0..self.number_of_outputs() {
            let attributed = errors[i] * derivative[i] * outputs[i];
            let width = self.biases[i];

            let mut squared_distance = 0.0;
            for j in 0..self.number_of_inputs() {
                let offset = inputs[j] - self.weights[[i, j]];
                squared_distance += offset * offset;

                self.delta_weights[[i, j]] += attributed * -width.powi(2) * 2.0 * offset * -1.0;
            }

            self.delta_biases[i] += attributed * -squared_distance * 2.0 * width;
        }

        self.steps += 1;
    }

    /// Applies the averaged accumulated step through the momentum buffers to
    /// centers and widths, then resets the delta buffers and step counter.
    /// Momentum buffers persist across updates.
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

        self.momentum_biases = &self.momentum_biases * momentum + &self.delta_biases * scale;
        self.biases += &self.momentum_biases;

        self.delta_weights.fill(0.0);
        self.delta_biases.fill(0.0);
        self.steps = 0;
    }

    /// Input dimension of the layer.
    pub fn number_of_inputs(&self) -> usize {
        self.weights.ncols()
    }

    /// Number of radial units.
    pub fn number_of_outputs(&self) -> usize {
        self.weights.nrows()
    }

    /// Returns a reference to the center matrix (one center per row).
    pub fn centers(&self) -> &Matrix {
        &self.weights
    }

    /// Returns a reference to the width vector.
    pub fn widths(&self) -> &Vector {
        &self.biases
    }

    /// Returns a reference to the owned activation function.
    pub fn activation(&self) -> &Activation {
        &self.activation
    }
}
