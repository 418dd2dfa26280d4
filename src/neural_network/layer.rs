/// Module that contains the affine (dense) layer implementation
pub mod affine;
/// Module that contains the radial-basis-function layer implementation
pub mod radial_basis;

pub use affine::AffineLayer;
pub use radial_basis::RadialBasisFunctionLayer;

use crate::neural_network::Vector;
use serde::{Deserialize, Serialize};

/// The closed set of layer kinds a network can be composed of.
///
/// The forward/backward/update protocol is dispatched by pattern matching, and
/// the enum's own variant tag doubles as the layer tag in the binary model
/// format. All variants obey the same protocol contract:
///
/// - `feed_forward(x)` always equals `activate(calculate_outputs(x))`
/// - `backpropagate` always returns a vector of length `number_of_inputs()`
/// - `accumulate_step` only accumulates; weights move exclusively in `update`
/// - `update` averages the accumulated deltas over the step count, blends them
///   into the momentum buffers, applies the momentum buffers to the
///   parameters, and resets the accumulators (momentum buffers persist)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Layer {
    Affine(AffineLayer),
    RadialBasis(RadialBasisFunctionLayer),
}

impl Layer {
    /// Computes the pre-activation output of the layer.
    pub fn calculate_outputs(&self, inputs: &Vector) -> Vector {
        match self {
            Layer::Affine(layer) => layer.calculate_outputs(inputs),
            Layer::RadialBasis(layer) => layer.calculate_outputs(inputs),
        }
    }

    /// Applies the layer's owned activation function to a pre-activation vector.
    pub fn activate(&self, outputs: &Vector) -> Vector {
        match self {
            Layer::Affine(layer) => layer.activate(outputs),
            Layer::RadialBasis(layer) => layer.activate(outputs),
        }
    }

    /// Computes the activation derivative at the pre-activation value.
    pub fn outputs_derivative(&self, outputs: &Vector) -> Vector {
        match self {
            Layer::Affine(layer) => layer.outputs_derivative(outputs),
            Layer::RadialBasis(layer) => layer.outputs_derivative(outputs),
        }
    }

    /// Runs the full forward step: `activate(calculate_outputs(inputs))`.
    pub fn feed_forward(&self, inputs: &Vector) -> Vector {
        match self {
            Layer::Affine(layer) => layer.feed_forward(inputs),
            Layer::RadialBasis(layer) => layer.feed_forward(inputs),
        }
    }

    /// Attributes the layer's output error to its inputs via the layer's Jacobian.
    ///
    /// # Parameters
    ///
    /// - `inputs` - The input the layer saw during the forward pass
    /// - `errors` - The error vector aligned with this layer's output
    /// - `outputs` - The recorded post-activation output
    /// - `derivative` - The recorded activation derivative at the pre-activation value
    ///
    /// # Returns
    ///
    /// * `Vector` - The error vector for the previous layer, length `number_of_inputs()`
    pub fn backpropagate(
        &self,
        inputs: &Vector,
        errors: &Vector,
        outputs: &Vector,
        derivative: &Vector,
    ) -> Vector {
        match self {
            Layer::Affine(layer) => layer.backpropagate(inputs, errors, outputs, derivative),
            Layer::RadialBasis(layer) => layer.backpropagate(inputs, errors, outputs, derivative),
        }
    }

    /// Accumulates one gradient contribution into the layer's delta buffers
    /// and increments the step counter. Does not touch the parameters.
    pub fn accumulate_step(
        &mut self,
        inputs: &Vector,
        errors: &Vector,
        outputs: &Vector,
        derivative: &Vector,
    ) {
        match self {
            Layer::Affine(layer) => layer.accumulate_step(inputs, errors, outputs, derivative),
            Layer::RadialBasis(layer) => layer.accumulate_step(inputs, errors, outputs, derivative),
        }
    }

    /// Applies the averaged, momentum-blended accumulated step to the
    /// parameters and resets the accumulators.
    ///
    /// # Panics
    ///
    /// Panics if no `accumulate_step` call preceded this update; a zero step
    /// count is a fatal precondition violation, not a recoverable error.
    pub fn update(&mut self, learning_rate: f64, momentum: f64) {
        match self {
            Layer::Affine(layer) => layer.update(learning_rate, momentum),
            Layer::RadialBasis(layer) => layer.update(learning_rate, momentum),
        }
    }

    /// Input dimension of the layer.
    pub fn number_of_inputs(&self) -> usize {
        match self {
            Layer::Affine(layer) => layer.number_of_inputs(),
            Layer::RadialBasis(layer) => layer.number_of_inputs(),
        }
    }

    /// Output dimension of the layer.
    pub fn number_of_outputs(&self) -> usize {
        match self {
            Layer::Affine(layer) => layer.number_of_outputs(),
            Layer::RadialBasis(layer) => layer.number_of_outputs(),
        }
    }
}

impl From<AffineLayer> for Layer {
    fn from(layer: AffineLayer) -> Self {
        Layer::Affine(layer)
    }
}

impl From<RadialBasisFunctionLayer> for Layer {
    fn from(layer: RadialBasisFunctionLayer) -> Self {
        Layer::RadialBasis(layer)
    }
}
