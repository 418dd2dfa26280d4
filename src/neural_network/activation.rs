use crate::neural_network::Vector;
use serde::{Deserialize, Serialize};

/// Elementwise activation functions, supporting Identity, Sigmoid, ReLU, and PReLU.
///
/// Each variant maps a pre-activation vector elementwise and exposes the
/// matching derivative. Derivatives are always evaluated **at the
/// pre-activation value**, never at the activated output.
///
/// `PReLU` carries its leak coefficient as a fixed scalar set at construction;
/// it is not trained by backpropagation. The enum has plain value semantics,
/// so cloning a layer deep-copies its activation state automatically.
///
/// # Example
/// ```rust
/// use rustynn::neural_network::Activation;
/// use ndarray::array;
///
/// let prelu = Activation::PReLU(0.1);
/// let output = prelu.apply(&array![2.0, -2.0]);
/// assert_eq!(output, array![2.0, -0.2]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Activation {
    Identity,
    Sigmoid,
    ReLU,
    PReLU(f64),
}

impl Activation {
    /// Applies the activation function elementwise to a pre-activation vector.
    ///
    /// # Parameters
    ///
    /// * `input` - Pre-activation values
    ///
    /// # Returns
    ///
    /// * `Vector` - The activated values, same length as the input
    pub fn apply(&self, input: &Vector) -> Vector {
        match self {
            Activation::Identity => input.clone(),
            Activation::Sigmoid => input.mapv(|x| 1.0 / (1.0 + (-x).exp())),
            Activation::ReLU => input.mapv(|x| x.max(0.0)),
            Activation::PReLU(alpha) => {
                let alpha = *alpha;
                input.mapv(|x| x.max(0.0) + alpha * x.min(0.0))
            }
        }
    }

    /// Computes the elementwise derivative at the pre-activation value.
    ///
    /// ReLU and PReLU have derivative 0 at exactly x = 0.
    ///
    /// # Parameters
    ///
    /// * `input` - Pre-activation values
    ///
    /// # Returns
    ///
    /// * `Vector` - The derivative values, same length as the input
    pub fn derivative(&self, input: &Vector) -> Vector {
        match self {
            Activation::Identity => Vector::ones(input.len()),
            Activation::Sigmoid => input.mapv(|x| {
                let s = 1.0 / (1.0 + (-x).exp());
                s * (1.0 - s)
            }),
            Activation::ReLU => input.mapv(|x| if x > 0.0 { 1.0 } else { 0.0 }),
            Activation::PReLU(alpha) => {
                let alpha = *alpha;
                input.mapv(|x| {
                    if x > 0.0 {
                        1.0
                    } else if x < 0.0 {
                        alpha
                    } else {
                        0.0
                    }
                })
            }
        }
    }
}
