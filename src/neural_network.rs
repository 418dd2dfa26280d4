/// Module that contains activation function implementations
pub mod activation;
/// Module that contains neural network layer implementations
pub mod layer;
/// Module that contains the network orchestrator (training, testing, persistence)
pub mod network;
/// Module that contains training examples, options, and result structures
pub mod training;

pub use activation::*;
pub use layer::*;
pub use network::*;
pub use training::*;

use ndarray::{Array1, Array2};

/// Type alias for the column vectors flowing between layers
pub type Vector = Array1<f64>;

/// Type alias for layer parameter matrices (one row per output unit)
pub type Matrix = Array2<f64>;
