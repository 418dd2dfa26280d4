//! A feed-forward neural network training engine in pure Rust.
//!
//! The crate builds networks as an ordered stack of heterogeneous layers
//! (affine transforms and radial-basis-function kernels) and trains
//! them with per-example backpropagation, momentum blending, and linear
//! learning-rate annealing. Trained models round-trip through a tagged binary
//! file format for later inference.
//!
//! # Example
//! ```rust
//! use rustynn::prelude::*;
//! use ndarray::array;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//!
//! // 2 -> 4 -> 2 sigmoid multi-layer perceptron
//! let mut network =
//!     NeuralNetwork::multilayer_perceptron(&[2, 4, 2], &[true, true], &mut rng).unwrap();
//!
//! let examples = vec![
//!     TrainingExample::new(array![0.0, 1.0], array![1.0, 0.0]),
//!     TrainingExample::new(array![1.0, 0.0], array![0.0, 1.0]),
//! ];
//!
//! let options = TrainingOptions {
//!     epochs: 100,
//!     learning_rate: 0.5,
//!     momentum: 0.8,
//!     ..TrainingOptions::default()
//! };
//!
//! let results = network
//!     .train(&examples, &examples, &options, &mut rng)
//!     .unwrap();
//! println!("final cost: {}", results.cost_per_epoch_interval.last().unwrap());
//!
//! let prediction = network.feed_forward(&array![0.0, 1.0]);
//! println!("prediction: {}", prediction);
//! ```

/// Error types shared across the crate: `ModelError` for construction and
/// configuration failures, `IoError` for model persistence.
pub mod error;

pub use error::{IoError, ModelError};

/// Components for building and training feed-forward neural networks.
///
/// # Core Components
///
/// ## Layer Types
/// - **AffineLayer**: Fully connected transform `W·x + b` with optional bias and a configurable activation function
/// - **RadialBasisFunctionLayer**: Gaussian kernel units with learned centers and widths
///
/// ## Activation Functions
/// - **Identity**, **Sigmoid**, **ReLU**, **PReLU** (fixed leak coefficient)
///
/// ## Orchestration
/// - **NeuralNetwork**: ordered layer stack with forward inference, a training
///   loop (shuffling, momentum, learning-rate annealing, cost-goal early
///   stop), a testing loop with per-example traces, and binary persistence
pub mod neural_network;

/// A convenience module that re-exports the most commonly used types from this crate.
pub mod prelude;
