pub use crate::error::{IoError, ModelError};
pub use crate::neural_network::{
    Activation, AffineLayer, Layer, Matrix, NeuralNetwork, RadialBasisFunctionLayer,
    TestingResults, TestingResultsPerExample, TrainingExample, TrainingOptions, TrainingResults,
    Vector, get_accuracy,
};
