use std::fs::File;
use std::io::BufReader;

/// Error types that can occur during model construction and training
///
/// # Variants
///
/// - `InputValidationError` - indicates the input data or configuration provided does not meet the expected format, dimensions, or validation rules
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    InputValidationError(String),
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::InputValidationError(msg) => write!(f, "Input validation error: {}", msg),
        }
    }
}

impl std::error::Error for ModelError {}

/// Input/Output error types that can occur during model serialization and file operations
///
/// # Variants
///
/// - `StdIoError` - Wraps standard I/O errors from file system operations (reading, writing, file access)
/// - `SerializationError` - Wraps binary encode/decode errors from the model file codec (unknown layer tag, truncated payload)
#[derive(Debug)]
pub enum IoError {
    StdIoError(std::io::Error),
    SerializationError(bincode::Error),
}

impl IoError {
    pub fn load_in_buf_reader(path: &str) -> Result<BufReader<File>, IoError> {
        let file = File::open(path).map_err(IoError::StdIoError)?;
        Ok(BufReader::new(file))
    }
}

impl std::fmt::Display for IoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoError::StdIoError(e) => write!(f, "IO error: {}", e),
            IoError::SerializationError(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for IoError {}
