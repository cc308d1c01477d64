use thiserror::Error;

/// Result type for predserve operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a features validation error
    pub fn features_validation(msg: impl Into<String>) -> Self {
        Error::FeaturesValidation(msg.into())
    }

    /// Create a labels validation error
    pub fn labels_validation(msg: impl Into<String>) -> Self {
        Error::LabelsValidation(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create a no-algorithm-available error
    pub fn no_algorithm(msg: impl Into<String>) -> Self {
        Error::NoAlgorithmAvailable(msg.into())
    }

    /// Create a features transformer error
    pub fn features_transformer(msg: impl Into<String>) -> Self {
        Error::FeaturesTransformer(msg.into())
    }

    /// Create a labels transformer error
    pub fn labels_transformer(msg: impl Into<String>) -> Self {
        Error::LabelsTransformer(msg.into())
    }

    /// Create a serving error
    pub fn serving(msg: impl Into<String>) -> Self {
        Error::Serving(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a publish error
    pub fn publish(msg: impl Into<String>) -> Self {
        Error::Publish(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Error::NotFound(msg.into())
    }

    /// Create a serialization error
    pub fn serialization(msg: impl Into<String>) -> Self {
        Error::Serialization(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}

/// Error context trait for adding context to errors
pub trait WithErrorContext {
    fn with_context(self, context: impl Into<String>) -> Self;
}

impl<T> WithErrorContext for Result<T> {
    fn with_context(self, context: impl Into<String>) -> Self {
        // Attach human-readable context so that logs and client responses
        // carry richer diagnostic details.
        self.map_err(|e| {
            let context_str = context.into();
            match e {
                Error::FeaturesValidation(msg) => {
                    Error::FeaturesValidation(format!("{}: {}", context_str, msg))
                }
                Error::LabelsValidation(msg) => {
                    Error::LabelsValidation(format!("{}: {}", context_str, msg))
                }
                Error::InvalidInput(msg) => Error::InvalidInput(format!("{}: {}", context_str, msg)),
                Error::NoAlgorithmAvailable(msg) => {
                    Error::NoAlgorithmAvailable(format!("{}: {}", context_str, msg))
                }
                Error::FeaturesTransformer(msg) => {
                    Error::FeaturesTransformer(format!("{}: {}", context_str, msg))
                }
                Error::LabelsTransformer(msg) => {
                    Error::LabelsTransformer(format!("{}: {}", context_str, msg))
                }
                Error::Serving(msg) => Error::Serving(format!("{}: {}", context_str, msg)),
                Error::Storage(msg) => Error::Storage(format!("{}: {}", context_str, msg)),
                Error::Publish(msg) => Error::Publish(format!("{}: {}", context_str, msg)),
                Error::NotFound(msg) => Error::NotFound(format!("{}: {}", context_str, msg)),
                Error::Serialization(msg) => {
                    Error::Serialization(format!("{}: {}", context_str, msg))
                }
                Error::Config(msg) => Error::Config(format!("{}: {}", context_str, msg)),
                Error::Internal(msg) => Error::Internal(format!("{}: {}", context_str, msg)),
                Error::Io(err) => Error::Internal(format!("{}: {}", context_str, err)),
            }
        })
    }
}

/// Main error type for predserve
///
/// Each dispatch failure kind is a distinct variant so a transport layer can
/// map it to a status code without inspecting free-text messages.
#[derive(Error, Debug)]
pub enum Error {
    /// Input features do not match the project's declared contract
    #[error("Features validation failed: {0}")]
    FeaturesValidation(String),

    /// Produced labels do not match the project's declared label set
    #[error("Labels validation failed: {0}")]
    LabelsValidation(String),

    /// Invalid input or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The policy or project has no usable algorithm
    #[error("No algorithm available: {0}")]
    NoAlgorithmAvailable(String),

    /// The remote backend could not accept the transformed features
    #[error("Features transformer error: {0}")]
    FeaturesTransformer(String),

    /// The remote response could not be converted to the label representation
    #[error("Labels transformer error: {0}")]
    LabelsTransformer(String),

    /// Remote serving call or response decode errors
    #[error("Serving error: {0}")]
    Serving(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Event publication errors
    #[error("Publish error: {0}")]
    Publish(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Implement From for common error types
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Serving(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(Error::invalid_argument("x"), Error::InvalidInput(_)));
        assert!(matches!(Error::no_algorithm("x"), Error::NoAlgorithmAvailable(_)));
        assert!(matches!(Error::serving("x"), Error::Serving(_)));
    }

    #[test]
    fn test_with_context() {
        let result: Result<()> = Err(Error::storage("write failed"));
        let err = result.with_context("inserting prediction").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Storage error: inserting prediction: write failed"
        );
    }
}
