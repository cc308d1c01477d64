//! Predserve - policy-driven prediction dispatch engine
//!
//! Predserve accepts feature vectors for a registered project and produces a
//! prediction by dispatching the request to one of the project's registered
//! compute backends, selected either explicitly or through the project's
//! selection policy.
//!
//! # Features
//!
//! - Feature/label validation against a project's declared contract
//! - Policy-driven algorithm selection (default, weighted random)
//! - Pluggable backends: inline precomputed answers or remote serving over HTTP
//! - Transformer pair between the generic representation and a backend's wire format
//! - Typed failure taxonomy for every dispatch step
//! - Fire-and-forget prediction event publication
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use predserve::{Config, PredictionDispatcher, Result};
//! use predserve::storage::MemoryStore;
//! use predserve::event::MemoryEventPublisher;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let dispatcher = PredictionDispatcher::new(
//!         Arc::new(MemoryStore::new()),
//!         Arc::new(MemoryEventPublisher::default()),
//!         &Config::default(),
//!     );
//!     let _ = dispatcher;
//!     Ok(())
//! }
//! ```

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Dispatch engine
pub mod algorithm;
pub mod dispatch;
pub mod validation;

// Collaborator contracts and reference implementations
pub mod event;
pub mod interfaces;
pub mod storage;

// Re-export commonly used types
pub use config::{Config, PublishConfig, ServingConfig};
pub use dispatch::PredictionDispatcher;
pub use error::{Error, Result, WithErrorContext};
pub use types::{
    Algorithm, Example, FeatureClass, FeatureValue, Features, Label, Labels, Prediction,
    ProblemType, Project, ProjectConfig, SecurityDescriptor,
};

pub use algorithm::{
    AlgorithmPolicy, Backend, FeatureTransformer, LabelTransformer, RandomSource, ThreadRngSource,
};
pub use interfaces::{EventPublisher, PredictionStore};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize the library
pub fn init() -> Result<()> {
    env_logger::try_init()
        .map_err(|e| Error::config(format!("Failed to initialize logger: {}", e)))?;
    log::info!("Predserve {} initialized", VERSION);
    Ok(())
}
