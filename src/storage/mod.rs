//! Reference persistence collaborator.
//!
//! `models` carries the row types and the fan-out join that merges algorithm
//! rows into project values; `memory` is the in-memory implementation of the
//! [`PredictionStore`](crate::interfaces::PredictionStore) contract.

pub mod memory;
pub mod models;

pub use memory::MemoryStore;
pub use models::{join_rows, ProjectRow};
