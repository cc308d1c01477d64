//! Prediction event publication.
//!
//! Events are the analytics/audit record of completed predictions. The
//! dispatcher publishes them best-effort through the
//! [`EventPublisher`](crate::interfaces::EventPublisher) contract; the
//! implementations here are an in-memory sink and a JSON-lines file sink.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::Prediction;

pub mod file;
pub mod memory;

pub use file::FileEventPublisher;
pub use memory::MemoryEventPublisher;

/// Event type enum
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    PredictionCompleted,
    Custom(String),
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::PredictionCompleted => "prediction_completed",
            EventType::Custom(name) => name,
        };
        write!(f, "{}", name)
    }
}

/// One published prediction record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionEvent {
    /// Event unique identifier
    pub id: String,
    pub event_type: EventType,
    /// Stream the event is published to
    pub stream: String,
    /// Partitioning key; always the prediction's project id
    pub partition_key: String,
    pub prediction: Prediction,
    pub timestamp: DateTime<Utc>,
}

impl PredictionEvent {
    /// Create a completion event for a prediction
    pub fn completed(prediction: &Prediction, stream: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_type: EventType::PredictionCompleted,
            stream: stream.to_string(),
            partition_key: prediction.project_id.clone(),
            prediction: prediction.clone(),
            timestamp: Utc::now(),
        }
    }

    pub fn with_event_type(mut self, event_type: EventType) -> Self {
        self.event_type = event_type;
        self
    }
}
