use async_trait::async_trait;

use crate::event::PredictionEvent;
use crate::Result;

/// At-least-once event publication collaborator.
///
/// The dispatcher publishes fire-and-forget: a failed publish is logged and
/// never downgrades a successful prediction into a failure.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: PredictionEvent) -> Result<()>;
}
