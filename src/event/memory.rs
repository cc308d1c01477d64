use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;

use crate::event::PredictionEvent;
use crate::interfaces::EventPublisher;
use crate::Result;

/// In-memory event sink.
///
/// Keeps the latest events up to a fixed capacity. Suited for tests and
/// single-process deployments that only need recent publication history.
#[derive(Clone)]
pub struct MemoryEventPublisher {
    queue: Arc<Mutex<VecDeque<PredictionEvent>>>,
    capacity: usize,
}

impl MemoryEventPublisher {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    /// Snapshot of the retained events, oldest first
    pub fn events(&self) -> Vec<PredictionEvent> {
        self.queue.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}

impl Default for MemoryEventPublisher {
    fn default() -> Self {
        Self::new(1000)
    }
}

#[async_trait]
impl EventPublisher for MemoryEventPublisher {
    async fn publish(&self, event: PredictionEvent) -> Result<()> {
        let mut queue = self.queue.lock();
        while queue.len() >= self.capacity {
            queue.pop_front();
        }
        debug!(
            "publish: stream={} partition_key={} event={}",
            event.stream, event.partition_key, event.id
        );
        queue.push_back(event);
        Ok(())
    }
}
