//! Executor for model operations on the ambient tokio runtime.

use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::models::traits::RestModel;
use crate::operation::{ModelOperation, OperationState};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Upper bound on operations decoding at the same time. Zero is treated as one.
    pub max_concurrent_operations: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_concurrent_operations: 4,
        }
    }
}

/// Runs operations concurrently, at most `max_concurrent_operations` at a
/// time. No ordering is guaranteed between operations.
///
/// This type is cheap to clone; clones share the concurrency limit.
#[derive(Clone)]
pub struct OperationQueue {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl OperationQueue {
    pub fn new(config: QueueConfig) -> Self {
        let capacity = config.max_concurrent_operations.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Operations currently holding a slot.
    pub fn running(&self) -> usize {
        self.capacity - self.permits.available_permits()
    }

    /// Schedule an operation. Must be called from within a tokio runtime.
    ///
    /// The decode runs on the blocking pool while the operation holds a
    /// slot. Cancelling the operation before it acquires a slot keeps it
    /// from decoding; the handle then resolves to `Cancelled`.
    pub fn enqueue<M: RestModel>(
        &self,
        operation: Arc<ModelOperation<M>>,
    ) -> JoinHandle<OperationState> {
        let permits = self.permits.clone();
        debug!(model = M::NAME, "operation enqueued");

        tokio::spawn(async move {
            let Ok(_permit) = permits.acquire_owned().await else {
                return operation.state();
            };
            let decoding = operation.clone();
            match tokio::task::spawn_blocking(move || decoding.execute()).await {
                Ok(state) => state,
                Err(error) => {
                    warn!(model = M::NAME, %error, "operation panicked while decoding");
                    operation.state()
                }
            }
        })
    }
}

impl Default for OperationQueue {
    fn default() -> Self {
        Self::new(QueueConfig::default())
    }
}
