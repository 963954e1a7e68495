//! Decoding work packaged as independently schedulable operations.
//!
//! An operation owns one response payload and, once executed, the models
//! decoded from it. The decode itself is [`decode_models`]; the operation
//! only adds the lifecycle around it (cancellation, a result that is set
//! once, and a completion signal).

pub mod queue;

pub use queue::{OperationQueue, QueueConfig};

use std::sync::OnceLock;

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::decode::{decode_models, DecodeError, ModelList};
use crate::models::{
    agency::Agency, coverage::AgencyWithCoverage, references::References, region::Region,
    route::Route, stop::Stop, trip::Trip, traits::RestModel,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationState {
    Pending,
    Running,
    Finished,
    Failed,
    Cancelled,
}

impl OperationState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Failed | Self::Cancelled)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("operation was cancelled before it started")]
    Cancelled,

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Decodes one response into a list of `M`.
pub struct ModelOperation<M: RestModel> {
    payload: Value,
    state: watch::Sender<OperationState>,
    output: OnceLock<ModelList<M>>,
    error: OnceLock<OperationError>,
}

pub type AgenciesWithCoverageModelOperation = ModelOperation<AgencyWithCoverage>;
pub type AgencyModelOperation = ModelOperation<Agency>;
pub type RegionsModelOperation = ModelOperation<Region>;
pub type RoutesModelOperation = ModelOperation<Route>;
pub type StopsModelOperation = ModelOperation<Stop>;
pub type TripModelOperation = ModelOperation<Trip>;

impl<M: RestModel> ModelOperation<M> {
    pub fn new(payload: Value) -> Self {
        let (state, _) = watch::channel(OperationState::Pending);
        Self {
            payload,
            state,
            output: OnceLock::new(),
            error: OnceLock::new(),
        }
    }

    pub fn state(&self) -> OperationState {
        *self.state.borrow()
    }

    /// Run the decode. Only the first call on a pending operation does any
    /// work; every call returns the state the operation ends up in.
    pub fn execute(&self) -> OperationState {
        let started = self.state.send_if_modified(|state| {
            if *state == OperationState::Pending {
                *state = OperationState::Running;
                true
            } else {
                false
            }
        });
        if !started {
            return self.state();
        }

        debug!(model = M::NAME, "operation started");

        let finished = match decode_models::<M>(&self.payload) {
            Ok(list) => {
                let _ = self.output.set(list);
                OperationState::Finished
            }
            Err(error) => {
                warn!(model = M::NAME, %error, "operation failed to decode response");
                let _ = self.error.set(OperationError::Decode(error));
                OperationState::Failed
            }
        };

        self.state.send_replace(finished);
        debug!(model = M::NAME, state = ?finished, "operation completed");
        finished
    }

    /// Prevents a pending operation from running. Returns `false` if the
    /// operation had already started or completed.
    pub fn cancel(&self) -> bool {
        let cancelled = self.state.send_if_modified(|state| {
            if *state == OperationState::Pending {
                *state = OperationState::Cancelled;
                true
            } else {
                false
            }
        });
        if cancelled {
            let _ = self.error.set(OperationError::Cancelled);
            debug!(model = M::NAME, "operation cancelled");
        }
        cancelled
    }

    /// Resolves once the operation reaches a terminal state.
    pub async fn wait(&self) -> OperationState {
        let mut rx = self.state.subscribe();
        let state = match rx.wait_for(|state| state.is_terminal()).await {
            Ok(state) => *state,
            Err(_) => self.state(),
        };
        state
    }

    /// Decoded models; empty until the operation finishes successfully.
    pub fn models(&self) -> &[M] {
        self.output.get().map(|o| o.models.as_slice()).unwrap_or_default()
    }

    pub fn output(&self) -> Option<&ModelList<M>> {
        self.output.get()
    }

    pub fn references(&self) -> Option<&References> {
        self.output.get().and_then(|o| o.references.as_ref())
    }

    pub fn error(&self) -> Option<&OperationError> {
        self.error.get()
    }
}

impl ModelOperation<AgencyWithCoverage> {
    pub fn agencies_with_coverage(&self) -> &[AgencyWithCoverage] {
        self.models()
    }
}

impl ModelOperation<Region> {
    pub fn regions(&self) -> &[Region] {
        self.models()
    }
}
