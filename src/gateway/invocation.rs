use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::error::{ApiFailure, StatusSignal};

pub type InvocationId = u64;

/// Lifecycle of one operation invocation: `Idle → Pending → {Success, Failed}`.
/// Terminal states are final; a fresh invocation starts a fresh lifecycle.
#[derive(Debug, Clone, Default)]
pub enum InvocationState {
    #[default]
    Idle,
    Pending,
    Success(Arc<Value>),
    Failed(ApiFailure),
}

impl InvocationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success(_) => "success",
            Self::Failed(_) => "error",
        }
    }
}

/// Handle to one in-flight invocation. Observation only: dropping the handle
/// stops watching but does not cancel the underlying request.
#[derive(Debug)]
pub struct Invocation {
    id: InvocationId,
    operation: &'static str,
    rx: watch::Receiver<InvocationState>,
}

impl Invocation {
    pub(crate) fn new(
        id: InvocationId,
        operation: &'static str,
        rx: watch::Receiver<InvocationState>,
    ) -> Self {
        Self { id, operation, rx }
    }

    pub fn id(&self) -> InvocationId {
        self.id
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn state(&self) -> InvocationState {
        self.rx.borrow().clone()
    }

    /// Stream of state transitions, starting from the current state.
    pub fn updates(&self) -> WatchStream<InvocationState> {
        WatchStream::new(self.rx.clone())
    }

    /// Waits for the terminal state.
    pub async fn outcome(mut self) -> Result<Arc<Value>, ApiFailure> {
        loop {
            let state = self.rx.borrow_and_update().clone();
            match state {
                InvocationState::Success(value) => return Ok(value),
                InvocationState::Failed(failure) => return Err(failure),
                InvocationState::Idle | InvocationState::Pending => {}
            }
            if self.rx.changed().await.is_err() {
                return Err(ApiFailure::Transport {
                    message: "invocation dropped before completion".to_string(),
                });
            }
        }
    }
}

/// Invocation whose success value deserializes into `T`.
#[derive(Debug)]
pub struct TypedInvocation<T> {
    raw: Invocation,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> TypedInvocation<T> {
    pub(crate) fn new(raw: Invocation) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }

    pub fn raw(&self) -> &Invocation {
        &self.raw
    }

    pub async fn outcome(self) -> Result<T, ApiFailure> {
        let value = self.raw.outcome().await?;
        serde_json::from_value((*value).clone()).map_err(ApiFailure::decode)
    }
}

/// Typed invocation whose failures are narrowed to the bare status signal.
#[derive(Debug)]
pub struct NarrowedInvocation<T> {
    inner: TypedInvocation<T>,
}

impl<T: DeserializeOwned> NarrowedInvocation<T> {
    pub(crate) fn new(raw: Invocation) -> Self {
        Self {
            inner: TypedInvocation::new(raw),
        }
    }

    pub fn raw(&self) -> &Invocation {
        self.inner.raw()
    }

    pub async fn outcome(self) -> Result<T, StatusSignal> {
        self.inner
            .outcome()
            .await
            .map_err(|failure| failure.narrowed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn handle(initial: InvocationState) -> (watch::Sender<InvocationState>, Invocation) {
        let (tx, rx) = watch::channel(initial);
        (tx, Invocation::new(1, "test-operation", rx))
    }

    #[tokio::test]
    async fn outcome_waits_through_pending_to_success() {
        let (tx, invocation) = handle(InvocationState::Idle);
        let waiter = tokio::spawn(invocation.outcome());

        tx.send_replace(InvocationState::Pending);
        tx.send_replace(InvocationState::Success(Arc::new(serde_json::json!({
            "ok": true
        }))));

        let value = waiter.await.unwrap().unwrap();
        assert_eq!(value.as_ref()["ok"], serde_json::Value::Bool(true));
    }

    #[tokio::test]
    async fn failed_terminal_state_is_final() {
        let (tx, invocation) = handle(InvocationState::Pending);
        tx.send_replace(InvocationState::Failed(ApiFailure::transport("refused")));

        assert!(invocation.state().is_terminal());
        let failure = invocation.outcome().await.unwrap_err();
        assert!(matches!(failure, ApiFailure::Transport { .. }));
    }

    #[tokio::test]
    async fn dropped_sender_surfaces_as_transport_failure() {
        let (tx, invocation) = handle(InvocationState::Pending);
        drop(tx);

        let failure = invocation.outcome().await.unwrap_err();
        assert!(matches!(failure, ApiFailure::Transport { .. }));
    }

    #[tokio::test]
    async fn typed_outcome_deserializes_the_value() {
        #[derive(Deserialize)]
        struct Payload {
            count: u32,
        }

        let (tx, invocation) = handle(InvocationState::Idle);
        tx.send_replace(InvocationState::Success(Arc::new(serde_json::json!({
            "count": 7
        }))));

        let payload: Payload = TypedInvocation::new(invocation).outcome().await.unwrap();
        assert_eq!(payload.count, 7);
    }

    #[tokio::test]
    async fn narrowed_outcome_reduces_failures_to_status() {
        let (tx, invocation) = handle(InvocationState::Idle);
        tx.send_replace(InvocationState::Failed(ApiFailure::Api {
            status: StatusSignal::Code(409),
            message: "Game name already taken".to_string(),
        }));

        let status = NarrowedInvocation::<serde_json::Value>::new(invocation)
            .outcome()
            .await
            .unwrap_err();
        assert_eq!(status, StatusSignal::Code(409));
    }
}
