use std::sync::Arc;

use tracing::{debug, warn};

use super::error::ApiFailure;
use super::invocation::InvocationState;
use crate::notify::{Notification, NotificationSink};

const LOG_TARGET: &str = "gateway::interceptor";

/// Post-processing stage the dispatch pipeline runs once per terminal
/// transition. Failures carrying a server payload emit exactly one toast and a
/// diagnostic log entry; everything else passes through silently. The caller's
/// error value is never altered here.
pub struct FailureInterceptor {
    sink: Arc<dyn NotificationSink>,
}

impl FailureInterceptor {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    pub fn observe(&self, operation: &'static str, state: &InvocationState) {
        match state {
            InvocationState::Failed(ApiFailure::Api { status, message }) => {
                warn!(
                    target = LOG_TARGET,
                    operation,
                    status = %status,
                    message = %message,
                    "operation rejected by server"
                );
                self.sink.notify(Notification {
                    status: status.clone(),
                    message: message.clone(),
                });
            }
            InvocationState::Failed(failure) => {
                debug!(
                    target = LOG_TARGET,
                    operation,
                    error = %failure,
                    "operation failed without a server payload; no toast"
                );
            }
            InvocationState::Idle | InvocationState::Pending | InvocationState::Success(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::error::StatusSignal;
    use parking_lot::Mutex;
    use serde_json::Value;

    #[derive(Default)]
    struct RecordingSink {
        notes: Mutex<Vec<Notification>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, note: Notification) {
            self.notes.lock().push(note);
        }
    }

    fn interceptor() -> (Arc<RecordingSink>, FailureInterceptor) {
        let sink = Arc::new(RecordingSink::default());
        let interceptor = FailureInterceptor::new(Arc::clone(&sink) as Arc<dyn NotificationSink>);
        (sink, interceptor)
    }

    #[test]
    fn payload_failure_emits_exactly_one_toast() {
        let (sink, interceptor) = interceptor();
        interceptor.observe(
            "create-game",
            &InvocationState::Failed(ApiFailure::Api {
                status: StatusSignal::Code(409),
                message: "Game name already taken".to_string(),
            }),
        );

        let notes = sink.notes.lock();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].status, StatusSignal::Code(409));
        assert_eq!(notes[0].message, "Game name already taken");
    }

    #[test]
    fn transport_failure_is_not_toasted() {
        let (sink, interceptor) = interceptor();
        interceptor.observe(
            "get-game-list",
            &InvocationState::Failed(ApiFailure::transport("connection reset")),
        );
        assert!(sink.notes.lock().is_empty());
    }

    #[test]
    fn success_is_not_toasted() {
        let (sink, interceptor) = interceptor();
        interceptor.observe(
            "get-game-list",
            &InvocationState::Success(Arc::new(Value::Null)),
        );
        assert!(sink.notes.lock().is_empty());
    }
}
