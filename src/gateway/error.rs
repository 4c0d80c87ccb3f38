use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic message used when the server payload carries no message of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "an error happened";

/// Minimal error signal extracted from a failure payload. Servers report the
/// status either as a number or as a short string code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusSignal {
    Code(u16),
    Text(String),
}

impl StatusSignal {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number
                .as_u64()
                .and_then(|code| u16::try_from(code).ok())
                .map(Self::Code),
            Value::String(text) => Some(Self::Text(text.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for StatusSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Terminal failure of an operation invocation.
///
/// `Api` is the only variant carrying a server payload; it alone triggers the
/// failure interceptor's toast. `Transport` covers network errors, timeouts
/// and non-2xx responses without a parseable body. `Decode` covers 2xx bodies
/// that fail typed deserialization.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiFailure {
    #[error("transport failure: {message}")]
    Transport { message: String },
    #[error("decode failure: {message}")]
    Decode { message: String },
    #[error("server rejected request: {status} - {message}")]
    Api { status: StatusSignal, message: String },
}

impl ApiFailure {
    pub fn transport(err: impl fmt::Display) -> Self {
        Self::Transport {
            message: err.to_string(),
        }
    }

    pub fn decode(err: impl fmt::Display) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }

    /// True when the failure carries a server payload.
    pub fn has_payload(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Narrows the failure to a bare status signal, the shape create-game and
    /// join-game callers receive.
    pub fn narrowed(&self) -> StatusSignal {
        match self {
            Self::Api { status, .. } => status.clone(),
            Self::Transport { .. } => StatusSignal::Text("FETCH_ERROR".to_string()),
            Self::Decode { .. } => StatusSignal::Text("PARSING_ERROR".to_string()),
        }
    }
}

/// Shapes one HTTP response into the invocation's terminal value.
///
/// 2xx with an empty body is a null success; 2xx with invalid JSON is a decode
/// failure. Non-2xx with a parseable JSON body becomes an `Api` failure with
/// the payload's status and message; non-2xx without one stays a transport
/// failure and is invisible to the interceptor.
pub(crate) fn shape_response(status: StatusCode, body: &str) -> Result<Arc<Value>, ApiFailure> {
    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(Arc::new(Value::Null));
        }
        serde_json::from_str(body)
            .map(Arc::new)
            .map_err(|err| ApiFailure::decode(format!("invalid JSON in {status} response: {err}")))
    } else {
        match serde_json::from_str::<Value>(body) {
            Ok(payload) => Err(failure_from_payload(status, &payload)),
            Err(_) => Err(ApiFailure::Transport {
                message: format!("HTTP {status} with no parseable body"),
            }),
        }
    }
}

fn failure_from_payload(status: StatusCode, payload: &Value) -> ApiFailure {
    let signal = payload
        .get("status")
        .and_then(StatusSignal::from_value)
        .unwrap_or(StatusSignal::Code(status.as_u16()));
    let message = payload
        .get("message")
        .or_else(|| payload.get("error"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_ERROR_MESSAGE)
        .to_string();
    ApiFailure::Api {
        status: signal,
        message,
    }
}
