use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use dashmap::DashMap;
use reqwest::Client;
use tokio::sync::watch;
use tracing::{info, info_span, warn, Instrument};
use url::Url;

use super::error::{shape_response, ApiFailure};
use super::interceptor::FailureInterceptor;
use super::invocation::{Invocation, InvocationId, InvocationState};
use super::operation::{Credentials, Operation, WireRequest};
use super::resolver::resolve_cluster;
use crate::config::GatewayConfig;
use crate::session::Session;

const LOG_TARGET: &str = "gateway::dispatch";

struct InFlight {
    operation: &'static str,
}

/// Performs operations against the resolved cluster: one transport attempt per
/// invocation, response shaping, then the failure-interceptor stage, then
/// publication of the terminal state to subscribers.
pub(crate) struct Dispatcher {
    config: GatewayConfig,
    session: Session,
    interceptor: FailureInterceptor,
    /// Cookie-carrying client for first-party endpoints.
    http: Client,
    /// Cookie-less client for operations that omit credentials.
    bare: Client,
    in_flight: DashMap<InvocationId, InFlight>,
    next_id: AtomicU64,
}

impl Dispatcher {
    pub fn new(
        config: GatewayConfig,
        session: Session,
        interceptor: FailureInterceptor,
    ) -> Result<Self> {
        config.validate()?;
        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()
            .context("failed to build credentialed HTTP client")?;
        let bare = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build credential-less HTTP client")?;

        Ok(Self {
            config,
            session,
            interceptor,
            http,
            bare,
            in_flight: DashMap::new(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn active_operations(&self) -> Vec<&'static str> {
        self.in_flight
            .iter()
            .map(|entry| entry.value().operation)
            .collect()
    }

    /// Starts one invocation and returns its handle immediately. Concurrent
    /// invocations are independent: no deduplication, no ordering guarantee.
    pub fn invoke(self: &Arc<Self>, operation: Operation) -> Invocation {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let name = operation.name();
        // The routing decision is computed fresh per invocation.
        let cluster = resolve_cluster(self.session.partition_key(), &self.config);
        let (tx, rx) = watch::channel(InvocationState::Idle);
        let handle = Invocation::new(id, name, rx);

        let wire = match operation.wire() {
            Ok(wire) => wire,
            Err(err) => {
                let failure =
                    ApiFailure::decode(format!("failed to encode request body: {err}"));
                tx.send_replace(InvocationState::Pending);
                self.finish(name, &tx, InvocationState::Failed(failure));
                return handle;
            }
        };

        let base = operation
            .base_override(&self.config)
            .unwrap_or_else(|| cluster.base_url(&self.config));
        let url = match base.join(wire.path) {
            Ok(url) => url,
            Err(err) => {
                let failure = ApiFailure::transport(format!("invalid request URL: {err}"));
                tx.send_replace(InvocationState::Pending);
                self.finish(name, &tx, InvocationState::Failed(failure));
                return handle;
            }
        };

        info!(
            target = LOG_TARGET,
            operation = name,
            id,
            class = operation.class().as_str(),
            cluster = cluster.as_str(),
            method = %wire.method,
            path = wire.path,
            "dispatching operation"
        );
        self.in_flight.insert(id, InFlight { operation: name });
        tx.send_replace(InvocationState::Pending);

        let this = Arc::clone(self);
        let span = info_span!("invocation", operation = name, id);
        tokio::spawn(
            async move {
                let started = Instant::now();
                let state = match this.perform(&wire, url).await {
                    Ok(value) => InvocationState::Success(value),
                    Err(failure) => InvocationState::Failed(failure),
                };
                let duration_ms = started.elapsed().as_millis();
                match &state {
                    InvocationState::Failed(failure) => warn!(
                        target = LOG_TARGET,
                        operation = name,
                        id,
                        duration_ms = %duration_ms,
                        error = %failure,
                        "operation failed"
                    ),
                    _ => info!(
                        target = LOG_TARGET,
                        operation = name,
                        id,
                        duration_ms = %duration_ms,
                        "operation completed"
                    ),
                }
                this.in_flight.remove(&id);
                this.finish(name, &tx, state);
            }
            .instrument(span),
        );

        handle
    }

    // Interceptor stage runs before publication so subscribers never observe a
    // terminal state whose side effects are still pending.
    fn finish(
        &self,
        operation: &'static str,
        tx: &watch::Sender<InvocationState>,
        state: InvocationState,
    ) {
        self.interceptor.observe(operation, &state);
        tx.send_replace(state);
    }

    async fn perform(
        &self,
        wire: &WireRequest,
        url: Url,
    ) -> Result<Arc<serde_json::Value>, ApiFailure> {
        let client = match wire.credentials {
            Credentials::Include => &self.http,
            Credentials::Omit => &self.bare,
        };

        let mut request = client.request(wire.method.clone(), url);
        if !wire.query.is_empty() {
            request = request.query(&wire.query);
        }
        if let Some(body) = &wire.body {
            request = request.json(body);
        }

        // Exactly one transport attempt; mutations are never auto-retried.
        let response = request.send().await.map_err(ApiFailure::transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ApiFailure::transport)?;
        shape_response(status, &body)
    }
}
