//! Correlated request/response over the page channel.
//!
//! Each call registers one pending listener keyed by `(id, type)`, sends the
//! request, and waits. The first matching envelope on `fedi:message` removes
//! the listener and settles the call; everything else on the event is ignored.

use std::sync::Arc;
use std::time::Duration;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde_json::Value;
use tokio::sync::oneshot;

use injections_core::error::{InjectionError, Result};
use injections_core::protocol::{
    InboundEnvelope, InjectionMessage, MessageType, RequestEnvelope, MESSAGE_EVENT_NAME,
};

use crate::config::TransportConfig;
use crate::transport::channel::{detect_channel, ChannelKind, OutboundChannel, PageEnvironment};

type PendingKey = (u64, MessageType);

pub struct PageTransport {
    channel: Arc<dyn OutboundChannel>,
    pending: DashMap<PendingKey, oneshot::Sender<InboundEnvelope>>,
    request_timeout: Option<Duration>,
}

impl PageTransport {
    pub fn new(channel: Arc<dyn OutboundChannel>, cfg: &TransportConfig) -> Self {
        Self {
            channel,
            pending: DashMap::new(),
            request_timeout: cfg.request_timeout(),
        }
    }

    /// Probe the environment once and bind to the channel it offers.
    pub fn from_environment(env: &PageEnvironment, cfg: &TransportConfig) -> Self {
        let channel = detect_channel(env);
        tracing::debug!(channel = channel.kind().as_str(), "page transport bound");
        Self::new(channel, cfg)
    }

    pub fn channel_kind(&self) -> ChannelKind {
        self.channel.kind()
    }

    /// Calls still waiting for a response.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Send one request and wait for its correlated response.
    pub async fn send_request<M: InjectionMessage>(
        &self,
        id: u64,
        data: M::Request,
    ) -> Result<M::Response> {
        let env = RequestEnvelope::new::<M>(id, &data)?;
        let payload = serde_json::to_string(&env)?;

        let key = (id, M::TYPE);
        let rx = self.register(key)?;
        // Unregisters on every early exit, including a dropped caller future.
        let mut guard = PendingGuard {
            pending: &self.pending,
            key,
            armed: true,
        };

        self.channel.send(payload)?;

        let settled = match self.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, rx).await {
                Ok(r) => r,
                Err(_) => {
                    tracing::warn!(id, msg_type = %M::TYPE, ?limit, "request timed out");
                    return Err(InjectionError::Timeout {
                        id,
                        msg_type: M::TYPE.as_str(),
                    });
                }
            },
            None => rx.await,
        };
        guard.armed = false;

        let inbound = settled
            .map_err(|_| InjectionError::Internal("pending listener dropped".into()))?;

        match inbound {
            InboundEnvelope::Response(r) => serde_json::from_value(r.data).map_err(|e| {
                InjectionError::BadRequest(format!("invalid {} response: {e}", M::TYPE))
            }),
            InboundEnvelope::Error(e) => Err(InjectionError::Remote(e.error.message)),
        }
    }

    /// Inbound custom-event entrypoint. Returns whether a pending call settled.
    pub fn dispatch_event(&self, name: &str, detail: &Value) -> bool {
        if name != MESSAGE_EVENT_NAME {
            return false;
        }

        // Some hosts hand the detail over pre-stringified.
        let parsed = match detail {
            Value::String(s) => serde_json::from_str::<InboundEnvelope>(s),
            other => serde_json::from_value::<InboundEnvelope>(other.clone()),
        };

        match parsed {
            Ok(env) => self.deliver(env),
            Err(e) => {
                tracing::debug!(error = %e, "ignoring malformed fedi:message detail");
                false
            }
        }
    }

    /// Settle the call waiting on this envelope's `(id, type)`, if any.
    pub fn deliver(&self, env: InboundEnvelope) -> bool {
        let key = (env.id(), env.msg_type());
        let Some((_, tx)) = self.pending.remove(&key) else {
            tracing::debug!(id = key.0, msg_type = %key.1, "no pending call for response");
            return false;
        };
        tx.send(env).is_ok()
    }

    fn register(&self, key: PendingKey) -> Result<oneshot::Receiver<InboundEnvelope>> {
        match self.pending.entry(key) {
            Entry::Occupied(_) => Err(InjectionError::DuplicateRequest {
                id: key.0,
                msg_type: key.1.as_str(),
            }),
            Entry::Vacant(slot) => {
                let (tx, rx) = oneshot::channel();
                slot.insert(tx);
                Ok(rx)
            }
        }
    }
}

struct PendingGuard<'a> {
    pending: &'a DashMap<PendingKey, oneshot::Sender<InboundEnvelope>>,
    key: PendingKey,
    armed: bool,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.pending.remove(&self.key);
        }
    }
}
