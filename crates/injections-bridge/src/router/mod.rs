//! Host message router.
//!
//! Takes raw strings from the webview's outbound channel, dispatches registry
//! messages to the handler for their type, and injects exactly one response or
//! error envelope back into the page per dispatched message. Anything that is
//! not a registry message is ignored: the channel is shared with other scripts.

mod handler;

use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use futures_util::future::{ready, Ready};
use serde::Deserialize;

use injections_core::error::{InjectionError, Result};
use injections_core::protocol::{
    ErrorEnvelope, InjectionMessage, MessageType, RawEnvelope, ResponseEnvelope,
};

use crate::config::{CapabilityConfig, RouterConfig};
use crate::script::dispatch_event_js;

pub use handler::{MessageHandler, TypedHandler};

/// The webview host component, as far as the router needs it.
pub trait WebView: Send + Sync {
    fn inject_javascript(&self, script: &str) -> Result<()>;
}

/// `onMessage` event shape of the native webview (`{ nativeEvent: { data } }`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebViewMessageEvent {
    pub native_event: NativeEvent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NativeEvent {
    pub data: String,
}

impl WebViewMessageEvent {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            native_event: NativeEvent { data: data.into() },
        }
    }
}

/// Lock-free router counters.
#[derive(Debug, Default)]
pub struct RouterStats {
    dispatched: AtomicU64,
    ignored: AtomicU64,
    failed: AtomicU64,
}

impl RouterStats {
    /// Registry messages that reached dispatch.
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }
    /// Foreign or malformed traffic.
    pub fn ignored(&self) -> u64 {
        self.ignored.load(Ordering::Relaxed)
    }
    /// Dispatches answered with an error envelope.
    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }
}

pub struct MessageRouter {
    webview: Weak<dyn WebView>,
    handlers: DashMap<MessageType, Arc<dyn MessageHandler>>,
    stats: RouterStats,
}

impl MessageRouter {
    /// The router only holds the webview weakly; once the host drops it,
    /// responses can no longer be delivered.
    pub fn new<W: WebView + 'static>(webview: &Arc<W>) -> Self {
        let webview: Weak<W> = Arc::downgrade(webview);
        let webview: Weak<dyn WebView> = webview;
        Self {
            webview,
            handlers: DashMap::new(),
            stats: RouterStats::default(),
        }
    }

    pub fn register(&self, msg_type: MessageType, handler: Arc<dyn MessageHandler>) {
        if self.handlers.insert(msg_type, handler).is_some() {
            tracing::debug!(%msg_type, "handler replaced");
        }
    }

    /// Register an async handler for `M`.
    pub fn on<M, F, Fut, E>(&self, f: F) -> &Self
    where
        M: InjectionMessage,
        F: Fn(M::Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<M::Response, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        self.register(M::TYPE, Arc::new(TypedHandler::<M, F>::new(f)));
        self
    }

    /// Register a handler that answers without awaiting anything.
    pub fn on_sync<M, F, E>(&self, f: F) -> &Self
    where
        M: InjectionMessage,
        F: Fn(M::Request) -> std::result::Result<M::Response, E> + Send + Sync + 'static,
        E: Display + Send + 'static,
    {
        self.on::<M, _, Ready<std::result::Result<M::Response, E>>, E>(move |req| ready(f(req)))
    }

    pub fn registered(&self) -> Vec<MessageType> {
        self.handlers.iter().map(|e| *e.key()).collect()
    }

    /// Types of enabled capabilities that have no handler.
    pub fn missing_handlers(&self, caps: &CapabilityConfig) -> Vec<MessageType> {
        MessageType::ALL
            .iter()
            .copied()
            .filter(|t| caps.is_enabled(t.capability()))
            .filter(|t| !self.handlers.contains_key(t))
            .collect()
    }

    /// Capability <-> handler sanity check. Warns, or fails when configured to.
    pub fn check_handlers(&self, caps: &CapabilityConfig, cfg: &RouterConfig) -> Result<()> {
        let missing = self.missing_handlers(caps);
        for t in &missing {
            tracing::warn!(msg_type = %t, "enabled capability has no handler");
        }
        if cfg.require_all_handlers && !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|t| t.as_str()).collect();
            return Err(InjectionError::Config(format!(
                "missing handlers: {}",
                names.join(", ")
            )));
        }
        Ok(())
    }

    pub fn stats(&self) -> &RouterStats {
        &self.stats
    }

    /// Webview `onMessage` entrypoint.
    pub async fn on_message(&self, event: &WebViewMessageEvent) -> Result<()> {
        self.handle_raw(&event.native_event.data).await
    }

    /// Dispatch one raw channel string.
    ///
    /// Foreign traffic is `Ok(())`. The only error is a webview that is gone
    /// by the time the answer is ready.
    pub async fn handle_raw(&self, raw: &str) -> Result<()> {
        let Some(env) = RawEnvelope::parse(raw) else {
            self.stats.ignored.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("ignoring non-json webview message");
            return Ok(());
        };
        let Some(msg_type) = env.known_type() else {
            self.stats.ignored.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(msg_type = ?env.msg_type, "ignoring unregistered message type");
            return Ok(());
        };
        let Some(id) = env.id else {
            self.stats.ignored.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(%msg_type, "ignoring registry message without id");
            return Ok(());
        };

        self.stats.dispatched.fetch_add(1, Ordering::Relaxed);

        let handler = self.handlers.get(&msg_type).map(|h| Arc::clone(h.value()));
        let outcome = match handler {
            Some(h) => h.handle(env.data).await,
            None => Err(format!("no handler registered for {msg_type}")),
        };

        let detail = match outcome {
            Ok(data) => serde_json::to_string(&ResponseEnvelope { id, msg_type, data })?,
            Err(message) => {
                self.stats.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(id, %msg_type, error = %message, "handler failed");
                serde_json::to_string(&ErrorEnvelope::new(id, msg_type, message))?
            }
        };

        let webview = self
            .webview
            .upgrade()
            .ok_or(InjectionError::WebViewUnavailable)?;
        webview.inject_javascript(&dispatch_event_js(&detail))
    }
}
