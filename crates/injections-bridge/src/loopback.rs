//! In-process page <-> host wiring.
//!
//! The page transport posts onto a queue, a pump task feeds each message to
//! the router concurrently, and the router's injected scripts are decoded back
//! into `fedi:message` events on the page transport. Useful for hosts that
//! drive mini-app logic without a real webview, and for end-to-end tests.

use std::sync::{Arc, Weak};

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use injections_core::error::{InjectionError, Result};
use injections_core::protocol::MESSAGE_EVENT_NAME;

use crate::config::{BridgeConfig, CapabilityConfig, TransportConfig};
use crate::provider::PageGlobals;
use crate::router::{MessageRouter, WebView};
use crate::script::parse_dispatched_detail;
use crate::transport::{ChannelKind, NativeBridge, PageEnvironment, PageTransport};

/// Webview stand-in that turns injected dispatch scripts into page events.
pub struct LoopbackWebView {
    page: Weak<PageTransport>,
}

impl WebView for LoopbackWebView {
    fn inject_javascript(&self, script: &str) -> Result<()> {
        let detail = parse_dispatched_detail(script).ok_or_else(|| {
            InjectionError::BadRequest("loopback only understands fedi:message dispatches".into())
        })?;
        let detail: Value = serde_json::from_str(detail)?;
        if let Some(page) = self.page.upgrade() {
            page.dispatch_event(MESSAGE_EVENT_NAME, &detail);
        }
        Ok(())
    }
}

pub struct Loopback {
    pub transport: Arc<PageTransport>,
    pub router: Arc<MessageRouter>,
    pub globals: PageGlobals,
    webview: Option<Arc<LoopbackWebView>>,
    pump: JoinHandle<()>,
}

impl Loopback {
    /// Wire a page with `caps` installed to a fresh router.
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn(caps: &CapabilityConfig, transport_cfg: &TransportConfig, kind: ChannelKind) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let native_bridge: Option<Arc<dyn NativeBridge>> = match kind {
            ChannelKind::NativeBridge => Some(Arc::new(tx.clone())),
            ChannelKind::WindowPostMessage => None,
        };
        let env = PageEnvironment {
            native_bridge,
            window: Arc::new(tx),
        };

        let transport = Arc::new(PageTransport::from_environment(&env, transport_cfg));
        let webview = Arc::new(LoopbackWebView {
            page: Arc::downgrade(&transport),
        });
        let router = Arc::new(MessageRouter::new(&webview));
        let globals = PageGlobals::install(caps, Arc::clone(&transport));

        let pump_router = Arc::clone(&router);
        let pump = tokio::spawn(async move {
            while let Some(raw) = rx.recv().await {
                let router = Arc::clone(&pump_router);
                tokio::spawn(async move {
                    if let Err(e) = router.handle_raw(&raw).await {
                        tracing::warn!(error = %e, code = e.code().as_str(), "loopback delivery failed");
                    }
                });
            }
        });

        Self {
            transport,
            router,
            globals,
            webview: Some(webview),
            pump,
        }
    }

    /// Build from a loaded config, running the router handler check first.
    /// Handlers must therefore be registered by `register` before the check.
    pub fn from_config(
        cfg: &BridgeConfig,
        kind: ChannelKind,
        register: impl FnOnce(&MessageRouter),
    ) -> Result<Self> {
        let lb = Self::spawn(&cfg.capabilities, &cfg.transport, kind);
        register(&lb.router);
        lb.router.check_handlers(&cfg.capabilities, &cfg.router)?;
        Ok(lb)
    }

    /// Drop the webview, as when the host unmounts it.
    pub fn unmount(&mut self) {
        self.webview = None;
    }
}

impl Drop for Loopback {
    fn drop(&mut self) {
        self.pump.abort();
    }
}
