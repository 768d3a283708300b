//! Outbound channels and environment detection.

use std::sync::Arc;

use tokio::sync::mpsc;

use injections_core::error::{InjectionError, Result};

/// Host bridge object exposed to the page by a native webview
/// (`window.ReactNativeWebView` on mobile).
pub trait NativeBridge: Send + Sync {
    fn post_message(&self, data: String) -> Result<()>;
}

/// The page's own cross-frame messaging (`window.postMessage`).
pub trait WindowMessaging: Send + Sync {
    fn post_message(&self, data: String, target_origin: &str) -> Result<()>;
}

/// What the page environment offers. Probed once when a transport is built.
#[derive(Clone)]
pub struct PageEnvironment {
    pub native_bridge: Option<Arc<dyn NativeBridge>>,
    pub window: Arc<dyn WindowMessaging>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    NativeBridge,
    WindowPostMessage,
}

impl ChannelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelKind::NativeBridge => "native_bridge",
            ChannelKind::WindowPostMessage => "window_post_message",
        }
    }
}

/// Fire-and-forget delivery of a serialized request to the host.
pub trait OutboundChannel: Send + Sync {
    fn kind(&self) -> ChannelKind;
    fn send(&self, payload: String) -> Result<()>;
}

pub struct NativeBridgeChannel {
    bridge: Arc<dyn NativeBridge>,
}

impl NativeBridgeChannel {
    pub fn new(bridge: Arc<dyn NativeBridge>) -> Self {
        Self { bridge }
    }
}

impl OutboundChannel for NativeBridgeChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::NativeBridge
    }

    fn send(&self, payload: String) -> Result<()> {
        self.bridge.post_message(payload)
    }
}

pub struct WindowPostMessageChannel {
    window: Arc<dyn WindowMessaging>,
}

impl WindowPostMessageChannel {
    pub fn new(window: Arc<dyn WindowMessaging>) -> Self {
        Self { window }
    }
}

impl OutboundChannel for WindowPostMessageChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::WindowPostMessage
    }

    fn send(&self, payload: String) -> Result<()> {
        self.window.post_message(payload, "*")
    }
}

/// Native bridge if the page has one, otherwise the window itself.
pub fn detect_channel(env: &PageEnvironment) -> Arc<dyn OutboundChannel> {
    match &env.native_bridge {
        Some(bridge) => Arc::new(NativeBridgeChannel::new(Arc::clone(bridge))),
        None => Arc::new(WindowPostMessageChannel::new(Arc::clone(&env.window))),
    }
}

// In-process hosts (and tests) receive page traffic on a plain queue.
impl NativeBridge for mpsc::UnboundedSender<String> {
    fn post_message(&self, data: String) -> Result<()> {
        self.send(data)
            .map_err(|_| InjectionError::Transport("native bridge closed".into()))
    }
}

impl WindowMessaging for mpsc::UnboundedSender<String> {
    fn post_message(&self, data: String, _target_origin: &str) -> Result<()> {
        self.send(data)
            .map_err(|_| InjectionError::Transport("window message queue closed".into()))
    }
}
