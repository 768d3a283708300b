//! Recording doubles shared by bridge integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use serde_json::Value;

use injections_bridge::router::WebView;
use injections_bridge::script::parse_dispatched_detail;
use injections_bridge::transport::{ChannelKind, OutboundChannel, PageTransport};
use injections_core::error::{InjectionError, Result};

/// Outbound channel that only records what the page sent.
#[derive(Default)]
pub struct RecordingChannel {
    sent: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub fn sent(&self) -> Vec<Value> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|s| serde_json::from_str(s).unwrap())
            .collect()
    }
}

impl OutboundChannel for RecordingChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::NativeBridge
    }

    fn send(&self, payload: String) -> Result<()> {
        self.sent.lock().unwrap().push(payload);
        Ok(())
    }
}

/// Outbound channel whose host end is gone.
pub struct ClosedChannel;

impl OutboundChannel for ClosedChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::WindowPostMessage
    }

    fn send(&self, _payload: String) -> Result<()> {
        Err(InjectionError::Transport("host went away".into()))
    }
}

/// Webview that records injected scripts.
#[derive(Default)]
pub struct RecordingWebView {
    scripts: Mutex<Vec<String>>,
}

impl RecordingWebView {
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }

    /// Details of every `fedi:message` dispatched so far.
    pub fn details(&self) -> Vec<Value> {
        self.scripts()
            .iter()
            .map(|s| serde_json::from_str(parse_dispatched_detail(s).expect("dispatch script")).unwrap())
            .collect()
    }
}

impl WebView for RecordingWebView {
    fn inject_javascript(&self, script: &str) -> Result<()> {
        self.scripts.lock().unwrap().push(script.to_string());
        Ok(())
    }
}

/// Wait until `n` calls are pending on the transport.
pub async fn wait_pending(transport: &PageTransport, n: usize) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while transport.pending_count() != n {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("pending count never reached");
}
