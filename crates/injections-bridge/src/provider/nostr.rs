//! `window.nostr` (NIP-07). No gating: every call goes to the host.

use std::sync::Arc;

use injections_core::error::Result;
use injections_core::protocol::payload::{SignedNostrEvent, UnsignedNostrEvent};
use injections_core::protocol::types::{NostrGetPublicKey, NostrSignEvent};

use super::Requester;
use crate::transport::PageTransport;

pub struct NostrProvider {
    requester: Requester,
}

impl NostrProvider {
    pub fn new(transport: Arc<PageTransport>) -> Self {
        Self {
            requester: Requester::new(transport),
        }
    }

    /// Hex-encoded public key.
    pub async fn get_public_key(&self) -> Result<String> {
        self.requester.request::<NostrGetPublicKey>(()).await
    }

    pub async fn sign_event(&self, event: UnsignedNostrEvent) -> Result<SignedNostrEvent> {
        self.requester.request::<NostrSignEvent>(event).await
    }
}
