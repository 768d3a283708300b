//! Provider façades installed as page globals.
//!
//! Each façade maps one method to one round trip through `PageTransport`,
//! stamping requests from its own counter. Ids are unique per façade instance
//! only; correlation also keys on the message type.

mod fedi;
mod nostr;
mod webln;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use injections_core::error::Result;
use injections_core::protocol::InjectionMessage;

use crate::config::CapabilityConfig;
use crate::transport::PageTransport;

pub use fedi::FediInternalProvider;
pub use nostr::NostrProvider;
pub use webln::WeblnProvider;

/// Transport handle plus the instance-scoped message counter.
struct Requester {
    transport: Arc<PageTransport>,
    last_message_id: AtomicU64,
}

impl Requester {
    fn new(transport: Arc<PageTransport>) -> Self {
        Self {
            transport,
            last_message_id: AtomicU64::new(0),
        }
    }

    async fn request<M: InjectionMessage>(&self, data: M::Request) -> Result<M::Response> {
        let id = self.last_message_id.fetch_add(1, Ordering::Relaxed);
        self.transport.send_request::<M>(id, data).await
    }
}

/// The provider objects a page ends up with (`window.webln`, `window.nostr`,
/// `window.fediInternal`). Eruda is script-only and has no object here.
pub struct PageGlobals {
    pub webln: Option<Arc<WeblnProvider>>,
    pub nostr: Option<Arc<NostrProvider>>,
    pub fedi_internal: Option<Arc<FediInternalProvider>>,
}

impl PageGlobals {
    /// Install exactly the providers whose capability flag is set.
    pub fn install(caps: &CapabilityConfig, transport: Arc<PageTransport>) -> Self {
        let globals = Self {
            webln: caps
                .webln
                .then(|| Arc::new(WeblnProvider::new(Arc::clone(&transport)))),
            nostr: caps
                .nostr
                .then(|| Arc::new(NostrProvider::new(Arc::clone(&transport)))),
            fedi_internal: caps
                .fedi_internal
                .then(|| Arc::new(FediInternalProvider::new(Arc::clone(&transport)))),
        };
        tracing::debug!(
            webln = globals.webln.is_some(),
            nostr = globals.nostr.is_some(),
            fedi_internal = globals.fedi_internal.is_some(),
            "page globals installed"
        );
        globals
    }
}
