//! injections: typed request/response messaging between an embedded webview
//! and its host.
//!
//! Re-exports the protocol crate and the bridge (page transport, providers,
//! script composer, host router).

pub use injections_bridge::{config, loopback, provider, router, script, transport};
pub use injections_core::{error, protocol, InjectionError, Result};
