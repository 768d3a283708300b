//! injections bridge: both ends of the webview messaging protocol.
//!
//! Page side: `transport` (correlated request/response over whichever channel
//! the page has) and `provider` (the WebLN, Nostr and Fedi objects installed as
//! page globals). Host side: `script` (what gets injected) and `router`
//! (dispatching page requests to host handlers and injecting the replies).
//! `loopback` wires the two together in-process for hosts and tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod loopback;
pub mod provider;
pub mod router;
pub mod script;
pub mod transport;
