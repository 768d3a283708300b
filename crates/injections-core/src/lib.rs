//! injections core: the message registry, wire envelopes, and error surface
//! shared by page-side providers and the host-side router.
//!
//! Both sides of the webview boundary link this crate, which is what keeps the
//! type registry identical on either end. It carries no runtime or transport
//! dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Hostile page
//! content can put anything on the wire, so every fallible path surfaces as
//! `InjectionError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{InjectionError, Result};
