//! Protocol modules (type registry + payloads + envelopes).
//!
//! - `types`: the closed set of message types and the compile-time mapping
//!   from each type to its request/response payload shapes.
//! - `payload`: WebLN, Nostr (NIP-07) and Fedi payload structs.
//! - `envelope`: JSON wire envelopes carrying a correlation id.
//!
//! Parsers never panic: foreign or malformed traffic on the shared webview
//! channel is reported as `InjectionError` or simply not matched.

pub mod envelope;
pub mod payload;
pub mod types;

pub use envelope::{ErrorBody, ErrorEnvelope, InboundEnvelope, RawEnvelope, RequestEnvelope, ResponseEnvelope};
pub use types::{Capability, InjectionMessage, MessageType};

/// Name of the DOM custom event the host dispatches responses on.
pub const MESSAGE_EVENT_NAME: &str = "fedi:message";
