//! Page-side transport.
//!
//! `channel` picks how requests leave the page (native bridge object or the
//! window's own `postMessage`); `page` correlates the responses that come back
//! on the `fedi:message` custom event.

pub mod channel;
pub mod page;

pub use channel::{
    detect_channel, ChannelKind, NativeBridge, NativeBridgeChannel, OutboundChannel,
    PageEnvironment, WindowMessaging, WindowPostMessageChannel,
};
pub use page::PageTransport;
