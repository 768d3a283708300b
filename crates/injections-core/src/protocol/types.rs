//! Message type registry.
//!
//! `MessageType` is the runtime view (what the router matches incoming strings
//! against); `InjectionMessage` is the compile-time view binding each type to
//! exactly one request and one response payload.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::InjectionError;
use crate::protocol::payload::{
    ActiveFederation, AuthenticatedMember, EcashNotes, GenerateEcashArgs, GetInfoResponse,
    KeysendArgs, MakeInvoiceArgs, ReceiveEcashResponse, RequestInvoiceResponse,
    SendPaymentResponse, SignMessageResponse, SignedNostrEvent, UnsignedNostrEvent,
    VerifyMessageArgs,
};

/// Capability a script or provider belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Webln,
    /// In-page developer console. Script only, no provider object.
    Eruda,
    Nostr,
    FediInternal,
}

impl Capability {
    /// Fixed install order.
    pub const ORDERED: [Capability; 4] = [
        Capability::Webln,
        Capability::Eruda,
        Capability::Nostr,
        Capability::FediInternal,
    ];

    /// Name of the page global (or config key) for this capability.
    pub fn as_str(self) -> &'static str {
        match self {
            Capability::Webln => "webln",
            Capability::Eruda => "eruda",
            Capability::Nostr => "nostr",
            Capability::FediInternal => "fediInternal",
        }
    }
}

macro_rules! message_registry {
    ($( $(#[$doc:meta])* $variant:ident => $wire:literal, $cap:ident, $req:ty, $resp:ty; )+) => {
        /// Every message type understood by both sides of the webview boundary.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum MessageType {
            $( #[serde(rename = $wire)] $variant, )+
        }

        impl MessageType {
            /// All registered types, in declaration order.
            pub const ALL: &'static [MessageType] = &[ $( MessageType::$variant, )+ ];

            /// Wire identifier.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( MessageType::$variant => $wire, )+
                }
            }

            /// Registry lookup; `None` for anything not in the registry.
            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $( $wire => Some(MessageType::$variant), )+
                    _ => None,
                }
            }

            /// Provider that issues this message.
            pub fn capability(self) -> Capability {
                match self {
                    $( MessageType::$variant => Capability::$cap, )+
                }
            }
        }

        $(
            $(#[$doc])*
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $variant;

            impl InjectionMessage for $variant {
                const TYPE: MessageType = MessageType::$variant;
                type Request = $req;
                type Response = $resp;
            }
        )+
    };
}

/// Compile-time binding of a message type to its payload shapes.
pub trait InjectionMessage: Send + Sync + 'static {
    const TYPE: MessageType;
    type Request: Serialize + DeserializeOwned + Send + Sync + 'static;
    type Response: Serialize + DeserializeOwned + Send + Sync + 'static;
}

message_registry! {
    /// Ask the host to enable WebLN for this page.
    WeblnEnable => "webln_enable", Webln, (), ();
    WeblnGetInfo => "webln_getInfo", Webln, (), GetInfoResponse;
    /// Pay a BOLT11 payment request.
    WeblnSendPayment => "webln_sendPayment", Webln, String, SendPaymentResponse;
    WeblnKeysend => "webln_keysend", Webln, KeysendArgs, SendPaymentResponse;
    WeblnMakeInvoice => "webln_makeInvoice", Webln, MakeInvoiceArgs, RequestInvoiceResponse;
    WeblnSignMessage => "webln_signMessage", Webln, String, SignMessageResponse;
    WeblnVerifyMessage => "webln_verifyMessage", Webln, VerifyMessageArgs, ();
    NostrGetPublicKey => "nostr_getPublicKey", Nostr, (), String;
    NostrSignEvent => "nostr_signEvent", Nostr, UnsignedNostrEvent, SignedNostrEvent;
    /// Mint ecash notes out of the active federation.
    FediGenerateEcash => "fedi_generateEcash", FediInternal, GenerateEcashArgs, EcashNotes;
    FediReceiveEcash => "fedi_receiveEcash", FediInternal, String, ReceiveEcashResponse;
    FediGetAuthenticatedMember => "fedi_getAuthenticatedMember", FediInternal, (), AuthenticatedMember;
    FediGetActiveFederation => "fedi_getActiveFederation", FediInternal, (), ActiveFederation;
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = InjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageType::parse(s)
            .ok_or_else(|| InjectionError::BadRequest(format!("unknown message type: {s}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn registry_round_trips_wire_names() {
        assert_eq!(MessageType::ALL.len(), 13);
        for t in MessageType::ALL {
            assert_eq!(MessageType::parse(t.as_str()), Some(*t));
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn unknown_names_are_not_in_registry() {
        assert_eq!(MessageType::parse("webln_disable"), None);
        assert_eq!(MessageType::parse("WEBLN_ENABLE"), None);
        assert!("metamask_request".parse::<MessageType>().is_err());
    }

    #[test]
    fn capability_follows_prefix() {
        for t in MessageType::ALL {
            let prefix = t.as_str().split('_').next().unwrap();
            let expected = match prefix {
                "webln" => Capability::Webln,
                "nostr" => Capability::Nostr,
                "fedi" => Capability::FediInternal,
                other => panic!("unexpected prefix {other}"),
            };
            assert_eq!(t.capability(), expected);
        }
    }

    #[test]
    fn markers_carry_their_type() {
        assert_eq!(WeblnSendPayment::TYPE, MessageType::WeblnSendPayment);
        assert_eq!(FediGetActiveFederation::TYPE.as_str(), "fedi_getActiveFederation");
    }
}
