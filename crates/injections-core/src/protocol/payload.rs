//! Typed payloads carried in envelope `data`.
//!
//! Field names follow the JavaScript APIs the page sees (camelCase for WebLN
//! and Fedi, snake_case for Nostr events as NIP-01 defines them).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// --------------------
// WebLN
// --------------------

/// WebLN amounts may be sent as numbers or numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Sats(u64),
    Text(String),
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Amount::Sats(v)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    pub alias: String,
    pub pubkey: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetInfoResponse {
    pub node: NodeInfo,
    /// WebLN methods the host implements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendPaymentResponse {
    pub preimage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysendArgs {
    pub destination: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_records: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInvoiceArgs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_amount: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_memo: Option<String>,
}

/// `makeInvoice` accepts either a bare amount or a full args object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MakeInvoiceArgs {
    Amount(Amount),
    Args(RequestInvoiceArgs),
}

impl From<u64> for MakeInvoiceArgs {
    fn from(v: u64) -> Self {
        MakeInvoiceArgs::Amount(Amount::Sats(v))
    }
}

impl From<RequestInvoiceArgs> for MakeInvoiceArgs {
    fn from(args: RequestInvoiceArgs) -> Self {
        MakeInvoiceArgs::Args(args)
    }
}

impl MakeInvoiceArgs {
    /// Normalize to the object form.
    pub fn into_args(self) -> RequestInvoiceArgs {
        match self {
            MakeInvoiceArgs::Amount(a) => RequestInvoiceArgs {
                amount: Some(a),
                ..Default::default()
            },
            MakeInvoiceArgs::Args(args) => args,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestInvoiceResponse {
    pub payment_request: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignMessageResponse {
    pub message: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyMessageArgs {
    pub signature: String,
    pub message: String,
}

// --------------------
// Nostr (NIP-07)
// --------------------

/// Event template handed to `window.nostr.signEvent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedNostrEvent {
    pub created_at: u64,
    pub kind: u32,
    #[serde(default)]
    pub tags: Vec<Vec<String>>,
    pub content: String,
    /// Some clients pre-fill the pubkey; the signer overwrites it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubkey: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedNostrEvent {
    pub id: String,
    pub pubkey: String,
    pub created_at: u64,
    pub kind: u32,
    pub tags: Vec<Vec<String>>,
    pub content: String,
    pub sig: String,
}

// --------------------
// Fedi internal
// --------------------

/// Ecash generation takes the same bounds as a WebLN invoice request.
pub type GenerateEcashArgs = RequestInvoiceArgs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcashNotes {
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveEcashResponse {
    pub msats: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedMember {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFederation {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}
