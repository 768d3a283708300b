//! Wire envelopes (JSON).
//!
//! Every envelope carries the correlation `id` and `type` of the request it
//! belongs to. Payloads stay as `serde_json::Value` at this layer; the typed
//! view is applied by whoever knows the `InjectionMessage` in play.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, UNKNOWN_ERROR_MESSAGE};
use crate::protocol::types::{InjectionMessage, MessageType};

/// Page -> host request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    pub id: u64,
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    #[serde(default)]
    pub data: Value,
}

impl RequestEnvelope {
    /// Build a request for `M`, serializing the typed payload.
    pub fn new<M: InjectionMessage>(id: u64, data: &M::Request) -> Result<Self> {
        Ok(Self {
            id,
            msg_type: M::TYPE,
            data: serde_json::to_value(data)?,
        })
    }
}

/// Host -> page success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    pub id: u64,
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    /// Absent on the wire when the handler returned nothing.
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Host -> page failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub id: u64,
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    /// Empty messages fall back to a generic description.
    pub fn new(id: u64, msg_type: MessageType, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        };
        Self {
            id,
            msg_type,
            error: ErrorBody { message },
        }
    }
}

/// Anything the page may receive on the `fedi:message` event.
///
/// Any non-null `error` makes it a failure, whatever its shape, so a
/// malformed error reply can never settle a call as a success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "LooseInbound")]
pub enum InboundEnvelope {
    Error(ErrorEnvelope),
    Response(ResponseEnvelope),
}

#[derive(Deserialize)]
struct LooseInbound {
    id: u64,
    #[serde(rename = "type")]
    msg_type: MessageType,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    error: Option<Value>,
}

impl From<LooseInbound> for InboundEnvelope {
    fn from(raw: LooseInbound) -> Self {
        let LooseInbound {
            id,
            msg_type,
            data,
            error,
        } = raw;
        match error {
            Some(err) => {
                let message = err
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or(UNKNOWN_ERROR_MESSAGE);
                InboundEnvelope::Error(ErrorEnvelope::new(id, msg_type, message))
            }
            None => InboundEnvelope::Response(ResponseEnvelope { id, msg_type, data }),
        }
    }
}

impl InboundEnvelope {
    pub fn id(&self) -> u64 {
        match self {
            InboundEnvelope::Error(e) => e.id,
            InboundEnvelope::Response(r) => r.id,
        }
    }

    pub fn msg_type(&self) -> MessageType {
        match self {
            InboundEnvelope::Error(e) => e.msg_type,
            InboundEnvelope::Response(r) => r.msg_type,
        }
    }
}

/// Loosely-typed request as first seen by the host.
///
/// `msg_type` stays a string so traffic from unrelated scripts on the same
/// channel can be told apart from registry messages without a hard failure.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnvelope {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(rename = "type", default)]
    pub msg_type: Option<String>,
    #[serde(default)]
    pub data: Value,
}

impl RawEnvelope {
    /// Parse a raw channel string; `None` when it is not a JSON object.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// Registry type, if the `type` field names one.
    pub fn known_type(&self) -> Option<MessageType> {
        self.msg_type.as_deref().and_then(MessageType::parse)
    }
}
