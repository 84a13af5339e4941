//! Decoded JSON-RPC 2.0 message types
//!
//! JSON-RPC 2.0 messages come in three shapes:
//!
//! 1. **Request**: has `method` and `id`, expects a response
//! 2. **Notification**: has `method` but no `id`, expects nothing back
//! 3. **Response**: has no `method`; carries `result` and/or `error` for an `id`
//!
//! These types are produced by [`codec::decode`](crate::codec::decode) and are
//! plain immutable values afterwards. They implement `Serialize` so they can
//! be written back out; they do not implement `Deserialize`, because telling
//! the shapes apart is the decoder's job.
//!
//! # Request IDs
//!
//! An id is a string or a number. A null or missing id decodes to the zero
//! number, which is how JSON-RPC peers answer a request they could not even
//! parse. Zero and "no id" are therefore indistinguishable after decoding.

use crate::error::{Error, ErrorObject, Result};
use crate::payload::{Field, NotificationParams, Params, Payload};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// JSON-RPC 2.0 request ID
///
/// Serializes as the bare string or number. `Id::default()` is the zero
/// number, the value a null or absent id decodes to.
///
/// # Examples
///
/// ```rust
/// use rpcsift_core::Id;
///
/// let id: Id = "27a5fbbcaa23c1dcca4deb04f1501efb".into();
/// assert!(id.is_string());
///
/// let id: Id = 42i64.into();
/// assert!(!id.is_string());
/// assert_eq!(id.to_string(), "42");
///
/// assert_eq!(Id::default(), Id::Number(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier
    String(String),
    /// Integer identifier
    Number(i64),
}

impl Id {
    pub fn is_string(&self) -> bool {
        matches!(self, Id::String(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Id::String(s) => Some(s),
            Id::Number(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Id::String(_) => None,
            Id::Number(n) => Some(*n),
        }
    }

    /// True for the zero number, which is also what null and absent ids decode to
    pub fn is_zero(&self) -> bool {
        matches!(self, Id::Number(0))
    }
}

impl Default for Id {
    fn default() -> Self {
        Id::Number(0)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

/// JSON-RPC 2.0 request message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    /// Protocol version as received (normally "2.0")
    pub jsonrpc: String,
    pub id: Id,
    pub method: String,
    /// `None` when `params` was absent or null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Params>,
}

/// JSON-RPC 2.0 notification message
///
/// The params are kept as raw JSON text. Subscription notifications such as
/// `eth_subscription` carry a payload whose shape depends on what was
/// subscribed to, so parsing is left to whoever owns the subscription.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<NotificationParams>,
}

/// JSON-RPC 2.0 response message
///
/// `result` and `error` are tri-state, see [`Field`]. A well-formed response
/// has exactly one of them, but the decoder only records what was there and
/// does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Id,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub result: Field<Payload>,
    #[serde(skip_serializing_if = "Field::is_absent")]
    pub error: Field<ErrorObject>,
}

impl JsonRpcResponse {
    /// True when a `result` member was present, including `"result": null`
    pub fn is_success(&self) -> bool {
        self.result.is_present()
    }

    /// True when a non-null `error` object was present
    pub fn is_error(&self) -> bool {
        self.error.value().is_some()
    }

    /// The error object, if one was sent
    pub fn error_object(&self) -> Option<&ErrorObject> {
        self.error.value()
    }

    /// Decode `result` into a caller type
    ///
    /// Returns `Ok(None)` when `result` was absent. A present `null` is
    /// decoded as `T`, so use `Option<_>` for methods that may return null.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpcsift_core::{codec, JsonRpcMessage};
    ///
    /// let msg = codec::decode(br#"{"jsonrpc":"2.0","id":1,"result":null}"#).unwrap();
    /// let JsonRpcMessage::Response(resp) = msg else { panic!("expected a response") };
    ///
    /// let receipt: Option<Option<String>> = resp.parse_result().unwrap();
    /// assert_eq!(receipt, Some(None));
    /// ```
    pub fn parse_result<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        match &self.result {
            Field::Absent => Ok(None),
            Field::Null => serde_json::from_str("null")
                .map(Some)
                .map_err(|e| Error::Serialization(e.to_string())),
            Field::Value(payload) => payload.parse().map(Some),
        }
    }
}

/// Any decoded JSON-RPC 2.0 message
///
/// Serializes untagged, as the inner message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
    Response(JsonRpcResponse),
}

impl JsonRpcMessage {
    pub fn is_request(&self) -> bool {
        matches!(self, JsonRpcMessage::Request(_))
    }

    pub fn is_notification(&self) -> bool {
        matches!(self, JsonRpcMessage::Notification(_))
    }

    pub fn is_response(&self) -> bool {
        matches!(self, JsonRpcMessage::Response(_))
    }

    /// Short name of the variant, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            JsonRpcMessage::Request(_) => "request",
            JsonRpcMessage::Notification(_) => "notification",
            JsonRpcMessage::Response(_) => "response",
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            JsonRpcMessage::Request(req) => Some(&req.method),
            JsonRpcMessage::Notification(notif) => Some(&notif.method),
            JsonRpcMessage::Response(_) => None,
        }
    }

    /// The correlation id; notifications have none
    pub fn id(&self) -> Option<&Id> {
        match self {
            JsonRpcMessage::Request(req) => Some(&req.id),
            JsonRpcMessage::Notification(_) => None,
            JsonRpcMessage::Response(resp) => Some(&resp.id),
        }
    }
}

impl From<JsonRpcRequest> for JsonRpcMessage {
    fn from(req: JsonRpcRequest) -> Self {
        JsonRpcMessage::Request(req)
    }
}

impl From<JsonRpcNotification> for JsonRpcMessage {
    fn from(notif: JsonRpcNotification) -> Self {
        JsonRpcMessage::Notification(notif)
    }
}

impl From<JsonRpcResponse> for JsonRpcMessage {
    fn from(resp: JsonRpcResponse) -> Self {
        JsonRpcMessage::Response(resp)
    }
}
