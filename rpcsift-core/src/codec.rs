//! Shape-based decoding of JSON-RPC messages
//!
//! A transport reading from a socket does not know in advance whether the next
//! frame is a response to one of its requests, a server-initiated
//! notification, or (on a bidirectional link) a request. This module looks at
//! which members the top-level object carries and decodes into the matching
//! type:
//!
//! | members present        | message        |
//! |------------------------|----------------|
//! | `method` and `id`      | Request        |
//! | `method`, no `id`      | Notification   |
//! | no `method`            | Response       |
//!
//! # Why Not `#[serde(untagged)]`?
//!
//! An untagged enum tries each variant in turn and reports a useless error
//! when none matches. It also cannot keep `"result": null` apart from a
//! missing `result`, and it parses opaque payloads into `serde_json::Value`
//! first. Here the object is split into member name to raw JSON text, the
//! shape is picked from the member names, and each member is then checked by
//! kind, so errors name the offending member and payloads stay untouched.
//!
//! # Examples
//!
//! ```rust
//! use rpcsift_core::{codec, Id, JsonRpcMessage};
//!
//! let raw = br#"{"method":"eth_blockNumber","id":"27a5fbbcaa23c1dcca4deb04f1501efb","jsonrpc":"2.0"}"#;
//!
//! match codec::decode(raw).unwrap() {
//!     JsonRpcMessage::Request(req) => {
//!         assert_eq!(req.method, "eth_blockNumber");
//!         assert_eq!(req.id, Id::from("27a5fbbcaa23c1dcca4deb04f1501efb"));
//!         assert!(req.params.is_none());
//!     }
//!     other => panic!("expected a request, got {}", other.kind()),
//! }
//! ```

use crate::error::{Error, ErrorObject, Result};
use crate::payload::{integral, Field, JsonKind, Payload};
use crate::types::{Id, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};
use serde_json::error::Category;
use serde_json::value::RawValue;
use std::collections::HashMap;

/// Top-level members, each still in raw form. Later duplicates replace earlier ones.
type Members = HashMap<String, Box<RawValue>>;

/// Decode one JSON-RPC message of unknown shape
///
/// # Errors
///
/// - [`Error::Syntax`] if `data` is not valid JSON
/// - [`Error::UnrecognizedShape`] if it is not an object, lacks `jsonrpc`, or
///   has none of `method`, `id`, `result`, `error`
/// - [`Error::TypeMismatch`] if a member has the wrong JSON kind
/// - [`Error::UnsupportedIdKind`] if `id` is an array, object or boolean
pub fn decode(data: &[u8]) -> Result<JsonRpcMessage> {
    let result = serde_json::from_slice::<Members>(data)
        .map_err(parse_error)
        .and_then(classify);

    match &result {
        Ok(msg) => tracing::trace!(kind = msg.kind(), method = ?msg.method(), "Decoded message"),
        Err(e) => tracing::debug!(error = %e, len = data.len(), "Failed to decode message"),
    }

    result
}

/// Decode a message held in a string
pub fn decode_str(data: &str) -> Result<JsonRpcMessage> {
    decode(data.as_bytes())
}

/// Decode a JSON-RPC batch
///
/// The outer array must be valid and non-empty; each element is then decoded
/// on its own, so a malformed element yields an `Err` in its slot without
/// affecting its neighbours.
///
/// # Examples
///
/// ```rust
/// use rpcsift_core::codec;
///
/// let batch = br#"[
///     {"jsonrpc":"2.0","id":1,"result":"0x10"},
///     {"jsonrpc":"2.0","id":true,"result":"0x11"}
/// ]"#;
///
/// let items = codec::decode_batch(batch).unwrap();
/// assert!(items[0].is_ok());
/// assert!(items[1].is_err());
/// ```
pub fn decode_batch(data: &[u8]) -> Result<Vec<Result<JsonRpcMessage>>> {
    let items: Vec<Box<RawValue>> = serde_json::from_slice(data).map_err(parse_error)?;

    if items.is_empty() {
        return Err(Error::shape("batch cannot be empty"));
    }

    tracing::trace!(batch_size = items.len(), "Decoding batch");

    Ok(items
        .iter()
        .map(|item| decode(item.get().as_bytes()))
        .collect())
}

/// Map a top-level parse failure onto the error taxonomy
///
/// A data error at this point means the JSON was fine but not the container
/// we asked for (an object, or an array for batches).
fn parse_error(err: serde_json::Error) -> Error {
    match err.classify() {
        Category::Data => Error::shape(format!("unexpected top-level value: {}", err)),
        Category::Syntax | Category::Eof | Category::Io => Error::Syntax(err.to_string()),
    }
}

fn classify(mut members: Members) -> Result<JsonRpcMessage> {
    let jsonrpc = match members.remove("jsonrpc") {
        Some(raw) => decode_string("jsonrpc", &raw)?,
        None => return Err(Error::shape("missing `jsonrpc` member")),
    };

    if let Some(method) = members.remove("method") {
        let method = decode_string("method", &method)?;
        let params = decode_params(members.remove("params"))?;

        return match members.remove("id") {
            Some(id) => Ok(JsonRpcMessage::Request(JsonRpcRequest {
                jsonrpc,
                id: decode_id(Some(id))?,
                method,
                params,
            })),
            None => Ok(JsonRpcMessage::Notification(JsonRpcNotification {
                jsonrpc,
                method,
                params,
            })),
        };
    }

    let id = members.remove("id");
    let result = members.remove("result");
    let error = members.remove("error");

    if id.is_none() && result.is_none() && error.is_none() {
        return Err(Error::shape(
            "object has neither `method` nor any of `id`, `result`, `error`",
        ));
    }

    Ok(JsonRpcMessage::Response(JsonRpcResponse {
        jsonrpc,
        id: decode_id(id)?,
        result: decode_result(result),
        error: decode_error(error)?,
    }))
}

fn decode_string(field: &'static str, raw: &RawValue) -> Result<String> {
    let mismatch = || Error::TypeMismatch { field, expected: "string" };

    if JsonKind::of(raw) != JsonKind::String {
        return Err(mismatch());
    }
    serde_json::from_str(raw.get()).map_err(|_| mismatch())
}

/// Decode `id`: string, integral number, or null/absent for the zero id
fn decode_id(raw: Option<Box<RawValue>>) -> Result<Id> {
    let Some(raw) = raw else {
        return Ok(Id::default());
    };

    match JsonKind::of(&raw) {
        JsonKind::Null => Ok(Id::default()),
        JsonKind::String => decode_string("id", &raw).map(Id::String),
        JsonKind::Number => {
            let mismatch = || Error::TypeMismatch { field: "id", expected: "64-bit integer" };
            let number: serde_json::Number =
                serde_json::from_str(raw.get()).map_err(|_| mismatch())?;
            integral(&number).map(Id::Number).ok_or_else(mismatch)
        }
        kind => Err(Error::UnsupportedIdKind(kind)),
    }
}

/// `params` for requests and notifications: null counts as absent, scalars are rejected
fn decode_params(raw: Option<Box<RawValue>>) -> Result<Option<Payload>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match JsonKind::of(&raw) {
        JsonKind::Null => Ok(None),
        kind if kind.is_structured() => Ok(Some(Payload::from_raw(raw))),
        _ => Err(Error::TypeMismatch {
            field: "params",
            expected: "array or object",
        }),
    }
}

fn decode_result(raw: Option<Box<RawValue>>) -> Field<Payload> {
    match raw {
        None => Field::Absent,
        Some(raw) if JsonKind::of(&raw) == JsonKind::Null => Field::Null,
        Some(raw) => Field::Value(Payload::from_raw(raw)),
    }
}

fn decode_error(raw: Option<Box<RawValue>>) -> Result<Field<ErrorObject>> {
    let mismatch = || Error::TypeMismatch { field: "error", expected: "object" };

    let Some(raw) = raw else {
        return Ok(Field::Absent);
    };

    match JsonKind::of(&raw) {
        JsonKind::Null => Ok(Field::Null),
        JsonKind::Object => serde_json::from_str(raw.get())
            .map(Field::Value)
            .map_err(|_| mismatch()),
        _ => Err(mismatch()),
    }
}
