//! rpcsift - JSON-RPC 2.0 message classification
//!
//! This is the convenience crate that re-exports the rpcsift sub-crates.
//! Use it if you want a single dependency.
//!
//! # Architecture
//!
//! - **rpcsift-core**: message types, shape-based decoder, opaque payloads,
//!   error handling, logging setup
//!
//! # Quick Start
//!
//! ```rust
//! use rpcsift::{decode, JsonRpcMessage};
//!
//! let frame = br#"{"jsonrpc":"2.0","id":1,"result":"0x26cffa"}"#;
//!
//! match decode(frame).unwrap() {
//!     JsonRpcMessage::Response(resp) => {
//!         let block: Option<String> = resp.parse_result().unwrap();
//!         assert_eq!(block.as_deref(), Some("0x26cffa"));
//!     }
//!     JsonRpcMessage::Notification(notif) => println!("event: {}", notif.method),
//!     JsonRpcMessage::Request(req) => println!("call: {}", req.method),
//! }
//! ```

pub use rpcsift_core as core;

// Convenience re-exports of the most commonly used items
// This avoids needing to write `rpcsift::core::codec::decode`
pub use rpcsift_core::{
    codec, decode, decode_batch, decode_str, Error, ErrorObject, Field, Id, JsonRpcMessage,
    JsonRpcNotification, JsonRpcRequest, JsonRpcResponse, NotificationParams, Params, Payload,
    Result,
};
