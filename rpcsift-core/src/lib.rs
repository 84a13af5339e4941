//! Shape-based JSON-RPC 2.0 message decoder
//!
//! Given a raw JSON blob off the wire, this crate works out whether it is a
//! request, a notification or a response, and decodes it into the matching
//! type. It includes:
//!
//! - **Types**: decoded message structures and the request [`Id`]
//! - **Codec**: the classifier/decoder entry points ([`codec::decode`])
//! - **Payload**: opaque, losslessly captured `params`/`result` text and the
//!   present/null/absent [`Field`] wrapper
//! - **Error handling**: decoder errors and the open response [`ErrorObject`]
//! - **Logging**: `tracing-subscriber` setup for applications without their own
//!
//! # Architecture
//!
//! The crate is transport-agnostic and stateless. Reading frames off a socket,
//! matching responses to pending requests and routing notifications to
//! subscribers all belong to the caller. Every decode call is a pure function
//! of its input, so it can be used from any number of threads at once.
//!
//! # Example
//!
//! ```rust
//! use rpcsift_core::{codec, JsonRpcMessage};
//!
//! let raw = br#"{"jsonrpc":"2.0","method":"parity_subscription","params":{"result":"0x3342d6","subscription":"0x0c2f1dc472de1be0"}}"#;
//!
//! match codec::decode(raw).unwrap() {
//!     JsonRpcMessage::Notification(notif) => {
//!         assert_eq!(notif.method, "parity_subscription");
//!         let params = notif.params.unwrap().to_value().unwrap();
//!         assert_eq!(params["subscription"], "0x0c2f1dc472de1be0");
//!     }
//!     other => panic!("unexpected {}", other.kind()),
//! }
//! ```

pub mod codec;
pub mod error;
pub mod logging;
pub mod payload;
pub mod types;

// Re-export the most commonly used types for convenience
pub use codec::{decode, decode_batch, decode_str};
pub use error::{Error, ErrorObject, Result, StandardCode};
pub use logging::{init_logging, LoggingConfig};
pub use payload::{Field, JsonKind, NotificationParams, Params, Payload};
pub use types::{Id, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};
