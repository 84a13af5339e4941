//! Re-serialization tests
//!
//! Decoded messages must write back out with the same member semantics they
//! were received with: ids keep their string/number form, opaque payloads
//! keep their content, and `"result": null` stays distinct from no result.

use rpcsift_core::{codec, JsonRpcMessage, Params};
use serde_json::json;

fn reencode(raw: &str) -> serde_json::Value {
    let msg = codec::decode_str(raw).unwrap();
    serde_json::to_value(&msg).unwrap()
}

#[test]
fn test_null_result_keeps_member() {
    let value = reencode(r#"{"jsonrpc":"2.0","id":1,"result":null}"#);

    let object = value.as_object().unwrap();
    assert!(object.contains_key("result"));
    assert!(object["result"].is_null());
    assert!(!object.contains_key("error"));
}

#[test]
fn test_absent_result_is_omitted() {
    let value = reencode(
        r#"{"jsonrpc":"2.0","error":{"code":-32600,"message":"Invalid request"},"id":null}"#,
    );

    assert_eq!(
        value,
        json!({"jsonrpc": "2.0", "id": 0, "error": {"code": -32600, "message": "Invalid request"}})
    );
    assert!(!value.as_object().unwrap().contains_key("result"));
}

#[test]
fn test_null_error_keeps_member() {
    let value = reencode(r#"{"jsonrpc":"2.0","id":"a","result":"0x1","error":null}"#);
    assert_eq!(
        value,
        json!({"jsonrpc": "2.0", "id": "a", "result": "0x1", "error": null})
    );
}

#[test]
fn test_error_extra_members_survive() {
    let value = reencode(
        r#"{"jsonrpc":"2.0","id":3,"error":{"code":-32000,"message":"nonce too low","x-node":"geth-4","retryable":false}}"#,
    );
    assert_eq!(value["error"]["x-node"], "geth-4");
    assert_eq!(value["error"]["retryable"], false);
}

#[test]
fn test_notification_params_round_trip() {
    let raw = r#"{"jsonrpc":"2.0","method":"parity_subscription","params":{"result":"0x3342d6","subscription":"0x0c2f1dc472de1be0"}}"#;
    let original: serde_json::Value = serde_json::from_str(raw).unwrap();

    assert_eq!(reencode(raw), original);
}

#[test]
fn test_notification_params_text_is_verbatim() {
    let raw = r#"{"jsonrpc":"2.0","method":"m","params":[1.10, "x"]}"#;
    let encoded = serde_json::to_string(&codec::decode_str(raw).unwrap()).unwrap();
    assert_eq!(encoded, r#"{"jsonrpc":"2.0","method":"m","params":[1.10, "x"]}"#);
}

#[test]
fn test_request_round_trip() {
    let raw = r#"{"jsonrpc":"2.0","id":"abc","method":"eth_call","params":[{"to":"0x1","data":"0x"},"latest"]}"#;
    let original: serde_json::Value = serde_json::from_str(raw).unwrap();

    assert_eq!(reencode(raw), original);
}

#[test]
fn test_request_without_params_omits_member() {
    let value = reencode(r#"{"jsonrpc":"2.0","id":5,"method":"net_version"}"#);
    assert_eq!(value, json!({"jsonrpc": "2.0", "id": 5, "method": "net_version"}));
}

#[test]
fn test_built_params_decode_back() {
    let params = Params::positional(["0x407d73d8a49eeb85d32cf465507dd71d507100c1", "latest"]).unwrap();
    let outbound = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "eth_getBalance",
        "params": params.clone(),
    });

    match codec::decode_str(&outbound.to_string()).unwrap() {
        JsonRpcMessage::Request(req) => assert_eq!(req.params, Some(params)),
        other => panic!("Expected request, got {}", other.kind()),
    }
}
