//! Opaque JSON payloads
//!
//! The shape of `params` and `result` is decided entirely by the method being
//! called, so the decoder does not interpret them. A [`Payload`] holds the
//! member's raw JSON text exactly as it appeared on the wire, which lets a
//! method-aware decoder further up the stack parse it once, into its own
//! types, without a lossy detour through `serde_json::Value`.
//!
//! # Examples
//!
//! ```rust
//! use rpcsift_core::Params;
//!
//! let params = Params::positional(["0x1b4", "latest"]).unwrap();
//! assert_eq!(params.get(), r#"["0x1b4","latest"]"#);
//!
//! let (block, tag): (String, String) = params.parse().unwrap();
//! assert_eq!(block, "0x1b4");
//! assert_eq!(tag, "latest");
//! ```

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use std::fmt;

/// The kind of a JSON value, read from the first byte of its text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Classify raw JSON text that is already known to be valid
    pub fn of(raw: &RawValue) -> Self {
        match raw.get().trim_start().as_bytes().first() {
            Some(b'{') => JsonKind::Object,
            Some(b'[') => JsonKind::Array,
            Some(b'"') => JsonKind::String,
            Some(b't') | Some(b'f') => JsonKind::Bool,
            Some(b'n') => JsonKind::Null,
            _ => JsonKind::Number,
        }
    }

    /// Arrays and objects, the only kinds JSON-RPC allows for `params`
    pub fn is_structured(&self) -> bool {
        matches!(self, JsonKind::Array | JsonKind::Object)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JsonKind::Null => "null",
            JsonKind::Bool => "boolean",
            JsonKind::Number => "number",
            JsonKind::String => "string",
            JsonKind::Array => "array",
            JsonKind::Object => "object",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer value of a JSON number, accepting float forms with no fractional part
pub(crate) fn integral(number: &serde_json::Number) -> Option<i64> {
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    // u64 beyond i64::MAX lands here too and is rejected by the range check
    number
        .as_f64()
        .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
        .map(|f| f as i64)
}

/// Raw, undecoded JSON text
///
/// Equality is semantic: two payloads are equal when their text is identical
/// or when they parse to the same JSON value (so whitespace and member order
/// do not matter).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Box<RawValue>);

/// Request-side parameters, positional (array) or named (object)
pub type Params = Payload;

/// Notification parameters, captured verbatim for a method-specific decoder
pub type NotificationParams = Payload;

impl Payload {
    /// Serialize any value into a `params` payload
    ///
    /// The value must serialize to a JSON array or object; JSON-RPC 2.0 does
    /// not allow scalar params.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpcsift_core::Params;
    /// use serde_json::json;
    ///
    /// let named = Params::new(&json!({"address": "0xabc", "block": "latest"})).unwrap();
    /// assert!(named.get().starts_with('{'));
    ///
    /// assert!(Params::new(&42).is_err());
    /// ```
    pub fn new<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let payload = Self::from_serializable(value)?;
        if !payload.kind().is_structured() {
            return Err(Error::TypeMismatch {
                field: "params",
                expected: "array or object",
            });
        }
        Ok(payload)
    }

    /// Serialize each item as one element of a positional `params` array
    pub fn positional<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Serialize,
    {
        let args = args.into_iter().collect::<Vec<_>>();
        Self::from_serializable(&args)
    }

    /// Wrap raw text taken from an already-validated document
    pub(crate) fn from_raw(raw: Box<RawValue>) -> Self {
        Payload(raw)
    }

    fn from_serializable<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::value::to_raw_value(value)
            .map(Payload)
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// The payload's JSON text, exactly as received or serialized
    pub fn get(&self) -> &str {
        self.0.get()
    }

    pub fn kind(&self) -> JsonKind {
        JsonKind::of(&self.0)
    }

    /// Decode the payload into a caller type
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(self.0.get()).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Decode the payload into a generic JSON value
    pub fn to_value(&self) -> Result<serde_json::Value> {
        self.parse()
    }

    pub fn into_raw(self) -> Box<RawValue> {
        self.0
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        if self.get() == other.get() {
            return true;
        }
        match (self.to_value(), other.to_value()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get())
    }
}

/// A response member that may be absent, present as `null`, or present with a value
///
/// `Option` alone cannot tell `"result": null` from a missing `result`, and
/// the two mean different things: plenty of methods legitimately return
/// `null`. Use with `#[serde(skip_serializing_if = "Field::is_absent")]` so
/// that absent members are omitted on re-serialization while `Null` writes an
/// explicit `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// True for both `Null` and `Value`
    pub fn is_present(&self) -> bool {
        !self.is_absent()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(v),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(v) => Field::Value(f(v)),
        }
    }
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Field::Value(v) => v.serialize(serializer),
            // Absent is normally skipped by the containing struct; if not, null
            // is the closest JSON can get.
            Field::Absent | Field::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(text: &str) -> Box<RawValue> {
        RawValue::from_string(text.to_string()).unwrap()
    }

    #[test]
    fn test_json_kind_of() {
        assert_eq!(JsonKind::of(&raw("{}")), JsonKind::Object);
        assert_eq!(JsonKind::of(&raw("[1]")), JsonKind::Array);
        assert_eq!(JsonKind::of(&raw("\"x\"")), JsonKind::String);
        assert_eq!(JsonKind::of(&raw("true")), JsonKind::Bool);
        assert_eq!(JsonKind::of(&raw("false")), JsonKind::Bool);
        assert_eq!(JsonKind::of(&raw("null")), JsonKind::Null);
        assert_eq!(JsonKind::of(&raw("-1.5e3")), JsonKind::Number);
        assert_eq!(JsonKind::of(&raw("0")), JsonKind::Number);
    }

    #[test]
    fn test_params_new_accepts_structured() {
        let params = Params::new(&json!([{"foo": "bar"}])).unwrap();
        assert_eq!(params.get(), r#"[{"foo":"bar"}]"#);
        assert_eq!(params.kind(), JsonKind::Array);

        let mut named = std::collections::BTreeMap::new();
        named.insert("foo", "bar");
        let params = Params::new(&named).unwrap();
        assert_eq!(params.get(), r#"{"foo":"bar"}"#);
    }

    #[test]
    fn test_params_new_rejects_scalars() {
        for value in [json!(1), json!("x"), json!(true), json!(null)] {
            let err = Params::new(&value).unwrap_err();
            assert_eq!(
                err,
                Error::TypeMismatch { field: "params", expected: "array or object" }
            );
        }
    }

    #[test]
    fn test_params_positional() {
        let params = Params::positional(vec![json!({"foo": "bar"})]).unwrap();
        assert_eq!(params, Params::new(&json!([{"foo": "bar"}])).unwrap());

        let empty = Params::positional(Vec::<u8>::new()).unwrap();
        assert_eq!(empty.get(), "[]");
    }

    #[test]
    fn test_payload_equality_ignores_formatting() {
        let compact = Payload::from_raw(raw(r#"{"a":1,"b":[true]}"#));
        let spaced = Payload::from_raw(raw(r#"{ "b": [ true ], "a": 1 }"#));
        let other = Payload::from_raw(raw(r#"{"a":2,"b":[true]}"#));

        assert_eq!(compact, spaced);
        assert_ne!(compact, other);
    }

    #[test]
    fn test_payload_parse_into_type() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Sub {
            subscription: String,
            result: String,
        }

        let payload = Payload::from_raw(raw(r#"{"result":"0x1","subscription":"0xabc"}"#));
        let sub: Sub = payload.parse().unwrap();
        assert_eq!(
            sub,
            Sub { subscription: "0xabc".into(), result: "0x1".into() }
        );

        let err = payload.parse::<Vec<u8>>().unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_field_states() {
        let absent: Field<u8> = Field::default();
        assert!(absent.is_absent());
        assert!(!absent.is_present());

        let null: Field<u8> = Field::Null;
        assert!(null.is_null());
        assert!(null.is_present());
        assert_eq!(null.value(), None);

        let value = Field::Value(7u8);
        assert_eq!(value.value(), Some(&7));
        assert_eq!(value.map(u16::from), Field::Value(7u16));
    }

    #[test]
    fn test_field_serialization() {
        #[derive(Serialize)]
        struct Holder {
            #[serde(skip_serializing_if = "Field::is_absent")]
            result: Field<u8>,
        }

        let json = serde_json::to_string(&Holder { result: Field::Absent }).unwrap();
        assert_eq!(json, "{}");

        let json = serde_json::to_string(&Holder { result: Field::Null }).unwrap();
        assert_eq!(json, r#"{"result":null}"#);

        let json = serde_json::to_string(&Holder { result: Field::Value(3) }).unwrap();
        assert_eq!(json, r#"{"result":3}"#);
    }
}
