//! Uniform value representation and outbound parameter marshaling.

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::error::{CqlError, CqlResult};
use crate::mapping::NativeType;

/// Application-facing value, as seen in normalized rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
    Bytes(Bytes),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
}

impl Value {
    /// Falsy in the adapter's sense. Falsy values are omitted from
    /// normalized rows, so downstream code cannot tell an absent column
    /// from null, zero, false, or the empty string.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Double(f) => *f == 0.0,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

/// Statement parameter as supplied by the query layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Binary payload, forwarded byte-identical.
    Bytes(Bytes),
    /// Composite list. The client only understands scalar and binary
    /// types, so this is serialized to JSON text on the way out.
    List(Vec<serde_json::Value>),
    /// Composite object, JSON-encoded like [`Param::List`].
    Object(serde_json::Map<String, serde_json::Value>),
    /// Type-annotated value the client handles natively.
    Hinted {
        value: serde_json::Value,
        hint: NativeType,
    },
}

/// Parameter representation the underlying client consumes directly.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Bytes(Bytes),
    Hinted {
        value: serde_json::Value,
        hint: NativeType,
    },
}

impl Param {
    /// Translate to the client's wire shape. Scalars, binary payloads, and
    /// hinted pairs pass through unchanged; composites become JSON text.
    pub fn into_wire(self) -> CqlResult<WireValue> {
        let wire = match self {
            Param::Null => WireValue::Null,
            Param::Bool(v) => WireValue::Bool(v),
            Param::Int(v) => WireValue::Int(v),
            Param::Double(v) => WireValue::Double(v),
            Param::Text(v) => WireValue::Text(v),
            Param::Timestamp(v) => WireValue::Timestamp(v),
            Param::Bytes(v) => WireValue::Bytes(v),
            Param::List(items) => WireValue::Text(
                serde_json::to_string(&items).map_err(|e| CqlError::Encode(e.to_string()))?,
            ),
            Param::Object(fields) => WireValue::Text(
                serde_json::to_string(&fields).map_err(|e| CqlError::Encode(e.to_string()))?,
            ),
            Param::Hinted { value, hint } => WireValue::Hinted { value, hint },
        };
        Ok(wire)
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Param::Bool(v)
    }
}

impl From<i64> for Param {
    fn from(v: i64) -> Self {
        Param::Int(v)
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Double(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}
