//! Value Module
//!
//! The closed set of shapes a stored value may take, the recursive validator
//! that enforces transport safety, and the JSON helpers a non-memory backend
//! would use to move values over the wire.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, DeserializeOwned, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::cache::MAX_VALUE_DEPTH;
use crate::error::Result;

// == Value ==
/// A storable value.
///
/// Dates serialize as RFC 3339 strings with millisecond precision, so a date
/// read back through [`decode`] comes out as [`Value::String`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Short name of the shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(d) => {
                serializer.serialize_str(&d.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::Array(items) => serializer.collect_seq(items),
            Value::Map(map) => serializer.collect_map(map),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("null, bool, number, string, array or string-keyed map")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Value, D::Error> {
        Value::deserialize(d)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Integer))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
        let mut map = BTreeMap::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            map.insert(key, value);
        }
        Ok(Value::Map(map))
    }
}

// == Validation ==
/// What made a value unsafe to serialize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViolationKind {
    /// NaN or an infinity, which JSON cannot carry
    NonFiniteNumber(f64),
    /// Containers nested deeper than `MAX_VALUE_DEPTH`
    TooDeep { limit: usize },
}

/// A validation failure and where it happened.
///
/// `path` uses `$` for the root, `.name` for map fields and `[i]` for
/// array elements, e.g. `$.tasks[2].due`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueViolation {
    pub path: String,
    pub kind: ViolationKind,
}

impl fmt::Display for ValueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::NonFiniteNumber(n) => {
                write!(f, "value at {} is a non-finite number ({})", self.path, n)
            }
            ViolationKind::TooDeep { limit } => {
                write!(f, "value at {} nests deeper than {} levels", self.path, limit)
            }
        }
    }
}

enum Segment<'a> {
    Field(&'a str),
    Index(usize),
}

/// Checks that a value can be safely serialized.
pub fn validate_value(value: &Value) -> std::result::Result<(), ValueViolation> {
    let mut path = Vec::new();
    walk(value, 0, &mut path).map_err(|kind| ValueViolation {
        path: render_path(&path),
        kind,
    })
}

// On error `path` is left pointing at the offending node.
fn walk<'a>(
    value: &'a Value,
    depth: usize,
    path: &mut Vec<Segment<'a>>,
) -> std::result::Result<(), ViolationKind> {
    match value {
        Value::Float(n) if !n.is_finite() => Err(ViolationKind::NonFiniteNumber(*n)),
        Value::Array(_) | Value::Map(_) if depth >= MAX_VALUE_DEPTH => {
            Err(ViolationKind::TooDeep {
                limit: MAX_VALUE_DEPTH,
            })
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(Segment::Index(i));
                walk(item, depth + 1, path)?;
                path.pop();
            }
            Ok(())
        }
        Value::Map(map) => {
            for (key, item) in map {
                path.push(Segment::Field(key));
                walk(item, depth + 1, path)?;
                path.pop();
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn render_path(path: &[Segment<'_>]) -> String {
    let mut out = String::from("$");
    for segment in path {
        match segment {
            Segment::Field(name) => {
                out.push('.');
                out.push_str(name);
            }
            Segment::Index(i) => {
                out.push('[');
                out.push_str(&i.to_string());
                out.push(']');
            }
        }
    }
    out
}

// == Conversion Helpers ==
/// Converts any serializable type into a validated [`Value`].
///
/// Fails with `StoreError::Serialization` for types serde_json cannot
/// express, such as maps with non-string keys.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    let json = serde_json::to_value(value)?;
    let value: Value = serde_json::from_value(json)?;
    validate_value(&value)?;
    Ok(value)
}

/// Converts a stored [`Value`] back into a caller type.
pub fn from_value<T: DeserializeOwned>(value: &Value) -> Result<T> {
    let json = serde_json::to_value(value)?;
    Ok(serde_json::from_value(json)?)
}

/// Encodes a value to its JSON transport form.
pub fn encode(value: &Value) -> Result<String> {
    validate_value(value)?;
    Ok(serde_json::to_string(value)?)
}

/// Parses a value from its JSON transport form.
pub fn decode(raw: &str) -> Result<Value> {
    Ok(serde_json::from_str(raw)?)
}
