use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::number::Number;

/// A JSON-ready value: the only thing the encode engine ever returns.
///
/// `Set` is produced only under `preserve_set` and carries deduplicated,
/// insertion-ordered primitive elements. `Object` preserves insertion order.
#[derive(Debug, Clone, PartialEq)]
pub enum Json {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Json>),
    Set(Vec<Json>),
    Object(Vec<(Key, Json)>),
}

/// Object keys are strings or numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    String(String),
    Number(Number),
}

impl Json {
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Json::Null | Json::Bool(_) | Json::Number(_) | Json::String(_)
        )
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Json::Null => "null",
            Json::Bool(_) => "boolean",
            Json::Number(_) => "number",
            Json::String(_) => "string",
            Json::Array(_) => "array",
            Json::Set(_) => "set",
            Json::Object(_) => "object",
        }
    }

    /// Collapse a primitive into an object key. Fails on containers.
    pub(crate) fn into_key(self) -> core::result::Result<Key, &'static str> {
        match self {
            Json::String(s) => Ok(Key::String(s)),
            Json::Number(n) => Ok(Key::Number(n)),
            Json::Bool(b) => Ok(Key::String(b.to_string())),
            Json::Null => Ok(Key::String(String::from("null"))),
            other => Err(other.kind_name()),
        }
    }
}

impl core::fmt::Display for Key {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Key::String(s) => f.write_str(s),
            Key::Number(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for Json {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Json::Null => serializer.serialize_unit(),
            Json::Bool(b) => serializer.serialize_bool(*b),
            Json::Number(Number::I64(i)) => serializer.serialize_i64(*i),
            Json::Number(Number::U64(u)) => serializer.serialize_u64(*u),
            Json::Number(Number::F64(f)) => serializer.serialize_f64(*f),
            Json::String(s) => serializer.serialize_str(s),
            Json::Array(items) | Json::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Json::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    // JSON text only has string keys; numbers stringify.
                    map.serialize_entry(&k.to_string(), v)?;
                }
                map.end()
            }
        }
    }
}

impl From<Json> for serde_json::Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => serde_json::Value::Null,
            Json::Bool(b) => serde_json::Value::Bool(b),
            Json::Number(Number::I64(i)) => serde_json::Value::from(i),
            Json::Number(Number::U64(u)) => serde_json::Value::from(u),
            Json::Number(Number::F64(f)) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Json::String(s) => serde_json::Value::String(s),
            Json::Array(items) | Json::Set(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Json::Object(entries) => serde_json::Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Json {
    fn from(b: bool) -> Self {
        Json::Bool(b)
    }
}

impl From<i32> for Json {
    fn from(i: i32) -> Self {
        Json::Number(Number::I64(i64::from(i)))
    }
}

impl From<i64> for Json {
    fn from(i: i64) -> Self {
        Json::Number(Number::I64(i))
    }
}

impl From<u64> for Json {
    fn from(u: u64) -> Self {
        Json::Number(Number::U64(u))
    }
}

impl From<f64> for Json {
    fn from(f: f64) -> Self {
        Json::Number(Number::F64(f))
    }
}

impl From<&str> for Json {
    fn from(s: &str) -> Self {
        Json::String(s.to_string())
    }
}

impl From<String> for Json {
    fn from(s: String) -> Self {
        Json::String(s)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Number(Number::I64(i))
    }
}
