use std::any::Any;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::json::Json;
use crate::model::Model;
use crate::number::Number;
use crate::registry::Kind;

/// The input tree: a closed classification of every shape the engine can
/// dispatch on. `encode` consumes it by value, which is what makes a `Lazy`
/// sequence single-use.
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
    Path(PathBuf),
    Enum(EnumValue),
    Array(Vec<Value>),
    Set(Vec<Value>),
    Lazy(LazySeq),
    Map(Vec<(Value, Value)>),
    Model(Model),
    Record(Record),
    Opaque(Box<dyn ErasedOpaque>),
}

/// An enumerated constant: a symbolic name over an already-JSON-ready
/// payload. Encoding returns the payload unconverted.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub payload: Json,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, payload: impl Into<Json>) -> Self {
        Self {
            name: name.into(),
            payload: payload.into(),
        }
    }
}

/// A record-like aggregate: named fields, no encoding metadata of its own.
/// It flattens to a mapping and is filtered like one.
#[derive(Debug, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub(crate) fn into_fields(self) -> Vec<(String, Value)> {
        self.fields
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

/// A one-shot lazily-produced sequence. Consumed exactly once; ownership
/// makes passing it twice impossible.
pub struct LazySeq(pub(crate) Box<dyn Iterator<Item = Value>>);

impl core::fmt::Debug for LazySeq {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("LazySeq(..)")
    }
}

/// Capability probe for values outside the closed shape classification.
/// The engine asks for a mapping view first, then an attribute view; a
/// probe that does not apply reports why as a plain message.
pub trait Opaque: 'static {
    fn as_mapping(&self) -> core::result::Result<Vec<(Value, Value)>, String> {
        Err(String::from("value exposes no mapping view"))
    }

    fn as_attributes(&self) -> core::result::Result<Vec<(String, Value)>, String> {
        Err(String::from("value exposes no attribute view"))
    }
}

/// Object-safe shim over [`Opaque`] carrying the concrete type's identity.
/// Implemented for every `Opaque` type; not meant to be implemented directly.
#[doc(hidden)]
pub trait ErasedOpaque {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
    fn probe_mapping(&self) -> core::result::Result<Vec<(Value, Value)>, String>;
    fn probe_attributes(&self) -> core::result::Result<Vec<(String, Value)>, String>;
}

impl<T: Opaque> ErasedOpaque for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn probe_mapping(&self) -> core::result::Result<Vec<(Value, Value)>, String> {
        self.as_mapping()
    }

    fn probe_attributes(&self) -> core::result::Result<Vec<(String, Value)>, String> {
        self.as_attributes()
    }
}

impl Value {
    /// The shape classification used for dispatch and registry lookup,
    /// computed once per value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Number(_) => Kind::Number,
            Value::String(_) => Kind::String,
            Value::DateTime(_) => Kind::DateTime,
            Value::Date(_) => Kind::Date,
            Value::Path(_) => Kind::Path,
            Value::Enum(_) => Kind::Enum,
            Value::Array(_) => Kind::Array,
            Value::Set(_) => Kind::Set,
            Value::Lazy(_) => Kind::Lazy,
            Value::Map(_) => Kind::Map,
            Value::Model(_) => Kind::Model,
            Value::Record(_) => Kind::Record,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    pub fn lazy<I>(iter: I) -> Value
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Value::Lazy(LazySeq(Box::new(iter.into_iter())))
    }

    pub fn opaque(value: impl Opaque) -> Value {
        Value::Opaque(Box::new(value))
    }

    /// Build a set-like container. Duplicate members collapse here, at the
    /// source type, the way a real set can never hold them; later flattening
    /// to a sequence does not deduplicate again.
    pub fn set<I>(items: I) -> Value
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut members: Vec<Value> = Vec::new();
        for item in items {
            let member = item.into();
            if !members.contains(&member) {
                members.push(member);
            }
        }
        Value::Set(members)
    }

    pub fn map<K, V, I>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl core::fmt::Debug for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::DateTime(dt) => f.debug_tuple("DateTime").field(dt).finish(),
            Value::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Value::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Value::Enum(e) => f.debug_tuple("Enum").field(e).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Set(items) => f.debug_tuple("Set").field(items).finish(),
            Value::Lazy(seq) => f.debug_tuple("Lazy").field(seq).finish(),
            Value::Map(entries) => f.debug_tuple("Map").field(entries).finish(),
            Value::Model(m) => f.debug_tuple("Model").field(m).finish(),
            Value::Record(r) => f.debug_tuple("Record").field(r).finish(),
            Value::Opaque(o) => write!(f, "Opaque({})", o.type_name()),
        }
    }
}

/// Structural equality where it is meaningful. `Lazy` and `Opaque` values
/// never compare equal, not even to themselves.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::Path(a), Value::Path(b)) => a == b,
            (Value::Enum(a), Value::Enum(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Model(a), Value::Model(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::I64(i64::from(i)))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::I64(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Number(Number::U64(u))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::F64(f))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt.fixed_offset())
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<PathBuf> for Value {
    fn from(p: PathBuf) -> Self {
        Value::Path(p)
    }
}

impl From<&Path> for Value {
    fn from(p: &Path) -> Self {
        Value::Path(p.to_path_buf())
    }
}

impl From<EnumValue> for Value {
    fn from(e: EnumValue) -> Self {
        Value::Enum(e)
    }
}

impl From<Model> for Value {
    fn from(m: Model) -> Self {
        Value::Model(m)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::U64(u))
                } else {
                    Value::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Into::into).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (Value::String(k), v.into()))
                    .collect(),
            ),
        }
    }
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Into::into).collect()),
            Json::Set(items) => Value::set(items),
            Json::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| {
                        let key = match k {
                            crate::json::Key::String(s) => Value::String(s),
                            crate::json::Key::Number(n) => Value::Number(n),
                        };
                        (key, v.into())
                    })
                    .collect(),
            ),
        }
    }
}
