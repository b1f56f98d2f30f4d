use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::json::Json;
use crate::number::Number;
use crate::value::{Opaque, Value};

/// Shape classification of an input value, used for exact registry lookup
/// and engine dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    DateTime,
    Date,
    Path,
    Enum,
    Array,
    Set,
    Lazy,
    Map,
    Model,
    Record,
    Opaque,
}

/// A conversion function: fully responsible for producing a JSON-ready
/// value; the engine performs no further recursion on its result.
pub type EncoderFn = Arc<dyn Fn(&Value) -> Result<Json> + Send + Sync>;

/// Structural matcher for the ordered "is-a" pass.
pub type MatchFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Ordered type-to-encoder table. Exact entries (by shape kind, or by Rust
/// type for opaque payloads) are checked first in constant time; structural
/// matchers are scanned in insertion order, first match wins. Never mutated
/// during an encode call; layering produces fresh copies.
#[derive(Clone, Default)]
pub struct Encoders {
    by_kind: HashMap<Kind, EncoderFn>,
    by_type: HashMap<TypeId, EncoderFn>,
    matchers: Vec<(MatchFn, EncoderFn)>,
}

impl Encoders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty() && self.by_type.is_empty() && self.matchers.is_empty()
    }

    /// Register an encoder for every value of a shape kind. Replaces any
    /// previous entry for the same kind.
    pub fn insert_kind<F>(&mut self, kind: Kind, f: F)
    where
        F: Fn(&Value) -> Result<Json> + Send + Sync + 'static,
    {
        self.by_kind.insert(kind, Arc::new(f));
    }

    /// Register an encoder for one concrete opaque payload type.
    pub fn insert_type<T, F>(&mut self, f: F)
    where
        T: Opaque,
        F: Fn(&T) -> Result<Json> + Send + Sync + 'static,
    {
        let wrapped: EncoderFn = Arc::new(move |value: &Value| match value {
            Value::Opaque(o) => match o.as_any().downcast_ref::<T>() {
                Some(payload) => f(payload),
                None => Err(Error::Custom(format!(
                    "encoder for {} applied to {}",
                    std::any::type_name::<T>(),
                    o.type_name()
                ))),
            },
            other => Err(Error::Custom(format!(
                "encoder for {} applied to a {:?} value",
                std::any::type_name::<T>(),
                other.kind()
            ))),
        });
        self.by_type.insert(TypeId::of::<T>(), wrapped);
    }

    /// Append a structural matcher. Scan order is registration order, so
    /// overlapping matchers must be registered most-specific-first.
    pub fn insert_match<M, F>(&mut self, matches: M, f: F)
    where
        M: Fn(&Value) -> bool + Send + Sync + 'static,
        F: Fn(&Value) -> Result<Json> + Send + Sync + 'static,
    {
        self.matchers.push((Arc::new(matches), Arc::new(f)));
    }

    /// Exact kind/type match first, then the ordered structural scan.
    /// `None` is not an error; the engine falls through to built-in
    /// handling.
    pub fn lookup(&self, value: &Value) -> Option<&EncoderFn> {
        // For opaque values the concrete type is the exact runtime type;
        // it outranks a blanket Kind::Opaque entry.
        if let Value::Opaque(o) = value {
            if let Some(f) = self.by_type.get(&o.as_any().type_id()) {
                return Some(f);
            }
        }
        if let Some(f) = self.by_kind.get(&value.kind()) {
            return Some(f);
        }
        self.matchers
            .iter()
            .find(|(matches, _)| matches(value))
            .map(|(_, f)| f)
    }

    /// Layer `self` on top of `base`: exact entries from `self` win on the
    /// same key; structural matchers from `base` scan first.
    pub(crate) fn layered_over(&self, base: &Encoders) -> Encoders {
        let mut out = base.clone();
        for (kind, f) in &self.by_kind {
            out.by_kind.insert(*kind, f.clone());
        }
        for (type_id, f) in &self.by_type {
            out.by_type.insert(*type_id, f.clone());
        }
        out.matchers.extend(self.matchers.iter().cloned());
        out
    }
}

impl core::fmt::Debug for Encoders {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Encoders")
            .field("kinds", &self.by_kind.len())
            .field("types", &self.by_type.len())
            .field("matchers", &self.matchers.len())
            .finish()
    }
}

/// Built-in defaults, constructed once and read-only afterward.
static BUILTINS: LazyLock<Encoders> = LazyLock::new(|| {
    let mut e = Encoders::new();
    e.insert_kind(Kind::DateTime, |value| match value {
        Value::DateTime(dt) => Ok(Json::String(format_datetime(dt))),
        _ => Err(Error::Custom(String::from(
            "built-in datetime encoder applied to a non-datetime value",
        ))),
    });
    e.insert_kind(Kind::Date, |value| match value {
        Value::Date(d) => Ok(Json::String(format_date(d))),
        _ => Err(Error::Custom(String::from(
            "built-in date encoder applied to a non-date value",
        ))),
    });
    e
});

pub(crate) fn builtins() -> &'static Encoders {
    &BUILTINS
}

/// UTC, millisecond precision, literal `Z` suffix.
pub(crate) fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

pub(crate) fn format_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

// Process-wide table of additional leaf types, consulted only for opaque
// values that missed the caller registry and every shape rule.
type LeafFn = fn(&dyn Any) -> Option<Json>;

fn leaf_duration(any: &dyn Any) -> Option<Json> {
    any.downcast_ref::<Duration>()
        .map(|d| Json::Number(Number::F64(d.as_secs_f64())))
}

fn leaf_ip_addr(any: &dyn Any) -> Option<Json> {
    any.downcast_ref::<IpAddr>()
        .map(|ip| Json::String(ip.to_string()))
}

fn leaf_ipv4_addr(any: &dyn Any) -> Option<Json> {
    any.downcast_ref::<Ipv4Addr>()
        .map(|ip| Json::String(ip.to_string()))
}

fn leaf_ipv6_addr(any: &dyn Any) -> Option<Json> {
    any.downcast_ref::<Ipv6Addr>()
        .map(|ip| Json::String(ip.to_string()))
}

fn leaf_socket_addr(any: &dyn Any) -> Option<Json> {
    any.downcast_ref::<SocketAddr>()
        .map(|addr| Json::String(addr.to_string()))
}

#[cfg(feature = "uuid")]
fn leaf_uuid(any: &dyn Any) -> Option<Json> {
    any.downcast_ref::<uuid::Uuid>()
        .map(|u| Json::String(u.hyphenated().to_string()))
}

static LEAF_TYPES: LazyLock<HashMap<TypeId, LeafFn>> = LazyLock::new(|| {
    let mut table: HashMap<TypeId, LeafFn> = HashMap::new();
    table.insert(TypeId::of::<Duration>(), leaf_duration);
    table.insert(TypeId::of::<IpAddr>(), leaf_ip_addr);
    table.insert(TypeId::of::<Ipv4Addr>(), leaf_ipv4_addr);
    table.insert(TypeId::of::<Ipv6Addr>(), leaf_ipv6_addr);
    table.insert(TypeId::of::<SocketAddr>(), leaf_socket_addr);
    #[cfg(feature = "uuid")]
    table.insert(TypeId::of::<uuid::Uuid>(), leaf_uuid);
    table
});

pub(crate) fn leaf_lookup(any: &dyn Any) -> Option<Json> {
    LEAF_TYPES.get(&any.type_id()).and_then(|f| f(any))
}

impl Opaque for Duration {}
impl Opaque for IpAddr {}
impl Opaque for Ipv4Addr {}
impl Opaque for Ipv6Addr {}
impl Opaque for SocketAddr {}

#[cfg(feature = "uuid")]
impl Opaque for uuid::Uuid {}
