//! The recursive dispatcher. Rule order is part of the contract: the first
//! matching rule wins and no later rule is consulted.

use crate::error::{Error, Result};
use crate::json::Json;
use crate::options::Options;
use crate::registry::{self, Encoders};
use crate::value::Value;

pub(crate) fn encode_value(value: Value, opts: &Options, reg: &Encoders) -> Result<Json> {
    // Rule 1: custom override. The encoder's result is returned directly;
    // it owns any recursion into children.
    if let Some(encoder) = reg.lookup(&value) {
        let encoder = encoder.clone();
        return encoder(&value);
    }

    match value {
        // Rule 2: structured value object. Extraction honors exclude_unset,
        // include/exclude, exclude_defaults and alias naming at this level
        // only; the recursion below runs under narrowed options so none of
        // those leak into nested values. Type-local encoders layer under
        // the current registry.
        Value::Model(mut model) => {
            let merged = match model.take_encoders() {
                Some(local) if !local.is_empty() => reg.layered_over(&local),
                _ => reg.clone(),
            };
            let mut fields = model.extract(opts);
            let child = opts.for_model_fields();
            if let Some(pos) = fields.iter().position(|(name, _)| name == "__root__") {
                let (_, root) = fields.remove(pos);
                return encode_value(root, &child, &merged);
            }
            let entries = fields
                .into_iter()
                .map(|(name, field_value)| (Value::String(name), field_value))
                .collect();
            encode_map(entries, &child, &merged)
        }

        // Rule 3: record-like aggregate. Flattens to a mapping and is
        // filtered like one, under the current options.
        Value::Record(record) => {
            let entries = record
                .into_fields()
                .into_iter()
                .map(|(name, field_value)| (Value::String(name), field_value))
                .collect();
            encode_map(entries, opts, reg)
        }

        // Rule 4.
        Value::Map(entries) => encode_map(entries, opts, reg),

        // Rule 5: the payload is already JSON-ready, returned unconverted.
        Value::Enum(e) => Ok(e.payload),

        // Rule 6.
        Value::Path(p) => Ok(Json::String(p.display().to_string())),

        // Rule 7.
        Value::Null => Ok(Json::Null),
        Value::Bool(b) => Ok(Json::Bool(b)),
        Value::Number(n) => Ok(Json::Number(n)),
        Value::String(s) => Ok(Json::String(s)),

        // Normally handled by the built-in registry entries under rule 1;
        // these arms keep the dispatch total for registries built without
        // the defaults.
        Value::DateTime(dt) => Ok(Json::String(registry::format_datetime(&dt))),
        Value::Date(d) => Ok(Json::String(registry::format_date(&d))),

        // Rule 8: set members must encode to primitives; duplicates of the
        // encoded form collapse.
        Value::Set(items) if opts.preserve_set => {
            let mut out: Vec<Json> = Vec::with_capacity(items.len());
            for item in items {
                let encoded = encode_value(item, opts, reg)?;
                if !encoded.is_primitive() {
                    return Err(Error::NonHashable {
                        kind: encoded.kind_name(),
                    });
                }
                if !out.contains(&encoded) {
                    out.push(encoded);
                }
            }
            Ok(Json::Set(out))
        }

        // Rule 9: elementwise, iteration order, duplicates preserved.
        Value::Array(items) | Value::Set(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(encode_value(item, opts, reg)?);
            }
            Ok(Json::Array(out))
        }
        Value::Lazy(seq) => {
            let mut out = Vec::new();
            for item in seq.0 {
                out.push(encode_value(item, opts, reg)?);
            }
            Ok(Json::Array(out))
        }

        // Rule 10: leaf-type table, then the two capability probes, in
        // order. Both probe failures travel in the error.
        Value::Opaque(opaque) => {
            if let Some(json) = registry::leaf_lookup(opaque.as_any()) {
                return Ok(json);
            }
            match opaque.probe_mapping() {
                Ok(entries) => encode_map(entries, opts, reg),
                Err(mapping) => match opaque.probe_attributes() {
                    Ok(attrs) => {
                        let entries = attrs
                            .into_iter()
                            .map(|(name, attr_value)| (Value::String(name), attr_value))
                            .collect();
                        encode_map(entries, opts, reg)
                    }
                    Err(attributes) => Err(Error::Unsupported {
                        type_name: opaque.type_name(),
                        mapping,
                        attributes,
                    }),
                },
            }
        }
    }
}

/// Rule 4: retained keys are `(all keys) ∩ include − exclude`, evaluated
/// against the raw key, then thinned by `sqlalchemy_safe` and
/// `exclude_none`. Keys and values recurse under filter-free options;
/// insertion order survives among retained entries.
fn encode_map(entries: Vec<(Value, Value)>, opts: &Options, reg: &Encoders) -> Result<Json> {
    let child = opts.for_map_entries();
    let mut out = Vec::with_capacity(entries.len());
    for (key, entry_value) in entries {
        if !retained(&key, opts) {
            continue;
        }
        if opts.sqlalchemy_safe {
            if let Value::String(s) = &key {
                if s.starts_with("_sa") {
                    continue;
                }
            }
        }
        if opts.exclude_none && matches!(entry_value, Value::Null) {
            continue;
        }
        let encoded_key = encode_value(key, &child, reg)?
            .into_key()
            .map_err(|kind| Error::Key { kind })?;
        let encoded_value = encode_value(entry_value, &child, reg)?;
        out.push((encoded_key, encoded_value));
    }
    Ok(Json::Object(out))
}

fn retained(key: &Value, opts: &Options) -> bool {
    if opts.include.is_none() && opts.exclude.is_none() {
        return true;
    }
    let name = filter_name(key);
    if let Some(include) = &opts.include {
        match &name {
            Some(n) if include.contains(n) => {}
            _ => return false,
        }
    }
    if let Some(exclude) = &opts.exclude {
        if let Some(n) = &name {
            if exclude.contains(n) {
                return false;
            }
        }
    }
    true
}

// Filters name keys by their string form; only string and numeric keys
// have one.
fn filter_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
