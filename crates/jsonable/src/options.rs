use serde::Deserialize;

use crate::error::{Error, Result};

/// A level-local field filter: either a flat key set or a nested
/// `key -> filter` mapping. Only the top-level keys of a `Nested` filter are
/// ever consulted; the nested specs are narrowed away before recursion.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    Keys(Vec<String>),
    Nested(Vec<(String, FieldFilter)>),
}

impl FieldFilter {
    pub fn keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldFilter::Keys(keys.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, key: &str) -> bool {
        match self {
            FieldFilter::Keys(ks) => ks.iter().any(|k| k == key),
            FieldFilter::Nested(ps) => ps.iter().any(|(k, _)| k == key),
        }
    }

    /// Parse a filter from dynamic JSON. Arrays of strings/integers become
    /// `Keys`; objects whose values are themselves valid filter shapes become
    /// `Nested`. Anything else is a caller configuration error.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Array(items) => {
                let mut keys = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        serde_json::Value::String(s) => keys.push(s.clone()),
                        serde_json::Value::Number(n) => keys.push(n.to_string()),
                        other => {
                            return Err(Error::Options(format!(
                                "filter keys must be strings or integers, got {}",
                                json_type_name(other)
                            )));
                        }
                    }
                }
                Ok(FieldFilter::Keys(keys))
            }
            serde_json::Value::Object(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (k, v) in map {
                    entries.push((k.clone(), FieldFilter::from_json(v)?));
                }
                Ok(FieldFilter::Nested(entries))
            }
            other => Err(Error::Options(format!(
                "include/exclude must be an array of keys or a key-to-filter object, got {}",
                json_type_name(other)
            ))),
        }
    }
}

fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Immutable configuration for one encode call.
///
/// `include`/`exclude` apply only at the level of the value they are given
/// for; they are narrowed away before recursing into children.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Keys retained at the current level; `None` means all.
    pub include: Option<FieldFilter>,
    /// Keys removed at the current level, after `include`.
    pub exclude: Option<FieldFilter>,
    /// Use declared external field names on structured objects.
    pub by_alias: bool,
    /// Omit model fields that were never explicitly assigned.
    pub exclude_unset: bool,
    /// Omit mapping/object entries whose value is null.
    pub exclude_none: bool,
    /// Omit model fields equal to their declared default.
    pub exclude_defaults: bool,
    /// Drop string mapping keys starting with the ORM-internal `_sa` prefix.
    pub sqlalchemy_safe: bool,
    /// Encode set-like containers as deduplicated sets instead of sequences.
    pub preserve_set: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            include: None,
            exclude: None,
            by_alias: true,
            exclude_unset: false,
            exclude_none: false,
            exclude_defaults: false,
            sqlalchemy_safe: true,
            preserve_set: false,
        }
    }
}

// Dynamic option input, one field per recognized key. Unknown keys are
// rejected by serde before filter shapes are checked.
#[derive(Deserialize)]
#[serde(deny_unknown_fields, default)]
struct RawOptions {
    include: Option<serde_json::Value>,
    exclude: Option<serde_json::Value>,
    by_alias: bool,
    exclude_unset: bool,
    exclude_none: bool,
    exclude_defaults: bool,
    sqlalchemy_safe: bool,
    preserve_set: bool,
}

impl Default for RawOptions {
    fn default() -> Self {
        let d = Options::default();
        Self {
            include: None,
            exclude: None,
            by_alias: d.by_alias,
            exclude_unset: d.exclude_unset,
            exclude_none: d.exclude_none,
            exclude_defaults: d.exclude_defaults,
            sqlalchemy_safe: d.sqlalchemy_safe,
            preserve_set: d.preserve_set,
        }
    }
}

impl Options {
    /// Build options from an already-parsed dynamic JSON object.
    /// Unrecognized keys and unsupported filter shapes are caller errors.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let raw: RawOptions = serde_json::from_value(value.clone())
            .map_err(|e| Error::Options(e.to_string()))?;
        Ok(Self {
            include: raw.include.as_ref().map(FieldFilter::from_json).transpose()?,
            exclude: raw.exclude.as_ref().map(FieldFilter::from_json).transpose()?,
            by_alias: raw.by_alias,
            exclude_unset: raw.exclude_unset,
            exclude_none: raw.exclude_none,
            exclude_defaults: raw.exclude_defaults,
            sqlalchemy_safe: raw.sqlalchemy_safe,
            preserve_set: raw.preserve_set,
        })
    }

    /// Options for recursing into a structured object's extracted fields.
    /// Only `exclude_none`, `exclude_defaults`, `sqlalchemy_safe` and
    /// `preserve_set` survive; filters, alias mode and unset exclusion apply
    /// at the object's own level only and must not leak into nested values.
    pub fn for_model_fields(&self) -> Options {
        Options {
            exclude_none: self.exclude_none,
            exclude_defaults: self.exclude_defaults,
            sqlalchemy_safe: self.sqlalchemy_safe,
            preserve_set: self.preserve_set,
            ..Options::default()
        }
    }

    /// Options for recursing into a mapping's keys and values: filters are
    /// level-local and dropped, every other flag is carried forward.
    pub fn for_map_entries(&self) -> Options {
        Options {
            include: None,
            exclude: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert!(opts.by_alias);
        assert!(opts.sqlalchemy_safe);
        assert!(!opts.exclude_unset);
        assert!(!opts.preserve_set);
    }

    #[test]
    fn model_narrowing_resets_level_local_flags() {
        let opts = Options {
            include: Some(FieldFilter::keys(["a"])),
            by_alias: false,
            exclude_unset: true,
            exclude_none: true,
            ..Options::default()
        };
        let narrowed = opts.for_model_fields();
        assert!(narrowed.include.is_none());
        assert!(narrowed.by_alias);
        assert!(!narrowed.exclude_unset);
        assert!(narrowed.exclude_none);
    }

    #[test]
    fn map_narrowing_keeps_flags() {
        let opts = Options {
            include: Some(FieldFilter::keys(["a"])),
            exclude_none: true,
            by_alias: false,
            ..Options::default()
        };
        let narrowed = opts.for_map_entries();
        assert!(narrowed.include.is_none());
        assert!(narrowed.exclude_none);
        assert!(!narrowed.by_alias);
    }
}
