use crate::options::Options;
use crate::registry::Encoders;
use crate::value::Value;

/// One declared field of a structured value object: internal name, optional
/// external alias, the current value, the declared default, and whether the
/// field was explicitly assigned.
#[derive(Debug)]
pub struct Field {
    pub(crate) name: String,
    pub(crate) alias: Option<String>,
    pub(crate) value: Value,
    pub(crate) default: Option<Value>,
    pub(crate) set: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            value: value.into(),
            default: None,
            set: true,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the field as never explicitly assigned (its value is whatever
    /// the default produced).
    pub fn unset(mut self) -> Self {
        self.set = false;
        self
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.alias == other.alias
            && self.value == other.value
            && self.default == other.default
            && self.set == other.set
    }
}

/// A structured value object: declared fields with defaults and set-tracking,
/// plus optional type-local custom encoders that layer under the caller's
/// registry when the object's fields are encoded.
#[derive(Debug, Default)]
pub struct Model {
    name: String,
    fields: Vec<Field>,
    encoders: Option<Encoders>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            encoders: None,
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn encoders(mut self, encoders: Encoders) -> Self {
        self.encoders = Some(encoders);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn take_encoders(&mut self) -> Option<Encoders> {
        self.encoders.take()
    }

    /// Extract the field mapping, honoring in order: `exclude_unset`,
    /// `include`/`exclude` (matched against internal names),
    /// `exclude_defaults`, then alias naming.
    pub(crate) fn extract(self, opts: &Options) -> Vec<(String, Value)> {
        let mut out = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            if opts.exclude_unset && !field.set {
                continue;
            }
            if let Some(include) = &opts.include {
                if !include.contains(&field.name) {
                    continue;
                }
            }
            if let Some(exclude) = &opts.exclude {
                if exclude.contains(&field.name) {
                    continue;
                }
            }
            if opts.exclude_defaults {
                if let Some(default) = &field.default {
                    if *default == field.value {
                        continue;
                    }
                }
            }
            let name = if opts.by_alias {
                field.alias.unwrap_or(field.name)
            } else {
                field.name
            };
            out.push((name, field.value));
        }
        out
    }
}

impl PartialEq for Model {
    fn eq(&self, other: &Self) -> bool {
        // Type-local encoders are behavior, not state; identity is the
        // declared name plus the field values.
        self.name == other.name && self.fields == other.fields
    }
}
