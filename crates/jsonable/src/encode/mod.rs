//! Public encoding surface: the free functions and the reusable [`Encoder`].

mod engine;

use crate::error::Result;
use crate::json::Json;
use crate::options::Options;
use crate::registry::{self, Encoders};
use crate::value::Value;

/// Encode a value with the built-in registry.
pub fn encode(value: impl Into<Value>, options: &Options) -> Result<Json> {
    engine::encode_value(value.into(), options, registry::builtins())
}

/// Encode a value with caller encoders layered over the built-ins.
/// A caller entry for the exact same kind or type wins; built-ins are
/// never erased.
pub fn encode_with(value: impl Into<Value>, options: &Options, encoders: &Encoders) -> Result<Json> {
    let registry = encoders.layered_over(registry::builtins());
    engine::encode_value(value.into(), options, &registry)
}

/// A pre-bound options/encoders pair. Immutable after construction, so a
/// single instance can serve concurrent calls on independent inputs.
#[derive(Debug, Clone)]
pub struct Encoder {
    options: Options,
    registry: Encoders,
}

impl Encoder {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            registry: registry::builtins().clone(),
        }
    }

    pub fn with_encoders(mut self, encoders: Encoders) -> Self {
        self.registry = encoders.layered_over(registry::builtins());
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn encode(&self, value: impl Into<Value>) -> Result<Json> {
        engine::encode_value(value.into(), &self.options, &self.registry)
    }

    /// Wrap a producer so its output is piped through this encoder's fixed
    /// options and registry on every call.
    pub fn wrap<F, T>(self, mut producer: F) -> impl FnMut() -> Result<Json>
    where
        F: FnMut() -> T,
        T: Into<Value>,
    {
        move || engine::encode_value(producer().into(), &self.options, &self.registry)
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
