use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// An opaque value matched no dispatch rule and both fallback views
    /// failed. Carries both failures, not just the last one.
    #[error(
        "cannot encode value of type {type_name}: mapping view failed ({mapping}); attribute view failed ({attributes})"
    )]
    Unsupported {
        type_name: &'static str,
        mapping: String,
        attributes: String,
    },

    #[error("invalid options: {0}")]
    Options(String),

    #[error("set element encoded to a {kind}; preserve_set requires elements that encode to primitives")]
    NonHashable { kind: &'static str },

    #[error("mapping key encoded to a {kind}; keys must encode to a string or number")]
    Key { kind: &'static str },

    #[error("{0}")]
    Custom(String),
}

pub type Result<T> = core::result::Result<T, Error>;
