#![doc = include_str!("../README.md")]

pub mod encode;
pub mod error;
pub mod json;
pub mod model;
pub mod number;
pub mod options;
pub mod registry;
pub mod value;

pub use crate::encode::{Encoder, encode, encode_with};
pub use crate::error::{Error, Result};
pub use crate::json::{Json, Key};
pub use crate::model::{Field, Model};
pub use crate::number::Number;
pub use crate::options::{FieldFilter, Options};
pub use crate::registry::{Encoders, Kind};
pub use crate::value::{EnumValue, Opaque, Record, Value};
