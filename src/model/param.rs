// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parameter values and parameter tables
//!
//! Parameters are supplied by the caller. The resolver only ever reads them
//! through the [`ParameterValue`] capability trait and the [`ParameterTable`]
//! lookup trait, so callers can plug in their own value representation.

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use thiserror::Error;

use super::types::WantedType;

/// An externally supplied parameter value
///
/// Each `legal_*` flag says whether the value may be read as that type. The
/// matching accessor is only meaningful when its flag is set; implementations
/// return `None` otherwise. Well-formed parameters have exactly one flag set.
pub trait ParameterValue {
    /// Whether the value may be read as a string
    fn legal_string(&self) -> bool;
    /// Whether the value may be read as a number
    fn legal_number(&self) -> bool;
    /// Whether the value may be read as a boolean
    fn legal_boolean(&self) -> bool;

    /// Read the value as a string
    fn as_string(&self) -> Option<String>;
    /// Read the value as a number
    fn as_number(&self) -> Option<f64>;
    /// Read the value as a boolean
    fn as_boolean(&self) -> Option<bool>;

    /// Whether the value may be read as `ty`
    fn is_legal(&self, ty: WantedType) -> bool {
        match ty {
            WantedType::String => self.legal_string(),
            WantedType::Number => self.legal_number(),
            WantedType::Boolean => self.legal_boolean(),
        }
    }

    /// All legal types, in inference priority order (string, number, boolean)
    fn legal_types(&self) -> Vec<WantedType> {
        WantedType::PRIORITY
            .into_iter()
            .filter(|ty| self.is_legal(*ty))
            .collect()
    }
}

impl<T: ParameterValue + ?Sized> ParameterValue for &T {
    fn legal_string(&self) -> bool {
        (**self).legal_string()
    }
    fn legal_number(&self) -> bool {
        (**self).legal_number()
    }
    fn legal_boolean(&self) -> bool {
        (**self).legal_boolean()
    }
    fn as_string(&self) -> Option<String> {
        (**self).as_string()
    }
    fn as_number(&self) -> Option<f64> {
        (**self).as_number()
    }
    fn as_boolean(&self) -> Option<bool> {
        (**self).as_boolean()
    }
}

impl<T: ParameterValue + ?Sized> ParameterValue for Box<T> {
    fn legal_string(&self) -> bool {
        (**self).legal_string()
    }
    fn legal_number(&self) -> bool {
        (**self).legal_number()
    }
    fn legal_boolean(&self) -> bool {
        (**self).legal_boolean()
    }
    fn as_string(&self) -> Option<String> {
        (**self).as_string()
    }
    fn as_number(&self) -> Option<f64> {
        (**self).as_number()
    }
    fn as_boolean(&self) -> Option<bool> {
        (**self).as_boolean()
    }
}

/// Read-only mapping from parameter name to value
pub trait ParameterTable {
    /// The value type stored in the table
    type Value: ParameterValue + ?Sized;

    /// Look up a parameter by name
    fn lookup(&self, name: &str) -> Option<&Self::Value>;
}

impl<V: ParameterValue, S: BuildHasher> ParameterTable for HashMap<String, V, S> {
    type Value = V;

    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V: ParameterValue> ParameterTable for BTreeMap<String, V> {
    type Value = V;

    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<V: ParameterValue, S: BuildHasher> ParameterTable for IndexMap<String, V, S> {
    type Value = V;

    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }
}

impl<T: ParameterTable + ?Sized> ParameterTable for &T {
    type Value = T::Value;

    fn lookup(&self, name: &str) -> Option<&Self::Value> {
        (**self).lookup(name)
    }
}

/// Error converting external data into a [`ParamValue`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamValueError {
    /// The value is not a string, number or boolean scalar
    #[error("Unsupported parameter value {value}: expected a string, number or boolean")]
    Unsupported {
        /// Rendering of the rejected value
        value: String,
    },
}

/// A concrete parameter value with exactly one legal type
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// String parameter
    String(String),
    /// Numeric parameter
    Number(f64),
    /// Boolean parameter
    Boolean(bool),
}

impl ParamValue {
    /// The single legal type of this value
    pub fn value_type(&self) -> WantedType {
        match self {
            ParamValue::String(_) => WantedType::String,
            ParamValue::Number(_) => WantedType::Number,
            ParamValue::Boolean(_) => WantedType::Boolean,
        }
    }
}

impl ParameterValue for ParamValue {
    fn legal_string(&self) -> bool {
        matches!(self, ParamValue::String(_))
    }

    fn legal_number(&self) -> bool {
        matches!(self, ParamValue::Number(_))
    }

    fn legal_boolean(&self) -> bool {
        matches!(self, ParamValue::Boolean(_))
    }

    fn as_string(&self) -> Option<String> {
        match self {
            ParamValue::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn as_boolean(&self) -> Option<bool> {
        match self {
            ParamValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::String(s) => write!(f, "{s:?}"),
            ParamValue::Number(n) => write!(f, "{n}"),
            ParamValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

/// Integers beyond ±2^53 are rounded to the nearest representable `f64`
impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl TryFrom<JsonValue> for ParamValue {
    type Error = ParamValueError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::String(s) => Ok(ParamValue::String(s)),
            JsonValue::Bool(b) => Ok(ParamValue::Boolean(b)),
            JsonValue::Number(ref n) => match n.as_f64() {
                Some(f) => Ok(ParamValue::Number(f)),
                None => Err(ParamValueError::Unsupported {
                    value: value.to_string(),
                }),
            },
            other => Err(ParamValueError::Unsupported {
                value: other.to_string(),
            }),
        }
    }
}
