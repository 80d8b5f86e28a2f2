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

//! Literal coercion: reading raw literal text as a typed value

use super::types::WantedType;
use super::value::Literal;
use crate::error::{ResolveError, Result};
use crate::parser::param_reference;

/// Converts literal text written inside an expression into a [`Literal`]
pub struct TypeCoercion;

impl TypeCoercion {
    /// Read `text` as a literal of type `wanted`
    ///
    /// Parameter references are never accepted here, even if the referenced
    /// parameter would coerce cleanly.
    pub fn coerce_literal(wanted: WantedType, text: &str) -> Result<Literal> {
        if param_reference(text).is_some() {
            return Err(ResolveError::malformed(text, wanted));
        }

        match wanted {
            WantedType::Number => Self::coerce_to_number(text),
            WantedType::String => Self::coerce_to_string(text),
            WantedType::Boolean => Self::coerce_to_boolean(text),
        }
    }

    /// Parse a number literal; surrounding whitespace is ignored
    pub fn coerce_to_number(text: &str) -> Result<Literal> {
        let trimmed = text.trim();
        match trimmed.parse::<f64>() {
            // `inf`, `NaN` and overflowing exponents parse, but are not numbers here
            Ok(n) if n.is_finite() => Ok(Literal::Number(n)),
            _ => Err(ResolveError::malformed(text, WantedType::Number)),
        }
    }

    /// Strip a matching pair of double quotes; no escape processing
    pub fn coerce_to_string(text: &str) -> Result<Literal> {
        text.strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
            .map(|inner| Literal::String(inner.to_string()))
            .ok_or_else(|| ResolveError::malformed(text, WantedType::String))
    }

    /// Accept exactly `true` or `false`
    pub fn coerce_to_boolean(text: &str) -> Result<Literal> {
        match text {
            "true" => Ok(Literal::Boolean(true)),
            "false" => Ok(Literal::Boolean(false)),
            _ => Err(ResolveError::malformed(text, WantedType::Boolean)),
        }
    }
}
