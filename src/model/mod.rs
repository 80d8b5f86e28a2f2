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

//! Data model for parameter expressions
//!
//! This module provides the value types flowing through resolution: the
//! caller-facing parameter abstractions, the wanted type tag and the
//! resolved literal.

#![warn(missing_docs)]

pub mod param;
pub mod type_coercion;
pub mod types;
pub mod value;

pub use param::{ParamValue, ParamValueError, ParameterTable, ParameterValue};
pub use type_coercion::TypeCoercion;
pub use types::WantedType;
pub use value::Literal;
