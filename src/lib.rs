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

//! Parameter expression resolution
//!
//! Deployment configuration values may embed small CEL-style templates such
//! as `{{ params.env == "prod" ? 3 : 1 }}`. This crate resolves them against a
//! table of named parameters to exactly one string, number or boolean.
//!
//! Only five shapes are supported:
//!
//! | Shape           | Example                                     |
//! |-----------------|---------------------------------------------|
//! | identity        | `{{ params.name }}`                         |
//! | equality        | `{{ params.count == 3 }}`                   |
//! | dual-equality   | `{{ params.a == params.b }}`                |
//! | ternary         | `{{ params.env == "prod" ? 3 : 1 }}`        |
//! | literal-ternary | `{{ params.debug ? "verbose" : "quiet" }}`  |
//!
//! ```
//! use std::collections::HashMap;
//! use paramexpr::{Literal, ParamValue, WantedType, resolve};
//!
//! let params = HashMap::from([("env".to_string(), ParamValue::from("prod"))]);
//! let replicas = resolve(WantedType::Number, r#"{{ params.env == "prod" ? 3 : 1 }}"#, &params)?;
//! assert_eq!(replicas, Literal::Number(3.0));
//! # Ok::<(), paramexpr::ResolveError>(())
//! ```

pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod parser;

pub use engine::{
    referenced_parameters, resolve, resolve_dual_equality, resolve_equality, resolve_identity,
    resolve_literal_ternary, resolve_shape, resolve_ternary,
};
pub use error::{ErrorKind, ResolveError, Result};
pub use model::{Literal, ParamValue, ParameterTable, ParameterValue, WantedType};
pub use parser::{Shape, ShapeKind, is_expression, parse};
