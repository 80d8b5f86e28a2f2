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

//! Parameter expression shape matcher
//!
//! There is no grammar here: the language only has five fixed forms, each
//! recognized by an anchored regular expression template.

#![warn(missing_docs)]

pub mod patterns;
pub mod shape;

pub use patterns::{CLOSE_MARKER, OPEN_MARKER, PARAM_PREFIX, is_expression, param_reference};
pub use shape::{DualEquality, Equality, Identity, LiteralTernary, Shape, ShapeKind, Ternary};

/// Classify an expression string into its shape
pub fn parse(expression: &str) -> crate::error::Result<Shape<'_>> {
    Shape::classify(expression)
}
