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

//! Resolution entry point
//!
//! Resolution is a pure function of the expression text and the parameter
//! table: nothing is cached, so every call re-classifies the expression.

use crate::error::{ResolveError, Result};
use crate::evaluator::{ComparisonEvaluator, ConditionalEvaluator, ReferenceEvaluator};
use crate::model::{Literal, ParameterTable, WantedType};
use crate::parser::{DualEquality, Equality, Identity, LiteralTernary, Shape, ShapeKind, Ternary};

/// Resolve an expression to a single literal
///
/// Equality and dual-equality expressions always produce a boolean, whatever
/// `wanted` says; the other shapes produce a literal of type `wanted`.
pub fn resolve<T>(wanted: WantedType, expression: &str, table: &T) -> Result<Literal>
where
    T: ParameterTable + ?Sized,
{
    let shape = Shape::classify(expression)?;
    let result = resolve_shape(shape, wanted, table);

    match &result {
        Ok(literal) => log::debug!("resolved {} '{expression}' to {literal:?}", shape.kind()),
        Err(e) => log::debug!("failed to resolve {} '{expression}': {e}", shape.kind()),
    }
    result
}

/// Resolve an already classified expression
pub fn resolve_shape<T>(shape: Shape<'_>, wanted: WantedType, table: &T) -> Result<Literal>
where
    T: ParameterTable + ?Sized,
{
    match shape {
        Shape::Identity(shape) => ReferenceEvaluator::evaluate_identity(shape, wanted, table),
        Shape::Ternary(shape) => ConditionalEvaluator::evaluate_ternary(shape, wanted, table),
        Shape::LiteralTernary(shape) => {
            ConditionalEvaluator::evaluate_literal_ternary(shape, wanted, table)
        }
        Shape::DualEquality(shape) => {
            ComparisonEvaluator::evaluate_dual_equality(shape, table).map(Literal::Boolean)
        }
        Shape::Equality(shape) => {
            ComparisonEvaluator::evaluate_equality(shape, table).map(Literal::Boolean)
        }
    }
}

fn shape_mismatch(kind: ShapeKind, expression: &str) -> ResolveError {
    ResolveError::structural(expression, format!("expression is not of the {kind} form"))
}

/// Resolve `{{ params.NAME }}`
pub fn resolve_identity<T>(wanted: WantedType, expression: &str, table: &T) -> Result<Literal>
where
    T: ParameterTable + ?Sized,
{
    let shape =
        Identity::parse(expression).ok_or_else(|| shape_mismatch(ShapeKind::Identity, expression))?;
    ReferenceEvaluator::evaluate_identity(shape, wanted, table)
}

/// Resolve `{{ params.NAME == RHS }}`
pub fn resolve_equality<T>(expression: &str, table: &T) -> Result<bool>
where
    T: ParameterTable + ?Sized,
{
    let shape =
        Equality::parse(expression).ok_or_else(|| shape_mismatch(ShapeKind::Equality, expression))?;
    ComparisonEvaluator::evaluate_equality(shape, table)
}

/// Resolve `{{ params.NAME == params.NAME2 }}`
pub fn resolve_dual_equality<T>(expression: &str, table: &T) -> Result<bool>
where
    T: ParameterTable + ?Sized,
{
    let shape = DualEquality::parse(expression)
        .ok_or_else(|| shape_mismatch(ShapeKind::DualEquality, expression))?;
    ComparisonEvaluator::evaluate_dual_equality(shape, table)
}

/// Resolve `{{ params.NAME == RHS ? THEN : ELSE }}`
pub fn resolve_ternary<T>(wanted: WantedType, expression: &str, table: &T) -> Result<Literal>
where
    T: ParameterTable + ?Sized,
{
    let shape =
        Ternary::parse(expression).ok_or_else(|| shape_mismatch(ShapeKind::Ternary, expression))?;
    ConditionalEvaluator::evaluate_ternary(shape, wanted, table)
}

/// Resolve `{{ params.NAME ? THEN : ELSE }}`
pub fn resolve_literal_ternary<T>(
    wanted: WantedType,
    expression: &str,
    table: &T,
) -> Result<Literal>
where
    T: ParameterTable + ?Sized,
{
    let shape = LiteralTernary::parse(expression)
        .ok_or_else(|| shape_mismatch(ShapeKind::LiteralTernary, expression))?;
    ConditionalEvaluator::evaluate_literal_ternary(shape, wanted, table)
}

/// Names of the parameters an expression references
pub fn referenced_parameters(expression: &str) -> Result<Vec<&str>> {
    Shape::classify(expression).map(|shape| shape.parameters())
}
