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

//! Conditional (ternary) evaluator

use super::comparison::ComparisonEvaluator;
use super::lookup::ParameterLookup;
use crate::error::{ResolveError, Result};
use crate::model::{Literal, ParameterTable, ParameterValue, TypeCoercion, WantedType};
use crate::parser::{LiteralTernary, Ternary, param_reference};

/// Specialized evaluator for the two ternary shapes
pub struct ConditionalEvaluator;

impl ConditionalEvaluator {
    /// Evaluate `params.NAME == RHS ? THEN : ELSE`
    pub fn evaluate_ternary<T>(shape: Ternary<'_>, wanted: WantedType, table: &T) -> Result<Literal>
    where
        T: ParameterTable + ?Sized,
    {
        let condition = ComparisonEvaluator::evaluate_equality(shape.condition(), table)?;
        let branch = if condition {
            shape.then_branch
        } else {
            shape.else_branch
        };

        log::trace!("ternary on params.{} took '{branch}'", shape.name);
        Self::resolve_branch(branch, wanted, table)
    }

    /// Evaluate `params.NAME ? THEN : ELSE`
    ///
    /// The condition parameter must itself be boolean; its type is not inferred.
    pub fn evaluate_literal_ternary<T>(
        shape: LiteralTernary<'_>,
        wanted: WantedType,
        table: &T,
    ) -> Result<Literal>
    where
        T: ParameterTable + ?Sized,
    {
        let value = ParameterLookup::find(shape.name, table)?;
        if !value.legal_boolean() {
            return Err(ResolveError::type_mismatch(format!(
                "params.{} is used as a condition but is not a boolean",
                shape.name
            )));
        }

        let condition = value.as_boolean().ok_or_else(|| {
            ResolveError::type_mismatch(format!(
                "params.{} is marked as boolean but yields no boolean value",
                shape.name
            ))
        })?;
        let branch = if condition {
            shape.then_branch
        } else {
            shape.else_branch
        };

        log::trace!("literal ternary on params.{} took '{branch}'", shape.name);
        Self::resolve_branch(branch, wanted, table)
    }

    /// Resolve a branch: a parameter reference is looked up, anything else is
    /// read as a literal
    pub fn resolve_branch<T>(text: &str, wanted: WantedType, table: &T) -> Result<Literal>
    where
        T: ParameterTable + ?Sized,
    {
        match param_reference(text) {
            Some(name) => ParameterLookup::resolve(name, wanted, table),
            None => TypeCoercion::coerce_literal(wanted, text),
        }
    }
}
