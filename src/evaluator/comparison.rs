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

//! Equality evaluator
//!
//! Both equality forms compare values of a single inferred type and always
//! produce a boolean. The type comes from the left-hand parameter.

use super::lookup::ParameterLookup;
use crate::error::{ResolveError, Result};
use crate::model::{ParameterTable, ParameterValue, TypeCoercion};
use crate::parser::{DualEquality, Equality};

/// Specialized evaluator for the equality shapes
pub struct ComparisonEvaluator;

impl ComparisonEvaluator {
    /// Evaluate `params.NAME == RHS`
    ///
    /// RHS is read as a literal of the parameter's inferred type.
    pub fn evaluate_equality<T>(shape: Equality<'_>, table: &T) -> Result<bool>
    where
        T: ParameterTable + ?Sized,
    {
        let value = ParameterLookup::find(shape.name, table)?;
        let ty = ParameterLookup::infer_type(shape.name, value)?;

        let left = ParameterLookup::read_as(shape.name, value, ty)?;
        let right = TypeCoercion::coerce_literal(ty, shape.rhs)?;

        log::trace!("params.{} == {}: {left:?} vs {right:?}", shape.name, shape.rhs);
        Ok(left == right)
    }

    /// Evaluate `params.NAME == params.NAME2`
    ///
    /// The right-hand parameter must be legal as the left-hand parameter's
    /// inferred type.
    pub fn evaluate_dual_equality<T>(shape: DualEquality<'_>, table: &T) -> Result<bool>
    where
        T: ParameterTable + ?Sized,
    {
        let left_value = ParameterLookup::find(shape.left, table)?;
        let right_value = ParameterLookup::find(shape.right, table)?;

        let ty = ParameterLookup::infer_type(shape.left, left_value)?;
        if !right_value.is_legal(ty) {
            return Err(ResolveError::type_mismatch(format!(
                "cannot compare params.{} ({ty}) with params.{}",
                shape.left, shape.right
            )));
        }

        let left = ParameterLookup::read_as(shape.left, left_value, ty)?;
        let right = ParameterLookup::read_as(shape.right, right_value, ty)?;

        log::trace!(
            "params.{} == params.{}: {left:?} vs {right:?}",
            shape.left,
            shape.right
        );
        Ok(left == right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::ParamValue;
    use std::collections::HashMap;

    fn table() -> HashMap<String, ParamValue> {
        HashMap::from([
            ("foo".to_string(), ParamValue::from("x")),
            ("same".to_string(), ParamValue::from("x")),
            ("count".to_string(), ParamValue::from(24.0)),
            ("other".to_string(), ParamValue::from(7.0)),
            ("flag".to_string(), ParamValue::from(true)),
        ])
    }

    fn equality<'a>(name: &'a str, rhs: &'a str) -> Equality<'a> {
        Equality { name, rhs }
    }

    fn dual<'a>(left: &'a str, right: &'a str) -> DualEquality<'a> {
        DualEquality { left, right }
    }

    #[test]
    fn test_equality_uses_inferred_type() {
        let table = table();
        assert!(ComparisonEvaluator::evaluate_equality(equality("count", "24"), &table).unwrap());
        assert!(ComparisonEvaluator::evaluate_equality(equality("count", "24.0"), &table).unwrap());
        assert!(!ComparisonEvaluator::evaluate_equality(equality("count", "25"), &table).unwrap());
        assert!(ComparisonEvaluator::evaluate_equality(equality("foo", "\"x\""), &table).unwrap());
        assert!(!ComparisonEvaluator::evaluate_equality(equality("foo", "\"y\""), &table).unwrap());
        assert!(ComparisonEvaluator::evaluate_equality(equality("flag", "true"), &table).unwrap());
        assert!(
            !ComparisonEvaluator::evaluate_equality(equality("flag", "false"), &table).unwrap()
        );
    }

    #[test]
    fn test_equality_rejects_rhs_of_other_type() {
        let table = table();
        // A string parameter needs a quoted right-hand side
        let err = ComparisonEvaluator::evaluate_equality(equality("foo", "x"), &table).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLiteral);

        let err = ComparisonEvaluator::evaluate_equality(equality("count", "\"24\""), &table)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedLiteral);
    }

    #[test]
    fn test_equality_missing_parameter() {
        let err =
            ComparisonEvaluator::evaluate_equality(equality("missing", "1"), &table()).unwrap_err();
        assert_eq!(err, ResolveError::unresolved("missing"));
    }

    #[test]
    fn test_dual_equality() {
        let table = table();
        assert!(ComparisonEvaluator::evaluate_dual_equality(dual("foo", "same"), &table).unwrap());
        assert!(
            !ComparisonEvaluator::evaluate_dual_equality(dual("count", "other"), &table).unwrap()
        );
    }

    #[test]
    fn test_dual_equality_type_mismatch() {
        let err = ComparisonEvaluator::evaluate_dual_equality(dual("foo", "count"), &table())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_dual_equality_missing_right() {
        let err =
            ComparisonEvaluator::evaluate_dual_equality(dual("foo", "gone"), &table()).unwrap_err();
        assert_eq!(err, ResolveError::unresolved("gone"));
    }
}
