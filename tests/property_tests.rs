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

use paramexpr::model::TypeCoercion;
use paramexpr::{ErrorKind, Literal, ParamValue, ShapeKind, WantedType, parse, resolve};
use proptest::prelude::*;
use std::collections::HashMap;

fn table(entries: Vec<(&str, ParamValue)>) -> HashMap<String, ParamValue> {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Any parameter value with its single legal type
fn param_value() -> impl Strategy<Value = ParamValue> {
    prop_oneof![
        "[a-z0-9 ]{0,12}".prop_map(ParamValue::String),
        (-1_000_000_i64..1_000_000).prop_map(ParamValue::from),
        any::<bool>().prop_map(ParamValue::Boolean),
    ]
}

fn expected_literal(value: &ParamValue) -> Literal {
    match value {
        ParamValue::String(s) => Literal::String(s.clone()),
        ParamValue::Number(n) => Literal::Number(*n),
        ParamValue::Boolean(b) => Literal::Boolean(*b),
    }
}

proptest! {
    /// Classification and resolution never panic on arbitrary input
    #[test]
    fn resolve_does_not_panic(s in "\\PC*") {
        let t = table(vec![("foo", ParamValue::from("bar"))]);
        let _ = resolve(WantedType::String, &s, &t);
    }

    #[test]
    fn identity_returns_parameter_value(value in param_value()) {
        let t = table(vec![("p", value.clone())]);
        let result = resolve(value.value_type(), "{{ params.p }}", &t).unwrap();
        prop_assert_eq!(result, expected_literal(&value));
    }

    #[test]
    fn identity_with_other_type_is_a_mismatch(value in param_value()) {
        let t = table(vec![("p", value.clone())]);
        for wanted in WantedType::PRIORITY {
            if wanted != value.value_type() {
                let err = resolve(wanted, "{{ params.p }}", &t).unwrap_err();
                prop_assert_eq!(err.kind(), ErrorKind::TypeMismatch);
            }
        }
    }

    #[test]
    fn number_equality_matches_value_equality(a in -1000_i64..1000, b in -1000_i64..1000) {
        let t = table(vec![("n", ParamValue::from(a))]);
        let expression = format!("{{{{ params.n == {b} }}}}");
        let result = resolve(WantedType::Boolean, &expression, &t).unwrap();
        prop_assert_eq!(result, Literal::Boolean(a == b));
    }

    #[test]
    fn string_equality_matches_value_equality(a in "[a-z]{0,4}", b in "[a-z]{0,4}") {
        let t = table(vec![("s", ParamValue::String(a.clone()))]);
        let expression = format!("{{{{ params.s == \"{b}\" }}}}");
        let result = resolve(WantedType::Boolean, &expression, &t).unwrap();
        prop_assert_eq!(result, Literal::Boolean(a == b));
    }

    #[test]
    fn dual_equality_with_mismatched_types_never_answers(
        left in param_value(),
        right in param_value(),
    ) {
        prop_assume!(left.value_type() != right.value_type());
        let t = table(vec![("a", left), ("b", right)]);
        let err = resolve(WantedType::Boolean, "{{ params.a == params.b }}", &t).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn ternary_selects_branch_by_condition(
        actual in "[a-z]{1,3}",
        compared in "[a-z]{1,3}",
        then_value in -100_i64..100,
        else_value in -100_i64..100,
    ) {
        let t = table(vec![
            ("s", ParamValue::String(actual.clone())),
            ("other", ParamValue::from(else_value)),
        ]);
        let expression =
            format!("{{{{ params.s == \"{compared}\" ? {then_value} : params.other }}}}");
        let expected = if actual == compared { then_value } else { else_value };
        let result = resolve(WantedType::Number, &expression, &t).unwrap();
        prop_assert_eq!(result, Literal::Number(expected as f64));
    }

    /// Whatever the branch text, a ternary is never read as an equality
    #[test]
    fn ternary_never_resolves_to_a_boolean(
        then_text in "[a-z0-9 \"\\\\?:.]{0,10}",
        else_text in "[a-z0-9 \"\\\\?:.]{0,10}",
    ) {
        let t = table(vec![("env", ParamValue::from("prod"))]);
        let expression = format!("{{{{ params.env == \"prod\" ? {then_text} : {else_text} }}}}");

        if let Ok(shape) = parse(&expression) {
            prop_assert_eq!(shape.kind(), ShapeKind::Ternary);
        }
        let result = resolve(WantedType::String, &expression, &t);
        prop_assert!(!matches!(result, Ok(Literal::Boolean(_))), "{}: {:?}", expression, result);
    }

    #[test]
    fn literal_ternary_selects_branch_by_flag(flag in any::<bool>()) {
        let t = table(vec![("flag", ParamValue::Boolean(flag))]);
        let result =
            resolve(WantedType::String, "{{ params.flag ? \"on\" : \"off\" }}", &t).unwrap();
        let expected = if flag { "on" } else { "off" };
        prop_assert_eq!(result, Literal::String(expected.to_string()));
    }

    #[test]
    fn number_literal_round_trips(x in any::<f64>().prop_filter("finite", |x| x.is_finite())) {
        let parsed = TypeCoercion::coerce_literal(WantedType::Number, &x.to_string()).unwrap();
        prop_assert_eq!(parsed, Literal::Number(x));
    }

    #[test]
    fn integer_literal_round_trips(n in -(1_i64 << 53)..(1_i64 << 53)) {
        let parsed = TypeCoercion::coerce_literal(WantedType::Number, &n.to_string()).unwrap();
        prop_assert_eq!(parsed.to_string(), n.to_string());
    }

    #[test]
    fn resolution_is_idempotent(value in param_value(), wanted_index in 0_usize..3) {
        let wanted = WantedType::PRIORITY[wanted_index];
        let t = table(vec![("p", value), ("flag", ParamValue::Boolean(true))]);
        for expression in [
            "{{ params.p }}",
            "{{ params.p == 1 }}",
            "{{ params.flag ? params.p : params.p }}",
        ] {
            prop_assert_eq!(resolve(wanted, expression, &t), resolve(wanted, expression, &t));
        }
    }
}
