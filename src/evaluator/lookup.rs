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

//! Parameter lookup and typed reads

use crate::error::{ResolveError, Result};
use crate::model::{Literal, ParameterTable, ParameterValue, WantedType};

/// Resolves parameter names against a caller-supplied table
pub struct ParameterLookup;

impl ParameterLookup {
    /// Resolve `name` as a literal of type `wanted`
    pub fn resolve<T>(name: &str, wanted: WantedType, table: &T) -> Result<Literal>
    where
        T: ParameterTable + ?Sized,
    {
        let value = Self::find(name, table)?;
        Self::read_as(name, value, wanted)
    }

    /// Find a parameter, failing if the table lacks it
    pub fn find<'t, T>(name: &str, table: &'t T) -> Result<&'t T::Value>
    where
        T: ParameterTable + ?Sized,
    {
        table
            .lookup(name)
            .ok_or_else(|| ResolveError::unresolved(name))
    }

    /// Read a parameter value as `ty`, enforcing its legality flag
    pub fn read_as<V>(name: &str, value: &V, ty: WantedType) -> Result<Literal>
    where
        V: ParameterValue + ?Sized,
    {
        if !value.is_legal(ty) {
            return Err(ResolveError::type_mismatch(format!(
                "params.{name} cannot be used as {ty} (legal types: {})",
                describe_types(&value.legal_types())
            )));
        }

        let literal = match ty {
            WantedType::String => value.as_string().map(Literal::String),
            WantedType::Number => value.as_number().map(Literal::Number),
            WantedType::Boolean => value.as_boolean().map(Literal::Boolean),
        };

        literal.ok_or_else(|| {
            ResolveError::type_mismatch(format!(
                "params.{name} is marked as {ty} but yields no {ty} value"
            ))
        })
    }

    /// Infer the type of a parameter from its legality flags
    ///
    /// The first legal type in string, number, boolean order wins. A parameter
    /// with several legal types is logged as ambiguous.
    pub fn infer_type<V>(name: &str, value: &V) -> Result<WantedType>
    where
        V: ParameterValue + ?Sized,
    {
        let legal = value.legal_types();
        if legal.len() > 1 {
            log::warn!(
                "params.{name} has several legal types ({}); comparing as {}",
                describe_types(&legal),
                legal[0]
            );
        }

        legal
            .first()
            .copied()
            .ok_or_else(|| ResolveError::inference(name))
    }
}

fn describe_types(types: &[WantedType]) -> String {
    if types.is_empty() {
        return "none".to_string();
    }
    types
        .iter()
        .map(WantedType::type_name)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::ParamValue;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Records every warning so diagnostics can be asserted
    struct CaptureLogger;

    static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());
    static LOGGER: CaptureLogger = CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record<'_>) {
            if self.enabled(record.metadata()) {
                if let Ok(mut warnings) = WARNINGS.lock() {
                    warnings.push(record.args().to_string());
                }
            }
        }

        fn flush(&self) {}
    }

    fn install_logger() {
        // Fails harmlessly if already installed
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Warn);
    }

    fn warnings_about(name: &str) -> Vec<String> {
        let needle = format!("params.{name} ");
        WARNINGS
            .lock()
            .map(|warnings| {
                warnings
                    .iter()
                    .filter(|w| w.starts_with(&needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// A parameter whose flags and accessors are set independently
    struct Flags {
        string: Option<String>,
        number: Option<f64>,
        boolean: Option<bool>,
    }

    impl ParameterValue for Flags {
        fn legal_string(&self) -> bool {
            self.string.is_some()
        }
        fn legal_number(&self) -> bool {
            self.number.is_some()
        }
        fn legal_boolean(&self) -> bool {
            self.boolean.is_some()
        }
        fn as_string(&self) -> Option<String> {
            self.string.clone()
        }
        fn as_number(&self) -> Option<f64> {
            self.number
        }
        fn as_boolean(&self) -> Option<bool> {
            self.boolean
        }
    }

    fn table() -> HashMap<String, ParamValue> {
        HashMap::from([
            ("foo".to_string(), ParamValue::from("bar")),
            ("count".to_string(), ParamValue::from(24.0)),
        ])
    }

    #[test]
    fn test_resolve_present_parameter() {
        assert_eq!(
            ParameterLookup::resolve("foo", WantedType::String, &table()).unwrap(),
            Literal::String("bar".to_string())
        );
        assert_eq!(
            ParameterLookup::resolve("count", WantedType::Number, &table()).unwrap(),
            Literal::Number(24.0)
        );
    }

    #[test]
    fn test_resolve_missing_parameter() {
        let err = ParameterLookup::resolve("nope", WantedType::String, &table()).unwrap_err();
        assert_eq!(err, ResolveError::unresolved("nope"));
    }

    #[test]
    fn test_resolve_illegal_coercion() {
        let err = ParameterLookup::resolve("count", WantedType::String, &table()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert!(err.to_string().contains("params.count"));
    }

    #[test]
    fn test_infer_type_priority() {
        let both = Flags {
            string: Some("1".to_string()),
            number: Some(1.0),
            boolean: None,
        };
        assert_eq!(ParameterLookup::infer_type("x", &both).unwrap(), WantedType::String);

        let number_and_bool = Flags {
            string: None,
            number: Some(0.0),
            boolean: Some(false),
        };
        assert_eq!(
            ParameterLookup::infer_type("x", &number_and_bool).unwrap(),
            WantedType::Number
        );

        let none = Flags {
            string: None,
            number: None,
            boolean: None,
        };
        assert_eq!(
            ParameterLookup::infer_type("x", &none).unwrap_err(),
            ResolveError::inference("x")
        );
    }

    #[test]
    fn test_infer_type_warns_on_ambiguous_flags() {
        install_logger();

        let ambiguous = Flags {
            string: Some("0".to_string()),
            number: Some(0.0),
            boolean: Some(false),
        };
        assert_eq!(
            ParameterLookup::infer_type("ambiguous_flags", &ambiguous).unwrap(),
            WantedType::String
        );
        let warnings = warnings_about("ambiguous_flags");
        assert_eq!(warnings.len(), 1, "{warnings:?}");
        assert!(warnings[0].contains("string, number, boolean"));
        assert!(warnings[0].ends_with("comparing as string"));

        let single = Flags {
            string: None,
            number: Some(1.0),
            boolean: None,
        };
        assert_eq!(
            ParameterLookup::infer_type("single_flag", &single).unwrap(),
            WantedType::Number
        );
        assert!(warnings_about("single_flag").is_empty());
    }
}
