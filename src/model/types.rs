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

//! Primitive type tags

use std::fmt;
use std::str::FromStr;

/// The primitive type a resolution must produce
///
/// Also used as the inferred type of a parameter when an equality compares it
/// against a literal or another parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WantedType {
    /// Text value
    String,
    /// Numeric value (IEEE-754 double)
    Number,
    /// Boolean value (true/false)
    Boolean,
}

impl WantedType {
    /// All types, in the priority order used for type inference
    pub const PRIORITY: [WantedType; 3] =
        [WantedType::String, WantedType::Number, WantedType::Boolean];

    /// Lowercase type name
    pub fn type_name(&self) -> &'static str {
        match self {
            WantedType::String => "string",
            WantedType::Number => "number",
            WantedType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for WantedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for WantedType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "string" | "str" => Ok(WantedType::String),
            "number" | "num" => Ok(WantedType::Number),
            "boolean" | "bool" => Ok(WantedType::Boolean),
            other => Err(format!(
                "unknown type '{other}', expected one of: string, number, boolean"
            )),
        }
    }
}
