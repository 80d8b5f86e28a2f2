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

//! Identity evaluator

use super::lookup::ParameterLookup;
use crate::error::Result;
use crate::model::{Literal, ParameterTable, WantedType};
use crate::parser::Identity;

/// Specialized evaluator for bare parameter references
pub struct ReferenceEvaluator;

impl ReferenceEvaluator {
    /// Evaluate `params.NAME` as `wanted`
    pub fn evaluate_identity<T>(
        shape: Identity<'_>,
        wanted: WantedType,
        table: &T,
    ) -> Result<Literal>
    where
        T: ParameterTable + ?Sized,
    {
        ParameterLookup::resolve(shape.name, wanted, table)
    }
}
