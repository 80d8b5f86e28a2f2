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

//! Shape resolvers
//!
//! One specialized evaluator per family of shapes. Each takes an already
//! classified shape plus the parameter table and never mutates the table.

#![warn(missing_docs)]

pub mod comparison;
pub mod conditional;
pub mod lookup;
pub mod reference;

pub use comparison::ComparisonEvaluator;
pub use conditional::ConditionalEvaluator;
pub use lookup::ParameterLookup;
pub use reference::ReferenceEvaluator;
