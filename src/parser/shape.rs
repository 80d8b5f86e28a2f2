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

//! Shape classification
//!
//! An expression is classified into one of five shapes by trying the fixed
//! templates in precedence order. The resulting [`Shape`] borrows its operands
//! from the input, so the expression text is scanned once per template at most.

use std::fmt;

use regex::Regex;

use super::patterns::{self, has_unquoted_question_mark, param_reference};
use crate::error::{ResolveError, Result};

/// `{{ params.NAME }}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity<'a> {
    /// Referenced parameter
    pub name: &'a str,
}

/// `{{ params.NAME == RHS }}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equality<'a> {
    /// Parameter on the left-hand side
    pub name: &'a str,
    /// Literal text on the right-hand side
    pub rhs: &'a str,
}

/// `{{ params.NAME == params.NAME2 }}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualEquality<'a> {
    /// Parameter on the left-hand side; its type drives the comparison
    pub left: &'a str,
    /// Parameter on the right-hand side
    pub right: &'a str,
}

/// `{{ params.NAME == RHS ? THEN : ELSE }}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ternary<'a> {
    /// Parameter compared in the condition
    pub name: &'a str,
    /// Literal text the parameter is compared against
    pub rhs: &'a str,
    /// Branch text selected when the condition holds
    pub then_branch: &'a str,
    /// Branch text selected otherwise
    pub else_branch: &'a str,
}

/// `{{ params.NAME ? THEN : ELSE }}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralTernary<'a> {
    /// Boolean parameter used as the condition
    pub name: &'a str,
    /// Branch text selected when the parameter is true
    pub then_branch: &'a str,
    /// Branch text selected otherwise
    pub else_branch: &'a str,
}

fn capture<'a, const N: usize>(regex: &Regex, expression: &'a str) -> Option<[&'a str; N]> {
    let caps = regex.captures(expression)?;
    let mut groups: [&'a str; N] = [""; N];
    for (i, group) in groups.iter_mut().enumerate() {
        *group = caps.get(i + 1)?.as_str();
    }
    Some(groups)
}

impl<'a> Identity<'a> {
    /// Match the identity template against the whole expression
    pub fn parse(expression: &'a str) -> Option<Self> {
        let [name] = capture::<1>(&patterns::IDENTITY, expression)?;
        Some(Self { name })
    }
}

impl<'a> Equality<'a> {
    /// Match the equality template against the whole expression
    ///
    /// A right-hand side with a `?` outside string literals is a ternary whose
    /// operands did not parse, and is not an equality.
    pub fn parse(expression: &'a str) -> Option<Self> {
        let [name, rhs] = capture::<2>(&patterns::EQUALITY, expression)?;
        if has_unquoted_question_mark(rhs) {
            return None;
        }
        Some(Self { name, rhs })
    }
}

impl<'a> DualEquality<'a> {
    /// Match the dual-equality template against the whole expression
    pub fn parse(expression: &'a str) -> Option<Self> {
        let [left, right] = capture::<2>(&patterns::DUAL_EQUALITY, expression)?;
        Some(Self { left, right })
    }
}

impl<'a> Ternary<'a> {
    /// Match the ternary template against the whole expression
    pub fn parse(expression: &'a str) -> Option<Self> {
        let [name, rhs, then_branch, else_branch] = capture::<4>(&patterns::TERNARY, expression)?;
        Some(Self {
            name,
            rhs,
            then_branch,
            else_branch,
        })
    }

    /// The equality forming the condition
    pub fn condition(&self) -> Equality<'a> {
        Equality {
            name: self.name,
            rhs: self.rhs,
        }
    }
}

impl<'a> LiteralTernary<'a> {
    /// Match the literal-ternary template against the whole expression
    pub fn parse(expression: &'a str) -> Option<Self> {
        let [name, then_branch, else_branch] =
            capture::<3>(&patterns::LITERAL_TERNARY, expression)?;
        Some(Self {
            name,
            then_branch,
            else_branch,
        })
    }
}

/// Fieldless shape tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// See [`Identity`]
    Identity,
    /// See [`Equality`]
    Equality,
    /// See [`DualEquality`]
    DualEquality,
    /// See [`Ternary`]
    Ternary,
    /// See [`LiteralTernary`]
    LiteralTernary,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::Identity => "identity",
            ShapeKind::Equality => "equality",
            ShapeKind::DualEquality => "dual-equality",
            ShapeKind::Ternary => "ternary",
            ShapeKind::LiteralTernary => "literal-ternary",
        };
        f.write_str(name)
    }
}

/// A classified expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
    /// Bare parameter reference
    Identity(Identity<'a>),
    /// Parameter compared to a literal
    Equality(Equality<'a>),
    /// Parameter compared to another parameter
    DualEquality(DualEquality<'a>),
    /// Equality condition selecting between two branches
    Ternary(Ternary<'a>),
    /// Boolean parameter selecting between two branches
    LiteralTernary(LiteralTernary<'a>),
}

impl<'a> Shape<'a> {
    /// Classify an expression
    ///
    /// Templates are tried in the order identity, ternary, literal-ternary,
    /// dual-equality, equality. Ternaries must win over the equality template,
    /// whose free-text right-hand side would otherwise swallow `? THEN : ELSE`,
    /// and dual-equality is a special case of equality.
    pub fn classify(expression: &'a str) -> Result<Self> {
        let shape = if let Some(shape) = Identity::parse(expression) {
            Shape::Identity(shape)
        } else if let Some(shape) = Ternary::parse(expression) {
            Shape::Ternary(shape)
        } else if let Some(shape) = LiteralTernary::parse(expression) {
            Shape::LiteralTernary(shape)
        } else if let Some(shape) = DualEquality::parse(expression) {
            Shape::DualEquality(shape)
        } else if let Some(shape) = Equality::parse(expression) {
            Shape::Equality(shape)
        } else {
            return Err(ResolveError::structural(
                expression,
                "expression does not match any supported form",
            ));
        };

        log::trace!("classified '{expression}' as {}", shape.kind());
        Ok(shape)
    }

    /// The shape tag
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Identity(_) => ShapeKind::Identity,
            Shape::Equality(_) => ShapeKind::Equality,
            Shape::DualEquality(_) => ShapeKind::DualEquality,
            Shape::Ternary(_) => ShapeKind::Ternary,
            Shape::LiteralTernary(_) => ShapeKind::LiteralTernary,
        }
    }

    /// Parameter names referenced anywhere in the expression, including
    /// branch texts, in order of appearance and without duplicates
    pub fn parameters(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = Vec::new();
        let mut push = |name: &'a str| {
            if !names.contains(&name) {
                names.push(name);
            }
        };

        match *self {
            Shape::Identity(Identity { name }) | Shape::Equality(Equality { name, .. }) => {
                push(name);
            }
            Shape::DualEquality(DualEquality { left, right }) => {
                push(left);
                push(right);
            }
            Shape::Ternary(Ternary {
                name,
                then_branch,
                else_branch,
                ..
            })
            | Shape::LiteralTernary(LiteralTernary {
                name,
                then_branch,
                else_branch,
            }) => {
                push(name);
                for branch in [then_branch, else_branch] {
                    if let Some(reference) = param_reference(branch) {
                        push(reference);
                    }
                }
            }
        }

        names
    }
}
