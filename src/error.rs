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

//! Error types for parameter expression resolution
//!
//! Every failure is terminal: it points at a malformed expression or at
//! inconsistent parameter data, never at a transient condition.

use std::fmt;

use thiserror::Error;

use crate::model::WantedType;

/// Result type alias for resolution operations
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors that can occur while resolving an expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The expression does not have any of the supported shapes
    #[error("Unsupported expression '{expression}': {message}")]
    Structural {
        /// The offending expression text
        expression: String,
        /// Human-readable reason
        message: String,
    },

    /// A referenced parameter is not present in the parameter table
    #[error("Unresolvable reference: params.{name}")]
    UnresolvedReference {
        /// Name of the missing parameter
        name: String,
    },

    /// A parameter cannot be used as the requested type
    #[error("Illegal type coercion: {message}")]
    TypeMismatch {
        /// Human-readable type error message
        message: String,
    },

    /// Literal text does not parse as the requested type
    #[error("Malformed {wanted} literal '{text}'")]
    MalformedLiteral {
        /// The literal text as written in the expression
        text: String,
        /// The type the literal had to be read as
        wanted: WantedType,
    },

    /// A parameter used in a comparison exposes no legal type at all
    #[error("Cannot infer type of params.{name}: no legal type")]
    TypeInference {
        /// Name of the untyped parameter
        name: String,
    },
}

/// Fieldless error category, for matching without inspecting messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ResolveError::Structural`]
    Structural,
    /// See [`ResolveError::UnresolvedReference`]
    UnresolvedReference,
    /// See [`ResolveError::TypeMismatch`]
    TypeMismatch,
    /// See [`ResolveError::MalformedLiteral`]
    MalformedLiteral,
    /// See [`ResolveError::TypeInference`]
    TypeInference,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Structural => "structural",
            ErrorKind::UnresolvedReference => "unresolved-reference",
            ErrorKind::TypeMismatch => "type-mismatch",
            ErrorKind::MalformedLiteral => "malformed-literal",
            ErrorKind::TypeInference => "type-inference",
        };
        f.write_str(name)
    }
}

impl ResolveError {
    /// Create a structural error for the given expression
    pub fn structural(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Structural {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Create an unresolved reference error
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self::UnresolvedReference { name: name.into() }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            message: message.into(),
        }
    }

    /// Create a malformed literal error
    pub fn malformed(text: impl Into<String>, wanted: WantedType) -> Self {
        Self::MalformedLiteral {
            text: text.into(),
            wanted,
        }
    }

    /// Create a type inference error
    pub fn inference(name: impl Into<String>) -> Self {
        Self::TypeInference { name: name.into() }
    }

    /// The category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::Structural { .. } => ErrorKind::Structural,
            ResolveError::UnresolvedReference { .. } => ErrorKind::UnresolvedReference,
            ResolveError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            ResolveError::MalformedLiteral { .. } => ErrorKind::MalformedLiteral,
            ResolveError::TypeInference { .. } => ErrorKind::TypeInference,
        }
    }
}
