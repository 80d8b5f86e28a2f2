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

//! Fixed pattern templates for the supported expression shapes
//!
//! Every template is anchored at both ends: a shape either matches the whole
//! expression or not at all.

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening marker of every expression
pub const OPEN_MARKER: &str = "{{";
/// Closing marker of every expression
pub const CLOSE_MARKER: &str = "}}";
/// Prefix of a parameter reference
pub const PARAM_PREFIX: &str = "params.";

/// Parameter name
const NAME: &str = r"[A-Za-z_][A-Za-z0-9_-]*";

/// Ternary operand: a double-quoted string, in which `\"` does not close the
/// string, or bare text free of quotes and the `?`/`:` separators. Bare text
/// may contain inner whitespace; coercion rejects it later.
const OPERAND: &str = r#""(?:[^"\\]|\\.)*"|[^\s?:"](?:[^?:"]*[^\s?:"])?"#;

/// `params.(NAME)`
fn reference() -> String {
    format!("{}({NAME})", regex::escape(PARAM_PREFIX))
}

fn compile(body: &str) -> Regex {
    let pattern = format!(r"^\{{\{{\s*{body}\s*\}}\}}$");
    Regex::new(&pattern).expect("built-in shape pattern is valid")
}

/// `{{ params.NAME }}`
pub(crate) static IDENTITY: Lazy<Regex> = Lazy::new(|| compile(&reference()));

/// `{{ params.NAME == RHS ? THEN : ELSE }}`
pub(crate) static TERNARY: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"{}\s*==\s*({OPERAND})\s*\?\s*({OPERAND})\s*:\s*({OPERAND})",
        reference()
    ))
});

/// `{{ params.NAME ? THEN : ELSE }}`
pub(crate) static LITERAL_TERNARY: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(r"{}\s*\?\s*({OPERAND})\s*:\s*({OPERAND})", reference()))
});

/// `{{ params.NAME == params.NAME2 }}`
pub(crate) static DUAL_EQUALITY: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"{0}\s*==\s*{0}", reference())));

/// `{{ params.NAME == RHS }}`, RHS being any text
pub(crate) static EQUALITY: Lazy<Regex> =
    Lazy::new(|| compile(&format!(r"{}\s*==\s*(.+?)", reference())));

static PARAM_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\s*{}\s*$", reference())).expect("built-in reference pattern is valid")
});

/// If `text` is a bare parameter reference (`params.NAME`), return the name
pub fn param_reference(text: &str) -> Option<&str> {
    PARAM_REFERENCE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether `text` holds a `?` outside double-quoted strings
///
/// A backslash inside a string escapes the next character, as in ternary
/// operands.
pub(crate) fn has_unquoted_question_mark(text: &str) -> bool {
    let mut in_string = false;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '"' => in_string = !in_string,
            '\\' if in_string => {
                chars.next();
            }
            '?' if !in_string => return true,
            _ => {}
        }
    }
    false
}

/// Whether `text` is wrapped in the expression markers
///
/// This says nothing about whether the content has a supported shape.
pub fn is_expression(text: &str) -> bool {
    text.len() >= OPEN_MARKER.len() + CLOSE_MARKER.len()
        && text.starts_with(OPEN_MARKER)
        && text.ends_with(CLOSE_MARKER)
}
