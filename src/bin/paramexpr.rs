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

//! Simple CLI for parameter expression resolution
//!
//! Resolves a single expression against parameters read from a JSON file
//! and/or `--set NAME=VALUE` flags.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use paramexpr::{ParamValue, Shape, WantedType, parse, referenced_parameters, resolve};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "paramexpr")]
#[command(about = "Resolve parameter expressions embedded in deployment configuration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct ParamArgs {
    /// JSON file containing an object of parameter values
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Inline parameter, overriding the file (repeatable)
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve an expression to a single literal
    Resolve {
        /// Expression to resolve, e.g. '{{ params.env }}'
        expression: String,
        #[command(flatten)]
        params: ParamArgs,
        /// Type the result must have: string, number or boolean
        #[arg(short = 't', long = "type", default_value = "string")]
        wanted: WantedType,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify an expression and print its shape
    Parse {
        /// Expression to classify
        expression: String,
    },
    /// Check that every referenced parameter is supplied
    Check {
        /// Expression to check
        expression: String,
        #[command(flatten)]
        params: ParamArgs,
    },
}

fn main() {
    human_panic::setup_panic!();

    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("{} {e:#}", "✗".red());
        process::exit(1);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Resolve {
            expression,
            params,
            wanted,
            json,
        } => {
            let table = load_params(&params)?;
            let literal = resolve(wanted, &expression, &table)?;
            if json {
                println!("{}", serde_json::to_string(&literal)?);
            } else {
                println!("{literal}");
            }
        }
        Commands::Parse { expression } => {
            let shape = parse(&expression)?;
            println!("{} {}", "✓".green(), shape.kind());
            print_operands(&shape);
        }
        Commands::Check { expression, params } => {
            let table = load_params(&params)?;
            let names = referenced_parameters(&expression)?;
            let missing: Vec<&str> = names
                .iter()
                .copied()
                .filter(|name| !table.contains_key(*name))
                .collect();
            if !missing.is_empty() {
                bail!("missing parameters: {}", missing.join(", "));
            }
            println!("{} all parameters supplied", "✓".green());
            for name in names {
                if let Some(value) = table.get(name) {
                    println!("  {name} = {value}");
                }
            }
        }
    }
    Ok(())
}

fn print_operands(shape: &Shape<'_>) {
    match shape {
        Shape::Identity(s) => println!("  name: {}", s.name),
        Shape::Equality(s) => {
            println!("  name: {}", s.name);
            println!("  rhs:  {}", s.rhs);
        }
        Shape::DualEquality(s) => {
            println!("  left:  {}", s.left);
            println!("  right: {}", s.right);
        }
        Shape::Ternary(s) => {
            println!("  name: {}", s.name);
            println!("  rhs:  {}", s.rhs);
            println!("  then: {}", s.then_branch);
            println!("  else: {}", s.else_branch);
        }
        Shape::LiteralTernary(s) => {
            println!("  name: {}", s.name);
            println!("  then: {}", s.then_branch);
            println!("  else: {}", s.else_branch);
        }
    }
}

fn load_params(args: &ParamArgs) -> Result<IndexMap<String, ParamValue>> {
    let mut table = IndexMap::new();

    if let Some(path) = &args.params {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading parameter file '{}'", path.display()))?;
        let object: serde_json::Map<String, JsonValue> = serde_json::from_str(&content)
            .with_context(|| format!("parsing parameter file '{}'", path.display()))?;
        for (name, value) in object {
            let value = ParamValue::try_from(value)
                .with_context(|| format!("parameter '{name}' in '{}'", path.display()))?;
            table.insert(name, value);
        }
    }

    for assignment in &args.set {
        let (name, value) = parse_assignment(assignment)?;
        table.insert(name.to_string(), value);
    }

    log::debug!("loaded {} parameters", table.len());
    Ok(table)
}

fn parse_assignment(assignment: &str) -> Result<(&str, ParamValue)> {
    let Some((name, raw)) = assignment.split_once('=') else {
        bail!("invalid --set '{assignment}', expected NAME=VALUE");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("invalid --set '{assignment}', parameter name is empty");
    }
    Ok((name, parse_inline_value(raw)))
}

/// JSON scalars keep their type; anything else is taken as a raw string
fn parse_inline_value(raw: &str) -> ParamValue {
    serde_json::from_str::<JsonValue>(raw)
        .ok()
        .and_then(|json| ParamValue::try_from(json).ok())
        .unwrap_or_else(|| ParamValue::String(raw.to_string()))
}
