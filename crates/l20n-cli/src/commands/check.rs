//! Implementation of the `l20n check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use l20n::parser::{parse_resource, Item};
use miette::{miette, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::output::ResourceDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check (.l20n)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for a single checked file.
#[derive(Serialize)]
struct CheckResult {
    file: String,
    ok: bool,
    entities: usize,
    imports: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut results = Vec::new();
    let mut any_failed = false;

    for file in &args.files {
        let content = read_to_string(file)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read {}: {}", file.display(), e))?;

        match parse_resource(&content) {
            Ok(items) => {
                let entities = items
                    .iter()
                    .filter(|item| matches!(item, Item::Entity(_)))
                    .count();
                let imports = items.len() - entities;
                if !args.json {
                    println!(
                        "{} {}: {} entities, {} imports",
                        "ok".green(),
                        file.display(),
                        entities,
                        imports
                    );
                }
                results.push(CheckResult {
                    file: file.display().to_string(),
                    ok: true,
                    entities,
                    imports,
                    error: None,
                });
            }
            Err(e) => {
                any_failed = true;
                if !args.json {
                    let diagnostic = ResourceDiagnostic::from_parse_error(file, &content, &e);
                    eprintln!("{} {}", "error".red(), file.display());
                    eprintln!("{:?}", miette::Report::new(diagnostic));
                }
                results.push(CheckResult {
                    file: file.display().to_string(),
                    ok: false,
                    entities: 0,
                    imports: 0,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).into_diagnostic()?
        );
    }

    if any_failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
