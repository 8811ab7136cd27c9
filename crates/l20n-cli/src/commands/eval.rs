//! Implementation of the `l20n eval` command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use l20n::{FileLoader, Translator, Value};
use miette::{miette, Result};
use serde::Serialize;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Manifest file (manifest.json)
    #[arg(long, required = true)]
    pub manifest: PathBuf,

    /// Locale to translate in (defaults to the manifest default)
    #[arg(long)]
    pub locale: Option<String>,

    /// Identifier to translate (may carry a property path)
    #[arg(long, required = true)]
    pub id: String,

    /// External variables in name=value format (repeatable)
    #[arg(short = 'p', long = "var", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
}

/// Parse a key=value variable string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid variable format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    // Resource paths are relative to the manifest's directory
    let root = args
        .manifest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let manifest_name = args
        .manifest
        .file_name()
        .ok_or_else(|| miette!("invalid manifest path {}", args.manifest.display()))?
        .to_string_lossy()
        .to_string();

    let mut translator = Translator::builder()
        .loader(Box::new(FileLoader::new(root)))
        .build();
    translator
        .import_manifest(&manifest_name)
        .map_err(|e| miette!("Failed to import manifest: {}", e))?;

    if let Some(locale) = &args.locale {
        translator
            .set_locale(locale)
            .map_err(|e| miette!("Failed to set locale '{}': {}", locale, e))?;
    }

    // Convert variables to HashMap<String, Value>
    let vars: HashMap<String, Value> = args
        .vars
        .into_iter()
        .map(|(k, v)| {
            // Try parsing as i64 first, fall back to String
            let value = if let Ok(n) = v.parse::<i64>() {
                Value::from(n)
            } else {
                Value::from(v)
            };
            (k, value)
        })
        .collect();

    match translator.try_translate(&args.id, &vars) {
        Ok(result) => {
            if args.json {
                let output = EvalResult { result };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                println!("{}", result);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                eprintln!("Translation error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
