//! Implementation of the `l20n coverage` command.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use l20n::{Environment, FileLoader, Manifest, ResourceLoader};
use miette::{miette, Result};
use serde::Serialize;

use crate::output::table::{format_coverage_table, LocaleCoverage};

/// Arguments for the coverage command.
#[derive(Debug, clap::Args)]
pub struct CoverageArgs {
    /// Manifest file (manifest.json)
    #[arg(long, required = true)]
    pub manifest: PathBuf,

    /// Exit with non-zero code if any locale is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    locale: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let root = args
        .manifest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let manifest_name = args
        .manifest
        .file_name()
        .ok_or_else(|| miette!("invalid manifest path {}", args.manifest.display()))?
        .to_string_lossy()
        .to_string();

    let loader = FileLoader::new(root);
    let reader = loader
        .open(&manifest_name)
        .map_err(|e| miette!("Failed to read {}: {}", args.manifest.display(), e))?;
    let manifest =
        Manifest::from_reader(reader, &manifest_name).map_err(|e| miette!("{}", e))?;

    let locales: Vec<String> = manifest.locales().to_vec();
    let default_locale = manifest.default_locale().to_string();

    let mut env = Environment::new(manifest, &loader).map_err(|e| miette!("{}", e))?;
    let source_names: BTreeSet<String> =
        env.fallback().entity_names().map(str::to_string).collect();
    let source_count = source_names.len();

    // Collect coverage data for each non-default locale
    let mut coverage_data: Vec<LocaleCoverage> = Vec::new();
    for locale in &locales {
        if locale == &default_locale {
            continue;
        }
        env.set_locale(locale, &loader)
            .map_err(|e| miette!("Failed to load locale '{}': {}", locale, e))?;

        let translated_names: BTreeSet<String> =
            env.current().entity_names().map(str::to_string).collect();
        let missing: Vec<String> = source_names
            .difference(&translated_names)
            .cloned()
            .collect();
        let translated = source_names.intersection(&translated_names).count();

        coverage_data.push(LocaleCoverage {
            locale: locale.clone(),
            translated,
            missing,
        });
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                locale: c.locale.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data)
            .expect("JSON serialization should not fail");
        println!("{}", json_output);
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{}", table);

        // Print missing entities per locale
        for coverage in &coverage_data {
            if !coverage.missing.is_empty() {
                println!("\nMissing in {}:", coverage.locale);
                for name in &coverage.missing {
                    println!("  - {}", name);
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
