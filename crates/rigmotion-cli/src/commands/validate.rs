//! Validate command implementation
//!
//! Parses a motion config and reports every validation error and warning.

use anyhow::Result;
use colored::Colorize;
use rigmotion_spec::{validate_config, MotionConfig};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{self, CommandOutput, JsonDiagnostic};
use super::reporting;
use crate::input::{self, Loaded};

/// Payload of `validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateResult {
    pub source_kind: input::SourceKind,
    pub source_hash: String,
    /// The config with every default filled in.
    pub config: MotionConfig,
}

/// Run the validate command
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid or unreadable
pub fn run(config_path: &str, json: bool) -> Result<ExitCode> {
    let loaded = input::load::<MotionConfig>(Path::new(config_path));

    if json {
        let output = match &loaded {
            Ok(Loaded {
                value,
                source_kind,
                source_hash,
            }) => CommandOutput::from_validation(
                &validate_config(value),
                ValidateResult {
                    source_kind: *source_kind,
                    source_hash: source_hash.clone(),
                    config: value.clone(),
                },
            ),
            Err(e) => CommandOutput::failure(vec![JsonDiagnostic::from(e)], Vec::new()),
        };
        json_output::print(&output)?;
        return Ok(exit_code(output.success));
    }

    println!("{} {}", "Validating:".cyan().bold(), config_path);
    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("  {} {}", "x".red(), e);
            println!("\n{} Config could not be loaded", "FAILED".red().bold());
            return Ok(ExitCode::from(1));
        }
    };
    println!(
        "{} {} ({})",
        "Source:".dimmed(),
        loaded.source_kind,
        reporting::short_hash(&loaded.source_hash)
    );

    let result = validate_config(&loaded.value);
    reporting::print_validation(&result);

    if result.is_ok() {
        println!(
            "\n{} Config is valid ({} warning(s))",
            "SUCCESS".green().bold(),
            result.warnings.len()
        );
    } else {
        println!(
            "\n{} Config has {} error(s)",
            "FAILED".red().bold(),
            result.errors.len()
        );
    }
    Ok(exit_code(result.is_ok()))
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
