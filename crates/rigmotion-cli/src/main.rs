//! RigMotion CLI - validate motion configs, check rigs and simulate scenarios
//!
//! This binary provides commands for working with RigMotion configs, bone
//! hierarchies and headless scenario runs.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use rigmotion_cli::{commands, logging};

/// RigMotion - Procedural Avatar Motion
#[derive(Parser)]
#[command(name = "rigmotion")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a motion config file
    Validate {
        /// Path to the config file (JSON or YAML)
        #[arg(short, long)]
        config: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Report which joint roles a bone hierarchy resolves
    Bind {
        /// Path to the hierarchy file (JSON or YAML)
        #[arg(long)]
        hierarchy: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Play a scenario headlessly and print a summary with a pose-trace hash
    Simulate {
        /// Path to the scenario file (JSON or YAML)
        #[arg(short, long)]
        scenario: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,

        /// Sample the pose trace every N ticks
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        sample_every: u64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Validate { config, json } => commands::validate::run(&config, json),
        Commands::Bind { hierarchy, json } => commands::bind::run(&hierarchy, json),
        Commands::Simulate {
            scenario,
            json,
            sample_every,
        } => commands::simulate::run(&scenario, json, sample_every),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_simulate() {
        let cli = Cli::try_parse_from([
            "rigmotion",
            "simulate",
            "--scenario",
            "greeting.yaml",
            "--sample-every",
            "5",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Simulate {
                scenario,
                json,
                sample_every,
            } => {
                assert_eq!(scenario, "greeting.yaml");
                assert!(!json);
                assert_eq!(sample_every, 5);
            }
            _ => panic!("expected simulate command"),
        }
    }

    #[test]
    fn test_cli_rejects_zero_sample_interval() {
        let result = Cli::try_parse_from([
            "rigmotion",
            "simulate",
            "--scenario",
            "a.json",
            "--sample-every",
            "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_validate_and_bind() {
        let cli = Cli::try_parse_from(["rigmotion", "validate", "-c", "motion.json", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { json: true, .. }));
        assert!(!cli.verbose);

        let cli = Cli::try_parse_from(["rigmotion", "bind", "--hierarchy", "rig.json"]).unwrap();
        match cli.command {
            Commands::Bind { hierarchy, json } => {
                assert_eq!(hierarchy, "rig.json");
                assert!(!json);
            }
            _ => panic!("expected bind command"),
        }
    }
}
