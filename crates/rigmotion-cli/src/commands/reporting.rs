//! Shared human-readable output helpers.

use colored::Colorize;
use rigmotion_spec::ValidationResult;

/// Prints every validation error and warning, one per line.
pub(super) fn print_validation(result: &ValidationResult) {
    for error in &result.errors {
        let path = error
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "x".red(),
            error.code.code(),
            path.dimmed(),
            error.message
        );
    }
    for warning in &result.warnings {
        let path = warning
            .path
            .as_ref()
            .map(|p| format!(" at {}", p))
            .unwrap_or_default();
        println!(
            "  {} [{}]{}: {}",
            "!".yellow(),
            warning.code.code(),
            path.dimmed(),
            warning.message
        );
    }
}

/// Short hex prefix for display.
pub(super) fn short_hash(hash: &str) -> &str {
    &hash[..hash.len().min(16)]
}
