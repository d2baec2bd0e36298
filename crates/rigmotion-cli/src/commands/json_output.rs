//! JSON output types for the `--json` flag.
//!
//! Every command prints exactly one JSON document on stdout. Validation
//! codes (`E0xx`/`W0xx`) pass through unchanged; CLI-level failures use the
//! `CLI_xxx` codes below.

use rigmotion_spec::{ValidationError, ValidationResult, ValidationWarning};
use serde::Serialize;

use crate::input::InputError;

/// Stable codes for CLI-level failures.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// JSON or YAML parse error
    pub const PARSE: &str = "CLI_003";
    /// Rig could not be bound
    pub const BIND: &str = "CLI_004";
    /// Scenario could not be built or run
    pub const SIMULATION: &str = "CLI_005";
}

/// A structured error or warning.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonDiagnostic {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonDiagnostic {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

impl From<&ValidationError> for JsonDiagnostic {
    fn from(e: &ValidationError) -> Self {
        Self {
            code: e.code.code().to_string(),
            message: e.message.clone(),
            path: e.path.clone(),
        }
    }
}

impl From<&ValidationWarning> for JsonDiagnostic {
    fn from(w: &ValidationWarning) -> Self {
        Self {
            code: w.code.code().to_string(),
            message: w.message.clone(),
            path: w.path.clone(),
        }
    }
}

impl From<&InputError> for JsonDiagnostic {
    fn from(e: &InputError) -> Self {
        let code = match e {
            InputError::FileRead { .. } => error_codes::FILE_READ,
            InputError::UnknownExtension { .. } => error_codes::UNKNOWN_EXTENSION,
            InputError::Parse { .. } => error_codes::PARSE,
        };
        Self::new(code, e.to_string())
    }
}

/// Envelope shared by all commands.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T: Serialize> {
    pub success: bool,
    pub errors: Vec<JsonDiagnostic>,
    pub warnings: Vec<JsonDiagnostic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// A successful output with a payload.
    pub fn success(result: T, warnings: Vec<JsonDiagnostic>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// A failed output.
    pub fn failure(errors: Vec<JsonDiagnostic>, warnings: Vec<JsonDiagnostic>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }

    /// Splits a validation result into error and warning lists.
    pub fn from_validation(validation: &ValidationResult, result: T) -> Self {
        let warnings = validation.warnings.iter().map(JsonDiagnostic::from).collect();
        if validation.is_ok() {
            Self::success(result, warnings)
        } else {
            Self::failure(validation.errors.iter().map(JsonDiagnostic::from).collect(), warnings)
        }
    }
}

/// Prints a value as pretty JSON on stdout.
pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
