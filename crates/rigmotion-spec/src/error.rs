//! Error types for config loading and validation.

use thiserror::Error;

/// Error codes for config and scenario validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Config errors (E001-E009)
    /// E001: Boundary minimum exceeds maximum on some axis
    InvertedBoundary,
    /// E002: A numeric parameter is NaN or infinite
    NonFiniteValue,
    /// E003: A speed, distance or amplitude is negative
    NegativeValue,
    /// E004: Handshake windows are not ordered 0 < raise_end <= shake_end <= duration
    InvalidHandshakeWindows,

    // Scenario errors (E010-E015)
    /// E010: Time step must be positive
    InvalidTimeStep,
    /// E011: Scenario declares no characters
    NoCharacters,
    /// E012: Two characters share a name
    DuplicateCharacterName,
    /// E013: A partner or event references an unknown character
    UnknownCharacter,
    /// E014: An event window ends before it starts, or a one-shot event time is negative or NaN
    InvalidEventWindow,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::InvertedBoundary => "E001",
            ErrorCode::NonFiniteValue => "E002",
            ErrorCode::NegativeValue => "E003",
            ErrorCode::InvalidHandshakeWindows => "E004",
            ErrorCode::InvalidTimeStep => "E010",
            ErrorCode::NoCharacters => "E011",
            ErrorCode::DuplicateCharacterName => "E012",
            ErrorCode::UnknownCharacter => "E013",
            ErrorCode::InvalidEventWindow => "E014",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for config and scenario validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Walk speed is zero; forward intent animates without moving
    ZeroWalkSpeed,
    /// W002: Handshake distance is zero; only coincident characters can shake hands
    ZeroHandshakeDistance,
    /// W003: A character has no partner; its handshake intents are ignored
    NoPartner,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::ZeroWalkSpeed => "W001",
            WarningCode::ZeroHandshakeDistance => "W002",
            WarningCode::NoPartner => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Path to the problematic field (e.g., "locomotion.boundary.min").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a field path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional field path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// Path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a field path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Result of config or scenario validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Moves all errors and warnings of `other` into this result.
    pub fn merge(&mut self, other: ValidationResult) {
        for error in other.errors {
            self.add_error(error);
        }
        self.warnings.extend(other.warnings);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

/// Errors raised while loading configs and scenarios.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Validation failed with one or more errors.
    #[error("validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_render() {
        assert_eq!(ErrorCode::InvertedBoundary.to_string(), "E001");
        assert_eq!(ErrorCode::InvalidEventWindow.to_string(), "E014");
        assert_eq!(WarningCode::NoPartner.to_string(), "W003");
    }

    #[test]
    fn test_error_display_with_path() {
        let err = ValidationError::with_path(
            ErrorCode::NegativeValue,
            "walk_speed must be non-negative",
            "locomotion.walk_speed",
        );
        assert_eq!(
            err.to_string(),
            "E003: walk_speed must be non-negative (at locomotion.walk_speed)"
        );
    }

    #[test]
    fn test_result_merge() {
        let mut a = ValidationResult::success();
        let mut b = ValidationResult::success();
        b.add_error(ValidationError::new(ErrorCode::NoCharacters, "none"));
        b.add_warning(ValidationWarning::new(WarningCode::ZeroWalkSpeed, "zero"));

        a.merge(b);
        assert!(!a.is_ok());
        assert_eq!(a.errors.len(), 1);
        assert_eq!(a.warnings.len(), 1);
        assert!(a.into_result().is_err());
    }
}
