//! Error types for the runtime.

use rigmotion_spec::JointRole;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while binding a rig to the joint path schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The character root has no armature node.
    #[error("no '{armature}' node under character root '{root}'")]
    MissingArmature {
        /// Name of the character root node.
        root: String,
        /// Expected armature node name.
        armature: String,
    },

    /// A joint every other joint depends on could not be found.
    #[error("required joint {role:?} not found at '{path}'")]
    MissingBone {
        /// The missing role.
        role: JointRole,
        /// Path it was looked up at.
        path: String,
    },
}

/// Errors that can occur while building or driving characters.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Rig binding failed.
    #[error("failed to bind '{character}': {source}")]
    Bind {
        /// Character being bound.
        character: String,
        /// Underlying binding error.
        #[source]
        source: BindError,
    },

    /// A name did not resolve to a character on the stage.
    #[error("unknown character '{0}'")]
    UnknownCharacter(String),

    /// A scenario failed validation.
    #[error("scenario is invalid: {0}")]
    InvalidScenario(String),
}

impl EngineError {
    /// Wraps a binding error with the character it occurred for.
    pub fn bind(character: impl Into<String>, source: BindError) -> Self {
        Self::Bind {
            character: character.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_error_display() {
        let err = BindError::MissingBone {
            role: JointRole::Hips,
            path: "Armature/Hips".to_string(),
        };
        assert_eq!(err.to_string(), "required joint Hips not found at 'Armature/Hips'");

        let wrapped = EngineError::bind("alice", err);
        assert!(wrapped.to_string().starts_with("failed to bind 'alice'"));
    }
}
