//! RigMotion Data Contracts
//!
//! This crate provides the types shared between the RigMotion runtime, its
//! CLI and external collaborators (asset import, input layers, renderers).
//!
//! # Overview
//!
//! - **Motion config**: walk/turn speeds, movement boundary, walk cycle shape,
//!   idle breathing and the handshake envelope. Every field has a default.
//! - **Joint roles**: a fixed enum of humanoid joints and the declarative
//!   path table used to resolve them from a named hierarchy.
//! - **Hierarchy**: the named bone tree handed over by asset import.
//! - **Scenarios**: a cast and an intent timeline for headless runs.
//! - **Validation**: non-throwing checks with stable `E0xx`/`W0xx` codes.
//!
//! # Example
//!
//! ```
//! use rigmotion_spec::{validate_config, HandshakeConfig, MotionConfig};
//!
//! let config = MotionConfig::from_json(r#"{ "handshake": { "distance": 2.0 } }"#).unwrap();
//! assert_eq!(config.handshake.distance, 2.0);
//! assert_eq!(config.handshake.duration, HandshakeConfig::default().duration);
//!
//! let result = validate_config(&config);
//! assert!(result.is_ok());
//! ```
//!
//! # Modules
//!
//! - [`config`]: Motion configuration sections
//! - [`error`]: Error and warning types for validation
//! - [`hierarchy`]: Imported bone tree
//! - [`joint`]: Joint roles and the path schema
//! - [`mode`]: Animation mode and flags
//! - [`scenario`]: Headless run descriptions
//! - [`transform`]: World and bone-local transforms
//! - [`validation`]: Config and scenario validation

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod joint;
pub mod mode;
pub mod scenario;
pub mod transform;
pub mod validation;

// Re-export commonly used types at the crate root
pub use config::{
    BoundaryConfig, GaitConfig, HandshakeConfig, IdleConfig, LocomotionConfig, MotionConfig,
    RegionFrame,
};
pub use error::{
    ConfigError, ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode,
};
pub use hierarchy::BoneNode;
pub use joint::{JointPath, JointRole, Side, ARMATURE_NODE, JOINT_PATHS};
pub use mode::{AnimationFlags, AnimationMode};
pub use scenario::{CharacterSpec, IntentEvent, Scenario};
pub use transform::{BoneTransform, TransformState};
pub use validation::{validate_config, validate_scenario};
