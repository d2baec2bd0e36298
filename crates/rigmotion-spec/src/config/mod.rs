//! Motion configuration.
//!
//! Every field has a default, so an empty document is a complete config.
//! Configs are loaded from JSON or YAML and checked with
//! [`validate_config`](crate::validation::validate_config).

mod gait;
mod handshake;
mod locomotion;

pub use gait::{GaitConfig, IdleConfig};
pub use handshake::HandshakeConfig;
pub use locomotion::{BoundaryConfig, LocomotionConfig, RegionFrame};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// All tunables for one character.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotionConfig {
    /// Movement speeds and boundary.
    #[serde(default)]
    pub locomotion: LocomotionConfig,
    /// Walk cycle shape.
    #[serde(default)]
    pub gait: GaitConfig,
    /// Idle breathing.
    #[serde(default)]
    pub idle: IdleConfig,
    /// Handshake envelope and proximity.
    #[serde(default)]
    pub handshake: HandshakeConfig,
}

impl MotionConfig {
    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replaces the locomotion section.
    pub fn with_locomotion(mut self, locomotion: LocomotionConfig) -> Self {
        self.locomotion = locomotion;
        self
    }

    /// Replaces the gait section.
    pub fn with_gait(mut self, gait: GaitConfig) -> Self {
        self.gait = gait;
        self
    }

    /// Replaces the handshake section.
    pub fn with_handshake(mut self, handshake: HandshakeConfig) -> Self {
        self.handshake = handshake;
        self
    }
}
