//! Scenario documents: a cast of characters and a timeline of intents.
//!
//! Scenarios drive the engine headlessly (CLI `simulate`, integration tests).
//! Event times are in seconds from the start of the run; a tick starting at
//! time `t` sees every window with `start <= t < end`.

use serde::{Deserialize, Serialize};

use crate::config::MotionConfig;
use crate::error::ConfigError;
use crate::hierarchy::BoneNode;
use crate::joint::JointRole;
use crate::transform::TransformState;

fn default_dt() -> f32 {
    1.0 / 60.0
}

/// A complete headless run description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    /// Fixed time step in seconds.
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Run length in seconds.
    pub duration: f32,
    /// Shared motion config.
    #[serde(default)]
    pub config: MotionConfig,
    /// Cast, ticked in declaration order.
    pub characters: Vec<CharacterSpec>,
    /// Intent timeline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<IntentEvent>,
}

impl Scenario {
    /// Creates an empty scenario.
    pub fn new(dt: f32, duration: f32) -> Self {
        Self {
            dt,
            duration,
            config: MotionConfig::default(),
            characters: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Parses a scenario from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a scenario from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Number of ticks the run takes.
    pub fn tick_count(&self) -> usize {
        if self.dt <= 0.0 || self.duration <= 0.0 {
            return 0;
        }
        (self.duration / self.dt).round() as usize
    }

    /// Replaces the config.
    pub fn with_config(mut self, config: MotionConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds a character.
    pub fn with_character(mut self, character: CharacterSpec) -> Self {
        self.characters.push(character);
        self
    }

    /// Adds an event.
    pub fn with_event(mut self, event: IntentEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Looks up a character by name.
    pub fn character(&self, name: &str) -> Option<&CharacterSpec> {
        self.characters.iter().find(|c| c.name == name)
    }
}

/// One cast member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterSpec {
    /// Unique name.
    pub name: String,
    /// Starting placement.
    #[serde(default)]
    pub start: TransformState,
    /// Handshake partner, by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner: Option<String>,
    /// Bone hierarchy. The reference humanoid when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<BoneNode>,
    /// Joints pruned (with their subtrees) from the hierarchy before binding.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_joints: Vec<JointRole>,
}

impl CharacterSpec {
    /// Creates a character at the origin facing +Z.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: TransformState::default(),
            partner: None,
            hierarchy: None,
            missing_joints: Vec::new(),
        }
    }

    /// Sets the starting placement.
    pub fn at(mut self, start: TransformState) -> Self {
        self.start = start;
        self
    }

    /// Sets the handshake partner.
    pub fn with_partner(mut self, partner: impl Into<String>) -> Self {
        self.partner = Some(partner.into());
        self
    }

    /// Sets an explicit hierarchy.
    pub fn with_hierarchy(mut self, hierarchy: BoneNode) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    /// Prunes a joint from the hierarchy.
    pub fn without_joint(mut self, role: JointRole) -> Self {
        self.missing_joints.push(role);
        self
    }
}

/// A timed intent for one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum IntentEvent {
    /// Hold the move-forward intent over `[start, end)`.
    Forward {
        character: String,
        start: f32,
        end: f32,
    },
    /// Hold a turn intent over `[start, end)`. Negative turns left.
    Turn {
        character: String,
        start: f32,
        end: f32,
        direction: f32,
    },
    /// Press the initiate-handshake intent once, on the first tick at or after `at`.
    Handshake { character: String, at: f32 },
    /// Force the character back to idle on the first tick at or after `at`.
    ForceIdle { character: String, at: f32 },
}

impl IntentEvent {
    /// Name of the character this event targets.
    pub fn character(&self) -> &str {
        match self {
            IntentEvent::Forward { character, .. }
            | IntentEvent::Turn { character, .. }
            | IntentEvent::Handshake { character, .. }
            | IntentEvent::ForceIdle { character, .. } => character,
        }
    }

    /// Whether a held intent covers the tick starting at `time`.
    pub fn covers(&self, time: f32) -> bool {
        match self {
            IntentEvent::Forward { start, end, .. } | IntentEvent::Turn { start, end, .. } => {
                time >= *start && time < *end
            }
            _ => false,
        }
    }

    /// Whether a one-shot event fires on the tick `[time, time + dt)`.
    pub fn fires(&self, time: f32, dt: f32) -> bool {
        match self {
            IntentEvent::Handshake { at, .. } | IntentEvent::ForceIdle { at, .. } => {
                // First tick whose start is at or after `at`.
                time >= *at && time - dt < *at
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_parse_scenario() {
        let json = r#"{
            "dt": 0.1,
            "duration": 2.0,
            "characters": [
                { "name": "alice", "partner": "bob" },
                { "name": "bob", "start": { "position": [0.0, 0.0, 1.0], "yaw_degrees": 180.0 }, "partner": "alice" }
            ],
            "events": [
                { "kind": "forward", "character": "alice", "start": 0.0, "end": 0.5 },
                { "kind": "handshake", "character": "alice", "at": 1.0 }
            ]
        }"#;

        let scenario = Scenario::from_json(json).unwrap();
        assert_eq!(scenario.tick_count(), 20);
        assert_eq!(scenario.characters.len(), 2);
        assert_eq!(
            scenario.character("bob").unwrap().start.position,
            Vec3::new(0.0, 0.0, 1.0)
        );
        assert_eq!(scenario.events[1].character(), "alice");
    }

    #[test]
    fn test_event_windows() {
        let forward = IntentEvent::Forward {
            character: "a".into(),
            start: 0.5,
            end: 1.0,
        };
        assert!(!forward.covers(0.4));
        assert!(forward.covers(0.5));
        assert!(!forward.covers(1.0));
        assert!(!forward.fires(0.5, 0.1));

        let shake = IntentEvent::Handshake {
            character: "a".into(),
            at: 0.25,
        };
        assert!(!shake.fires(0.2, 0.1));
        assert!(shake.fires(0.3, 0.1));
        assert!(!shake.fires(0.4, 0.1));
    }

    #[test]
    fn test_missing_joints_serde() {
        let json = r#"{ "name": "c", "missing_joints": ["left_hand", "right_lower_arm"] }"#;
        let spec: CharacterSpec = serde_json::from_str(json).unwrap();
        assert_eq!(
            spec.missing_joints,
            vec![JointRole::LeftHand, JointRole::RightLowerArm]
        );
    }

    #[test]
    fn test_tick_count_degenerate() {
        assert_eq!(Scenario::new(0.0, 1.0).tick_count(), 0);
        assert_eq!(Scenario::new(0.1, -1.0).tick_count(), 0);
    }
}
