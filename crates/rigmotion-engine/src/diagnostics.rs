//! Read-only diagnostics: per-character state and partner distances.

use glam::Vec3;
use rigmotion_spec::{AnimationMode, JointRole};
use serde::Serialize;
use tracing::info;

use crate::stage::Stage;

/// State of one character at capture time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterDiagnostics {
    pub name: String,
    pub position: Vec3,
    pub yaw_degrees: f32,
    pub mode: AnimationMode,
    pub walking: bool,
    pub handshaking: bool,
    pub bound_joints: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_joints: Vec<JointRole>,
}

/// Distance between two linked partners.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairDiagnostics {
    pub a: String,
    pub b: String,
    pub distance: f32,
    /// Whether `a` could start a handshake with `b` at this distance.
    pub within_handshake_distance: bool,
}

/// A snapshot of a whole stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticsSnapshot {
    pub tick: u64,
    pub time: f32,
    pub characters: Vec<CharacterDiagnostics>,
    pub pairs: Vec<PairDiagnostics>,
}

impl DiagnosticsSnapshot {
    /// Captures the current state of every character and every partner link.
    ///
    /// A mutual link is reported once.
    pub fn capture(stage: &Stage) -> Self {
        let characters = stage
            .characters()
            .iter()
            .map(|c| CharacterDiagnostics {
                name: c.name().to_string(),
                position: c.position(),
                yaw_degrees: c.transform().yaw_degrees,
                mode: c.mode(),
                walking: c.is_walking(),
                handshaking: c.is_handshaking(),
                bound_joints: c.skeleton().bound_count(),
                missing_joints: c.skeleton().missing().collect(),
            })
            .collect();

        let mut pairs = Vec::new();
        for id in stage.ids() {
            let Some(partner) = stage.partner(id) else {
                continue;
            };
            if stage.partner(partner) == Some(id) && partner < id {
                continue;
            }
            let (Some(a), Some(b)) = (stage.get(id), stage.get(partner)) else {
                continue;
            };
            let distance = a.position().distance(b.position());
            pairs.push(PairDiagnostics {
                a: a.name().to_string(),
                b: b.name().to_string(),
                distance,
                within_handshake_distance: distance <= a.config().handshake.distance,
            });
        }

        Self {
            tick: stage.tick_count(),
            time: stage.time(),
            characters,
            pairs,
        }
    }

    /// Replaces the captured time, for callers that keep their own clock.
    pub fn with_time(mut self, time: f32) -> Self {
        self.time = time;
        self
    }

    pub fn character(&self, name: &str) -> Option<&CharacterDiagnostics> {
        self.characters.iter().find(|c| c.name == name)
    }

    /// Emits the snapshot as `info` events.
    pub fn log(&self) {
        for c in &self.characters {
            info!(
                tick = self.tick,
                character = %c.name,
                x = c.position.x,
                z = c.position.z,
                yaw = c.yaw_degrees,
                walking = c.walking,
                handshaking = c.handshaking,
                "character state"
            );
        }
        for pair in &self.pairs {
            info!(
                tick = self.tick,
                a = %pair.a,
                b = %pair.b,
                distance = pair.distance,
                within = pair.within_handshake_distance,
                "partner distance"
            );
        }
    }
}
