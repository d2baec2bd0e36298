//! Pose-trace hashing.
//!
//! A pose trace is the sequence of every character's transform and every
//! bound joint's local transform, sampled at fixed ticks. Its BLAKE3 hash is
//! a compact fingerprint for determinism checks: the same scenario must
//! always produce the same hash.

use rigmotion_engine::Stage;
use rigmotion_spec::JointRole;
use serde::Serialize;

/// One sampled frame of a character, for JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoseSample {
    pub tick: u64,
    pub character: String,
    pub mode: rigmotion_spec::AnimationMode,
    pub position: glam::Vec3,
    pub yaw_degrees: f32,
    pub walk_cycle: f32,
    pub handshake_progress: f32,
}

/// Incremental hasher over sampled stage poses.
#[derive(Debug, Clone, Default)]
pub struct PoseTrace {
    hasher: blake3::Hasher,
    frames: u64,
}

impl PoseTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes the current pose of every character on the stage.
    pub fn record(&mut self, tick: u64, stage: &Stage) {
        self.hasher.update(&tick.to_le_bytes());
        for character in stage.characters() {
            self.hasher.update(character.name().as_bytes());
            let transform = character.transform();
            self.write_floats(&transform.position.to_array());
            self.write_floats(&[transform.yaw_degrees]);

            let rig = character.rig();
            for role in JointRole::ALL {
                let Some(id) = character.skeleton().joint(role) else {
                    continue;
                };
                let local = rig.local(id);
                self.hasher.update(&[role.index() as u8]);
                self.write_floats(&local.rotation.to_array());
                self.write_floats(&local.position.to_array());
            }
        }
        self.frames += 1;
    }

    /// Number of frames recorded.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Hex digest of everything recorded so far.
    pub fn hash(&self) -> String {
        self.hasher.finalize().to_hex().to_string()
    }

    fn write_floats(&mut self, values: &[f32]) {
        for v in values {
            self.hasher.update(&v.to_le_bytes());
        }
    }
}

/// Snapshots every character for the JSON sample stream.
pub fn samples(tick: u64, stage: &Stage) -> Vec<PoseSample> {
    stage
        .characters()
        .iter()
        .map(|c| PoseSample {
            tick,
            character: c.name().to_string(),
            mode: c.mode(),
            position: c.position(),
            yaw_degrees: c.transform().yaw_degrees,
            walk_cycle: c.phase().walk_cycle,
            handshake_progress: c.phase().handshake_progress,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigmotion_engine::{Character, Intents};
    use rigmotion_spec::{MotionConfig, TransformState};

    fn stage() -> Stage {
        let mut stage = Stage::new();
        stage.add(Character::humanoid("a", MotionConfig::default(), TransformState::default()).unwrap());
        stage
    }

    #[test]
    fn test_same_motion_same_hash() {
        let mut traces = Vec::new();
        for _ in 0..2 {
            let mut stage = stage();
            let mut trace = PoseTrace::new();
            for _ in 0..30 {
                let tick = stage.tick(&[Intents::none().forward()], 1.0 / 30.0);
                trace.record(tick.tick, &stage);
            }
            traces.push(trace);
        }
        assert_eq!(traces[0].frames(), 30);
        assert_eq!(traces[0].hash(), traces[1].hash());
    }

    #[test]
    fn test_different_motion_different_hash() {
        let mut walking = stage();
        let mut idle = stage();
        let mut a = PoseTrace::new();
        let mut b = PoseTrace::new();
        for _ in 0..5 {
            walking.tick(&[Intents::none().forward()], 0.1);
            idle.tick(&[Intents::none()], 0.1);
            a.record(0, &walking);
            b.record(0, &idle);
        }
        assert_ne!(a.hash(), b.hash());
    }
}
