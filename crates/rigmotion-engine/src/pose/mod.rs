//! Pose synthesis.
//!
//! Every frame the synthesizer writes the rest pose onto all bound joints and
//! then composes the active mode's procedural deltas on top
//! (`local = rest * delta`). Nothing is accumulated frame over frame, so the
//! pose is a pure function of `(mode, phase)` and cannot drift.

pub mod handshake;
pub mod idle;
pub mod walk;

use glam::{EulerRot, Quat};
use rigmotion_spec::{AnimationMode, GaitConfig, HandshakeConfig, IdleConfig, JointRole, MotionConfig};
use serde::Serialize;
use tracing::debug;

use crate::rig::Rig;
use crate::skeleton::BoundSkeleton;

pub use handshake::{HandshakeSample, HandshakeWindow};
pub use walk::WalkSample;

/// Clamps a frame delta to a usable value. Negative, zero and non-finite deltas become 0.
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Rotation from Euler angles in degrees: roll about Z, then pitch about X, then yaw about Y.
pub fn euler_degrees(pitch: f32, yaw: f32, roll: f32) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        yaw.to_radians(),
        pitch.to_radians(),
        roll.to_radians(),
    )
}

/// Sets `role`'s rotation to its rest rotation composed with `delta`. Unbound roles are skipped.
fn compose_rotation(skeleton: &BoundSkeleton, rig: &mut Rig, role: JointRole, delta: Quat) {
    if let Some((id, rest)) = skeleton.channel(role) {
        rig.set_local_rotation(id, rest.rotation * delta);
    }
}

/// Per-character phase accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PhaseState {
    /// Walk-cycle phase in radians. Zeroed on entering or leaving walking.
    pub walk_cycle: f32,
    /// Seconds into the current handshake. Zeroed on entering or leaving handshaking.
    pub handshake_progress: f32,
    /// Total synthesized time, driving idle breathing.
    pub elapsed: f32,
}

impl PhaseState {
    /// Resets the accumulators affected by a mode change.
    pub fn on_transition(&mut self, from: AnimationMode, to: AnimationMode) {
        if from == AnimationMode::Walking || to == AnimationMode::Walking {
            self.walk_cycle = 0.0;
        }
        if from == AnimationMode::Handshaking || to == AnimationMode::Handshaking {
            self.handshake_progress = 0.0;
        }
    }
}

/// Signals raised by a synthesis tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseEvent {
    /// The handshake envelope reached its end; progress wrapped to 0.
    HandshakeComplete,
}

/// Computes bone-local transforms for the active mode.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseSynthesizer {
    gait: GaitConfig,
    idle: IdleConfig,
    handshake: HandshakeConfig,
}

impl PoseSynthesizer {
    /// Creates a synthesizer from a motion config.
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            gait: config.gait.clone(),
            idle: config.idle.clone(),
            handshake: config.handshake.clone(),
        }
    }

    /// Handshake envelope parameters.
    pub fn handshake_config(&self) -> &HandshakeConfig {
        &self.handshake
    }

    /// Advances the active mode's phase by `dt` and writes the resulting pose.
    ///
    /// Returns [`PoseEvent::HandshakeComplete`] on the tick the handshake
    /// envelope reaches its duration.
    pub fn tick(
        &self,
        mode: AnimationMode,
        phase: &mut PhaseState,
        dt: f32,
        skeleton: &BoundSkeleton,
        rig: &mut Rig,
    ) -> Option<PoseEvent> {
        let dt = sanitize_dt(dt);
        phase.elapsed += dt;

        match mode {
            AnimationMode::Idle => {}
            AnimationMode::Walking => phase.walk_cycle += dt * self.gait.walk_cycle_speed,
            AnimationMode::Handshaking => phase.handshake_progress += dt,
        }

        self.write(mode, phase, skeleton, rig);

        if mode == AnimationMode::Handshaking
            && phase.handshake_progress >= self.handshake.duration
        {
            debug!(progress = phase.handshake_progress, "handshake envelope complete");
            phase.handshake_progress = 0.0;
            return Some(PoseEvent::HandshakeComplete);
        }
        None
    }

    /// Writes the pose for `mode` at the current phase without advancing anything.
    pub fn write(
        &self,
        mode: AnimationMode,
        phase: &PhaseState,
        skeleton: &BoundSkeleton,
        rig: &mut Rig,
    ) {
        skeleton.restore_rest(rig);
        match mode {
            AnimationMode::Idle => {
                idle::apply(idle::hip_offset(&self.idle, phase.elapsed), skeleton, rig);
            }
            AnimationMode::Walking => {
                walk::apply(&walk::sample(&self.gait, phase.walk_cycle), skeleton, rig);
            }
            AnimationMode::Handshaking => {
                handshake::apply(
                    &handshake::sample(&self.handshake, phase.handshake_progress),
                    skeleton,
                    rig,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    fn setup() -> (PoseSynthesizer, BoundSkeleton, Rig) {
        let rig = Rig::humanoid();
        let skeleton = BoundSkeleton::bind(&rig).unwrap();
        (PoseSynthesizer::new(&MotionConfig::default()), skeleton, rig)
    }

    fn assert_at_rest(skeleton: &BoundSkeleton, rig: &Rig) {
        for role in JointRole::ALL {
            let (id, rest) = skeleton.channel(role).unwrap();
            let current = rig.local(id).rotation;
            assert!(
                current.abs_diff_eq(rest.rotation, 1e-6),
                "{:?} not at rest: {:?}",
                role,
                current
            );
        }
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(0.1), 0.1);
        assert_eq!(sanitize_dt(-0.1), 0.0);
        assert_eq!(sanitize_dt(f32::NAN), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_euler_single_axis() {
        let q = euler_degrees(90.0, 0.0, 0.0);
        assert!(q.abs_diff_eq(Quat::from_rotation_x(FRAC_PI_2), 1e-6));
        let q = euler_degrees(0.0, 0.0, -90.0);
        assert!(q.abs_diff_eq(Quat::from_rotation_z(-FRAC_PI_2), 1e-6));
    }

    #[test]
    fn test_walk_advances_phase() {
        let (synth, skeleton, mut rig) = setup();
        let mut phase = PhaseState::default();
        synth.tick(AnimationMode::Walking, &mut phase, 0.1, &skeleton, &mut rig);
        assert!((phase.walk_cycle - 0.4).abs() < 1e-6);
        assert_eq!(phase.handshake_progress, 0.0);
    }

    #[test]
    fn test_walk_pose_at_quarter_cycle() {
        let (synth, skeleton, mut rig) = setup();
        let phase = PhaseState {
            walk_cycle: FRAC_PI_2,
            ..PhaseState::default()
        };
        synth.write(AnimationMode::Walking, &phase, &skeleton, &mut rig);

        let left = skeleton.joint(JointRole::LeftUpperLeg).unwrap();
        let expected = euler_degrees(30.0, 0.0, 0.0);
        assert!(rig.local(left).rotation.abs_diff_eq(expected, 1e-5));

        let right_knee = skeleton.joint(JointRole::RightLowerLeg).unwrap();
        assert!(rig.local(right_knee).rotation.abs_diff_eq(Quat::IDENTITY, 1e-5));
    }

    #[test]
    fn test_idle_restores_rest_after_walk_and_handshake() {
        let (synth, skeleton, mut rig) = setup();
        let mut phase = PhaseState::default();
        for _ in 0..17 {
            synth.tick(AnimationMode::Walking, &mut phase, 0.07, &skeleton, &mut rig);
        }
        for _ in 0..9 {
            synth.tick(AnimationMode::Handshaking, &mut phase, 0.11, &skeleton, &mut rig);
        }
        synth.tick(AnimationMode::Idle, &mut phase, 0.05, &skeleton, &mut rig);
        assert_at_rest(&skeleton, &rig);

        let (hips, rest) = skeleton.channel(JointRole::Hips).unwrap();
        let offset = rig.local(hips).position - rest.position;
        assert_eq!(offset.x, 0.0);
        assert!(offset.y.abs() <= 0.01 + 1e-6);
    }

    #[test]
    fn test_handshake_completes_and_wraps() {
        let (synth, skeleton, mut rig) = setup();
        let mut phase = PhaseState::default();
        let mut completions = 0;
        let mut ticks = 0;
        while completions == 0 {
            ticks += 1;
            if synth
                .tick(AnimationMode::Handshaking, &mut phase, 0.1, &skeleton, &mut rig)
                .is_some()
            {
                completions += 1;
            }
            assert!(ticks < 100);
        }
        // 35 ticks of 0.1 reach 3.5 (within float accumulation of one tick).
        assert!((34..=36).contains(&ticks), "ticks = {}", ticks);
        assert_eq!(phase.handshake_progress, 0.0);
    }

    #[test]
    fn test_zero_dt_advances_nothing() {
        let (synth, skeleton, mut rig) = setup();
        let mut phase = PhaseState::default();
        synth.tick(AnimationMode::Walking, &mut phase, 0.0, &skeleton, &mut rig);
        synth.tick(AnimationMode::Walking, &mut phase, -1.0, &skeleton, &mut rig);
        assert_eq!(phase, PhaseState::default());
    }

    #[test]
    fn test_partial_rig_skips_missing_channels() {
        let mut root = rigmotion_spec::BoneNode::humanoid("Avatar");
        let chest = root
            .child_mut(rigmotion_spec::ARMATURE_NODE)
            .and_then(|a| a.child_mut("Hips"))
            .and_then(|h| h.child_mut("Spine"))
            .and_then(|s| s.child_mut("Chest"))
            .unwrap();
        chest.remove_child("Right shoulder");

        let mut rig = Rig::from_hierarchy(&root);
        let skeleton = BoundSkeleton::bind(&rig).unwrap();
        let synth = PoseSynthesizer::new(&MotionConfig::default());
        let mut phase = PhaseState::default();
        for _ in 0..20 {
            synth.tick(AnimationMode::Handshaking, &mut phase, 0.05, &skeleton, &mut rig);
        }
        // The rest of the rig stays at rest; nothing panics.
        let (hips, rest) = skeleton.channel(JointRole::Hips).unwrap();
        assert_eq!(rig.local(hips).position, rest.position);
        assert_eq!(rig.local(hips).position, Vec3::new(0.0, 0.95, 0.0));
    }

    #[test]
    fn test_phase_transition_resets() {
        let mut phase = PhaseState {
            walk_cycle: 2.0,
            handshake_progress: 1.0,
            elapsed: 5.0,
        };
        phase.on_transition(AnimationMode::Walking, AnimationMode::Handshaking);
        assert_eq!(phase.walk_cycle, 0.0);
        assert_eq!(phase.handshake_progress, 0.0);
        assert_eq!(phase.elapsed, 5.0);
    }
}
