//! Procedural walk cycle.

use glam::Vec3;
use rigmotion_spec::{GaitConfig, JointRole, Side};

use super::{compose_rotation, euler_degrees};
use crate::rig::Rig;
use crate::skeleton::BoundSkeleton;

/// Leg phases `(left, right)` for a walk-cycle value. The legs are in exact antiphase.
pub fn leg_phases(walk_cycle: f32) -> (f32, f32) {
    (
        walk_cycle.sin(),
        (walk_cycle + std::f32::consts::PI).sin(),
    )
}

/// Joint angles (degrees) and hip drop for one instant of the walk cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSample {
    /// Left upper-leg swing.
    pub left_leg: f32,
    /// Right upper-leg swing.
    pub right_leg: f32,
    /// Left knee flexion, never negative.
    pub left_knee: f32,
    /// Right knee flexion, never negative.
    pub right_knee: f32,
    /// Left upper-arm swing.
    pub left_arm: f32,
    /// Right upper-arm swing.
    pub right_arm: f32,
    /// Downward hip offset from rest.
    pub hip_drop: f32,
}

impl WalkSample {
    /// Upper-leg swing for a side.
    pub fn leg(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left_leg,
            Side::Right => self.right_leg,
        }
    }

    /// Knee flexion for a side.
    pub fn knee(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left_knee,
            Side::Right => self.right_knee,
        }
    }

    /// Upper-arm swing for a side.
    pub fn arm(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left_arm,
            Side::Right => self.right_arm,
        }
    }
}

/// Samples the walk cycle.
///
/// Knees flex only on the forward swing. Each arm follows the opposite leg.
/// The hips bounce twice per cycle, once per footfall.
pub fn sample(gait: &GaitConfig, walk_cycle: f32) -> WalkSample {
    let (left, right) = leg_phases(walk_cycle);
    WalkSample {
        left_leg: left * gait.leg_swing_angle,
        right_leg: right * gait.leg_swing_angle,
        left_knee: left.max(0.0) * gait.knee_angle,
        right_knee: right.max(0.0) * gait.knee_angle,
        left_arm: right * gait.arm_swing_angle,
        right_arm: left * gait.arm_swing_angle,
        hip_drop: (walk_cycle * 2.0).sin().abs() * gait.body_bounce,
    }
}

pub(super) fn apply(sample: &WalkSample, skeleton: &BoundSkeleton, rig: &mut Rig) {
    for side in [Side::Left, Side::Right] {
        compose_rotation(
            skeleton,
            rig,
            JointRole::upper_leg(side),
            euler_degrees(sample.leg(side), 0.0, 0.0),
        );
        compose_rotation(
            skeleton,
            rig,
            JointRole::lower_leg(side),
            euler_degrees(-sample.knee(side), 0.0, 0.0),
        );
        compose_rotation(
            skeleton,
            rig,
            JointRole::upper_arm(side),
            euler_degrees(sample.arm(side), 0.0, 0.0),
        );
    }

    if let Some((id, rest)) = skeleton.channel(JointRole::Hips) {
        rig.set_local_position(id, rest.position + Vec3::NEG_Y * sample.hip_drop);
    }
}
