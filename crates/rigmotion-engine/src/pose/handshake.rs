//! Handshake gesture envelope.
//!
//! The right arm rises into an extended pose, holds while the elbow shakes
//! with a growing amplitude, then lowers back to rest. All windows are
//! linear interpolations; there is no easing.

use rigmotion_spec::{HandshakeConfig, JointRole};
use serde::Serialize;

use super::{compose_rotation, euler_degrees};
use crate::rig::Rig;
use crate::skeleton::BoundSkeleton;

/// Which part of the envelope a progress value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HandshakeWindow {
    /// Arm rising from rest.
    Raise,
    /// Arm extended, elbow shaking.
    Shake,
    /// Arm returning to rest.
    Lower,
}

/// Arm angles (degrees) for one instant of the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandshakeSample {
    /// Active window.
    pub window: HandshakeWindow,
    /// Shoulder pitch about the lateral axis.
    pub shoulder_pitch: f32,
    /// Shoulder roll about the forward axis.
    pub shoulder_roll: f32,
    /// Elbow bend.
    pub elbow_bend: f32,
    /// Oscillating elbow shake superimposed on the bend.
    pub elbow_shake: f32,
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

fn fraction(value: f32, length: f32) -> f32 {
    if length <= 0.0 {
        1.0
    } else {
        value / length
    }
}

/// Classifies a progress value into its window.
pub fn window(config: &HandshakeConfig, progress: f32) -> HandshakeWindow {
    if progress < config.raise_end {
        HandshakeWindow::Raise
    } else if progress < config.shake_end {
        HandshakeWindow::Shake
    } else {
        HandshakeWindow::Lower
    }
}

/// Samples the envelope at `progress` seconds into the gesture.
pub fn sample(config: &HandshakeConfig, progress: f32) -> HandshakeSample {
    let window = window(config, progress);
    match window {
        HandshakeWindow::Raise => {
            let t = fraction(progress, config.raise_end);
            HandshakeSample {
                window,
                shoulder_pitch: lerp(0.0, config.shoulder_pitch, t),
                shoulder_roll: lerp(0.0, config.shoulder_roll, t),
                elbow_bend: lerp(0.0, config.elbow_bend, t),
                elbow_shake: 0.0,
            }
        }
        HandshakeWindow::Shake => {
            let ramp = fraction(progress - config.raise_end, config.shake_window());
            HandshakeSample {
                window,
                shoulder_pitch: config.shoulder_pitch,
                shoulder_roll: config.shoulder_roll,
                elbow_bend: config.elbow_bend,
                elbow_shake: (progress * config.shake_frequency).sin()
                    * config.shake_amplitude
                    * ramp,
            }
        }
        HandshakeWindow::Lower => {
            let t = fraction(progress - config.shake_end, config.lower_window());
            HandshakeSample {
                window,
                shoulder_pitch: lerp(config.shoulder_pitch, 0.0, t),
                shoulder_roll: lerp(config.shoulder_roll, 0.0, t),
                elbow_bend: lerp(config.elbow_bend, 0.0, t),
                elbow_shake: 0.0,
            }
        }
    }
}

pub(super) fn apply(sample: &HandshakeSample, skeleton: &BoundSkeleton, rig: &mut Rig) {
    compose_rotation(
        skeleton,
        rig,
        JointRole::RightUpperArm,
        euler_degrees(sample.shoulder_pitch, 0.0, sample.shoulder_roll),
    );
    compose_rotation(
        skeleton,
        rig,
        JointRole::RightLowerArm,
        euler_degrees(sample.elbow_shake, sample.elbow_bend, 0.0),
    );
}
