//! Idle breathing.

use glam::Vec3;
use rigmotion_spec::{IdleConfig, JointRole};

use crate::rig::Rig;
use crate::skeleton::BoundSkeleton;

/// Vertical hip offset at `elapsed` seconds.
pub fn hip_offset(idle: &IdleConfig, elapsed: f32) -> f32 {
    (elapsed * idle.breathing_frequency).sin() * idle.breathing_amplitude
}

pub(super) fn apply(offset: f32, skeleton: &BoundSkeleton, rig: &mut Rig) {
    if let Some((id, rest)) = skeleton.channel(JointRole::Hips) {
        rig.set_local_position(id, rest.position + Vec3::Y * offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hip_offset_bounded() {
        let idle = IdleConfig::default();
        assert_eq!(hip_offset(&idle, 0.0), 0.0);
        for i in 0..100 {
            let offset = hip_offset(&idle, i as f32 * 0.5);
            assert!(offset.abs() <= idle.breathing_amplitude + 1e-7);
        }
        // Peak a quarter period in: sin(pi/2) at elapsed = pi.
        let peak = hip_offset(&idle, std::f32::consts::PI);
        assert!((peak - idle.breathing_amplitude).abs() < 1e-6);
    }
}
