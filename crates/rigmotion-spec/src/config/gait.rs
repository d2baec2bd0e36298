//! Walk cycle and idle breathing parameters.

use serde::{Deserialize, Serialize};

fn default_walk_cycle_speed() -> f32 {
    4.0
}

fn default_leg_swing_angle() -> f32 {
    30.0
}

fn default_arm_swing_angle() -> f32 {
    15.0
}

fn default_knee_angle() -> f32 {
    45.0
}

fn default_body_bounce() -> f32 {
    0.03
}

fn default_breathing_frequency() -> f32 {
    0.5
}

fn default_breathing_amplitude() -> f32 {
    0.01
}

/// Walk cycle shape. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GaitConfig {
    /// Phase advance in radians per second.
    #[serde(default = "default_walk_cycle_speed")]
    pub walk_cycle_speed: f32,
    /// Peak upper-leg swing about the lateral axis.
    #[serde(default = "default_leg_swing_angle")]
    pub leg_swing_angle: f32,
    /// Peak upper-arm swing about the lateral axis.
    #[serde(default = "default_arm_swing_angle")]
    pub arm_swing_angle: f32,
    /// Peak knee flexion.
    #[serde(default = "default_knee_angle")]
    pub knee_angle: f32,
    /// Peak downward hip bounce, in units.
    #[serde(default = "default_body_bounce")]
    pub body_bounce: f32,
}

impl Default for GaitConfig {
    fn default() -> Self {
        Self {
            walk_cycle_speed: default_walk_cycle_speed(),
            leg_swing_angle: default_leg_swing_angle(),
            arm_swing_angle: default_arm_swing_angle(),
            knee_angle: default_knee_angle(),
            body_bounce: default_body_bounce(),
        }
    }
}

impl GaitConfig {
    /// Sets the phase advance rate.
    pub fn with_walk_cycle_speed(mut self, speed: f32) -> Self {
        self.walk_cycle_speed = speed;
        self
    }

    /// Sets the leg swing angle.
    pub fn with_leg_swing(mut self, degrees: f32) -> Self {
        self.leg_swing_angle = degrees;
        self
    }

    /// Sets the arm swing angle.
    pub fn with_arm_swing(mut self, degrees: f32) -> Self {
        self.arm_swing_angle = degrees;
        self
    }

    /// Sets the knee flexion angle.
    pub fn with_knee_angle(mut self, degrees: f32) -> Self {
        self.knee_angle = degrees;
        self
    }

    /// Sets the hip bounce amount.
    pub fn with_body_bounce(mut self, amount: f32) -> Self {
        self.body_bounce = amount;
        self
    }
}

/// Idle breathing bob applied to the hips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdleConfig {
    /// Angular frequency of the bob, radians per second.
    #[serde(default = "default_breathing_frequency")]
    pub breathing_frequency: f32,
    /// Vertical amplitude in units.
    #[serde(default = "default_breathing_amplitude")]
    pub breathing_amplitude: f32,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            breathing_frequency: default_breathing_frequency(),
            breathing_amplitude: default_breathing_amplitude(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gait_defaults() {
        let gait = GaitConfig::default();
        assert_eq!(gait.walk_cycle_speed, 4.0);
        assert_eq!(gait.leg_swing_angle, 30.0);
        assert_eq!(gait.arm_swing_angle, 15.0);
        assert_eq!(gait.knee_angle, 45.0);
        assert_eq!(gait.body_bounce, 0.03);
    }

    #[test]
    fn test_gait_builder() {
        let gait = GaitConfig::default()
            .with_walk_cycle_speed(6.0)
            .with_leg_swing(20.0)
            .with_arm_swing(10.0)
            .with_knee_angle(60.0)
            .with_body_bounce(0.05);

        assert_eq!(gait.walk_cycle_speed, 6.0);
        assert_eq!(gait.leg_swing_angle, 20.0);
        assert_eq!(gait.arm_swing_angle, 10.0);
        assert_eq!(gait.knee_angle, 60.0);
        assert_eq!(gait.body_bounce, 0.05);
    }

    #[test]
    fn test_idle_partial_json() {
        let idle: IdleConfig = serde_json::from_str(r#"{"breathing_amplitude": 0.02}"#).unwrap();
        assert_eq!(idle.breathing_frequency, 0.5);
        assert_eq!(idle.breathing_amplitude, 0.02);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<GaitConfig, _> = serde_json::from_str(r#"{"stride": 1.0}"#);
        assert!(result.is_err());
    }
}
