//! Handshake gesture envelope and proximity parameters.

use serde::{Deserialize, Serialize};

fn default_distance() -> f32 {
    1.5
}

fn default_raise_end() -> f32 {
    0.5
}

fn default_shake_end() -> f32 {
    3.0
}

fn default_duration() -> f32 {
    3.5
}

fn default_shake_amplitude() -> f32 {
    15.0
}

fn default_shake_frequency() -> f32 {
    8.0
}

fn default_shoulder_pitch() -> f32 {
    45.0
}

fn default_shoulder_roll() -> f32 {
    -90.0
}

fn default_elbow_bend() -> f32 {
    80.0
}

/// Handshake timing and extended-arm pose. Angles are in degrees, times in seconds.
///
/// The envelope runs `raise: [0, raise_end)`, `shake: [raise_end, shake_end)`,
/// `lower: [shake_end, duration)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HandshakeConfig {
    /// Maximum distance between participants for a handshake to start.
    #[serde(default = "default_distance")]
    pub distance: f32,
    /// End of the raise window.
    #[serde(default = "default_raise_end")]
    pub raise_end: f32,
    /// End of the shake window.
    #[serde(default = "default_shake_end")]
    pub shake_end: f32,
    /// Total gesture length; the character returns to idle when it elapses.
    #[serde(default = "default_duration")]
    pub duration: f32,
    /// Peak elbow shake.
    #[serde(default = "default_shake_amplitude")]
    pub shake_amplitude: f32,
    /// Shake angular frequency, radians per second.
    #[serde(default = "default_shake_frequency")]
    pub shake_frequency: f32,
    /// Extended shoulder pitch.
    #[serde(default = "default_shoulder_pitch")]
    pub shoulder_pitch: f32,
    /// Extended shoulder roll.
    #[serde(default = "default_shoulder_roll")]
    pub shoulder_roll: f32,
    /// Extended elbow bend.
    #[serde(default = "default_elbow_bend")]
    pub elbow_bend: f32,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            raise_end: default_raise_end(),
            shake_end: default_shake_end(),
            duration: default_duration(),
            shake_amplitude: default_shake_amplitude(),
            shake_frequency: default_shake_frequency(),
            shoulder_pitch: default_shoulder_pitch(),
            shoulder_roll: default_shoulder_roll(),
            elbow_bend: default_elbow_bend(),
        }
    }
}

impl HandshakeConfig {
    /// Sets the proximity threshold.
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }

    /// Sets the envelope window boundaries.
    pub fn with_windows(mut self, raise_end: f32, shake_end: f32, duration: f32) -> Self {
        self.raise_end = raise_end;
        self.shake_end = shake_end;
        self.duration = duration;
        self
    }

    /// Sets the shake amplitude and frequency.
    pub fn with_shake(mut self, amplitude: f32, frequency: f32) -> Self {
        self.shake_amplitude = amplitude;
        self.shake_frequency = frequency;
        self
    }

    /// Length of the shake window.
    pub fn shake_window(&self) -> f32 {
        self.shake_end - self.raise_end
    }

    /// Length of the lower window.
    pub fn lower_window(&self) -> f32 {
        self.duration - self.shake_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handshake_defaults() {
        let config = HandshakeConfig::default();
        assert_eq!(config.distance, 1.5);
        assert_eq!(config.raise_end, 0.5);
        assert_eq!(config.shake_end, 3.0);
        assert_eq!(config.duration, 3.5);
        assert_eq!(config.shake_amplitude, 15.0);
        assert_eq!(config.shoulder_pitch, 45.0);
        assert_eq!(config.shoulder_roll, -90.0);
        assert_eq!(config.elbow_bend, 80.0);
        assert_eq!(config.shake_window(), 2.5);
        assert_eq!(config.lower_window(), 0.5);
    }

    #[test]
    fn test_handshake_builder() {
        let config = HandshakeConfig::default()
            .with_distance(2.0)
            .with_windows(1.0, 2.0, 4.0)
            .with_shake(10.0, 6.0);

        assert_eq!(config.distance, 2.0);
        assert_eq!(config.raise_end, 1.0);
        assert_eq!(config.shake_end, 2.0);
        assert_eq!(config.duration, 4.0);
        assert_eq!(config.shake_amplitude, 10.0);
        assert_eq!(config.shake_frequency, 6.0);
    }
}
