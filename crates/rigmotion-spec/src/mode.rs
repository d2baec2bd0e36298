//! Animation mode and the discrete flags published to animator consumers.

use serde::{Deserialize, Serialize};

/// The single active animation mode of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationMode {
    /// Standing still with a breathing bob.
    #[default]
    Idle,
    /// Procedural walk cycle.
    Walking,
    /// Timed two-party handshake gesture. Takes priority over walking.
    Handshaking,
}

impl AnimationMode {
    /// Returns the string representation used in logs and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationMode::Idle => "idle",
            AnimationMode::Walking => "walking",
            AnimationMode::Handshaking => "handshaking",
        }
    }

    /// Flags describing this mode.
    pub fn flags(&self) -> AnimationFlags {
        AnimationFlags {
            walking: *self == AnimationMode::Walking,
            handshaking: *self == AnimationMode::Handshaking,
        }
    }
}

impl std::fmt::Display for AnimationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The `(walking, handshaking)` pair emitted on every state change.
///
/// Built from an [`AnimationMode`], so `handshaking` implies `!walking`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AnimationFlags {
    /// Walk cycle active.
    pub walking: bool,
    /// Handshake gesture active.
    pub handshaking: bool,
}

impl From<AnimationMode> for AnimationFlags {
    fn from(mode: AnimationMode) -> Self {
        mode.flags()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_flags() {
        assert_eq!(
            AnimationMode::Idle.flags(),
            AnimationFlags {
                walking: false,
                handshaking: false
            }
        );
        assert_eq!(
            AnimationMode::Walking.flags(),
            AnimationFlags {
                walking: true,
                handshaking: false
            }
        );
        assert_eq!(
            AnimationFlags::from(AnimationMode::Handshaking),
            AnimationFlags {
                walking: false,
                handshaking: true
            }
        );
    }

    #[test]
    fn test_mode_serde() {
        let modes = [
            (AnimationMode::Idle, "\"idle\""),
            (AnimationMode::Walking, "\"walking\""),
            (AnimationMode::Handshaking, "\"handshaking\""),
        ];

        for (mode, expected) in modes {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, expected);
            assert_eq!(mode.to_string(), expected.trim_matches('"'));
        }

        assert_eq!(AnimationMode::default(), AnimationMode::Idle);
    }
}
