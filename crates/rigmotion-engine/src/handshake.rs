//! Handshake coordination between two characters.
//!
//! The coordinator is the only place two characters touch. It checks the
//! straight-line distance and, if close enough, enters Handshaking on the
//! initiator and then the partner in the same call. There is no shared
//! session state afterwards: each side runs its own envelope and returns to
//! Idle on its own, which stays in sync because both started together.

use glam::Vec3;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::character::Character;
use crate::state::Transition;

/// Anything that can take part in a handshake.
pub trait HandshakeParticipant {
    fn name(&self) -> &str;

    fn position(&self) -> Vec3;

    fn is_handshaking(&self) -> bool;

    /// Enters Handshaking. Returns `None` if already handshaking.
    fn begin_handshake(&mut self) -> Option<Transition>;
}

impl HandshakeParticipant for Character {
    fn name(&self) -> &str {
        Character::name(self)
    }

    fn position(&self) -> Vec3 {
        Character::position(self)
    }

    fn is_handshaking(&self) -> bool {
        Character::is_handshaking(self)
    }

    fn begin_handshake(&mut self) -> Option<Transition> {
        Character::begin_handshake(self)
    }
}

/// A handshake that was started.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandshakeSession {
    pub initiator: String,
    pub partner: String,
    /// Distance between the two at the moment of the check.
    pub distance: f32,
}

/// Why a handshake request was refused. A refusal never changes either character.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HandshakeRefusal {
    #[error("'{initiator}' has no handshake partner")]
    NoPartner { initiator: String },

    #[error("'{partner}' is {distance:.3} away, beyond {max_distance:.3}")]
    TooFar {
        partner: String,
        distance: f32,
        max_distance: f32,
    },

    #[error("'{name}' is already handshaking")]
    Busy { name: String },
}

/// Gates handshake starts on proximity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandshakeCoordinator {
    max_distance: f32,
}

impl HandshakeCoordinator {
    pub fn new(max_distance: f32) -> Self {
        Self { max_distance }
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    /// Starts a handshake on both participants if they are within range.
    ///
    /// The initiator enters first, then the partner. On refusal neither is touched.
    pub fn attempt<A, B>(
        &self,
        initiator: &mut A,
        partner: &mut B,
    ) -> Result<HandshakeSession, HandshakeRefusal>
    where
        A: HandshakeParticipant + ?Sized,
        B: HandshakeParticipant + ?Sized,
    {
        if initiator.is_handshaking() {
            return Err(HandshakeRefusal::Busy {
                name: initiator.name().to_string(),
            });
        }
        if partner.is_handshaking() {
            info!(
                initiator = initiator.name(),
                partner = partner.name(),
                "handshake refused: partner busy"
            );
            return Err(HandshakeRefusal::Busy {
                name: partner.name().to_string(),
            });
        }

        let distance = initiator.position().distance(partner.position());
        if distance.is_nan() || distance > self.max_distance {
            info!(
                initiator = initiator.name(),
                partner = partner.name(),
                distance,
                max_distance = self.max_distance,
                "handshake refused: too far"
            );
            return Err(HandshakeRefusal::TooFar {
                partner: partner.name().to_string(),
                distance,
                max_distance: self.max_distance,
            });
        }

        initiator.begin_handshake();
        partner.begin_handshake();
        info!(
            initiator = initiator.name(),
            partner = partner.name(),
            distance,
            "handshake started"
        );
        Ok(HandshakeSession {
            initiator: initiator.name().to_string(),
            partner: partner.name().to_string(),
            distance,
        })
    }
}

/// Starts a handshake between `a` and `b` if they are within `max_distance`.
pub fn try_handshake<A, B>(a: &mut A, b: &mut B, max_distance: f32) -> bool
where
    A: HandshakeParticipant + ?Sized,
    B: HandshakeParticipant + ?Sized,
{
    HandshakeCoordinator::new(max_distance).attempt(a, b).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rigmotion_spec::{AnimationMode, MotionConfig, TransformState};

    struct Dummy {
        name: &'static str,
        position: Vec3,
        entered: u32,
        handshaking: bool,
    }

    impl Dummy {
        fn at(name: &'static str, x: f32) -> Self {
            Self {
                name,
                position: Vec3::new(x, 0.0, 0.0),
                entered: 0,
                handshaking: false,
            }
        }
    }

    impl HandshakeParticipant for Dummy {
        fn name(&self) -> &str {
            self.name
        }

        fn position(&self) -> Vec3 {
            self.position
        }

        fn is_handshaking(&self) -> bool {
            self.handshaking
        }

        fn begin_handshake(&mut self) -> Option<Transition> {
            self.entered += 1;
            self.handshaking = true;
            Some(Transition::new(AnimationMode::Idle, AnimationMode::Handshaking))
        }
    }

    fn pair(distance: f32) -> (Character, Character) {
        let config = MotionConfig::default();
        let a = Character::humanoid("a", config.clone(), TransformState::default()).unwrap();
        let b = Character::humanoid(
            "b",
            config,
            TransformState::new(Vec3::new(distance, 0.0, 0.0), 270.0),
        )
        .unwrap();
        (a, b)
    }

    #[test]
    fn test_within_range_starts_both() {
        let (mut a, mut b) = pair(1.0);
        assert!(try_handshake(&mut a, &mut b, 1.5));
        assert!(a.is_handshaking() && !a.is_walking());
        assert!(b.is_handshaking() && !b.is_walking());
        assert_eq!(a.phase().handshake_progress, 0.0);
    }

    #[test]
    fn test_out_of_range_changes_nothing() {
        let (mut a, mut b) = pair(2.0);
        let refusal = HandshakeCoordinator::new(1.5).attempt(&mut a, &mut b).unwrap_err();
        assert!(matches!(refusal, HandshakeRefusal::TooFar { distance, .. } if (distance - 2.0).abs() < 1e-6));
        assert_eq!(a.mode(), AnimationMode::Idle);
        assert_eq!(b.mode(), AnimationMode::Idle);
    }

    #[test]
    fn test_exact_threshold_is_inside() {
        let mut a = Dummy::at("a", 0.0);
        let mut b = Dummy::at("b", 1.5);
        let session = HandshakeCoordinator::new(1.5).attempt(&mut a, &mut b).unwrap();
        assert_eq!(session.initiator, "a");
        assert_eq!(session.partner, "b");
        assert_eq!((a.entered, b.entered), (1, 1));
    }

    #[test]
    fn test_busy_partner_refused() {
        let mut a = Dummy::at("a", 0.0);
        let mut b = Dummy::at("b", 0.5);
        b.handshaking = true;
        let refusal = HandshakeCoordinator::new(1.5).attempt(&mut a, &mut b).unwrap_err();
        assert_eq!(refusal, HandshakeRefusal::Busy { name: "b".to_string() });
        assert_eq!(a.entered, 0);
    }

    #[test]
    fn test_dyn_participants() {
        let (a, b) = pair(0.5);
        let mut a: Box<dyn HandshakeParticipant> = Box::new(a);
        let mut b: Box<dyn HandshakeParticipant> = Box::new(b);
        assert!(try_handshake(a.as_mut(), b.as_mut(), 1.0));
        assert!(a.is_handshaking() && b.is_handshaking());
    }

    #[test]
    fn test_refusal_display() {
        let refusal = HandshakeRefusal::TooFar {
            partner: "b".to_string(),
            distance: 2.0,
            max_distance: 1.5,
        };
        assert_eq!(refusal.to_string(), "'b' is 2.000 away, beyond 1.500");
    }
}
