//! Character state machine.
//!
//! ```text
//!            forward on                 handshake accepted
//!   Idle  ---------------->  Walking  ---------------------+
//!    ^  <----------------              |                   v
//!    |       forward off               +------------> Handshaking
//!    |                                                     |
//!    +---------------- envelope complete / cancel ---------+
//! ```
//!
//! Idle and Walking switch only when the forward intent changes. While
//! handshaking, every movement, turn and handshake intent is dropped; the
//! only ways out are envelope completion and an explicit cancel.

use rigmotion_spec::{AnimationFlags, AnimationMode, LocomotionConfig, TransformState};
use serde::Serialize;

use crate::locomotion;
use crate::pose::sanitize_dt;

/// Intent inputs for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Intents {
    /// Move-forward signal, held.
    pub forward: bool,
    /// Signed turn signal: positive turns right, negative left.
    pub turn: f32,
    /// Initiate-handshake press, one-shot.
    pub handshake: bool,
}

impl Intents {
    /// No intent at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Holds the forward intent.
    pub fn forward(mut self) -> Self {
        self.forward = true;
        self
    }

    /// Holds a turn intent.
    pub fn turning(mut self, direction: f32) -> Self {
        self.turn = direction;
        self
    }

    /// Presses the handshake intent.
    pub fn handshake(mut self) -> Self {
        self.handshake = true;
        self
    }
}

/// A mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: AnimationMode,
    pub to: AnimationMode,
}

impl Transition {
    pub fn new(from: AnimationMode, to: AnimationMode) -> Self {
        Self { from, to }
    }
}

/// Outcome of feeding intents to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateUpdate {
    /// Idle/Walking switch caused by the forward intent, if any.
    pub transition: Option<Transition>,
    /// The handshake intent was pressed and needs a coordinator decision.
    pub handshake_requested: bool,
}

/// Tracks one character's animation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterStateMachine {
    mode: AnimationMode,
}

impl CharacterStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    pub fn is_walking(&self) -> bool {
        self.mode == AnimationMode::Walking
    }

    pub fn is_handshaking(&self) -> bool {
        self.mode == AnimationMode::Handshaking
    }

    pub fn flags(&self) -> AnimationFlags {
        self.mode.flags()
    }

    /// Consumes one tick of intents.
    ///
    /// Movement is integrated into `transform` on every tick the intents
    /// ask for it; the Idle/Walking mode only changes when the forward
    /// signal differs from the current mode.
    pub fn update(
        &mut self,
        intents: &Intents,
        transform: &mut TransformState,
        config: &LocomotionConfig,
        dt: f32,
    ) -> StateUpdate {
        if self.is_handshaking() || sanitize_dt(dt) == 0.0 {
            return StateUpdate::default();
        }

        if intents.forward || intents.turn != 0.0 {
            *transform = locomotion::integrate(transform, intents.forward, intents.turn, dt, config);
        }

        let transition = match (intents.forward, self.mode) {
            (true, AnimationMode::Idle) => Some(self.switch(AnimationMode::Walking)),
            (false, AnimationMode::Walking) => Some(self.switch(AnimationMode::Idle)),
            _ => None,
        };

        StateUpdate {
            transition,
            handshake_requested: intents.handshake,
        }
    }

    /// Enters Handshaking, forcing Walking off. Returns `None` if already handshaking.
    pub fn begin_handshake(&mut self) -> Option<Transition> {
        if self.is_handshaking() {
            return None;
        }
        Some(self.switch(AnimationMode::Handshaking))
    }

    /// Returns to Idle once the handshake envelope has run its course.
    pub fn complete_handshake(&mut self) -> Option<Transition> {
        self.leave_handshake()
    }

    /// Leaves Handshaking immediately. A later completion signal has nothing to act on.
    pub fn cancel_handshake(&mut self) -> Option<Transition> {
        self.leave_handshake()
    }

    /// Forces Idle from any mode.
    pub fn force_idle(&mut self) -> Option<Transition> {
        if self.mode == AnimationMode::Idle {
            return None;
        }
        Some(self.switch(AnimationMode::Idle))
    }

    fn leave_handshake(&mut self) -> Option<Transition> {
        if !self.is_handshaking() {
            return None;
        }
        Some(self.switch(AnimationMode::Idle))
    }

    fn switch(&mut self, to: AnimationMode) -> Transition {
        let from = std::mem::replace(&mut self.mode, to);
        Transition::new(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn step(sm: &mut CharacterStateMachine, intents: Intents, t: &mut TransformState) -> StateUpdate {
        sm.update(&intents, t, &LocomotionConfig::default(), 0.1)
    }

    #[test]
    fn test_forward_edges() {
        let mut sm = CharacterStateMachine::new();
        let mut t = TransformState::default();

        let update = step(&mut sm, Intents::none().forward(), &mut t);
        assert_eq!(
            update.transition,
            Some(Transition::new(AnimationMode::Idle, AnimationMode::Walking))
        );

        // Held signal: no re-entry, but movement continues.
        let update = step(&mut sm, Intents::none().forward(), &mut t);
        assert_eq!(update.transition, None);
        assert!((t.position.z - 0.4).abs() < 1e-5);

        let update = step(&mut sm, Intents::none(), &mut t);
        assert_eq!(
            update.transition,
            Some(Transition::new(AnimationMode::Walking, AnimationMode::Idle))
        );
        assert!((t.position.z - 0.4).abs() < 1e-5);
    }

    #[test]
    fn test_turn_while_idle() {
        let mut sm = CharacterStateMachine::new();
        let mut t = TransformState::default();
        let update = step(&mut sm, Intents::none().turning(1.0), &mut t);
        assert_eq!(update.transition, None);
        assert_eq!(sm.mode(), AnimationMode::Idle);
        assert!((t.yaw_degrees - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_handshake_forces_walking_off() {
        let mut sm = CharacterStateMachine::new();
        let mut t = TransformState::default();
        step(&mut sm, Intents::none().forward(), &mut t);

        let transition = sm.begin_handshake().unwrap();
        assert_eq!(transition.from, AnimationMode::Walking);
        assert!(sm.is_handshaking());
        assert!(!sm.is_walking());
        assert_eq!(sm.begin_handshake(), None);
    }

    #[test]
    fn test_intents_dropped_while_handshaking() {
        let mut sm = CharacterStateMachine::new();
        let mut t = TransformState::new(Vec3::new(1.0, 0.0, 1.0), 30.0);
        sm.begin_handshake();

        let update = step(&mut sm, Intents::none().forward().turning(1.0).handshake(), &mut t);
        assert_eq!(update, StateUpdate::default());
        assert_eq!(t, TransformState::new(Vec3::new(1.0, 0.0, 1.0), 30.0));
        assert!(sm.is_handshaking());
    }

    #[test]
    fn test_handshake_request_reported() {
        let mut sm = CharacterStateMachine::new();
        let mut t = TransformState::default();
        let update = step(&mut sm, Intents::none().handshake(), &mut t);
        assert!(update.handshake_requested);
        assert_eq!(sm.mode(), AnimationMode::Idle);
    }

    #[test]
    fn test_cancel_then_complete_is_noop() {
        let mut sm = CharacterStateMachine::new();
        sm.begin_handshake();
        assert_eq!(
            sm.cancel_handshake(),
            Some(Transition::new(AnimationMode::Handshaking, AnimationMode::Idle))
        );
        assert_eq!(sm.complete_handshake(), None);
        assert_eq!(sm.mode(), AnimationMode::Idle);
    }

    #[test]
    fn test_zero_dt_ignores_intents() {
        let mut sm = CharacterStateMachine::new();
        let mut t = TransformState::default();
        let update = sm.update(
            &Intents::none().forward().handshake(),
            &mut t,
            &LocomotionConfig::default(),
            0.0,
        );
        assert_eq!(update, StateUpdate::default());
        assert_eq!(sm.mode(), AnimationMode::Idle);
    }
}
