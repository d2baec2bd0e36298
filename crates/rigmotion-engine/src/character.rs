//! The character aggregate: rig, bound skeleton, state machine, phase and transform.

use glam::Vec3;
use rigmotion_spec::{
    AnimationFlags, AnimationMode, BoneNode, JointRole, MotionConfig, TransformState,
};
use tracing::{debug, warn};

use crate::animator::{AnimatorSink, NullAnimator};
use crate::error::{EngineError, EngineResult};
use crate::pose::{sanitize_dt, PhaseState, PoseEvent, PoseSynthesizer};
use crate::rig::Rig;
use crate::skeleton::BoundSkeleton;
use crate::state::{CharacterStateMachine, Intents, StateUpdate, Transition};

/// What happened to one character during [`Character::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CharacterTick {
    /// Result of the intent update.
    pub update: StateUpdate,
    /// Set when the handshake envelope completed and the character returned to Idle.
    pub completed: Option<Transition>,
}

/// A single animated humanoid.
pub struct Character {
    name: String,
    config: MotionConfig,
    rig: Rig,
    skeleton: BoundSkeleton,
    synth: PoseSynthesizer,
    phase: PhaseState,
    state: CharacterStateMachine,
    transform: TransformState,
    animator: Box<dyn AnimatorSink>,
}

impl std::fmt::Debug for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Character")
            .field("name", &self.name)
            .field("mode", &self.state.mode())
            .field("phase", &self.phase)
            .field("transform", &self.transform)
            .field("bound_joints", &self.skeleton.bound_count())
            .finish_non_exhaustive()
    }
}

impl Character {
    /// Binds `rig` and creates an idle character at `transform`.
    pub fn new(
        name: impl Into<String>,
        config: MotionConfig,
        rig: Rig,
        transform: TransformState,
    ) -> EngineResult<Self> {
        let name = name.into();
        let skeleton = BoundSkeleton::bind(&rig).map_err(|e| EngineError::bind(&name, e))?;
        debug!(
            character = %name,
            bound = skeleton.bound_count(),
            missing = JointRole::COUNT - skeleton.bound_count(),
            "character bound"
        );
        Ok(Self {
            synth: PoseSynthesizer::new(&config),
            name,
            config,
            rig,
            skeleton,
            phase: PhaseState::default(),
            state: CharacterStateMachine::new(),
            transform,
            animator: Box::new(NullAnimator),
        })
    }

    /// Creates a character on the reference humanoid rig.
    pub fn humanoid(
        name: impl Into<String>,
        config: MotionConfig,
        transform: TransformState,
    ) -> EngineResult<Self> {
        Self::new(name, config, Rig::humanoid(), transform)
    }

    /// Creates a character from an imported hierarchy.
    pub fn from_hierarchy(
        name: impl Into<String>,
        config: MotionConfig,
        hierarchy: &BoneNode,
        transform: TransformState,
    ) -> EngineResult<Self> {
        Self::new(name, config, Rig::from_hierarchy(hierarchy), transform)
    }

    /// Attaches a discrete-animator consumer.
    pub fn with_animator(mut self, animator: Box<dyn AnimatorSink>) -> Self {
        self.animator = animator;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn skeleton(&self) -> &BoundSkeleton {
        &self.skeleton
    }

    pub fn phase(&self) -> &PhaseState {
        &self.phase
    }

    pub fn mode(&self) -> AnimationMode {
        self.state.mode()
    }

    pub fn flags(&self) -> AnimationFlags {
        self.state.flags()
    }

    pub fn is_walking(&self) -> bool {
        self.state.is_walking()
    }

    pub fn is_handshaking(&self) -> bool {
        self.state.is_handshaking()
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Teleports the character. The boundary is not applied.
    pub fn set_transform(&mut self, transform: TransformState) {
        self.transform = transform;
    }

    /// Feeds one tick of intents to the state machine and integrates movement.
    pub fn update_state(&mut self, intents: &Intents, dt: f32) -> StateUpdate {
        let update = self
            .state
            .update(intents, &mut self.transform, &self.config.locomotion, dt);
        if let Some(transition) = update.transition {
            self.apply_transition(transition);
        }
        update
    }

    /// Runs pose synthesis for the current mode.
    ///
    /// Returns the Handshaking to Idle transition on the tick the envelope completes.
    pub fn animate(&mut self, dt: f32) -> Option<Transition> {
        let event = self.synth.tick(
            self.state.mode(),
            &mut self.phase,
            dt,
            &self.skeleton,
            &mut self.rig,
        );
        match event {
            Some(PoseEvent::HandshakeComplete) => {
                let transition = self.state.complete_handshake()?;
                self.apply_transition(transition);
                Some(transition)
            }
            None => None,
        }
    }

    /// Runs a full tick: intents, then pose synthesis.
    ///
    /// Handshake requests are reported, not resolved; pairing is the
    /// coordinator's job. Non-positive or non-finite `dt` does nothing.
    pub fn tick(&mut self, intents: &Intents, dt: f32) -> CharacterTick {
        if sanitize_dt(dt) == 0.0 {
            return CharacterTick::default();
        }
        let update = self.update_state(intents, dt);
        let completed = self.animate(dt);
        CharacterTick { update, completed }
    }

    /// Enters Handshaking. Returns `None` if already handshaking.
    pub fn begin_handshake(&mut self) -> Option<Transition> {
        let transition = self.state.begin_handshake()?;
        if !self.skeleton.is_bound(JointRole::RightUpperArm)
            || !self.skeleton.is_bound(JointRole::RightLowerArm)
        {
            warn!(character = %self.name, "right arm not bound; handshake has no visible gesture");
        }
        self.apply_transition(transition);
        Some(transition)
    }

    /// Leaves any mode for Idle immediately, cancelling a running handshake.
    pub fn force_idle(&mut self) -> Option<Transition> {
        let transition = if self.state.is_handshaking() {
            self.state.cancel_handshake()
        } else {
            self.state.force_idle()
        }?;
        self.apply_transition(transition);
        self.synth
            .write(self.state.mode(), &self.phase, &self.skeleton, &mut self.rig);
        Some(transition)
    }

    fn apply_transition(&mut self, transition: Transition) {
        self.phase.on_transition(transition.from, transition.to);
        debug!(
            character = %self.name,
            from = %transition.from,
            to = %transition.to,
            "mode changed"
        );
        self.animator.set_flags(transition.to.flags());
    }
}
