//! RigMotion Runtime
//!
//! Drives humanoid rigs frame by frame with closed-form procedural motion:
//! idle breathing, a walk cycle and a two-party handshake gesture.
//!
//! # Overview
//!
//! - **Skeleton binding** resolves a fixed joint path schema against a named
//!   rig and captures each joint's rest pose once.
//! - **Pose synthesis** writes bone-local transforms every tick as
//!   `rest * delta`, a pure function of the mode and phase accumulators.
//! - **State machine** switches between Idle, Walking and Handshaking from
//!   per-tick intents. Handshaking suspends locomotion.
//! - **Handshake coordination** starts a handshake on two characters at once
//!   if they are close enough.
//! - **Locomotion** integrates movement intent and clamps it to a boundary box.
//!
//! # Determinism
//!
//! There is no hidden clock. Everything advances from the `dt` passed to a
//! tick, so replaying the same intents with the same time step produces the
//! same poses bit for bit.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use rigmotion_engine::{Character, Intents, Stage};
//! use rigmotion_spec::{MotionConfig, TransformState};
//!
//! let config = MotionConfig::default();
//! let mut stage = Stage::new();
//! let host = stage.add(Character::humanoid("host", config.clone(), TransformState::default())?);
//! let guest = stage.add(Character::humanoid(
//!     "guest",
//!     config,
//!     TransformState::new(Vec3::new(0.0, 0.0, 1.0), 180.0),
//! )?);
//! stage.link_partners(host, guest)?;
//!
//! let tick = stage.tick(&[Intents::none().handshake()], 1.0 / 60.0);
//! assert_eq!(tick.started.len(), 1);
//! assert!(stage.get(guest).unwrap().is_handshaking());
//! # Ok::<(), rigmotion_engine::EngineError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`rig`] - Joint arena built from an imported hierarchy
//! - [`skeleton`] - Joint path binding and rest poses
//! - [`pose`] - Idle, walk and handshake synthesis
//! - [`state`] - Character state machine and intents
//! - [`locomotion`] - Movement integration and boundary clamping
//! - [`handshake`] - Handshake coordinator
//! - [`character`] - Per-character aggregate
//! - [`stage`] - Multi-character ticking
//! - [`scenario`] - Headless scenario playback
//! - [`diagnostics`] - Observational snapshots

pub mod animator;
pub mod character;
pub mod diagnostics;
pub mod error;
pub mod handshake;
pub mod locomotion;
pub mod pose;
pub mod rig;
pub mod scenario;
pub mod skeleton;
pub mod stage;
pub mod state;

pub use animator::{AnimatorSink, FlagRecorder, NullAnimator};
pub use character::{Character, CharacterTick};
pub use diagnostics::{CharacterDiagnostics, DiagnosticsSnapshot, PairDiagnostics};
pub use error::{BindError, EngineError, EngineResult};
pub use handshake::{
    try_handshake, HandshakeCoordinator, HandshakeParticipant, HandshakeRefusal, HandshakeSession,
};
pub use locomotion::{clamp_to_boundary, integrate};
pub use pose::{euler_degrees, sanitize_dt, PhaseState, PoseEvent, PoseSynthesizer};
pub use rig::{Joint, JointId, Rig};
pub use scenario::{CompletionRecord, HandshakeRecord, RefusalRecord, RunSummary, ScenarioRunner};
pub use skeleton::BoundSkeleton;
pub use stage::{CharacterId, Stage, StageTick};
pub use state::{CharacterStateMachine, Intents, StateUpdate, Transition};
