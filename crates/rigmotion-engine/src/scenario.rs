//! Headless scenario playback.
//!
//! A [`ScenarioRunner`] builds a [`Stage`] from a validated [`Scenario`] and
//! replays its intent timeline at the scenario's fixed time step.

use rigmotion_spec::{validate_scenario, BoneNode, IntentEvent, Scenario};
use serde::Serialize;
use tracing::{debug, warn};

use crate::character::Character;
use crate::diagnostics::DiagnosticsSnapshot;
use crate::error::{EngineError, EngineResult};
use crate::stage::{Stage, StageTick};
use crate::state::Intents;

/// A handshake start recorded during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandshakeRecord {
    pub tick: u64,
    pub time: f32,
    pub initiator: String,
    pub partner: String,
    pub distance: f32,
}

/// A character returning to Idle after its handshake envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRecord {
    pub tick: u64,
    pub time: f32,
    pub character: String,
}

/// A refused handshake request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefusalRecord {
    pub tick: u64,
    pub time: f32,
    pub character: String,
    pub reason: String,
}

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub duration: f32,
    pub handshakes_started: Vec<HandshakeRecord>,
    pub handshakes_completed: Vec<CompletionRecord>,
    pub refusals: Vec<RefusalRecord>,
    #[serde(rename = "final")]
    pub final_state: DiagnosticsSnapshot,
}

/// Plays a scenario back on a stage.
#[derive(Debug)]
pub struct ScenarioRunner {
    scenario: Scenario,
    stage: Stage,
}

impl ScenarioRunner {
    /// Validates the scenario and builds its cast.
    pub fn new(scenario: &Scenario) -> EngineResult<Self> {
        let validation = validate_scenario(scenario);
        if !validation.is_ok() {
            let messages: Vec<String> = validation.errors.iter().map(|e| e.to_string()).collect();
            return Err(EngineError::InvalidScenario(messages.join("; ")));
        }
        for warning in &validation.warnings {
            warn!("{}", warning);
        }

        let mut stage = Stage::new();
        for spec in &scenario.characters {
            let mut hierarchy = spec
                .hierarchy
                .clone()
                .unwrap_or_else(|| BoneNode::humanoid(spec.name.as_str()));
            for role in &spec.missing_joints {
                if !hierarchy.remove_joint(*role) {
                    debug!(character = %spec.name, joint = %role, "joint already absent");
                }
            }
            let character = Character::from_hierarchy(
                spec.name.as_str(),
                scenario.config.clone(),
                &hierarchy,
                spec.start,
            )?;
            stage.add(character);
        }

        for spec in &scenario.characters {
            let Some(partner) = &spec.partner else {
                continue;
            };
            let id = stage
                .find(&spec.name)
                .ok_or_else(|| EngineError::UnknownCharacter(spec.name.clone()))?;
            let partner = stage
                .find(partner)
                .ok_or_else(|| EngineError::UnknownCharacter(partner.clone()))?;
            stage.set_partner(id, Some(partner))?;
        }

        Ok(Self {
            scenario: scenario.clone(),
            stage,
        })
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Start time of the next tick, derived from the tick index so it never drifts.
    pub fn time(&self) -> f32 {
        self.stage.tick_count() as f32 * self.scenario.dt
    }

    /// Whether every tick of the run has been played.
    pub fn is_finished(&self) -> bool {
        self.stage.tick_count() >= self.scenario.tick_count() as u64
    }

    /// Intents for each character (in stage order) on the tick starting at `time`.
    pub fn intents_at(&self, time: f32) -> Vec<Intents> {
        let dt = self.scenario.dt;
        self.stage
            .characters()
            .iter()
            .map(|character| {
                let mut intents = Intents::none();
                for event in self
                    .scenario
                    .events
                    .iter()
                    .filter(|e| e.character() == character.name())
                {
                    match event {
                        IntentEvent::Forward { .. } if event.covers(time) => intents.forward = true,
                        IntentEvent::Turn { direction, .. } if event.covers(time) => {
                            intents.turn += *direction
                        }
                        IntentEvent::Handshake { .. } if event.fires(time, dt) => {
                            intents.handshake = true
                        }
                        _ => {}
                    }
                }
                intents
            })
            .collect()
    }

    /// Plays one tick. Forced-idle events apply before intents.
    pub fn step(&mut self) -> StageTick {
        let time = self.time();
        let dt = self.scenario.dt;

        let mut forced = Vec::new();
        for event in &self.scenario.events {
            if let IntentEvent::ForceIdle { character, .. } = event {
                if !event.fires(time, dt) {
                    continue;
                }
                let Some(id) = self.stage.find(character) else {
                    continue;
                };
                if let Ok(Some(transition)) = self.stage.force_idle(id) {
                    debug!(character = %character, time, "forced idle");
                    forced.push((id, transition));
                }
            }
        }

        let intents = self.intents_at(time);
        let mut tick = self.stage.tick(&intents, dt);
        tick.time = time;
        forced.append(&mut tick.transitions);
        tick.transitions = forced;
        tick
    }

    /// Plays the remaining ticks, calling `observer` after each one.
    pub fn run<F>(&mut self, mut observer: F) -> RunSummary
    where
        F: FnMut(&StageTick, &Stage),
    {
        let mut handshakes_started = Vec::new();
        let mut handshakes_completed = Vec::new();
        let mut refusals = Vec::new();

        while !self.is_finished() {
            let tick = self.step();
            for session in &tick.started {
                handshakes_started.push(HandshakeRecord {
                    tick: tick.tick,
                    time: tick.time,
                    initiator: session.initiator.clone(),
                    partner: session.partner.clone(),
                    distance: session.distance,
                });
            }
            for id in &tick.completed {
                if let Some(character) = self.stage.get(*id) {
                    handshakes_completed.push(CompletionRecord {
                        tick: tick.tick,
                        time: tick.time,
                        character: character.name().to_string(),
                    });
                }
            }
            for (id, refusal) in &tick.refused {
                if let Some(character) = self.stage.get(*id) {
                    refusals.push(RefusalRecord {
                        tick: tick.tick,
                        time: tick.time,
                        character: character.name().to_string(),
                        reason: refusal.to_string(),
                    });
                }
            }
            observer(&tick, &self.stage);
        }

        let duration = self.time();
        RunSummary {
            ticks: self.stage.tick_count(),
            duration,
            handshakes_started,
            handshakes_completed,
            refusals,
            final_state: DiagnosticsSnapshot::capture(&self.stage).with_time(duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rigmotion_spec::{AnimationMode, CharacterSpec, JointRole, TransformState};

    fn greeting() -> Scenario {
        Scenario::new(0.1, 6.0)
            .with_character(CharacterSpec::new("host").with_partner("guest"))
            .with_character(
                CharacterSpec::new("guest")
                    .with_partner("host")
                    .at(TransformState::new(Vec3::new(0.0, 0.0, 3.0), 180.0)),
            )
            .with_event(IntentEvent::Forward {
                character: "guest".into(),
                start: 0.0,
                end: 1.0,
            })
            .with_event(IntentEvent::Handshake {
                character: "host".into(),
                at: 1.5,
            })
    }

    #[test]
    fn test_walk_then_handshake() {
        let mut runner = ScenarioRunner::new(&greeting()).unwrap();
        let summary = runner.run(|_, _| {});

        assert_eq!(summary.ticks, 60);
        assert_eq!(summary.handshakes_started.len(), 1);
        let start = &summary.handshakes_started[0];
        assert_eq!(start.initiator, "host");
        assert_eq!(start.tick, 15);
        assert!((start.distance - 1.0).abs() < 1e-3);

        assert_eq!(summary.handshakes_completed.len(), 2);
        let done = summary.handshakes_completed[0].tick;
        assert!((48..=50).contains(&done), "completed at {}", done);

        let guest = summary.final_state.character("guest").unwrap();
        assert_eq!(guest.mode, AnimationMode::Idle);
        assert!((guest.position.z - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_final_snapshot_time_matches_duration() {
        let scenario = Scenario::new(0.1, 60.0).with_character(CharacterSpec::new("a"));
        let summary = ScenarioRunner::new(&scenario).unwrap().run(|_, _| {});
        assert_eq!(summary.ticks, 600);
        assert_eq!(summary.final_state.tick, 600);
        assert_eq!(summary.final_state.time, summary.duration);
        assert!((summary.duration - 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_request_before_approach_is_refused() {
        let scenario = greeting().with_event(IntentEvent::Handshake {
            character: "host".into(),
            at: 0.0,
        });
        let summary = ScenarioRunner::new(&scenario).unwrap().run(|_, _| {});
        assert_eq!(summary.refusals.len(), 1);
        assert_eq!(summary.refusals[0].tick, 0);
        assert_eq!(summary.handshakes_started.len(), 1);
    }

    #[test]
    fn test_force_idle_event() {
        let scenario = greeting().with_event(IntentEvent::ForceIdle {
            character: "host".into(),
            at: 2.0,
        });
        let mut runner = ScenarioRunner::new(&scenario).unwrap();
        let mut host_modes = Vec::new();
        let summary = runner.run(|tick, stage| {
            let host = stage.find("host").and_then(|id| stage.get(id)).unwrap();
            host_modes.push((tick.tick, host.mode()));
        });

        assert_eq!(host_modes[19].1, AnimationMode::Handshaking);
        assert_eq!(host_modes[20].1, AnimationMode::Idle);
        // Only the guest finishes its envelope.
        assert_eq!(summary.handshakes_completed.len(), 1);
        assert_eq!(summary.handshakes_completed[0].character, "guest");
    }

    #[test]
    fn test_missing_joints_pruned() {
        let scenario = Scenario::new(0.1, 0.5)
            .with_character(CharacterSpec::new("partial").without_joint(JointRole::RightShoulder));
        let runner = ScenarioRunner::new(&scenario).unwrap();
        let character = runner.stage().get(runner.stage().find("partial").unwrap()).unwrap();
        assert_eq!(character.skeleton().bound_count(), JointRole::COUNT - 4);
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let scenario = Scenario::new(0.0, 1.0).with_character(CharacterSpec::new("a"));
        let err = ScenarioRunner::new(&scenario).unwrap_err();
        assert!(matches!(err, EngineError::InvalidScenario(ref msg) if msg.contains("E010")));
    }

    #[test]
    fn test_turn_intents_sum() {
        let scenario = Scenario::new(0.1, 1.0)
            .with_character(CharacterSpec::new("a"))
            .with_event(IntentEvent::Turn {
                character: "a".into(),
                start: 0.0,
                end: 1.0,
                direction: 1.0,
            })
            .with_event(IntentEvent::Turn {
                character: "a".into(),
                start: 0.5,
                end: 1.0,
                direction: 1.0,
            });
        let runner = ScenarioRunner::new(&scenario).unwrap();
        assert_eq!(runner.intents_at(0.2)[0].turn, 1.0);
        assert_eq!(runner.intents_at(0.6)[0].turn, 2.0);
        assert_eq!(runner.intents_at(1.0)[0], Intents::none());
    }
}
