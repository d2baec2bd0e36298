//! A set of characters ticked together.
//!
//! Each tick runs in two passes. First every character consumes its intents
//! in insertion order; a handshake request is resolved through the
//! coordinator right away, so both participants are already Handshaking when
//! the second pass runs. Then every character synthesizes its pose.

use serde::Serialize;
use tracing::warn;

use crate::character::Character;
use crate::error::{EngineError, EngineResult};
use crate::handshake::{HandshakeCoordinator, HandshakeRefusal, HandshakeSession};
use crate::pose::sanitize_dt;
use crate::state::{Intents, Transition};

/// Index of a character on a [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CharacterId(usize);

impl CharacterId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Everything that happened during one [`Stage::tick`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StageTick {
    /// Tick number, starting at 0.
    pub tick: u64,
    /// Stage time at the start of the tick.
    pub time: f32,
    /// Mode changes, in the order they happened.
    pub transitions: Vec<(CharacterId, Transition)>,
    pub started: Vec<HandshakeSession>,
    pub refused: Vec<(CharacterId, HandshakeRefusal)>,
    /// Characters whose handshake completed this tick.
    pub completed: Vec<CharacterId>,
}

/// Owns characters and their partner links.
#[derive(Debug, Default)]
pub struct Stage {
    characters: Vec<Character>,
    partners: Vec<Option<CharacterId>>,
    tick: u64,
    time: f64,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a character and returns its id.
    pub fn add(&mut self, character: Character) -> CharacterId {
        self.characters.push(character);
        self.partners.push(None);
        CharacterId(self.characters.len() - 1)
    }

    /// Sets (or clears) `id`'s handshake partner. The link is one-way.
    pub fn set_partner(&mut self, id: CharacterId, partner: Option<CharacterId>) -> EngineResult<()> {
        self.check(id)?;
        if let Some(p) = partner {
            self.check(p)?;
        }
        self.partners[id.0] = partner;
        Ok(())
    }

    /// Makes `a` and `b` each other's partner.
    pub fn link_partners(&mut self, a: CharacterId, b: CharacterId) -> EngineResult<()> {
        self.set_partner(a, Some(b))?;
        self.set_partner(b, Some(a))
    }

    pub fn partner(&self, id: CharacterId) -> Option<CharacterId> {
        self.partners.get(id.0).copied().flatten()
    }

    /// Finds a character by name.
    pub fn find(&self, name: &str) -> Option<CharacterId> {
        self.characters
            .iter()
            .position(|c| c.name() == name)
            .map(CharacterId)
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(id.0)
    }

    /// Mutable access to two distinct characters at once.
    pub fn pair_mut(
        &mut self,
        a: CharacterId,
        b: CharacterId,
    ) -> Option<(&mut Character, &mut Character)> {
        if a == b || a.0 >= self.characters.len() || b.0 >= self.characters.len() {
            return None;
        }
        if a.0 < b.0 {
            let (left, right) = self.characters.split_at_mut(b.0);
            Some((&mut left[a.0], &mut right[0]))
        } else {
            let (left, right) = self.characters.split_at_mut(a.0);
            Some((&mut right[0], &mut left[b.0]))
        }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = CharacterId> {
        (0..self.characters.len()).map(CharacterId)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Ticks completed so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Elapsed stage time, summed in `f64` so long runs do not drift.
    pub fn time(&self) -> f32 {
        self.time as f32
    }

    /// Forces a character to Idle, cancelling any running handshake.
    pub fn force_idle(&mut self, id: CharacterId) -> EngineResult<Option<Transition>> {
        self.check(id)?;
        Ok(self.characters[id.0].force_idle())
    }

    /// Advances every character by `dt`.
    ///
    /// `intents[i]` belongs to the character with index `i`; missing entries
    /// mean no intent. Non-positive or non-finite `dt` does nothing.
    pub fn tick(&mut self, intents: &[Intents], dt: f32) -> StageTick {
        let mut out = StageTick {
            tick: self.tick,
            time: self.time(),
            ..StageTick::default()
        };
        if sanitize_dt(dt) == 0.0 {
            return out;
        }

        for index in 0..self.characters.len() {
            let id = CharacterId(index);
            let intent = intents.get(index).copied().unwrap_or_default();
            let update = self.characters[index].update_state(&intent, dt);
            if let Some(transition) = update.transition {
                out.transitions.push((id, transition));
            }
            if update.handshake_requested {
                self.resolve_handshake(id, &mut out);
            }
        }

        for (index, character) in self.characters.iter_mut().enumerate() {
            if let Some(transition) = character.animate(dt) {
                out.transitions.push((CharacterId(index), transition));
                out.completed.push(CharacterId(index));
            }
        }

        self.tick += 1;
        self.time += f64::from(dt);
        out
    }

    fn resolve_handshake(&mut self, initiator: CharacterId, out: &mut StageTick) {
        let Some(partner) = self.partner(initiator) else {
            let name = self.characters[initiator.0].name().to_string();
            warn!(character = %name, "handshake requested without a partner; ignored");
            out.refused
                .push((initiator, HandshakeRefusal::NoPartner { initiator: name }));
            return;
        };
        let Some((a, b)) = self.pair_mut(initiator, partner) else {
            return;
        };

        let before = (a.mode(), b.mode());
        let coordinator = HandshakeCoordinator::new(a.config().handshake.distance);
        match coordinator.attempt(a, b) {
            Ok(session) => {
                out.transitions
                    .push((initiator, Transition::new(before.0, a.mode())));
                out.transitions
                    .push((partner, Transition::new(before.1, b.mode())));
                out.started.push(session);
            }
            Err(refusal) => out.refused.push((initiator, refusal)),
        }
    }

    fn check(&self, id: CharacterId) -> EngineResult<()> {
        if id.0 < self.characters.len() {
            Ok(())
        } else {
            Err(EngineError::UnknownCharacter(format!("#{}", id.0)))
        }
    }
}
