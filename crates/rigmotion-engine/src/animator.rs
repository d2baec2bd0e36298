//! Discrete-animator consumers.
//!
//! A character publishes its `(walking, handshaking)` pair to an
//! [`AnimatorSink`] on every mode change. Blend authoring and cross-fades
//! belong to the sink.

use std::cell::RefCell;
use std::rc::Rc;

use rigmotion_spec::AnimationFlags;

/// Receives animation flags on each state change.
pub trait AnimatorSink {
    /// Called with the new flags after every transition.
    fn set_flags(&mut self, flags: AnimationFlags);
}

/// Discards all flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAnimator;

impl AnimatorSink for NullAnimator {
    fn set_flags(&mut self, _flags: AnimationFlags) {}
}

/// Records every flag pair it receives. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct FlagRecorder {
    log: Rc<RefCell<Vec<AnimationFlags>>>,
}

impl FlagRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags received so far, oldest first.
    pub fn flags(&self) -> Vec<AnimationFlags> {
        self.log.borrow().clone()
    }

    /// Most recent flags, if any were received.
    pub fn last(&self) -> Option<AnimationFlags> {
        self.log.borrow().last().copied()
    }

    pub fn len(&self) -> usize {
        self.log.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.borrow().is_empty()
    }
}

impl AnimatorSink for FlagRecorder {
    fn set_flags(&mut self, flags: AnimationFlags) {
        self.log.borrow_mut().push(flags);
    }
}
