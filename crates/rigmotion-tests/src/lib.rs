//! RigMotion End-to-End Test Infrastructure
//!
//! Shared fixtures and a determinism harness for the integration tests:
//!
//! - **Fixtures**: reference stages and scenarios (two partners at a given
//!   gap, partial rigs, the walk-up-and-greet scenario).
//! - **Determinism**: replays a scenario several times and compares the
//!   BLAKE3 pose-trace hashes.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rigmotion-tests
//! ```

pub mod determinism;
pub mod fixtures;

pub use determinism::{verify_determinism, DeterminismResult};
