//! Determinism verification for scenario playback.
//!
//! A scenario is replayed several times from scratch and the BLAKE3 hash of
//! each run's pose trace is compared. Any difference means some state leaked
//! between runs or depends on something other than `(intents, dt)`.

use rigmotion_cli::commands::simulate::simulate;
use rigmotion_spec::Scenario;

/// Result of a determinism check.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether every run produced the same hash.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Pose-trace hash of each run.
    pub hashes: Vec<String>,
}

impl DeterminismResult {
    /// Hash of the first run.
    pub fn hash(&self) -> &str {
        self.hashes.first().map(String::as_str).unwrap_or_default()
    }

    /// Panics with every hash if the runs differ.
    pub fn assert_deterministic(&self) {
        assert!(
            self.is_deterministic,
            "Non-deterministic pose trace over {} runs:\n{}",
            self.runs,
            self.hashes.join("\n")
        );
    }
}

/// Plays `scenario` `runs` times, hashing every tick of the pose trace.
pub fn verify_determinism(scenario: &Scenario, runs: usize) -> DeterminismResult {
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let hashes: Vec<String> = (0..runs)
        .map(|_| {
            simulate(scenario, 1)
                .expect("scenario should build")
                .pose_hash
        })
        .collect();

    DeterminismResult {
        is_deterministic: hashes.windows(2).all(|w| w[0] == w[1]),
        runs,
        hashes,
    }
}

/// Independent hash of a byte buffer, for comparing against recorded traces.
pub fn compute_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
