//! Simulate command implementation
//!
//! Plays a scenario headlessly and prints the run summary together with a
//! BLAKE3 hash of the sampled pose trace.

use anyhow::Result;
use colored::Colorize;
use rigmotion_engine::{RunSummary, ScenarioRunner};
use rigmotion_spec::{validate_scenario, Scenario};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;

use super::json_output::{self, error_codes, CommandOutput, JsonDiagnostic};
use super::reporting;
use crate::input;
use crate::trace::{self, PoseSample, PoseTrace};

/// Payload of `simulate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulateResult {
    pub summary: RunSummary,
    pub pose_hash: String,
    pub sampled_frames: u64,
    pub samples: Vec<PoseSample>,
}

/// Plays a scenario, sampling every `sample_every` ticks (and always the last one).
pub fn simulate(scenario: &Scenario, sample_every: u64) -> rigmotion_engine::EngineResult<SimulateResult> {
    let sample_every = sample_every.max(1);
    let last = scenario.tick_count() as u64;
    let mut runner = ScenarioRunner::new(scenario)?;
    debug!(
        characters = scenario.characters.len(),
        events = scenario.events.len(),
        ticks = last,
        dt = scenario.dt,
        "scenario built"
    );
    let mut pose_trace = PoseTrace::new();
    let mut samples = Vec::new();

    let summary = runner.run(|tick, stage| {
        if tick.tick % sample_every == 0 || tick.tick + 1 == last {
            pose_trace.record(tick.tick, stage);
            samples.extend(trace::samples(tick.tick, stage));
        }
    });

    let pose_hash = pose_trace.hash();
    debug!(
        ticks = summary.ticks,
        started = summary.handshakes_started.len(),
        completed = summary.handshakes_completed.len(),
        refused = summary.refusals.len(),
        frames = pose_trace.frames(),
        %pose_hash,
        "scenario finished"
    );

    Ok(SimulateResult {
        summary,
        pose_hash,
        sampled_frames: pose_trace.frames(),
        samples,
    })
}

/// Run the simulate command
///
/// # Returns
/// Exit code: 0 if the scenario ran, 1 if it could not be loaded or built
pub fn run(scenario_path: &str, json: bool, sample_every: u64) -> Result<ExitCode> {
    let loaded = input::load::<Scenario>(Path::new(scenario_path));

    if json {
        let output = match &loaded {
            Err(e) => CommandOutput::failure(vec![JsonDiagnostic::from(e)], Vec::new()),
            Ok(loaded) => {
                let validation = validate_scenario(&loaded.value);
                let warnings: Vec<JsonDiagnostic> =
                    validation.warnings.iter().map(JsonDiagnostic::from).collect();
                if !validation.is_ok() {
                    CommandOutput::failure(
                        validation.errors.iter().map(JsonDiagnostic::from).collect(),
                        warnings,
                    )
                } else {
                    match simulate(&loaded.value, sample_every) {
                        Ok(result) => CommandOutput::success(result, warnings),
                        Err(e) => CommandOutput::failure(
                            vec![JsonDiagnostic::new(error_codes::SIMULATION, e.to_string())],
                            warnings,
                        ),
                    }
                }
            }
        };
        json_output::print(&output)?;
        return Ok(if output.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::from(1)
        });
    }

    println!("{} {}", "Simulating:".cyan().bold(), scenario_path);
    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("  {} {}", "x".red(), e);
            return Ok(ExitCode::from(1));
        }
    };
    let scenario = loaded.value;

    let validation = validate_scenario(&scenario);
    reporting::print_validation(&validation);
    if !validation.is_ok() {
        println!(
            "\n{} Scenario has {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }

    let result = match simulate(&scenario, sample_every) {
        Ok(result) => result,
        Err(e) => {
            println!("  {} {}", "x".red(), e);
            println!("\n{} Scenario could not be built", "FAILED".red().bold());
            return Ok(ExitCode::from(1));
        }
    };
    print_summary(&result);
    Ok(ExitCode::SUCCESS)
}

fn print_summary(result: &SimulateResult) {
    let summary = &result.summary;
    println!(
        "{} {} ticks, {:.3}s",
        "Ran:".dimmed(),
        summary.ticks,
        summary.duration
    );

    for start in &summary.handshakes_started {
        println!(
            "  {} t={:.3} handshake {} <-> {} (distance {:.3})",
            "+".green(),
            start.time,
            start.initiator,
            start.partner,
            start.distance
        );
    }
    for done in &summary.handshakes_completed {
        println!(
            "  {} t={:.3} {} back to idle",
            "-".green(),
            done.time,
            done.character
        );
    }
    for refusal in &summary.refusals {
        println!(
            "  {} t={:.3} {}: {}",
            "!".yellow(),
            refusal.time,
            refusal.character,
            refusal.reason
        );
    }

    println!("\n{}", "Final state:".cyan().bold());
    for c in &summary.final_state.characters {
        println!(
            "  {:<12} pos=({:.3}, {:.3}, {:.3}) yaw={:.1} mode={} joints={}",
            c.name,
            c.position.x,
            c.position.y,
            c.position.z,
            c.yaw_degrees,
            c.mode,
            c.bound_joints
        );
    }
    for pair in &summary.final_state.pairs {
        println!(
            "  {} <-> {} distance={:.3}{}",
            pair.a,
            pair.b,
            pair.distance,
            if pair.within_handshake_distance {
                " (within handshake distance)"
            } else {
                ""
            }
        );
    }

    println!(
        "\n{} {} ({} frames)",
        "Pose hash:".dimmed(),
        result.pose_hash,
        result.sampled_frames
    );
}
