//! Bind command implementation
//!
//! Loads a bone hierarchy and reports which joint roles resolve.

use anyhow::Result;
use colored::Colorize;
use rigmotion_engine::{BoundSkeleton, Rig};
use rigmotion_spec::{BoneNode, JointRole};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{self, error_codes, CommandOutput, JsonDiagnostic};
use crate::input;

/// Binding status of one joint role.
#[derive(Debug, Clone, Serialize)]
pub struct JointStatus {
    pub role: JointRole,
    pub path: String,
    pub bound: bool,
}

/// Payload of `bind --json`.
#[derive(Debug, Clone, Serialize)]
pub struct BindResult {
    pub node_count: usize,
    pub bound: usize,
    pub joints: Vec<JointStatus>,
}

fn statuses(skeleton: &BoundSkeleton) -> Vec<JointStatus> {
    JointRole::ALL
        .iter()
        .map(|role| JointStatus {
            role: *role,
            path: role.hierarchy_path(),
            bound: skeleton.is_bound(*role),
        })
        .collect()
}

/// Run the bind command
///
/// # Returns
/// Exit code: 0 if the rig binds (possibly partially), 1 if it cannot bind at all
pub fn run(hierarchy_path: &str, json: bool) -> Result<ExitCode> {
    let loaded = input::load::<BoneNode>(Path::new(hierarchy_path));

    if json {
        let output = match &loaded {
            Err(e) => CommandOutput::failure(vec![JsonDiagnostic::from(e)], Vec::new()),
            Ok(loaded) => {
                let rig = Rig::from_hierarchy(&loaded.value);
                match BoundSkeleton::bind(&rig) {
                    Ok(skeleton) => {
                        let joints = statuses(&skeleton);
                        let warnings = joints
                            .iter()
                            .filter(|j| !j.bound)
                            .map(|j| {
                                JsonDiagnostic::new(
                                    error_codes::BIND,
                                    format!("{} not found at '{}'", j.role, j.path),
                                )
                            })
                            .collect();
                        CommandOutput::success(
                            BindResult {
                                node_count: rig.len(),
                                bound: skeleton.bound_count(),
                                joints,
                            },
                            warnings,
                        )
                    }
                    Err(e) => CommandOutput::failure(
                        vec![JsonDiagnostic::new(error_codes::BIND, e.to_string())],
                        Vec::new(),
                    ),
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

    println!("{} {}", "Binding:".cyan().bold(), hierarchy_path);
    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            println!("  {} {}", "x".red(), e);
            return Ok(ExitCode::from(1));
        }
    };

    let rig = Rig::from_hierarchy(&loaded.value);
    let skeleton = match BoundSkeleton::bind(&rig) {
        Ok(skeleton) => skeleton,
        Err(e) => {
            println!("  {} {}", "x".red(), e);
            println!("\n{} Rig cannot be bound", "FAILED".red().bold());
            return Ok(ExitCode::from(1));
        }
    };

    for status in statuses(&skeleton) {
        if status.bound {
            println!("  {} {:<16} {}", "+".green(), status.role.to_string(), status.path.dimmed());
        } else {
            println!("  {} {:<16} {}", "-".yellow(), status.role.to_string(), status.path.dimmed());
        }
    }

    let bound = skeleton.bound_count();
    if bound == JointRole::COUNT {
        println!("\n{} All {} joints bound", "SUCCESS".green().bold(), bound);
    } else {
        println!(
            "\n{} {} of {} joints bound; missing channels will not animate",
            "PARTIAL".yellow().bold(),
            bound,
            JointRole::COUNT
        );
    }
    Ok(ExitCode::SUCCESS)
}
