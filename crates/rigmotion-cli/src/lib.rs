//! RigMotion CLI library.
//!
//! Input loading, logging setup, pose-trace hashing and the command
//! implementations behind the `rigmotion` binary.

pub mod commands;
pub mod input;
pub mod logging;
pub mod trace;
