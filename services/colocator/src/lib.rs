//! Storm / Argo colocation service library.
//!
//! The `colocator` binary is a thin wrapper over these modules so the run
//! driver and configuration layering can be tested without a process.

pub mod cli;
pub mod commands;
pub mod config;
pub mod runner;
