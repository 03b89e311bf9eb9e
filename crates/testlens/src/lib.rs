//! testlens library
//!
//! This module exports the command-line configuration, subcommands and
//! report writers of testlens for use in integration tests and as a library.

pub mod commands;
pub mod config;
pub mod report;
