//! credwire-cli library.
//!
//! This crate provides the core components for the `credwire-cli` binary:
//! subcommand implementations, text rendering for decoded records, and the
//! CLI error type.

pub mod commands;
pub mod error;
pub mod render;
