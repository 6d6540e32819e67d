//! CLI module for toolsync - command-line interface and subcommands.
//!
//! Provides pull/push sync runs and library listing.

pub mod commands;

pub use commands::Cli;
