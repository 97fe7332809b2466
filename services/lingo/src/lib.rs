//! Lingo CLI Library Crate
//!
//! Configuration, argument parsing and console I/O for the `lingo` binary.
//! The binary in `bin/lingo.rs` is a thin wrapper that wires these to an
//! `AssistantSession` from `lingo-core`.

pub mod app;
pub mod cli;
pub mod config;
pub mod console;
