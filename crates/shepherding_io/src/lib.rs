//! # Shepherding IO
//!
//! File I/O for the shepherding simulation.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - Append-only per-tick logs and their tolerant reader
//! - The run parameters record
//! - A file-based robot bridge

/// File-based robot-in-the-loop bridge
pub mod bridge;
/// Error types and result aliases for I/O operations
pub mod error;
/// Per-tick logs and the run parameters record
pub mod history;

pub use bridge::FileBridge;
pub use error::{IoError, Result};
pub use history::{log_digest, read_tick_log, RunParameters, TickLog, TickLogger};
