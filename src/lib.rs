//! Shepherding simulation: sheep flocking under local social forces, herded
//! into a pen by shepherds that pick targets from what they see.
//!
//! The engine lives in [`shepherding_core`]; this crate wires it to file
//! output and the robot bridge and drives whole runs.

pub mod app;

pub use app::{load_config, RunSummary, Simulation};
pub use shepherding_core as core;
pub use shepherding_data as data;
pub use shepherding_io as io;
