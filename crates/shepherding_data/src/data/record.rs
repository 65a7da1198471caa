use super::agent::{SheepState, ShepherdMode};
use serde::{Deserialize, Serialize};

/// One sheep at one tick, as written to the per-tick log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheepRecord {
    pub tick: u64,
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub state: SheepState,
}

/// One shepherd at one tick, as written to the per-tick log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShepherdRecord {
    pub tick: u64,
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub approach_sheep_id: usize,
    pub mode: ShepherdMode,
    pub coll_threshold: f64,
    pub drive_threshold: f64,
}

/// Rounds to a fixed number of decimals for log output.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
