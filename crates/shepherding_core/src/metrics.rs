//! Run metrics and logging setup.
//!
//! Provides structured logging and counters for monitoring a herding run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Ticks between periodic summary lines.
pub const SUMMARY_INTERVAL: u64 = 1000;

/// Metrics collector for a single run.
pub struct Metrics {
    tick_count: AtomicU64,
    penned_count: AtomicU64,
    mode_switches: AtomicU64,
    pub counters: Mutex<HashMap<String, AtomicU64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            penned_count: AtomicU64::new(0),
            mode_switches: AtomicU64::new(0),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, penned: usize, flock: usize, switches: usize) {
        self.tick_count.fetch_add(1, Ordering::Relaxed);
        self.penned_count.store(penned as u64, Ordering::Relaxed);
        self.mode_switches
            .fetch_add(switches as u64, Ordering::Relaxed);

        let tick = self.tick_count.load(Ordering::Relaxed);
        if tick % SUMMARY_INTERVAL == 0 {
            tracing::info!(
                tick = tick,
                penned = penned,
                flock = flock,
                mode_switches = self.mode_switches.load(Ordering::Relaxed),
                duration_us = duration.as_micros() as u64,
                "Herding tick"
            );
        }
    }

    /// Increments a named counter.
    pub fn increment_counter(&self, name: &str) {
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters
            .get(name)
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn penned_count(&self) -> u64 {
        self.penned_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn mode_switches(&self) -> u64 {
        self.mode_switches.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a fmt subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .finish(),
    )
    .ok();
}
