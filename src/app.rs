use anyhow::{Context, Result};
use shepherding_core::bridge::{NullBridge, ShepherdBridge};
use shepherding_core::config::AppConfig;
use shepherding_core::metrics::Metrics;
use shepherding_core::world::{TickReport, World};
use shepherding_io::{FileBridge, RunParameters, TickLogger};
use std::path::Path;
use std::time::Instant;

/// Reads `path` as TOML. A missing file yields the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => AppConfig::from_toml(&content)
            .with_context(|| format!("invalid configuration in {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "No config file, using defaults");
            Ok(AppConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    pub penned: usize,
    pub n_sheep: usize,
    /// Every sheep ended in the pen before the tick budget ran out.
    pub finished: bool,
    pub seed: u64,
    pub mean_distance_to_pen: f64,
}

/// A world plus its outputs: tick logs, bridge and metrics.
pub struct Simulation {
    pub world: World,
    pub metrics: Metrics,
    logger: TickLogger,
    bridge: Box<dyn ShepherdBridge>,
}

impl Simulation {
    /// Builds the world and the outputs named in `config`.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let logger = if config.output.enabled {
            TickLogger::new_at(&config.output.dir)
                .with_context(|| format!("opening output dir {}", config.output.dir))?
        } else {
            TickLogger::new_dummy()
        };
        let bridge: Box<dyn ShepherdBridge> = if config.bridge.enabled {
            Box::new(FileBridge::new(&config.bridge.input, &config.bridge.output))
        } else {
            Box::new(NullBridge)
        };
        let world = World::new(config)?;
        Ok(Self::with_parts(world, logger, bridge))
    }

    pub fn with_parts(world: World, logger: TickLogger, bridge: Box<dyn ShepherdBridge>) -> Self {
        Self {
            world,
            metrics: Metrics::new(),
            logger,
            bridge,
        }
    }

    /// Runs one tick and logs it.
    pub fn tick(&mut self) -> Result<TickReport> {
        let start = Instant::now();
        let report = self.world.step(self.bridge.as_mut());
        self.logger.log_tick(
            &self.world.sheep_records(report.tick),
            &self.world.shepherd_records(report.tick),
        )?;
        if !self.world.duplicate_targets().is_empty() {
            self.metrics.increment_counter("duplicate_targets");
        }
        self.metrics.record_tick(
            start.elapsed(),
            report.penned,
            self.world.sheep.len(),
            report.mode_switches,
        );
        Ok(report)
    }

    /// Runs until every sheep is penned or the tick budget is spent.
    pub fn run(&mut self) -> Result<RunSummary> {
        let params = RunParameters::new(self.world.config(), self.world.seed());
        self.logger.write_parameters(&params)?;
        tracing::info!(
            sheep = params.n_sheep,
            shepherds = params.n_shepherd,
            seed = params.seed,
            fingerprint = %params.fingerprint,
            "Run started"
        );

        let budget = self.world.config().world.max_ticks;
        let mut finished = false;
        while self.world.tick < budget {
            if self.tick()?.finished {
                finished = true;
                break;
            }
        }

        let summary = RunSummary {
            ticks: self.world.tick,
            penned: self.world.penned_count(),
            n_sheep: self.world.sheep.len(),
            finished,
            seed: self.world.seed(),
            mean_distance_to_pen: self.world.mean_distance_to_pen(),
        };
        tracing::info!(
            ticks = summary.ticks,
            penned = summary.penned,
            finished = summary.finished,
            mode_switches = self.metrics.mode_switches(),
            elapsed_ms = self.metrics.elapsed().as_millis() as u64,
            "Run finished"
        );
        Ok(summary)
    }
}
