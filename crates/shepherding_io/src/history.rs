use crate::error::{IoError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shepherding_core::config::AppConfig;
use shepherding_data::{SheepRecord, ShepherdRecord};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const SHEEP_LOG: &str = "sheep_data.jsonl";
pub const SHEPHERD_LOG: &str = "shepherd_data.jsonl";
pub const PARAMETERS_FILE: &str = "parameters.json";

/// Appends one JSON array per tick to the sheep and shepherd logs.
pub struct TickLogger {
    sheep_file: Option<BufWriter<File>>,
    shepherd_file: Option<BufWriter<File>>,
    log_dir: PathBuf,
}

fn open_append(path: &Path) -> Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| IoError::from(e).with_context(format!("opening {}", path.display())))?;
    Ok(BufWriter::new(file))
}

impl TickLogger {
    pub fn new_at<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self {
            sheep_file: Some(open_append(&dir.join(SHEEP_LOG))?),
            shepherd_file: Some(open_append(&dir.join(SHEPHERD_LOG))?),
            log_dir: dir.to_path_buf(),
        })
    }

    /// Logger that accepts and discards everything.
    pub fn new_dummy() -> Self {
        Self {
            sheep_file: None,
            shepherd_file: None,
            log_dir: PathBuf::new(),
        }
    }

    #[must_use]
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn log_tick(&mut self, sheep: &[SheepRecord], shepherds: &[ShepherdRecord]) -> Result<()> {
        if let Some(ref mut file) = self.shepherd_file {
            writeln!(file, "{}", serde_json::to_string(shepherds)?)?;
            file.flush()?;
        }
        if let Some(ref mut file) = self.sheep_file {
            writeln!(file, "{}", serde_json::to_string(sheep)?)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Writes `parameters.json`, replacing any previous one.
    pub fn write_parameters(&self, params: &RunParameters) -> Result<()> {
        if self.sheep_file.is_none() {
            return Ok(());
        }
        let path = self.log_dir.join(PARAMETERS_FILE);
        let json = serde_json::to_string_pretty(params)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Run-level record written next to the tick logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub n_sheep: usize,
    pub n_shepherd: usize,
    pub seed: u64,
    pub l3: f64,
    pub collection_threshold: f64,
    pub drive_threshold: f64,
    pub collection_threshold_deg: f64,
    pub drive_threshold_deg: f64,
    pub network: String,
    pub fingerprint: String,
    pub started_at: String,
}

impl RunParameters {
    #[must_use]
    pub fn new(config: &AppConfig, seed: u64) -> Self {
        let h = &config.shepherd;
        Self {
            n_sheep: config.world.n_sheep,
            n_shepherd: config.world.n_shepherd,
            seed,
            l3: h.l3,
            collection_threshold: h.collection_threshold,
            drive_threshold: h.drive_threshold,
            collection_threshold_deg: h.collection_threshold.to_degrees(),
            drive_threshold_deg: h.drive_threshold.to_degrees(),
            network: format!("{:?}", config.network.strategy).to_lowercase(),
            fingerprint: config.fingerprint(),
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Ticks parsed from a log, plus the number of lines that could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLog<T> {
    pub ticks: Vec<Vec<T>>,
    pub skipped: usize,
}

/// Reads a per-tick log, skipping malformed lines.
pub fn read_tick_log<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<TickLog<T>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::not_found(path.display().to_string())
        } else {
            IoError::from(e)
        }
    })?;
    let reader = BufReader::new(file);
    let mut ticks = Vec::new();
    let mut skipped = 0;
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Vec<T>>(&line) {
            Ok(records) => ticks.push(records),
            Err(e) => {
                skipped += 1;
                tracing::warn!(line = n + 1, file = %path.display(), error = %e, "Skipping malformed log line");
            }
        }
    }
    Ok(TickLog { ticks, skipped })
}

/// SHA-256 of a log file, for comparing runs.
pub fn log_digest<P: AsRef<Path>>(path: P) -> Result<String> {
    let data = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}
