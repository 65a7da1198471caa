//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section falls back to its defaults, so a
//! file only needs to name the values it changes.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! n_sheep = 20
//! n_shepherd = 2
//! max_ticks = 20000
//! seed = 42
//!
//! [shepherd]
//! l3 = 400.0
//! collection_threshold = 1.5708
//!
//! [network]
//! strategy = "voronoi"
//! ```

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, PI, TAU};

/// Run-level parameters: population sizes, tick budget and the RNG seed.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub n_sheep: usize,
    pub n_shepherd: usize,
    pub max_ticks: u64,
    /// Seed for the single run generator. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            n_sheep: 20,
            n_shepherd: 1,
            max_ticks: 20_000,
            seed: None,
        }
    }
}

/// Rectangular arena. Walls sit at `padding` and `padding + width/height`.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            padding: 30.0,
        }
    }
}

/// Square pen anchored at its bottom-right corner.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PenConfig {
    pub corner_x: f64,
    pub corner_y: f64,
    pub size: f64,
    pub fence_width: f64,
    /// Offset of the gate from the anchoring point, along both axes.
    pub gate_inset: f64,
}

impl Default for PenConfig {
    fn default() -> Self {
        Self {
            corner_x: 800.0,
            corner_y: 800.0,
            size: 200.0,
            fence_width: 10.0,
            gate_inset: 30.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SpawnRect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl SpawnRect {
    #[must_use]
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    fn is_ordered(&self) -> bool {
        self.x_min <= self.x_max && self.y_min <= self.y_max
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SpawnConfig {
    pub sheep: SpawnRect,
    pub shepherd: SpawnRect,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            sheep: SpawnRect::new(100.0, 350.0, 100.0, 350.0),
            shepherd: SpawnRect::new(0.0, 200.0, 300.0, 400.0),
        }
    }
}

/// Sheep social force and kinematics parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SheepConfig {
    pub radius: f64,
    pub cruise_speed: f64,
    pub pen_cruise_speed: f64,
    pub max_speed: f64,
    pub repulsion_distance: f64,
    pub attraction_distance: f64,
    pub k_repulsion: f64,
    pub k_attraction: f64,
    pub k_shepherd: f64,
    /// Rotational diffusion coefficient.
    pub k_dr: f64,
    pub dt: f64,
    pub max_turning_rate: f64,
    /// Shepherds closer than this push the sheep away.
    pub safe_distance: f64,
}

impl Default for SheepConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            cruise_speed: 1.0,
            pen_cruise_speed: 0.5,
            max_speed: 2.0,
            repulsion_distance: 25.0,
            attraction_distance: 80.0,
            k_repulsion: 3.0,
            k_attraction: 8.0,
            k_shepherd: 5.0,
            k_dr: 0.01,
            dt: 0.1,
            max_turning_rate: FRAC_PI_4,
            safe_distance: 200.0,
        }
    }
}

/// Shepherd drive, avoidance and target-switching parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ShepherdConfig {
    pub radius: f64,
    pub max_speed: f64,
    /// Distance of the drive point behind the target, away from the pen.
    pub l1: f64,
    /// Range within which shepherds repel each other.
    pub l3: f64,
    /// Rotational diffusion coefficient.
    pub dr: f64,
    pub dt: f64,
    pub k_drive: f64,
    pub k_avoid: f64,
    pub collection_threshold: f64,
    pub drive_threshold: f64,
}

impl Default for ShepherdConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            max_speed: 250.0,
            l1: 30.0,
            l3: 400.0,
            dr: 0.1,
            dt: 0.01,
            k_drive: 100.0,
            k_avoid: 100.0,
            collection_threshold: FRAC_PI_2,
            drive_threshold: FRAC_PI_6,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStrategy {
    #[default]
    Metric,
    Voronoi,
}

impl std::str::FromStr for NetworkStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "voronoi" => Ok(Self::Voronoi),
            other => anyhow::bail!("Unknown network strategy '{other}'"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    pub strategy: NetworkStrategy,
    /// Full visual field in radians; `2π` sees everything.
    pub field_of_view: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            strategy: NetworkStrategy::Metric,
            field_of_view: TAU,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct OutputConfig {
    pub enabled: bool,
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: "results/default".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BridgeConfig {
    pub enabled: bool,
    /// Robot pose file, read once per tick.
    pub input: String,
    /// Drive point file, overwritten once per tick.
    pub output: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            input: "agent_list.json".to_string(),
            output: "virtual_robot.json".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub arena: ArenaConfig,
    pub pen: PenConfig,
    pub spawn: SpawnConfig,
    pub sheep: SheepConfig,
    pub shepherd: ShepherdConfig,
    pub network: NetworkConfig,
    pub output: OutputConfig,
    pub bridge: BridgeConfig,
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // World validation
        anyhow::ensure!(self.world.n_sheep > 0, "Sheep count must be positive");
        anyhow::ensure!(
            self.world.n_shepherd > 0,
            "Shepherd count must be positive"
        );

        // Arena and pen validation
        anyhow::ensure!(
            self.arena.width > 0.0 && self.arena.height > 0.0,
            "Arena dimensions must be positive"
        );
        anyhow::ensure!(self.arena.padding >= 0.0, "Arena padding must be non-negative");
        anyhow::ensure!(self.pen.size > 0.0, "Pen size must be positive");
        anyhow::ensure!(
            self.pen.fence_width >= 0.0 && self.pen.gate_inset >= 0.0,
            "Pen fence width and gate inset must be non-negative"
        );
        let (min_x, max_x) = (self.arena.padding, self.arena.padding + self.arena.width);
        let (min_y, max_y) = (self.arena.padding, self.arena.padding + self.arena.height);
        anyhow::ensure!(
            self.pen.corner_x - self.pen.size >= min_x
                && self.pen.corner_x <= max_x
                && self.pen.corner_y - self.pen.size >= min_y
                && self.pen.corner_y <= max_y,
            "Pen must lie inside the arena"
        );
        anyhow::ensure!(
            self.spawn.sheep.is_ordered() && self.spawn.shepherd.is_ordered(),
            "Spawn rectangles must have min <= max"
        );

        // Sheep validation
        let s = &self.sheep;
        anyhow::ensure!(s.radius > 0.0, "Sheep radius must be positive");
        anyhow::ensure!(s.max_speed > 0.0, "Sheep max speed must be positive");
        anyhow::ensure!(
            s.repulsion_distance > 0.0 && s.attraction_distance > 0.0,
            "Sheep interaction distances must be positive"
        );
        anyhow::ensure!(s.safe_distance > 0.0, "Sheep safe distance must be positive");
        anyhow::ensure!(s.dt > 0.0, "Sheep timestep must be positive");
        anyhow::ensure!(s.k_dr >= 0.0, "Sheep diffusion must be non-negative");
        anyhow::ensure!(
            s.max_turning_rate > 0.0,
            "Sheep max turning rate must be positive"
        );

        // Shepherd validation
        let h = &self.shepherd;
        anyhow::ensure!(h.radius > 0.0, "Shepherd radius must be positive");
        anyhow::ensure!(h.max_speed > 0.0, "Shepherd max speed must be positive");
        anyhow::ensure!(h.l1 > 0.0 && h.l3 > 0.0, "Shepherd l1 and l3 must be positive");
        anyhow::ensure!(h.dt > 0.0, "Shepherd timestep must be positive");
        anyhow::ensure!(h.dr >= 0.0, "Shepherd diffusion must be non-negative");
        anyhow::ensure!(
            (0.0..=PI).contains(&h.collection_threshold),
            "Collection threshold must be in [0, π]"
        );
        anyhow::ensure!(
            (0.0..=PI).contains(&h.drive_threshold),
            "Drive threshold must be in [0, π]"
        );

        // Network validation
        anyhow::ensure!(
            self.network.field_of_view > 0.0 && self.network.field_of_view <= TAU,
            "Field of view must be in (0, 2π]"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Hash of every section that changes agent behavior.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.arena).as_bytes());
        hasher.update(format!("{:?}", self.pen).as_bytes());
        hasher.update(format!("{:?}", self.spawn).as_bytes());
        hasher.update(format!("{:?}", self.sheep).as_bytes());
        hasher.update(format!("{:?}", self.shepherd).as_bytes());
        hasher.update(format!("{:?}", self.network).as_bytes());
        hex::encode(hasher.finalize())
    }
}
