pub mod macros;

use shepherding_lib::core::config::{AppConfig, SpawnRect};
use shepherding_lib::core::world::World;
use shepherding_lib::data::{Sheep, Shepherd, Vec2};

type ConfigMod = Box<dyn FnOnce(&mut AppConfig)>;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    sheep: Vec<(f64, f64, f64)>,
    shepherds: Vec<(f64, f64, f64)>,
    config_mods: Vec<ConfigMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.seed = Some(42);
        Self {
            config,
            sheep: Vec::new(),
            shepherds: Vec::new(),
            config_mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_counts(mut self, n_sheep: usize, n_shepherd: usize) -> Self {
        self.config.world.n_sheep = n_sheep;
        self.config.world.n_shepherd = n_shepherd;
        self
    }

    pub fn with_sheep_spawn(mut self, min: f64, max: f64) -> Self {
        self.config.spawn.sheep = SpawnRect::new(min, max, min, max);
        self
    }

    pub fn with_shepherd_spawn(mut self, min: f64, max: f64) -> Self {
        self.config.spawn.shepherd = SpawnRect::new(min, max, min, max);
        self
    }

    pub fn with_config(mut self, f: impl FnOnce(&mut AppConfig) + 'static) -> Self {
        self.config_mods.push(Box::new(f));
        self
    }

    /// Places a sheep by hand. Once any agent is placed, no random spawning happens.
    pub fn with_sheep_at(mut self, x: f64, y: f64, orientation: f64) -> Self {
        self.sheep.push((x, y, orientation));
        self
    }

    pub fn with_shepherd_at(mut self, x: f64, y: f64, orientation: f64) -> Self {
        self.shepherds.push((x, y, orientation));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(mut self) -> World {
        for modifier in self.config_mods.drain(..) {
            modifier(&mut self.config);
        }
        if self.sheep.is_empty() && self.shepherds.is_empty() {
            return World::new(self.config).expect("Failed to create world in test builder");
        }
        let sheep = self
            .sheep
            .iter()
            .enumerate()
            .map(|(id, &(x, y, o))| {
                Sheep::new(
                    id,
                    Vec2::new(x, y),
                    o,
                    self.config.sheep.radius,
                    self.config.sheep.cruise_speed,
                )
            })
            .collect();
        let shepherds = self
            .shepherds
            .iter()
            .enumerate()
            .map(|(id, &(x, y, o))| {
                Shepherd::new(id, Vec2::new(x, y), o, self.config.shepherd.radius)
            })
            .collect();
        World::with_population(self.config, sheep, shepherds)
            .expect("Failed to create world in test builder")
    }
}

/// Means of every `window`-sample moving window, one per start index.
#[allow(dead_code)]
pub fn moving_means(samples: &[f64], window: usize) -> Vec<f64> {
    if window == 0 || samples.len() < window {
        return Vec::new();
    }
    let mut sum: f64 = samples[..window].iter().sum();
    let mut means = vec![sum / window as f64];
    for i in window..samples.len() {
        sum += samples[i] - samples[i - window];
        means.push(sum / window as f64);
    }
    means
}
