//! Simulation state and the fixed-timestep scheduler.

use crate::boundary::{Arena, Pen};
use crate::config::AppConfig;
use crate::lifecycle;
use crate::network::NetworkBuilder;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shepherding_data::{
    round_to, Agent, DrivePointReport, Sheep, SheepRecord, SheepState, Shepherd, ShepherdRecord,
};
use std::collections::BTreeMap;

mod order;
mod update;

pub use order::UpdateOrder;
pub use update::TickReport;

pub struct World {
    /// Number of completed ticks.
    pub tick: u64,
    pub sheep: Vec<Sheep>,
    pub shepherds: Vec<Shepherd>,
    config: AppConfig,
    arena: Arena,
    pen: Pen,
    network: NetworkBuilder,
    order: UpdateOrder,
    seed: u64,
    rng: ChaCha8Rng,
}

impl World {
    /// Validates `config` and spawns the population from its seed.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let seed = config.world.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (sheep, shepherds) = lifecycle::spawn_population(&config, &mut rng);
        Ok(Self::assemble(config, sheep, shepherds, seed, rng))
    }

    /// Builds a world around hand-placed agents. Population sizes in `config`
    /// are replaced by the lengths of the given vectors.
    pub fn with_population(
        mut config: AppConfig,
        sheep: Vec<Sheep>,
        shepherds: Vec<Shepherd>,
    ) -> anyhow::Result<Self> {
        config.world.n_sheep = sheep.len();
        config.world.n_shepherd = shepherds.len();
        config.validate()?;
        anyhow::ensure!(
            sheep.iter().enumerate().all(|(i, s)| s.id == i),
            "Sheep ids must match their positions in the list"
        );
        anyhow::ensure!(
            shepherds.iter().enumerate().all(|(i, h)| h.id == i),
            "Shepherd ids must match their positions in the list"
        );
        let seed = config.world.seed.unwrap_or_else(rand::random);
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Ok(Self::assemble(config, sheep, shepherds, seed, rng))
    }

    fn assemble(
        config: AppConfig,
        sheep: Vec<Sheep>,
        shepherds: Vec<Shepherd>,
        seed: u64,
        rng: ChaCha8Rng,
    ) -> Self {
        tracing::info!(
            sheep = sheep.len(),
            shepherds = shepherds.len(),
            seed = seed,
            strategy = ?config.network.strategy,
            "World created"
        );
        Self {
            tick: 0,
            order: UpdateOrder::ascending(sheep.len(), shepherds.len()),
            arena: Arena::from_config(&config.arena),
            pen: Pen::from_config(&config.pen),
            network: NetworkBuilder::from_config(&config),
            sheep,
            shepherds,
            config,
            seed,
            rng,
        }
    }

    /// Replaces the update order after checking it is a permutation.
    pub fn set_update_order(&mut self, order: UpdateOrder) -> anyhow::Result<()> {
        order.validate(self.sheep.len(), self.shepherds.len())?;
        self.order = order;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    #[must_use]
    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    #[must_use]
    pub fn network_builder(&self) -> &NetworkBuilder {
        &self.network
    }

    #[must_use]
    pub fn update_order(&self) -> &UpdateOrder {
        &self.order
    }

    /// Seed actually used, including one drawn from entropy.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn all_staying(&self) -> bool {
        self.sheep.iter().all(Sheep::is_staying)
    }

    #[must_use]
    pub fn penned_count(&self) -> usize {
        self.sheep.iter().filter(|s| s.is_staying()).count()
    }

    /// Mean distance from the flock to the pen rectangle.
    #[must_use]
    pub fn mean_distance_to_pen(&self) -> f64 {
        if self.sheep.is_empty() {
            return 0.0;
        }
        self.sheep
            .iter()
            .map(|s| self.pen.distance_to(s.position()))
            .sum::<f64>()
            / self.sheep.len() as f64
    }

    /// Sheep targeted by more than one shepherd, with the shepherds targeting them.
    #[must_use]
    pub fn duplicate_targets(&self) -> Vec<(usize, Vec<usize>)> {
        let mut by_target: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for h in &self.shepherds {
            by_target.entry(h.approach_agent_id).or_default().push(h.id);
        }
        by_target
            .into_iter()
            .filter(|(_, herders)| herders.len() > 1)
            .collect()
    }

    #[must_use]
    pub fn sheep_records(&self, tick: u64) -> Vec<SheepRecord> {
        self.sheep
            .iter()
            .map(|s| SheepRecord {
                tick,
                id: s.id,
                x: round_to(s.body.position.x, 2),
                y: round_to(s.body.position.y, 2),
                heading: round_to(s.body.orientation, 2),
                state: s.state,
            })
            .collect()
    }

    #[must_use]
    pub fn shepherd_records(&self, tick: u64) -> Vec<ShepherdRecord> {
        let params = &self.config.shepherd;
        self.shepherds
            .iter()
            .map(|h| ShepherdRecord {
                tick,
                id: h.id,
                x: round_to(h.body.position.x, 2),
                y: round_to(h.body.position.y, 2),
                heading: round_to(h.body.orientation, 2),
                approach_sheep_id: h.approach_agent_id,
                mode: h.mode,
                coll_threshold: round_to(params.collection_threshold, 4),
                drive_threshold: round_to(params.drive_threshold, 4),
            })
            .collect()
    }

    #[must_use]
    pub fn drive_point_reports(&self) -> Vec<DrivePointReport> {
        self.shepherds
            .iter()
            .map(|h| DrivePointReport {
                id: h.id,
                drive_point_x: round_to(h.drive_point.x, 2),
                drive_point_y: round_to(h.drive_point.y, 2),
                kind: "shepherd".to_string(),
                mode: h.mode.as_bridge_label().to_string(),
            })
            .collect()
    }

    #[must_use]
    pub fn state_of(&self, sheep_id: usize) -> Option<SheepState> {
        self.sheep.get(sheep_id).map(|s| s.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use shepherding_data::{ShepherdMode, Vec2};

    fn seeded(seed: u64) -> AppConfig {
        let mut config = AppConfig::default();
        config.world.seed = Some(seed);
        config.world.n_sheep = 6;
        config
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = seeded(1);
        config.world.n_shepherd = 0;
        assert!(World::new(config).is_err());
    }

    #[test]
    fn test_seed_recorded() {
        let world = World::new(seeded(99)).unwrap();
        assert_eq!(world.seed(), 99);
        assert_eq!(world.sheep.len(), 6);
        assert_eq!(world.tick, 0);
    }

    #[test]
    fn test_invalid_update_order_rejected() {
        let mut world = World::new(seeded(1)).unwrap();
        let bad = UpdateOrder::new(vec![0, 1, 2, 3, 4, 4], vec![0]);
        assert!(world.set_update_order(bad).is_err());
        let reversed = UpdateOrder::new((0..6).rev().collect(), vec![0]);
        assert!(world.set_update_order(reversed).is_ok());
    }

    #[test]
    fn test_duplicate_targets_reported() {
        let sheep = vec![Sheep::new(0, Vec2::new(300.0, 300.0), 0.0, 10.0, 1.0)];
        let shepherds = vec![
            Shepherd::new(0, Vec2::new(100.0, 100.0), 0.0, 10.0),
            Shepherd::new(1, Vec2::new(500.0, 100.0), 0.0, 10.0),
        ];
        let mut world = World::with_population(seeded(5), sheep, shepherds).unwrap();
        world.step(&mut NullBridge);
        assert_eq!(world.duplicate_targets(), vec![(0, vec![0, 1])]);
    }

    #[test]
    fn test_records_rounded() {
        let sheep = vec![Sheep::new(0, Vec2::new(300.123, 300.456), 0.0, 10.0, 1.0)];
        let shepherds = vec![Shepherd::new(0, Vec2::new(100.0, 100.0), 0.0, 10.0)];
        let world = World::with_population(seeded(5), sheep, shepherds).unwrap();
        let rec = &world.sheep_records(0)[0];
        assert_eq!(rec.x, 300.12);
        assert_eq!(rec.y, 300.46);
        let herder = &world.shepherd_records(0)[0];
        assert_eq!(herder.coll_threshold, 1.5708);
        assert_eq!(herder.drive_threshold, 0.5236);
        assert_eq!(herder.mode, ShepherdMode::Drive);
    }

    #[test]
    fn test_mismatched_ids_rejected() {
        let sheep = vec![Sheep::new(3, Vec2::new(300.0, 300.0), 0.0, 10.0, 1.0)];
        let shepherds = vec![Shepherd::new(0, Vec2::new(100.0, 100.0), 0.0, 10.0)];
        assert!(World::with_population(seeded(5), sheep, shepherds).is_err());
    }
}
