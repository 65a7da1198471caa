use super::World;
use crate::boundary::FenceSide;
use crate::bridge::ShepherdBridge;
use crate::forces::{decompose, drive_point, sheep_forces, shepherd_avoidance};
use crate::geometry::{guard_speed, transform_angle};
use crate::herding::{self, Selection};
use rand::Rng;
use rand_distr::StandardNormal;
use shepherding_data::{Agent, DrivePointReport, ExternalPose, SheepState, Vec2};

/// Summary of one completed tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Index of the tick just simulated (the value `World::tick` had before it).
    pub tick: u64,
    pub penned: usize,
    pub mode_switches: usize,
    /// Drive points handed to the bridge this tick.
    pub reports: Vec<DrivePointReport>,
    /// Every sheep is in the pen; the run should stop.
    pub finished: bool,
}

impl World {
    /// Advances the simulation by one tick.
    pub fn step(&mut self, bridge: &mut dyn ShepherdBridge) -> TickReport {
        let tick = self.tick;

        if let Some(pose) = bridge.poll() {
            self.apply_external_pose(pose);
        }

        for k in 0..self.order.sheep.len() {
            let i = self.order.sheep[k];
            self.update_sheep(i);
        }

        let mut mode_switches = 0;
        for k in 0..self.order.shepherds.len() {
            let i = self.order.shepherds[k];
            let selection = self.update_shepherd(i);
            if selection.switched() {
                mode_switches += 1;
                tracing::debug!(
                    tick = tick,
                    shepherd = i,
                    from = ?selection.previous,
                    to = ?selection.current,
                    target = selection.approach,
                    "Shepherd mode switch"
                );
            }
        }

        let duplicates = self.duplicate_targets();
        if !duplicates.is_empty() {
            tracing::debug!(tick = tick, duplicates = ?duplicates, "Shared approach targets");
        }

        let reports = self.drive_point_reports();
        bridge.publish(&reports);

        self.tick += 1;
        TickReport {
            tick,
            penned: self.penned_count(),
            mode_switches,
            reports,
            finished: self.all_staying(),
        }
    }

    fn apply_external_pose(&mut self, pose: ExternalPose) {
        match self.shepherds.get_mut(pose.id) {
            Some(h) => h.body.position = Vec2::new(pose.x0, pose.x1),
            None => tracing::warn!(id = pose.id, "External pose for unknown shepherd"),
        }
    }

    fn update_sheep(&mut self, i: usize) {
        let params = &self.config.sheep;

        let me = &mut self.sheep[i];
        me.state = if self.pen.contains(me.position()) {
            SheepState::Staying
        } else {
            SheepState::Moving
        };
        let side = match me.state {
            SheepState::Moving => FenceSide::Outside,
            SheepState::Staying => FenceSide::Inside,
        };
        self.arena.reflect(&mut me.body);
        self.pen.reflect(&mut me.body, side, self.pen.sheep_gate());

        let network = self.network.build(i, &self.sheep);
        let me = &self.sheep[i];
        let forces = sheep_forces(me, &self.sheep, &network, &self.shepherds, params);
        let force = forces.total(me.state);

        let (v_dot, w_dot) = decompose(force, me.orientation());
        let w_dot = w_dot.clamp(-params.max_turning_rate, params.max_turning_rate);
        let cruise = match me.state {
            SheepState::Moving => params.cruise_speed,
            SheepState::Staying => params.pen_cruise_speed,
        };
        let v = (cruise + v_dot * params.dt).clamp(-params.max_speed, params.max_speed);
        let z: f64 = self.rng.sample(StandardNormal);
        let noise = z * (2.0 * params.k_dr / params.dt).sqrt();

        let me = &mut self.sheep[i];
        let heading = me.body.heading();
        me.body.position += heading * v;
        me.body.velocity = v;
        me.body.orientation =
            transform_angle(me.body.orientation + (w_dot / guard_speed(v) + noise) * params.dt);
        me.interact_network = network;
        me.last_force = force;
    }

    fn update_shepherd(&mut self, i: usize) -> Selection {
        let params = &self.config.shepherd;
        let centre = self.pen.centre();

        let me = &mut self.shepherds[i];
        self.arena.reflect(&mut me.body);
        self.pen
            .reflect(&mut me.body, FenceSide::Outside, self.pen.shepherd_gate());

        let avoidance = shepherd_avoidance(i, &self.shepherds, params.l3);
        let me = &mut self.shepherds[i];
        let selection = herding::select_target(me, &self.sheep, centre, params);

        let target = self.sheep[me.approach_agent_id].position();
        let point = drive_point(target, centre, params.l1);
        let pull = point - me.position();
        let force = avoidance * params.k_avoid + pull * params.k_drive;

        let (v_dot, w_dot) = decompose(force, me.orientation());
        let v = (me.body.velocity * params.dt + v_dot).clamp(-params.max_speed, params.max_speed);
        let z: f64 = self.rng.sample(StandardNormal);
        let noise = z * (2.0 * params.dr / params.dt).sqrt();

        me.body.velocity = v;
        me.body.orientation =
            transform_angle(me.body.orientation + (w_dot / guard_speed(v) + noise) * params.dt);
        let heading = me.body.heading();
        me.body.position += heading * (v * params.dt);
        me.drive_point = point;
        me.avoidance_force = avoidance;
        me.drive_force = pull;
        selection
    }
}

#[cfg(test)]
mod tests {
    use crate::bridge::{NullBridge, ShepherdBridge};
    use crate::config::AppConfig;
    use crate::world::World;
    use shepherding_data::{
        Agent, DrivePointReport, ExternalPose, Sheep, SheepState, Shepherd, ShepherdMode, Vec2,
    };
    use std::f64::consts::PI;

    struct ScriptedBridge {
        pose: Option<ExternalPose>,
        published: Vec<Vec<DrivePointReport>>,
    }

    impl ShepherdBridge for ScriptedBridge {
        fn poll(&mut self) -> Option<ExternalPose> {
            self.pose
        }

        fn publish(&mut self, reports: &[DrivePointReport]) {
            self.published.push(reports.to_vec());
        }
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.world.seed = Some(11);
        config
    }

    fn lone_sheep(x: f64, y: f64) -> Vec<Sheep> {
        vec![Sheep::new(0, Vec2::new(x, y), 0.0, 10.0, 1.0)]
    }

    #[test]
    fn test_tick_advances_and_reports() {
        let herders = vec![Shepherd::new(0, Vec2::new(100.0, 100.0), 0.0, 10.0)];
        let mut world = World::with_population(config(), lone_sheep(300.0, 300.0), herders).unwrap();
        let report = world.step(&mut NullBridge);
        assert_eq!(report.tick, 0);
        assert_eq!(world.tick, 1);
        assert_eq!(report.reports.len(), 1);
        assert_eq!(report.reports[0].kind, "shepherd");
        assert!(!report.finished);
    }

    #[test]
    fn test_sheep_in_pen_finishes_run() {
        let herders = vec![Shepherd::new(0, Vec2::new(100.0, 100.0), 0.0, 10.0)];
        let mut world = World::with_population(config(), lone_sheep(700.0, 700.0), herders).unwrap();
        let report = world.step(&mut NullBridge);
        assert_eq!(world.sheep[0].state, SheepState::Staying);
        assert!(report.finished);
        assert_eq!(report.penned, 1);
    }

    #[test]
    fn test_external_pose_applied_before_update() {
        let herders = vec![Shepherd::new(0, Vec2::new(100.0, 100.0), 0.0, 10.0)];
        // Sheep sits between the new pose and the pen, so the shepherd keeps driving.
        let mut world = World::with_population(config(), lone_sheep(550.0, 570.0), herders).unwrap();
        let mut bridge = ScriptedBridge {
            pose: Some(ExternalPose {
                id: 0,
                x0: 500.0,
                x1: 520.0,
            }),
            published: Vec::new(),
        };
        world.step(&mut bridge);
        // One shepherd step moves at most max_speed * dt.
        let moved = world.shepherds[0].position().distance_to(Vec2::new(500.0, 520.0));
        assert!(moved <= 250.0 * 0.01 + 1e-9);
        assert_eq!(bridge.published.len(), 1);
        let report = &bridge.published[0][0];
        assert_eq!(report.mode, "driving");
    }

    #[test]
    fn test_sheep_speed_and_orientation_bounds() {
        let mut config = config();
        config.world.n_sheep = 15;
        config.world.n_shepherd = 2;
        let mut world = World::new(config).unwrap();
        for _ in 0..200 {
            world.step(&mut NullBridge);
            for s in &world.sheep {
                assert!(s.body.velocity.abs() <= 2.0);
                assert!(s.body.orientation > -PI && s.body.orientation <= PI);
                assert!(!s.interact_network.contains(&s.id));
            }
            for h in &world.shepherds {
                assert!(h.body.velocity.abs() <= 250.0);
                assert!(h.body.orientation.is_finite());
                let expected = match h.mode {
                    ShepherdMode::Drive => h.drive_agent_id,
                    ShepherdMode::Collect => h.collect_agent_id,
                };
                assert_eq!(h.approach_agent_id, expected);
            }
        }
    }
}
