use crate::config::{AppConfig, SpawnRect};
use rand::Rng;
use shepherding_data::{Sheep, Shepherd, Vec2};
use std::f64::consts::PI;

fn draw_pose<R: Rng>(rect: &SpawnRect, rng: &mut R) -> (Vec2, f64) {
    let x = rng.gen_range(rect.x_min..=rect.x_max);
    let y = rng.gen_range(rect.y_min..=rect.y_max);
    let orientation = rng.gen_range(-PI..PI);
    (Vec2::new(x, y), orientation)
}

/// Creates the whole population. Sheep draw first, by id, then shepherds;
/// each agent draws x, y and orientation in that order.
pub fn spawn_population<R: Rng>(config: &AppConfig, rng: &mut R) -> (Vec<Sheep>, Vec<Shepherd>) {
    let flock = (0..config.world.n_sheep)
        .map(|id| {
            let (position, orientation) = draw_pose(&config.spawn.sheep, rng);
            Sheep::new(
                id,
                position,
                orientation,
                config.sheep.radius,
                config.sheep.cruise_speed,
            )
        })
        .collect();
    let herders = (0..config.world.n_shepherd)
        .map(|id| {
            let (position, orientation) = draw_pose(&config.spawn.shepherd, rng);
            Shepherd::new(id, position, orientation, config.shepherd.radius)
        })
        .collect();
    (flock, herders)
}
