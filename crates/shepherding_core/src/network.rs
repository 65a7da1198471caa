//! Per-sheep interaction network.
//!
//! Built from scratch on every update: proximity candidates (metric radius or
//! Voronoi adjacency), then a same-state filter, then a field-of-view filter.

use crate::config::{AppConfig, NetworkStrategy};
use crate::delaunay;
use crate::geometry::{angular_distance, relative_distance_angle};
use shepherding_data::{Agent, Sheep, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkBuilder {
    pub strategy: NetworkStrategy,
    pub attraction_distance: f64,
    pub field_of_view: f64,
}

impl NetworkBuilder {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            strategy: config.network.strategy,
            attraction_distance: config.sheep.attraction_distance,
            field_of_view: config.network.field_of_view,
        }
    }

    /// Proximity candidates for `focal`, before any filtering. Ascending ids.
    #[must_use]
    pub fn candidates(&self, focal: usize, positions: &[Vec2]) -> Vec<usize> {
        match self.strategy {
            NetworkStrategy::Metric => {
                let origin = positions[focal];
                positions
                    .iter()
                    .enumerate()
                    .filter(|&(j, p)| {
                        j != focal && origin.distance_to(*p) <= self.attraction_distance
                    })
                    .map(|(j, _)| j)
                    .collect()
            }
            NetworkStrategy::Voronoi => delaunay::neighbors(positions)
                .into_iter()
                .nth(focal)
                .unwrap_or_default(),
        }
    }

    /// Full network for `flock[focal]` as seen by it right now.
    #[must_use]
    pub fn build(&self, focal: usize, flock: &[Sheep]) -> Vec<usize> {
        let positions: Vec<Vec2> = flock.iter().map(Agent::position).collect();
        let me = &flock[focal];
        let half_fov = self.field_of_view / 2.0;
        self.candidates(focal, &positions)
            .into_iter()
            .filter(|&j| flock[j].state == me.state)
            .filter(|&j| {
                let (_, bearing) = relative_distance_angle(positions[j], me.position());
                angular_distance(bearing, me.orientation()) <= half_fov
            })
            .collect()
    }
}
