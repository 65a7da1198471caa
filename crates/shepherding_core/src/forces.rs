//! Social forces acting on sheep and shepherds.

use crate::config::SheepConfig;
use crate::geometry::{reflect_angle, relative_distance_angle, EPSILON};
use shepherding_data::{Agent, Sheep, SheepState, Shepherd, Vec2};

/// Force components felt by one sheep on one update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SheepForces {
    /// Mean unit vector away from close neighbors, scaled.
    pub repulsion: Vec2,
    /// Mean unit vector toward farther neighbors, scaled.
    pub attraction: Vec2,
    /// Mean unit vector away from nearby shepherds, scaled.
    pub shepherd: Vec2,
    /// Neighbors inside the repulsion distance.
    pub repulsion_count: usize,
}

impl SheepForces {
    /// Combined force. Repulsion overrides everything else when present, and
    /// penned sheep only ever feel repulsion.
    #[must_use]
    pub fn total(&self, state: SheepState) -> Vec2 {
        if self.repulsion_count > 0 || state == SheepState::Staying {
            self.repulsion
        } else {
            self.attraction + self.shepherd
        }
    }
}

fn mean(sum: Vec2, count: usize) -> Vec2 {
    if count == 0 {
        Vec2::ZERO
    } else {
        sum / count as f64
    }
}

#[must_use]
pub fn sheep_forces(
    me: &Sheep,
    flock: &[Sheep],
    network: &[usize],
    shepherds: &[Shepherd],
    params: &SheepConfig,
) -> SheepForces {
    let origin = me.position();
    let (mut rep, mut n_rep) = (Vec2::ZERO, 0usize);
    let (mut att, mut n_att) = (Vec2::ZERO, 0usize);
    for &j in network {
        let delta = flock[j].position() - origin;
        let d = delta.length();
        if d < EPSILON {
            continue;
        }
        if d <= params.repulsion_distance {
            rep += -delta / d;
            n_rep += 1;
        } else {
            att += delta / d;
            n_att += 1;
        }
    }

    let (mut away, mut n_away) = (Vec2::ZERO, 0usize);
    for h in shepherds {
        let delta = origin - h.position();
        let d = delta.length();
        if d < EPSILON || d > params.safe_distance {
            continue;
        }
        away += delta / d;
        n_away += 1;
    }

    SheepForces {
        repulsion: mean(rep, n_rep) * params.k_repulsion,
        attraction: mean(att, n_att) * params.k_attraction,
        shepherd: mean(away, n_away) * params.k_shepherd,
        repulsion_count: n_rep,
    }
}

/// Mean of `(self - other)` over shepherds closer than `l3`, unnormalized.
#[must_use]
pub fn shepherd_avoidance(me: usize, shepherds: &[Shepherd], l3: f64) -> Vec2 {
    let origin = shepherds[me].position();
    let (sum, count) = shepherds
        .iter()
        .enumerate()
        .filter(|&(j, _)| j != me)
        .map(|(_, other)| origin - other.position())
        .filter(|delta| delta.length() < l3)
        .fold((Vec2::ZERO, 0usize), |(s, c), d| (s + d, c + 1));
    let avg = mean(sum, count);
    // Round-trip through polar form.
    let angle = reflect_angle(avg.angle());
    let length = avg.length();
    Vec2::from_angle(angle) * length
}

/// Point `l1` behind `target` on the far side from the pen centre.
#[must_use]
pub fn drive_point(target: Vec2, pen_centre: Vec2, l1: f64) -> Vec2 {
    let (_, angle) = relative_distance_angle(target, pen_centre);
    target + Vec2::from_angle(angle) * l1
}

/// Splits `force` into its components along and across `orientation`.
#[must_use]
pub fn decompose(force: Vec2, orientation: f64) -> (f64, f64) {
    let heading = Vec2::from_angle(orientation);
    let normal = Vec2::new(-heading.y, heading.x);
    (force.dot(heading), force.dot(normal))
}
