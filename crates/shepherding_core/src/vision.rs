//! What a shepherd sees: every sheep as an angular interval in its visual field.

use crate::geometry::{relative_distance_angle, transform_angle};
use shepherding_data::{Agent, Sheep, SheepState, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Angle of the sheep relative to the shepherd's heading, in `(-π, π]`.
    pub pos: f64,
    /// Half the angle the sheep's body subtends.
    pub half_width: f64,
}

/// Projects every sheep onto the visual field of an observer at `eye` facing `orientation`.
#[must_use]
pub fn project(eye: Vec2, orientation: f64, flock: &[Sheep]) -> Vec<Projection> {
    flock
        .iter()
        .map(|s| {
            let (distance, bearing) = relative_distance_angle(s.position(), eye);
            Projection {
                pos: transform_angle(orientation - bearing),
                half_width: s.radius().atan2(distance),
            }
        })
        .collect()
}

/// Average projected angle, zero for an empty field.
#[must_use]
pub fn mean_position(projections: &[Projection]) -> f64 {
    if projections.is_empty() {
        return 0.0;
    }
    projections.iter().map(|p| p.pos).sum::<f64>() / projections.len() as f64
}

/// Index of the widest projection; the first one wins ties.
#[must_use]
pub fn widest(projections: &[Projection]) -> usize {
    let mut best = 0;
    for (i, p) in projections.iter().enumerate() {
        if p.half_width > projections[best].half_width {
            best = i;
        }
    }
    best
}

/// The Moving sheep furthest, in angle, from the line of sight to the pen.
///
/// Returns its index and signed deviation. Staying sheep count as zero
/// deviation, so the result is `(0, 0.0)` when nothing is Moving.
#[must_use]
pub fn outlier(eye: Vec2, pen_centre: Vec2, flock: &[Sheep]) -> (usize, f64) {
    let (_, to_pen) = relative_distance_angle(pen_centre, eye);
    let mut best = (0, 0.0_f64);
    for (i, s) in flock.iter().enumerate() {
        let deviation = match s.state {
            SheepState::Moving => {
                let (_, to_sheep) = relative_distance_angle(s.position(), eye);
                transform_angle(to_pen - to_sheep)
            }
            SheepState::Staying => 0.0,
        };
        if i == 0 || deviation.abs() > best.1.abs() {
            best = (i, deviation);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn sheep(id: usize, x: f64, y: f64) -> Sheep {
        Sheep::new(id, Vec2::new(x, y), 0.0, 10.0, 1.0)
    }

    #[test]
    fn test_projection_of_sheep_ahead() {
        let flock = vec![sheep(0, 100.0, 0.0)];
        let p = project(Vec2::ZERO, 0.0, &flock);
        assert_eq!(p[0].pos, 0.0);
        assert!((p[0].half_width - (10.0f64).atan2(100.0)).abs() < 1e-12);
    }

    #[test]
    fn test_projection_sign_follows_heading() {
        let flock = vec![sheep(0, 0.0, 100.0)];
        let p = project(Vec2::ZERO, 0.0, &flock);
        assert!((p[0].pos + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_widest_prefers_nearest_and_first() {
        let flock = vec![sheep(0, 100.0, 0.0), sheep(1, 50.0, 0.0), sheep(2, 0.0, 50.0)];
        let p = project(Vec2::ZERO, 0.0, &flock);
        assert_eq!(widest(&p), 1);
    }

    #[test]
    fn test_mean_position() {
        let p = [
            Projection { pos: 0.2, half_width: 0.0 },
            Projection { pos: -0.4, half_width: 0.0 },
        ];
        assert!((mean_position(&p) + 0.1).abs() < 1e-12);
        assert_eq!(mean_position(&[]), 0.0);
    }

    #[test]
    fn test_outlier_ignores_staying() {
        let mut flock = vec![sheep(0, 100.0, 0.0), sheep(1, 0.0, 100.0), sheep(2, 100.0, 100.0)];
        let pen = Vec2::new(100.0, 100.0);
        let (id, dev) = outlier(Vec2::ZERO, pen, &flock);
        assert_eq!(id, 0);
        assert!((dev - FRAC_PI_4).abs() < 1e-12);

        flock[0].state = SheepState::Staying;
        flock[1].state = SheepState::Staying;
        flock[2].state = SheepState::Staying;
        assert_eq!(outlier(Vec2::ZERO, pen, &flock), (0, 0.0));
    }
}
