//! Drive/Collect target selection.
//!
//! In Drive the shepherd pushes the sheep that looks largest (the nearest) and
//! watches for a Moving sheep straying too far from the line toward the pen.
//! In Collect it chases that straggler until it is back within the drive
//! threshold of the flock's mean projected position.

use crate::config::ShepherdConfig;
use crate::geometry::ANGLE_MARGIN;
use crate::vision::{self, Projection};
use shepherding_data::{Agent, Sheep, SheepState, Shepherd, ShepherdMode, Vec2};

/// Outcome of one target-selection step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Mode before this step.
    pub previous: ShepherdMode,
    /// Mode after this step.
    pub current: ShepherdMode,
    /// Sheep the shepherd now approaches.
    pub approach: usize,
}

impl Selection {
    /// The mode changed on this step.
    #[must_use]
    pub fn switched(&self) -> bool {
        self.previous != self.current
    }
}

/// Runs the state machine for `shepherd` against the current flock and
/// updates its mode and target ids in place.
pub fn select_target(
    shepherd: &mut Shepherd,
    flock: &[Sheep],
    pen_centre: Vec2,
    params: &ShepherdConfig,
) -> Selection {
    let previous = shepherd.mode;
    let eye = shepherd.position();
    let projections = vision::project(eye, shepherd.orientation(), flock);
    let (outlier, deviation) = vision::outlier(eye, pen_centre, flock);

    match shepherd.mode {
        ShepherdMode::Drive => {
            shepherd.drive_agent_id = vision::widest(&projections);
            let target_penned = flock[shepherd.drive_agent_id].state == SheepState::Staying;
            let straggler = deviation.abs() - params.collection_threshold >= ANGLE_MARGIN
                && flock[outlier].state == SheepState::Moving;
            if target_penned || straggler {
                shepherd.mode = ShepherdMode::Collect;
                shepherd.collect_agent_id = outlier;
            }
        }
        ShepherdMode::Collect => {
            let mean = vision::mean_position(&projections);
            let offset = |p: &[Projection], i: usize| p[i].pos - mean;
            if offset(&projections, shepherd.collect_agent_id) * offset(&projections, outlier)
                >= 0.0
            {
                shepherd.collect_agent_id = outlier;
            }
            let regrouped = offset(&projections, shepherd.collect_agent_id).abs()
                <= params.drive_threshold;
            let penned = flock[shepherd.collect_agent_id].state == SheepState::Staying;
            if regrouped || penned {
                shepherd.mode = ShepherdMode::Drive;
            }
        }
    }

    shepherd.approach_agent_id = match shepherd.mode {
        ShepherdMode::Drive => shepherd.drive_agent_id,
        ShepherdMode::Collect => shepherd.collect_agent_id,
    };

    Selection {
        previous,
        current: shepherd.mode,
        approach: shepherd.approach_agent_id,
    }
}
