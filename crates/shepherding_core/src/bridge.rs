//! Robot-in-the-loop seam.
//!
//! Once per tick the world asks the bridge for an external pose before sheep
//! move, and hands it the fresh drive points after shepherds move.

use shepherding_data::{DrivePointReport, ExternalPose};

pub trait ShepherdBridge {
    /// Latest pose reported by the external controller, if any.
    fn poll(&mut self) -> Option<ExternalPose>;

    /// Receives one report per shepherd, in shepherd id order.
    fn publish(&mut self, reports: &[DrivePointReport]);
}

/// Bridge used when no external controller is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBridge;

impl ShepherdBridge for NullBridge {
    fn poll(&mut self) -> Option<ExternalPose> {
        None
    }

    fn publish(&mut self, _reports: &[DrivePointReport]) {}
}
