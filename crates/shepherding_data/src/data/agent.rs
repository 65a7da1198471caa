use super::vector::Vec2;
use serde::{Deserialize, Serialize};

/// The two kinds of agent living in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Sheep,
    Shepherd,
}

/// Behavioral state of a sheep, derived from its position every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheepState {
    #[default]
    Moving,
    Staying,
}

/// Herding mode of a shepherd. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShepherdMode {
    #[default]
    Drive,
    Collect,
}

impl ShepherdMode {
    /// Label published to external controllers.
    #[must_use]
    pub fn as_bridge_label(self) -> &'static str {
        match self {
            ShepherdMode::Drive => "driving",
            ShepherdMode::Collect => "collecting",
        }
    }
}

/// Kinematic state shared by both agent kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec2,
    /// Heading in radians, 0 facing +x.
    pub orientation: f64,
    /// Signed forward speed.
    pub velocity: f64,
    pub radius: f64,
}

impl Body {
    #[must_use]
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.orientation)
    }
}

/// Common view over sheep and shepherds.
pub trait Agent {
    fn id(&self) -> usize;
    fn kind(&self) -> AgentKind;
    fn body(&self) -> &Body;

    fn position(&self) -> Vec2 {
        self.body().position
    }

    fn orientation(&self) -> f64 {
        self.body().orientation
    }

    fn radius(&self) -> f64 {
        self.body().radius
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheep {
    pub id: usize,
    pub body: Body,
    pub state: SheepState,
    /// Neighbor ids from the latest rebuild. A view, rebuilt every tick.
    pub interact_network: Vec<usize>,
    /// Force applied on the latest update.
    pub last_force: Vec2,
}

impl Sheep {
    #[must_use]
    pub fn new(id: usize, position: Vec2, orientation: f64, radius: f64, velocity: f64) -> Self {
        Self {
            id,
            body: Body {
                position,
                orientation,
                velocity,
                radius,
            },
            state: SheepState::Moving,
            interact_network: Vec::new(),
            last_force: Vec2::ZERO,
        }
    }

    #[must_use]
    pub fn is_staying(&self) -> bool {
        self.state == SheepState::Staying
    }
}

impl Agent for Sheep {
    fn id(&self) -> usize {
        self.id
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Sheep
    }

    fn body(&self) -> &Body {
        &self.body
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shepherd {
    pub id: usize,
    pub body: Body,
    pub mode: ShepherdMode,
    pub drive_agent_id: usize,
    pub collect_agent_id: usize,
    /// Target of the active mode; what renderers and loggers should show.
    pub approach_agent_id: usize,
    /// Waypoint behind the approach target, published to external controllers.
    pub drive_point: Vec2,
    /// Mean repulsion from nearby shepherds on the latest update (unscaled).
    pub avoidance_force: Vec2,
    /// Spring pull toward the drive point on the latest update (unscaled).
    pub drive_force: Vec2,
}

impl Shepherd {
    #[must_use]
    pub fn new(id: usize, position: Vec2, orientation: f64, radius: f64) -> Self {
        Self {
            id,
            body: Body {
                position,
                orientation,
                velocity: 0.0,
                radius,
            },
            mode: ShepherdMode::Drive,
            drive_agent_id: 0,
            collect_agent_id: 0,
            approach_agent_id: 0,
            drive_point: Vec2::ZERO,
            avoidance_force: Vec2::ZERO,
            drive_force: Vec2::ZERO,
        }
    }
}

impl Agent for Shepherd {
    fn id(&self) -> usize {
        self.id
    }

    fn kind(&self) -> AgentKind {
        AgentKind::Shepherd
    }

    fn body(&self) -> &Body {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_shepherd_starts_in_drive() {
        let s = Shepherd::new(0, Vec2::new(1.0, 2.0), 0.0, 10.0);
        assert_eq!(s.mode, ShepherdMode::Drive);
        assert_eq!(s.approach_agent_id, 0);
        assert_eq!(s.kind(), AgentKind::Shepherd);
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&SheepState::Staying).unwrap();
        assert_eq!(json, "\"staying\"");
    }
}
