use serde::{Deserialize, Serialize};

/// Pose of a physical robot standing in for a shepherd.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExternalPose {
    #[serde(alias = "ID", deserialize_with = "crate::serde_lenient::id")]
    pub id: usize,
    #[serde(deserialize_with = "crate::serde_lenient::float")]
    pub x0: f64,
    #[serde(deserialize_with = "crate::serde_lenient::float")]
    pub x1: f64,
}

/// Drive point published for each shepherd after its update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrivePointReport {
    pub id: usize,
    pub drive_point_x: f64,
    pub drive_point_y: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub mode: String,
}
