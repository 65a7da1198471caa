//! File-based robot bridge.
//!
//! The external controller writes a JSON array of poses; only the first entry
//! is read. Drive points are written back as a JSON array, replacing the file
//! on every tick.

use crate::error::{IoError, Result};
use shepherding_core::bridge::ShepherdBridge;
use shepherding_data::{DrivePointReport, ExternalPose};
use std::path::{Path, PathBuf};

pub struct FileBridge {
    input: PathBuf,
    output: PathBuf,
}

impl FileBridge {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
        }
    }

    /// First pose in the input file, `Ok(None)` for an empty array.
    pub fn read_pose(&self) -> Result<Option<ExternalPose>> {
        let data = std::fs::read_to_string(&self.input).map_err(|e| {
            IoError::from(e).with_context(format!("reading {}", self.input.display()))
        })?;
        let poses: Vec<serde_json::Value> = serde_json::from_str(&data)?;
        let Some(first) = poses.into_iter().next() else {
            return Ok(None);
        };
        let pose: ExternalPose = serde_json::from_value(first)?;
        if !(pose.x0.is_finite() && pose.x1.is_finite()) {
            return Err(IoError::validation(format!(
                "pose for shepherd {} is not finite",
                pose.id
            )));
        }
        Ok(Some(pose))
    }

    pub fn write_reports(&self, reports: &[DrivePointReport]) -> Result<()> {
        let json = serde_json::to_string(reports)?;
        std::fs::write(&self.output, json).map_err(|e| {
            IoError::from(e).with_context(format!("writing {}", self.output.display()))
        })?;
        Ok(())
    }
}

impl ShepherdBridge for FileBridge {
    fn poll(&mut self) -> Option<ExternalPose> {
        match self.read_pose() {
            Ok(pose) => pose,
            Err(e) => {
                tracing::warn!(error = %e, "Robot pose unavailable");
                None
            }
        }
    }

    fn publish(&mut self, reports: &[DrivePointReport]) {
        if let Err(e) = self.write_reports(reports) {
            tracing::warn!(error = %e, "Failed to publish drive points");
        }
    }
}
