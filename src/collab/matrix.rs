use serde::{Deserialize, Serialize};

use crate::model::ZoneType;

use IntensityLevel::{High, Medium};
use ZoneType::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityLevel {
    Low,
    Medium,
    High,
}

impl IntensityLevel {
    /// Aggregation weight.
    pub fn weight(&self) -> f64 {
        match self {
            IntensityLevel::High => 3.0,
            IntensityLevel::Medium => 2.0,
            IntensityLevel::Low => 1.0,
        }
    }

    /// Exponential decay per physical unit beyond the optimal distance.
    pub(crate) fn decay_rate(&self) -> f64 {
        match self {
            IntensityLevel::High => 0.05,
            IntensityLevel::Medium => 0.035,
            IntensityLevel::Low => 0.02,
        }
    }
}

const MATRIX: &[(ZoneType, ZoneType, IntensityLevel)] = &[
    (Lab, Lab, High),
    (Lab, Compute, High),
    (Lab, Workspace, High),
    (Compute, Compute, High),
    (Workspace, Workspace, High),
    (Workspace, Meeting, High),
    (Office, Office, High),
    (Office, Meeting, High),
    (Office, Workspace, High),
    (Lab, Storage, Medium),
    (Lab, Meeting, Medium),
    (Lab, Office, Medium),
    (Compute, Workspace, Medium),
    (Compute, Utility, Medium),
    (Storage, Workspace, Medium),
    (Meeting, Meeting, Medium),
    (Meeting, Entrance, Medium),
    (Office, Entrance, Medium),
    (Break, Workspace, Medium),
    (Break, Office, Medium),
    (Break, Meeting, Medium),
];

/// Symmetric zone-type intensity; unlisted pairs collaborate rarely.
pub fn default_intensity(a: ZoneType, b: ZoneType) -> IntensityLevel {
    MATRIX
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, level)| *level)
        .unwrap_or(IntensityLevel::Low)
}
