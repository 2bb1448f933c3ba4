//! Engine configuration.
//!
//! Every section has defaults so hosts only spell out what they change:
//!
//! ```
//! use labplan::PlannerConfig;
//!
//! let config = PlannerConfig::from_json_str(r#"{ "gridSize": 0.5, "snap": { "threshold": 1.0 } }"#)?;
//! assert_eq!(config.grid_size, 0.5);
//! assert_eq!(config.collaboration.optimal_distance, 10.0);
//! # Ok::<(), labplan::PlannerError>(())
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::multiverse::{DeletePolicy, FusionStrategy};
use crate::snap::AlignMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapConfig {
    /// Maximum edge/center offset (grid units) that still produces a guide.
    pub threshold: f64,
    /// Fall back to grid snapping on axes no guide claimed.
    pub snap_to_grid: bool,
    pub grid_step: f64,
    pub align_mode: AlignMode,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            snap_to_grid: false,
            grid_step: 1.0,
            align_mode: AlignMode::MatchedAnchor,
        }
    }
}

/// Distance bands (physical units) for the collaboration model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollaborationConfig {
    pub optimal_distance: f64,
    pub warning_distance: f64,
    pub critical_distance: f64,
    pub max_recommendations: usize,
}

impl Default for CollaborationConfig {
    fn default() -> Self {
        Self {
            optimal_distance: 10.0,
            warning_distance: 30.0,
            critical_distance: 50.0,
            max_recommendations: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoreConfig {
    pub fusion_strategy: FusionStrategy,
    pub delete_policy: DeletePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlannerConfig {
    /// Physical units per grid unit.
    pub grid_size: f64,
    pub unit: String,
    pub snap: SnapConfig,
    pub collaboration: CollaborationConfig,
    pub multiverse: StoreConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            unit: "m".to_string(),
            snap: SnapConfig::default(),
            collaboration: CollaborationConfig::default(),
            multiverse: StoreConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| PlannerError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.grid_size > 0.0 && self.grid_size.is_finite()) {
            return Err(PlannerError::Config(format!(
                "gridSize must be positive, got {}",
                self.grid_size
            )));
        }
        if self.snap.threshold < 0.0 {
            return Err(PlannerError::Config(
                "snap.threshold must not be negative".to_string(),
            ));
        }
        let c = &self.collaboration;
        if !(c.optimal_distance >= 0.0
            && c.optimal_distance <= c.warning_distance
            && c.warning_distance <= c.critical_distance)
        {
            return Err(PlannerError::Config(format!(
                "collaboration distances must be ordered, got {} / {} / {}",
                c.optimal_distance, c.warning_distance, c.critical_distance
            )));
        }
        Ok(())
    }
}
