use crate::budget;
use crate::collab::CollaborationModel;
use crate::logging::{LogEvent, LogFields, LogLevel};
use crate::model::Layout;
use crate::safety;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Derived figures stored with every universe snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseMetrics {
    /// Collaboration score, `0..=100`.
    pub efficiency: f64,
    pub estimated_cost: f64,
    pub safety_score: f64,
    /// Zone footprint in physical units².
    pub used_area: f64,
}

impl UniverseMetrics {
    pub fn compute(layout: &Layout, model: &CollaborationModel, grid_size: f64) -> Self {
        let report = model.analyze(layout);
        let budget = budget::summarize(layout);
        let assessment = safety::assess_layout(layout, grid_size);
        Self {
            efficiency: report.overall_score,
            estimated_cost: budget.total_cost,
            safety_score: assessment.safety_score,
            used_area: assessment.used_area,
        }
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target.to_string(),
            "universe_metrics".to_string(),
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("efficiency".to_string(), json!(self.efficiency));
        map.insert("estimated_cost".to_string(), json!(self.estimated_cost));
        map.insert("safety_score".to_string(), json!(self.safety_score));
        map.insert("used_area".to_string(), json!(self.used_area));
        map
    }

    /// Field-wise `self - baseline`.
    pub fn delta(&self, baseline: &UniverseMetrics) -> UniverseMetrics {
        UniverseMetrics {
            efficiency: self.efficiency - baseline.efficiency,
            estimated_cost: self.estimated_cost - baseline.estimated_cost,
            safety_score: self.safety_score - baseline.safety_score,
            used_area: self.used_area - baseline.used_area,
        }
    }
}
