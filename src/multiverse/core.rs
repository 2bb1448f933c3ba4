use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use super::fusion::{DeletePolicy, FusionStrategy, merge_zones};
use crate::audit::{NullStoreAudit, StoreAudit, StoreAuditEventBuilder, StoreAuditStage};
use crate::collab::CollaborationModel;
use crate::config::{PlannerConfig, StoreConfig};
use crate::error::{PlannerError, Result};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::UniverseMetrics;
use crate::model::Layout;

pub type UniverseId = String;

/// Upper bound on simultaneously compared universes.
pub const MAX_COMPARISON: usize = 3;

const LOG_TARGET: &str = "labplan::multiverse";

/// One layout snapshot plus the metrics derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Universe {
    pub id: UniverseId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub layout: Layout,
    pub created_at: DateTime<Utc>,
    /// Display-only back-reference; may dangle after deletes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<UniverseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_point: Option<String>,
    pub metrics: UniverseMetrics,
    pub fingerprint: String,
}

/// Plain, serialisable store contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Multiverse {
    pub universes: Vec<Universe>,
    #[serde(default)]
    pub active_universe_id: Option<UniverseId>,
    #[serde(default)]
    pub comparison_ids: Vec<UniverseId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonEntry {
    pub id: UniverseId,
    pub name: String,
    pub metrics: UniverseMetrics,
    /// Difference against the first compared universe.
    pub delta: UniverseMetrics,
}

pub struct MultiverseStore {
    state: Multiverse,
    config: StoreConfig,
    model: CollaborationModel,
    grid_size: f64,
    logger: Option<Logger>,
    audit: Arc<dyn StoreAudit>,
}

impl MultiverseStore {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            state: Multiverse::default(),
            config: config.multiverse.clone(),
            model: CollaborationModel::from_config(config),
            grid_size: config.grid_size,
            logger: None,
            audit: Arc::new(NullStoreAudit),
        }
    }

    /// Restore persisted contents, repairing a stale selection.
    pub fn from_state(state: Multiverse, config: &PlannerConfig) -> Self {
        let mut store = Self::new(config);
        store.state = state;
        store.repair_selection();
        store
    }

    pub fn from_json(raw: &str, config: &PlannerConfig) -> Result<Self> {
        let state: Multiverse = serde_json::from_str(raw)?;
        Ok(Self::from_state(state, config))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.state)?)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn StoreAudit>) -> Self {
        self.audit = audit;
        self
    }

    /// Replace the model used for metric computation (e.g. with pair overrides).
    pub fn set_collaboration_model(&mut self, model: CollaborationModel) {
        self.model = model;
    }

    pub fn state(&self) -> &Multiverse {
        &self.state
    }

    pub fn into_state(self) -> Multiverse {
        self.state
    }

    pub fn universes(&self) -> &[Universe] {
        &self.state.universes
    }

    pub fn get(&self, id: &str) -> Option<&Universe> {
        self.state.universes.iter().find(|u| u.id == id)
    }

    pub fn active(&self) -> Option<&Universe> {
        self.state
            .active_universe_id
            .as_deref()
            .and_then(|id| self.get(id))
    }

    pub fn comparison_ids(&self) -> &[UniverseId] {
        &self.state.comparison_ids
    }

    pub fn find_by_fingerprint(&self, fingerprint: &str) -> Option<&Universe> {
        self.state
            .universes
            .iter()
            .find(|u| u.fingerprint == fingerprint)
    }

    pub fn children_of(&self, id: &str) -> Vec<&Universe> {
        self.state
            .universes
            .iter()
            .filter(|u| u.parent_id.as_deref() == Some(id))
            .collect()
    }

    /// Ancestors of `id`, nearest first. Stops at a dangling parent.
    pub fn lineage(&self, id: &str) -> Vec<&Universe> {
        let mut chain = Vec::new();
        let mut visited = HashSet::new();
        let mut cursor = self.get(id).and_then(|u| u.parent_id.as_deref());

        while let Some(parent_id) = cursor {
            if !visited.insert(parent_id) {
                break;
            }
            let Some(parent) = self.get(parent_id) else {
                break;
            };
            chain.push(parent);
            cursor = parent.parent_id.as_deref();
        }
        chain
    }

    fn snapshot(
        &self,
        layout: Layout,
        name: String,
        description: Option<String>,
        parent_id: Option<UniverseId>,
        branch_point: Option<String>,
    ) -> Universe {
        let metrics = UniverseMetrics::compute(&layout, &self.model, self.grid_size);
        Universe {
            id: format!("universe-{}", Uuid::new_v4()),
            name,
            description,
            fingerprint: layout.fingerprint(),
            layout,
            created_at: Utc::now(),
            parent_id,
            branch_point,
            metrics,
        }
    }

    fn insert(&mut self, universe: Universe) -> UniverseId {
        let id = universe.id.clone();
        self.state.universes.push(universe);
        if self.active().is_none() {
            self.state.active_universe_id = Some(id.clone());
        }
        id
    }

    /// Snapshot `layout` (deep copy) into a new universe.
    pub fn create_universe(&mut self, layout: &Layout, name: Option<&str>) -> UniverseId {
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| format!("Universe {}", self.state.universes.len() + 1));
        let universe = self.snapshot(layout.clone(), name, None, None, None);
        let metrics = universe.metrics;
        let id = self.insert(universe);

        self.record(
            StoreAuditStage::UniverseCreated,
            vec![
                json_str("id", id.clone()),
                json_kv("zones", layout.zones.len()),
                json_kv("metrics", Value::Object(metrics.as_fields())),
            ],
        );
        id
    }

    /// Copy `source_id` into a child universe; metrics are recomputed.
    pub fn branch_universe(
        &mut self,
        source_id: &str,
        name: &str,
        branch_point: &str,
    ) -> Result<UniverseId> {
        let Some(source) = self.get(source_id) else {
            return Err(self.reject("branch", PlannerError::not_found("universe", source_id)));
        };

        let layout = source.layout.clone();
        let universe = self.snapshot(
            layout,
            name.to_string(),
            source.description.clone(),
            Some(source_id.to_string()),
            Some(branch_point.to_string()),
        );
        let id = self.insert(universe);

        self.record(
            StoreAuditStage::UniverseBranched,
            vec![
                json_str("id", id.clone()),
                json_str("parent", source_id),
                json_str("branch_point", branch_point),
            ],
        );
        Ok(id)
    }

    pub fn delete_universe(&mut self, id: &str) -> Result<Universe> {
        let Some(idx) = self.state.universes.iter().position(|u| u.id == id) else {
            return Err(self.reject("delete", PlannerError::not_found("universe", id)));
        };

        let children = self.children_of(id).len();
        match self.config.delete_policy {
            DeletePolicy::RejectWithChildren if children > 0 => {
                let err = PlannerError::HasDependents {
                    id: id.to_string(),
                    children,
                };
                return Err(self.reject("delete", err));
            }
            DeletePolicy::DetachChildren => {
                for universe in &mut self.state.universes {
                    if universe.parent_id.as_deref() == Some(id) {
                        universe.parent_id = None;
                    }
                }
            }
            _ => {}
        }

        let removed = self.state.universes.remove(idx);
        self.state.comparison_ids.retain(|c| c != id);
        let was_active = self.state.active_universe_id.as_deref() == Some(id);
        if was_active {
            self.state.active_universe_id = self.state.universes.first().map(|u| u.id.clone());
        }

        self.record(
            StoreAuditStage::UniverseDeleted,
            vec![
                json_str("id", id),
                json_kv("was_active", was_active),
                json_kv("children", children),
            ],
        );
        Ok(removed)
    }

    /// Unknown ids are ignored. Returns whether the selection changed.
    pub fn set_active_universe(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            self.record(
                StoreAuditStage::OperationRejected,
                vec![json_str("operation", "set_active"), json_str("id", id)],
            );
            return false;
        }
        if self.state.active_universe_id.as_deref() == Some(id) {
            return false;
        }
        self.state.active_universe_id = Some(id.to_string());
        self.record(StoreAuditStage::ActiveChanged, vec![json_str("id", id)]);
        true
    }

    /// Silently ignores unknown ids, duplicates and additions past the cap.
    pub fn add_to_comparison(&mut self, id: &str) -> bool {
        let accepted = self.get(id).is_some()
            && !self.state.comparison_ids.iter().any(|c| c == id)
            && self.state.comparison_ids.len() < MAX_COMPARISON;
        if accepted {
            self.state.comparison_ids.push(id.to_string());
            self.record(
                StoreAuditStage::ComparisonChanged,
                vec![
                    json_str("added", id),
                    json_kv("count", self.state.comparison_ids.len()),
                ],
            );
        }
        accepted
    }

    pub fn remove_from_comparison(&mut self, id: &str) -> bool {
        let before = self.state.comparison_ids.len();
        self.state.comparison_ids.retain(|c| c != id);
        let removed = before != self.state.comparison_ids.len();
        if removed {
            self.record(
                StoreAuditStage::ComparisonChanged,
                vec![
                    json_str("removed", id),
                    json_kv("count", self.state.comparison_ids.len()),
                ],
            );
        }
        removed
    }

    /// Metrics of the compared universes with deltas against the first one.
    pub fn comparison_report(&self) -> Vec<ComparisonEntry> {
        let compared: Vec<&Universe> = self
            .state
            .comparison_ids
            .iter()
            .filter_map(|id| self.get(id))
            .collect();
        let Some(baseline) = compared.first().map(|u| u.metrics) else {
            return Vec::new();
        };

        compared
            .into_iter()
            .map(|u| ComparisonEntry {
                id: u.id.clone(),
                name: u.name.clone(),
                metrics: u.metrics,
                delta: u.metrics.delta(&baseline),
            })
            .collect()
    }

    /// Fuse with the configured collision strategy.
    pub fn fuse(&mut self, ids: &[UniverseId], name: &str) -> Result<UniverseId> {
        self.fuse_universes(ids, self.config.fusion_strategy, name)
    }

    /// Merge the zones of `ids` into a new, parentless universe.
    ///
    /// Every id must exist and at least two distinct universes are required;
    /// nothing is mutated otherwise. Dimensions come from the first input.
    pub fn fuse_universes(
        &mut self,
        ids: &[UniverseId],
        strategy: FusionStrategy,
        name: &str,
    ) -> Result<UniverseId> {
        let mut unique: Vec<&str> = Vec::new();
        for id in ids {
            if self.get(id).is_none() {
                return Err(self.reject("fuse", PlannerError::not_found("universe", id.as_str())));
            }
            if !unique.contains(&id.as_str()) {
                unique.push(id.as_str());
            }
        }
        if unique.len() < 2 {
            let err = PlannerError::InsufficientInput {
                operation: "fuse",
                required: 2,
                provided: unique.len(),
            };
            return Err(self.reject("fuse", err));
        }

        let sources: Vec<&Universe> = unique.iter().filter_map(|id| self.get(id)).collect();
        let layouts: Vec<&Layout> = sources.iter().map(|u| &u.layout).collect();

        let mut layout = Layout::new(name, layouts[0].dimensions.clone());
        layout.zones = merge_zones(&layouts, strategy);
        for note in layouts.iter().flat_map(|l| l.notes.iter()) {
            if !layout.notes.contains(note) {
                layout.notes.push(note.clone());
            }
        }
        let source_names: Vec<&str> = sources.iter().map(|u| u.name.as_str()).collect();
        let description = format!("Fusion of {}", source_names.join(" + "));
        layout.description = description.clone();
        let source_ids: Vec<String> = unique.iter().map(|id| id.to_string()).collect();

        let universe = self.snapshot(layout, name.to_string(), Some(description), None, None);
        let zones = universe.layout.zones.len();
        let id = self.insert(universe);

        self.record(
            StoreAuditStage::UniverseFused,
            vec![
                json_str("id", id.clone()),
                json_kv("sources", source_ids),
                json_kv("strategy", json!(strategy)),
                json_kv("zones", zones),
            ],
        );
        Ok(id)
    }

    fn repair_selection(&mut self) {
        if self.active().is_none() {
            self.state.active_universe_id = self.state.universes.first().map(|u| u.id.clone());
        }

        let existing: HashSet<&str> = self
            .state
            .universes
            .iter()
            .map(|u| u.id.as_str())
            .collect();
        let mut kept: Vec<UniverseId> = Vec::new();
        for id in &self.state.comparison_ids {
            if existing.contains(id.as_str()) && !kept.contains(id) && kept.len() < MAX_COMPARISON
            {
                kept.push(id.clone());
            }
        }
        self.state.comparison_ids = kept;
    }

    fn reject(&self, operation: &str, err: PlannerError) -> PlannerError {
        self.record(
            StoreAuditStage::OperationRejected,
            vec![
                json_str("operation", operation),
                json_str("error", err.to_string()),
            ],
        );
        err
    }

    fn record(&self, stage: StoreAuditStage, details: Vec<(String, Value)>) {
        let mut builder = StoreAuditEventBuilder::new(stage);
        for (key, value) in &details {
            builder.detail(key.clone(), value.clone());
        }
        self.audit.record(builder.finish());

        if let Some(logger) = self.logger.as_ref() {
            let level = match stage {
                StoreAuditStage::OperationRejected => LogLevel::Warn,
                _ => LogLevel::Info,
            };
            let _ = logger.log_event(event_with_fields(level, LOG_TARGET, stage.as_str(), details));
        }
    }
}
