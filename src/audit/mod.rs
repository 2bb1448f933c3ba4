//! Multiverse audit utilities.
//!
//! The store reports every state transition (and every rejected operation) as
//! a structured record, so hosts can keep an undo log, a history panel or a
//! test transcript without reaching into the store itself.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Distinct checkpoints emitted by `MultiverseStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreAuditStage {
    /// A layout was snapshotted into a new universe.
    UniverseCreated,
    /// A universe was copied from an existing one.
    UniverseBranched,
    UniverseDeleted,
    /// Several universes were merged into a new one.
    UniverseFused,
    ActiveChanged,
    ComparisonChanged,
    /// An operation failed validation and left the store untouched.
    OperationRejected,
}

impl StoreAuditStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreAuditStage::UniverseCreated => "universe_created",
            StoreAuditStage::UniverseBranched => "universe_branched",
            StoreAuditStage::UniverseDeleted => "universe_deleted",
            StoreAuditStage::UniverseFused => "universe_fused",
            StoreAuditStage::ActiveChanged => "active_changed",
            StoreAuditStage::ComparisonChanged => "comparison_changed",
            StoreAuditStage::OperationRejected => "operation_rejected",
        }
    }
}

/// Structured audit entry.
#[derive(Debug, Clone, Serialize)]
pub struct StoreAuditEvent {
    pub timestamp: DateTime<Utc>,
    pub stage: StoreAuditStage,
    pub details: Vec<(String, Value)>,
}

impl StoreAuditEvent {
    fn new(stage: StoreAuditStage) -> Self {
        Self {
            timestamp: Utc::now(),
            stage,
            details: Vec::new(),
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }
}

/// Builder helper to append fields ergonomically.
pub struct StoreAuditEventBuilder {
    event: StoreAuditEvent,
}

impl StoreAuditEventBuilder {
    pub fn new(stage: StoreAuditStage) -> Self {
        Self {
            event: StoreAuditEvent::new(stage),
        }
    }

    pub fn detail(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.event.details.push((key.into(), value));
        self
    }

    pub fn finish(self) -> StoreAuditEvent {
        self.event
    }
}

/// Trait implemented by any audit sink.
pub trait StoreAudit: Send + Sync {
    fn record(&self, event: StoreAuditEvent);
}

/// Default no-op implementation used when auditing is disabled.
#[derive(Debug, Default)]
pub struct NullStoreAudit;

impl StoreAudit for NullStoreAudit {
    fn record(&self, _event: StoreAuditEvent) {}
}

/// Keeps every record in memory.
#[derive(Debug, Default)]
pub struct BufferedStoreAudit {
    events: Mutex<Vec<StoreAuditEvent>>,
}

impl BufferedStoreAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<StoreAuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<StoreAuditStage> {
        self.events().into_iter().map(|e| e.stage).collect()
    }
}

impl StoreAudit for BufferedStoreAudit {
    fn record(&self, event: StoreAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}
