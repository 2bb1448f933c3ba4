//! Spatial layout engine for lab floor plans.
//!
//! Zones are laid out on a real-valued grid; this crate provides the
//! geometry, drag-time snapping, layers, measurements, arrangement helpers,
//! collaboration-distance scoring, budgeting and the multiverse versioning
//! store that sit underneath an interactive editor. Rendering and layout
//! generation live with the host.
//!
//! The modules follow the same pattern throughout: a public `mod.rs`
//! re-exporting from a private `core` module, so callers can import either
//! from the module or from the crate root.

pub mod arrange;
pub mod audit;
pub mod budget;
pub mod collab;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layers;
pub mod logging;
pub mod measure;
pub mod metrics;
pub mod model;
pub mod multiverse;
pub mod safety;
pub mod snap;

pub use arrange::{ArrangeOutcome, Axis, auto_arrange, distribute_evenly};
pub use audit::{
    BufferedStoreAudit, NullStoreAudit, StoreAudit, StoreAuditEvent, StoreAuditEventBuilder,
    StoreAuditStage,
};
pub use budget::{BudgetLine, BudgetSummary};
pub use collab::{
    CollaborationLink, CollaborationModel, CollaborationReport, IntensityLevel, LinkAssessment,
    LinkStatus, Recommendation, RecommendationKind, SafetyLevel,
};
pub use config::{CollaborationConfig, PlannerConfig, SnapConfig, StoreConfig};
pub use error::{PlannerError, Result};
pub use geometry::{Point, Rect, Size};
pub use layers::{Layer, LayerId, LayerRegistry, LayerType};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use measure::{Measurement, MeasurementKind, MeasurementSession, MeasureMode};
pub use metrics::UniverseMetrics;
pub use model::{
    Dimensions, EquipmentEntry, EquipmentItem, Layered, Layout, Zone, ZoneId, ZoneType, ZoneVolume,
};
pub use multiverse::{
    ComparisonEntry, DeletePolicy, FusionStrategy, MAX_COMPARISON, Multiverse, MultiverseStore,
    Universe, UniverseId,
};
pub use safety::{LayoutAssessment, ValidationWarning};
pub use snap::{AlignMode, AlignmentGuide, DragSnap, GuideAnchor, GuideOrientation, SnapEngine};
