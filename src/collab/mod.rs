//! Collaboration-distance model ("Allen curve" analysis).
//!
//! Every zone pair gets a collaboration intensity, either inferred from the
//! zone types or overridden per pair, and is scored by how much its
//! center-to-center distance is expected to suppress communication.

mod core;
mod matrix;

pub use self::core::{
    CollaborationLink, CollaborationModel, CollaborationReport, LinkAssessment, LinkStatus,
    Recommendation, RecommendationKind, SafetyLevel, score_distance,
};
pub use matrix::{IntensityLevel, default_intensity};
