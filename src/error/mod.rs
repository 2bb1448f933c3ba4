//! Error module orchestrator.
//!
//! The error enum lives in the private `types` module; callers import it from
//! here or from the crate root.

mod types;

pub use types::{PlannerError, Result};
