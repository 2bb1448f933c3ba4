use thiserror::Error;

/// Unified result type for the layout engine.
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors surfaced by the layout engine.
///
/// Advisory problems (overlaps, out-of-bounds zones, arrange overflow) are not
/// errors; see [`crate::safety::ValidationWarning`].
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("{kind} `{id}` not found")]
    NotFound { kind: &'static str, id: String },
    #[error("{operation} requires at least {required} inputs, got {provided}")]
    InsufficientInput {
        operation: &'static str,
        required: usize,
        provided: usize,
    },
    #[error("universe `{id}` still has {children} branch(es)")]
    HasDependents { id: String, children: usize },
    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PlannerError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
