//! Multiverse versioning: layout snapshots with branch lineage, a bounded
//! comparison selection and fusion of several snapshots into one.
//!
//! The store is an explicit value owned by the host session. It performs no
//! locking; concurrent callers must serialise access themselves.

mod core;
mod fusion;

pub use self::core::{
    ComparisonEntry, MAX_COMPARISON, Multiverse, MultiverseStore, Universe, UniverseId,
};
pub use fusion::{DeletePolicy, FusionStrategy, merge_zones};
