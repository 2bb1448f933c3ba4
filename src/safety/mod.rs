//! Advisory layout checks.
//!
//! Layouts are allowed to be provisionally invalid while being edited, so
//! nothing here fails: problems come back as [`ValidationWarning`] data.

mod core;

pub use self::core::{
    LayoutAssessment, ValidationWarning, ZoneOverlap, assess_layout, detect_out_of_bounds,
    detect_overlaps, duplicate_zone_ids,
};
