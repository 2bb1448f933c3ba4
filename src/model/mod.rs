//! Layout data model shared by every analysis module.
//!
//! Records here are plain serde values with no embedded behaviour beyond
//! lookups, so hosts can persist and restore them freely.

mod core;
pub mod projection;

pub use self::core::{
    Dimensions, EquipmentEntry, EquipmentItem, Layered, Layout, Zone, ZoneId, ZoneType,
    fresh_zone_id,
};
pub use projection::{ZoneVolume, project_layout, projection_is_consistent};
