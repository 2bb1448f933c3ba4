//! Layer registry: ordered visibility/lock/opacity groups for drawable items.

mod core;

pub use self::core::{Layer, LayerId, LayerRegistry, LayerType, is_editable};
