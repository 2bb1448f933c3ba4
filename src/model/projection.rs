//! 3-D projection of a layout for export collaborators.
//!
//! Each zone becomes an axis-aligned box in physical units: the floor
//! footprint scaled by the grid size and an extrusion height chosen by zone
//! type. Byte formats are left to the consumer.

use serde::Serialize;

use super::core::{Layout, ZoneId, ZoneType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneVolume {
    pub zone_id: ZoneId,
    pub name: String,
    /// `[x, y, z]` of the minimum corner.
    pub origin: [f64; 3],
    /// `[width, depth, height]`.
    pub extent: [f64; 3],
    pub color: String,
}

fn extrusion_height(zone_type: ZoneType) -> f64 {
    match zone_type {
        ZoneType::Compute | ZoneType::Storage => 2.4,
        ZoneType::Utility => 2.8,
        ZoneType::Lab => 3.0,
        ZoneType::Entrance => 3.2,
        _ => 2.7,
    }
}

pub fn project_layout(layout: &Layout, grid_size: f64) -> Vec<ZoneVolume> {
    layout
        .zones
        .iter()
        .map(|zone| ZoneVolume {
            zone_id: zone.id.clone(),
            name: zone.name.clone(),
            origin: [zone.position.x * grid_size, zone.position.y * grid_size, 0.0],
            extent: [
                zone.size.width * grid_size,
                zone.size.height * grid_size,
                extrusion_height(zone.zone_type),
            ],
            color: zone.color.clone(),
        })
        .collect()
}

/// Every zone projected exactly once, in order, with positive extents.
pub fn projection_is_consistent(layout: &Layout, volumes: &[ZoneVolume]) -> bool {
    volumes.len() == layout.zones.len()
        && layout.zones.iter().zip(volumes).all(|(zone, volume)| {
            zone.id == volume.zone_id
                && volume.extent.iter().all(|v| *v > 0.0 && v.is_finite())
                && volume.origin.iter().all(|v| v.is_finite())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::model::{Dimensions, Zone};

    #[test]
    fn projection_scales_footprint_by_grid_size() {
        let layout = Layout::new("p", Dimensions::new(10.0, 10.0, "m")).with_zone(
            Zone::new(
                "rack",
                "Rack row",
                ZoneType::Compute,
                Point::new(1.0, 2.0),
                Size::new(3.0, 1.0),
            )
            .with_color("#222"),
        );

        let volumes = project_layout(&layout, 0.5);
        assert_eq!(volumes[0].origin, [0.5, 1.0, 0.0]);
        assert_eq!(volumes[0].extent, [1.5, 0.5, 2.4]);
        assert_eq!(volumes[0].color, "#222");
        assert!(projection_is_consistent(&layout, &volumes));
    }

    #[test]
    fn missing_volume_is_inconsistent() {
        let layout = Layout::new("p", Dimensions::new(10.0, 10.0, "m")).with_zone(Zone::new(
            "a",
            "A",
            ZoneType::Office,
            Point::new(0.0, 0.0),
            Size::new(1.0, 1.0),
        ));
        assert!(!projection_is_consistent(&layout, &[]));
    }
}
