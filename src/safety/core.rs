use std::collections::HashSet;

use serde::Serialize;

use crate::geometry::round_to;
use crate::model::{Layout, ZoneId};

const OVERLAP_PENALTY: f64 = 15.0;
const OUT_OF_BOUNDS_PENALTY: f64 = 10.0;
const DUPLICATE_ID_PENALTY: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationWarning {
    Overlap { a: ZoneId, b: ZoneId, area: f64 },
    OutOfBounds { zone_id: ZoneId },
    DuplicateId { zone_id: ZoneId },
    ArrangeOverflow { zone_id: ZoneId },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneOverlap {
    pub a: ZoneId,
    pub b: ZoneId,
    /// Shared area in grid units².
    pub area: f64,
}

/// Pairs of zones sharing a strictly positive area, in layout order.
pub fn detect_overlaps(layout: &Layout) -> Vec<ZoneOverlap> {
    let mut overlaps = Vec::new();
    for (i, a) in layout.zones.iter().enumerate() {
        for b in &layout.zones[i + 1..] {
            let area = a.rect().intersection_area(&b.rect());
            if area > 0.0 {
                overlaps.push(ZoneOverlap {
                    a: a.id.clone(),
                    b: b.id.clone(),
                    area,
                });
            }
        }
    }
    overlaps
}

pub fn detect_out_of_bounds(layout: &Layout) -> Vec<ZoneId> {
    layout
        .zones
        .iter()
        .filter(|zone| {
            !zone
                .rect()
                .within(layout.dimensions.width, layout.dimensions.height)
        })
        .map(|zone| zone.id.clone())
        .collect()
}

/// Ids that appear more than once, reported once each.
pub fn duplicate_zone_ids(layout: &Layout) -> Vec<ZoneId> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut duplicates = Vec::new();
    for zone in &layout.zones {
        if !seen.insert(zone.id.as_str()) && reported.insert(zone.id.as_str()) {
            duplicates.push(zone.id.clone());
        }
    }
    duplicates
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutAssessment {
    pub warnings: Vec<ValidationWarning>,
    /// Sum of zone footprints in physical units².
    pub used_area: f64,
    /// `used_area` over the floor area, `0` for an empty floor.
    pub coverage: f64,
    /// `0..=100`, higher is safer.
    pub safety_score: f64,
}

impl LayoutAssessment {
    pub fn overlap_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, ValidationWarning::Overlap { .. }))
            .count()
    }
}

pub fn assess_layout(layout: &Layout, grid_size: f64) -> LayoutAssessment {
    let overlaps = detect_overlaps(layout);
    let out_of_bounds = detect_out_of_bounds(layout);
    let duplicates = duplicate_zone_ids(layout);

    let penalty = overlaps.len() as f64 * OVERLAP_PENALTY
        + out_of_bounds.len() as f64 * OUT_OF_BOUNDS_PENALTY
        + duplicates.len() as f64 * DUPLICATE_ID_PENALTY;
    let safety_score = (100.0 - penalty).clamp(0.0, 100.0);

    let scale = grid_size * grid_size;
    let used_area = layout.zones.iter().map(|z| z.area()).sum::<f64>() * scale;
    let floor = layout.dimensions.width * layout.dimensions.height * scale;
    let coverage = if floor > 0.0 { used_area / floor } else { 0.0 };

    let mut warnings: Vec<ValidationWarning> = overlaps
        .into_iter()
        .map(|o| ValidationWarning::Overlap {
            a: o.a,
            b: o.b,
            area: o.area,
        })
        .collect();
    warnings.extend(
        out_of_bounds
            .into_iter()
            .map(|zone_id| ValidationWarning::OutOfBounds { zone_id }),
    );
    warnings.extend(
        duplicates
            .into_iter()
            .map(|zone_id| ValidationWarning::DuplicateId { zone_id }),
    );

    LayoutAssessment {
        warnings,
        used_area: round_to(used_area, 2),
        coverage: round_to(coverage, 4),
        safety_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::model::{Dimensions, Zone, ZoneType};

    fn zone(id: &str, x: f64, y: f64, w: f64, h: f64) -> Zone {
        Zone::new(id, id, ZoneType::Lab, Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn clean_layout_scores_full_marks() {
        let layout = Layout::new("ok", Dimensions::new(10.0, 10.0, "m"))
            .with_zone(zone("a", 0.0, 0.0, 5.0, 5.0))
            .with_zone(zone("b", 5.0, 0.0, 5.0, 5.0));
        let assessment = assess_layout(&layout, 2.0);
        assert!(assessment.warnings.is_empty());
        assert_eq!(assessment.safety_score, 100.0);
        assert_eq!(assessment.used_area, 200.0);
        assert_eq!(assessment.coverage, 0.5);
    }

    #[test]
    fn overlaps_and_bounds_are_reported_not_rejected() {
        let layout = Layout::new("bad", Dimensions::new(10.0, 10.0, "m"))
            .with_zone(zone("a", 0.0, 0.0, 4.0, 4.0))
            .with_zone(zone("b", 2.0, 2.0, 4.0, 4.0))
            .with_zone(zone("c", 8.0, 8.0, 4.0, 4.0))
            .with_zone(zone("a", 0.0, 6.0, 1.0, 1.0));

        let assessment = assess_layout(&layout, 1.0);
        assert_eq!(assessment.overlap_count(), 1);
        assert!(assessment.warnings.contains(&ValidationWarning::OutOfBounds {
            zone_id: "c".to_string()
        }));
        assert!(assessment.warnings.contains(&ValidationWarning::DuplicateId {
            zone_id: "a".to_string()
        }));
        assert_eq!(assessment.safety_score, 100.0 - 15.0 - 10.0 - 20.0);
    }
}
