use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::model::Zone;
use crate::safety::ValidationWarning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn start(&self, zone: &Zone) -> f64 {
        match self {
            Axis::Horizontal => zone.position.x,
            Axis::Vertical => zone.position.y,
        }
    }

    fn extent(&self, zone: &Zone) -> f64 {
        match self {
            Axis::Horizontal => zone.size.width,
            Axis::Vertical => zone.size.height,
        }
    }

    fn set_start(&self, zone: &mut Zone, value: f64) {
        match self {
            Axis::Horizontal => zone.position.x = value,
            Axis::Vertical => zone.position.y = value,
        }
    }
}

/// Spread `zones` along `axis`, keeping the outermost zones fixed.
///
/// With `spacing: None` the free space between the outer edges is split into
/// equal gaps. With `Some(gap)` zones are packed from the first one using that
/// fixed gap. Fewer than two zones are returned unchanged. Output keeps the
/// input order.
pub fn distribute_evenly(zones: &[Zone], axis: Axis, spacing: Option<f64>) -> Vec<Zone> {
    let mut result = zones.to_vec();
    if zones.len() < 2 {
        return result;
    }

    let mut order: Vec<usize> = (0..zones.len()).collect();
    order.sort_by(|a, b| {
        axis.start(&zones[*a])
            .partial_cmp(&axis.start(&zones[*b]))
            .unwrap_or(Ordering::Equal)
    });

    let first = &zones[order[0]];
    let last = &zones[order[order.len() - 1]];
    let span_start = axis.start(first);
    let span_end = axis.start(last) + axis.extent(last);
    let occupied: f64 = zones.iter().map(|z| axis.extent(z)).sum();

    let gap = spacing.unwrap_or((span_end - span_start - occupied) / (zones.len() - 1) as f64);
    let keep_last = spacing.is_none();

    let mut cursor = span_start;
    for (rank, idx) in order.iter().enumerate() {
        let is_endpoint = rank == 0 || (keep_last && rank == order.len() - 1);
        if !is_endpoint {
            axis.set_start(&mut result[*idx], cursor);
        }
        cursor += axis.extent(&zones[*idx]) + gap;
    }

    result
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrangeOutcome {
    /// Repositioned zones in input order.
    pub zones: Vec<Zone>,
    pub warnings: Vec<ValidationWarning>,
}

/// Greedy shelf packing, largest zones first.
///
/// Rows wrap when the next zone would cross `container_width - padding`. A
/// zone that would cross `container_height - padding` wraps back to the top
/// and is flagged; the placement may then overlap earlier zones.
pub fn auto_arrange(
    zones: &[Zone],
    container_width: f64,
    container_height: f64,
    padding: f64,
) -> ArrangeOutcome {
    let mut result = zones.to_vec();
    let mut warnings = Vec::new();

    let mut order: Vec<usize> = (0..zones.len()).collect();
    order.sort_by(|a, b| {
        zones[*b]
            .area()
            .partial_cmp(&zones[*a].area())
            .unwrap_or(Ordering::Equal)
    });

    let max_x = container_width - padding;
    let max_y = container_height - padding;
    let mut x = padding;
    let mut y = padding;
    let mut row_height: f64 = 0.0;

    for idx in order {
        let size = zones[idx].size;

        if x + size.width > max_x && x > padding {
            x = padding;
            y += row_height + padding;
            row_height = 0.0;
        }

        if y + size.height > max_y && y > padding {
            y = padding;
            warnings.push(ValidationWarning::ArrangeOverflow {
                zone_id: zones[idx].id.clone(),
            });
        }

        result[idx].position = Point::new(x, y);
        x += size.width + padding;
        row_height = row_height.max(size.height);
    }

    ArrangeOutcome {
        zones: result,
        warnings,
    }
}
