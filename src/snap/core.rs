use serde::{Deserialize, Serialize};

use crate::config::{PlannerConfig, SnapConfig};
use crate::error::{PlannerError, Result};
use crate::geometry::{Point, Rect, Size, raw_distance, snap_to_grid};
use crate::model::Layout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideOrientation {
    Vertical,
    Horizontal,
}

/// Which edge of the dragged rectangle produced a guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAnchor {
    Start,
    Center,
    End,
}

impl GuideAnchor {
    fn label(&self, orientation: GuideOrientation) -> &'static str {
        match (orientation, self) {
            (GuideOrientation::Vertical, GuideAnchor::Start) => "left",
            (GuideOrientation::Vertical, GuideAnchor::Center) => "center-x",
            (GuideOrientation::Vertical, GuideAnchor::End) => "right",
            (GuideOrientation::Horizontal, GuideAnchor::Start) => "top",
            (GuideOrientation::Horizontal, GuideAnchor::Center) => "center-y",
            (GuideOrientation::Horizontal, GuideAnchor::End) => "bottom",
        }
    }

    /// Offset of this anchor from the rectangle origin along an axis of `extent`.
    fn offset(&self, extent: f64) -> f64 {
        match self {
            GuideAnchor::Start => 0.0,
            GuideAnchor::Center => extent / 2.0,
            GuideAnchor::End => extent,
        }
    }
}

const ANCHORS: [GuideAnchor; 3] = [GuideAnchor::Start, GuideAnchor::Center, GuideAnchor::End];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentGuide {
    #[serde(rename = "type")]
    pub orientation: GuideOrientation,
    pub position: f64,
    pub label: String,
    pub snap_points: [Point; 2],
    pub anchor: GuideAnchor,
}

fn anchors_x(rect: &Rect) -> [f64; 3] {
    [rect.left(), rect.center_x(), rect.right()]
}

fn anchors_y(rect: &Rect) -> [f64; 3] {
    [rect.top(), rect.center_y(), rect.bottom()]
}

/// Guides for every dragged/other anchor pair within `threshold`.
///
/// Vertical and horizontal guides are independent, so several may fire for a
/// single frame.
pub fn compute_alignment_guides(
    dragged: &Rect,
    others: &[Rect],
    threshold: f64,
) -> Vec<AlignmentGuide> {
    let mut guides = Vec::new();

    for other in others {
        let span_y = [
            dragged.top().min(other.top()),
            dragged.bottom().max(other.bottom()),
        ];
        let span_x = [
            dragged.left().min(other.left()),
            dragged.right().max(other.right()),
        ];

        for (anchor, dragged_x) in ANCHORS.iter().zip(anchors_x(dragged)) {
            for (other_anchor, other_x) in ANCHORS.iter().zip(anchors_x(other)) {
                if (dragged_x - other_x).abs() <= threshold {
                    guides.push(AlignmentGuide {
                        orientation: GuideOrientation::Vertical,
                        position: other_x,
                        label: format!(
                            "{}-{}",
                            anchor.label(GuideOrientation::Vertical),
                            other_anchor.label(GuideOrientation::Vertical)
                        ),
                        snap_points: [Point::new(other_x, span_y[0]), Point::new(other_x, span_y[1])],
                        anchor: *anchor,
                    });
                }
            }
        }

        for (anchor, dragged_y) in ANCHORS.iter().zip(anchors_y(dragged)) {
            for (other_anchor, other_y) in ANCHORS.iter().zip(anchors_y(other)) {
                if (dragged_y - other_y).abs() <= threshold {
                    guides.push(AlignmentGuide {
                        orientation: GuideOrientation::Horizontal,
                        position: other_y,
                        label: format!(
                            "{}-{}",
                            anchor.label(GuideOrientation::Horizontal),
                            other_anchor.label(GuideOrientation::Horizontal)
                        ),
                        snap_points: [Point::new(span_x[0], other_y), Point::new(span_x[1], other_y)],
                        anchor: *anchor,
                    });
                }
            }
        }
    }

    guides
}

/// What lands on a guide when a drag frame snaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignMode {
    /// The dragged edge or center that produced the guide.
    #[default]
    MatchedAnchor,
    /// The dragged origin, whatever anchor matched.
    GuidePosition,
}

fn first_guide(
    guides: &[AlignmentGuide],
    orientation: GuideOrientation,
) -> Option<&AlignmentGuide> {
    guides.iter().find(|g| g.orientation == orientation)
}

/// Move `position` so the first guide per axis is honoured.
///
/// First match wins, not nearest match; the guide order produced by
/// [`compute_alignment_guides`] therefore decides ties. The matched anchor is
/// what lands on the guide: a right-right guide at 2.0 puts the right edge at
/// 2.0, so the origin ends up at `2.0 - width`. Use [`snap_to_guide_position`]
/// to move the origin itself onto the guide.
pub fn snap_to_alignment(position: Point, size: Size, guides: &[AlignmentGuide]) -> Point {
    let mut snapped = position;
    if let Some(guide) = first_guide(guides, GuideOrientation::Vertical) {
        snapped.x = guide.position - guide.anchor.offset(size.width);
    }
    if let Some(guide) = first_guide(guides, GuideOrientation::Horizontal) {
        snapped.y = guide.position - guide.anchor.offset(size.height);
    }
    snapped
}

/// Clamp the origin to the first guide per axis, ignoring the matched anchor.
pub fn snap_to_guide_position(position: Point, guides: &[AlignmentGuide]) -> Point {
    let mut snapped = position;
    if let Some(guide) = first_guide(guides, GuideOrientation::Vertical) {
        snapped.x = guide.position;
    }
    if let Some(guide) = first_guide(guides, GuideOrientation::Horizontal) {
        snapped.y = guide.position;
    }
    snapped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapPointKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
    TopMid,
    BottomMid,
    LeftMid,
    RightMid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapPoint {
    pub kind: SnapPointKind,
    pub point: Point,
}

/// Corners, center and all four edge midpoints of `rect`.
pub fn canonical_snap_points(rect: &Rect) -> Vec<SnapPoint> {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    let (cx, cy) = (rect.center_x(), rect.center_y());
    [
        (SnapPointKind::TopLeft, l, t),
        (SnapPointKind::TopRight, r, t),
        (SnapPointKind::BottomLeft, l, b),
        (SnapPointKind::BottomRight, r, b),
        (SnapPointKind::Center, cx, cy),
        (SnapPointKind::TopMid, cx, t),
        (SnapPointKind::BottomMid, cx, b),
        (SnapPointKind::LeftMid, l, cy),
        (SnapPointKind::RightMid, r, cy),
    ]
    .into_iter()
    .map(|(kind, x, y)| SnapPoint {
        kind,
        point: Point::new(x, y),
    })
    .collect()
}

/// Closest candidate within `threshold`; earlier candidates win exact ties.
pub fn find_nearest_snap_point(
    point: Point,
    candidates: &[Point],
    threshold: f64,
) -> Option<Point> {
    let mut best: Option<(f64, Point)> = None;
    for candidate in candidates {
        let d = raw_distance(point, *candidate);
        if d > threshold {
            continue;
        }
        if best.map(|(best_d, _)| d < best_d).unwrap_or(true) {
            best = Some((d, *candidate));
        }
    }
    best.map(|(_, p)| p)
}

/// Result of snapping one drag frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSnap {
    pub position: Point,
    pub guides: Vec<AlignmentGuide>,
}

/// Drag-time orchestration over a whole layout.
#[derive(Debug, Clone, Default)]
pub struct SnapEngine {
    config: SnapConfig,
}

impl SnapEngine {
    pub fn new(config: SnapConfig) -> Self {
        Self { config }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.snap.clone())
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Snap `zone_id` proposed at `proposed` against every other zone.
    pub fn drag(&self, layout: &Layout, zone_id: &str, proposed: Point) -> Result<DragSnap> {
        let zone = layout
            .zone(zone_id)
            .ok_or_else(|| PlannerError::not_found("zone", zone_id))?;

        let dragged = Rect::from_parts(proposed, zone.size);
        let others: Vec<Rect> = layout
            .zones
            .iter()
            .filter(|other| other.id != zone_id)
            .map(|other| other.rect())
            .collect();

        let guides = compute_alignment_guides(&dragged, &others, self.config.threshold);
        let mut position = match self.config.align_mode {
            AlignMode::MatchedAnchor => snap_to_alignment(proposed, zone.size, &guides),
            AlignMode::GuidePosition => snap_to_guide_position(proposed, &guides),
        };

        if self.config.snap_to_grid {
            let gridded = snap_to_grid(proposed, self.config.grid_step);
            if !guides
                .iter()
                .any(|g| g.orientation == GuideOrientation::Vertical)
            {
                position.x = gridded.x;
            }
            if !guides
                .iter()
                .any(|g| g.orientation == GuideOrientation::Horizontal)
            {
                position.y = gridded.y;
            }
        }

        Ok(DragSnap { position, guides })
    }
}
