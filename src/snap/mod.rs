//! Snap & alignment engine.
//!
//! Guides are recomputed for every drag frame and never stored; callers feed
//! the returned guides straight back into [`snap_to_alignment`].

mod core;

pub use self::core::{
    AlignMode, AlignmentGuide, DragSnap, GuideAnchor, GuideOrientation, SnapEngine, SnapPoint,
    SnapPointKind, canonical_snap_points, compute_alignment_guides, find_nearest_snap_point,
    snap_to_alignment, snap_to_guide_position,
};
