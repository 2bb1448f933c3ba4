//! Geometry kernel: points, sizes, rectangles and the measurement helpers
//! shared by the snap, measurement and collaboration modules.

mod core;

pub use self::core::{
    Point, Rect, Size, angle, distance, distance_to_segment, midpoint, perimeter, raw_distance,
    rectangle_area, round_to, snap_to_grid,
};
