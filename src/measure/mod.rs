//! Measurement session: collects clicks into distance, area and angle
//! measurements and keeps the session history.

mod core;

pub use self::core::{Measurement, MeasurementKind, MeasurementSession, MeasureMode};
