//! Arrangement engine: even distribution and greedy shelf packing.
//!
//! Both operations return repositioned copies and never reject a layout;
//! overflow is reported as warnings for the caller to act on.

mod core;

pub use self::core::{ArrangeOutcome, Axis, auto_arrange, distribute_evenly};
