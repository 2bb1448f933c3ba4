//! Equipment budget aggregation over a layout.

mod core;

pub use self::core::{BudgetLine, BudgetSummary, summarize};
