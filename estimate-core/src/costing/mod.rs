//! Cost derivation for draft estimates.
//!
//! Everything in here is a pure function of the draft's work items and the
//! two discount percentages; deriving twice from the same draft yields the
//! same result.

pub mod common;

mod breakdown;

pub use breakdown::{
    CostBreakdown, cost_breakdown, labor_cost, material_cost, raw_labor_cost, raw_material_cost,
};
pub use common::{clamp_non_negative, clamp_percent, round_half_up};
