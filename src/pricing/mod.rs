//! Plan pricing for the interactive pricing widget.
//!
//! A plan's displayed price is its base fee plus a per-unit cost times the
//! number of client accounts the visitor selects, rounded to whole currency
//! units.

pub mod calculator;
pub mod plan;

pub use calculator::compute_price;
pub use plan::{default_plans, quote, PlanQuote, PricingPlan, QuantityRange, RangeError};
