//! Services implementing the month lifecycle, summaries, projections, and
//! goal recommendations over a [`Book`](crate::book::Book).

pub mod goals;
pub mod months;
pub mod projection;
pub mod summary;

pub use goals::GoalService;
pub use months::{Direction, MonthService};
pub use projection::{future_value, project_account, HORIZON_FIVE_YEARS, HORIZON_ONE_YEAR};
pub use summary::{LeftoverProjection, MonthTotals, SummaryService};

/// Rounds to two decimals, the precision used for stored currency amounts.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
