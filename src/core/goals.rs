use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::book::{Book, MonthKey};
use crate::core::summary::SummaryService;
use crate::errors::BudgetError;

/// Horizon assumed for goals without a deadline.
const DEFAULT_GOAL_HORIZON: u32 = 12;

/// Derives advisory monthly contributions toward savings goals.
pub struct GoalService;

impl GoalService {
    /// Suggested monthly contribution toward `goal_id`: the amount still
    /// needed spread over the months left, capped at what the month can
    /// currently spare. Advisory only, never enforced.
    pub fn recommend(
        book: &Book,
        goal_id: Uuid,
        key: MonthKey,
        today: NaiveDate,
    ) -> Result<f64, BudgetError> {
        let goal = book
            .goals
            .iter()
            .find(|goal| goal.id == goal_id)
            .ok_or_else(|| BudgetError::NotFound(format!("goal {goal_id}")))?;
        let totals = SummaryService::compute_totals(book, key)?;
        let available = totals.available_to_spend.max(0.0);
        let months_left = Self::months_until(today, goal.deadline);
        let per_month = goal.remaining() / months_left as f64;
        Ok(per_month.min(available))
    }

    /// Inclusive whole-month count until `deadline`. The partial month
    /// counts as full when the deadline's day-of-month has not yet passed
    /// today's; never drops below one month.
    fn months_until(today: NaiveDate, deadline: Option<NaiveDate>) -> u32 {
        let Some(deadline) = deadline else {
            return DEFAULT_GOAL_HORIZON;
        };
        let span = (deadline.year() - today.year()) * 12 + deadline.month() as i32
            - today.month() as i32;
        let months = if deadline.day() >= today.day() {
            span
        } else {
            span - 1
        };
        months.max(1) as u32
    }
}
