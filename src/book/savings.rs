use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked savings account used for projections. Its balance is a
/// separately maintained figure; month advancement never debits it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsAccount {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
    /// Amount set aside into this account every month, counted uniformly
    /// against every month's leftover.
    pub monthly_contribution: f64,
    /// Annual interest rate in percent.
    pub annual_rate_pct: f64,
}

impl SavingsAccount {
    pub fn new(
        name: impl Into<String>,
        balance: f64,
        monthly_contribution: f64,
        annual_rate_pct: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            balance,
            monthly_contribution,
            annual_rate_pct,
        }
    }
}

/// A savings target. `saved_so_far` moves only through explicit user
/// updates, never derived from expenses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub title: String,
    pub target_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub saved_so_far: f64,
}

impl SavingsGoal {
    pub fn new(title: impl Into<String>, target_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            target_amount,
            deadline: None,
            saved_so_far: 0.0,
        }
    }

    pub fn with_deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Amount still missing toward the target, floored at zero.
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.saved_so_far).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_floors_at_zero() {
        let mut goal = SavingsGoal::new("Holiday", 1000.0);
        assert_eq!(goal.remaining(), 1000.0);
        goal.saved_so_far = 1200.0;
        assert_eq!(goal.remaining(), 0.0);
    }

    #[test]
    fn deadline_builder_sets_the_date() {
        let deadline = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let goal = SavingsGoal::new("Car", 6000.0).with_deadline(deadline);
        assert_eq!(goal.deadline, Some(deadline));
    }
}
