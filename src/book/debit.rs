use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::month::{Entry, MonthRecord};

/// A recurring fixed charge, materialized into each new month as a dated
/// expense. Document-wide, not month-scoped; editing a template never
/// alters expenses already materialized in past months.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebitTemplate {
    pub id: Uuid,
    pub title: String,
    /// Target day-of-month, 1..=31; clamped to the target month's length
    /// at application time.
    pub day: u32,
    pub amount: f64,
    pub enabled: bool,
}

impl DebitTemplate {
    pub fn new(title: impl Into<String>, day: u32, amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            day,
            amount,
            enabled: true,
        }
    }
}

/// Materializes `template` into `month` as a dated expense.
///
/// Idempotent: a month holds at most one expense per template, so it is safe
/// to offer every template to every month-creation event redundantly.
/// Returns whether an expense was appended.
pub fn apply_template(month: &mut MonthRecord, template: &DebitTemplate) -> bool {
    if !template.enabled {
        return false;
    }
    if month.expense_from_template(template.id).is_some() {
        return false;
    }
    let date = month.key.date_for_day(template.day);
    let mut entry = Entry::new(format!("{} (Auto)", template.title), template.amount, date);
    entry.source_template = Some(template.id);
    tracing::debug!(template = %template.id, month = %month.key, "materialized recurring debit");
    month.expenses.push(entry);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::MonthKey;
    use chrono::NaiveDate;

    fn june() -> MonthRecord {
        MonthRecord::new(MonthKey::new(2025, 6).unwrap())
    }

    #[test]
    fn clamps_day_to_month_length() {
        let mut month = june();
        let rent = DebitTemplate::new("Rent", 31, 800.0);
        assert!(apply_template(&mut month, &rent));

        let entry = month.expense_from_template(rent.id).unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
        assert_eq!(entry.label, "Rent (Auto)");
        assert_eq!(entry.amount, 800.0);
    }

    #[test]
    fn second_application_is_a_no_op() {
        let mut month = june();
        let rent = DebitTemplate::new("Rent", 1, 800.0);
        assert!(apply_template(&mut month, &rent));
        assert!(!apply_template(&mut month, &rent));
        assert_eq!(month.expenses.len(), 1);
    }

    #[test]
    fn disabled_templates_are_skipped() {
        let mut month = june();
        let mut gym = DebitTemplate::new("Gym", 5, 40.0);
        gym.enabled = false;
        assert!(!apply_template(&mut month, &gym));
        assert!(month.expenses.is_empty());
    }

    #[test]
    fn distinct_templates_each_materialize_once() {
        let mut month = june();
        let rent = DebitTemplate::new("Rent", 1, 800.0);
        let power = DebitTemplate::new("Power", 15, 120.0);
        assert!(apply_template(&mut month, &rent));
        assert!(apply_template(&mut month, &power));
        assert_eq!(month.expenses.len(), 2);
        assert!(month.expense_from_template(rent.id).is_some());
        assert!(month.expense_from_template(power.id).is_some());
    }
}
