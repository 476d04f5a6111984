use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BudgetError;

use super::{
    debit::DebitTemplate,
    month::{Entry, MonthKey, MonthRecord},
    savings::{SavingsAccount, SavingsGoal},
    settings::Settings,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The single persisted budget document.
///
/// The document performs no I/O itself: a persistence collaborator hands in
/// a deserialized `Book` and serializes it back after each mutation. Entry
/// CRUD targets the month at `current_month_key`, matching how navigation
/// drives the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub current_month_key: MonthKey,
    pub months: BTreeMap<MonthKey, MonthRecord>,
    #[serde(default)]
    pub savings_accounts: Vec<SavingsAccount>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub debit_templates: Vec<DebitTemplate>,
    #[serde(default)]
    pub settings: Settings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Book::schema_version_default")]
    pub schema_version: u8,
}

impl Book {
    /// Fresh document seeded with a single empty record at `start`.
    pub fn new(start: MonthKey) -> Self {
        let now = Utc::now();
        let mut months = BTreeMap::new();
        months.insert(start, MonthRecord::new(start));
        Self {
            current_month_key: start,
            months,
            savings_accounts: Vec::new(),
            goals: Vec::new(),
            debit_templates: Vec::new(),
            settings: Settings::default(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn month(&self, key: MonthKey) -> Option<&MonthRecord> {
        self.months.get(&key)
    }

    pub fn current_month(&self) -> Option<&MonthRecord> {
        self.months.get(&self.current_month_key)
    }

    /// Total monthly set-aside across all savings accounts, applied
    /// uniformly to every month's leftover.
    pub fn set_aside_total(&self) -> f64 {
        self.savings_accounts
            .iter()
            .map(|account| account.monthly_contribution)
            .sum()
    }

    pub fn add_income(
        &mut self,
        label: impl Into<String>,
        amount: f64,
        date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Uuid, BudgetError> {
        let label = validated_label(label.into())?;
        validate_amount(amount)?;
        let record = self.current_month_mut()?;
        let entry = Entry::new(label, amount, date.unwrap_or(today));
        let id = entry.id;
        record.incomes.push(entry);
        self.touch();
        Ok(id)
    }

    pub fn remove_income(&mut self, id: Uuid) -> Result<(), BudgetError> {
        let record = self.current_month_mut()?;
        let position = record
            .incomes
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| BudgetError::NotFound(format!("income {id}")))?;
        record.incomes.remove(position);
        self.touch();
        Ok(())
    }

    pub fn add_expense(
        &mut self,
        label: impl Into<String>,
        amount: f64,
        date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Uuid, BudgetError> {
        let label = validated_label(label.into())?;
        validate_amount(amount)?;
        let record = self.current_month_mut()?;
        let entry = Entry::new(label, amount, date.unwrap_or(today));
        let id = entry.id;
        record.expenses.push(entry);
        self.touch();
        Ok(id)
    }

    pub fn remove_expense(&mut self, id: Uuid) -> Result<(), BudgetError> {
        let record = self.current_month_mut()?;
        let position = record
            .expenses
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| BudgetError::NotFound(format!("expense {id}")))?;
        record.expenses.remove(position);
        self.touch();
        Ok(())
    }

    /// Explicit user edit of an existing month's opening balance. The only
    /// way a starting balance changes after creation.
    pub fn set_starting_balance(&mut self, key: MonthKey, amount: f64) -> Result<(), BudgetError> {
        if !amount.is_finite() {
            return Err(BudgetError::InvalidInput(
                "starting balance must be finite".into(),
            ));
        }
        let record = self
            .months
            .get_mut(&key)
            .ok_or_else(|| BudgetError::NotFound(format!("month {key}")))?;
        record.starting_balance = amount;
        self.touch();
        Ok(())
    }

    pub fn add_debit_template(
        &mut self,
        title: impl Into<String>,
        day: u32,
        amount: f64,
    ) -> Result<Uuid, BudgetError> {
        let title = validated_label(title.into())?;
        validate_amount(amount)?;
        if !(1..=31).contains(&day) {
            return Err(BudgetError::InvalidInput(format!(
                "debit day {day} outside 1..=31"
            )));
        }
        let template = DebitTemplate::new(title, day, amount);
        let id = template.id;
        self.debit_templates.push(template);
        self.touch();
        Ok(id)
    }

    /// Removes a template definition. Expenses already materialized from it
    /// in past months are left untouched.
    pub fn remove_debit_template(&mut self, id: Uuid) -> Result<(), BudgetError> {
        let position = self
            .debit_templates
            .iter()
            .position(|template| template.id == id)
            .ok_or_else(|| BudgetError::NotFound(format!("debit template {id}")))?;
        self.debit_templates.remove(position);
        self.touch();
        Ok(())
    }

    pub fn set_template_enabled(&mut self, id: Uuid, enabled: bool) -> Result<(), BudgetError> {
        let template = self
            .debit_templates
            .iter_mut()
            .find(|template| template.id == id)
            .ok_or_else(|| BudgetError::NotFound(format!("debit template {id}")))?;
        template.enabled = enabled;
        self.touch();
        Ok(())
    }

    pub fn add_savings_account(
        &mut self,
        name: impl Into<String>,
        balance: f64,
        monthly_contribution: f64,
        annual_rate_pct: f64,
    ) -> Result<Uuid, BudgetError> {
        let name = validated_label(name.into())?;
        for (field, value) in [
            ("balance", balance),
            ("monthly contribution", monthly_contribution),
            ("annual rate", annual_rate_pct),
        ] {
            if !value.is_finite() {
                return Err(BudgetError::InvalidInput(format!("{field} must be finite")));
            }
        }
        if monthly_contribution < 0.0 || annual_rate_pct < 0.0 {
            return Err(BudgetError::InvalidInput(
                "contribution and rate must not be negative".into(),
            ));
        }
        let account = SavingsAccount::new(name, balance, monthly_contribution, annual_rate_pct);
        let id = account.id;
        self.savings_accounts.push(account);
        self.touch();
        Ok(id)
    }

    pub fn remove_savings_account(&mut self, id: Uuid) -> Result<(), BudgetError> {
        let position = self
            .savings_accounts
            .iter()
            .position(|account| account.id == id)
            .ok_or_else(|| BudgetError::NotFound(format!("savings account {id}")))?;
        self.savings_accounts.remove(position);
        self.touch();
        Ok(())
    }

    pub fn add_goal(
        &mut self,
        title: impl Into<String>,
        target_amount: f64,
        deadline: Option<NaiveDate>,
    ) -> Result<Uuid, BudgetError> {
        let title = validated_label(title.into())?;
        if !target_amount.is_finite() || target_amount <= 0.0 {
            return Err(BudgetError::InvalidInput(
                "goal target must be a positive finite amount".into(),
            ));
        }
        let mut goal = SavingsGoal::new(title, target_amount);
        goal.deadline = deadline;
        let id = goal.id;
        self.goals.push(goal);
        self.touch();
        Ok(id)
    }

    pub fn remove_goal(&mut self, id: Uuid) -> Result<(), BudgetError> {
        let position = self
            .goals
            .iter()
            .position(|goal| goal.id == id)
            .ok_or_else(|| BudgetError::NotFound(format!("goal {id}")))?;
        self.goals.remove(position);
        self.touch();
        Ok(())
    }

    /// Explicit-only update of a goal's saved amount.
    pub fn update_goal_saved(&mut self, id: Uuid, amount: f64) -> Result<(), BudgetError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(BudgetError::InvalidInput(
                "saved amount must be finite and not negative".into(),
            ));
        }
        let goal = self
            .goals
            .iter_mut()
            .find(|goal| goal.id == id)
            .ok_or_else(|| BudgetError::NotFound(format!("goal {id}")))?;
        goal.saved_so_far = amount;
        self.touch();
        Ok(())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    fn current_month_mut(&mut self) -> Result<&mut MonthRecord, BudgetError> {
        let key = self.current_month_key;
        self.months
            .get_mut(&key)
            .ok_or_else(|| BudgetError::NotFound(format!("month {key}")))
    }
}

fn validated_label(label: String) -> Result<String, BudgetError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(BudgetError::InvalidInput("label must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: f64) -> Result<(), BudgetError> {
    if !amount.is_finite() || amount == 0.0 {
        return Err(BudgetError::InvalidInput(
            "amount must be a non-zero finite number".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn book() -> Book {
        Book::new(MonthKey::new(2025, 6).unwrap())
    }

    #[test]
    fn new_book_seeds_the_starting_month() {
        let book = book();
        let record = book.current_month().unwrap();
        assert_eq!(record.key, book.current_month_key);
        assert_eq!(record.starting_balance, 0.0);
        assert_eq!(record.reserved_carry, 0.0);
        assert!(record.incomes.is_empty());
    }

    #[test]
    fn income_defaults_to_today_when_no_date_given() {
        let mut book = book();
        let id = book.add_income("Salary", 2000.0, None, today()).unwrap();
        let entry = &book.current_month().unwrap().incomes[0];
        assert_eq!(entry.id, id);
        assert_eq!(entry.date, today());
    }

    #[test]
    fn zero_and_non_finite_amounts_are_rejected_without_mutation() {
        let mut book = book();
        assert!(matches!(
            book.add_income("Salary", 0.0, None, today()),
            Err(BudgetError::InvalidInput(_))
        ));
        assert!(matches!(
            book.add_expense("Food", f64::NAN, None, today()),
            Err(BudgetError::InvalidInput(_))
        ));
        let record = book.current_month().unwrap();
        assert!(record.incomes.is_empty());
        assert!(record.expenses.is_empty());
    }

    #[test]
    fn blank_labels_are_rejected() {
        let mut book = book();
        assert!(matches!(
            book.add_income("   ", 100.0, None, today()),
            Err(BudgetError::InvalidInput(_))
        ));
    }

    #[test]
    fn removing_unknown_ids_is_a_non_fatal_not_found() {
        let mut book = book();
        assert!(matches!(
            book.remove_expense(Uuid::new_v4()),
            Err(BudgetError::NotFound(_))
        ));
        assert!(matches!(
            book.remove_goal(Uuid::new_v4()),
            Err(BudgetError::NotFound(_))
        ));
    }

    #[test]
    fn debit_day_outside_range_is_rejected() {
        let mut book = book();
        assert!(matches!(
            book.add_debit_template("Rent", 0, 800.0),
            Err(BudgetError::InvalidInput(_))
        ));
        assert!(matches!(
            book.add_debit_template("Rent", 32, 800.0),
            Err(BudgetError::InvalidInput(_))
        ));
        assert!(book.add_debit_template("Rent", 31, 800.0).is_ok());
    }

    #[test]
    fn removing_a_template_keeps_materialized_expenses() {
        let mut book = book();
        let template_id = book.add_debit_template("Rent", 1, 800.0).unwrap();
        let key = book.current_month_key;
        let template = book.debit_templates[0].clone();
        crate::book::apply_template(book.months.get_mut(&key).unwrap(), &template);

        book.remove_debit_template(template_id).unwrap();
        assert!(book.debit_templates.is_empty());
        assert!(book
            .month(key)
            .unwrap()
            .expense_from_template(template_id)
            .is_some());
    }

    #[test]
    fn goal_saved_updates_are_explicit_and_validated() {
        let mut book = book();
        let id = book.add_goal("Holiday", 6000.0, None).unwrap();
        book.update_goal_saved(id, 1000.0).unwrap();
        assert_eq!(book.goals[0].saved_so_far, 1000.0);
        assert!(matches!(
            book.update_goal_saved(id, -5.0),
            Err(BudgetError::InvalidInput(_))
        ));
        assert_eq!(book.goals[0].saved_so_far, 1000.0);
    }

    #[test]
    fn set_aside_total_sums_account_contributions() {
        let mut book = book();
        book.add_savings_account("Emergency", 500.0, 150.0, 5.0)
            .unwrap();
        book.add_savings_account("Travel", 0.0, 50.0, 0.0).unwrap();
        assert_eq!(book.set_aside_total(), 200.0);
    }

    #[test]
    fn starting_balance_edit_requires_an_existing_month() {
        let mut book = book();
        let missing = MonthKey::new(2030, 1).unwrap();
        assert!(matches!(
            book.set_starting_balance(missing, 100.0),
            Err(BudgetError::NotFound(_))
        ));
        book.set_starting_balance(book.current_month_key, 250.0)
            .unwrap();
        assert_eq!(book.current_month().unwrap().starting_balance, 250.0);
    }
}
