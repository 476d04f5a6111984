use crate::book::{Book, MonthKey, MonthRecord};
use crate::core::projection::{future_value, HORIZON_FIVE_YEARS, HORIZON_ONE_YEAR};
use crate::errors::BudgetError;

/// Derived aggregates for a single month. Computed on demand from the
/// record and the document-wide set-aside figure; never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthTotals {
    pub starting_balance: f64,
    pub reserved_carry: f64,
    pub income: f64,
    pub expenses: f64,
    pub set_aside: f64,
    /// May be negative; negative leftovers propagate into the next month's
    /// starting balance rather than being clamped.
    pub leftover: f64,
    /// Leftover-excluding-reserve ceiling for discretionary spending.
    pub available_to_spend: f64,
}

/// Projected growth of a month's non-negative leftover at the standard
/// summary horizons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeftoverProjection {
    pub one_year: f64,
    pub five_years: f64,
}

pub struct SummaryService;

impl SummaryService {
    pub fn compute_totals(book: &Book, key: MonthKey) -> Result<MonthTotals, BudgetError> {
        let record = book
            .month(key)
            .ok_or_else(|| BudgetError::NotFound(format!("month {key}")))?;
        Ok(Self::totals_for_record(record, book.set_aside_total()))
    }

    /// Pure aggregate over one record. Materialized debit expenses already
    /// live in `expenses`, so templates are never counted separately.
    pub fn totals_for_record(record: &MonthRecord, set_aside: f64) -> MonthTotals {
        let income: f64 = record.incomes.iter().map(|entry| entry.amount).sum();
        let expenses: f64 = record.expenses.iter().map(|entry| entry.amount).sum();
        let leftover = record.starting_balance + income - expenses - set_aside;
        let available_to_spend =
            record.starting_balance + income - record.reserved_carry - set_aside;
        MonthTotals {
            starting_balance: record.starting_balance,
            reserved_carry: record.reserved_carry,
            income,
            expenses,
            set_aside,
            leftover,
            available_to_spend,
        }
    }

    /// Projects the month's leftover, floored at zero, one and five years
    /// out at `monthly_rate` (a decimal per month), with the document-wide
    /// set-aside contributed every month.
    pub fn project_leftover(
        book: &Book,
        key: MonthKey,
        monthly_rate: f64,
    ) -> Result<LeftoverProjection, BudgetError> {
        let totals = Self::compute_totals(book, key)?;
        let initial = totals.leftover.max(0.0);
        Ok(LeftoverProjection {
            one_year: future_value(HORIZON_ONE_YEAR, monthly_rate, initial, totals.set_aside),
            five_years: future_value(HORIZON_FIVE_YEARS, monthly_rate, initial, totals.set_aside),
        })
    }
}
