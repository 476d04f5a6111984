use crate::book::{apply_template, Book, MonthKey, MonthRecord};
use crate::core::round2;
use crate::core::summary::SummaryService;

/// Direction for month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Sequencing of months and the carry-forward state machine.
pub struct MonthService;

impl MonthService {
    /// Returns the record for `key`, creating it through the carry-forward
    /// rules when navigation first reaches it.
    ///
    /// Creation is one-shot: the new month's starting balance and reserve
    /// are computed from the preceding month exactly once, enabled debit
    /// templates are materialized exactly once, and repeat calls hand back
    /// the stored record untouched.
    pub fn ensure_month(book: &mut Book, key: MonthKey) -> &MonthRecord {
        if book.months.contains_key(&key) {
            return &book.months[&key];
        }
        let record = Self::build_month(book, key);
        tracing::info!(
            month = %key,
            starting = record.starting_balance,
            reserved = record.reserved_carry,
            "created month record"
        );
        book.touch();
        book.months.entry(key).or_insert(record)
    }

    /// Moves the current-position pointer one month. Forward creates the
    /// target record on demand; backward never creates anything and is a
    /// no-op at the earliest known month.
    pub fn advance(book: &mut Book, direction: Direction) -> MonthKey {
        match direction {
            Direction::Forward => {
                let next = book.current_month_key.next();
                Self::ensure_month(book, next);
                book.current_month_key = next;
                book.touch();
            }
            Direction::Backward => {
                let prev = book.current_month_key.prev();
                if book.months.contains_key(&prev) {
                    book.current_month_key = prev;
                    book.touch();
                }
            }
        }
        book.current_month_key
    }

    fn build_month(book: &Book, key: MonthKey) -> MonthRecord {
        let (prev_starting, leftover) = match book.month(key.prev()) {
            Some(prev) => {
                let totals = SummaryService::totals_for_record(prev, book.set_aside_total());
                (prev.starting_balance, totals.leftover)
            }
            None => (0.0, 0.0),
        };

        // The entire leftover rolls into the opening balance, negative or
        // not; the reserved slice is an annotation on top, never more than
        // the leftover itself.
        let carry_percent = book.settings.effective_carry_percent();
        let reserved_carry = if leftover > 0.0 {
            round2(leftover * carry_percent / 100.0).min(leftover)
        } else {
            0.0
        };

        let mut record = MonthRecord::with_carry(key, prev_starting + leftover, reserved_carry);
        for template in &book.debit_templates {
            apply_template(&mut record, template);
        }
        record
    }
}
