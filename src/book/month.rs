use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Calendar-month identifier, ordered year-major. Serialized as `YYYY-MM`
/// so it can key the persisted document's month map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Builds a key for a 1-based calendar month. Returns `None` when
    /// `month` falls outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The immediately following calendar month.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The immediately preceding calendar month.
    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn days_in_month(self) -> u32 {
        let next = self.next();
        NaiveDate::from_ymd_opt(next.year, next.month, 1)
            .map(|first_next| (first_next - Duration::days(1)).day())
            .unwrap_or(28)
    }

    /// Date within this month for a day-of-month, clamped to the month's
    /// actual length (day 31 in a 30-day month lands on the 30th).
    pub fn date_for_day(self, day: u32) -> NaiveDate {
        let day = day.clamp(1, self.days_in_month());
        NaiveDate::from_ymd_opt(self.year, self.month, day).unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid month key `{s}`"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in month key `{s}`"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in month key `{s}`"))?;
        MonthKey::new(year, month).ok_or_else(|| format!("month out of range in key `{s}`"))
    }
}

impl TryFrom<String> for MonthKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// A single dated income or expense line inside a month record.
///
/// `source_template` back-references the recurring debit template this
/// expense was materialized from; a month holds at most one such expense
/// per template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub label: String,
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_template: Option<Uuid>,
}

impl Entry {
    pub fn new(label: impl Into<String>, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            amount,
            date,
            source_template: None,
        }
    }
}

/// One calendar month of budget activity.
///
/// `starting_balance` and `reserved_carry` are fixed at creation by the
/// carry-forward rules; the starting balance changes afterwards only through
/// an explicit user edit. The reserve is a spend-restriction annotation and
/// is never subtracted from the starting balance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthRecord {
    pub key: MonthKey,
    pub starting_balance: f64,
    pub reserved_carry: f64,
    #[serde(default)]
    pub incomes: Vec<Entry>,
    #[serde(default)]
    pub expenses: Vec<Entry>,
}

impl MonthRecord {
    pub fn new(key: MonthKey) -> Self {
        Self::with_carry(key, 0.0, 0.0)
    }

    pub fn with_carry(key: MonthKey, starting_balance: f64, reserved_carry: f64) -> Self {
        Self {
            key,
            starting_balance,
            reserved_carry,
            incomes: Vec::new(),
            expenses: Vec::new(),
        }
    }

    /// The expense materialized from `template_id`, if one exists.
    pub fn expense_from_template(&self, template_id: Uuid) -> Option<&Entry> {
        self.expenses
            .iter()
            .find(|entry| entry.source_template == Some(template_id))
    }
}
