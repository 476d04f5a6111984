//! Budget document models, persistence-friendly types, and helpers.

#[allow(clippy::module_inception)]
pub mod book;
pub mod debit;
pub mod month;
pub mod savings;
pub mod settings;

pub use book::{Book, CURRENT_SCHEMA_VERSION};
pub use debit::{apply_template, DebitTemplate};
pub use month::{Entry, MonthKey, MonthRecord};
pub use savings::{SavingsAccount, SavingsGoal};
pub use settings::{Settings, MIN_CARRY_PERCENT};
