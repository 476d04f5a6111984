use crate::book::SavingsAccount;

/// Projection horizons surfaced by summary views.
pub const HORIZON_ONE_YEAR: u32 = 12;
pub const HORIZON_FIVE_YEARS: u32 = 60;

/// Ordinary-annuity future value: `initial` compounding at `monthly_rate`
/// per month with `contribution` added at the end of each month.
///
/// `monthly_rate` is a decimal (0.005 for 0.5% per month). Zero months
/// returns `initial`; a zero rate degenerates to straight-line
/// accumulation. The formula is identical for every caller.
pub fn future_value(months: u32, monthly_rate: f64, initial: f64, contribution: f64) -> f64 {
    if months == 0 {
        return initial;
    }
    if monthly_rate == 0.0 {
        return initial + contribution * months as f64;
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    initial * growth + contribution * ((growth - 1.0) / monthly_rate)
}

/// Future value of a savings account after `months`, converting its annual
/// percentage rate to a monthly decimal.
pub fn project_account(account: &SavingsAccount, months: u32) -> f64 {
    let monthly_rate = account.annual_rate_pct / 100.0 / 12.0;
    future_value(
        months,
        monthly_rate,
        account.balance,
        account.monthly_contribution,
    )
}
