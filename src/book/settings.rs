use serde::{Deserialize, Serialize};

/// Lowest carry percentage the document accepts; unset or non-finite
/// values fall back to this floor.
pub const MIN_CARRY_PERCENT: f64 = 2.0;

/// Document-embedded settings. Currency is a pure display label applied
/// uniformly at render time; it never affects stored amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Percentage of a positive month leftover reserved (non-spendable)
    /// when the next month is created.
    #[serde(default = "Settings::default_carry_percent")]
    pub carry_percent: f64,
    #[serde(default = "Settings::default_currency")]
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            carry_percent: Self::default_carry_percent(),
            currency: Self::default_currency(),
        }
    }
}

impl Settings {
    /// Carry percentage with the floor applied.
    pub fn effective_carry_percent(&self) -> f64 {
        if self.carry_percent.is_finite() {
            self.carry_percent.max(MIN_CARRY_PERCENT)
        } else {
            MIN_CARRY_PERCENT
        }
    }

    pub fn currency_symbol(&self) -> &str {
        match self.currency.as_str() {
            "USD" => "$",
            "EUR" => "\u{20ac}",
            _ => "R",
        }
    }

    fn default_carry_percent() -> f64 {
        MIN_CARRY_PERCENT
    }

    fn default_currency() -> String {
        "ZAR".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carry_percent_floors_at_minimum() {
        let mut settings = Settings::default();
        settings.carry_percent = 0.5;
        assert_eq!(settings.effective_carry_percent(), MIN_CARRY_PERCENT);
        settings.carry_percent = 10.0;
        assert_eq!(settings.effective_carry_percent(), 10.0);
    }

    #[test]
    fn non_finite_carry_percent_falls_back() {
        let mut settings = Settings::default();
        settings.carry_percent = f64::NAN;
        assert_eq!(settings.effective_carry_percent(), MIN_CARRY_PERCENT);
        settings.carry_percent = f64::INFINITY;
        assert_eq!(settings.effective_carry_percent(), MIN_CARRY_PERCENT);
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings.carry_percent, MIN_CARRY_PERCENT);
        assert_eq!(settings.currency, "ZAR");
        assert_eq!(settings.currency_symbol(), "R");
    }

    #[test]
    fn currency_symbols_match_labels() {
        let mut settings = Settings::default();
        settings.currency = "USD".into();
        assert_eq!(settings.currency_symbol(), "$");
        settings.currency = "EUR".into();
        assert_eq!(settings.currency_symbol(), "\u{20ac}");
    }
}
