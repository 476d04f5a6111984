//! Monthbook offers the month-lifecycle, carry-forward, and projection
//! primitives behind a personal budget tracker: a single persisted document
//! of monthly records, recurring debit templates, savings accounts, and
//! goals, with derived summaries computed on demand.

pub mod book;
pub mod core;
pub mod errors;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        init_tracing();
        tracing::info!("Monthbook tracing initialized.");
    });
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::from_default_env().add_directive("monthbook=info".parse().unwrap());

    fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
