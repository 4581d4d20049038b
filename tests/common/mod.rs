//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod http_fixture;

use chrono::NaiveDate;
use std::time::Duration;

/// Timeout for waiting on the fetch worker
pub fn test_timeout() -> Duration {
    Duration::from_secs(5)
}

/// `2021-01-01` plus `offset` days
pub fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid date") + chrono::Days::new(offset)
}
