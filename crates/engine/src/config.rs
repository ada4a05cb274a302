//! Search tunables.

use chrono::{DateTime, Duration, Utc};
use lp_yield_domain::prelude::YieldPolicy;
use rust_decimal::Decimal;

/// Configuration for pool searches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Pools reporting more TVL than this are treated as indexer errors.
    pub max_tvl_usd: Decimal,
    /// Single-day fee values at or above this are discarded.
    pub max_daily_fees_usd: Decimal,
    /// Single-hour fee values at or above this are discarded.
    pub max_hourly_fees_usd: Decimal,
    /// A pool must have a daily sample inside this many days.
    pub activity_window_days: i64,
    /// Daily history requested per pool, in days.
    pub daily_history_days: i64,
    pub daily_sample_limit: usize,
    /// Hourly history requested per pool, in hours.
    pub hourly_history_hours: i64,
    pub hourly_sample_limit: usize,
    pub yield_policy: YieldPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_tvl_usd: Decimal::new(10_000_000_000, 0),
            max_daily_fees_usd: Decimal::new(1_000_000_000, 0),
            max_hourly_fees_usd: Decimal::new(10_000_000, 0),
            activity_window_days: 30,
            daily_history_days: 90,
            daily_sample_limit: 100,
            hourly_history_hours: 24,
            hourly_sample_limit: 24,
            yield_policy: YieldPolicy::default(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn with_max_tvl_usd(mut self, max_tvl_usd: Decimal) -> Self {
        self.max_tvl_usd = max_tvl_usd;
        self
    }

    #[must_use]
    pub fn with_fee_ceilings(mut self, daily: Decimal, hourly: Decimal) -> Self {
        self.max_daily_fees_usd = daily;
        self.max_hourly_fees_usd = hourly;
        self
    }

    #[must_use]
    pub fn with_activity_window_days(mut self, days: i64) -> Self {
        self.activity_window_days = days;
        self
    }

    #[must_use]
    pub fn with_daily_history(mut self, days: i64, limit: usize) -> Self {
        self.daily_history_days = days;
        self.daily_sample_limit = limit;
        self
    }

    #[must_use]
    pub fn with_hourly_history(mut self, hours: i64, limit: usize) -> Self {
        self.hourly_history_hours = hours;
        self.hourly_sample_limit = limit;
        self
    }

    #[must_use]
    pub fn with_yield_policy(mut self, policy: YieldPolicy) -> Self {
        self.yield_policy = policy;
        self
    }

    /// Start of the activity window, unix seconds.
    #[must_use]
    pub fn active_since(&self, now: DateTime<Utc>) -> i64 {
        (now - Duration::days(self.activity_window_days)).timestamp()
    }

    #[must_use]
    pub fn daily_since(&self, now: DateTime<Utc>) -> i64 {
        (now - Duration::days(self.daily_history_days)).timestamp()
    }

    #[must_use]
    pub fn hourly_since(&self, now: DateTime<Utc>) -> i64 {
        (now - Duration::hours(self.hourly_history_hours)).timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.max_tvl_usd, dec!(10000000000));
        assert_eq!(config.max_daily_fees_usd, dec!(1000000000));
        assert_eq!(config.max_hourly_fees_usd, dec!(10000000));
        assert_eq!(config.yield_policy.month.min_samples, 20);
    }

    #[test]
    fn test_windows() {
        let now = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();
        let config = SearchConfig::default();
        assert_eq!(config.hourly_since(now), now.timestamp() - 86_400);
        assert_eq!(config.active_since(now), now.timestamp() - 30 * 86_400);
        assert_eq!(config.daily_since(now), now.timestamp() - 90 * 86_400);
    }

    #[test]
    fn test_builders() {
        let config = SearchConfig::default()
            .with_max_tvl_usd(dec!(5))
            .with_daily_history(7, 7)
            .with_hourly_history(12, 12);
        assert_eq!(config.max_tvl_usd, dec!(5));
        assert_eq!(config.daily_sample_limit, 7);
        assert_eq!(config.hourly_history_hours, 12);
    }
}
