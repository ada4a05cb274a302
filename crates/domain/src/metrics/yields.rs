//! Annualized fee yields from historical pool samples.
//!
//! Per-day rates are `fees / tvl * 100 * 365`. The 24h figure sums the hourly
//! fees and annualizes once against the pool's current TVL; the 7d, 30d and 90d
//! figures are trimmed means of the per-day rates in each window.

use crate::value_objects::time_series::TimeSeriesSample;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Days in a year used for annualization.
const DAYS_PER_YEAR: i64 = 365;

/// Annualized yields, in percent, for the four reported windows.
///
/// A window without enough history reports zero, never an absent value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PoolYields {
    #[serde(rename = "yield24h", with = "rust_decimal::serde::float")]
    pub yield_24h: Decimal,
    #[serde(rename = "yield7d", with = "rust_decimal::serde::float")]
    pub yield_7d: Decimal,
    #[serde(rename = "yield30d", with = "rust_decimal::serde::float")]
    pub yield_30d: Decimal,
    #[serde(rename = "yield90d", with = "rust_decimal::serde::float")]
    pub yield_90d: Decimal,
}

impl PoolYields {
    /// Whether every window is zero.
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        self.yield_24h.is_zero()
            && self.yield_7d.is_zero()
            && self.yield_30d.is_zero()
            && self.yield_90d.is_zero()
    }
}

/// Size, trimming and minimum sample count of a daily window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldWindow {
    /// Number of most recent daily samples considered.
    pub days: usize,
    /// Fraction dropped from each end of the sorted rates.
    pub trim: Decimal,
    /// Minimum qualifying days below which the window yields zero.
    pub min_samples: usize,
}

impl YieldWindow {
    pub fn new(days: usize, trim: Decimal, min_samples: usize) -> Self {
        Self {
            days,
            trim,
            min_samples,
        }
    }
}

/// Thresholds used by [`YieldCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YieldPolicy {
    /// Minimum hourly samples needed for the 24h figure.
    pub hourly_min_samples: usize,
    pub week: YieldWindow,
    pub month: YieldWindow,
    pub quarter: YieldWindow,
}

impl Default for YieldPolicy {
    fn default() -> Self {
        Self {
            hourly_min_samples: 10,
            week: YieldWindow::new(7, Decimal::new(15, 2), 3),
            month: YieldWindow::new(30, Decimal::new(10, 2), 20),
            quarter: YieldWindow::new(90, Decimal::new(5, 2), 70),
        }
    }
}

/// Computes [`PoolYields`] from hourly and daily samples.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldCalculator {
    policy: YieldPolicy,
}

impl YieldCalculator {
    /// Creates a calculator with the given policy.
    #[must_use]
    pub fn new(policy: YieldPolicy) -> Self {
        Self { policy }
    }

    /// Returns the active policy.
    #[must_use]
    pub fn policy(&self) -> &YieldPolicy {
        &self.policy
    }

    /// Computes all four yields for one pool.
    ///
    /// # Arguments
    /// * `current_tvl_usd` - The pool's current TVL, used for the 24h figure
    /// * `hourly` - Hourly samples covering the last day
    /// * `daily` - Daily samples, in any order
    /// * `min_tvl_usd` - Days whose TVL is below this are ignored
    #[must_use]
    pub fn compute(
        &self,
        current_tvl_usd: Decimal,
        hourly: &[TimeSeriesSample],
        daily: &[TimeSeriesSample],
        min_tvl_usd: Decimal,
    ) -> PoolYields {
        let mut recent_first: Vec<&TimeSeriesSample> = daily.iter().collect();
        recent_first.sort_by(|a, b| b.period_start_timestamp.cmp(&a.period_start_timestamp));

        PoolYields {
            yield_24h: self.hourly_yield(current_tvl_usd, hourly),
            yield_7d: window_yield(&recent_first, &self.policy.week, min_tvl_usd),
            yield_30d: window_yield(&recent_first, &self.policy.month, min_tvl_usd),
            yield_90d: window_yield(&recent_first, &self.policy.quarter, min_tvl_usd),
        }
    }

    fn hourly_yield(&self, current_tvl_usd: Decimal, hourly: &[TimeSeriesSample]) -> Decimal {
        if hourly.len() < self.policy.hourly_min_samples {
            return Decimal::ZERO;
        }
        let fees: Decimal = hourly.iter().map(|sample| sample.fees_usd).sum();
        annualized_rate(fees, current_tvl_usd)
    }
}

fn window_yield(
    recent_first: &[&TimeSeriesSample],
    window: &YieldWindow,
    min_tvl_usd: Decimal,
) -> Decimal {
    let rates: Vec<Decimal> = recent_first
        .iter()
        .take(window.days)
        .filter(|sample| sample.total_value_locked_usd >= min_tvl_usd)
        .map(|sample| annualized_rate(sample.fees_usd, sample.total_value_locked_usd))
        .filter(|rate| !rate.is_zero())
        .collect();

    if rates.len() < window.min_samples {
        return Decimal::ZERO;
    }
    trimmed_average(&rates, window.trim)
}

/// Annualized percentage rate of `fees_usd` earned on `tvl_usd` in one day.
///
/// Returns zero when TVL is not positive or the division overflows.
#[must_use]
pub fn annualized_rate(fees_usd: Decimal, tvl_usd: Decimal) -> Decimal {
    if tvl_usd <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    fees_usd
        .checked_div(tvl_usd)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(100 * DAYS_PER_YEAR)))
        .unwrap_or(Decimal::ZERO)
}

/// Arithmetic mean; zero for an empty slice.
#[must_use]
pub fn average(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().sum::<Decimal>() / Decimal::from(values.len())
}

/// Mean after dropping `floor(len * trim)` values from each end of the sorted input.
///
/// Returns zero for an empty input or when trimming leaves nothing.
#[must_use]
pub fn trimmed_average(values: &[Decimal], trim: Decimal) -> Decimal {
    let mut sorted = values.to_vec();
    sorted.sort();

    let cut = (Decimal::from(sorted.len()) * trim.max(Decimal::ZERO))
        .floor()
        .to_usize()
        .unwrap_or(0);
    if cut * 2 >= sorted.len() {
        return Decimal::ZERO;
    }
    average(&sorted[cut..sorted.len() - cut])
}
