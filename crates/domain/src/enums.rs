use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pool protocol family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoolType {
    /// Concentrated-liquidity pools without hooks.
    V3,
    /// Singleton pool-manager pools with optional hooks.
    V4,
}

impl PoolType {
    /// All supported pool types.
    pub const ALL: [PoolType; 2] = [PoolType::V3, PoolType::V4];

    /// Tag used by the indexer.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V3 => "V3",
            Self::V4 => "V4",
        }
    }
}

impl FromStr for PoolType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "V3" => Ok(Self::V3),
            "V4" => Ok(Self::V4),
            _ => Err(DomainError::UnsupportedPoolType(s.to_string())),
        }
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rolling window a yield figure is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YieldTimeframe {
    /// Last 24 hours.
    Day,
    /// Last 7 days.
    Week,
    /// Last 30 days.
    Month,
    /// Last 90 days.
    Quarter,
}

impl YieldTimeframe {
    /// All timeframes, shortest first.
    pub const ALL: [YieldTimeframe; 4] = [
        YieldTimeframe::Day,
        YieldTimeframe::Week,
        YieldTimeframe::Month,
        YieldTimeframe::Quarter,
    ];

    /// Short label (`24h`, `7d`, `30d`, `90d`).
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "24h",
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
        }
    }
}

impl FromStr for YieldTimeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24h" | "1d" | "day" => Ok(Self::Day),
            "7d" | "week" => Ok(Self::Week),
            "30d" | "month" => Ok(Self::Month),
            "90d" | "quarter" => Ok(Self::Quarter),
            other => Err(format!("unknown timeframe '{other}', expected 24h, 7d, 30d or 90d")),
        }
    }
}

impl fmt::Display for YieldTimeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_type_tags() {
        assert_eq!(PoolType::V3.as_str(), "V3");
        assert_eq!(PoolType::V4.as_str(), "V4");
        assert_eq!(serde_json::to_string(&PoolType::V4).unwrap(), "\"V4\"");
    }

    #[test]
    fn test_pool_type_parsing() {
        assert_eq!("v3".parse::<PoolType>(), Ok(PoolType::V3));
        assert_eq!("V4".parse::<PoolType>(), Ok(PoolType::V4));
        assert_eq!(
            "V2".parse::<PoolType>(),
            Err(DomainError::UnsupportedPoolType("V2".to_string()))
        );
    }

    #[test]
    fn test_timeframe_parsing() {
        assert_eq!("30d".parse::<YieldTimeframe>(), Ok(YieldTimeframe::Month));
        assert_eq!("24H".parse::<YieldTimeframe>(), Ok(YieldTimeframe::Day));
        assert!("1y".parse::<YieldTimeframe>().is_err());
    }
}
