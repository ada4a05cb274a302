//! Ordering of matched pools by annualized yield.

use lp_yield_domain::prelude::{Pool, YieldTimeframe};
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;

/// Scores a pool; higher is better.
pub trait RankingObjective {
    fn evaluate(&self, pool: &Pool) -> Decimal;

    /// Orders `a` before `b` when it scores higher.
    fn compare(&self, a: &Pool, b: &Pool) -> Ordering {
        self.evaluate(b).cmp(&self.evaluate(a))
    }
}

/// Ranks by the yield of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaximizeYield(pub YieldTimeframe);

impl RankingObjective for MaximizeYield {
    fn evaluate(&self, pool: &Pool) -> Decimal {
        yield_for(pool, self.0)
    }
}

/// Ranks by pool TVL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaximizeTvl;

impl RankingObjective for MaximizeTvl {
    fn evaluate(&self, pool: &Pool) -> Decimal {
        pool.total_value_locked_usd()
    }
}

/// Yield of `pool` over `timeframe`, in percent.
#[must_use]
pub fn yield_for(pool: &Pool, timeframe: YieldTimeframe) -> Decimal {
    let yields = pool.yields();
    match timeframe {
        YieldTimeframe::Day => yields.yield_24h,
        YieldTimeframe::Week => yields.yield_7d,
        YieldTimeframe::Month => yields.yield_30d,
        YieldTimeframe::Quarter => yields.yield_90d,
    }
}

/// Sorts pools by an objective. Ties keep their input order.
pub fn rank_by(pools: &mut [Pool], objective: &impl RankingObjective) {
    pools.sort_by(|a, b| objective.compare(a, b));
}

/// Pools ordered from highest to lowest yield over `timeframe`.
#[must_use]
pub fn rank_pools(mut pools: Vec<Pool>, timeframe: YieldTimeframe) -> Vec<Pool> {
    rank_by(&mut pools, &MaximizeYield(timeframe));
    pools
}

/// One ranking per window.
#[derive(Debug, Clone, Default, Serialize)]
pub struct YieldRankings {
    #[serde(rename = "24h")]
    pub day: Vec<Pool>,
    #[serde(rename = "7d")]
    pub week: Vec<Pool>,
    #[serde(rename = "30d")]
    pub month: Vec<Pool>,
    #[serde(rename = "90d")]
    pub quarter: Vec<Pool>,
}

impl YieldRankings {
    #[must_use]
    pub fn get(&self, timeframe: YieldTimeframe) -> &[Pool] {
        match timeframe {
            YieldTimeframe::Day => &self.day,
            YieldTimeframe::Week => &self.week,
            YieldTimeframe::Month => &self.month,
            YieldTimeframe::Quarter => &self.quarter,
        }
    }
}

/// Ranks the same pools once for every window.
///
/// Pools without yield in a window are left out of that window's ranking.
#[must_use]
pub fn best_yields_by_timeframe(pools: &[Pool]) -> YieldRankings {
    let ranked = |timeframe: YieldTimeframe| {
        let earning = pools
            .iter()
            .filter(|pool| yield_for(pool, timeframe) > Decimal::ZERO)
            .cloned()
            .collect();
        rank_pools(earning, timeframe)
    };
    YieldRankings {
        day: ranked(YieldTimeframe::Day),
        week: ranked(YieldTimeframe::Week),
        month: ranked(YieldTimeframe::Month),
        quarter: ranked(YieldTimeframe::Quarter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_yield_domain::prelude::{
        Address, Network, PoolCommon, PoolYields, Protocol, TokenDescriptor, V3Pool,
    };
    use rust_decimal_macros::dec;

    fn token(symbol: &str) -> TokenDescriptor {
        TokenDescriptor {
            address: Address::zero(),
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            decimals: 18,
            logo_url: None,
        }
    }

    fn pool(address: &str, tvl: Decimal, day: Decimal, month: Decimal) -> Pool {
        Pool::V3(V3Pool {
            common: PoolCommon {
                chain_id: Network::Ethereum,
                pool_address: Address::new(address),
                protocol: Protocol::new("uni", "Uniswap", "", ""),
                token0: token("ETH"),
                token1: token("USDC"),
                total_value_locked_usd: tvl,
                fee_tier: 500,
                position_manager_address: Address::zero(),
                permit2_address: None,
                yields: PoolYields {
                    yield_24h: day,
                    yield_7d: Decimal::ZERO,
                    yield_30d: month,
                    yield_90d: Decimal::ZERO,
                },
            },
            tick_spacing: 10,
            latest_tick: 0,
            latest_sqrt_price_x96: None,
            deployer_address: None,
        })
    }

    fn addresses(pools: &[Pool]) -> Vec<&str> {
        pools.iter().map(|p| p.address().as_str()).collect()
    }

    #[test]
    fn test_rank_pools_descending() {
        let pools = vec![
            pool("0xa", dec!(100), dec!(5), dec!(30)),
            pool("0xb", dec!(200), dec!(50), dec!(10)),
            pool("0xc", dec!(300), dec!(20), dec!(20)),
        ];
        let by_day = rank_pools(pools.clone(), YieldTimeframe::Day);
        assert_eq!(addresses(&by_day), vec!["0xb", "0xc", "0xa"]);
        let by_month = rank_pools(pools, YieldTimeframe::Month);
        assert_eq!(addresses(&by_month), vec!["0xa", "0xc", "0xb"]);
    }

    #[test]
    fn test_rank_pools_is_stable() {
        let pools = vec![
            pool("0xa", dec!(100), dec!(10), dec!(1)),
            pool("0xb", dec!(100), dec!(10), dec!(1)),
        ];
        let ranked = rank_pools(pools, YieldTimeframe::Day);
        assert_eq!(addresses(&ranked), vec!["0xa", "0xb"]);
    }

    #[test]
    fn test_rank_by_tvl() {
        let mut pools = vec![
            pool("0xa", dec!(100), dec!(1), dec!(1)),
            pool("0xb", dec!(300), dec!(1), dec!(1)),
        ];
        rank_by(&mut pools, &MaximizeTvl);
        assert_eq!(addresses(&pools), vec!["0xb", "0xa"]);
    }

    #[test]
    fn test_best_yields_skip_empty_windows() {
        let pools = vec![
            pool("0xa", dec!(100), dec!(5), Decimal::ZERO),
            pool("0xb", dec!(100), dec!(9), dec!(12)),
        ];
        let rankings = best_yields_by_timeframe(&pools);
        assert_eq!(addresses(rankings.get(YieldTimeframe::Day)), vec!["0xb", "0xa"]);
        assert_eq!(addresses(rankings.get(YieldTimeframe::Month)), vec!["0xb"]);
        assert!(rankings.get(YieldTimeframe::Week).is_empty());
    }
}
