//! Table and JSON rendering.

use anyhow::Result;
use lp_yield_domain::prelude::{Network, Pool, Protocol, Token, TokenGroup, YieldTimeframe};
use lp_yield_engine::prelude::{MatchedPools, TokenPrice};
use prettytable::{Table, row};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_networks() {
    let mut table = Table::new();
    table.set_titles(row!["Chain ID", "Name", "Testnet", "Wrapped native"]);
    for network in Network::list() {
        table.add_row(row![
            network.chain_id(),
            network.name(),
            if network.is_testnet() { "yes" } else { "no" },
            network.wrapped_native_address()
        ]);
    }
    table.printstd();
}

pub fn print_tokens(tokens: &[Token], network: Option<Network>) {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Symbol", "Name", "Networks"]);
    for token in tokens {
        let networks = match network {
            Some(network) => token
                .address(network)
                .map(ToString::to_string)
                .unwrap_or_default(),
            None => token
                .addresses
                .present_networks()
                .map(Network::name)
                .collect::<Vec<_>>()
                .join(", "),
        };
        table.add_row(row![
            token.id.as_deref().unwrap_or("-"),
            token.symbol,
            token.name,
            networks
        ]);
    }
    table.printstd();
}

pub fn print_groups(groups: &[TokenGroup]) {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Name", "Tokens"]);
    for group in groups {
        let symbols: Vec<&str> = group.tokens.iter().map(|t| t.symbol.as_str()).collect();
        table.add_row(row![group.id, group.name, symbols.join(", ")]);
    }
    table.printstd();
}

pub fn print_price(price: &TokenPrice) {
    println!(
        "{} on {}: ${}",
        price.address,
        price.chain_id.name(),
        price.usd_price.normalize()
    );
}

pub fn print_protocols(protocols: &[Protocol]) {
    let mut table = Table::new();
    table.set_titles(row!["ID", "Name", "URL"]);
    for protocol in protocols {
        table.add_row(row![protocol.id, protocol.name, protocol.url]);
    }
    table.printstd();
}

pub fn print_pools(matched: &MatchedPools, sort: Option<YieldTimeframe>) {
    if matched.pools.is_empty() {
        println!("No pools matched.");
        return;
    }

    let mut table = Table::new();
    let sorted = sort
        .map(|timeframe| format!("sorted by {timeframe}"))
        .unwrap_or_default();
    table.set_titles(pool_titles());
    for pool in &matched.pools {
        table.add_row(pool_row(pool));
    }
    table.printstd();
    println!("{} pools {sorted}", matched.pools.len());

    if !matched.rejected_records.is_empty() {
        println!("{} records could not be normalized:", matched.rejected_records.len());
        for rejected in &matched.rejected_records {
            println!("  {rejected}");
        }
    }
}

pub fn print_pool(pool: &Pool) {
    let mut table = Table::new();
    table.set_titles(pool_titles());
    table.add_row(pool_row(pool));
    table.printstd();
}

fn pool_titles() -> prettytable::Row {
    row![
        "Chain",
        "Type",
        "Protocol",
        "Pair",
        "Fee",
        "TVL (USD)",
        "24h %",
        "7d %",
        "30d %",
        "90d %",
        "Address"
    ]
}

fn pool_row(pool: &Pool) -> prettytable::Row {
    let common = pool.common();
    let yields = pool.yields();
    row![
        common.chain_id.name(),
        pool.pool_type(),
        common.protocol.name,
        format!("{}/{}", common.token0.symbol, common.token1.symbol),
        format_fee_tier(common.fee_tier),
        common.total_value_locked_usd.round_dp(0),
        percent(yields.yield_24h),
        percent(yields.yield_7d),
        percent(yields.yield_30d),
        percent(yields.yield_90d),
        common.pool_address
    ]
}

fn percent(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// Fee tier in hundredths of a basis point, shown as a percentage.
fn format_fee_tier(fee_tier: u32) -> String {
    let percent = Decimal::from(fee_tier) / Decimal::from(10_000);
    format!("{}%", percent.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fee_tier() {
        assert_eq!(format_fee_tier(500), "0.05%");
        assert_eq!(format_fee_tier(3000), "0.3%");
        assert_eq!(format_fee_tier(10_000), "1%");
    }

    #[test]
    fn test_percent_rounds_to_cents() {
        assert_eq!(percent(Decimal::new(123_456, 4)), "12.35");
        assert_eq!(percent(Decimal::ZERO), "0.00");
    }
}
