//! Token pair constraints for a single network.
//!
//! Indexers may store either token of a pool in position 0, and V3-style pools
//! only ever hold the wrapped form of the native asset. For every native (zero)
//! address on one side the wrapped-native address is added to that same side,
//! then every cross combination is emitted in both orders.

use lp_yield_domain::prelude::{Address, Network, TokenPair};
use std::collections::HashSet;

/// Addresses on one side, with wrapped-native added after each native entry.
fn expand_side(addresses: &[Address], network: Network) -> Vec<Address> {
    let wrapped = network.wrapped_native_address();
    let mut expanded: Vec<Address> = Vec::with_capacity(addresses.len() + 1);
    for address in addresses {
        if !expanded.contains(address) {
            expanded.push(address.clone());
        }
        if address.is_zero() && !expanded.contains(&wrapped) {
            expanded.push(wrapped.clone());
        }
    }
    expanded
}

/// Builds the de-duplicated pair set to query on `network`.
///
/// Pairs of a token with itself are skipped. The result keeps insertion order:
/// for each `(a, b)` combination, `(a, b)` precedes `(b, a)`. Empty input on
/// either side yields an empty set.
#[must_use]
pub fn build_token_pairs(
    token0_addresses: &[Address],
    token1_addresses: &[Address],
    network: Network,
) -> Vec<TokenPair> {
    let side0 = expand_side(token0_addresses, network);
    let side1 = expand_side(token1_addresses, network);

    let mut seen: HashSet<TokenPair> = HashSet::new();
    let mut pairs = Vec::with_capacity(side0.len() * side1.len() * 2);
    for a in &side0 {
        for b in &side1 {
            if a == b {
                continue;
            }
            let both_ways = [
                TokenPair::new(a.clone(), b.clone()),
                TokenPair::new(b.clone(), a.clone()),
            ];
            for pair in both_ways {
                if seen.insert(pair.clone()) {
                    pairs.push(pair);
                }
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::new(s)
    }

    #[test]
    fn test_every_combination_in_both_orders() {
        let side0 = [addr("0xa1"), addr("0xa2"), addr("0xa3")];
        let side1 = [addr("0xb1"), addr("0xb2")];
        let pairs = build_token_pairs(&side0, &side1, Network::Base);

        assert_eq!(pairs.len(), 2 * 3 * 2);
        let unique: HashSet<_> = pairs.iter().cloned().collect();
        assert_eq!(unique.len(), pairs.len());
        assert!(pairs.contains(&TokenPair::new(addr("0xb2"), addr("0xa3"))));
        assert_eq!(pairs[0], TokenPair::new(addr("0xa1"), addr("0xb1")));
        assert_eq!(pairs[1], TokenPair::new(addr("0xb1"), addr("0xa1")));
    }

    #[test]
    fn test_identical_tokens_are_skipped() {
        let pairs = build_token_pairs(&[addr("0xa1")], &[addr("0xA1")], Network::Ethereum);
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_overlapping_sides_do_not_duplicate() {
        let pairs = build_token_pairs(
            &[addr("0xa1"), addr("0xb1")],
            &[addr("0xb1"), addr("0xa1")],
            Network::Ethereum,
        );
        assert_eq!(
            pairs,
            vec![
                TokenPair::new(addr("0xa1"), addr("0xb1")),
                TokenPair::new(addr("0xb1"), addr("0xa1")),
            ]
        );
    }

    #[test]
    fn test_native_adds_wrapped_on_same_side() {
        let usdc = addr("0x833589fcd6edb6e08f4c7c32d4f71b54bda02913");
        let weth = Network::Base.wrapped_native_address();
        let pairs = build_token_pairs(&[Address::zero()], &[usdc.clone()], Network::Base);

        assert_eq!(
            pairs,
            vec![
                TokenPair::new(Address::zero(), usdc.clone()),
                TokenPair::new(usdc.clone(), Address::zero()),
                TokenPair::new(weth.clone(), usdc.clone()),
                TokenPair::new(usdc, weth),
            ]
        );
    }

    #[test]
    fn test_native_and_wrapped_against_each_other() {
        let weth = Network::Ethereum.wrapped_native_address();
        let pairs = build_token_pairs(&[Address::zero()], &[weth.clone()], Network::Ethereum);
        // native/wrapped pools are valid; wrapped against itself is skipped
        assert_eq!(
            pairs,
            vec![
                TokenPair::new(Address::zero(), weth.clone()),
                TokenPair::new(weth, Address::zero()),
            ]
        );
    }

    #[test]
    fn test_empty_side_yields_nothing() {
        assert!(build_token_pairs(&[], &[addr("0xb1")], Network::Scroll).is_empty());
        assert!(build_token_pairs(&[Address::zero()], &[], Network::Scroll).is_empty());
    }
}
