//! Static token and token-group catalog.
//!
//! Loaded once at startup and shared read-only afterwards.

mod token_groups;
mod token_list;

use crate::address::Address;
use crate::entities::token::{Token, TokenGroup};
use crate::network::Network;

/// What a catalog id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Token(&'a Token),
    Group(&'a TokenGroup),
}

impl<'a> Selector<'a> {
    /// Tokens the selector expands to.
    #[must_use]
    pub fn tokens(&self) -> Vec<&'a Token> {
        match self {
            Self::Token(token) => vec![*token],
            Self::Group(group) => group.tokens.iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCatalog {
    tokens: Vec<Token>,
    groups: Vec<TokenGroup>,
}

impl TokenCatalog {
    pub fn new(tokens: Vec<Token>, groups: Vec<TokenGroup>) -> Self {
        Self { tokens, groups }
    }

    /// Catalog shipped with the binary.
    #[must_use]
    pub fn builtin() -> Self {
        let tokens = token_list::builtin_tokens();
        let groups = token_groups::builtin_groups(&tokens);
        Self::new(tokens, groups)
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn groups(&self) -> &[TokenGroup] {
        &self.groups
    }

    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|token| token.id.as_deref() == Some(id))
    }

    #[must_use]
    pub fn find_group(&self, id: &str) -> Option<&TokenGroup> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// First catalog token deployed at `address` on `network`.
    #[must_use]
    pub fn find_by_address(&self, network: Network, address: &Address) -> Option<&Token> {
        self.tokens
            .iter()
            .find(|token| token.address(network) == Some(address))
    }

    /// The token representing the network's native asset (zero address).
    #[must_use]
    pub fn native_token(&self, network: Network) -> Option<&Token> {
        self.find_by_address(network, &Address::zero())
    }

    /// Resolves a token id or group id.
    ///
    /// Token ids take precedence over group ids.
    #[must_use]
    pub fn resolve_selector(&self, id: &str) -> Option<Selector<'_>> {
        self.find_by_id(id)
            .map(Selector::Token)
            .or_else(|| self.find_group(id).map(Selector::Group))
    }

    /// Catalog tokens, restricted to `network` when given.
    #[must_use]
    pub fn popular_tokens(&self, network: Option<Network>) -> Vec<Token> {
        self.tokens
            .iter()
            .filter(|token| network.is_none_or(|network| token.is_available_on(network)))
            .cloned()
            .collect()
    }

    /// Groups restricted to `network` when given. Groups left empty are omitted.
    #[must_use]
    pub fn groups_for(&self, network: Option<Network>) -> Vec<TokenGroup> {
        self.groups
            .iter()
            .map(|group| match network {
                Some(network) => group.filtered_for(network),
                None => group.clone(),
            })
            .filter(|group| !group.tokens.is_empty())
            .collect()
    }

    /// Case-insensitive substring search on name or symbol.
    #[must_use]
    pub fn search(&self, query: &str, network: Option<Network>) -> Vec<Token> {
        self.popular_tokens(network)
            .into_iter()
            .filter(|token| token.matches_query(query))
            .collect()
    }
}

impl Default for TokenCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_are_unique() {
        let catalog = TokenCatalog::builtin();
        let mut ids: Vec<_> = catalog
            .tokens()
            .iter()
            .filter_map(|t| t.id.clone())
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_native_tokens() {
        let catalog = TokenCatalog::builtin();
        assert_eq!(catalog.native_token(Network::Ethereum).unwrap().symbol, "ETH");
        assert_eq!(catalog.native_token(Network::Unichain).unwrap().symbol, "ETH");
        assert_eq!(catalog.native_token(Network::Bnb).unwrap().symbol, "BNB");
    }

    #[test]
    fn test_find_by_address_is_case_insensitive() {
        let catalog = TokenCatalog::builtin();
        let usdc = catalog
            .find_by_address(
                Network::Base,
                &Address::new("0x833589FCD6EDB6E08F4C7C32D4F71B54BDA02913"),
            )
            .unwrap();
        assert_eq!(usdc.symbol, "USDC");
    }

    #[test]
    fn test_popular_tokens_per_network() {
        let catalog = TokenCatalog::builtin();
        let scroll = catalog.popular_tokens(Some(Network::Scroll));
        assert!(scroll.iter().any(|t| t.symbol == "SCR"));
        assert!(scroll.iter().all(|t| t.is_available_on(Network::Scroll)));
        assert_eq!(catalog.popular_tokens(None).len(), catalog.tokens().len());
    }

    #[test]
    fn test_groups_follow_catalog_order_and_drop_empty() {
        let catalog = TokenCatalog::builtin();
        let stables = catalog.find_group("group-1").unwrap();
        let symbols: Vec<_> = stables.tokens.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["USDT", "USDC", "DAI"]);

        let sepolia = catalog.groups_for(Some(Network::Sepolia));
        assert!(sepolia.iter().all(|g| !g.tokens.is_empty()));
        assert!(sepolia.iter().all(|g| g.id != "group-2"));
    }

    #[test]
    fn test_resolve_selector() {
        let catalog = TokenCatalog::builtin();
        assert!(matches!(
            catalog.resolve_selector("4"),
            Some(Selector::Token(t)) if t.symbol == "USDC"
        ));
        let group = catalog.resolve_selector("group-2").unwrap();
        assert!(matches!(group, Selector::Group(_)));
        assert_eq!(group.tokens().len(), 5);
        assert!(catalog.resolve_selector("nope").is_none());
    }

    #[test]
    fn test_search() {
        let catalog = TokenCatalog::builtin();
        let hits = catalog.search("btc", None);
        assert!(hits.iter().any(|t| t.symbol == "WBTC"));
        assert!(hits.iter().any(|t| t.symbol == "cbBTC"));
        assert!(catalog.search("btc", Some(Network::Sepolia)).is_empty());
    }
}
