use crate::error::SearchError;
use crate::normalizer::PoolNormalizer;
use lp_yield_domain::prelude::{Address, Network, Token, TokenCatalog, TokenGroup, is_evm_address};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

/// Tokens and groups offered for selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenList {
    pub popular_tokens: Vec<Token>,
    pub token_groups: Vec<TokenGroup>,
}

/// USD price of one token on one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPrice {
    pub address: Address,
    pub chain_id: Network,
    pub usd_price: Decimal,
}

/// Catalog browsing and token lookup.
#[derive(Clone)]
pub struct TokensService {
    normalizer: PoolNormalizer,
}

impl TokensService {
    pub fn new(normalizer: PoolNormalizer) -> Self {
        Self { normalizer }
    }

    fn catalog(&self) -> &TokenCatalog {
        self.normalizer.catalog()
    }

    /// Catalog tokens, restricted to `chain_id` when given.
    ///
    /// # Errors
    /// Returns [`SearchError::UnknownNetwork`] for an unsupported chain id.
    pub fn popular_tokens(&self, chain_id: Option<u64>) -> Result<Vec<Token>, SearchError> {
        let network = network_for(chain_id)?;
        Ok(self.catalog().popular_tokens(network))
    }

    /// Token groups, restricted to `chain_id` when given.
    ///
    /// # Errors
    /// Returns [`SearchError::UnknownNetwork`] for an unsupported chain id.
    pub fn token_groups(&self, chain_id: Option<u64>) -> Result<Vec<TokenGroup>, SearchError> {
        let network = network_for(chain_id)?;
        Ok(self.catalog().groups_for(network))
    }

    /// # Errors
    /// Returns [`SearchError::UnknownNetwork`] for an unsupported chain id.
    pub fn token_list(&self, chain_id: Option<u64>) -> Result<TokenList, SearchError> {
        Ok(TokenList {
            popular_tokens: self.popular_tokens(chain_id)?,
            token_groups: self.token_groups(chain_id)?,
        })
    }

    /// Finds tokens by name, symbol or address.
    ///
    /// Address queries look in the catalog first and then ask the metadata
    /// provider; an address nobody knows yields no hits.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidQuery`] for an empty query,
    /// [`SearchError::UnknownNetwork`] for an unsupported chain id and
    /// [`SearchError::ChainIdRequired`] for an address query without a chain.
    pub async fn search_tokens(
        &self,
        query: &str,
        chain_id: Option<u64>,
    ) -> Result<Vec<Token>, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::InvalidQuery("search query is empty".to_string()));
        }
        let network = network_for(chain_id)?;

        if !is_evm_address(query) {
            return Ok(self.catalog().search(query, network));
        }

        let network = network.ok_or(SearchError::ChainIdRequired)?;
        let address = Address::new(query);
        if let Some(token) = self.catalog().find_by_address(network, &address) {
            return Ok(vec![token.clone()]);
        }
        match self.normalizer.resolve_token(network, &address).await {
            Ok(descriptor) => Ok(vec![Token::from_descriptor(network, descriptor)]),
            Err(SearchError::TokenMetadataUnresolvable { .. }) => {
                debug!(network = %network, address = %address, "no token at address");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    /// USD price of the token at `address` on `chain_id`.
    ///
    /// The native asset has no price of its own at most providers, so a zero
    /// price for the zero address is retried with the network's wrapped-native
    /// token and that token's price is returned.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidQuery`] for a malformed address,
    /// [`SearchError::UnknownNetwork`] for an unsupported chain id and
    /// [`SearchError::TokenPriceUnavailable`] when no provider can answer.
    pub async fn token_price(
        &self,
        address: &str,
        chain_id: u64,
    ) -> Result<TokenPrice, SearchError> {
        let address = Address::parse(address)?;
        let network = Network::from_chain_id(chain_id)?;

        let price = self.fetch_price(network, address).await?;
        if !price.usd_price.is_zero() || !price.address.is_zero() {
            return Ok(price);
        }
        debug!(network = %network, "native asset unpriced, using wrapped-native price");
        let wrapped = network.wrapped_native_address();
        self.fetch_price(network, wrapped).await
    }

    async fn fetch_price(
        &self,
        network: Network,
        address: Address,
    ) -> Result<TokenPrice, SearchError> {
        let unavailable = |reason: String| SearchError::TokenPriceUnavailable {
            network,
            address: address.to_string(),
            reason,
        };
        let provider = self
            .normalizer
            .metadata()
            .ok_or_else(|| unavailable("no price provider configured".to_string()))?;
        let usd_price = provider
            .token_price(network, &address)
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        info!(network = %network, address = %address, %usd_price, "token priced");
        Ok(TokenPrice {
            address,
            chain_id: network,
            usd_price,
        })
    }
}

fn network_for(chain_id: Option<u64>) -> Result<Option<Network>, SearchError> {
    chain_id
        .map(Network::from_chain_id)
        .transpose()
        .map_err(SearchError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::tests::{MockMetadata, UNKNOWN, USDC_ETH, WETH_ETH, normalizer};
    use lp_yield_data::metadata::TokenMetadataProvider;
    use lp_yield_domain::prelude::ZERO_ADDRESS;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    fn service() -> (TokensService, Arc<MockMetadata>) {
        let metadata = Arc::new(MockMetadata::default());
        let provider = metadata.clone() as Arc<dyn TokenMetadataProvider>;
        let service = TokensService::new(normalizer(Some(provider)));
        (service, metadata)
    }

    #[test]
    fn test_popular_tokens_filtered_by_chain() {
        let (service, _) = service();
        let all = service.popular_tokens(None).unwrap();
        let scroll = service.popular_tokens(Some(534_352)).unwrap();
        assert!(scroll.len() < all.len());
        assert!(scroll.iter().all(|t| t.is_available_on(Network::Scroll)));
        assert!(matches!(
            service.popular_tokens(Some(42)),
            Err(SearchError::UnknownNetwork(42))
        ));
    }

    #[test]
    fn test_token_list_serializes_both_sections() {
        let (service, _) = service();
        let list = service.token_list(Some(1)).unwrap();
        assert!(!list.token_groups.is_empty());
        let json = serde_json::to_value(&list).unwrap();
        assert!(json["popularTokens"].is_array());
        assert!(json["tokenGroups"].is_array());
    }

    #[tokio::test]
    async fn test_search_validation_order() {
        let (service, _) = service();
        assert!(matches!(
            service.search_tokens("  ", Some(1)).await,
            Err(SearchError::InvalidQuery(_))
        ));
        assert!(matches!(
            service.search_tokens("usdc", Some(42)).await,
            Err(SearchError::UnknownNetwork(42))
        ));
        assert!(matches!(
            service.search_tokens(USDC_ETH, None).await,
            Err(SearchError::ChainIdRequired)
        ));
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let (service, metadata) = service();
        let hits = service.search_tokens("btc", Some(1)).await.unwrap();
        assert!(hits.iter().any(|t| t.symbol == "WBTC"));
        assert!(hits.iter().all(|t| t.matches_query("btc")));
        assert_eq!(metadata.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_by_address_prefers_catalog() {
        let (service, metadata) = service();
        let hits = service.search_tokens(USDC_ETH, Some(1)).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_deref(), Some("4"));
        assert_eq!(metadata.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_search_by_address_falls_back_to_provider() {
        let (service, _) = service();
        let hits = service.search_tokens(UNKNOWN, Some(1)).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].symbol, "MYS");
        assert_eq!(hits[0].id, None);
        assert_eq!(hits[0].decimals_on(Network::Ethereum), Some(9));

        let none = service
            .search_tokens("0x2222222222222222222222222222222222222222", Some(1))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_token_price() {
        let (service, metadata) = service();
        let price = service.token_price(USDC_ETH, 1).await.unwrap();
        assert_eq!(price.usd_price, dec!(0.9998));
        assert_eq!(price.address.as_str(), USDC_ETH);
        assert_eq!(price.chain_id, Network::Ethereum);
        assert_eq!(metadata.priced.lock().unwrap().len(), 1);

        let json = serde_json::to_value(&price).unwrap();
        assert_eq!(json["chainId"], 1);
        assert!(json.get("usdPrice").is_some());
    }

    #[tokio::test]
    async fn test_zero_address_price_falls_back_to_wrapped_native() {
        let (service, metadata) = service();
        let price = service.token_price(ZERO_ADDRESS, 1).await.unwrap();
        assert_eq!(price.address.as_str(), WETH_ETH);
        assert_eq!(price.usd_price, dec!(3250.75));
        assert_eq!(
            *metadata.priced.lock().unwrap(),
            vec![Address::zero(), Address::new(WETH_ETH)]
        );
    }

    #[tokio::test]
    async fn test_unpriced_token_is_not_retried() {
        let (service, metadata) = service();
        let price = service.token_price(UNKNOWN, 1).await.unwrap();
        assert!(price.usd_price.is_zero());
        assert_eq!(price.address.as_str(), UNKNOWN);
        assert_eq!(metadata.priced.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_token_price_validation() {
        let (service, metadata) = service();
        assert!(matches!(
            service.token_price("invalid_address", 11_155_111).await,
            Err(SearchError::InvalidQuery(_))
        ));
        assert!(matches!(
            service.token_price(USDC_ETH, 99_999_999).await,
            Err(SearchError::UnknownNetwork(99_999_999))
        ));
        assert!(metadata.priced.lock().unwrap().is_empty());

        let offline = TokensService::new(normalizer(None));
        assert!(matches!(
            offline.token_price(USDC_ETH, 1).await,
            Err(SearchError::TokenPriceUnavailable { .. })
        ));
    }
}
