use super::TokenMetadataProvider;
use crate::error::TokenMetadataError;
use async_trait::async_trait;
use lp_yield_domain::prelude::{Address, Network, TokenDescriptor};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::str::FromStr;
use tracing::debug;

const PRICES_API: &str = "https://api.g.alchemy.com/prices/v1";

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<TokenMetadataResult>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct TokenMetadataResult {
    name: Option<String>,
    symbol: Option<String>,
    decimals: Option<u8>,
    logo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PricesResponse {
    #[serde(default)]
    data: Vec<TokenPrices>,
}

#[derive(Debug, Deserialize)]
struct TokenPrices {
    #[serde(default)]
    prices: Vec<PriceQuote>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PriceQuote {
    currency: String,
    value: String,
}

/// Token metadata through the Alchemy `alchemy_getTokenMetadata` JSON-RPC
/// method, and USD prices through the Alchemy prices-by-address API.
#[derive(Debug, Clone)]
pub struct AlchemyMetadataProvider {
    http: Client,
    api_key: String,
}

impl AlchemyMetadataProvider {
    pub fn new(http: Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, network: Network) -> String {
        format!(
            "https://{}.g.alchemy.com/v2/{}",
            network.alchemy_slug(),
            self.api_key
        )
    }

    fn prices_endpoint(&self) -> String {
        format!("{PRICES_API}/{}/tokens/by-address", self.api_key)
    }
}

#[async_trait]
impl TokenMetadataProvider for AlchemyMetadataProvider {
    async fn token_metadata(
        &self,
        network: Network,
        address: &Address,
    ) -> Result<TokenDescriptor, TokenMetadataError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "alchemy_getTokenMetadata",
            "params": [address.as_str()],
        });
        let response: RpcResponse = self
            .http
            .post(self.endpoint(network))
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        debug!(network = %network, address = %address, "token metadata fetched");
        into_descriptor(address, response)
    }

    async fn token_price(
        &self,
        network: Network,
        address: &Address,
    ) -> Result<Decimal, TokenMetadataError> {
        let body = json!({
            "addresses": [{ "network": network.alchemy_slug(), "address": address.as_str() }],
        });
        let response: PricesResponse = self
            .http
            .post(self.prices_endpoint())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let price = into_usd_price(address, response)?;
        debug!(network = %network, address = %address, %price, "token price fetched");
        Ok(price)
    }
}

/// First USD quote of the first entry; zero when no quote was returned.
fn into_usd_price(
    address: &Address,
    response: PricesResponse,
) -> Result<Decimal, TokenMetadataError> {
    let Some(entry) = response.data.into_iter().next() else {
        return Ok(Decimal::ZERO);
    };
    if let Some(error) = entry.error {
        debug!(address = %address, error = %error, "no price available");
        return Ok(Decimal::ZERO);
    }
    let Some(quote) = entry
        .prices
        .into_iter()
        .find(|quote| quote.currency.eq_ignore_ascii_case("usd"))
    else {
        return Ok(Decimal::ZERO);
    };
    Decimal::from_str(quote.value.trim())
        .or_else(|_| Decimal::from_scientific(quote.value.trim()))
        .map_err(|_| TokenMetadataError::InvalidPrice {
            address: address.to_string(),
            value: quote.value,
        })
}

fn into_descriptor(
    address: &Address,
    response: RpcResponse,
) -> Result<TokenDescriptor, TokenMetadataError> {
    if let Some(error) = response.error {
        return Err(TokenMetadataError::Rpc {
            code: error.code,
            message: error.message,
        });
    }
    let result = response
        .result
        .ok_or_else(|| TokenMetadataError::NotFound(address.to_string()))?;
    if result.name.is_none() && result.symbol.is_none() && result.decimals.is_none() {
        return Err(TokenMetadataError::NotFound(address.to_string()));
    }

    Ok(TokenDescriptor {
        address: address.clone(),
        name: result.name.unwrap_or_default(),
        symbol: result.symbol.unwrap_or_default(),
        decimals: result.decimals.unwrap_or_default(),
        logo_url: result.logo.filter(|logo| !logo.is_empty()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(body: &str) -> RpcResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_metadata_result() {
        let address = Address::new("0x6B175474E89094C44Da98b954EedeAC495271d0F");
        let descriptor = into_descriptor(
            &address,
            parse(
                r#"{"jsonrpc":"2.0","id":1,
                "result":{"name":"Dai","symbol":"DAI","decimals":18,"logo":null}}"#,
            ),
        )
        .unwrap();
        assert_eq!(descriptor.symbol, "DAI");
        assert_eq!(descriptor.decimals, 18);
        assert_eq!(descriptor.address, address);
        assert!(descriptor.logo_url.is_none());
    }

    #[test]
    fn test_partial_metadata_defaults() {
        let descriptor = into_descriptor(
            &Address::new("0x01"),
            parse(r#"{"result":{"name":null,"symbol":"XYZ","decimals":null,"logo":""}}"#),
        )
        .unwrap();
        assert_eq!(descriptor.name, "");
        assert_eq!(descriptor.decimals, 0);
        assert!(descriptor.logo_url.is_none());
    }

    #[test]
    fn test_empty_result_is_not_found() {
        let result = into_descriptor(
            &Address::new("0x01"),
            parse(r#"{"result":{"name":null,"symbol":null,"decimals":null,"logo":null}}"#),
        );
        assert!(matches!(result, Err(TokenMetadataError::NotFound(_))));
    }

    #[test]
    fn test_rpc_error() {
        let result = into_descriptor(
            &Address::new("0x01"),
            parse(r#"{"error":{"code":-32602,"message":"invalid address"}}"#),
        );
        assert!(matches!(result, Err(TokenMetadataError::Rpc { code: -32602, .. })));
    }

    fn parse_prices(body: &str) -> PricesResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_usd_price_is_read_from_first_quote() {
        let body = r#"{"data":[{"network":"eth-mainnet","address":"0xc02a","prices":[
            {"currency":"usd","value":"3421.5512","lastUpdatedAt":"2025-01-01T00:00:00Z"}
        ],"error":null}]}"#;
        let price = into_usd_price(&Address::new("0xc02a"), parse_prices(body)).unwrap();
        assert_eq!(price, dec!(3421.5512));
    }

    #[test]
    fn test_missing_price_is_zero() {
        let address = Address::new("0x01");
        let empty = into_usd_price(&address, parse_prices(r#"{"data":[{"prices":[]}]}"#)).unwrap();
        assert_eq!(empty, Decimal::ZERO);
        let no_data = into_usd_price(&address, parse_prices(r#"{"data":[]}"#)).unwrap();
        assert_eq!(no_data, Decimal::ZERO);
        let errored = into_usd_price(
            &address,
            parse_prices(r#"{"data":[{"prices":[],"error":"Token not found"}]}"#),
        )
        .unwrap();
        assert_eq!(errored, Decimal::ZERO);
    }

    #[test]
    fn test_unparseable_price_is_an_error() {
        let result = into_usd_price(
            &Address::new("0x01"),
            parse_prices(r#"{"data":[{"prices":[{"currency":"usd","value":"n/a"}]}]}"#),
        );
        assert!(matches!(result, Err(TokenMetadataError::InvalidPrice { .. })));
    }

    #[test]
    fn test_prices_endpoint_carries_key() {
        let provider = AlchemyMetadataProvider::new(Client::new(), "key");
        assert_eq!(
            provider.prices_endpoint(),
            "https://api.g.alchemy.com/prices/v1/key/tokens/by-address"
        );
    }

    #[test]
    fn test_endpoint_uses_network_slug() {
        let provider = AlchemyMetadataProvider::new(Client::new(), "key");
        assert_eq!(
            provider.endpoint(Network::Base),
            "https://base-mainnet.g.alchemy.com/v2/key"
        );
    }
}
