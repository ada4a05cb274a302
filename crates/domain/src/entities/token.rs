use crate::address::Address;
use crate::network::{Network, NetworkMap};
use serde::{Deserialize, Serialize};

/// A token known to the catalog, possibly deployed on several networks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub symbol: String,
    pub decimals: NetworkMap<Option<u8>>,
    pub addresses: NetworkMap<Option<Address>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl Token {
    /// Creates a token with the same decimals on every network it is deployed on.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        addresses: impl IntoIterator<Item = (Network, Address)>,
    ) -> Self {
        let addresses = NetworkMap::sparse(addresses);
        let decimals = addresses.map(|_, address| address.as_ref().map(|_| decimals));
        Self {
            id: Some(id.into()),
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            addresses,
            logo_url: None,
        }
    }

    /// Single-network token built from resolved metadata. It carries no catalog id.
    pub fn from_descriptor(network: Network, descriptor: TokenDescriptor) -> Self {
        Self {
            id: None,
            name: descriptor.name,
            symbol: descriptor.symbol,
            decimals: NetworkMap::sparse([(network, descriptor.decimals)]),
            addresses: NetworkMap::sparse([(network, descriptor.address)]),
            logo_url: descriptor.logo_url,
        }
    }

    /// Sets the logo.
    #[must_use]
    pub fn with_logo(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }

    /// Overrides the decimals on a single network.
    #[must_use]
    pub fn with_decimals_on(mut self, network: Network, decimals: u8) -> Self {
        self.decimals.set(network, Some(decimals));
        self
    }

    /// Address on `network`, if the token exists there.
    #[must_use]
    pub fn address(&self, network: Network) -> Option<&Address> {
        self.addresses.value(network)
    }

    /// Decimals on `network`, if the token exists there.
    #[must_use]
    pub fn decimals_on(&self, network: Network) -> Option<u8> {
        self.decimals.value(network).copied()
    }

    /// Whether the token is deployed on `network`.
    #[must_use]
    pub fn is_available_on(&self, network: Network) -> bool {
        self.address(network).is_some()
    }

    /// Case-insensitive substring match on name or symbol.
    #[must_use]
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.symbol.to_lowercase().contains(&query)
    }

    /// Single-network view of the token.
    #[must_use]
    pub fn descriptor(&self, network: Network) -> Option<TokenDescriptor> {
        let address = self.address(network)?.clone();
        Some(TokenDescriptor {
            address,
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            decimals: self.decimals_on(network).unwrap_or_default(),
            logo_url: self.logo_url.clone(),
        })
    }
}

/// Token metadata on a single network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenDescriptor {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

impl TokenDescriptor {
    /// Returns the same metadata displayed under another address.
    #[must_use]
    pub fn at_address(mut self, address: Address) -> Self {
        self.address = address;
        self
    }
}

/// A curated, named bundle of tokens used as a single search selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenGroup {
    pub id: String,
    pub name: String,
    pub tokens: Vec<Token>,
}

impl TokenGroup {
    /// Copy of the group restricted to tokens deployed on `network`.
    #[must_use]
    pub fn filtered_for(&self, network: Network) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            tokens: self
                .tokens
                .iter()
                .filter(|token| token.is_available_on(network))
                .cloned()
                .collect(),
        }
    }
}
