//! Endpoint and credential configuration.
//!
//! Values come from the process environment (optionally seeded from `.env`).
//! Lookups go through a closure so tests can supply their own variables.

use crate::error::ConfigError;
use crate::graphql::GraphQlClient;
use crate::indexer::{PoolIndexer, SubgraphIndexer};
use crate::metadata::{AlchemyMetadataProvider, TokenMetadataProvider};
use lp_yield_domain::prelude::{Network, NetworkMap};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const GRAPHQL_API_KEY: &str = "GRAPHQL_API_KEY";
pub const SUBGRAPH_URL_TEMPLATE: &str = "SUBGRAPH_URL_TEMPLATE";
pub const ALCHEMY_API_KEY: &str = "ALCHEMY_API_KEY";

/// Default hosted subgraph location.
pub const DEFAULT_SUBGRAPH_URL_TEMPLATE: &str = concat!(
    "https://subgraph.satsuma-prod.com/{api_key}/zup-protocol-team--156415",
    "/zup-dexs-{network}/version/2.1.23/api"
);

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Where each network's indexer lives and how to authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerConfig {
    pub api_key: Option<String>,
    /// URL with `{api_key}` and `{network}` placeholders.
    pub url_template: String,
    /// Full URLs that replace the template for single networks.
    pub overrides: NetworkMap<Option<String>>,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url_template: DEFAULT_SUBGRAPH_URL_TEMPLATE.to_string(),
            overrides: NetworkMap::default(),
        }
    }
}

impl IndexerConfig {
    /// Reads `GRAPHQL_API_KEY`, `SUBGRAPH_URL_TEMPLATE` and `SUBGRAPH_URL_<NETWORK>`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        Self {
            api_key: non_empty(GRAPHQL_API_KEY),
            url_template: non_empty(SUBGRAPH_URL_TEMPLATE)
                .unwrap_or_else(|| DEFAULT_SUBGRAPH_URL_TEMPLATE.to_string()),
            overrides: NetworkMap::from_fn(|network| non_empty(&override_var(network))),
        }
    }

    /// Endpoint URL for `network`.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingVar`] when the template needs an API key
    /// that is not configured, or [`ConfigError::UnresolvedTemplate`] when
    /// placeholders remain after substitution.
    pub fn endpoint(&self, network: Network) -> Result<String, ConfigError> {
        if let Some(url) = self.overrides.value(network) {
            return Ok(url.clone());
        }

        let mut url = self
            .url_template
            .replace("{network}", network.subgraph_slug());
        if url.contains("{api_key}") {
            let key = self
                .api_key
                .as_deref()
                .ok_or(ConfigError::MissingVar(GRAPHQL_API_KEY))?;
            url = url.replace("{api_key}", key);
        }
        if url.contains('{') {
            return Err(ConfigError::UnresolvedTemplate {
                network: network.name().to_string(),
                url,
            });
        }
        Ok(url)
    }

    /// Builds an indexer for every network whose endpoint resolves, sharing `http`.
    ///
    /// Networks whose endpoint cannot be resolved are left empty and logged.
    ///
    /// # Errors
    /// Fails with the first resolution error when no network could be configured.
    pub fn build_indexers(
        &self,
        http: &Client,
    ) -> Result<NetworkMap<Option<Arc<dyn PoolIndexer>>>, ConfigError> {
        let endpoints = NetworkMap::from_fn(|network| self.endpoint(network));
        let indexers = endpoints.map(|network, endpoint| match endpoint {
            Ok(url) => {
                let client = GraphQlClient::new(http.clone(), url.clone(), self.api_key.clone());
                Some(Arc::new(SubgraphIndexer::new(network, client)) as Arc<dyn PoolIndexer>)
            }
            Err(e) => {
                warn!(network = %network, error = %e, "indexer not configured");
                None
            }
        });

        let configured = indexers.present_networks().count();
        if configured == 0 {
            if let Some((_, Err(e))) = endpoints.iter().find(|(_, endpoint)| endpoint.is_err()) {
                return Err(e.clone());
            }
        }
        info!(networks = configured, "pool indexers configured");
        Ok(indexers)
    }
}

/// Credentials for the token metadata provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataConfig {
    pub alchemy_api_key: Option<String>,
}

impl MetadataConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            alchemy_api_key: lookup(ALCHEMY_API_KEY).filter(|value| !value.trim().is_empty()),
        }
    }

    /// Provider for addresses missing from the catalog, if a key is configured.
    #[must_use]
    pub fn build_provider(&self, http: &Client) -> Option<Arc<dyn TokenMetadataProvider>> {
        self.alchemy_api_key.as_ref().map(|key| {
            Arc::new(AlchemyMetadataProvider::new(http.clone(), key.clone()))
                as Arc<dyn TokenMetadataProvider>
        })
    }
}

/// Shared HTTP client for all collaborators.
///
/// # Errors
/// Returns [`ConfigError::HttpClient`] if the TLS backend cannot be initialised.
pub fn http_client() -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// `SUBGRAPH_URL_ETHEREUM`, `SUBGRAPH_URL_BNB`, ...
#[must_use]
pub fn override_var(network: Network) -> String {
    format!("SUBGRAPH_URL_{}", network.subgraph_slug().to_uppercase())
}
