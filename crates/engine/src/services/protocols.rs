use crate::dispatcher::QueryDispatcher;
use crate::error::SearchError;
use futures::future::join_all;
use lp_yield_data::error::IndexerError;
use lp_yield_domain::prelude::{Network, Protocol};
use std::collections::HashSet;
use tracing::{info, warn};

/// Lists the DEX protocols indexed on the supported networks.
#[derive(Clone)]
pub struct ProtocolsService {
    dispatcher: QueryDispatcher,
}

impl ProtocolsService {
    pub fn new(dispatcher: QueryDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Union of the protocols of every mainnet, or every testnet in testnet
    /// mode, deduplicated by id in registry order.
    ///
    /// # Errors
    /// Returns [`SearchError::AllNetworksFailed`] when no network answered.
    pub async fn supported_protocols(
        &self,
        testnet_mode: bool,
    ) -> Result<Vec<Protocol>, SearchError> {
        let networks: Vec<Network> = Network::list()
            .iter()
            .copied()
            .filter(|network| network.is_testnet() == testnet_mode)
            .collect();

        let lookups = networks.iter().map(|network| async move {
            let result = match self.dispatcher.indexer(*network) {
                Some(indexer) => indexer.protocols().await,
                None => Err(IndexerError::NotConfigured(network.to_string())),
            };
            (*network, result)
        });

        let mut failures = Vec::new();
        let mut seen = HashSet::new();
        let mut protocols = Vec::new();
        for (network, result) in join_all(lookups).await {
            match result {
                Ok(listed) => {
                    protocols.extend(listed.into_iter().filter(|p| seen.insert(p.id.clone())));
                }
                Err(e) => {
                    warn!(network = %network, error = %e, "protocol listing failed");
                    failures.push((network, e.to_string()));
                }
            }
        }

        if !networks.is_empty() && failures.len() == networks.len() {
            return Err(SearchError::AllNetworksFailed { failures });
        }
        info!(protocols = protocols.len(), testnet_mode, "protocols listed");
        Ok(protocols)
    }
}
