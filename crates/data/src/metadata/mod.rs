//! Token metadata collaborator.

mod alchemy;

pub use alchemy::AlchemyMetadataProvider;

use crate::error::TokenMetadataError;
use async_trait::async_trait;
use lp_yield_domain::prelude::{Address, Network, TokenDescriptor};
use rust_decimal::Decimal;

/// Resolves metadata for tokens the static catalog does not know.
#[async_trait]
pub trait TokenMetadataProvider: Send + Sync {
    async fn token_metadata(
        &self,
        network: Network,
        address: &Address,
    ) -> Result<TokenDescriptor, TokenMetadataError>;

    /// USD price of one token. Zero when the provider has no price for it.
    async fn token_price(
        &self,
        network: Network,
        address: &Address,
    ) -> Result<Decimal, TokenMetadataError>;
}
