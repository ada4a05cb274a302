use crate::address::Address;
use serde::Serialize;

/// An ordered `(token0, token1)` constraint submitted to the indexer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TokenPair {
    pub token0: Address,
    pub token1: Address,
}

impl TokenPair {
    pub fn new(token0: Address, token1: Address) -> Self {
        Self { token0, token1 }
    }

    /// The same pair with positions swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.token1.clone(), self.token0.clone())
    }
}
