//! Network registry.
//!
//! The set of supported networks is fixed at compile time. Per-network data is
//! stored in a [`NetworkMap`], which always holds an explicit entry for every
//! registered network.

use crate::address::Address;
use crate::enums::PoolType;
use crate::error::DomainError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A supported EVM network, identified by its chain id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub enum Network {
    /// Ethereum mainnet.
    Ethereum,
    /// Scroll mainnet.
    Scroll,
    /// Ethereum Sepolia testnet.
    Sepolia,
    /// Base mainnet.
    Base,
    /// Unichain mainnet.
    Unichain,
    /// BNB Smart Chain.
    Bnb,
}

impl Network {
    /// Number of registered networks.
    pub const COUNT: usize = 6;

    /// All registered networks, in registry iteration order.
    pub const ALL: [Network; Network::COUNT] = [
        Network::Ethereum,
        Network::Scroll,
        Network::Sepolia,
        Network::Base,
        Network::Unichain,
        Network::Bnb,
    ];

    /// Lists the registered networks in registry order.
    #[must_use]
    pub fn list() -> &'static [Network] {
        &Self::ALL
    }

    /// Looks a network up by chain id.
    ///
    /// # Errors
    /// Returns [`DomainError::UnknownNetwork`] when the chain id is not registered.
    pub fn from_chain_id(chain_id: u64) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|network| network.chain_id() == chain_id)
            .ok_or(DomainError::UnknownNetwork(chain_id))
    }

    /// Whether the chain id belongs to a registered network.
    #[must_use]
    pub fn is_valid_chain_id(chain_id: u64) -> bool {
        Self::from_chain_id(chain_id).is_ok()
    }

    /// EIP-155 chain id.
    #[must_use]
    pub fn chain_id(self) -> u64 {
        match self {
            Self::Ethereum => 1,
            Self::Scroll => 534_352,
            Self::Sepolia => 11_155_111,
            Self::Base => 8453,
            Self::Unichain => 130,
            Self::Bnb => 56,
        }
    }

    /// Whether the network is a testnet.
    #[must_use]
    pub fn is_testnet(self) -> bool {
        matches!(self, Self::Sepolia)
    }

    /// Address of the wrapped form of the network's native asset.
    #[must_use]
    pub fn wrapped_native_address(self) -> Address {
        Address::new(match self {
            Self::Ethereum => "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
            Self::Scroll => "0x5300000000000000000000000000000000000004",
            Self::Sepolia => "0xfff9976782d46cc05630d1f6ebab18b2324d6b14",
            Self::Base | Self::Unichain => "0x4200000000000000000000000000000000000006",
            Self::Bnb => "0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c",
        })
    }

    /// Whether `address` is the wrapped-native address of this network.
    #[must_use]
    pub fn is_wrapped_native(self, address: &Address) -> bool {
        *address == self.wrapped_native_address()
    }

    /// Human readable name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Ethereum => "Ethereum",
            Self::Scroll => "Scroll",
            Self::Sepolia => "Sepolia",
            Self::Base => "Base",
            Self::Unichain => "Unichain",
            Self::Bnb => "BNB Chain",
        }
    }

    /// Slug used by the subgraph deployment for this network.
    #[must_use]
    pub fn subgraph_slug(self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Scroll => "scroll",
            Self::Sepolia => "sepolia",
            Self::Base => "base",
            Self::Unichain => "unichain",
            Self::Bnb => "bnb",
        }
    }

    /// Network slug used by the Alchemy RPC gateway.
    #[must_use]
    pub fn alchemy_slug(self) -> &'static str {
        match self {
            Self::Ethereum => "eth-mainnet",
            Self::Scroll => "scroll-mainnet",
            Self::Sepolia => "eth-sepolia",
            Self::Base => "base-mainnet",
            Self::Unichain => "unichain-mainnet",
            Self::Bnb => "bnb-mainnet",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Ethereum => 0,
            Self::Scroll => 1,
            Self::Sepolia => 2,
            Self::Base => 3,
            Self::Unichain => 4,
            Self::Bnb => 5,
        }
    }
}

impl TryFrom<u64> for Network {
    type Error = DomainError;

    fn try_from(chain_id: u64) -> Result<Self, Self::Error> {
        Self::from_chain_id(chain_id)
    }
}

impl From<Network> for u64 {
    fn from(network: Network) -> Self {
        network.chain_id()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Address to show for a pool token.
///
/// V3 pools only ever hold the wrapped native asset, so it is shown as the
/// native (zero) address. V4 pools can hold either, so their addresses are kept.
#[must_use]
pub fn display_address(address: &Address, network: Network, pool_type: PoolType) -> Address {
    match pool_type {
        PoolType::V3 if network.is_wrapped_native(address) => Address::zero(),
        _ => address.clone(),
    }
}

/// A value for every registered network.
///
/// Lookups cannot miss: construction requires an entry per network, so
/// "absent on this network" has to be spelled out (typically as `None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkMap<T> {
    entries: [T; Network::COUNT],
}

impl<T> NetworkMap<T> {
    /// Builds a map by evaluating `f` for every registered network.
    pub fn from_fn(mut f: impl FnMut(Network) -> T) -> Self {
        Self {
            entries: std::array::from_fn(|index| f(Network::ALL[index])),
        }
    }

    /// Returns the entry for `network`.
    #[must_use]
    pub fn get(&self, network: Network) -> &T {
        &self.entries[network.index()]
    }

    /// Replaces the entry for `network`.
    pub fn set(&mut self, network: Network, value: T) {
        self.entries[network.index()] = value;
    }

    /// Iterates entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (Network, &T)> {
        Network::ALL.into_iter().zip(self.entries.iter())
    }

    /// Maps every entry into a new map.
    pub fn map<U>(&self, mut f: impl FnMut(Network, &T) -> U) -> NetworkMap<U> {
        NetworkMap::from_fn(|network| f(network, self.get(network)))
    }
}

impl<T> NetworkMap<Option<T>> {
    /// Builds a map where listed networks hold `Some(value)` and the rest `None`.
    pub fn sparse(values: impl IntoIterator<Item = (Network, T)>) -> Self {
        let mut map = Self::from_fn(|_| None);
        for (network, value) in values {
            map.set(network, Some(value));
        }
        map
    }

    /// Returns the entry for `network` when present.
    #[must_use]
    pub fn value(&self, network: Network) -> Option<&T> {
        self.get(network).as_ref()
    }

    /// Networks holding a value, in registry order.
    pub fn present_networks(&self) -> impl Iterator<Item = Network> {
        self.iter()
            .filter(|(_, value)| value.is_some())
            .map(|(network, _)| network)
    }
}

impl<T: Default> Default for NetworkMap<T> {
    fn default() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T: Serialize> Serialize for NetworkMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Network::COUNT))?;
        for (network, value) in self.iter() {
            map.serialize_entry(&network.chain_id().to_string(), value)?;
        }
        map.end()
    }
}
