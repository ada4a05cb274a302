//! Prelude module for convenient imports.
//!
//! ```rust
//! use lp_yield_domain::prelude::*;
//! ```

pub use crate::address::{Address, ZERO_ADDRESS, is_evm_address, is_pool_id};
pub use crate::catalog::{Selector, TokenCatalog};
pub use crate::entities::{
    Pool, PoolCommon, Protocol, Token, TokenDescriptor, TokenGroup, V3Pool, V4Pool,
};
pub use crate::enums::{PoolType, YieldTimeframe};
pub use crate::error::DomainError;
pub use crate::metrics::{PoolYields, YieldCalculator, YieldPolicy, YieldWindow};
pub use crate::network::{Network, NetworkMap, display_address};
pub use crate::value_objects::{PoolSearchFilters, TimeSeriesSample, TokenPair, parse_usd};
