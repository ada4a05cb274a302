//! Normalized pool entities.
//!
//! [`Pool`] is a sum type over the two supported pool families. Fields shared by
//! both live in [`PoolCommon`]; the variant structs carry the rest.

use crate::address::Address;
use crate::entities::protocol::Protocol;
use crate::entities::token::TokenDescriptor;
use crate::enums::PoolType;
use crate::metrics::yields::PoolYields;
use crate::network::Network;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Fields present on every pool regardless of type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolCommon {
    pub chain_id: Network,
    pub pool_address: Address,
    pub protocol: Protocol,
    pub token0: TokenDescriptor,
    pub token1: TokenDescriptor,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_value_locked_usd: Decimal,
    /// Fee tier in hundredths of a basis point.
    pub fee_tier: u32,
    pub position_manager_address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit2_address: Option<Address>,
    #[serde(flatten)]
    pub yields: PoolYields,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct V3Pool {
    #[serde(flatten)]
    pub common: PoolCommon,
    pub tick_spacing: i32,
    pub latest_tick: i32,
    #[serde(serialize_with = "serialize_sqrt_price")]
    pub latest_sqrt_price_x96: Option<U256>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployer_address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct V4Pool {
    #[serde(flatten)]
    pub common: PoolCommon,
    pub tick_spacing: i32,
    pub latest_tick: i32,
    #[serde(serialize_with = "serialize_sqrt_price")]
    pub latest_sqrt_price_x96: Option<U256>,
    pub hooks_address: Address,
    pub pool_manager_address: Address,
    pub state_view_address: Address,
}

/// A normalized pool, tagged by `poolType` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "poolType")]
pub enum Pool {
    V3(V3Pool),
    V4(V4Pool),
}

impl Pool {
    #[must_use]
    pub fn common(&self) -> &PoolCommon {
        match self {
            Self::V3(pool) => &pool.common,
            Self::V4(pool) => &pool.common,
        }
    }

    #[must_use]
    pub fn pool_type(&self) -> PoolType {
        match self {
            Self::V3(_) => PoolType::V3,
            Self::V4(_) => PoolType::V4,
        }
    }

    #[must_use]
    pub fn network(&self) -> Network {
        self.common().chain_id
    }

    #[must_use]
    pub fn address(&self) -> &Address {
        &self.common().pool_address
    }

    #[must_use]
    pub fn yields(&self) -> &PoolYields {
        &self.common().yields
    }

    #[must_use]
    pub fn total_value_locked_usd(&self) -> Decimal {
        self.common().total_value_locked_usd
    }

    #[must_use]
    pub fn tick_spacing(&self) -> i32 {
        match self {
            Self::V3(pool) => pool.tick_spacing,
            Self::V4(pool) => pool.tick_spacing,
        }
    }
}

// Emitted as a decimal string; the value does not fit in a JSON number.
fn serialize_sqrt_price<S: Serializer>(
    value: &Option<U256>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(price) => serializer.serialize_str(&price.to_string()),
        None => serializer.serialize_none(),
    }
}
