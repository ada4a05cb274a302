//! Prelude module for convenient imports.
//!
//! ```rust
//! use lp_yield_engine::prelude::*;
//! ```

// Orchestration
pub use crate::aggregator::{AggregatedPools, CrossChainAggregator, NetworkSearch, plan_cross_chain};
pub use crate::dispatcher::{NetworkResult, QueryDispatcher};
pub use crate::filter_builder::build_token_pairs;
pub use crate::normalizer::{NormalizedPools, PoolNormalizer, RequestedTokens};

// Configuration and errors
pub use crate::config::SearchConfig;
pub use crate::error::{NormalizeError, SearchError};

// Ranking
pub use crate::ranking::{
    MaximizeTvl, MaximizeYield, RankingObjective, YieldRankings, best_yields_by_timeframe, rank_by,
    rank_pools, yield_for,
};

// Services
pub use crate::services::{
    MatchedPools, PoolsService, ProtocolsService, TokenList, TokenPrice, TokensService,
};
