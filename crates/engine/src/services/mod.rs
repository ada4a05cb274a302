//! Request-level entry points used by the CLI.

pub mod pools;
pub mod protocols;
pub mod tokens;

pub use pools::{MatchedPools, PoolsService};
pub use protocols::ProtocolsService;
pub use tokens::{TokenList, TokenPrice, TokensService};
