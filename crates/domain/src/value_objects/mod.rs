pub mod filters;
pub mod time_series;
pub mod token_pair;

pub use filters::PoolSearchFilters;
pub use time_series::{TimeSeriesSample, parse_usd};
pub use token_pair::TokenPair;
