//! Command Line Interface for cross-chain liquidity pool search.
mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dotenv::dotenv;
use lp_yield_data::prelude::{IndexerConfig, MetadataConfig, http_client};
use lp_yield_domain::prelude::{Network, PoolSearchFilters, PoolType, TokenCatalog, YieldTimeframe};
use lp_yield_engine::prelude::{
    CrossChainAggregator, MatchedPools, PoolNormalizer, PoolsService, ProtocolsService,
    QueryDispatcher, SearchConfig, TokensService, rank_pools,
};
use reqwest::Client;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lp-yield")]
#[command(
    about = "Search V3/V4 liquidity pools across networks and rank them by fee yield",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported networks
    Networks,
    /// Browse and search the token catalog
    Tokens {
        #[command(subcommand)]
        command: TokensCommand,
    },
    /// Search liquidity pools
    Pools {
        #[command(subcommand)]
        command: PoolsCommand,
    },
    /// List indexed DEX protocols
    Protocols {
        /// List testnet protocols instead of mainnet ones
        #[arg(long)]
        testnet: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum TokensCommand {
    /// Catalog tokens
    Popular {
        /// Restrict to one network
        #[arg(long)]
        chain_id: Option<u64>,

        #[arg(long)]
        json: bool,
    },
    /// Curated token groups
    Groups {
        /// Restrict to one network
        #[arg(long)]
        chain_id: Option<u64>,

        #[arg(long)]
        json: bool,
    },
    /// Search by name, symbol or address
    Search {
        /// Name or symbol fragment, or a token address
        query: String,

        /// Network to search on; required for address queries
        #[arg(long)]
        chain_id: Option<u64>,

        #[arg(long)]
        json: bool,
    },
    /// USD price of a token
    Price {
        /// Token address; the zero address prices the native asset
        address: String,

        /// Chain id of the network (e.g. 1, 8453)
        #[arg(long)]
        chain_id: u64,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PoolsCommand {
    /// Search one network by token address
    Search {
        /// Chain id of the network (e.g. 1, 8453)
        #[arg(long)]
        chain_id: u64,

        /// Token0 addresses; the zero address stands for the native asset
        #[arg(long, num_args = 1.., required = true)]
        token0: Vec<String>,

        /// Token1 addresses
        #[arg(long, num_args = 1.., required = true)]
        token1: Vec<String>,

        #[command(flatten)]
        options: PoolOptions,
    },
    /// Search every network by catalog token or group id
    SearchAll {
        /// Token0 ids (e.g. 1 for ETH, group-1 for USD stablecoins)
        #[arg(long = "token0-id", num_args = 1.., required = true)]
        token0_ids: Vec<String>,

        /// Token1 ids
        #[arg(long = "token1-id", num_args = 1.., required = true)]
        token1_ids: Vec<String>,

        #[command(flatten)]
        options: PoolOptions,
    },
    /// Show one pool and its yields
    Show {
        /// Pool address, or pool id for V4 pools
        pool_id: String,

        /// Chain id of the network (e.g. 1, 8453)
        #[arg(long)]
        chain_id: u64,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct PoolOptions {
    /// Minimum pool TVL in USD
    #[arg(long, default_value_t = Decimal::ZERO)]
    min_tvl: Decimal,

    /// Search testnets instead of mainnets
    #[arg(long)]
    testnet: bool,

    /// Pool types to include (V3, V4); all when omitted
    #[arg(long = "pool-type")]
    pool_types: Vec<PoolType>,

    /// Protocol ids to exclude
    #[arg(long = "block-protocol")]
    blocked_protocols: Vec<String>,

    /// Sort by yield over 24h, 7d, 30d or 90d
    #[arg(long)]
    sort: Option<YieldTimeframe>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl PoolOptions {
    fn filters(&self) -> PoolSearchFilters {
        let filters = PoolSearchFilters::default()
            .with_min_tvl_usd(self.min_tvl)
            .with_testnet_mode(self.testnet)
            .with_blocked_protocols(self.blocked_protocols.iter().cloned());
        if self.pool_types.is_empty() {
            filters
        } else {
            filters.with_pool_types(self.pool_types.iter().copied())
        }
    }
}

/// Services wired from the environment.
struct App {
    pools: PoolsService,
    protocols: ProtocolsService,
}

impl App {
    fn normalizer(http: &Client, config: &SearchConfig) -> PoolNormalizer {
        let metadata = MetadataConfig::from_env().build_provider(http);
        let catalog = Arc::new(TokenCatalog::builtin());
        PoolNormalizer::new(catalog, metadata, config.yield_policy)
    }

    /// Catalog and metadata only; no indexer credentials needed.
    fn tokens_only() -> Result<TokensService> {
        let http = http_client().context("building HTTP client")?;
        Ok(TokensService::new(Self::normalizer(&http, &SearchConfig::default())))
    }

    fn from_env() -> Result<Self> {
        let http = http_client().context("building HTTP client")?;
        let config = SearchConfig::default();
        let indexers = IndexerConfig::from_env()
            .build_indexers(&http)
            .context("configuring pool indexers")?;
        let dispatcher = QueryDispatcher::new(indexers, config.clone());
        let normalizer = Self::normalizer(&http, &config);

        Ok(Self {
            pools: PoolsService::new(CrossChainAggregator::new(dispatcher.clone(), normalizer)),
            protocols: ProtocolsService::new(dispatcher),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Networks => output::print_networks(),
        Commands::Tokens { command } => run_tokens(command).await?,
        Commands::Pools { command } => run_pools(command).await?,
        Commands::Protocols { testnet, json } => {
            let app = App::from_env()?;
            let protocols = app.protocols.supported_protocols(testnet).await?;
            if json {
                output::print_json(&protocols)?;
            } else {
                output::print_protocols(&protocols);
            }
        }
    }

    Ok(())
}

async fn run_tokens(command: TokensCommand) -> Result<()> {
    let tokens = App::tokens_only()?;
    match command {
        TokensCommand::Popular { chain_id, json } => {
            let list = tokens.popular_tokens(chain_id)?;
            if json {
                output::print_json(&list)?;
            } else {
                output::print_tokens(&list, network_of(chain_id)?);
            }
        }
        TokensCommand::Groups { chain_id, json } => {
            let groups = tokens.token_groups(chain_id)?;
            if json {
                output::print_json(&groups)?;
            } else {
                output::print_groups(&groups);
            }
        }
        TokensCommand::Search {
            query,
            chain_id,
            json,
        } => {
            let hits = tokens.search_tokens(&query, chain_id).await?;
            if json {
                output::print_json(&hits)?;
            } else {
                output::print_tokens(&hits, network_of(chain_id)?);
            }
        }
        TokensCommand::Price {
            address,
            chain_id,
            json,
        } => {
            let price = tokens.token_price(&address, chain_id).await?;
            if json {
                output::print_json(&price)?;
            } else {
                output::print_price(&price);
            }
        }
    }
    Ok(())
}

async fn run_pools(command: PoolsCommand) -> Result<()> {
    let app = App::from_env()?;
    let (matched, options) = match command {
        PoolsCommand::Search {
            chain_id,
            token0,
            token1,
            options,
        } => {
            let matched = app
                .pools
                .search_in_chain(chain_id, &token0, &token1, options.filters())
                .await?;
            (matched, options)
        }
        PoolsCommand::SearchAll {
            token0_ids,
            token1_ids,
            options,
        } => {
            let matched = app
                .pools
                .search_cross_chain(&token0_ids, &token1_ids, options.filters())
                .await?;
            (matched, options)
        }
        PoolsCommand::Show {
            pool_id,
            chain_id,
            json,
        } => {
            let pool = app.pools.pool_by_id(chain_id, &pool_id).await?;
            if json {
                output::print_json(&pool)?;
            } else {
                output::print_pool(&pool);
            }
            return Ok(());
        }
    };

    let matched = sorted(matched, options.sort);
    if options.json {
        output::print_json(&matched)?;
    } else {
        output::print_pools(&matched, options.sort);
    }
    Ok(())
}

fn sorted(mut matched: MatchedPools, sort: Option<YieldTimeframe>) -> MatchedPools {
    if let Some(timeframe) = sort {
        matched.pools = rank_pools(matched.pools, timeframe);
    }
    matched
}

fn network_of(chain_id: Option<u64>) -> Result<Option<Network>> {
    Ok(chain_id.map(Network::from_chain_id).transpose()?)
}
