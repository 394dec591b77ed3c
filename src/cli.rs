//! CLI argument parsing with clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(name = "ipshard")]
#[command(author, version, about = "Deterministic sharding of IP address pools")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the addresses assigned to one shard
    Shard(ShardArgs),

    /// Show how a pool would be split across all shards
    Plan(PlanArgs),

    /// Find which shard an address is assigned to
    Locate(LocateArgs),

    /// Show version
    Version,
}

/// Options shared by every command that builds an address pool.
#[derive(Args, Debug, Clone)]
pub struct PoolArgs {
    /// Seed for the pseudorandom permutation (falls back to the config file)
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Input file with addresses and CIDR ranges, one per line
    #[arg(long)]
    pub input: PathBuf,

    /// File with addresses to exclude
    #[arg(long, visible_alias = "exclude")]
    pub blacklist: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ShardArgs {
    /// Current shard and total (X/Y format)
    #[arg(long, allow_hyphen_values = true)]
    pub shard: String,

    #[command(flatten)]
    pub pool: PoolArgs,

    /// Save results to a text file (.txt extension or none; default is .txt)
    #[arg(long)]
    pub results: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    /// Total number of shards
    #[arg(long, allow_negative_numbers = true)]
    pub shards: i64,

    #[command(flatten)]
    pub pool: PoolArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LocateArgs {
    /// Address to look up, as it appears in the input
    pub address: String,

    /// Total number of shards
    #[arg(long, allow_negative_numbers = true)]
    pub shards: i64,

    #[command(flatten)]
    pub pool: PoolArgs,
}
