//! # ipshard - Deterministic IP Address Sharding
//!
//! Splits a pool of IPv4 addresses and CIDR ranges into `Y` shards so that
//! `Y` independent workers can each take their own slice of the pool without
//! talking to each other. Every worker runs with the same seed and the same
//! input file and asks for its own shard `X`.
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ipshard                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: shard, plan, locate, version               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── Default seed, exclusion list, results dir            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Loader (ipnet)                                             │
//! │    └── Literal tokens + full CIDR expansion, bad lines warn │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Exclusion filter                                           │
//! │    └── Exact match + host-with-colon match                  │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Sharder (rand + rand_chacha)                               │
//! │    └── Seeded shuffle, round-robin deal into Y shards       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Output                                                     │
//! │    └── stdout or .txt results file, one address per line    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use ipshard::exclusion::{self, ExclusionSet};
//! use ipshard::fs_abstraction::real_fs;
//! use ipshard::loader::{AddressLoader, ListKind};
//! use ipshard::shard::{ShardSpec, Sharder};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let spec: ShardSpec = "2/4".parse()?;
//!
//!     let loader = AddressLoader::new(real_fs());
//!     let pool = loader.load(Path::new("targets.txt"), ListKind::Input)?;
//!     let skip = loader.load(Path::new("exclude.txt"), ListKind::Exclude)?;
//!
//!     let exclusions: ExclusionSet = skip.addresses.iter().collect();
//!     let filtered = exclusion::filter(pool.addresses, &exclusions);
//!
//!     for addr in Sharder::new(42).shard(filtered, spec) {
//!         println!("{}", addr);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Error types and exit codes
//! - [`exclusion`] - Exclusion list matching
//! - [`fs_abstraction`] - Filesystem seam for tests
//! - [`loader`] - Address list loading and CIDR expansion
//! - [`output`] - Results file and console output
//! - [`pipeline`] - Load and filter stages shared by the commands
//! - [`shard`] - Shard descriptors and the seeded sharder
//! - [`utils`] - Formatting helpers

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod fs_abstraction;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod shard;
pub mod utils;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::ShardError;
pub use shard::{ShardSpec, Sharder};
