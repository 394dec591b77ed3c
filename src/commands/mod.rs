//! CLI command implementations.

pub mod locate;
pub mod plan;
pub mod shard;

use crate::cli::PoolArgs;
use crate::config::Config;
use crate::pipeline::PoolSource;

/// Merge pool options from the command line with config file defaults.
pub(crate) fn pool_source(args: &PoolArgs, config: &Config) -> PoolSource {
    PoolSource {
        input: args.input.clone(),
        exclude: config.resolve_exclude_file(args.blacklist.as_deref()),
        max_range_size: config.max_range_size,
    }
}
