//! Shard command implementation.

use anyhow::Result;
use tracing::debug;

use crate::cli::ShardArgs;
use crate::config::Config;
use crate::error::ShardError;
use crate::fs_abstraction::{real_fs, FileSystem};
use crate::output::OutputSink;
use crate::pipeline;
use crate::shard::{ShardSpec, Sharder};

/// Run the shard command
pub fn run(args: &ShardArgs, config: &Config) -> Result<()> {
    execute(real_fs(), args, config)?;
    Ok(())
}

/// Compute the requested shard and emit it.
///
/// The descriptor and seed are validated before any file is opened. The
/// results path is validated only once the shard has been computed.
pub fn execute<F: FileSystem + ?Sized>(
    fs: &F,
    args: &ShardArgs,
    config: &Config,
) -> Result<Vec<String>, ShardError> {
    let spec: ShardSpec = args.shard.parse()?;
    let seed = config.resolve_seed(args.pool.seed)?;

    let pool = pipeline::prepare(fs, &super::pool_source(&args.pool, config))?;

    let addresses = Sharder::new(seed).shard(pool.addresses, spec);
    debug!(
        "Shard {} (seed {}) holds {} addresses",
        spec,
        seed,
        addresses.len()
    );

    let results = args
        .results
        .as_deref()
        .map(|path| config.resolve_results_path(path));
    let sink = OutputSink::from_results_path(results.as_deref())?;
    sink.emit(fs, &addresses)?;

    Ok(addresses)
}
